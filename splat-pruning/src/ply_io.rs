/// Scene loading and writing on top of `ply-rs`.
///
/// Reads accept ASCII and binary PLY. Writes are always binary little-endian
/// with one `float` property per column. Rows go through `SplatRow`, a flat
/// array of the splat attributes, rather than a per-row property map.
use crate::columns::AttributeColumns;
use crate::error::{PruneError, Result, SchemaError};
use constants::schema::{
    VERTEX_ATTRIBUTE_COUNT, VERTEX_ELEMENT, attribute_index, vertex_attribute_names,
};
use ply_rs::parser::Parser;
use ply_rs::ply::{
    Addable, ElementDef, Encoding, Ply, Property, PropertyAccess, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// One vertex, every splat attribute in its on-disk slot.
/// Properties outside the splat schema are dropped while parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SplatRow([f32; VERTEX_ATTRIBUTE_COUNT]);

impl PropertyAccess for SplatRow {
    fn new() -> Self {
        SplatRow([0.0; VERTEX_ATTRIBUTE_COUNT])
    }

    fn set_property(&mut self, property_name: String, property: Property) {
        if let (Some(index), Some(value)) =
            (attribute_index(&property_name), scalar_as_f32(&property))
        {
            self.0[index] = value;
        }
    }

    fn get_float(&self, property_name: &String) -> Option<f32> {
        attribute_index(property_name).map(|index| self.0[index])
    }
}

/// Read every splat attribute of the `vertex` element as an `f32` column.
pub fn read_columns(path: &Path) -> Result<AttributeColumns> {
    let file = File::open(path).map_err(|e| PruneError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let ply = Parser::<SplatRow>::new()
        .read_ply(&mut reader)
        .map_err(|e| PruneError::io(path, e))?;

    debug!(
        "Parsed {} ({:?}, {} element types)",
        path.display(),
        ply.header.encoding,
        ply.header.elements.len()
    );

    Ok(columns_from_ply(&ply)?)
}

/// Write columns as a binary PLY `vertex` element. Returns bytes written.
pub fn write_columns(path: &Path, columns: &AttributeColumns) -> Result<usize> {
    let mut ply = ply_from_columns(columns)?;

    let file = File::create(path).map_err(|e| PruneError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let written = Writer::new()
        .write_ply(&mut writer, &mut ply)
        .map_err(|e| PruneError::io(path, e))?;
    writer.flush().map_err(|e| PruneError::io(path, e))?;

    Ok(written)
}

fn columns_from_ply(ply: &Ply<SplatRow>) -> std::result::Result<AttributeColumns, SchemaError> {
    let element = ply
        .header
        .elements
        .get(VERTEX_ELEMENT)
        .ok_or_else(|| SchemaError::MissingElement(VERTEX_ELEMENT.to_string()))?;
    let rows: &[SplatRow] = ply
        .payload
        .get(VERTEX_ELEMENT)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut columns = AttributeColumns::new();
    for (index, name) in vertex_attribute_names().into_iter().enumerate() {
        let definition = element
            .properties
            .get(&name)
            .ok_or_else(|| SchemaError::MissingAttribute(name.clone()))?;
        if let PropertyType::List(..) = definition.data_type {
            return Err(SchemaError::UnsupportedType(name));
        }

        columns.insert(name, rows.iter().map(|row| row.0[index]).collect());
    }

    Ok(columns)
}

/// Numeric scalars are narrowed to `f32`; lists have no scalar value.
fn scalar_as_f32(property: &Property) -> Option<f32> {
    match *property {
        Property::Float(v) => Some(v),
        Property::Double(v) => Some(v as f32),
        Property::Char(v) => Some(f32::from(v)),
        Property::UChar(v) => Some(f32::from(v)),
        Property::Short(v) => Some(f32::from(v)),
        Property::UShort(v) => Some(f32::from(v)),
        Property::Int(v) => Some(v as f32),
        Property::UInt(v) => Some(v as f32),
        _ => None,
    }
}

/// Columns may be any subset of the splat schema, written in column order.
fn ply_from_columns(
    columns: &AttributeColumns,
) -> std::result::Result<Ply<SplatRow>, SchemaError> {
    let count = columns.len();
    let mut slots = Vec::with_capacity(columns.column_count());
    for (name, values) in columns.iter() {
        let index = attribute_index(name)
            .ok_or_else(|| SchemaError::UnknownAttribute(name.to_string()))?;
        if values.len() != count {
            return Err(SchemaError::LengthMismatch {
                attribute: name.to_string(),
                expected: count,
                found: values.len(),
            });
        }
        slots.push((index, values));
    }

    let mut element = ElementDef::new(VERTEX_ELEMENT.to_string());
    for name in columns.names() {
        element.properties.add(PropertyDef::new(
            name.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }

    let rows: Vec<SplatRow> = (0..count)
        .map(|i| {
            let mut row = SplatRow::new();
            for &(index, values) in &slots {
                row.0[index] = values[i];
            }
            row
        })
        .collect();

    let mut ply = Ply::<SplatRow>::new();
    ply.header.encoding = Encoding::BinaryLittleEndian;
    ply.header.elements.add(element);
    ply.payload.insert(VERTEX_ELEMENT.to_string(), rows);
    ply.make_consistent()
        .map_err(|e| SchemaError::Inconsistent(format!("{e:?}")))?;

    Ok(ply)
}
