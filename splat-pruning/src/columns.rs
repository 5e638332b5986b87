/// Struct-of-arrays scene attributes and the conversion to and from records.
///
/// Files store one column per attribute while ranking works on whole
/// records. Both directions of that conversion live here, so this is the
/// only module that maps attribute names onto `Gaussian` fields.
use crate::error::SchemaError;
use crate::gaussian::{Gaussian, ShRest};
use constants::schema::{
    F_DC, NORMAL, OPACITY, POSITION, ROTATION, SCALE, SH_REST_COUNT, sh_rest_name,
};

/// Named `f32` columns kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeColumns {
    columns: Vec<(String, Vec<f32>)>,
}

impl AttributeColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f32>) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name, values)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[f32]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn require(&self, name: &str) -> Result<&[f32], SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::MissingAttribute(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Row count, taken from the first column. Zero for an empty set.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand records back into one column per attribute, in on-disk order.
    pub fn from_gaussians(gaussians: &[Gaussian]) -> Self {
        let mut columns = Self::new();

        push_group(&mut columns, &POSITION, gaussians, Gaussian::position);
        push_group(&mut columns, &NORMAL, gaussians, Gaussian::normal);
        push_group(&mut columns, &F_DC, gaussians, Gaussian::f_dc);
        for index in 0..SH_REST_COUNT {
            columns.insert(
                sh_rest_name(index),
                gaussians.iter().map(|g| g.f_rest()[index]).collect(),
            );
        }
        columns.insert(OPACITY, gaussians.iter().map(Gaussian::opacity).collect());
        push_group(&mut columns, &SCALE, gaussians, Gaussian::scale);
        push_group(&mut columns, &ROTATION, gaussians, Gaussian::rotation);

        columns
    }
}

fn push_group<const K: usize>(
    columns: &mut AttributeColumns,
    names: &[&str; K],
    gaussians: &[Gaussian],
    field: fn(&Gaussian) -> [f32; K],
) {
    for (component, name) in names.iter().enumerate() {
        columns.insert(
            *name,
            gaussians.iter().map(|g| field(g)[component]).collect(),
        );
    }
}

/// Resolves required columns and checks they all hold `expected` rows.
struct ColumnSet<'a> {
    columns: &'a AttributeColumns,
    expected: usize,
}

impl<'a> ColumnSet<'a> {
    fn column(&self, name: &str) -> Result<&'a [f32], SchemaError> {
        let values = self.columns.require(name)?;
        if values.len() != self.expected {
            return Err(SchemaError::LengthMismatch {
                attribute: name.to_string(),
                expected: self.expected,
                found: values.len(),
            });
        }
        Ok(values)
    }

    fn group<const K: usize>(&self, names: &[&str; K]) -> Result<[&'a [f32]; K], SchemaError> {
        let empty: &'a [f32] = &[];
        let mut group = [empty; K];
        for (slot, name) in group.iter_mut().zip(names) {
            *slot = self.column(name)?;
        }
        Ok(group)
    }
}

/// Zip per-attribute columns into records, preserving row order.
///
/// The point count is the length of the `x` column; every other required
/// attribute must match it.
pub fn assemble(columns: &AttributeColumns) -> Result<Vec<Gaussian>, SchemaError> {
    let expected = columns.require(POSITION[0])?.len();
    let set = ColumnSet { columns, expected };

    let position = set.group(&POSITION)?;
    let normal = set.group(&NORMAL)?;
    let f_dc = set.group(&F_DC)?;
    let opacity = set.column(OPACITY)?;
    let scale = set.group(&SCALE)?;
    let rotation = set.group(&ROTATION)?;
    let f_rest = (0..SH_REST_COUNT)
        .map(|index| set.column(&sh_rest_name(index)))
        .collect::<Result<Vec<_>, _>>()?;

    let gaussians = (0..expected)
        .map(|i| {
            let rest: ShRest = std::array::from_fn(|j| f_rest[j][i]);
            Gaussian::new(
                position.map(|c| c[i]),
                normal.map(|c| c[i]),
                f_dc.map(|c| c[i]),
                rest,
                opacity[i],
                scale.map(|c| c[i]),
                rotation.map(|c| c[i]),
            )
        })
        .collect();

    Ok(gaussians)
}

#[cfg(test)]
pub(crate) fn columns_with_opacities(opacities: &[f32]) -> AttributeColumns {
    let n = opacities.len();
    let mut columns = AttributeColumns::new();
    for name in constants::schema::vertex_attribute_names() {
        let values = if name == OPACITY {
            opacities.to_vec()
        } else {
            (0..n).map(|i| i as f32).collect()
        };
        columns.insert(name, values);
    }
    columns
}
