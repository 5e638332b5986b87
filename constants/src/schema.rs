//! Attribute layout of a Gaussian splat PLY scene

/// Element holding one row per splat
pub const VERTEX_ELEMENT: &str = "vertex";

pub const POSITION: [&str; 3] = ["x", "y", "z"];

/// Normal attributes. The first one really is `nxx` in the scenes we consume.
pub const NORMAL: [&str; 3] = ["nxx", "ny", "nz"];

/// Base (DC) colour coefficients
pub const F_DC: [&str; 3] = ["f_dc_0", "f_dc_1", "f_dc_2"];

/// Stored opacity logit, before sigmoid activation
pub const OPACITY: &str = "opacity";

pub const SCALE: [&str; 3] = ["scale_0", "scale_1", "scale_2"];

/// Rotation quaternion components, order-significant
pub const ROTATION: [&str; 4] = ["rot_0", "rot_1", "rot_2", "rot_3"];

/// Number of higher-order spherical-harmonics colour coefficients per splat
pub const SH_REST_COUNT: usize = 45;

pub const SH_REST_PREFIX: &str = "f_rest_";

pub fn sh_rest_name(index: usize) -> String {
    format!("{SH_REST_PREFIX}{index}")
}

// Slot offsets of each group in on-disk order.
const NORMAL_OFFSET: usize = POSITION.len();
const F_DC_OFFSET: usize = NORMAL_OFFSET + NORMAL.len();
const SH_REST_OFFSET: usize = F_DC_OFFSET + F_DC.len();
const OPACITY_INDEX: usize = SH_REST_OFFSET + SH_REST_COUNT;
const SCALE_OFFSET: usize = OPACITY_INDEX + 1;
const ROTATION_OFFSET: usize = SCALE_OFFSET + SCALE.len();

/// Number of float properties per splat
pub const VERTEX_ATTRIBUTE_COUNT: usize = ROTATION_OFFSET + ROTATION.len();

/// Position of an attribute in `vertex_attribute_names`, without allocating.
pub fn attribute_index(name: &str) -> Option<usize> {
    if name == OPACITY {
        return Some(OPACITY_INDEX);
    }

    if let Some(suffix) = name.strip_prefix(SH_REST_PREFIX) {
        let canonical = !suffix.is_empty()
            && suffix.bytes().all(|b| b.is_ascii_digit())
            && (suffix == "0" || !suffix.starts_with('0'));
        return match suffix.parse::<usize>() {
            Ok(index) if canonical && index < SH_REST_COUNT => Some(SH_REST_OFFSET + index),
            _ => None,
        };
    }

    let groups: [(&[&str], usize); 5] = [
        (&POSITION, 0),
        (&NORMAL, NORMAL_OFFSET),
        (&F_DC, F_DC_OFFSET),
        (&SCALE, SCALE_OFFSET),
        (&ROTATION, ROTATION_OFFSET),
    ];
    groups.iter().find_map(|(names, offset)| {
        names
            .iter()
            .position(|candidate| *candidate == name)
            .map(|component| offset + component)
    })
}

/// Every vertex attribute in the order it is written to disk.
pub fn vertex_attribute_names() -> Vec<String> {
    let mut names = Vec::with_capacity(VERTEX_ATTRIBUTE_COUNT);
    names.extend(POSITION.iter().map(|n| n.to_string()));
    names.extend(NORMAL.iter().map(|n| n.to_string()));
    names.extend(F_DC.iter().map(|n| n.to_string()));
    names.extend((0..SH_REST_COUNT).map(sh_rest_name));
    names.push(OPACITY.to_string());
    names.extend(SCALE.iter().map(|n| n.to_string()));
    names.extend(ROTATION.iter().map(|n| n.to_string()));
    names
}
