/// Percentages of lowest-visibility splats removed, one output scene each
pub const DEFAULT_PRUNE_PERCENTAGES: [u8; 5] = [10, 20, 30, 40, 50];

/// Output files are named `<input stem><infix><percentage>.<extension>`
pub const OUTPUT_NAME_INFIX: &str = "_pruned_opacity_";

pub const OUTPUT_EXTENSION: &str = "ply";

/// Suffix of the optional JSON run summary, appended to the input stem
pub const MANIFEST_SUFFIX: &str = "_pruning_manifest.json";
