/// JSON summary of a pruning run, written next to the pruned scenes.
use crate::config::manifest_file_name;
use crate::error::{PruneError, Result};
use crate::planner::PrunePercentage;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a whole run, one entry per retention level.
#[derive(Debug, Clone, Serialize)]
pub struct PruneSummary {
    /// Scene the splats were read from.
    pub input: PathBuf,
    /// Splat count before pruning.
    pub point_count: usize,
    pub outputs: Vec<PrunedOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrunedOutput {
    pub percentage: PrunePercentage,
    pub removed: usize,
    pub kept: usize,
    pub path: PathBuf,
    /// Lowest visibility that survived, `None` when nothing was kept.
    pub min_visibility: Option<f32>,
    pub bytes_written: usize,
}

pub struct ManifestWriter {
    output_dir: PathBuf,
    output_name: String,
}

impl ManifestWriter {
    pub fn new(output_dir: &Path, output_name: &str) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            output_name: output_name.to_string(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.output_dir.join(manifest_file_name(&self.output_name))
    }

    /// Serialise the summary as pretty JSON and return where it went.
    pub fn write(&self, summary: &PruneSummary) -> Result<PathBuf> {
        let path = self.path();
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(&path, json).map_err(|e| PruneError::io(&path, e))?;

        info!("Manifest saved: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_percentage_as_plain_number_and_empty_levels_as_null() {
        let summary = PruneSummary {
            input: PathBuf::from("scene.ply"),
            point_count: 0,
            outputs: vec![PrunedOutput {
                percentage: PrunePercentage::new(10).unwrap(),
                removed: 0,
                kept: 0,
                path: PathBuf::from("out/scene_pruned_opacity_10.ply"),
                min_visibility: None,
                bytes_written: 0,
            }],
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["point_count"], 0);
        assert_eq!(value["outputs"][0]["percentage"], 10);
        assert!(value["outputs"][0]["min_visibility"].is_null());
    }
}
