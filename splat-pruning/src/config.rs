/// Run configuration for the pruning pipeline.
use crate::error::Result;
use crate::planner::PrunePercentage;
use constants::pruning::{
    DEFAULT_PRUNE_PERCENTAGES, MANIFEST_SUFFIX, OUTPUT_EXTENSION, OUTPUT_NAME_INFIX,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneConfig {
    /// One output scene per entry, written in this order.
    pub percentages: Vec<PrunePercentage>,
    /// Write the levels concurrently on the rayon pool.
    pub parallel: bool,
    /// Also write a JSON summary of the run next to the outputs.
    pub write_manifest: bool,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            percentages: DEFAULT_PRUNE_PERCENTAGES
                .iter()
                .filter_map(|&p| PrunePercentage::new(p.into()).ok())
                .collect(),
            parallel: false,
            write_manifest: false,
        }
    }
}

impl PruneConfig {
    /// Replace the retention levels, validating each one.
    pub fn with_percentages<I>(mut self, percentages: I) -> Result<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        self.percentages = percentages
            .into_iter()
            .map(PrunePercentage::new)
            .collect::<Result<_>>()?;
        Ok(self)
    }
}

pub fn output_file_name(base_name: &str, percentage: PrunePercentage) -> String {
    format!("{base_name}{OUTPUT_NAME_INFIX}{percentage}.{OUTPUT_EXTENSION}")
}

pub fn manifest_file_name(base_name: &str) -> String {
    format!("{base_name}{MANIFEST_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PruneError;

    #[test]
    fn defaults_are_the_five_fixed_levels() {
        let config = PruneConfig::default();
        let levels: Vec<u8> = config.percentages.iter().map(|p| p.get()).collect();
        assert_eq!(levels, vec![10, 20, 30, 40, 50]);
        assert!(!config.parallel);
        assert!(!config.write_manifest);
    }

    #[test]
    fn percentages_can_be_substituted() {
        let config = PruneConfig::default().with_percentages([0, 100]).unwrap();
        assert_eq!(config.percentages.len(), 2);
        assert!(matches!(
            PruneConfig::default().with_percentages([5, 120]),
            Err(PruneError::InvalidPercentage(120))
        ));
    }

    #[test]
    fn output_names_follow_the_pruned_opacity_pattern() {
        let p = PrunePercentage::new(30).unwrap();
        assert_eq!(
            output_file_name("garden", p),
            "garden_pruned_opacity_30.ply"
        );
        assert_eq!(
            manifest_file_name("garden"),
            "garden_pruning_manifest.json"
        );
    }
}
