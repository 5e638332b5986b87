/// Opacity pruning pipeline orchestrating load, ranking and per-level output.
use crate::columns::{AttributeColumns, assemble};
use crate::config::{PruneConfig, output_file_name};
use crate::error::{PruneError, Result};
use crate::gaussian::Gaussian;
use crate::manifest::{ManifestWriter, PruneSummary, PrunedOutput};
use crate::planner::{PrunePercentage, PrunePlan};
use crate::ply_io::{read_columns, write_columns};
use crate::ranking::RankedGaussians;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Produces one pruned copy of a splat scene per configured retention level.
/// The scene is ranked once and every level slices the same ranked sequence.
pub struct SplatPruner {
    /// Source PLY scene.
    input_path: PathBuf,
    /// Directory receiving the pruned scenes, created on demand.
    output_dir: PathBuf,
    /// Input file stem used to name every output.
    base_name: String,
    config: PruneConfig,
}

impl SplatPruner {
    pub fn new(input_path: &Path, output_dir: &Path, config: PruneConfig) -> Result<Self> {
        let base_name = input_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| {
                PruneError::Usage(format!(
                    "input path has no file name: {}",
                    input_path.display()
                ))
            })?;

        Ok(Self {
            input_path: input_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            base_name,
            config,
        })
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn output_path(&self, percentage: PrunePercentage) -> PathBuf {
        self.output_dir
            .join(output_file_name(&self.base_name, percentage))
    }

    /// Executes the complete pipeline and writes every level.
    pub fn run(&self) -> Result<PruneSummary> {
        info!("Loading PLY scene: {}", self.input_path.display());

        let spinner = ProgressBar::new_spinner();
        spinner.enable_steady_tick(Duration::from_millis(120));
        let ranked = self.load_ranked(&spinner)?;

        self.prune_ranked(&ranked)
    }

    /// Reads, assembles and ranks the input scene. The spinner is cleared
    /// whether or not loading succeeds.
    fn load_ranked(&self, spinner: &ProgressBar) -> Result<RankedGaussians> {
        let ranked = self.read_and_rank(spinner);
        spinner.finish_and_clear();
        ranked
    }

    fn read_and_rank(&self, spinner: &ProgressBar) -> Result<RankedGaussians> {
        spinner.set_message("Reading scene");
        let columns = read_columns(&self.input_path)?;

        spinner.set_message("Ranking splats by opacity");
        let gaussians = assemble(&columns)?;
        drop(columns);
        info!("Original gaussian count: {}", gaussians.len());

        let ranked = RankedGaussians::rank(gaussians);
        if let (Some(first), Some(last)) = (ranked.first(), ranked.last()) {
            debug!(
                "Visibility range: {:.6} to {:.6}",
                first.visibility(),
                last.visibility()
            );
        }
        Ok(ranked)
    }

    /// Plans, extracts and writes every configured level from an already
    /// ranked scene. Levels written before a failure stay on disk.
    pub fn prune_ranked(&self, ranked: &RankedGaussians) -> Result<PruneSummary> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| PruneError::io(&self.output_dir, e))?;

        let pb = ProgressBar::new(self.config.percentages.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.green/blue}] {pos}/{len} levels ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("▉▊▋▌▍▎▏ "),
        );
        pb.set_message("Writing pruned scenes");

        let write = |&percentage: &PrunePercentage| {
            let output = self.write_level(ranked, percentage);
            pb.inc(1);
            output
        };

        let results: Vec<Result<PrunedOutput>> = if self.config.parallel {
            self.config.percentages.par_iter().map(write).collect()
        } else {
            self.config.percentages.iter().map(write).collect()
        };
        // First failure in level order wins, whichever thread hit it.
        let outputs = results.into_iter().collect::<Result<Vec<_>>>()?;

        pb.finish_with_message("Pruned scenes written");

        let summary = PruneSummary {
            input: self.input_path.clone(),
            point_count: ranked.len(),
            outputs,
        };

        if self.config.write_manifest {
            ManifestWriter::new(&self.output_dir, &self.base_name).write(&summary)?;
        }

        Ok(summary)
    }

    fn write_level(
        &self,
        ranked: &RankedGaussians,
        percentage: PrunePercentage,
    ) -> Result<PrunedOutput> {
        let plan = PrunePlan::new(ranked.len(), percentage);
        let kept = plan.kept(ranked);
        let columns = AttributeColumns::from_gaussians(kept);

        let path = self.output_path(percentage);
        let bytes_written = write_columns(&path, &columns)?;
        info!(
            "Pruned {}%: removed {}, kept {} -> {}",
            percentage,
            plan.num_to_remove,
            plan.num_to_keep,
            path.display()
        );

        Ok(PrunedOutput {
            percentage,
            removed: plan.num_to_remove,
            kept: plan.num_to_keep,
            path,
            min_visibility: kept.first().map(Gaussian::visibility),
            bytes_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::columns_with_opacities;
    use tempfile::TempDir;

    #[test]
    fn spinner_is_cleared_when_loading_fails() {
        let tmp = TempDir::new().unwrap();
        let pruner = SplatPruner::new(
            &tmp.path().join("missing.ply"),
            tmp.path(),
            PruneConfig::default(),
        )
        .unwrap();

        let spinner = ProgressBar::hidden();
        assert!(pruner.load_ranked(&spinner).is_err());
        assert!(spinner.is_finished());
    }

    #[test]
    fn spinner_is_cleared_after_ranking() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("small.ply");
        write_columns(&input, &columns_with_opacities(&[1.0, -1.0])).unwrap();
        let pruner = SplatPruner::new(&input, tmp.path(), PruneConfig::default())
            .unwrap();

        let spinner = ProgressBar::hidden();
        let ranked = pruner.load_ranked(&spinner).unwrap();
        assert!(spinner.is_finished());
        assert_eq!(ranked[0].opacity(), -1.0);
    }

    #[test]
    fn base_name_is_the_input_stem() {
        let pruner = SplatPruner::new(
            Path::new("scenes/bicycle.ply"),
            Path::new("out"),
            PruneConfig::default(),
        )
        .unwrap();
        assert_eq!(pruner.base_name(), "bicycle");
        assert_eq!(
            pruner.output_path(PrunePercentage::new(40).unwrap()),
            Path::new("out").join("bicycle_pruned_opacity_40.ply")
        );
        assert!(matches!(
            SplatPruner::new(Path::new(""), Path::new("out"), PruneConfig::default()),
            Err(PruneError::Usage(_))
        ));
    }
}
