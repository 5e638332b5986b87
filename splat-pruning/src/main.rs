/// Gaussian splat opacity pruning entry point
use clap::Parser;
use splat_pruning::{PruneConfig, PruneError, SplatPruner};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Writes pruned copies of a Gaussian splat scene, dropping the least
/// visible splats at each retention level.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input PLY scene
    input: PathBuf,

    /// Directory for the pruned scenes, created if absent
    output_dir: PathBuf,

    /// Write the retention levels concurrently
    #[arg(long)]
    parallel: bool,

    /// Also write a JSON summary of the run
    #[arg(long)]
    manifest: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        // `--help` and `--version` come back as errors that print to stdout.
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let usage = PruneError::Usage(err.render().to_string());
            eprintln!("{usage}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), PruneError> {
    let config = PruneConfig {
        parallel: args.parallel,
        write_manifest: args.manifest,
        ..PruneConfig::default()
    };

    let pruner = SplatPruner::new(&args.input, &args.output_dir, config)?;
    let summary = pruner.run()?;

    info!(
        "Pruning complete: {} scenes written from {} splats",
        summary.outputs.len(),
        summary.point_count
    );
    Ok(())
}
