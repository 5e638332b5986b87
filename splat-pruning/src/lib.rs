//! Opacity-ranked pruning of 3D Gaussian splat scenes.
//!
//! A scene is read once from PLY, its splats are ranked by effective
//! visibility (sigmoid of the stored opacity logit) and one pruned scene is
//! written per retention level, each dropping the least visible splats.

pub mod columns;
pub mod config;
pub mod error;
pub mod gaussian;
pub mod manifest;
pub mod planner;
pub mod ply_io;
pub mod pruner;
pub mod ranking;

pub use columns::{AttributeColumns, assemble};
pub use config::PruneConfig;
pub use error::{PruneError, Result, SchemaError};
pub use gaussian::{Gaussian, ShRest, sigmoid};
pub use manifest::{PruneSummary, PrunedOutput};
pub use planner::{PrunePercentage, PrunePlan};
pub use pruner::SplatPruner;
pub use ranking::RankedGaussians;
