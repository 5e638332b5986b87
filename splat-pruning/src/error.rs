use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PruneError>;

#[derive(Debug, Error)]
pub enum PruneError {
    #[error("{0}")]
    Usage(String),

    #[error("invalid scene: {0}")]
    Schema(#[from] SchemaError),

    #[error("prune percentage {0} is outside 0..=100")]
    InvalidPercentage(u32),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialise manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl PruneError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PruneError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Problems with the attribute layout of a scene.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("element `{0}` not found")]
    MissingElement(String),

    #[error("attribute `{0}` not found")]
    MissingAttribute(String),

    #[error("attribute `{attribute}` has {found} values, expected {expected}")]
    LengthMismatch {
        attribute: String,
        expected: usize,
        found: usize,
    },

    #[error("attribute `{0}` is not part of the splat schema")]
    UnknownAttribute(String),

    #[error("attribute `{0}` is not a numeric scalar")]
    UnsupportedType(String),

    #[error("inconsistent output layout: {0}")]
    Inconsistent(String),
}
