// indexer/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures the scan can surface. Missing or non-matching trees are not errors;
/// they produce an empty index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Traversal fault below the root (permission denied, symlink loop, ...).
    #[error("walking {}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A matched path has a segment that cannot become an index key.
    #[error("non-UTF-8 path segment in {}", .0.display())]
    NonUtf8(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
