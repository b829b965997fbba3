use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that end a listing before anything is written.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("{}: {message}", path.display())]
    Inaccessible { path: PathBuf, message: String },

    #[error("cannot read {}", path.display())]
    IdentityDatabase {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid ignore pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
