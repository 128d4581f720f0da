//! Error types for the catalogue loader and HTTP adapter.
//!
//! Each fallible subsystem gets its own `thiserror` enum rather than one
//! crate-wide error: callers that only touch the catalogue never need to
//! match on HTTP variants and vice versa.

use std::path::PathBuf;
use thiserror::Error;

/// Failure loading or validating a single catalogue file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("{} is not valid YAML: {1}", .0.display())]
    Parse(PathBuf, #[source] serde_yaml::Error),

    #[error("{} failed schema validation: {}", .path.display(), .errors.join(", "))]
    Schema { path: PathBuf, errors: Vec<String> },

    #[error(
        "{}: duplicate profile name {name:?}, first loaded from {}",
        .path.display(),
        .first_seen.display()
    )]
    Duplicate {
        path: PathBuf,
        name: String,
        first_seen: PathBuf,
    },
}

/// Failure building or using the HTTP adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("invalid proxy URL {0:?}: must be http(s)://host:port")]
    InvalidProxy(String),

    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Fatal configuration problems surfaced to the CLI layer: invalid proxy
/// syntax or a missing target source at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no targets supplied: pass --targets or --subnet")]
    NoTargets,

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("failed to read targets file {}: {1}", .0.display())]
    TargetsFile(PathBuf, #[source] std::io::Error),
}
