//! Error types for dependency graph construction.
//!
//! Every error here is a caller-input problem. Graph construction is
//! all-or-nothing: no partial graph is returned alongside an error, and
//! nothing is retried.

use std::io;
use thiserror::Error;

/// The error type for unity-dep-graph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The manifest disables the lockfile, which the builder requires.
    #[error(
        "Building a dep graph without a packages-lock.json is not supported. \
         Please remove `enableLockFile: false` from your `manifest.json`"
    )]
    ConfigurationUnsupported,

    /// One of the two documents failed to parse.
    #[error("malformed input: {0}")]
    MalformedInput(unity_lockfile::Error),

    /// A project document could not be read from disk.
    #[error("failed to load project documents: {0}")]
    Load(unity_lockfile::Error),

    /// A referenced package has no entry in the lockfile.
    #[error(
        "unresolved dependency: `{name}` (required by {required_by}) has no entry in packages-lock.json"
    )]
    UnresolvedDependency {
        /// Package name that could not be found.
        name: String,
        /// Node id of the package that referenced it.
        required_by: String,
    },

    /// The resolved dependencies form a cycle.
    #[error("dependency cycle detected: {}", .cycle.join(" -> "))]
    CycleDetected {
        /// Node ids along one cycle, first id repeated at the end.
        cycle: Vec<String>,
    },

    /// An edge referenced a node id that was never added.
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Serialized graph data is internally inconsistent.
    #[error("invalid graph data: {0}")]
    InvalidGraphData(String),

    /// Build options could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<unity_lockfile::Error> for Error {
    fn from(err: unity_lockfile::Error) -> Self {
        match err {
            unity_lockfile::Error::Parse { .. } => Self::MalformedInput(err),
            unity_lockfile::Error::Io { .. } => Self::Load(err),
        }
    }
}

/// A specialized Result type for unity-dep-graph operations.
pub type Result<T> = std::result::Result<T, Error>;
