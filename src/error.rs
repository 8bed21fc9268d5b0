//! Error types for Consign
//!
//! Uses `thiserror` for library errors. Resolution, archivation and
//! transformation failures are separate enums so callers can react to the
//! phase that failed; `BuildError` is the umbrella type returned by the
//! pipeline entry points.

use thiserror::Error;

/// Result type alias for whole-pipeline operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Failure while resolving the requested file list against the backing stores.
///
/// All variants are fatal and abort the build before any archive work begins.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The request contained no usable tokens after normalization
    #[error("delivery list should not be empty")]
    EmptyRequest,

    /// A requested tree path does not exist
    #[error("tree file not found: {0}")]
    TreePathNotFound(String),

    /// A requested artifact coordinate does not exist
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),

    /// One or more resolved resources matched the denylist.
    /// The message lists every offending path, not just the first.
    #[error("the following files must not be sent to the client: {}", .0.join(", "))]
    ForbiddenResources(Vec<String>),

    /// Backing store failure during resolution
    #[error("store error: {0}")]
    Store(#[from] std::io::Error),
}

/// Failure while laying out or writing the delivery archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// No resources survived to the archiving stage
    #[error("delivery archive cannot be empty")]
    EmptyDelivery,

    /// Resources for which no placement rule exists
    #[error("no layout rules are known for: {}", .0.join(", "))]
    NoLayoutRule(Vec<String>),

    /// A tree resource path does not start with the configured root prefix
    #[error("tree resources should start with {prefix}; got {path}")]
    PrefixMismatch { path: String, prefix: String },

    /// Two resources were assigned the same archive path.
    /// Indicates a naming logic defect upstream.
    #[error("path {0} already exists in delivery")]
    DuplicateArchivePath(String),

    /// I/O failure while staging or writing the archive
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip container failure
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Failure reported by the external transformation service.
///
/// Propagated unchanged: a single failed transformation invalidates the
/// whole archive, so there is no partial-wrapping recovery.
#[derive(Error, Debug)]
#[error("transformation failed for {path}: {message}")]
pub struct TransformError {
    /// Local scratch path handed to the service
    pub path: String,
    /// Service-reported failure description
    pub message: String,
}

impl TransformError {
    /// Create a new transformation error
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Umbrella error for the pipeline surface
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Backing store failure outside the resolution phase
    /// (e.g. while reading wrap control files)
    #[error("store error: {0}")]
    Store(#[from] std::io::Error),
}
