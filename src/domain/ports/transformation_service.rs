//! TransformationService port - external script obfuscation
//!
//! The service operates on whole files addressed by a local path and
//! returns the transformed bytes. Resources are assumed small enough for
//! the result to be held in memory.

use crate::error::TransformError;
use std::path::Path;

/// Abstract interface to the content transformation service
pub trait TransformationService {
    /// Transform the file at `path`, returning the replacement bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] when the service rejects or fails to
    /// process the file. The pipeline propagates this unchanged and aborts
    /// the build.
    fn transform(&self, path: &Path) -> Result<Vec<u8>, TransformError>;
}
