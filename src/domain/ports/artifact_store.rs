//! ArtifactStore port - abstraction over the coordinate-addressed repository
//!
//! Artifacts are addressed by `group:artifact:version[:packaging]`
//! coordinate strings. Classification is backed by a catalog on the store
//! side; `classify` returns `None` when the catalog has no entry, in which
//! case the resolver falls back to the generic tag.

use crate::domain::value_objects::ClassificationTag;
use std::io::{self, Read};

/// Abstract read-only interface to the artifact repository
pub trait ArtifactStore {
    /// Check if an artifact exists at `coordinate`
    fn exists(&self, coordinate: &str) -> bool;

    /// Open a fresh readable stream over the artifact content
    fn open(&self, coordinate: &str) -> io::Result<Box<dyn Read + '_>>;

    /// Catalog classification of the artifact, if any
    fn classify(&self, coordinate: &str) -> Option<ClassificationTag>;
}
