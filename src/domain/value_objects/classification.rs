//! Classification Tag Value Object
//!
//! Catalog-assigned category label for a delivery resource. The set of
//! tags is open (it lives in the classification catalog), but three codes
//! have fixed meaning inside the pipeline: the tag stamped on every tree
//! file, the tag marking release-notes artifacts, and the generic fallback
//! used when the catalog has no entry for a coordinate.

use std::fmt;

/// Tag code assigned to every tree-origin resource
pub const TREE_FILE_TAG: &str = "TREEFILE";

/// Tag code marking release-notes artifacts
pub const RELEASE_NOTES_TAG: &str = "RELEASENOTES";

/// Fallback tag code for artifacts the catalog cannot classify
pub const GENERIC_TAG: &str = "FILE";

/// A catalog-assigned category label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassificationTag(String);

impl ClassificationTag {
    /// Create a tag from a catalog code
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Tag stamped on every tree-origin resource
    pub fn tree_file() -> Self {
        Self::new(TREE_FILE_TAG)
    }

    /// Tag marking release-notes artifacts
    pub fn release_notes() -> Self {
        Self::new(RELEASE_NOTES_TAG)
    }

    /// Generic fallback tag
    pub fn generic() -> Self {
        Self::new(GENERIC_TAG)
    }

    /// The catalog code
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether this tag marks a release-notes resource
    pub fn is_release_notes(&self) -> bool {
        self.0 == RELEASE_NOTES_TAG
    }
}

impl fmt::Display for ClassificationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
