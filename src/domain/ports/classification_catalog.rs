//! ClassificationCatalog port - classification-group metadata
//!
//! The catalog maps classification tags to their group-level release-notes
//! artifact id and supplies the denylist of resource paths that must never
//! be shipped. Implementations are expected to load this data once per
//! build (e.g. eagerly at pipeline construction), not query a live
//! database from inside the algorithm.

use crate::domain::value_objects::ClassificationTag;
use regex::Regex;

/// Abstract interface to the classification-group catalog
pub trait ClassificationCatalog {
    /// Release-notes artifact id associated with the group of `tag`, if any
    fn group_release_notes_artifact_id(&self, tag: &ClassificationTag) -> Option<String>;

    /// Patterns matching resource paths that must never be delivered.
    ///
    /// Matching uses unanchored search semantics over the full resource
    /// path.
    fn denylist_patterns(&self) -> &[Regex];
}
