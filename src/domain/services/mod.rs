//! Domain services - the pipeline stages
//!
//! Each stage depends only on the previous stage's output:
//! normalization, source resolution, release-notes enhancement,
//! uniqueness/privacy guarding, script wrapping, layout planning.

pub mod guard;
pub mod layout;
pub mod normalizer;
pub mod release_notes;
pub mod resolver;
pub mod wrapper;

pub use guard::PrivacyGuard;
pub use layout::{LayoutPlanner, PlannedResource};
pub use normalizer::{normalize_request, NormalizedRequest};
pub use release_notes::ReleaseNotesEnhancer;
pub use resolver::SourceResolver;
pub use wrapper::ScriptWrapper;
