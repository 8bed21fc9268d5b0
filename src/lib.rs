//! Consign - delivery packaging pipeline
//!
//! Consign turns a user-authored list of file references (paths in a
//! version-controlled tree, coordinates in an artifact repository) into a
//! single deterministic zip archive: it resolves and verifies every
//! reference, attaches release notes where available, wraps selected
//! scripts through an external transformation service and lays the result
//! out under collision-free names alongside a manifest document.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod manifest;
pub mod models;
pub mod pipeline;

// Re-exports for convenience
pub use config::PipelineOptions;
pub use domain::ports::{
    ArchiveSink, ArtifactStore, ClassificationCatalog, CustomerDirectory, TransformationService,
    TreeStore,
};
pub use domain::value_objects::{ClassificationTag, Coordinate};
pub use error::{ArchiveError, BuildError, BuildResult, ResolveError, TransformError};
pub use infrastructure::{ArchiveHandle, ZipArchiver};
pub use models::{
    DeliveryMetadata, DeliveryResource, RequestContext, ResourceContent, ResourceLocator, StoreKind,
};
pub use pipeline::DeliveryPipeline;
