//! Ports - interfaces the pipeline consumes
//!
//! Implementations of the store and service ports live outside the domain
//! layer (in `infrastructure` for the in-memory variants, or outside this
//! crate for production clients).

pub mod archive_sink;
pub mod artifact_store;
pub mod classification_catalog;
pub mod customer_directory;
pub mod transformation_service;
pub mod tree_store;

pub use archive_sink::ArchiveSink;
pub use artifact_store::ArtifactStore;
pub use classification_catalog::ClassificationCatalog;
pub use customer_directory::CustomerDirectory;
pub use transformation_service::TransformationService;
pub use tree_store::TreeStore;
