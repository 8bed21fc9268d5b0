//! Core data models for Consign
//!
//! Defines the fundamental data structures used throughout the pipeline:
//! - `ResourceLocator`: where a delivery resource lives and how it is classified
//! - `ResourceContent` / `DeliveryResource`: streamable resource payloads
//! - `DeliveryMetadata`: the parameters describing one delivery build
//! - `RequestContext`: the pair of stores a request is resolved against

use chrono::{DateTime, Utc};
use std::fmt;
use std::io::{self, Cursor, Read};

use crate::domain::ports::{ArtifactStore, TreeStore};
use crate::domain::value_objects::ClassificationTag;

/// Kind of backing store a resource originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// Version-controlled hierarchical file tree
    Tree,
    /// Coordinate-addressed artifact repository
    Artifact,
}

/// Location and classification of a single delivery resource
///
/// Immutable value; uniqueness of a resource within a resolved set is
/// defined solely by `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    /// Store the resource lives in
    pub kind: StoreKind,
    /// Full store-native identifier (tree path or artifact coordinate)
    pub path: String,
    /// Catalog-assigned category label
    pub classification: ClassificationTag,
    /// Tree revision the resource was read at, where applicable
    pub revision: Option<String>,
}

impl ResourceLocator {
    /// Locator for a tree-origin resource
    pub fn tree(path: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            kind: StoreKind::Tree,
            path: path.into(),
            classification: ClassificationTag::tree_file(),
            revision: Some(revision.into()),
        }
    }

    /// Locator for an artifact-origin resource
    pub fn artifact(coordinate: impl Into<String>, classification: ClassificationTag) -> Self {
        Self {
            kind: StoreKind::Artifact,
            path: coordinate.into(),
            classification,
            revision: None,
        }
    }
}

/// Capability to open a fresh readable stream over a resource payload
///
/// The archiver fully reads and drops one stream before opening the next,
/// bounding the open-handle count to one.
pub trait ResourceContent {
    /// Open a fresh stream over the resource bytes
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// Content read on demand from the tree store
pub struct TreeContent<'a> {
    store: &'a dyn TreeStore,
    path: String,
}

impl<'a> TreeContent<'a> {
    pub fn new(store: &'a dyn TreeStore, path: impl Into<String>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }
}

impl ResourceContent for TreeContent<'_> {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.store.open(&self.path)
    }
}

/// Content read on demand from the artifact store
pub struct ArtifactContent<'a> {
    store: &'a dyn ArtifactStore,
    coordinate: String,
}

impl<'a> ArtifactContent<'a> {
    pub fn new(store: &'a dyn ArtifactStore, coordinate: impl Into<String>) -> Self {
        Self {
            store,
            coordinate: coordinate.into(),
        }
    }
}

impl ResourceContent for ArtifactContent<'_> {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.store.open(&self.coordinate)
    }
}

/// Content held fully in memory
///
/// Produced by the wrapping stage (the transformation service returns
/// whole-file replacement bytes) and by [`DeliveryResource::buffered`].
pub struct BufferedContent(Vec<u8>);

impl BufferedContent {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl ResourceContent for BufferedContent {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.0.as_slice())))
    }
}

/// A single file to be included into the delivery
pub struct DeliveryResource<'a> {
    /// Where the resource lives and how it is classified
    pub locator: ResourceLocator,
    /// Capability to read the resource payload
    pub content: Box<dyn ResourceContent + 'a>,
}

impl<'a> DeliveryResource<'a> {
    /// Create a new delivery resource
    pub fn new(locator: ResourceLocator, content: impl ResourceContent + 'a) -> Self {
        Self {
            locator,
            content: Box::new(content),
        }
    }

    /// Read the full payload into memory
    pub fn buffered(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.content.open()?.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

impl fmt::Debug for DeliveryResource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryResource")
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

/// Parameters describing one delivery build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryMetadata {
    /// Group id the finished archive will be published under
    pub group_id: String,
    /// Artifact id of the delivery
    pub artifact_id: String,
    /// Version of the delivery
    pub version: String,
    /// Author recorded with the delivery, if known
    pub author: Option<String>,
    /// Free-form comment recorded with the delivery
    pub comment: Option<String>,
    /// When the delivery request was created
    pub created_at: Option<DateTime<Utc>>,
}

impl DeliveryMetadata {
    /// Create metadata with the required identifiers
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            author: None,
            comment: None,
            created_at: None,
        }
    }
}

/// The pair of stores a build request is resolved against
#[derive(Clone, Copy)]
pub struct RequestContext<'a> {
    /// Version-controlled file tree
    pub tree: &'a dyn TreeStore,
    /// Coordinate-addressed artifact repository
    pub artifacts: &'a dyn ArtifactStore,
}

impl<'a> RequestContext<'a> {
    pub fn new(tree: &'a dyn TreeStore, artifacts: &'a dyn ArtifactStore) -> Self {
        Self { tree, artifacts }
    }
}
