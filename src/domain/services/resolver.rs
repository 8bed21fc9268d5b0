//! Source resolution
//!
//! Expands the normalized request into concrete resources backed by the
//! tree and artifact stores. Resolution is all-or-nothing: the first
//! missing path or coordinate aborts with a `ResolveError`, and no partial
//! result is ever returned.

use tracing::{debug, error, warn};

use crate::domain::ports::{ArtifactStore, TreeStore};
use crate::domain::services::normalizer::NormalizedRequest;
use crate::domain::value_objects::ClassificationTag;
use crate::error::ResolveError;
use crate::models::{ArtifactContent, DeliveryResource, ResourceLocator, TreeContent};

/// Resolves request tokens to concrete store-backed resources
pub struct SourceResolver<'a> {
    tree: &'a dyn TreeStore,
    artifacts: &'a dyn ArtifactStore,
}

impl<'a> SourceResolver<'a> {
    pub fn new(tree: &'a dyn TreeStore, artifacts: &'a dyn ArtifactStore) -> Self {
        Self { tree, artifacts }
    }

    /// Resolve every token of the request, tree resources first.
    ///
    /// Tree directories are expanded to every file beneath them in
    /// lexicographic order. Every tree resource is stamped with the tree's
    /// current root revision; every artifact resource gets its catalog
    /// classification, falling back to the generic tag when the catalog
    /// has no entry.
    pub fn resolve(
        &self,
        request: &NormalizedRequest,
    ) -> Result<Vec<DeliveryResource<'a>>, ResolveError> {
        let mut resources = self.resolve_tree_resources(&request.tree_paths)?;
        resources.extend(self.resolve_artifact_resources(&request.artifact_coordinates)?);
        Ok(resources)
    }

    fn resolve_tree_resources(
        &self,
        paths: &[String],
    ) -> Result<Vec<DeliveryResource<'a>>, ResolveError> {
        debug!("resolving tree paths: {:?}", paths);
        if paths.is_empty() {
            return Ok(Vec::new());
        }
        let revision = self.tree.current_revision("/")?;
        let mut resources = Vec::new();
        for path in paths {
            for file in self.expand_tree_path(path)? {
                let locator = ResourceLocator::tree(file.clone(), revision.clone());
                resources.push(DeliveryResource::new(
                    locator,
                    TreeContent::new(self.tree, file),
                ));
            }
        }
        Ok(resources)
    }

    fn expand_tree_path(&self, path: &str) -> Result<Vec<String>, ResolveError> {
        if !self.tree.exists(path) {
            error!("tree file not found: {}", path);
            return Err(ResolveError::TreePathNotFound(path.to_string()));
        }
        if self.tree.is_directory(path) {
            let mut listing = self.tree.list_files_recursively(path)?;
            listing.sort();
            debug!("expanded path {} to: {:?}", path, listing);
            Ok(listing)
        } else {
            Ok(vec![path.to_string()])
        }
    }

    fn resolve_artifact_resources(
        &self,
        coordinates: &[String],
    ) -> Result<Vec<DeliveryResource<'a>>, ResolveError> {
        debug!("resolving artifact coordinates: {:?}", coordinates);
        for coordinate in coordinates {
            if !self.artifacts.exists(coordinate) {
                error!("artifact not found: {}", coordinate);
                return Err(ResolveError::ArtifactNotFound(coordinate.clone()));
            }
        }
        let resources = coordinates
            .iter()
            .map(|coordinate| {
                let classification = self.classify(coordinate);
                let locator = ResourceLocator::artifact(coordinate.clone(), classification);
                DeliveryResource::new(locator, ArtifactContent::new(self.artifacts, coordinate))
            })
            .collect();
        Ok(resources)
    }

    fn classify(&self, coordinate: &str) -> ClassificationTag {
        match self.artifacts.classify(coordinate) {
            Some(tag) => tag,
            None => {
                // preserved degraded mode: an unclassified artifact may
                // indicate catalog misconfiguration
                warn!(
                    "cannot determine classification for {}, using default {}",
                    coordinate,
                    ClassificationTag::generic()
                );
                ClassificationTag::generic()
            }
        }
    }
}
