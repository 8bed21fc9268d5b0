//! Release-notes enhancement
//!
//! Adds release-notes artifacts for every resolved artifact resource, when
//! they can be found. The lookup walks version candidates from most to
//! least specific, probing the group-level release-notes id (from the
//! classification catalog) before the component-level id derived from the
//! artifact's own name. A group-level hit always wins over a
//! component-level one for the same artifact.

use tracing::debug;

use crate::domain::ports::{ArtifactStore, ClassificationCatalog};
use crate::domain::value_objects::{ClassificationTag, Coordinate};
use crate::models::{ArtifactContent, DeliveryResource, ResourceLocator, StoreKind};

/// Resolves auxiliary release-notes resources for artifact deliveries
pub struct ReleaseNotesEnhancer<'a> {
    artifacts: &'a dyn ArtifactStore,
    catalog: &'a dyn ClassificationCatalog,
}

impl<'a> ReleaseNotesEnhancer<'a> {
    pub fn new(artifacts: &'a dyn ArtifactStore, catalog: &'a dyn ClassificationCatalog) -> Self {
        Self { artifacts, catalog }
    }

    /// Additional resources to ship along with the originals.
    ///
    /// Runs before deduplication, so a release note the user already
    /// requested explicitly is simply dropped later by the guard.
    pub fn enhance(&self, resources: &[DeliveryResource<'a>]) -> Vec<DeliveryResource<'a>> {
        resources
            .iter()
            .filter(|resource| resource.locator.kind == StoreKind::Artifact)
            .filter_map(|resource| self.resolve_release_notes(&resource.locator))
            .map(|coordinate| {
                let locator =
                    ResourceLocator::artifact(coordinate.clone(), ClassificationTag::release_notes());
                DeliveryResource::new(locator, ArtifactContent::new(self.artifacts, coordinate))
            })
            .collect()
    }

    fn resolve_release_notes(&self, locator: &ResourceLocator) -> Option<String> {
        let coordinate = Coordinate::parse(&locator.path)?;
        let candidates = self.candidate_coordinates(&coordinate, &locator.classification);
        let found = candidates
            .into_iter()
            .find(|candidate| self.artifacts.exists(candidate));
        match &found {
            Some(gav) => debug!("release notes for {}: {}", locator.path, gav),
            None => debug!("no release notes found for {}", locator.path),
        }
        found
    }

    /// All coordinates worth probing, in precedence order: every version
    /// candidate of the group-level id first, then every version candidate
    /// of the component-level id.
    fn candidate_coordinates(
        &self,
        coordinate: &Coordinate,
        tag: &ClassificationTag,
    ) -> Vec<String> {
        let versions = coordinate.version_candidates();
        let mut candidates = Vec::new();
        if let Some(group_id) = self.catalog.group_release_notes_artifact_id(tag) {
            candidates.extend(
                versions
                    .iter()
                    .map(|version| Coordinate::release_notes(&group_id, version).to_string()),
            );
        }
        let component_id = coordinate.component_code();
        candidates.extend(
            versions
                .iter()
                .map(|version| Coordinate::release_notes(component_id, version).to_string()),
        );
        candidates
    }
}
