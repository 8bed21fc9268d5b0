//! Uniqueness and privacy guard
//!
//! Final gate of the resolution phase: removes resources with repeating
//! locations (these occur e.g. when a release-notes lookup finds a file the
//! user also requested explicitly) and rejects the whole delivery when any
//! resource matches the denylist. Partial inclusion of a delivery
//! containing a forbidden resource is never permitted.

use tracing::{error, warn};

use crate::domain::ports::ClassificationCatalog;
use crate::error::ResolveError;
use crate::models::DeliveryResource;

/// Deduplicates resolved resources and enforces the denylist
pub struct PrivacyGuard<'a> {
    catalog: &'a dyn ClassificationCatalog,
}

impl<'a> PrivacyGuard<'a> {
    pub fn new(catalog: &'a dyn ClassificationCatalog) -> Self {
        Self { catalog }
    }

    /// Apply both checks, returning the surviving resources sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ForbiddenResources`] listing every denylisted
    /// path when at least one resource matches a denylist pattern.
    pub fn apply(
        &self,
        resources: Vec<DeliveryResource<'a>>,
    ) -> Result<Vec<DeliveryResource<'a>>, ResolveError> {
        let resources = dedup_by_path(resources);
        self.reject_forbidden(&resources)?;
        Ok(resources)
    }

    fn reject_forbidden(&self, resources: &[DeliveryResource<'_>]) -> Result<(), ResolveError> {
        let patterns = self.catalog.denylist_patterns();
        let offending: Vec<String> = resources
            .iter()
            .map(|resource| resource.locator.path.as_str())
            .filter(|path| patterns.iter().any(|pattern| pattern.is_match(path)))
            .map(str::to_string)
            .collect();
        if offending.is_empty() {
            return Ok(());
        }
        error!("private files detected: {}", offending.join(", "));
        Err(ResolveError::ForbiddenResources(offending))
    }
}

/// Remove resources with repeating paths, keeping the first occurrence.
///
/// The result is sorted by path; the sort is stable, so among equal paths
/// input order decides which resource survives.
fn dedup_by_path(resources: Vec<DeliveryResource<'_>>) -> Vec<DeliveryResource<'_>> {
    let full_list: Vec<String> = resources
        .iter()
        .map(|resource| resource.locator.path.clone())
        .collect();
    let mut sorted = resources;
    sorted.sort_by(|a, b| a.locator.path.cmp(&b.locator.path));
    let before = sorted.len();
    sorted.dedup_by(|a, b| a.locator.path == b.locator.path);
    if sorted.len() < before {
        warn!("some duplicates were removed from: {}", full_list.join(", "));
    }
    sorted
}
