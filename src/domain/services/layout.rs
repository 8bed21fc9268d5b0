//! Archive layout planning
//!
//! Assigns a collision-free relative path inside the archive to every
//! resource. Tree resources mirror their position in the branch; artifact
//! resources are named by precedence: release notes into their own folder,
//! basename collisions split by group id, the SQL loader installer
//! unversioned, everything else at the archive root under its basename.

use std::collections::HashMap;

use tracing::debug;

use crate::config::RELEASE_NOTES_DIR;
use crate::domain::value_objects::Coordinate;
use crate::error::ArchiveError;
use crate::models::{DeliveryResource, StoreKind};

/// A resource paired with its assigned archive path
#[derive(Debug)]
pub struct PlannedResource<'a> {
    pub resource: DeliveryResource<'a>,
    pub archive_path: String,
}

/// Computes the archive-relative placement of every resource
pub struct LayoutPlanner {
    tree_prefix: String,
}

impl LayoutPlanner {
    /// `tree_prefix` is the logical root of the branch tree resources were
    /// read from; it is stripped from their full paths to obtain the
    /// placement inside the archive.
    pub fn new(tree_prefix: impl Into<String>) -> Self {
        Self {
            tree_prefix: tree_prefix.into(),
        }
    }

    /// Plan the layout, preserving tree resources first, then artifact
    /// resources in placement-rule order.
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::EmptyDelivery`] when `resources` is empty
    /// - [`ArchiveError::PrefixMismatch`] when a tree path does not start
    ///   with the configured prefix
    /// - [`ArchiveError::NoLayoutRule`] when an artifact path is not a
    ///   well-formed coordinate, so no naming rule can apply
    pub fn plan<'a>(
        &self,
        resources: Vec<DeliveryResource<'a>>,
    ) -> Result<Vec<PlannedResource<'a>>, ArchiveError> {
        if resources.is_empty() {
            return Err(ArchiveError::EmptyDelivery);
        }
        let (trees, artifacts): (Vec<_>, Vec<_>) = resources
            .into_iter()
            .partition(|resource| resource.locator.kind == StoreKind::Tree);

        let mut planned = Vec::new();
        for resource in trees {
            let archive_path = self.tree_placement(&resource)?;
            planned.push(PlannedResource {
                resource,
                archive_path,
            });
        }
        planned.extend(artifact_placements(artifacts)?);
        for entry in &planned {
            debug!(
                "resolved delivery path for {}: {}",
                entry.resource.locator.path, entry.archive_path
            );
        }
        Ok(planned)
    }

    /// Tree files go to a path mirroring their position in the branch
    fn tree_placement(&self, resource: &DeliveryResource<'_>) -> Result<String, ArchiveError> {
        let full_path = &resource.locator.path;
        let relative = full_path.strip_prefix(&self.tree_prefix).ok_or_else(|| {
            ArchiveError::PrefixMismatch {
                path: full_path.clone(),
                prefix: self.tree_prefix.clone(),
            }
        })?;
        Ok(relative.trim_matches('/').to_string())
    }
}

/// Artifact naming, applied in this exact precedence:
/// release notes, basename collisions, installer, regular.
fn artifact_placements(
    resources: Vec<DeliveryResource<'_>>,
) -> Result<Vec<PlannedResource<'_>>, ArchiveError> {
    let mut parsed = Vec::with_capacity(resources.len());
    let mut unplaceable = Vec::new();
    for resource in &resources {
        match Coordinate::parse(&resource.locator.path) {
            Some(coordinate) => parsed.push(coordinate),
            None => unplaceable.push(resource.locator.path.clone()),
        }
    }
    if !unplaceable.is_empty() {
        return Err(ArchiveError::NoLayoutRule(unplaceable));
    }

    let (release_notes, remainder): (Vec<_>, Vec<_>) = resources
        .into_iter()
        .zip(parsed)
        .partition(|(resource, _)| resource.locator.classification.is_release_notes());

    // collision counting happens over the full remainder, before the
    // installer rule extracts anything from it
    let mut basename_counts: HashMap<String, usize> = HashMap::new();
    for (_, coordinate) in &remainder {
        *basename_counts.entry(coordinate.basename()).or_insert(0) += 1;
    }

    let mut planned = Vec::new();
    let mut colliding = Vec::new();
    let mut installers = Vec::new();
    let mut regular = Vec::new();
    for (resource, coordinate) in release_notes {
        planned.push(PlannedResource {
            resource,
            archive_path: release_notes_placement(&coordinate),
        });
    }
    for (resource, coordinate) in remainder {
        if basename_counts[&coordinate.basename()] > 1 {
            colliding.push((resource, coordinate));
        } else if coordinate.is_installer() {
            installers.push((resource, coordinate));
        } else {
            regular.push((resource, coordinate));
        }
    }
    for (resource, coordinate) in colliding {
        planned.push(PlannedResource {
            archive_path: format!("{}/{}", coordinate.group(), coordinate.basename()),
            resource,
        });
    }
    for (resource, coordinate) in installers {
        planned.push(PlannedResource {
            archive_path: coordinate.unversioned_name(),
            resource,
        });
    }
    for (resource, coordinate) in regular {
        planned.push(PlannedResource {
            archive_path: coordinate.basename(),
            resource,
        });
    }
    Ok(planned)
}

fn release_notes_placement(coordinate: &Coordinate) -> String {
    format!(
        "{}/Release notes {}-{}.{}",
        RELEASE_NOTES_DIR,
        coordinate.artifact(),
        coordinate.version(),
        coordinate.packaging()
    )
}
