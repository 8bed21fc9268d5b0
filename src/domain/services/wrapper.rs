//! Script wrapping (content obfuscation)
//!
//! Replaces the content of selected tree resources with the output of the
//! external transformation service. Two selection rules, both
//! case-insensitive on the filename:
//!
//! 1. custom scripts listed in a namespace's wrap control file and present
//!    in that namespace's custom-scripts folder
//! 2. owner scripts (fixed filename suffix) directly inside one of the
//!    owner directories
//!
//! A missing control file or directory contributes nothing. Wrapping is
//! transparent: the locator is unchanged, only the payload is replaced.
//! Any transformation failure aborts the whole build.

use std::fs;
use std::io::Read;

use tracing::{debug, info, warn};

use crate::config::{WrapNamespace, WRAPPED_SCRIPT_SUFFIX, WRAP_NAMESPACES};
use crate::domain::ports::{TransformationService, TreeStore};
use crate::error::BuildError;
use crate::models::{BufferedContent, DeliveryResource, StoreKind};

/// Applies the wrap rules and runs selected resources through the
/// transformation service
pub struct ScriptWrapper<'a> {
    tree: &'a dyn TreeStore,
    service: &'a dyn TransformationService,
}

impl<'a> ScriptWrapper<'a> {
    pub fn new(tree: &'a dyn TreeStore, service: &'a dyn TransformationService) -> Self {
        Self { tree, service }
    }

    /// Wrap every selected resource, passing the rest through unchanged.
    ///
    /// Resource order is preserved.
    pub fn wrap(
        &self,
        resources: Vec<DeliveryResource<'a>>,
    ) -> Result<Vec<DeliveryResource<'a>>, BuildError> {
        let targets = self.wrap_targets()?;
        let selected: Vec<&str> = resources
            .iter()
            .filter(|resource| is_selected(resource, &targets))
            .map(|resource| resource.locator.path.as_str())
            .collect();
        info!("to be wrapped: [{}]", selected.join(";"));

        resources
            .into_iter()
            .map(|resource| {
                if is_selected(&resource, &targets) {
                    self.wrap_resource(resource)
                } else {
                    Ok(resource)
                }
            })
            .collect()
    }

    /// Candidate relative paths subject to wrapping, lowercased for
    /// case-insensitive suffix matching against resource paths.
    fn wrap_targets(&self) -> Result<Vec<String>, BuildError> {
        let mut targets = Vec::new();
        for namespace in WRAP_NAMESPACES {
            for cust in self.read_wrap_list(&namespace)? {
                targets.push(format!("{}/{}", namespace.custom_scripts_dir(), cust));
            }
            for dir in [namespace.owner_work_dir(), namespace.owner_home_dir()] {
                for script in self.owner_scripts(&dir)? {
                    targets.push(format!("{dir}/{script}"));
                }
            }
        }
        debug!("wrap targets: {:?}", targets);
        Ok(targets.into_iter().map(|t| t.to_lowercase()).collect())
    }

    /// Custom scripts requested by the namespace's control file and
    /// actually present in its custom-scripts folder. Returns the store's
    /// filename casing.
    fn read_wrap_list(&self, namespace: &WrapNamespace) -> Result<Vec<String>, BuildError> {
        let list_path = namespace.wrap_list_path();
        if !self.tree.exists(&list_path) {
            warn!("wrap file not found: {}", list_path);
            return Ok(Vec::new());
        }
        let mut raw = String::new();
        self.tree.open(&list_path)?.read_to_string(&mut raw)?;
        let requested: Vec<String> = raw
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect();
        let existing = self.direct_children(&namespace.custom_scripts_dir())?;
        Ok(existing
            .into_iter()
            .filter(|name| requested.contains(&name.to_lowercase()))
            .collect())
    }

    /// Owner scripts (by suffix) directly inside `dir`
    fn owner_scripts(&self, dir: &str) -> Result<Vec<String>, BuildError> {
        let scripts = self
            .direct_children(dir)?
            .into_iter()
            .filter(|name| name.to_lowercase().ends_with(WRAPPED_SCRIPT_SUFFIX))
            .collect();
        Ok(scripts)
    }

    /// File names directly inside `dir`; empty when the directory is absent
    fn direct_children(&self, dir: &str) -> Result<Vec<String>, BuildError> {
        if !self.tree.exists(dir) {
            debug!("no scripts found in folder: {}", dir);
            return Ok(Vec::new());
        }
        let children = self
            .tree
            .list_files_recursively(dir)?
            .into_iter()
            .filter_map(|path| {
                path.strip_prefix(dir)
                    .map(|rest| rest.trim_start_matches('/').to_string())
            })
            .filter(|name| !name.is_empty() && !name.contains('/'))
            .collect();
        Ok(children)
    }

    /// Replace the resource payload with the transformed bytes.
    ///
    /// The service operates on whole files, so the payload is buffered and
    /// handed over via a scratch file.
    fn wrap_resource(
        &self,
        resource: DeliveryResource<'a>,
    ) -> Result<DeliveryResource<'a>, BuildError> {
        info!("wrapping resource: {}", resource.locator.path);
        let payload = resource.buffered()?;
        let scratch_dir = tempfile::tempdir()?;
        let scratch_path = scratch_dir.path().join("_f.sql");
        fs::write(&scratch_path, &payload)?;
        let wrapped = self.service.transform(&scratch_path)?;
        Ok(DeliveryResource::new(
            resource.locator,
            BufferedContent::new(wrapped),
        ))
    }
}

fn is_selected(resource: &DeliveryResource<'_>, targets: &[String]) -> bool {
    if resource.locator.kind != StoreKind::Tree {
        return false;
    }
    // suffix match because resource paths may carry the branch prefix
    let path = resource.locator.path.to_lowercase();
    targets.iter().any(|target| path.ends_with(target))
}
