//! Fixed configuration for the delivery pipeline
//!
//! The directory names and packaging signatures below are business
//! constants shared with the deployment tooling on the receiving side.
//! They are deliberately plain `const` items rather than runtime
//! configuration: a delivery built with different values would not install.

/// Packaging assumed when an artifact coordinate omits it
pub const DEFAULT_PACKAGING: &str = "jar";

/// Group under which release-notes artifacts are published
pub const RELEASE_NOTES_GROUP: &str = "release_notes";

/// Packaging of release-notes artifacts
pub const RELEASE_NOTES_PACKAGING: &str = "txt";

/// Artifact id of the SQL loader installer
pub const INSTALLER_ARTIFACT_ID: &str = "load_sql";

/// Packaging of the SQL loader installer
pub const INSTALLER_PACKAGING: &str = "ssp";

/// File name of the manifest document inside the archive
pub const MANIFEST_FILE_NAME: &str = "delivery_info.json";

/// File name of the optional legal text inside the archive
pub const BOILERPLATE_FILE_NAME: &str = "Copyright";

/// Directory receiving release-notes files inside the archive
pub const RELEASE_NOTES_DIR: &str = "Release Notes";

/// Filename suffix marking owner scripts that must always be wrapped
pub const WRAPPED_SCRIPT_SUFFIX: &str = "_b.sql";

/// Per-namespace control file listing custom scripts to wrap
pub const WRAP_LIST_FILE: &str = "wrap.txt";

const OWNER_WORK_SUBDIR: &str = "ows_work/db/scripts/install/owsowner";
const OWNER_HOME_SUBDIR: &str = "ows_home/db/scripts/install/owsowner";
const CUSTOM_SCRIPTS_SUBDIR: &str = "cust";

/// A top-level tree namespace subject to script wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapNamespace {
    prefix: &'static str,
}

impl WrapNamespace {
    /// Namespace prefix relative to the tree root
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Path of the wrap control file for this namespace
    pub fn wrap_list_path(&self) -> String {
        format!("{}/{}", self.prefix, WRAP_LIST_FILE)
    }

    /// Owner directory in the work tree
    pub fn owner_work_dir(&self) -> String {
        format!("{}/{}", self.prefix, OWNER_WORK_SUBDIR)
    }

    /// Owner directory in the home tree
    pub fn owner_home_dir(&self) -> String {
        format!("{}/{}", self.prefix, OWNER_HOME_SUBDIR)
    }

    /// Custom-scripts folder the wrap list is matched against
    pub fn custom_scripts_dir(&self) -> String {
        format!("{}/{}", self.owner_work_dir(), CUSTOM_SCRIPTS_SUBDIR)
    }
}

/// The two namespaces whose scripts are subject to wrapping
pub const WRAP_NAMESPACES: [WrapNamespace; 2] = [
    WrapNamespace { prefix: "cards" },
    WrapNamespace { prefix: "dwh" },
];

/// Togglable pipeline behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Look up and attach release-notes artifacts during resolution
    pub enhance_release_notes: bool,
    /// Append the per-customer legal text to the archive
    pub append_boilerplate: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            enhance_release_notes: true,
            append_boilerplate: false,
        }
    }
}
