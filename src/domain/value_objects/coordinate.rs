//! Artifact Coordinate Value Object
//!
//! A coordinate is the `group:artifact:version[:packaging]` string
//! identifying an artifact in the artifact store. Packaging defaults to
//! `jar` when omitted. The coordinate also carries the naming rules used
//! by the archive layout (basename, unversioned installer name) and the
//! version-descending candidate walk used by the release-notes lookup.

use crate::config::{
    DEFAULT_PACKAGING, INSTALLER_ARTIFACT_ID, INSTALLER_PACKAGING, RELEASE_NOTES_GROUP,
    RELEASE_NOTES_PACKAGING,
};
use std::fmt;

/// A parsed artifact coordinate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: String,
    packaging: String,
}

impl Coordinate {
    /// Parse a raw token into a coordinate.
    ///
    /// Returns `None` when the token does not have the coordinate shape:
    /// three or four non-empty `:`-separated fields, none of which may
    /// contain `/` or whitespace. Tokens that fail this check are treated
    /// as tree paths by the request normalizer.
    pub fn parse(token: &str) -> Option<Self> {
        let fields: Vec<&str> = token.split(':').collect();
        if !(3..=4).contains(&fields.len()) {
            return None;
        }
        let well_formed = |field: &&str| {
            !field.is_empty() && !field.contains('/') && !field.chars().any(char::is_whitespace)
        };
        if !fields.iter().all(well_formed) {
            return None;
        }
        Some(Self {
            group: fields[0].to_string(),
            artifact: fields[1].to_string(),
            version: fields[2].to_string(),
            packaging: fields
                .get(3)
                .map(|p| p.to_string())
                .unwrap_or_else(|| DEFAULT_PACKAGING.to_string()),
        })
    }

    /// Coordinate of a release-notes artifact for the given id and version
    pub fn release_notes(artifact_id: &str, version: &str) -> Self {
        Self {
            group: RELEASE_NOTES_GROUP.to_string(),
            artifact: artifact_id.to_string(),
            version: version.to_string(),
            packaging: RELEASE_NOTES_PACKAGING.to_string(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    /// Archive file name: `{artifact}-{version}.{packaging}`
    pub fn basename(&self) -> String {
        format!("{}-{}.{}", self.artifact, self.version, self.packaging)
    }

    /// Installer file name with the version removed: `{artifact}.{packaging}`
    pub fn unversioned_name(&self) -> String {
        format!("{}.{}", self.artifact, self.packaging)
    }

    /// Whether this coordinate names the SQL loader installer
    pub fn is_installer(&self) -> bool {
        self.artifact == INSTALLER_ARTIFACT_ID && self.packaging == INSTALLER_PACKAGING
    }

    /// Version candidates for the release-notes lookup, most specific first.
    ///
    /// Produced by iteratively stripping the last `.`/`-`-separated token:
    /// `1.2.3-456` yields `[1.2.3-456, 1.2.3, 1.2, 1]`.
    pub fn version_candidates(&self) -> Vec<String> {
        let mut candidates = Vec::new();
        let mut version = self.version.clone();
        loop {
            candidates.push(version.clone());
            match version.rfind(['.', '-']) {
                Some(cut) => {
                    version.truncate(cut);
                    while version.ends_with(['.', '-']) {
                        version.pop();
                    }
                    if version.is_empty() {
                        break;
                    }
                }
                None => break,
            }
        }
        candidates
    }

    /// Component code used for the component-level release-notes lookup.
    ///
    /// Many components have artifact ids like `CODE-postfix` where `CODE`
    /// is the artifact id of the release notes; the last `-`-delimited
    /// segment is stripped. Ids without a dash are returned unchanged.
    pub fn component_code(&self) -> &str {
        match self.artifact.rsplit_once('-') {
            Some((code, _)) => code,
            None => &self.artifact,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group, self.artifact, self.version, self.packaging
        )
    }
}
