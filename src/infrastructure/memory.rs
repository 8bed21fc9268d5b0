//! In-memory port implementations
//!
//! Map-backed stands-ins for the production store clients. They are used
//! by the test suites and are handy for local dry runs of the pipeline;
//! behavior mirrors the production semantics (fresh stream per open,
//! recursive listings, catalog-driven classification).

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Cursor, Read};
use std::path::PathBuf;

use regex::Regex;

use crate::domain::ports::{
    ArchiveSink, ArtifactStore, ClassificationCatalog, CustomerDirectory, TransformationService,
    TreeStore,
};
use crate::domain::value_objects::ClassificationTag;
use crate::error::TransformError;
use crate::models::DeliveryMetadata;

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no such entry: {path}"))
}

/// In-memory [`TreeStore`] with a fixed revision
#[derive(Debug, Clone, Default)]
pub struct MemoryTreeStore {
    revision: String,
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryTreeStore {
    pub fn new(revision: impl Into<String>) -> Self {
        Self {
            revision: revision.into(),
            files: BTreeMap::new(),
        }
    }

    /// Register a file under its full store path
    pub fn add_file(&mut self, path: &str, content: &[u8]) {
        self.files.insert(path.to_string(), content.to_vec());
    }
}

impl TreeStore for MemoryTreeStore {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path) || self.is_directory(path)
    }

    fn is_directory(&self, path: &str) -> bool {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        self.files.keys().any(|key| key.starts_with(&prefix))
    }

    fn list_files_recursively(&self, path: &str) -> io::Result<Vec<String>> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        Ok(self
            .files
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect())
    }

    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let content = self.files.get(path).ok_or_else(|| not_found(path))?;
        Ok(Box::new(Cursor::new(content.clone())))
    }

    fn current_revision(&self, _root: &str) -> io::Result<String> {
        Ok(self.revision.clone())
    }
}

/// In-memory [`ArtifactStore`] with per-coordinate classification
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactStore {
    artifacts: BTreeMap<String, Vec<u8>>,
    classifications: HashMap<String, ClassificationTag>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artifact without a catalog entry
    pub fn add_artifact(&mut self, coordinate: &str, content: &[u8]) {
        self.artifacts.insert(coordinate.to_string(), content.to_vec());
    }

    /// Register an artifact with a catalog classification
    pub fn add_classified(&mut self, coordinate: &str, content: &[u8], tag: ClassificationTag) {
        self.add_artifact(coordinate, content);
        self.classifications.insert(coordinate.to_string(), tag);
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn exists(&self, coordinate: &str) -> bool {
        self.artifacts.contains_key(coordinate)
    }

    fn open(&self, coordinate: &str) -> io::Result<Box<dyn Read + '_>> {
        let content = self
            .artifacts
            .get(coordinate)
            .ok_or_else(|| not_found(coordinate))?;
        Ok(Box::new(Cursor::new(content.clone())))
    }

    fn classify(&self, coordinate: &str) -> Option<ClassificationTag> {
        self.classifications.get(coordinate).cloned()
    }
}

/// [`ClassificationCatalog`] backed by static tables
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    release_notes_ids: HashMap<String, String>,
    denylist: Vec<Regex>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a classification tag code with a group-level
    /// release-notes artifact id
    pub fn with_release_notes_id(
        mut self,
        tag_code: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Self {
        self.release_notes_ids
            .insert(tag_code.into(), artifact_id.into());
        self
    }

    /// Add a denylist pattern.
    ///
    /// # Panics
    ///
    /// Panics when `pattern` is not a valid regular expression.
    pub fn with_denylist_pattern(mut self, pattern: &str) -> Self {
        self.denylist
            .push(Regex::new(pattern).expect("invalid denylist pattern"));
        self
    }
}

impl ClassificationCatalog for StaticCatalog {
    fn group_release_notes_artifact_id(&self, tag: &ClassificationTag) -> Option<String> {
        self.release_notes_ids.get(tag.code()).cloned()
    }

    fn denylist_patterns(&self) -> &[Regex] {
        &self.denylist
    }
}

/// [`TransformationService`] returning fixed output for any input
#[derive(Debug, Clone)]
pub struct StaticTransformer {
    output: Vec<u8>,
}

impl StaticTransformer {
    pub fn new(output: &[u8]) -> Self {
        Self {
            output: output.to_vec(),
        }
    }
}

impl TransformationService for StaticTransformer {
    fn transform(&self, path: &std::path::Path) -> Result<Vec<u8>, TransformError> {
        // honor the whole-file contract: the input must be readable
        std::fs::read(path)
            .map_err(|err| TransformError::new(path.display().to_string(), err.to_string()))?;
        Ok(self.output.clone())
    }
}

/// [`CustomerDirectory`] deriving the customer code from the group id
///
/// Delivery group ids end with the customer code
/// (`acme.delivery.c.TESTCLIENT`), so the last `.`-segment is the code.
#[derive(Debug, Clone, Default)]
pub struct GroupIdCustomerDirectory {
    boilerplates: HashMap<String, PathBuf>,
}

impl GroupIdCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a boilerplate file for a customer code
    pub fn with_boilerplate(mut self, customer_code: impl Into<String>, path: PathBuf) -> Self {
        self.boilerplates.insert(customer_code.into(), path);
        self
    }
}

impl CustomerDirectory for GroupIdCustomerDirectory {
    fn customer_code(&self, metadata: &DeliveryMetadata) -> Option<String> {
        metadata
            .group_id
            .split('.')
            .next_back()
            .filter(|code| !code.is_empty())
            .map(str::to_string)
    }

    fn boilerplate_path(&self, customer_code: &str) -> Option<PathBuf> {
        self.boilerplates.get(customer_code).cloned()
    }
}

/// [`ArchiveSink`] keeping received archives in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    archives: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Received archives in arrival order
    pub fn archives(&self) -> &[(String, Vec<u8>)] {
        &self.archives
    }
}

impl ArchiveSink for MemorySink {
    fn receive(&mut self, name: &str, content: &mut dyn Read) -> io::Result<()> {
        let mut bytes = Vec::new();
        content.read_to_end(&mut bytes)?;
        self.archives.push((name.to_string(), bytes));
        Ok(())
    }
}

/// [`ArchiveSink`] writing received archives into a local directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArchiveSink for DirectorySink {
    fn receive(&mut self, name: &str, content: &mut dyn Read) -> io::Result<()> {
        let mut file = std::fs::File::create(self.dir.join(name))?;
        io::copy(content, &mut file)?;
        Ok(())
    }
}
