//! Common test fixtures for pipeline scenario tests.
//!
//! `Fixture` owns one in-memory instance of every collaborator the
//! pipeline needs, pre-populated with a standard delivery metadata set.
//! Tests mutate the stores, then run the pipeline and inspect the archive
//! the sink received.

#![allow(dead_code)]

use std::io::{Cursor, Read};

use consign::infrastructure::memory::{
    GroupIdCustomerDirectory, MemoryArtifactStore, MemorySink, MemoryTreeStore, StaticCatalog,
    StaticTransformer,
};
use consign::{
    ArchiveHandle, BuildError, DeliveryMetadata, DeliveryPipeline, DeliveryResource,
    PipelineOptions, RequestContext, ResolveError,
};

/// In-memory collaborators plus the delivery parameters of one build
pub struct Fixture {
    pub tree: MemoryTreeStore,
    pub artifacts: MemoryArtifactStore,
    pub catalog: StaticCatalog,
    pub transformer: StaticTransformer,
    pub customers: GroupIdCustomerDirectory,
    pub metadata: DeliveryMetadata,
    pub tree_prefix: String,
    pub options: PipelineOptions,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            tree: MemoryTreeStore::new("rev"),
            artifacts: MemoryArtifactStore::new(),
            catalog: StaticCatalog::new(),
            transformer: StaticTransformer::new(b"wrapped"),
            customers: GroupIdCustomerDirectory::new(),
            metadata: DeliveryMetadata::new("acme.delivery.c.TESTCLIENT", "TESTCLIENT-fixes", "v1"),
            tree_prefix: String::new(),
            options: PipelineOptions::default(),
        }
    }

    pub fn pipeline(&self) -> DeliveryPipeline<'_> {
        DeliveryPipeline::new(
            RequestContext::new(&self.tree, &self.artifacts),
            &self.catalog,
            &self.transformer,
            &self.customers,
            self.metadata.clone(),
            self.tree_prefix.clone(),
        )
        .with_options(self.options)
    }

    /// Resolve a raw token list
    pub fn resolve(&self, raw_tokens: &[&str]) -> Result<Vec<DeliveryResource<'_>>, ResolveError> {
        self.pipeline().resolve(&tokens(raw_tokens))
    }

    /// Run the full pipeline and return the received archive bytes
    pub fn run(&self, raw_tokens: &[&str]) -> Result<(ArchiveHandle, Vec<u8>), BuildError> {
        let mut sink = MemorySink::new();
        let handle = self.pipeline().run(&tokens(raw_tokens), &mut sink)?;
        let bytes = sink.archives()[0].1.clone();
        Ok((handle, bytes))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|token| token.to_string()).collect()
}

/// Locator paths of a resolved resource set
pub fn resource_paths(resources: &[DeliveryResource<'_>]) -> Vec<String> {
    resources
        .iter()
        .map(|resource| resource.locator.path.clone())
        .collect()
}

/// Sorted entry names of a zip archive
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

/// Content of one archive entry
pub fn entry_content(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = Vec::new();
    file.read_to_end(&mut content).unwrap();
    content
}

/// Parsed manifest document of an archive
pub fn manifest(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(&entry_content(bytes, "delivery_info.json")).unwrap()
}
