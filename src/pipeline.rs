//! Delivery build pipeline
//!
//! Wires the stages together: normalize, resolve, enhance, guard, wrap,
//! plan, archive. The two halves are exposed separately - `resolve`
//! produces the final resource set, `build` packages a resource set - so
//! callers can checksum or cache the resolved resources in between.
//!
//! The pipeline holds no mutable state; concurrent builds only need their
//! own store client instances.

use tracing::info;

use crate::config::PipelineOptions;
use crate::domain::ports::{
    ArchiveSink, ClassificationCatalog, CustomerDirectory, TransformationService,
};
use crate::domain::services::{
    normalize_request, LayoutPlanner, PrivacyGuard, ReleaseNotesEnhancer, ScriptWrapper,
    SourceResolver,
};
use crate::error::{BuildResult, ResolveError};
use crate::infrastructure::archive::{ArchiveHandle, ZipArchiver};
use crate::models::{DeliveryMetadata, DeliveryResource, RequestContext};

/// One delivery build, instantiated per invocation
pub struct DeliveryPipeline<'a> {
    context: RequestContext<'a>,
    catalog: &'a dyn ClassificationCatalog,
    transformer: &'a dyn TransformationService,
    customers: &'a dyn CustomerDirectory,
    metadata: DeliveryMetadata,
    tree_prefix: String,
    options: PipelineOptions,
}

impl<'a> DeliveryPipeline<'a> {
    /// Create a pipeline with default options.
    ///
    /// `tree_prefix` is the logical root of the branch the tree store
    /// serves; it is stripped from tree resource paths when computing
    /// their placement inside the archive.
    pub fn new(
        context: RequestContext<'a>,
        catalog: &'a dyn ClassificationCatalog,
        transformer: &'a dyn TransformationService,
        customers: &'a dyn CustomerDirectory,
        metadata: DeliveryMetadata,
        tree_prefix: impl Into<String>,
    ) -> Self {
        Self {
            context,
            catalog,
            transformer,
            customers,
            metadata,
            tree_prefix: tree_prefix.into(),
            options: PipelineOptions::default(),
        }
    }

    /// Override the default options
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve the raw token list to the final, deduplicated and
    /// denylist-checked resource set.
    pub fn resolve(&self, tokens: &[String]) -> Result<Vec<DeliveryResource<'a>>, ResolveError> {
        let request = normalize_request(tokens)?;
        info!(
            "initial delivery list: {}",
            request.all_tokens().cloned().collect::<Vec<_>>().join(", ")
        );

        let resolver = SourceResolver::new(self.context.tree, self.context.artifacts);
        let mut resources = resolver.resolve(&request)?;

        if self.options.enhance_release_notes {
            let enhancer = ReleaseNotesEnhancer::new(self.context.artifacts, self.catalog);
            let additional = enhancer.enhance(&resources);
            resources.extend(additional);
        }

        let resources = PrivacyGuard::new(self.catalog).apply(resources)?;
        info!(
            "to be included into delivery: {}",
            resources
                .iter()
                .map(|resource| resource.locator.path.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(resources)
    }

    /// Package an already-resolved resource set: wrap selected scripts,
    /// plan the layout and write the archive into `sink`.
    pub fn build(
        &self,
        resources: Vec<DeliveryResource<'a>>,
        sink: &mut dyn ArchiveSink,
    ) -> BuildResult<ArchiveHandle> {
        let wrapper = ScriptWrapper::new(self.context.tree, self.transformer);
        let wrapped = wrapper.wrap(resources)?;

        let planned = LayoutPlanner::new(self.tree_prefix.clone()).plan(wrapped)?;

        let archiver = ZipArchiver::new(self.customers, self.options);
        let handle = archiver.build_archive(planned, &self.metadata, sink)?;
        Ok(handle)
    }

    /// Resolve and build in one go
    pub fn run(&self, tokens: &[String], sink: &mut dyn ArchiveSink) -> BuildResult<ArchiveHandle> {
        let resources = self.resolve(tokens)?;
        self.build(resources, sink)
    }
}
