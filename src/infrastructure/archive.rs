//! Zip archive assembly
//!
//! Streams the planned resources into a single compressed archive, appends
//! the manifest document and the optional per-customer boilerplate, and
//! hands the finished file to the archive sink. Resource streams are
//! opened, fully consumed and closed one at a time.
//!
//! Manifest and boilerplate generation are best-effort: a failure there is
//! logged and the archive is still produced without the affected file.
//! Everything else is fatal.

use std::collections::HashSet;
use std::io::{self, Seek, SeekFrom, Write};

use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::{PipelineOptions, BOILERPLATE_FILE_NAME, MANIFEST_FILE_NAME};
use crate::domain::ports::{ArchiveSink, CustomerDirectory};
use crate::domain::services::PlannedResource;
use crate::error::ArchiveError;
use crate::manifest::DeliveryManifest;
use crate::models::DeliveryMetadata;

/// Opaque reference to a finished archive handed to the sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHandle {
    /// Work name the sink received the archive under
    pub name: String,
}

/// Writes planned resources into a zip archive
pub struct ZipArchiver<'a> {
    customers: &'a dyn CustomerDirectory,
    options: PipelineOptions,
}

impl<'a> ZipArchiver<'a> {
    pub fn new(customers: &'a dyn CustomerDirectory, options: PipelineOptions) -> Self {
        Self { customers, options }
    }

    /// Build the archive and hand it to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::DuplicateArchivePath`] when two resources
    /// were assigned the same target path (a naming defect upstream), or
    /// an I/O / zip error when staging fails.
    pub fn build_archive(
        &self,
        planned: Vec<PlannedResource<'_>>,
        metadata: &DeliveryMetadata,
        sink: &mut dyn ArchiveSink,
    ) -> Result<ArchiveHandle, ArchiveError> {
        let archive_name = work_name(metadata);
        info!(
            "start building the delivery {}:{} as {}",
            metadata.artifact_id, metadata.version, archive_name
        );

        let staging = tempfile::tempfile()?;
        let mut zip = ZipWriter::new(staging);
        let file_options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut used_paths = HashSet::new();
        for entry in &planned {
            if !used_paths.insert(entry.archive_path.clone()) {
                return Err(ArchiveError::DuplicateArchivePath(entry.archive_path.clone()));
            }
            zip.start_file(entry.archive_path.clone(), file_options)?;
            let mut stream = entry.resource.content.open()?;
            io::copy(&mut stream, &mut zip)?;
        }

        if let Err(err) = self.append_manifest(&mut zip, metadata, &planned, file_options) {
            warn!("delivery manifest skipped: {}", err);
        }
        if self.options.append_boilerplate {
            if let Err(err) = self.append_boilerplate(&mut zip, metadata, file_options) {
                warn!("boilerplate skipped: {}", err);
            }
        }

        let mut staged = zip.finish()?;
        staged.seek(SeekFrom::Start(0))?;
        sink.receive(&archive_name, &mut staged)?;
        info!("delivery archive handed to sink: {}", archive_name);
        Ok(ArchiveHandle { name: archive_name })
    }

    fn append_manifest(
        &self,
        zip: &mut ZipWriter<std::fs::File>,
        metadata: &DeliveryMetadata,
        planned: &[PlannedResource<'_>],
        file_options: SimpleFileOptions,
    ) -> Result<(), ArchiveError> {
        let customer_code = self
            .customers
            .customer_code(metadata)
            .ok_or_else(|| io::Error::other("unable to determine customer code"))?;
        let placed: Vec<_> = planned
            .iter()
            .map(|entry| {
                (
                    entry.archive_path.clone(),
                    entry.resource.locator.classification.clone(),
                )
            })
            .collect();
        let manifest = DeliveryManifest::assemble(metadata, &customer_code, &placed);
        let rendered = manifest.to_json().map_err(io::Error::other)?;
        zip.start_file(MANIFEST_FILE_NAME, file_options)?;
        zip.write_all(rendered.as_bytes())?;
        Ok(())
    }

    fn append_boilerplate(
        &self,
        zip: &mut ZipWriter<std::fs::File>,
        metadata: &DeliveryMetadata,
        file_options: SimpleFileOptions,
    ) -> Result<(), ArchiveError> {
        let customer_code = self
            .customers
            .customer_code(metadata)
            .ok_or_else(|| io::Error::other("unable to determine customer code"))?;
        let Some(path) = self.customers.boilerplate_path(&customer_code) else {
            info!(
                "customer {} has no boilerplate entry, skipping",
                customer_code
            );
            return Ok(());
        };
        let text = std::fs::read(&path)?;
        zip.start_file(BOILERPLATE_FILE_NAME, file_options)?;
        zip.write_all(&text)?;
        Ok(())
    }
}

/// Deterministic work name for the staged archive, derived from the
/// delivery identifiers. The caller renames the archive on upload.
fn work_name(metadata: &DeliveryMetadata) -> String {
    let identifier = format!(
        "{}:{}:{}",
        metadata.group_id, metadata.artifact_id, metadata.version
    );
    let digest = Sha256::digest(identifier.as_bytes());
    let hex = format!("{digest:x}");
    format!("{}.zip", &hex[..10])
}
