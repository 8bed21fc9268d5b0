//! Delivery manifest document
//!
//! A structured description of the archive contents written alongside the
//! resources: the delivery identifier plus the archive path and
//! classification of every placed file. Consumers on the receiving side
//! parse this file, so the field names are part of the delivery contract.

use serde::Serialize;

use crate::domain::value_objects::ClassificationTag;
use crate::models::DeliveryMetadata;

/// One placed file inside the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Path inside the delivery archive
    pub path: String,
    /// Classification tag code of the resource
    pub citype: String,
}

/// The manifest document shipped as `delivery_info.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryManifest {
    /// `customerCode:artifactId:version`
    #[serde(rename = "deliveryId")]
    pub delivery_id: String,
    /// Every file placed into the archive, in placement order
    #[serde(rename = "deliveryFiles")]
    pub delivery_files: Vec<ManifestEntry>,
}

impl DeliveryManifest {
    /// Assemble the manifest from the placed resources.
    pub fn assemble(
        metadata: &DeliveryMetadata,
        customer_code: &str,
        placed: &[(String, ClassificationTag)],
    ) -> Self {
        let delivery_id = format!(
            "{}:{}:{}",
            customer_code, metadata.artifact_id, metadata.version
        );
        let delivery_files = placed
            .iter()
            .map(|(path, classification)| ManifestEntry {
                path: path.clone(),
                citype: classification.code().to_string(),
            })
            .collect();
        Self {
            delivery_id,
            delivery_files,
        }
    }

    /// Pretty-printed JSON rendering
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
