//! CustomerDirectory port - customer metadata lookups
//!
//! Maps delivery metadata to the customer code used in the delivery
//! identifier, and customer codes to the boilerplate text shipped with
//! their deliveries. Both lookups are optional: a missing entry degrades
//! the archive (no identifier / no boilerplate) without failing the build.

use crate::models::DeliveryMetadata;
use std::path::PathBuf;

/// Abstract interface to the customer directory
pub trait CustomerDirectory {
    /// Customer code derived from the delivery metadata, if determinable
    fn customer_code(&self, metadata: &DeliveryMetadata) -> Option<String>;

    /// Local path of the boilerplate text for `customer_code`, if any
    fn boilerplate_path(&self, customer_code: &str) -> Option<PathBuf>;
}
