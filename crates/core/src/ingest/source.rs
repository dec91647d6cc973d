use crate::domain::availability::{Metadata, PackageRecord};
use crate::error::AbsentReason;
use anyhow::Result;

pub const PACKAGES_FILE: &str = "packages.json";
pub const METADATA_FILE: &str = "additional.json";

/// Outcome of a single package-record lookup.
#[derive(Debug)]
pub enum RecordLookup {
    Found(PackageRecord),
    Absent {
        reason: AbsentReason,
        detail: String,
    },
}

/// Where the published availability tree lives.
///
/// The layout is `packages.json`, `additional.json` and
/// `<target>/<package>.json`.
#[async_trait::async_trait]
pub trait AvailabilitySource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch_packages(&self) -> Result<Vec<String>>;

    async fn fetch_metadata(&self) -> Result<Metadata>;

    /// Never fails: a missing or unparsable record is reported as
    /// [`RecordLookup::Absent`].
    async fn fetch_package_record(&self, target: &str, package: &str) -> RecordLookup;
}

pub fn record_path(target: &str, package: &str) -> String {
    format!("{target}/{package}.json")
}

pub(crate) fn decode_record(bytes: &[u8]) -> RecordLookup {
    match serde_json::from_slice::<PackageRecord>(bytes) {
        Ok(record) => RecordLookup::Found(record),
        Err(err) => RecordLookup::Absent {
            reason: AbsentReason::Malformed,
            detail: err.to_string(),
        },
    }
}
