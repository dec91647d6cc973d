use crate::domain::availability::{PackageAvailabilityEntry, PackageRecord};
use crate::error::AbsentReason;
use crate::ingest::source::{AvailabilitySource, RecordLookup};
use crate::time::DateWindow;
use std::collections::HashSet;

/// Fetches one package's record, folding every failure into `None`.
pub async fn fetch_package(
    source: &dyn AvailabilitySource,
    target: &str,
    package: &str,
) -> Option<PackageRecord> {
    match source.fetch_package_record(target, package).await {
        RecordLookup::Found(record) => Some(record),
        RecordLookup::Absent { reason, detail } => {
            if reason == AbsentReason::NotFound {
                tracing::debug!(%target, package, "no package data; skipping package");
            } else {
                tracing::warn!(
                    %target,
                    package,
                    %reason,
                    detail = %detail,
                    "package data unusable; skipping package"
                );
            }
            None
        }
    }
}

/// Lines a record up against the window. Always one cell per window date.
pub fn entry_for(
    package: &str,
    record: &PackageRecord,
    window_dates: &[String],
) -> PackageAvailabilityEntry {
    PackageAvailabilityEntry {
        package_name: package.to_string(),
        availability_list: window_dates.iter().map(|d| record.status_on(d)).collect(),
        last_available: record.last_available.clone(),
    }
}

/// Builds report rows in package-list order.
///
/// Packages are fetched one at a time; each lookup resolves before the next
/// starts, so row order is the input order with absent packages closed up.
/// A name repeated in the list is looked up once, at its first position.
pub async fn aggregate(
    source: &dyn AvailabilitySource,
    target: &str,
    packages: &[String],
    window: &DateWindow,
) -> Vec<PackageAvailabilityEntry> {
    let window_dates = window.date_strings();
    let mut entries = Vec::with_capacity(packages.len());
    let mut seen = HashSet::with_capacity(packages.len());

    for package in packages {
        if !seen.insert(package.as_str()) {
            tracing::debug!(%target, package = %package, "duplicate package name; skipping");
            continue;
        }
        let Some(record) = fetch_package(source, target, package).await else {
            continue;
        };
        entries.push(entry_for(package, &record, &window_dates));
    }

    entries
}
