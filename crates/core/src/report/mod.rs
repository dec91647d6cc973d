pub mod aggregate;

use crate::domain::availability::{AvailabilityReport, Metadata, ReportContext};
use crate::error::ReportError;
use crate::ingest::source::AvailabilitySource;
use crate::time::{build_date_window, parse_anchor};

pub use aggregate::{aggregate, fetch_package};

/// Assembles the availability report for `target`.
///
/// The package list and metadata are fetched concurrently; failure of either
/// aborts the report. Individual package records are fetched in list order.
pub async fn build_report(
    source: &dyn AvailabilitySource,
    target: &str,
) -> Result<(AvailabilityReport, Metadata), ReportError> {
    let (packages, metadata) = tokio::try_join!(
        async {
            source
                .fetch_packages()
                .await
                .map_err(|e| ReportError::top_level("package list", e))
        },
        async {
            source
                .fetch_metadata()
                .await
                .map_err(|e| ReportError::top_level("metadata", e))
        },
    )?;

    let raw_anchor = metadata
        .anchor()
        .ok_or_else(|| ReportError::InvalidTimestamp {
            value: metadata
                .0
                .get(Metadata::ANCHOR_FIELD)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        })?;
    let window = build_date_window(parse_anchor(raw_anchor)?)?;

    tracing::info!(
        %target,
        source = source.source_name(),
        anchor = %window.anchor(),
        packages = packages.len(),
        "building availability report"
    );

    let entries = aggregate(source, target, &packages, &window).await;

    tracing::info!(
        %target,
        entries = entries.len(),
        omitted = packages.len() - entries.len(),
        "availability report built"
    );

    let report = AvailabilityReport {
        target: target.to_string(),
        dates: window.date_strings(),
        entries,
    };
    Ok((report, metadata))
}

/// [`build_report`] shaped for a renderer.
pub async fn build_context(
    source: &dyn AvailabilitySource,
    target: &str,
) -> Result<ReportContext, ReportError> {
    let (report, metadata) = build_report(source, target).await?;
    Ok(report.into_context(metadata))
}
