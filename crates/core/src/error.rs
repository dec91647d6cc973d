use std::fmt;

/// Failures that abort report construction.
///
/// A single package's missing or malformed record is not one of these; the
/// aggregator drops the package and logs an [`AbsentReason`].
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid anchor timestamp: {value:?}")]
    InvalidTimestamp { value: String },

    #[error("failed to fetch {resource}")]
    TopLevelFetch {
        resource: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ReportError {
    pub fn top_level(resource: &'static str, source: anyhow::Error) -> Self {
        Self::TopLevelFetch { resource, source }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentReason {
    NotFound,
    Malformed,
    /// Transport failure or non-404 error status. Absorbed like a missing
    /// record; only top-level resources abort the report.
    Unreachable,
}

impl fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbsentReason::NotFound => "not_found",
            AbsentReason::Malformed => "malformed",
            AbsentReason::Unreachable => "unreachable",
        };
        f.write_str(s)
    }
}
