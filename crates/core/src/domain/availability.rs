use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const DEFAULT_TARGET: &str = "x86_64-unknown-linux-gnu";

/// One package's per-day status file, e.g. `x86_64-unknown-linux-gnu/rls.json`.
///
/// Status values are kept as raw JSON and never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    #[serde(default)]
    pub last_available: Value,
    #[serde(flatten)]
    pub statuses: BTreeMap<String, Value>,
}

impl PackageRecord {
    pub fn status_on(&self, date: &str) -> DayStatus {
        match self.statuses.get(date) {
            Some(v) => DayStatus::Known(v.clone()),
            None => DayStatus::Unknown,
        }
    }
}

/// A single cell of an availability row.
#[derive(Debug, Clone, PartialEq)]
pub enum DayStatus {
    Known(Value),
    /// The record has no entry for this date. Serialized as `null`.
    Unknown,
}

impl Serialize for DayStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DayStatus::Known(v) => v.serialize(serializer),
            DayStatus::Unknown => serializer.serialize_unit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageAvailabilityEntry {
    pub package_name: String,
    pub availability_list: Vec<DayStatus>,
    pub last_available: Value,
}

/// Metadata document (`additional.json`). Only `datetime` is read; everything
/// else is forwarded to the renderer untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(pub Map<String, Value>);

impl Metadata {
    pub const ANCHOR_FIELD: &'static str = "datetime";

    pub fn anchor(&self) -> Option<&str> {
        self.0.get(Self::ANCHOR_FIELD).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityReport {
    pub target: String,
    pub dates: Vec<String>,
    pub entries: Vec<PackageAvailabilityEntry>,
}

impl AvailabilityReport {
    /// Shapes the report the way page templates expect it: the first title
    /// cell is an empty placeholder and metadata rides along as `additional`.
    pub fn into_context(self, additional: Metadata) -> ReportContext {
        let mut title = Vec::with_capacity(self.dates.len() + 1);
        title.push(String::new());
        title.extend(self.dates);

        ReportContext {
            current_target: self.target,
            title,
            packages_availability: self.entries,
            additional,
        }
    }
}

/// The object handed to an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportContext {
    pub current_target: String,
    pub title: Vec<String>,
    pub packages_availability: Vec<PackageAvailabilityEntry>,
    pub additional: Metadata,
}
