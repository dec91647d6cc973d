use crate::domain::availability::Metadata;
use crate::error::AbsentReason;
use crate::ingest::source::{decode_record, record_path, AvailabilitySource, RecordLookup};
use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory availability tree that remembers lookup order.
pub(crate) struct MemorySource {
    packages: Option<Vec<String>>,
    metadata: Option<Value>,
    files: HashMap<String, Vec<u8>>,
    requested: Mutex<Vec<String>>,
}

impl MemorySource {
    pub(crate) fn new(metadata: Value) -> Self {
        Self {
            packages: Some(Vec::new()),
            metadata: Some(metadata),
            files: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_packages(mut self, packages: &[&str]) -> Self {
        self.packages = Some(packages.iter().map(|s| s.to_string()).collect());
        self
    }

    pub(crate) fn without_packages(mut self) -> Self {
        self.packages = None;
        self
    }

    pub(crate) fn without_metadata(mut self) -> Self {
        self.metadata = None;
        self
    }

    pub(crate) fn with_record(self, target: &str, package: &str, record: Value) -> Self {
        let body = record.to_string();
        self.with_raw(target, package, &body)
    }

    pub(crate) fn with_raw(mut self, target: &str, package: &str, body: &str) -> Self {
        self.files
            .insert(record_path(target, package), body.as_bytes().to_vec());
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AvailabilitySource for MemorySource {
    fn source_name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_packages(&self) -> Result<Vec<String>> {
        self.packages
            .clone()
            .ok_or_else(|| anyhow::anyhow!("packages.json not found"))
    }

    async fn fetch_metadata(&self) -> Result<Metadata> {
        let v = self
            .metadata
            .clone()
            .ok_or_else(|| anyhow::anyhow!("additional.json not found"))?;
        Ok(serde_json::from_value(v)?)
    }

    async fn fetch_package_record(&self, target: &str, package: &str) -> RecordLookup {
        self.requested.lock().unwrap().push(package.to_string());
        let path = record_path(target, package);
        match self.files.get(&path) {
            Some(bytes) => decode_record(bytes),
            None => RecordLookup::Absent {
                reason: AbsentReason::NotFound,
                detail: path,
            },
        }
    }
}
