use crate::config::Settings;
use crate::domain::availability::Metadata;
use crate::error::AbsentReason;
use crate::ingest::source::{
    decode_record, record_path, AvailabilitySource, RecordLookup, METADATA_FILE, PACKAGES_FILE,
};
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads the availability tree from a local directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(settings.require_data_dir()?))
    }

    async fn read(&self, rel: &str) -> Result<Vec<u8>> {
        let path = self.root.join(rel);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))
    }
}

#[async_trait::async_trait]
impl AvailabilitySource for FsSource {
    fn source_name(&self) -> &'static str {
        "fs"
    }

    async fn fetch_packages(&self) -> Result<Vec<String>> {
        let bytes = self.read(PACKAGES_FILE).await?;
        serde_json::from_slice(&bytes).context("packages.json is not a list of package names")
    }

    async fn fetch_metadata(&self) -> Result<Metadata> {
        let bytes = self.read(METADATA_FILE).await?;
        serde_json::from_slice(&bytes).context("additional.json is not a JSON object")
    }

    async fn fetch_package_record(&self, target: &str, package: &str) -> RecordLookup {
        let path = self.root.join(record_path(target, package));
        match tokio::fs::read(&path).await {
            Ok(bytes) => decode_record(&bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => RecordLookup::Absent {
                reason: AbsentReason::NotFound,
                detail: path.display().to_string(),
            },
            Err(err) => RecordLookup::Absent {
                reason: AbsentReason::Unreachable,
                detail: format!("{}: {err}", path.display()),
            },
        }
    }
}
