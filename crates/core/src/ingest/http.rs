use crate::config::Settings;
use crate::domain::availability::Metadata;
use crate::error::AbsentReason;
use crate::ingest::source::{
    decode_record, record_path, AvailabilitySource, RecordLookup, METADATA_FILE, PACKAGES_FILE,
};
use anyhow::{Context, Result};
use reqwest::StatusCode;

/// Reads the availability tree from a static web host.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        // No timeout: a stalled host stalls the report.
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build availability http client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.require_base_url()?)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url(path);
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {status} from {url}");
        }

        let bytes = res
            .bytes()
            .await
            .with_context(|| format!("failed to read body from {url}"))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl AvailabilitySource for HttpSource {
    fn source_name(&self) -> &'static str {
        "http"
    }

    async fn fetch_packages(&self) -> Result<Vec<String>> {
        let bytes = self.get_bytes(PACKAGES_FILE).await?;
        serde_json::from_slice(&bytes).context("packages.json is not a list of package names")
    }

    async fn fetch_metadata(&self) -> Result<Metadata> {
        let bytes = self.get_bytes(METADATA_FILE).await?;
        serde_json::from_slice(&bytes).context("additional.json is not a JSON object")
    }

    async fn fetch_package_record(&self, target: &str, package: &str) -> RecordLookup {
        let url = self.url(&record_path(target, package));

        let res = match self.http.get(&url).send().await {
            Ok(res) => res,
            Err(err) => {
                return RecordLookup::Absent {
                    reason: AbsentReason::Unreachable,
                    detail: format!("request to {url} failed: {err}"),
                }
            }
        };

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return RecordLookup::Absent {
                reason: AbsentReason::NotFound,
                detail: url,
            };
        }
        if !status.is_success() {
            return RecordLookup::Absent {
                reason: AbsentReason::Unreachable,
                detail: format!("HTTP {status} from {url}"),
            };
        }

        match res.bytes().await {
            Ok(bytes) => decode_record(&bytes),
            Err(err) => RecordLookup::Absent {
                reason: AbsentReason::Unreachable,
                detail: format!("failed to read body from {url}: {err}"),
            },
        }
    }
}
