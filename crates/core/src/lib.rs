pub mod domain;
pub mod error;
pub mod ingest;
pub mod report;
pub mod time;

pub use error::ReportError;

pub mod config {
    use crate::domain::availability::DEFAULT_TARGET;
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub base_url: Option<String>,
        pub data_dir: Option<String>,
        pub target: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                base_url: non_empty_var("AVAILABILITY_BASE_URL"),
                data_dir: non_empty_var("AVAILABILITY_DATA_DIR"),
                target: non_empty_var("AVAILABILITY_TARGET"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn require_base_url(&self) -> anyhow::Result<&str> {
            self.base_url
                .as_deref()
                .context("AVAILABILITY_BASE_URL is required")
        }

        pub fn require_data_dir(&self) -> anyhow::Result<&str> {
            self.data_dir
                .as_deref()
                .context("AVAILABILITY_DATA_DIR is required")
        }

        pub fn target(&self) -> &str {
            self.target.as_deref().unwrap_or(DEFAULT_TARGET)
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn target_falls_back_to_default() {
            let settings = Settings {
                base_url: None,
                data_dir: None,
                target: None,
                sentry_dsn: None,
            };
            assert_eq!(settings.target(), "x86_64-unknown-linux-gnu");
            assert!(settings.require_base_url().is_err());
            assert!(settings.require_data_dir().is_err());
        }
    }
}
