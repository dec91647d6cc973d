use anyhow::Context;
use clap::Parser;
use pkgavail_core::config::Settings;
use pkgavail_core::ingest::{AvailabilitySource, FsSource, HttpSource};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "pkgavail_report")]
struct Args {
    /// Target triple to report on. Defaults to AVAILABILITY_TARGET, then x86_64-unknown-linux-gnu.
    #[arg(long)]
    target: Option<String>,

    /// Base URL of a published availability tree (overrides AVAILABILITY_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Local directory holding an availability tree (overrides AVAILABILITY_DATA_DIR).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write the report context here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON context.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&settings, args).await {
        sentry_anyhow::capture_anyhow(&err);
        let detail = format!("{err:#}");
        tracing::error!(error = %detail, "availability report failed");
        return Err(err);
    }
    Ok(())
}

async fn run(settings: &Settings, args: Args) -> anyhow::Result<()> {
    let target = args
        .target
        .clone()
        .unwrap_or_else(|| settings.target().to_string());
    let source = select_source(settings, &args)?;

    let context = pkgavail_core::report::build_context(source.as_ref(), &target)
        .await
        .with_context(|| format!("failed to build availability report for {target}"))?;

    let body = if args.pretty {
        serde_json::to_vec_pretty(&context)?
    } else {
        serde_json::to_vec(&context)?
    };

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("can't create {}", parent.display()))?;
            }
            std::fs::write(path, &body)
                .with_context(|| format!("can't write {}", path.display()))?;
            tracing::info!(%target, path = %path.display(), "report context written");
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(&body)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn select_source(settings: &Settings, args: &Args) -> anyhow::Result<Box<dyn AvailabilitySource>> {
    if let Some(url) = args.base_url.as_deref() {
        return Ok(Box::new(HttpSource::new(url)?));
    }
    if let Some(dir) = args.data_dir.as_deref() {
        return Ok(Box::new(FsSource::new(dir)));
    }
    if settings.base_url.is_some() {
        return Ok(Box::new(HttpSource::from_settings(settings)?));
    }
    if settings.data_dir.is_some() {
        return Ok(Box::new(FsSource::from_settings(settings)?));
    }
    anyhow::bail!("no availability source: pass --base-url/--data-dir or set AVAILABILITY_BASE_URL/AVAILABILITY_DATA_DIR")
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: Option<&str>, data_dir: Option<&str>) -> Settings {
        Settings {
            base_url: base_url.map(str::to_string),
            data_dir: data_dir.map(str::to_string),
            target: None,
            sentry_dsn: None,
        }
    }

    #[test]
    fn cli_flags_win_over_environment() {
        let args = Args::parse_from(["pkgavail_report", "--data-dir", "/tmp/tree"]);
        let source = select_source(&settings(Some("https://example.org"), None), &args).unwrap();
        assert_eq!(source.source_name(), "fs");
    }

    #[test]
    fn base_url_wins_when_both_are_configured() {
        let args = Args::parse_from(["pkgavail_report"]);
        let source =
            select_source(&settings(Some("https://example.org"), Some("/tmp/tree")), &args).unwrap();
        assert_eq!(source.source_name(), "http");
    }

    #[test]
    fn missing_source_is_an_error() {
        let args = Args::parse_from(["pkgavail_report", "--target", "wasm32-wasi"]);
        assert!(select_source(&settings(None, None), &args).is_err());
        assert_eq!(args.target.as_deref(), Some("wasm32-wasi"));
    }
}
