//! `vitrine-api` binary entrypoint.
//!
//! Loads configuration, builds the initial catalog and starts the HTTP server.
//! With `--check`, lints the catalog and exits instead of serving.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use vitrine_api::config::Config;
use vitrine_api::server::Server;
use vitrine_catalog::{CatalogService, FsCatalogSource, check_catalog};
use vitrine_core::observability::{LogFormat, init_logging};

/// Product catalog HTTP service.
#[derive(Debug, Parser)]
#[command(name = "vitrine-api", version, about)]
struct Args {
    /// Path to the YAML config file.
    #[arg(long, env = "VITRINE_CONFIG", default_value = "config.yml")]
    config: PathBuf,

    /// Resource tree root (overrides `resources_dir` from config).
    #[arg(long)]
    resources: Option<PathBuf>,

    /// Build the catalog once, report problems and exit.
    #[arg(long)]
    check: bool,
}

fn choose_log_format(debug: bool) -> LogFormat {
    if debug {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Lints the resource tree without needing a full server config.
fn run_check(resources_dir: PathBuf) -> ExitCode {
    let source = FsCatalogSource::new(resources_dir);
    match check_catalog(&source) {
        Ok(report) => {
            println!(
                "catalog ok: {} categories, {} products, {} missing images",
                report.categories,
                report.products,
                report.missing_images.len()
            );
            for path in &report.missing_images {
                println!("  missing image: {}", path.display());
            }
            if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("catalog error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.check {
        init_logging(LogFormat::Pretty);
        let resources_dir = match args.resources {
            Some(dir) => dir,
            None => Config::load(&args.config)
                .context("load config")?
                .resources_dir,
        };
        return Ok(run_check(resources_dir));
    }

    let mut config = Config::load(&args.config)
        .with_context(|| format!("load config from {}", args.config.display()))?;
    if let Some(dir) = args.resources {
        config.resources_dir = dir;
    }

    init_logging(choose_log_format(config.debug));
    tracing::info!(config = ?config, "Configuration loaded");

    let source = Arc::new(FsCatalogSource::new(config.resources_dir.clone()));
    let catalog = CatalogService::bootstrap(source).context("build initial catalog")?;

    let server = Server::new(config, Arc::new(catalog));
    server.serve().await?;
    Ok(ExitCode::SUCCESS)
}
