//! NEO Sentinel - Near-Earth Object close-approach monitor and PHA classifier
//!
//! # Usage
//!
//! ```bash
//! # Serve the dashboard and API (default)
//! neo-sentinel serve --addr 127.0.0.1:8501
//!
//! # Print upcoming close approaches
//! neo-sentinel approaches
//!
//! # Classify one object
//! neo-sentinel predict --h 21.5 --e 0.42 --a 1.6 --q 0.93 --i 7.2 --moid 0.012
//! ```
//!
//! # Environment Variables
//!
//! - `NEO_SENTINEL_CONFIG`: Path to a TOML config file
//! - `NEO_SERVER_ADDR`: Override the server bind address
//! - `NEO_MODEL_PATH`: Override the classifier artifact path
//! - `NEO_CORS_ORIGINS`: Comma-separated allowed CORS origins
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use neo_sentinel::api::{create_app, DashboardState};
use neo_sentinel::config::{self, AppConfig};
use neo_sentinel::feed::FeedClient;
use neo_sentinel::inference::run_inference;
use neo_sentinel::model::{ModelStore, ModelSummary, RandomForest};
use neo_sentinel::pipeline::{ApproachFeed, FeedView};
use neo_sentinel::types::{ApproachTable, OrbitalFeatureVector};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "neo-sentinel")]
#[command(about = "Near-Earth object close-approach monitor and PHA risk classifier")]
#[command(version)]
struct CliArgs {
    /// Config file (default: $NEO_SENTINEL_CONFIG, then ./neo_sentinel.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the classifier artifact path
    #[arg(long, global = true, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:8501")
    #[arg(long, global = true, value_name = "HOST:PORT")]
    addr: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the dashboard and REST API (default)
    Serve,

    /// Fetch close approaches for the configured window and print them
    Approaches,

    /// Classify one object from its orbital elements
    Predict {
        /// Absolute magnitude H
        #[arg(long, default_value_t = 22.0, allow_negative_numbers = true)]
        h: f64,
        /// Eccentricity
        #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
        e: f64,
        /// Semi-major axis (AU)
        #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
        a: f64,
        /// Perihelion distance (AU)
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        q: f64,
        /// Inclination (degrees)
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        i: f64,
        /// Earth MOID (AU)
        #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
        moid: f64,
    },

    /// Print the effective configuration as TOML
    Config,
}

// ============================================================================
// Startup
// ============================================================================

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Logs go to stderr so subcommand output on stdout stays clean
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve configuration: file search (or `--config`), env overrides, then CLI flags.
/// Ranges are validated once, on the final values.
fn resolve_config(args: &CliArgs) -> Result<AppConfig> {
    let mut cfg = match &args.config {
        Some(path) => AppConfig::read_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load(),
    }
    .with_env_overrides();

    if let Some(addr) = &args.addr {
        cfg.server.addr = addr.clone();
    }
    if let Some(model) = &args.model {
        cfg.model.path = model.clone();
    }

    cfg.validate().context("Invalid configuration")?;
    Ok(cfg)
}

fn load_classifier(cfg: &AppConfig) -> Result<Arc<RandomForest>> {
    let mut store = ModelStore::new();
    store.get_or_load(&cfg.model.path).map_err(|e| {
        error!(code = e.code(), error = %e, "Cannot start without the PHA classifier");
        anyhow::Error::new(e).context("Failed to load PHA classifier")
    })
}

fn build_feed(cfg: &AppConfig) -> Result<ApproachFeed> {
    let client = FeedClient::from_config(&cfg.feed).context("Failed to build CNEOS client")?;
    Ok(ApproachFeed::from_config(Arc::new(client), &cfg.feed))
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_json);

    let cfg = resolve_config(&args)?;
    config::init(cfg.clone());

    match args.command.unwrap_or(SubCommand::Serve) {
        SubCommand::Serve => run_server(&cfg).await,
        SubCommand::Approaches => print_approaches(&cfg).await,
        SubCommand::Predict { h, e, a, q, i, moid } => {
            print_prediction(&cfg, OrbitalFeatureVector { h, e, a, q, i, moid })
        }
        SubCommand::Config => {
            print!("{}", cfg.to_toml()?);
            Ok(())
        }
    }
}

async fn run_server(cfg: &AppConfig) -> Result<()> {
    // Fatal before binding: no fallback predictor
    let forest = load_classifier(cfg)?;
    let summary = ModelSummary::new(&cfg.model.path, &forest);
    let feed = Arc::new(build_feed(cfg)?);

    let state = DashboardState::new(feed, forest, summary);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&cfg.server.addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.server.addr))?;
    info!(addr = %cfg.server.addr, "NEO Sentinel listening");

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await
        .context("HTTP server error")?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn print_approaches(cfg: &AppConfig) -> Result<()> {
    let feed = build_feed(cfg)?;
    match feed.view().await {
        FeedView::Approaches { table, .. } => {
            print_table(&table);
            Ok(())
        }
        FeedView::NoApproaches { message } => {
            println!("{message}");
            Ok(())
        }
        FeedView::Unavailable { code, message } => {
            bail!("Close-approach feed unavailable ({code}): {message}")
        }
    }
}

fn print_table(table: &ApproachTable) {
    // The trailing datetime column is for charting only
    let c = table.columns();
    println!(
        "{:<14} {:<19} {:>14} {:>11} {:>9}",
        c[0], c[1], c[2], c[3], c[4]
    );
    for r in table.records() {
        println!(
            "{:<14} {:<19} {:>14.0} {:>11.1} {:>9.1}",
            r.designation, r.approach_date, r.distance_km, r.lunar_distance, r.size_m
        );
    }
}

fn print_prediction(cfg: &AppConfig, features: OrbitalFeatureVector) -> Result<()> {
    if let Err(errors) = features.check_bounds() {
        bail!("Input out of range: {}", errors.join("; "));
    }

    let forest = load_classifier(cfg)?;
    let result = run_inference(forest.as_ref(), &features);

    println!("Prediction: {}", result.label.verdict());
    println!("Confidence (probability of danger): {}", result.confidence_display());
    Ok(())
}
