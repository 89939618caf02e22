//! fuzzytip - Fuzzy Tip Advisor
//!
//! Command-line interface: compute a tip for a pair of scores, or serve
//! the web form.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fuzzytip::config::{LogLevel, TipConfig};
use fuzzytip::fuzzy::{compute_tip, fuzzy_inference};
use fuzzytip::search::{run_searches, GridState};
use fuzzytip::server::run_server;

#[derive(Parser)]
#[command(name = "fuzzytip")]
#[command(version = "0.1.0")]
#[command(about = "Mamdani fuzzy-inference tip advisor with grid-search demos", long_about = None)]
struct Cli {
    /// Food quality score in [0, 10]
    #[arg(value_name = "FOOD")]
    food: Option<f64>,

    /// Service quality score in [0, 10]
    #[arg(value_name = "SERVICE")]
    service: Option<f64>,

    /// Run the HTTP server instead of a one-shot computation
    #[arg(long)]
    serve: bool,

    /// Server port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit the one-shot result as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TipConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => TipConfig::load().context("Failed to load configuration")?,
    };

    // CLI flags win over config file and environment
    if cli.verbose {
        config.general.log_level = LogLevel::Verbose;
    }
    if cli.quiet {
        config.general.log_level = LogLevel::Quiet;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }

    init_tracing(config.general.log_level);

    if cli.serve {
        info!(
            host = %config.server.host,
            port = config.server.port,
            "starting fuzzytip server"
        );
        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        return runtime
            .block_on(run_server(config.server))
            .map_err(|e| anyhow::anyhow!("Server error: {}", e));
    }

    let (food, service) = match (cli.food, cli.service) {
        (Some(f), Some(s)) => (f, s),
        _ => bail!("Provide both FOOD and SERVICE scores, or pass --serve"),
    };

    for (name, value) in [("FOOD", food), ("SERVICE", service)] {
        if !value.is_finite() || !(0.0..=10.0).contains(&value) {
            bail!("{} must be a number in [0, 10], got {}", name, value);
        }
    }

    let strengths = fuzzy_inference(food, service);
    debug!(low = strengths.low, high = strengths.high, "rule strengths");

    let tip = compute_tip(food, service);
    let start = GridState::new(0, 0);
    let goal = GridState::new(food as i32, service as i32);
    let report = run_searches(start, goal);

    if cli.json {
        let json = serde_json::json!({
            "food": food,
            "service": service,
            "tip": tip,
            "searches": report,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        let fmt_state = |s: &Option<GridState>| match s {
            Some(state) => state.to_string(),
            None => "not found".to_string(),
        };

        println!("Suggested tip: {:.2}%", tip);
        println!("Searches from {} to {}:", start, goal);
        println!("  breadth-first:     {}", fmt_state(&report.bfs));
        println!("  depth-first:       {}", fmt_state(&report.dfs));
        println!("  greedy best-first: {}", fmt_state(&report.greedy));
    }

    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured log level maps
/// onto a filter directive.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
