use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tokio::signal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use opclog_rs::agent::Agent;
use opclog_rs::client::TagId;
use opclog_rs::config::{self, AgentConfig};
use opclog_rs::shutdown;
use opclog_rs::sim::SimConnector;

/// Unattended data-acquisition agent: connects to a server, samples a fixed
/// tag list on a cadence and appends each cycle as a row to hourly CSV logs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server endpoint URI. This build ships the `sim://` backend; real
    /// transports plug in through the `Connector` trait.
    #[arg(short, long, default_value = "sim://localhost/simulation")]
    endpoint: String,
    /// Sampling interval in seconds.
    #[arg(short, long, default_value_t = config::DEFAULT_INTERVAL.as_secs())]
    interval_secs: u64,
    /// Tag identifier to sample; repeat the flag to add columns, in order.
    /// Duplicates are sampled independently. Defaults to the stock list.
    #[arg(short, long = "tag")]
    tags: Vec<TagId>,
    /// Directory for the hourly CSV files.
    #[arg(short, long, default_value = "logs")]
    log_dir: PathBuf,
    /// Optional path to a file to write status logs to, in addition to the
    /// console.
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn setup_logging(
    log_file_path: Option<PathBuf>,
    verbosity: &Verbosity<InfoLevel>,
) -> Result<Option<WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false);

    let (file_layer, guard) = if let Some(ref path) = log_file_path {
        let log_file = File::create(path)
            .with_context(|| format!("Failed to create log file at: {:?}", path))?;
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(log_file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file.clone(), &cli.verbose)?;

    let tags = if cli.tags.is_empty() {
        config::default_tags()
    } else {
        cli.tags.clone()
    };
    let config = AgentConfig {
        endpoint: cli.endpoint.clone(),
        interval: Duration::from_secs(cli.interval_secs),
        tags,
        log_dir: cli.log_dir.clone(),
    };

    if !config.endpoint.starts_with("sim://") {
        bail!(
            "unsupported endpoint scheme in {}: only sim:// is built in",
            config.endpoint
        );
    }
    let connector = SimConnector::new(config.endpoint.clone());

    let (stop_tx, stop_rx) = shutdown::channel();
    tokio::spawn(async move {
        let _ = signal::ctrl_c().await;
        info!("ctrl-c received, stopping after the current operation");
        let _ = stop_tx.send(true);
    });

    info!(
        endpoint = config.endpoint,
        interval_secs = config.interval.as_secs(),
        tags = config.tags.len(),
        log_dir = %config.log_dir.display(),
        "starting sampling agent"
    );

    let agent = Agent::new(config, connector, stop_rx).context("Failed to set up the log sink")?;
    agent.run().await;
    Ok(())
}
