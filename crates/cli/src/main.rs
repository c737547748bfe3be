use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

use optviewer_core::{compute_display_rows, ConfigLoader, MarketDataSource, TdSettings};
use optviewer_monitor::{RefreshScheduler, Session};
use optviewer_td::{TdClient, TdClientConfig};

mod sink;

use sink::StdoutSink;

#[derive(Parser)]
#[command(name = "optviewer")]
#[command(about = "Live option position viewer for a TD Ameritrade account", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the live refresh loop until interrupted
    Run {
        /// Config file path
        #[arg(short, long, default_value = "config/Optviewer.toml")]
        config: String,
    },
    /// Fetch, compute, and print the position table once
    Snapshot {
        /// Config file path
        #[arg(short, long, default_value = "config/Optviewer.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => run(&config).await,
        Commands::Snapshot { config } => snapshot(&config).await,
    }
}

fn build_client(td: &TdSettings) -> Result<TdClient> {
    let config = TdClientConfig::new(td.access_token.clone())
        .with_base_url(td.base_url.clone())
        .with_timeout_secs(td.timeout_secs);
    Ok(TdClient::new(config)?)
}

async fn run(config_path: &str) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let client = Arc::new(build_client(&config.td)?);

    let session = Session::bootstrap(client.as_ref()).await?;
    if session.is_empty() {
        println!("No open option positions.");
        return Ok(());
    }

    let sink = Arc::new(StdoutSink::new());
    let scheduler = RefreshScheduler::new(session, client, sink, config.viewer);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received; shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    scheduler.run(shutdown_rx).await?;
    Ok(())
}

async fn snapshot(config_path: &str) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let client = build_client(&config.td)?;

    let session = Session::bootstrap(&client).await?;
    if session.is_empty() {
        println!("No open option positions.");
        return Ok(());
    }

    let quotes = client.fetch_quotes(session.tickers()).await?;
    let rows = compute_display_rows(session.records(), &quotes)?;
    print!("{}", sink::render_table(&rows));
    Ok(())
}
