use anyhow::Result;
use bounty_aggregator::application::app;
use bounty_aggregator::application::app::Application;
use bounty_aggregator::service;
use clap::{arg, command, Parser};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::broadcast;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Mobile money bounty aggregation service with REST API"
)]
struct BountyProgram {
    /// Path to the bounty snapshot document
    #[arg(short, long)]
    snapshot: String,

    /// Seconds between snapshot sync rounds
    #[arg(short = 'i', long, default_value_t = 60)]
    sync_interval: u64,

    /// Number of retries per snapshot read
    #[arg(short, long, default_value_t = 3)]
    num_retries: usize,

    /// Listen port REST API
    #[arg(short, long, default_value_t = 3000)]
    listen_port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = BountyProgram::parse();

    // Create a shutdown channel
    let (shutdown_sender, _) = broadcast::channel(1);

    // Start the snapshot sync
    let app = Arc::new(app::App::new());
    let shutdown_sender_sync = shutdown_sender.clone();
    let app_clone = app.clone();
    let sync_handle = tokio::spawn(async move {
        if let Err(e) = app_clone
            .run_sync(
                &args.snapshot,
                Duration::from_secs(args.sync_interval),
                args.num_retries,
                shutdown_sender_sync,
            )
            .await
        {
            tracing::error!("Snapshot sync error: {:?}", e);
        }
    });

    // Start the API server
    let server_handle = tokio::spawn(service::api::start_server(
        shutdown_sender.clone(),
        app.clone(),
        args.listen_port,
    ));

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            shutdown_sender.send(()).ok();
            tracing::warn!("Received Ctrl+C, shutting down...");
        }
    }

    shutdown_sender.send(()).ok();

    // Wait for tasks to complete
    let _ = tokio::join!(sync_handle, server_handle);

    tracing::info!("Shutdown complete");
    Ok(())
}
