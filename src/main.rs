//! Watches pool and aggregator quotes for a fixed set of pairs and logs them as a table.

use dex_rate_monitor::data_sync::{MonitorConfig, PairsConfigRoot, PriceMonitorBuilder, default_pairs};
use dex_rate_monitor::utils::ConfigLoader;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    info!("Starting dex-rate-monitor v{}", env!("CARGO_PKG_VERSION"));

    let config = MonitorConfig::from_env()?;
    let pairs = match &config.pairs_config {
        Some(file_name) => {
            info!("Loading pairs from {}", file_name);
            PairsConfigRoot::load_section_from_file(file_name.clone()).await?
        }
        None => default_pairs(),
    };
    let interval = config.polling_interval();

    let monitor = Arc::new(PriceMonitorBuilder::new().with_config(config).with_pairs(pairs).build()?);
    let mut monitor_task = monitor.start(interval);

    tokio::select! {
        result = &mut monitor_task => {
            match result {
                // the failing tick already wrote the error record
                Ok(Err(_)) => {}
                Ok(Ok(())) => warn!("Price monitor halted"),
                Err(e) => error!("Price monitor task failed: {}", e),
            }
            // stay up without reporting until restarted
            info!("No further price data will be reported; press Ctrl+C to exit");
            signal::ctrl_c().await?;
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
            monitor_task.abort();
        }
    }

    info!("dex-rate-monitor stopped");
    Ok(())
}
