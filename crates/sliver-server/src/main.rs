mod control;
mod http;
mod metrics;
mod state;
mod static_ui;

use anyhow::Context;
use clap::Parser;
use http::router;
use metrics::init_metrics;
use sliver_camera::SimulatedBackend;
use sliver_core::history::{DefectHistory, HISTORY_CAP};
use sliver_core::ticker::DEFECT_PROBABILITY;
use state::{AppState, RunConfig};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "sliver-station")]
#[command(about = "Visual-defect inspection station dashboard with simulated detection")]
struct Cli {
    /// HTTP server address
    #[arg(long, default_value = "127.0.0.1:8080")]
    http: String,
    /// Probability that a simulated inspection flags a defect
    #[arg(long, default_value_t = DEFECT_PROBABILITY)]
    defect_probability: f64,
    /// Thumbnail history capacity
    #[arg(long, default_value_t = HISTORY_CAP)]
    history_cap: usize,
    /// Recycle sample images into the history on simulated defects
    #[arg(long)]
    demo_thumbnails: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    info!(
        "Starting Sliver Station (defect probability {}, history cap {})",
        cli.defect_probability, cli.history_cap
    );

    init_metrics();
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus metrics recorder")?;

    let config = RunConfig {
        defect_probability: cli.defect_probability,
        demo_thumbnails: cli.demo_thumbnails,
    };
    let state = AppState::new(
        Arc::new(SimulatedBackend),
        config,
        DefectHistory::seeded_with_cap(cli.history_cap),
    )
    .with_metrics(metrics_handle);

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(&cli.http)
        .await
        .with_context(|| format!("Failed to bind {}", cli.http))?;
    info!("Dashboard listening on http://{}", cli.http);
    axum::serve(listener, app).await.context("HTTP server error")?;

    Ok(())
}
