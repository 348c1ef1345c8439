// Main entry point - Dependency injection and view wiring
use std::sync::Arc;
use std::time::Duration;

use mains_monitor::infrastructure::config::load_monitor_config;
use mains_monitor::infrastructure::http_api::HttpMonitorApi;
use mains_monitor::presentation::dashboard::DashboardController;
use mains_monitor::presentation::event_view::EventViewController;
use mains_monitor::presentation::surfaces::{TraceChartSurface, TraceReadoutSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_monitor_config()?;

    // Create the API adapter (infrastructure layer)
    let api = Arc::new(HttpMonitorApi::new(&config.api.base_url));

    let interval = Duration::from_millis(config.poll.interval_ms);
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    // `mains-monitor <event-id>` opens that session's detail view instead
    // of the live dashboard.
    match std::env::args().nth(1).map(|arg| arg.parse::<i64>()) {
        Some(Ok(event_id)) => {
            let mut view = EventViewController::new(api, Arc::new(TraceChartSurface), event_id);
            let header = view.refresh().await?;
            println!(
                "{} - started {}, {} points ({})",
                header.name, header.started, header.points, header.duration
            );
            println!("CSV export: {}", header.export_url);
            view.run(interval, shutdown).await;
        }
        Some(Err(_)) => anyhow::bail!("usage: mains-monitor [event-id]"),
        None => {
            let mut dashboard = DashboardController::new(
                api,
                Arc::new(TraceChartSurface),
                Arc::new(TraceReadoutSink),
                config.poll.backfill_points,
            );
            let rows = dashboard.init().await;
            for row in &rows {
                tracing::info!(
                    id = row.id,
                    name = %row.name,
                    status = row.status,
                    duration = %row.duration,
                    "event"
                );
            }
            println!("Monitoring sensor node at {}", config.api.base_url);
            dashboard.run(interval, shutdown).await;
        }
    }

    Ok(())
}
