use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;
use nutrition_report::http::{AppState, DEFAULT_REQUEST_TIMEOUT, router};
use nutrition_report::{LoggingSheetClient, ReportService};
use nutrition_sheet_client::config::Config;
use nutrition_sheet_client::http_client::ReqwestSheetClient;
use tokio::signal;
use tracing::info;

/// Request timeout from `REQUEST_TIMEOUT_SECS`; unset or unparseable values
/// fall back to the default.
fn request_timeout_from(value: Option<String>) -> Duration {
    value
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

fn address_from(value: Option<String>) -> SocketAddr {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)))
}

#[cfg(test)]
#[allow(clippy::items_after_test_module)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_and_overrides() {
        assert_eq!(request_timeout_from(None), DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(request_timeout_from(Some("abc".into())), DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(request_timeout_from(Some("0".into())), DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(request_timeout_from(Some("5".into())), Duration::from_secs(5));
    }

    #[test]
    fn address_defaults_to_localhost() {
        assert_eq!(address_from(None).to_string(), "127.0.0.1:3000");
        assert_eq!(
            address_from(Some("0.0.0.0:8080".into())).to_string(),
            "0.0.0.0:8080"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Configure logging from env var `NUTRITION_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("NUTRITION_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(log_env.clone())
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    info!(%log_env, "nutrition_report:http: log filter");

    let handle = PrometheusBuilder::new().install_recorder()?;

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration; aborting startup");
            std::process::exit(1);
        }
    };
    info!(
        sheet = %config.sheet_id,
        values_api = config.uses_values_api(),
        "sheet source configured"
    );

    let client = LoggingSheetClient::new(ReqwestSheetClient::new(config));
    let state = Arc::new(AppState {
        service: ReportService::new(Arc::new(client)),
        metrics: handle,
    });

    let timeout = request_timeout_from(std::env::var("REQUEST_TIMEOUT_SECS").ok());
    let app = router(state, timeout);

    let addr = address_from(std::env::var("ADDRESS").ok());
    info!(%addr, timeout_secs = timeout.as_secs(), "starting HTTP server");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("failed to install ctrl+c handler: {e}");
            }
        })
        .await?;

    Ok(())
}
