//! Scoring server
//!
//! HTTP surface around the scoring service. The hosting runtime concerns
//! (transport, response serialization, failure responses) live here; the
//! scoring semantics live in [`crate::scoring`].

mod api;
mod error;
mod handlers;
mod state;

pub use api::create_router;
pub use error::ApiError;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::registry::ModelRegistry;
use crate::scoring::Scorer;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub registry_dir: String,
    pub model_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("SCOREPOINT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("SCOREPOINT_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            registry_dir: std::env::var("SCOREPOINT_REGISTRY")
                .unwrap_or_else(|_| "./models".to_string()),
            model_name: std::env::var("SCOREPOINT_MODEL")
                .unwrap_or_else(|_| "default".to_string()),
        }
    }
}

/// Load the configured model and serve until interrupted.
///
/// Model loading happens before the listener binds; a missing or broken
/// model aborts startup, so no request ever reaches an unloaded scorer.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    info!(
        registry = %config.registry_dir,
        model = %config.model_name,
        started_at = %start_time.to_rfc3339(),
        "Initializing scoring service"
    );

    let registry = ModelRegistry::open(&config.registry_dir)?;
    let scorer = Scorer::from_registry(&registry, &config.model_name)?;

    let state = Arc::new(AppState::new(config.clone(), scorer));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        host = %config.host,
        port = config.port,
        model = %config.model_name,
        "Scorepoint server starting"
    );
    info!(url = %format!("http://{}/api/score", addr), "Scoring endpoint available");
    info!(url = %format!("http://{}/api/health", addr), "Health endpoint available");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "Server listening and ready to accept connections");

    // Graceful shutdown on ctrl+c
    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        let stop_time = chrono::Utc::now();
        let uptime = stop_time.signed_duration_since(start_time);
        info!(
            stopped_at = %stop_time.to_rfc3339(),
            uptime_secs = uptime.num_seconds(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model_name, "default");
    }
}
