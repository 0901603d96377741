//! Mindful API server binary.
//!
//! Reads the completion endpoint settings from flags or the environment
//! (a `.env` file is honoured), then serves the chat API until Ctrl-C or
//! SIGTERM.

use std::time::Duration;

use clap::Parser;
use mindful_api::config::ApiConfig;
use mindful_core::chat::ChatConfig;
use mindful_core::chat::config::DEFAULT_TIMEOUT_SECS;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "mindful_api_server", about = "Mindful chat API server", version)]
struct Args {
    /// Host interface to bind.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on (0 = ephemeral).
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// API key sent to the completion endpoint as the `api-key` header.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: String,

    /// Full URL of the chat-completion endpoint.
    #[arg(long, env = "ENDPOINT")]
    endpoint: String,

    /// Timeout for each completion call, in seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl Args {
    fn into_config(self) -> Result<ApiConfig, mindful_core::chat::ConfigError> {
        let chat = ChatConfig::new(
            self.api_key,
            &self.endpoint,
            Duration::from_secs(self.timeout_secs),
        )?;
        Ok(ApiConfig::new(format!("{}:{}", self.host, self.port), chat))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mindful_api=debug,mindful_core=debug".into()),
        )
        .init();

    let config = Args::parse().into_config()?;

    info!(
        endpoint = %config.chat.endpoint,
        timeout_secs = config.chat.timeout.as_secs(),
        "starting mindful_api_server"
    );

    let state = mindful_api::AppState::from_config(&config)?;
    let app = mindful_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Cancel `token` on Ctrl-C, or SIGTERM on unix.
async fn watch_signals(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
    token.cancel();
}
