#![cfg_attr(test, allow(clippy::disallowed_methods))]
use std::net::SocketAddr;

use common::TokenCodec;
use common::config::ServiceConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transaction_service::{AppState, router};

/// Default listen port when `BANK_LISTEN_PORT` is not set.
const DEFAULT_PORT: u16 = 8003;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transaction_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServiceConfig::from_env(DEFAULT_PORT) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let codec = match TokenCodec::new(&config.jwt_secret) {
        Ok(codec) => codec,
        Err(e) => {
            tracing::error!("Failed to initialize token codec: {e}");
            std::process::exit(1);
        }
    };

    let app = router(AppState::new(codec));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.listen_port));
    tracing::info!("transaction-service listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
