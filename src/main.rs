use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod languages;
#[cfg(feature = "reverse-lookup")]
mod lookup;
mod phonemize;

use api::routes::{create_router, AppState};
use config::Config;
use phonemize::{EspeakPhonemizer, PhonemizeService};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the process environment still applies
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env().expect("Invalid configuration");
    let addr = config.socket_addr().expect("Invalid address");

    tracing::info!("Phonemizer API v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("eSpeak binary: {}", config.espeak_bin.display());

    let engine = Arc::new(EspeakPhonemizer::new(config.espeak_bin.clone()));

    let state = AppState {
        phonemizer: PhonemizeService::new(engine),
        #[cfg(feature = "reverse-lookup")]
        lookup: {
            if config.upstream.is_configured() {
                tracing::info!("Reverse lookup enabled");
            } else {
                tracing::warn!(
                    "Reverse lookup not configured, missing: {}",
                    config.upstream.missing().join(", ")
                );
            }
            lookup::ReverseLookup::new(config.upstream.clone())
        },
    };

    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
