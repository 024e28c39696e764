use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::phonemize::PhonemizeService;

#[cfg(feature = "reverse-lookup")]
use crate::lookup::ReverseLookup;

pub struct AppState {
    pub phonemizer: PhonemizeService,
    #[cfg(feature = "reverse-lookup")]
    pub lookup: ReverseLookup,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health).post(handlers::health))
        .route("/languages", get(handlers::list_languages))
        .route("/phonemize", post(handlers::phonemize));

    #[cfg(feature = "reverse-lookup")]
    let router = router
        .route("/ipa-to-text", post(handlers::ipa_to_text))
        .route("/debug/config", get(handlers::debug_config));

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
