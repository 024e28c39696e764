use axum::{extract::State, Json};
use std::sync::Arc;

use super::validate::Validated;
use super::{EndpointInfo, HealthResponse, LanguageInfo, LanguagesResponse, PhonemeRequest, RootResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::languages;
use crate::phonemize::PhonemeResponse;

#[cfg(feature = "reverse-lookup")]
use super::{DebugConfigResponse, IpaToTextRequest};
#[cfg(feature = "reverse-lookup")]
use crate::lookup::IpaToTextResponse;

pub async fn root() -> Json<RootResponse> {
    #[allow(unused_mut)]
    let mut endpoints = vec![
        EndpointInfo {
            path: "/phonemize",
            method: "POST",
            description: "Convert text to phonemes",
        },
        EndpointInfo {
            path: "/languages",
            method: "GET",
            description: "List supported languages",
        },
    ];

    #[cfg(feature = "reverse-lookup")]
    endpoints.push(EndpointInfo {
        path: "/ipa-to-text",
        method: "POST",
        description: "Convert IPA to text",
    });

    Json(RootResponse {
        message: "Welcome to Phonemizer API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        health: "/health",
        endpoints,
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

pub async fn list_languages() -> Json<LanguagesResponse> {
    let languages = languages::list()
        .map(|entry| LanguageInfo {
            code: entry.code,
            name: entry.name,
            description: format!("Language code: {}", entry.code),
        })
        .collect();

    Json(LanguagesResponse { languages })
}

pub async fn phonemize(
    State(state): State<Arc<AppState>>,
    Validated(request): Validated<PhonemeRequest>,
) -> Result<Json<PhonemeResponse>, AppError> {
    tracing::debug!(
        "Phonemizing {} chars as {}",
        request.text.chars().count(),
        request.language
    );

    let response = state
        .phonemizer
        .phonemize(request.text, request.language)
        .await?;

    Ok(Json(response))
}

#[cfg(feature = "reverse-lookup")]
pub async fn ipa_to_text(
    State(state): State<Arc<AppState>>,
    Validated(request): Validated<IpaToTextRequest>,
) -> Result<Json<IpaToTextResponse>, AppError> {
    let response = state.lookup.guess_word(&request.ipa).await?;
    Ok(Json(response))
}

#[cfg(feature = "reverse-lookup")]
pub async fn debug_config(State(state): State<Arc<AppState>>) -> Json<DebugConfigResponse> {
    let config = state.lookup.config();

    Json(DebugConfigResponse {
        endpoint_set: config.endpoint.is_some(),
        api_key_set: config.api_key.is_some(),
        engine_set: config.deployment.is_some(),
        endpoint: config.redacted_endpoint(),
        engine: config.deployment.clone().unwrap_or_default(),
    })
}
