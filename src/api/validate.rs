//! Request validation run before handler dispatch.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, ValidationError};

/// A typed request built from its raw body by a pure validation function.
pub trait Validate: Sized {
    type Raw: DeserializeOwned + Send;

    fn validate(raw: Self::Raw) -> Result<Self, ValidationError>;
}

/// Extractor that deserializes `T::Raw` and validates it into `T`.
pub struct Validated<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<T::Raw>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::new("body", rejection.body_text()))?;

        Ok(Validated(T::validate(raw)?))
    }
}

pub const MAX_TEXT_CHARS: usize = 10_000;

/// Read a string field; absent or null counts as empty.
pub fn string_field(value: Option<Value>, field: &str) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ValidationError::new(
            field,
            format!("Expected a string, got {}", json_type(&other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn validate_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("text", "Text cannot be empty"));
    }
    if trimmed.chars().count() > MAX_TEXT_CHARS {
        return Err(ValidationError::new(
            "text",
            format!("Text too long (max {} chars)", MAX_TEXT_CHARS),
        ));
    }
    Ok(trimmed.to_string())
}

/// Strip surrounding whitespace and `/.../` delimiters.
pub fn clean_ipa(ipa: &str) -> Result<String, ValidationError> {
    let mut cleaned = ipa.trim();
    while cleaned.len() >= 2 && cleaned.starts_with('/') && cleaned.ends_with('/') {
        cleaned = cleaned[1..cleaned.len() - 1].trim();
    }
    if cleaned.is_empty() || cleaned == "/" {
        return Err(ValidationError::new("ipa", "IPA text cannot be empty"));
    }
    Ok(cleaned.to_string())
}
