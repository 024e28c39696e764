pub mod handlers;
pub mod routes;
pub mod validate;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::languages::{self, LanguageCode};
use validate::{string_field, validate_text, Validate};

#[derive(Debug, Deserialize)]
pub struct RawPhonemeRequest {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhonemeRequest {
    pub text: String,
    pub language: LanguageCode,
}

impl Validate for PhonemeRequest {
    type Raw = RawPhonemeRequest;

    fn validate(raw: RawPhonemeRequest) -> Result<Self, ValidationError> {
        let text = validate_text(&string_field(raw.text, "text")?)?;
        let language = string_field(raw.language, "language")?;

        if !languages::is_supported(&language) {
            return Err(unsupported_language(&language));
        }
        let language = LanguageCode::parse(&language).ok_or_else(|| unsupported_language(&language))?;

        Ok(Self { text, language })
    }
}

fn unsupported_language(code: &str) -> ValidationError {
    ValidationError::new(
        "language",
        format!(
            "Language \"{}\" not supported. Available languages: {}",
            code,
            languages::supported_codes()
        ),
    )
}

#[cfg(feature = "reverse-lookup")]
#[derive(Debug, Deserialize)]
pub struct RawIpaToTextRequest {
    #[serde(default)]
    pub ipa: Option<Value>,
}

#[cfg(feature = "reverse-lookup")]
#[derive(Debug, Clone, PartialEq)]
pub struct IpaToTextRequest {
    pub ipa: String,
}

#[cfg(feature = "reverse-lookup")]
impl Validate for IpaToTextRequest {
    type Raw = RawIpaToTextRequest;

    fn validate(raw: RawIpaToTextRequest) -> Result<Self, ValidationError> {
        Ok(Self {
            ipa: validate::clean_ipa(&string_field(raw.ipa, "ipa")?)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub health: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

#[cfg(feature = "reverse-lookup")]
#[derive(Debug, Serialize)]
pub struct DebugConfigResponse {
    pub endpoint_set: bool,
    pub api_key_set: bool,
    pub engine_set: bool,
    pub endpoint: String,
    pub engine: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str, language: &str) -> RawPhonemeRequest {
        RawPhonemeRequest {
            text: Some(Value::from(text)),
            language: Some(Value::from(language)),
        }
    }

    #[test]
    fn test_valid_request() {
        let request = PhonemeRequest::validate(raw("  hello ", "en-us")).unwrap();
        assert_eq!(request.text, "hello");
        assert_eq!(request.language.as_str(), "en-us");
    }

    #[test]
    fn test_empty_text_rejected_for_any_language() {
        for language in ["en-us", "fr", "xx-unsupported", ""] {
            let err = PhonemeRequest::validate(raw("   ", language)).unwrap_err();
            assert_eq!(err.field, "text");
        }
    }

    #[test]
    fn test_unsupported_language_lists_codes() {
        let err = PhonemeRequest::validate(raw("hello", "xx-unsupported")).unwrap_err();
        assert_eq!(err.field, "language");
        assert!(err.reason.starts_with("Language \"xx-unsupported\" not supported"));
        for entry in languages::list() {
            assert!(err.reason.contains(entry.code));
        }
    }

    #[test]
    fn test_wrong_typed_field_is_named() {
        let err = PhonemeRequest::validate(RawPhonemeRequest {
            text: Some(Value::from(5)),
            language: Some(Value::from("en-us")),
        })
        .unwrap_err();
        assert_eq!(err.field, "text");

        let err = PhonemeRequest::validate(RawPhonemeRequest {
            text: Some(Value::from("hello")),
            language: Some(Value::Bool(true)),
        })
        .unwrap_err();
        assert_eq!(err.field, "language");
    }

    #[cfg(feature = "reverse-lookup")]
    #[test]
    fn test_ipa_request_cleaned() {
        let request = IpaToTextRequest::validate(RawIpaToTextRequest { ipa: Some(Value::from(" /kæt/ ")) }).unwrap();
        assert_eq!(request.ipa, "kæt");
    }
}
