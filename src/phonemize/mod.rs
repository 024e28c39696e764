pub mod espeak;

use std::sync::Arc;

use serde::Serialize;

use crate::error::AppError;
use crate::languages::LanguageCode;

pub use espeak::EspeakPhonemizer;

pub const CONVERSION_NOTE: &str =
    "Format conversion between IPA and SAMPA is pending implementation";

/// Symbols making up one chunk of the engine's output.
pub type PhonemeGroup = Vec<String>;

/// An external engine turning text into phoneme groups.
///
/// Implementations may block; callers run them off the async executor.
pub trait Phonemizer: Send + Sync {
    fn phonemize(&self, text: &str, language: LanguageCode) -> Result<Vec<PhonemeGroup>, String>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhonemeResponse {
    pub ipa: String,
    pub sampa: String,
    pub espeak_ascii: String,
    pub note: String,
}

impl PhonemeResponse {
    /// No conversion is performed, so every notation carries the engine output.
    pub fn from_espeak(espeak_ascii: String) -> Self {
        Self {
            ipa: espeak_ascii.clone(),
            sampa: espeak_ascii.clone(),
            espeak_ascii,
            note: CONVERSION_NOTE.to_string(),
        }
    }
}

/// Concatenate symbols within each group, then join groups with a space.
pub fn join_groups(groups: &[PhonemeGroup]) -> String {
    groups
        .iter()
        .map(|group| group.concat())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct PhonemizeService {
    engine: Arc<dyn Phonemizer>,
}

impl PhonemizeService {
    pub fn new(engine: Arc<dyn Phonemizer>) -> Self {
        Self { engine }
    }

    pub async fn phonemize(
        &self,
        text: String,
        language: LanguageCode,
    ) -> Result<PhonemeResponse, AppError> {
        let engine = Arc::clone(&self.engine);

        let groups = tokio::task::spawn_blocking(move || engine.phonemize(&text, language))
            .await
            .map_err(|e| AppError::Phonemization(format!("engine task failed: {}", e)))?
            .map_err(|e| {
                tracing::error!("Phonemization engine failed for {}: {}", language, e);
                AppError::Phonemization(e)
            })?;

        let espeak_ascii = join_groups(&groups);
        tracing::debug!("Phonemized into {} group(s)", groups.len());

        Ok(PhonemeResponse::from_espeak(espeak_ascii))
    }
}
