//! Per-capability pipeline orchestrators
//!
//! Each pipeline composes normalizer → adapter(s) → fallback → activity
//! log in a fixed sequence. Provider errors are handled here, at the
//! orchestrator boundary, so each capability decides for itself whether
//! to fall back or propagate.

/// Merged activity history reader.
pub mod history;
/// Image upload + analyze, landmark, and OCR orchestrators.
pub mod imaging;
/// Itinerary generation orchestrator.
pub mod itinerary;
/// Sentiment analysis orchestrator.
pub mod sentiment;
/// Voice translation orchestrator.
pub mod voice;

use crate::activity::{ActivityRecord, ActivityStore};
use crate::fallback;
use crate::media::MediaError;
use crate::providers::{ProviderError, TranslationProvider};
use crate::types::{Capability, TranslationResult};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by pipeline orchestrators
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Payload could not be decoded as the declared media kind
    #[error(transparent)]
    InvalidMedia(#[from] MediaError),
    /// The audio contained no recognizable speech
    #[error("no speech detected in audio")]
    NoSpeechDetected,
    /// A required input field was absent or empty
    #[error("missing required input: {0}")]
    MissingInput(String),
    /// A provider failed and no fallback applies
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Translate with the phrasebook standing in when the remote translator
/// is unavailable or was never configured.
///
/// # Errors
///
/// Returns `ProviderError::RejectedInput` untouched; rejection never
/// triggers a fallback.
pub(crate) async fn translate_with_fallback(
    translator: Option<&dyn TranslationProvider>,
    text: &str,
    source: &str,
    target: &str,
) -> Result<TranslationResult, ProviderError> {
    let Some(translator) = translator else {
        return Ok(fallback::phrasebook_translate(text, source, target));
    };

    match translator.translate(text, source, target).await {
        Ok(result) => Ok(result),
        Err(ProviderError::Unavailable(reason)) => {
            warn!(reason = %reason, "Translation provider unavailable, using phrasebook");
            Ok(fallback::phrasebook_translate(text, source, target))
        }
        Err(e @ ProviderError::RejectedInput(_)) => Err(e),
    }
}

/// Fire-and-forget activity logging.
///
/// A log-write failure must never mask the primary result, so the append
/// runs on its own task and failures are only warned about.
pub(crate) fn log_activity<T: Serialize>(
    store: Option<&Arc<dyn ActivityStore>>,
    caller_id: Option<&str>,
    capability: Capability,
    payload: &T,
) {
    let Some(store) = store else {
        return;
    };

    let record = match ActivityRecord::new(caller_id, capability, payload) {
        Ok(record) => record,
        Err(e) => {
            warn!(capability = ?capability, error = %e, "Could not serialize activity record");
            return;
        }
    };

    let store = Arc::clone(store);
    tokio::spawn(async move {
        if let Err(e) = store.append(record).await {
            warn!(capability = ?capability, error = %e, "Activity log write failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockTranslationProvider;

    #[tokio::test]
    async fn test_translator_outage_uses_phrasebook() {
        let mut translator = MockTranslationProvider::new();
        translator
            .expect_translate()
            .returning(|_, _, _| Err(ProviderError::Unavailable("down".to_string())));

        let result = translate_with_fallback(Some(&translator), "halo", "id", "en")
            .await
            .expect("fallback stands in");
        assert_eq!(result.provider, "phrasebook");
        assert_eq!(result.translated_text, "hello");
    }

    #[tokio::test]
    async fn test_translator_rejection_bypasses_phrasebook() {
        let mut translator = MockTranslationProvider::new();
        translator
            .expect_translate()
            .returning(|_, _, _| Err(ProviderError::RejectedInput("too long".to_string())));

        let err = translate_with_fallback(Some(&translator), "halo", "id", "en")
            .await
            .expect_err("rejection propagates");
        assert!(matches!(err, ProviderError::RejectedInput(_)));
    }
}
