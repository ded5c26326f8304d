//! Voice translation orchestrator
//!
//! Transcribe → translate → synthesize, in that order. Transcription and
//! synthesis failures propagate; only the translation sub-step has a
//! local fallback. An empty transcript fails fast before any further
//! provider call is made.

use super::{log_activity, translate_with_fallback, PipelineError};
use crate::activity::ActivityStore;
use crate::media;
use crate::providers::speech::{default_voice, speech_language_code};
use crate::providers::{ProviderError, SpeechProvider, TranscribeOptions, TranslationProvider};
use crate::types::{Capability, TranslationResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Caller-supplied inputs for one voice translation request
#[derive(Debug, Clone)]
pub struct VoiceTranslateInput {
    /// Base64-encoded audio clip, with or without a data-URL prefix
    pub audio_base64: String,
    /// Language spoken in the clip (short tag, e.g. "id")
    pub source_language: String,
    /// Language to translate into
    pub target_language: String,
    /// Audio encoding of the clip
    pub encoding: String,
    /// Sample rate of the clip in hertz
    pub sample_rate_hertz: u32,
}

/// Normalized outcome of a completed voice translation
#[derive(Debug, Clone, Serialize)]
pub struct VoiceTranslation {
    /// Newline-joined transcript of the clip
    pub transcript: String,
    /// Translation of the transcript
    pub translation: TranslationResult,
    /// Synthesized speech as a data URI
    pub synthesized_audio: String,
}

/// Orchestrator for the voice translation capability
pub struct VoicePipeline {
    speech: Option<Arc<dyn SpeechProvider>>,
    translator: Option<Arc<dyn TranslationProvider>>,
    store: Option<Arc<dyn ActivityStore>>,
}

impl VoicePipeline {
    /// Create the pipeline from provider handles
    #[must_use]
    pub fn new(
        speech: Option<Arc<dyn SpeechProvider>>,
        translator: Option<Arc<dyn TranslationProvider>>,
        store: Option<Arc<dyn ActivityStore>>,
    ) -> Self {
        Self {
            speech,
            translator,
            store,
        }
    }

    /// Run the full transcribe → translate → synthesize sequence.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidMedia` before any provider call when the audio
    /// payload cannot be decoded, with `NoSpeechDetected` when the
    /// transcript is empty, and with the underlying provider error when
    /// transcription or synthesis fails.
    pub async fn run(
        &self,
        input: VoiceTranslateInput,
        caller_id: Option<&str>,
    ) -> Result<VoiceTranslation, PipelineError> {
        let audio = media::normalize_audio(&input.audio_base64)?;

        let speech = self.speech.as_ref().ok_or_else(|| {
            ProviderError::Unavailable("speech provider not configured".to_string())
        })?;

        let transcript = speech
            .transcribe(
                audio,
                TranscribeOptions {
                    language_code: speech_language_code(&input.source_language),
                    encoding: input.encoding.clone(),
                    sample_rate_hertz: input.sample_rate_hertz,
                },
            )
            .await?;

        if transcript.trim().is_empty() {
            info!("Transcript empty, failing fast");
            return Err(PipelineError::NoSpeechDetected);
        }
        debug!(chars = transcript.len(), "Transcript obtained");

        let translation = translate_with_fallback(
            self.translator.as_deref(),
            &transcript,
            &input.source_language,
            &input.target_language,
        )
        .await?;

        let (voice_lang, voice_name) = default_voice(&input.target_language);
        let synthesized_audio = speech
            .synthesize(&translation.translated_text, &voice_lang, &voice_name)
            .await?;

        let outcome = VoiceTranslation {
            transcript,
            translation,
            synthesized_audio,
        };

        log_activity(
            self.store.as_ref(),
            caller_id,
            Capability::VoiceTranslation,
            &outcome,
        );

        Ok(outcome)
    }
}
