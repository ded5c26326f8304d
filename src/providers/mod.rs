//! External AI provider adapters
//!
//! One trait per capability family, each wrapping exactly one vendor call
//! and mapping its output into the normalized shapes in [`crate::types`].
//! Adapters are stateless: constructed once at startup from settings and
//! shared via `Arc`, with no mutable state between calls.

mod http;

/// Generative itinerary drafting adapter.
pub mod generative;
/// Sentiment scoring adapter.
pub mod sentiment;
/// Speech-to-text and text-to-speech adapters.
pub mod speech;
/// Translation and language detection adapter.
pub mod translate;
/// Public blob upload adapter.
pub mod uploads;
/// Landmark and text detection adapters.
pub mod vision;

use crate::types::{LandmarkMatch, SentimentScore, TextAnnotation, TranslationResult};
use thiserror::Error;

/// Errors produced by provider adapters.
///
/// Callers must distinguish the two variants: only `Unavailable` ever
/// triggers a local fallback, `RejectedInput` always surfaces to the user.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transient vendor/network/auth/quota failure; fallback-eligible
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    /// The vendor rejected the input as malformed or unsupported
    #[error("provider rejected input: {0}")]
    RejectedInput(String),
}

/// Options the caller must declare for speech transcription
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    /// BCP-47 language code of the spoken audio (e.g. "id-ID")
    pub language_code: String,
    /// Audio encoding identifier (e.g. "WEBM_OPUS", "LINEAR16")
    pub encoding: String,
    /// Sample rate of the audio in hertz
    pub sample_rate_hertz: u32,
}

/// Landmark and text detection over normalized image bytes
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VisionProvider: Send + Sync {
    /// Detect landmarks in a normalized image.
    ///
    /// An empty result is a valid outcome, not an error.
    async fn detect_landmarks(
        &self,
        image: Vec<u8>,
        max_results: u32,
    ) -> Result<Vec<LandmarkMatch>, ProviderError>;

    /// Extract text from a normalized image.
    async fn detect_text(&self, image: Vec<u8>) -> Result<TextAnnotation, ProviderError>;
}

/// Text translation with source-language detection
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` from `source` to `target`.
    ///
    /// When `source` is `"auto"`, a detection call determines the source
    /// language; translation and detection are merged into one result.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<TranslationResult, ProviderError>;
}

/// Speech transcription and synthesis
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Transcribe spoken audio, returning all recognized segments
    /// newline-joined in utterance order. Empty when no speech is found.
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        opts: TranscribeOptions,
    ) -> Result<String, ProviderError>;

    /// Synthesize speech, returning a `data:audio/mp3;base64,...` URI.
    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
        voice: &str,
    ) -> Result<String, ProviderError>;
}

/// Sentiment scoring of review text
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Score the text, returning raw vendor values plus derived fields.
    async fn analyze(&self, text: &str) -> Result<SentimentScore, ProviderError>;
}

/// Generative itinerary drafting
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ItineraryPlanner: Send + Sync {
    /// Send a structured prompt to the generative model and return its
    /// output verbatim; the caller decides whether to trust the structure.
    async fn draft(&self, request: &crate::types::ItineraryRequest)
        -> Result<String, ProviderError>;
}

/// Public blob storage for uploaded media
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UploadStore: Send + Sync {
    /// Store bytes under a collision-resistant generated name and return
    /// the object's public URL. Failures are always `Unavailable`.
    async fn store_image(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ProviderError>;
}
