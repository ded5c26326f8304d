//! Route handlers
//!
//! Thin layer: parse the request, hand it to a pipeline, wrap the outcome
//! in the success envelope. All capability decisions live in the
//! pipelines; handlers never talk to providers directly except for plain
//! speech synthesis, which has no orchestration to do.

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::pipelines::history::merged_history;
use crate::pipelines::itinerary::ItineraryInput;
use crate::pipelines::voice::VoiceTranslateInput;
use crate::providers::speech::{default_voice, speech_language_code};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

fn default_source_language() -> String {
    "id".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_encoding() -> String {
    "WEBM_OPUS".to_string()
}

const fn default_sample_rate() -> u32 {
    48_000
}

fn default_synthesis_language() -> String {
    "id-ID".to_string()
}

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Body of a voice translation request
#[derive(Debug, Deserialize)]
pub struct VoiceTranslateRequest {
    /// Base64-encoded audio clip, with or without a data-URL prefix
    pub audio_base64: String,
    /// Language spoken in the clip
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Language to translate into
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Audio encoding of the clip
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Sample rate of the clip in hertz
    #[serde(default = "default_sample_rate")]
    pub sample_rate_hertz: u32,
    /// Caller identity for the activity log
    #[serde(default)]
    pub user_id: Option<String>,
}

/// POST /api/voice/translate
pub async fn voice_translate(
    State(state): State<AppState>,
    Json(req): Json<VoiceTranslateRequest>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state
        .voice
        .run(
            VoiceTranslateInput {
                audio_base64: req.audio_base64,
                source_language: req.source_language,
                target_language: req.target_language,
                encoding: req.encoding,
                sample_rate_hertz: req.sample_rate_hertz,
            },
            req.user_id.as_deref(),
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "transcript": outcome.transcript,
        "translation": outcome.translation,
        "synthesized_audio": outcome.synthesized_audio,
    })))
}

/// Body of a plain speech synthesis request
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    /// Text to speak
    pub text: String,
    /// Language of the text
    #[serde(default = "default_synthesis_language")]
    pub language: String,
    /// Specific voice name; a language default is chosen when absent
    #[serde(default)]
    pub voice: Option<String>,
}

/// POST /api/speech/synthesize
pub async fn synthesize_speech(
    State(state): State<AppState>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::MissingInput("text".to_string()));
    }

    let speech = state.speech.as_ref().ok_or_else(|| {
        ApiError::ProviderUnavailable("speech provider not configured".to_string())
    })?;

    let (language_code, voice) = match req.voice {
        Some(voice) => (speech_language_code(&req.language), voice),
        None => default_voice(&req.language),
    };

    let audio = speech.synthesize(&req.text, &language_code, &voice).await?;

    Ok(Json(json!({
        "success": true,
        "audio": audio,
        "language": language_code,
        "voice": voice,
    })))
}

/// Body of a landmark detection request
#[derive(Debug, Deserialize)]
pub struct LandmarkRequest {
    /// Base64-encoded image, with or without a data-URL prefix
    pub image_base64: String,
    /// Caller identity for the activity log
    #[serde(default)]
    pub user_id: Option<String>,
}

/// POST /api/vision/landmarks
pub async fn detect_landmarks(
    State(state): State<AppState>,
    Json(req): Json<LandmarkRequest>,
) -> Result<Json<Value>, ApiError> {
    let report = state
        .imaging
        .landmarks(&req.image_base64, req.user_id.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "landmarks": report.landmarks,
        "has_landmarks": report.has_landmarks,
    })))
}

/// Body of an OCR request
#[derive(Debug, Deserialize)]
pub struct OcrRequest {
    /// Base64-encoded image, with or without a data-URL prefix
    pub image_base64: String,
    /// Language to translate extracted text into
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Caller identity for the activity log
    #[serde(default)]
    pub user_id: Option<String>,
}

/// POST /api/vision/ocr
pub async fn extract_text(
    State(state): State<AppState>,
    Json(req): Json<OcrRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = state
        .imaging
        .ocr(&req.image_base64, &req.target_language, req.user_id.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "extracted_text": result.extracted_text,
        "translated_text": result.translated_text,
        "confidence": result.confidence,
        "has_text": !result.extracted_text.is_empty(),
    })))
}

/// POST /api/images/analyze
///
/// Multipart form. Fields: `image` (binary, required), `target_language`
/// (text), `user_id` (text).
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut image: Option<Vec<u8>> = None;
    let mut target_language = default_target_language();
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Could not read image: {e}")))?;
                image = Some(bytes.to_vec());
            }
            "target_language" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid field: {e}")))?;
                if !value.trim().is_empty() {
                    target_language = value;
                }
            }
            "user_id" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid field: {e}")))?;
                if !value.trim().is_empty() {
                    user_id = Some(value);
                }
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| ApiError::MissingInput("image".to_string()))?;
    if image.is_empty() {
        return Err(ApiError::MissingInput("image".to_string()));
    }

    let report = state
        .imaging
        .analyze(&image, &target_language, user_id.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "image_url": report.image_url,
        "landmarks": report.landmarks,
        "has_landmarks": report.has_landmarks,
        "ocr": report.ocr,
        "has_text": report.has_text,
    })))
}

/// Body of an itinerary generation request
#[derive(Debug, Deserialize)]
pub struct ItineraryHttpRequest {
    /// Destination name; required
    #[serde(default)]
    pub destination: String,
    /// Trip length in days; required, at least 1
    #[serde(default, alias = "duration")]
    pub duration_days: u32,
    /// Traveler interests
    #[serde(default)]
    pub interests: Vec<String>,
    /// Per-person budget
    #[serde(default)]
    pub budget: Option<f64>,
    /// Travel group size
    #[serde(default)]
    pub group_size: Option<u32>,
    /// Optional arrival date
    #[serde(default)]
    pub arrival_date: Option<String>,
    /// Caller identity for the activity log
    #[serde(default)]
    pub user_id: Option<String>,
    /// Any additional preference fields, merged into the planner prompt
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// POST /api/itinerary
pub async fn generate_itinerary(
    State(state): State<AppState>,
    Json(req): Json<ItineraryHttpRequest>,
) -> Result<Json<Value>, ApiError> {
    let plan = state
        .itinerary
        .run(
            ItineraryInput {
                destination: req.destination,
                duration_days: req.duration_days,
                interests: req.interests,
                budget: req.budget,
                group_size: req.group_size,
                arrival_date: req.arrival_date,
                extra_preferences: req.extra,
            },
            req.user_id.as_deref(),
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "itinerary": plan,
    })))
}

/// Body of a sentiment analysis request
#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    /// Review text to score
    pub text: String,
    /// Review the text came from, if any
    #[serde(default)]
    pub review_id: Option<String>,
    /// Caller identity for the activity log
    #[serde(default)]
    pub user_id: Option<String>,
}

/// POST /api/sentiment
pub async fn analyze_sentiment(
    State(state): State<AppState>,
    Json(req): Json<SentimentRequest>,
) -> Result<Json<Value>, ApiError> {
    let report = state
        .sentiment
        .run(&req.text, req.review_id, req.user_id.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "sentiment": report,
    })))
}

/// GET /api/history/{user_id}
pub async fn history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = state.store.as_ref().ok_or_else(|| {
        ApiError::StorageUnavailable("activity storage not configured".to_string())
    })?;

    let report = merged_history(store.as_ref(), &user_id, state.history_limit).await?;

    Ok(Json(json!({
        "success": true,
        "user_id": report.caller_id,
        "activities": report.activities,
        "total_activities": report.total_activities,
    })))
}
