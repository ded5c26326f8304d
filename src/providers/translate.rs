//! Translation and language detection adapter
//!
//! Translation and detection are two separate vendor calls, but callers
//! always get them merged into a single [`TranslationResult`].

use super::http::{create_http_client, send_json_request};
use super::{ProviderError, TranslationProvider};
use crate::types::TranslationResult;
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::debug;

#[derive(serde::Deserialize, Debug)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(serde::Deserialize, Debug)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
    detected_source_language: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
struct DetectResponse {
    data: DetectData,
}

#[derive(serde::Deserialize, Debug)]
struct DetectData {
    detections: Vec<Vec<Detection>>,
}

#[derive(serde::Deserialize, Debug)]
struct Detection {
    language: String,
    confidence: Option<f32>,
}

/// Translation adapter backed by the cloud translation v2 API
pub struct CloudTranslate {
    http_client: HttpClient,
    api_key: String,
}

impl CloudTranslate {
    /// Create a new translation adapter
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: create_http_client(),
            api_key,
        }
    }

    async fn detect_language(&self, text: &str) -> Result<(String, Option<f32>), ProviderError> {
        let url = format!(
            "https://translation.googleapis.com/language/translate/v2/detect?key={}",
            self.api_key
        );
        let body = json!({ "q": text });

        let res = send_json_request(&self.http_client, &url, &body).await?;
        let parsed: DetectResponse = serde_json::from_value(res)
            .map_err(|e| ProviderError::Unavailable(format!("malformed detect response: {e}")))?;

        parsed
            .data
            .detections
            .into_iter()
            .flatten()
            .next()
            .map(|d| (d.language, d.confidence))
            .ok_or_else(|| ProviderError::Unavailable("empty detection response".to_string()))
    }
}

#[async_trait::async_trait]
impl TranslationProvider for CloudTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<TranslationResult, ProviderError> {
        // "auto" delegates source identification to a detection call
        let (source_language, detect_confidence) = if source.eq_ignore_ascii_case("auto") {
            let (lang, confidence) = self.detect_language(text).await?;
            debug!(detected = %lang, "Detected source language");
            (lang, confidence)
        } else {
            (source.to_string(), None)
        };

        let url = format!(
            "https://translation.googleapis.com/language/translate/v2?key={}",
            self.api_key
        );
        let body = json!({
            "q": text,
            "source": source_language,
            "target": target,
            "format": "text"
        });

        let res = send_json_request(&self.http_client, &url, &body).await?;
        let parsed: TranslateResponse = serde_json::from_value(res).map_err(|e| {
            ProviderError::Unavailable(format!("malformed translate response: {e}"))
        })?;

        let translation = parsed
            .data
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Unavailable("empty translation response".to_string()))?;

        Ok(TranslationResult {
            original_text: text.to_string(),
            translated_text: translation.translated_text,
            source_language: translation
                .detected_source_language
                .unwrap_or(source_language),
            target_language: target.to_string(),
            confidence: detect_confidence,
            provider: "cloud-translate".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_response_parsing() {
        let raw = serde_json::json!({
            "data": { "translations": [
                {"translatedText": "hello", "detectedSourceLanguage": "id"}
            ]}
        });
        let parsed: TranslateResponse = serde_json::from_value(raw).expect("parses");
        let t = &parsed.data.translations[0];
        assert_eq!(t.translated_text, "hello");
        assert_eq!(t.detected_source_language.as_deref(), Some("id"));
    }

    #[test]
    fn test_detect_response_parsing() {
        let raw = serde_json::json!({
            "data": { "detections": [[{"language": "id", "confidence": 0.97}]] }
        });
        let parsed: DetectResponse = serde_json::from_value(raw).expect("parses");
        let d = parsed.data.detections.into_iter().flatten().next().expect("detection");
        assert_eq!(d.language, "id");
        assert!(d.confidence.is_some());
    }
}
