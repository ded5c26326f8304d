//! Sentiment scoring adapter
//!
//! One `documents:analyzeSentiment` call per request; the label and
//! appropriateness flag are derived locally from the raw score/magnitude
//! so every vendor (and the mocks) go through the same thresholds.

use super::http::{create_http_client, send_json_request};
use super::{ProviderError, SentimentProvider};
use crate::types::SentimentScore;
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::debug;

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentResponse {
    document_sentiment: DocumentSentiment,
}

#[derive(serde::Deserialize, Debug, Default)]
struct DocumentSentiment {
    #[serde(default)]
    score: f32,
    #[serde(default)]
    magnitude: f32,
}

/// Sentiment adapter backed by the cloud natural-language API
pub struct CloudSentiment {
    http_client: HttpClient,
    api_key: String,
}

impl CloudSentiment {
    /// Create a new sentiment adapter
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: create_http_client(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl SentimentProvider for CloudSentiment {
    async fn analyze(&self, text: &str) -> Result<SentimentScore, ProviderError> {
        let url = format!(
            "https://language.googleapis.com/v1/documents:analyzeSentiment?key={}",
            self.api_key
        );

        let body = json!({
            "document": { "type": "PLAIN_TEXT", "content": text },
            "encodingType": "UTF8"
        });

        let res = send_json_request(&self.http_client, &url, &body).await?;
        let parsed: AnalyzeSentimentResponse = serde_json::from_value(res).map_err(|e| {
            ProviderError::Unavailable(format!("malformed sentiment response: {e}"))
        })?;

        let score = SentimentScore::from_raw(
            parsed.document_sentiment.score,
            parsed.document_sentiment.magnitude,
        );
        debug!(score = score.score, magnitude = score.magnitude, "Sentiment analyzed");
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;

    #[test]
    fn test_sentiment_response_parsing_and_derivation() {
        let raw = serde_json::json!({
            "documentSentiment": {"score": -0.8, "magnitude": 3.4}
        });
        let parsed: AnalyzeSentimentResponse = serde_json::from_value(raw).expect("parses");
        let score = SentimentScore::from_raw(
            parsed.document_sentiment.score,
            parsed.document_sentiment.magnitude,
        );
        assert_eq!(score.label, SentimentLabel::Negative);
        assert!(!score.is_appropriate);
    }
}
