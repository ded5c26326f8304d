//! Speech-to-text and text-to-speech adapter
//!
//! Transcription requires the caller to declare the spoken language and
//! audio encoding; synthesis always returns a base64 data URI, never raw
//! bytes, so results can flow straight into a JSON response.

use super::http::{create_http_client, extract_text_content, send_json_request};
use super::{ProviderError, SpeechProvider, TranscribeOptions};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::debug;

#[derive(serde::Deserialize, Debug)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(serde::Deserialize, Debug)]
struct RecognizeResult {
    #[serde(default)]
    alternatives: Vec<RecognizeAlternative>,
}

#[derive(serde::Deserialize, Debug)]
struct RecognizeAlternative {
    transcript: Option<String>,
}

/// Fixed speaking profile applied to every synthesis call
const SPEAKING_RATE: f64 = 1.0;
const PITCH: f64 = 0.0;

/// Speech adapter backed by the cloud speech and text-to-speech APIs
pub struct CloudSpeech {
    http_client: HttpClient,
    api_key: String,
}

impl CloudSpeech {
    /// Create a new speech adapter
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: create_http_client(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl SpeechProvider for CloudSpeech {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        opts: TranscribeOptions,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "https://speech.googleapis.com/v1/speech:recognize?key={}",
            self.api_key
        );

        let body = json!({
            "config": {
                "encoding": opts.encoding,
                "sampleRateHertz": opts.sample_rate_hertz,
                "languageCode": opts.language_code,
            },
            "audio": { "content": BASE64.encode(&audio) }
        });

        let res = send_json_request(&self.http_client, &url, &body).await?;
        let parsed: RecognizeResponse = serde_json::from_value(res).map_err(|e| {
            ProviderError::Unavailable(format!("malformed recognize response: {e}"))
        })?;

        // All recognized segments, newline-joined in utterance order.
        // An absent `results` field means silence, which is not an error.
        let transcript = parsed
            .results
            .into_iter()
            .filter_map(|r| r.alternatives.into_iter().next())
            .filter_map(|a| a.transcript)
            .collect::<Vec<_>>()
            .join("\n");

        debug!(chars = transcript.len(), "Transcription completed");
        Ok(transcript)
    }

    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
        voice: &str,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "https://texttospeech.googleapis.com/v1/text:synthesize?key={}",
            self.api_key
        );

        let body = json!({
            "input": { "text": text },
            "voice": { "languageCode": language_code, "name": voice },
            "audioConfig": {
                "audioEncoding": "MP3",
                "speakingRate": SPEAKING_RATE,
                "pitch": PITCH,
            }
        });

        let res = send_json_request(&self.http_client, &url, &body).await?;
        let audio_base64 = extract_text_content(&res, &["audioContent"])?;

        Ok(format!("data:audio/mp3;base64,{audio_base64}"))
    }
}

/// Expand a short language tag into the BCP-47 code the speech APIs expect
#[must_use]
pub fn speech_language_code(lang: &str) -> String {
    match lang.to_lowercase().as_str() {
        "id" => "id-ID".to_string(),
        "en" => "en-US".to_string(),
        "ja" => "ja-JP".to_string(),
        "ko" => "ko-KR".to_string(),
        "zh" => "zh-CN".to_string(),
        "fr" => "fr-FR".to_string(),
        "de" => "de-DE".to_string(),
        "es" => "es-ES".to_string(),
        // Full BCP-47 tags and unknown short tags pass through unchanged;
        // doubling a short tag would fabricate invalid region codes
        _ => lang.to_string(),
    }
}

/// Default synthesis voice for a target language
#[must_use]
pub fn default_voice(lang: &str) -> (String, String) {
    let code = speech_language_code(lang);
    let voice = match code.as_str() {
        "id-ID" => "id-ID-Standard-A",
        "en-US" => "en-US-Standard-C",
        "ja-JP" => "ja-JP-Standard-A",
        "ko-KR" => "ko-KR-Standard-A",
        "zh-CN" => "cmn-CN-Standard-A",
        "fr-FR" => "fr-FR-Standard-A",
        "de-DE" => "de-DE-Standard-A",
        "es-ES" => "es-ES-Standard-A",
        _ => return (code.clone(), format!("{code}-Standard-A")),
    };
    (code, voice.to_string())
}
