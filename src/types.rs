//! Normalized result types shared across capabilities
//!
//! Every adapter and fallback maps its vendor-specific output into one of
//! these shapes; pipelines and the activity log only ever see these.

use serde::{Deserialize, Serialize};

/// Result of translating a piece of text, merged with language detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Text as submitted by the caller
    pub original_text: String,
    /// Translated text
    pub translated_text: String,
    /// Source language code (detected when the caller passed "auto")
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Translation confidence in 0..=1; the phrasebook fallback leaves this unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Which component produced the translation
    pub provider: String,
}

/// A geographic coordinate attached to a landmark match
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// A pixel-space vertex of a detection bounding region
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PixelVertex {
    /// Horizontal pixel coordinate
    #[serde(default)]
    pub x: i32,
    /// Vertical pixel coordinate
    #[serde(default)]
    pub y: i32,
}

/// One recognized landmark; an empty list of these is a valid outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkMatch {
    /// Landmark name as reported by the provider
    pub name: String,
    /// Detection confidence in 0..=1
    pub confidence: f32,
    /// Zero or more geographic coordinates for the landmark
    pub locations: Vec<GeoPoint>,
    /// Bounding region in the submitted image, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding: Option<Vec<PixelVertex>>,
}

/// Raw text detection output before any translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnnotation {
    /// Full extracted text, empty when the image contains none
    pub text: String,
    /// Extraction confidence, if reported
    pub confidence: Option<f32>,
}

/// Extracted-and-translated text from an image
///
/// Invariant: when `extracted_text` is empty, `translated_text` is empty
/// too and no translation call was made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Text extracted from the image
    pub extracted_text: String,
    /// The extracted text translated to the requested target language
    pub translated_text: String,
    /// Extraction confidence, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl OcrResult {
    /// Empty OCR outcome; used when no text is found or detection is unavailable
    #[must_use]
    pub fn empty() -> Self {
        Self {
            extracted_text: String::new(),
            translated_text: String::new(),
            confidence: None,
        }
    }
}

/// One day of a trip plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day index
    pub day: u32,
    /// Theme for the day
    pub theme: String,
    /// Ordered activities
    pub activities: Vec<String>,
    /// Estimated cost for the day
    pub estimated_cost: f64,
}

/// A complete trip plan, generated or fallback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryPlan {
    /// Destination name
    pub destination: String,
    /// Number of days; always equals `days.len()`
    pub duration_days: u32,
    /// Ordered day plans
    pub days: Vec<DayPlan>,
    /// Reported total cost for the plan
    pub total_estimated_cost: f64,
    /// Free-form travel tips
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Preferences merged from caller input and defaults for itinerary drafting
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryRequest {
    /// Destination name
    pub destination: String,
    /// Trip length in days, at least 1
    pub duration_days: u32,
    /// Caller interests, lowercased
    pub interests: Vec<String>,
    /// Per-person budget
    pub budget: f64,
    /// Travel group size
    pub group_size: u32,
    /// Optional arrival date, passed through to the prompt
    pub arrival_date: Option<String>,
    /// Extra caller preferences, forwarded verbatim to the planner prompt
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra_preferences: serde_json::Map<String, serde_json::Value>,
}

/// Sentiment polarity label derived from the raw score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// score > 0.1
    Positive,
    /// −0.1 ..= 0.1
    Neutral,
    /// score < −0.1
    Negative,
}

/// Sentiment analysis outcome: raw vendor values plus derived fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Polarity in −1..=1
    pub score: f32,
    /// Strength of sentiment, ≥ 0
    pub magnitude: f32,
    /// Label derived from `score` via fixed thresholds
    pub label: SentimentLabel,
    /// True unless the text is strongly negative and emotionally charged
    pub is_appropriate: bool,
}

impl SentimentScore {
    /// Derive the label and appropriateness flag from raw vendor values.
    ///
    /// Label: positive iff score > 0.1, negative iff score < −0.1, else
    /// neutral. Appropriate iff score > −0.7 and magnitude < 3.0.
    #[must_use]
    pub fn from_raw(score: f32, magnitude: f32) -> Self {
        let label = if score > 0.1 {
            SentimentLabel::Positive
        } else if score < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Self {
            score,
            magnitude,
            label,
            is_appropriate: score > -0.7 && magnitude < 3.0,
        }
    }
}

/// Caller identity sentinel used when no user is attached to a request
pub const ANONYMOUS_CALLER: &str = "anonymous";

/// One discrete AI-powered capability; doubles as the activity collection tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Voice clip transcription + translation + synthesis
    VoiceTranslation,
    /// Landmark recognition in photos
    LandmarkDetection,
    /// Text extraction (OCR) with translation
    TextExtraction,
    /// Combined upload + landmark + OCR analysis
    ImageAnalysis,
    /// Generative trip planning
    Itinerary,
    /// Review sentiment scoring
    Sentiment,
}

impl Capability {
    /// Collection name the capability's records are appended to
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::VoiceTranslation => "voice_translations",
            Self::LandmarkDetection => "landmark_detections",
            Self::TextExtraction => "text_extractions",
            Self::ImageAnalysis => "image_analyses",
            Self::Itinerary => "itineraries",
            Self::Sentiment => "sentiment_analyses",
        }
    }

    /// All capabilities, in the order the history report lists them
    pub const ALL: [Self; 6] = [
        Self::VoiceTranslation,
        Self::LandmarkDetection,
        Self::TextExtraction,
        Self::ImageAnalysis,
        Self::Itinerary,
        Self::Sentiment,
    ];
}
