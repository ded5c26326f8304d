//! Landmark and text detection adapter
//!
//! Wraps the cloud vision `images:annotate` endpoint. Each method issues
//! exactly one annotate call and maps the vendor shapes into
//! [`LandmarkMatch`] / [`TextAnnotation`].

use super::http::{create_http_client, send_json_request};
use super::{ProviderError, VisionProvider};
use crate::types::{GeoPoint, LandmarkMatch, PixelVertex, TextAnnotation};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::debug;

#[derive(serde::Deserialize, Debug)]
struct AnnotateResponse {
    responses: Vec<ImageResponse>,
}

#[derive(serde::Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    landmark_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    text_annotations: Vec<EntityAnnotation>,
    error: Option<ImageError>,
}

#[derive(serde::Deserialize, Debug)]
struct ImageError {
    message: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct EntityAnnotation {
    description: Option<String>,
    score: Option<f32>,
    confidence: Option<f32>,
    #[serde(default)]
    locations: Vec<LocationInfo>,
    bounding_poly: Option<BoundingPoly>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LocationInfo {
    lat_lng: Option<LatLng>,
}

#[derive(serde::Deserialize, Debug)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(serde::Deserialize, Debug)]
struct BoundingPoly {
    #[serde(default)]
    vertices: Vec<PixelVertex>,
}

/// Vision adapter backed by the cloud `images:annotate` API
pub struct CloudVision {
    http_client: HttpClient,
    api_key: String,
}

impl CloudVision {
    /// Create a new vision adapter
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: create_http_client(),
            api_key,
        }
    }

    async fn annotate(
        &self,
        image: &[u8],
        feature_type: &str,
        max_results: u32,
    ) -> Result<ImageResponse, ProviderError> {
        let url = format!(
            "https://vision.googleapis.com/v1/images:annotate?key={}",
            self.api_key
        );

        let body = json!({
            "requests": [{
                "image": { "content": BASE64.encode(image) },
                "features": [{ "type": feature_type, "maxResults": max_results }]
            }]
        });

        let res = send_json_request(&self.http_client, &url, &body).await?;
        let parsed: AnnotateResponse = serde_json::from_value(res)
            .map_err(|e| ProviderError::Unavailable(format!("malformed annotate response: {e}")))?;

        let response = parsed
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Unavailable("empty annotate response".to_string()))?;

        if let Some(err) = response.error {
            // A per-image error means the vendor looked at the payload and
            // refused it, not that the service is down.
            return Err(ProviderError::RejectedInput(
                err.message.unwrap_or_else(|| "image rejected".to_string()),
            ));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl VisionProvider for CloudVision {
    async fn detect_landmarks(
        &self,
        image: Vec<u8>,
        max_results: u32,
    ) -> Result<Vec<LandmarkMatch>, ProviderError> {
        let response = self
            .annotate(&image, "LANDMARK_DETECTION", max_results)
            .await?;

        let matches: Vec<LandmarkMatch> = response
            .landmark_annotations
            .into_iter()
            .filter_map(|a| {
                let name = a.description?;
                Some(LandmarkMatch {
                    name,
                    confidence: a.score.or(a.confidence).unwrap_or(0.0),
                    locations: a
                        .locations
                        .into_iter()
                        .filter_map(|l| l.lat_lng)
                        .map(|ll| GeoPoint {
                            latitude: ll.latitude,
                            longitude: ll.longitude,
                        })
                        .collect(),
                    bounding: a.bounding_poly.map(|p| p.vertices),
                })
            })
            .collect();

        debug!(count = matches.len(), "Landmark detection completed");
        Ok(matches)
    }

    async fn detect_text(&self, image: Vec<u8>) -> Result<TextAnnotation, ProviderError> {
        let response = self.annotate(&image, "TEXT_DETECTION", 1).await?;

        // The first annotation aggregates the full extracted text; the rest
        // are per-word fragments we don't need.
        let annotation = response.text_annotations.into_iter().next();
        let result = match annotation {
            Some(a) => TextAnnotation {
                text: a.description.unwrap_or_default(),
                confidence: a.confidence.or(a.score),
            },
            None => TextAnnotation {
                text: String::new(),
                confidence: None,
            },
        };

        debug!(chars = result.text.len(), "Text detection completed");
        Ok(result)
    }
}
