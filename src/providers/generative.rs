//! Generative itinerary drafting adapter
//!
//! Sends one structured prompt to a generative model and returns the
//! model's text verbatim. Parsing and validation belong to the caller;
//! the adapter does not inspect the output.

use super::http::{create_http_client, extract_text_content, send_json_request};
use super::{ItineraryPlanner, ProviderError};
use crate::types::ItineraryRequest;
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::debug;

/// Generative model used for trip planning
const PLANNER_MODEL: &str = "gemini-2.5-flash-lite";

/// Itinerary planner backed by a generative language model
pub struct GeminiPlanner {
    http_client: HttpClient,
    api_key: String,
}

impl GeminiPlanner {
    /// Create a new planner adapter
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: create_http_client(),
            api_key,
        }
    }
}

fn build_prompt(request: &ItineraryRequest) -> String {
    let interests = if request.interests.is_empty() {
        "general sightseeing".to_string()
    } else {
        request.interests.join(", ")
    };
    let arrival = request
        .arrival_date
        .as_deref()
        .unwrap_or("not specified");

    let mut prompt = format!(
        "You are a travel planner. Create a day-by-day itinerary as pure JSON, \
no markdown and no commentary, matching exactly this schema: \
{{\"destination\": string, \"duration_days\": number, \"days\": \
[{{\"day\": number, \"theme\": string, \"activities\": [string], \
\"estimated_cost\": number}}], \"total_estimated_cost\": number, \
\"tips\": [string]}}.\n\
Destination: {destination}\n\
Duration: {duration} days\n\
Interests: {interests}\n\
Budget per person: {budget}\n\
Group size: {group_size}\n\
Arrival date: {arrival}\n\
The days array must contain exactly {duration} entries numbered from 1.",
        destination = request.destination,
        duration = request.duration_days,
        budget = request.budget,
        group_size = request.group_size,
    );

    if !request.extra_preferences.is_empty() {
        let extras = request
            .extra_preferences
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("\nOther preferences: {extras}"));
    }

    prompt
}

#[async_trait::async_trait]
impl ItineraryPlanner for GeminiPlanner {
    async fn draft(&self, request: &ItineraryRequest) -> Result<String, ProviderError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{PLANNER_MODEL}:generateContent?key={}",
            self.api_key
        );

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": build_prompt(request)}]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 4000
            }
        });

        let res = send_json_request(&self.http_client, &url, &body).await?;
        let text = extract_text_content(
            &res,
            &["candidates", "0", "content", "parts", "0", "text"],
        )?;

        debug!(chars = text.len(), "Itinerary draft received");
        Ok(text)
    }
}
