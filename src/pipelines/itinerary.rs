//! Itinerary generation orchestrator
//!
//! Merges caller preferences with defaults, asks the generative planner
//! for a structured plan, and switches to the deterministic template
//! generator whenever the planner is unconfigured, unavailable, or its
//! output cannot be trusted. The response shape is identical either way,
//! so callers cannot tell generated and fallback plans apart.

use super::{log_activity, PipelineError};
use crate::activity::ActivityStore;
use crate::config::{DEFAULT_BUDGET, DEFAULT_GROUP_SIZE};
use crate::fallback;
use crate::providers::{ItineraryPlanner, ProviderError};
use crate::types::{Capability, ItineraryPlan, ItineraryRequest};
use std::sync::Arc;
use tracing::{info, warn};

/// Caller-supplied trip preferences before defaults are merged
#[derive(Debug, Clone, Default)]
pub struct ItineraryInput {
    /// Destination name; required
    pub destination: String,
    /// Trip length in days; required, at least 1
    pub duration_days: u32,
    /// Interests, matched case-insensitively
    pub interests: Vec<String>,
    /// Per-person budget; defaults to 500
    pub budget: Option<f64>,
    /// Group size; defaults to 2
    pub group_size: Option<u32>,
    /// Optional arrival date, passed through to the prompt
    pub arrival_date: Option<String>,
    /// Extra caller preferences, forwarded to the planner untouched
    pub extra_preferences: serde_json::Map<String, serde_json::Value>,
}

/// Orchestrator for the itinerary capability
pub struct ItineraryPipeline {
    planner: Option<Arc<dyn ItineraryPlanner>>,
    store: Option<Arc<dyn ActivityStore>>,
}

impl ItineraryPipeline {
    /// Create the pipeline from provider handles
    #[must_use]
    pub fn new(
        planner: Option<Arc<dyn ItineraryPlanner>>,
        store: Option<Arc<dyn ActivityStore>>,
    ) -> Self {
        Self { planner, store }
    }

    /// Produce a plan for the given preferences.
    ///
    /// # Errors
    ///
    /// Fails with `MissingInput` when destination or duration are absent
    /// and with `RejectedInput` when the planner refuses the prompt. An
    /// unavailable planner never fails: the template generator stands in.
    pub async fn run(
        &self,
        input: ItineraryInput,
        caller_id: Option<&str>,
    ) -> Result<ItineraryPlan, PipelineError> {
        if input.destination.trim().is_empty() {
            return Err(PipelineError::MissingInput("destination".to_string()));
        }
        if input.duration_days == 0 {
            return Err(PipelineError::MissingInput("duration".to_string()));
        }

        let request = ItineraryRequest {
            destination: input.destination.trim().to_string(),
            duration_days: input.duration_days,
            interests: input
                .interests
                .iter()
                .map(|i| i.trim().to_lowercase())
                .filter(|i| !i.is_empty())
                .collect(),
            budget: input.budget.unwrap_or(DEFAULT_BUDGET),
            group_size: input.group_size.unwrap_or(DEFAULT_GROUP_SIZE),
            arrival_date: input.arrival_date,
            extra_preferences: input.extra_preferences,
        };

        let plan = match self.planner.as_deref() {
            None => {
                info!("Planner not configured, using template itinerary");
                fallback::template_itinerary(&request)
            }
            Some(planner) => match planner.draft(&request).await {
                Ok(text) => match parse_drafted_plan(&text, request.duration_days) {
                    Some(plan) => plan,
                    None => {
                        warn!("Drafted plan unusable, using template itinerary");
                        fallback::template_itinerary(&request)
                    }
                },
                Err(ProviderError::Unavailable(reason)) => {
                    warn!(reason = %reason, "Planner unavailable, using template itinerary");
                    fallback::template_itinerary(&request)
                }
                Err(e @ ProviderError::RejectedInput(_)) => return Err(e.into()),
            },
        };

        log_activity(self.store.as_ref(), caller_id, Capability::Itinerary, &plan);
        Ok(plan)
    }
}

/// Parse the model's output into a plan, accepting it only when the day
/// count matches the request.
fn parse_drafted_plan(text: &str, expected_days: u32) -> Option<ItineraryPlan> {
    let stripped = strip_code_fence(text);
    let plan: ItineraryPlan = serde_json::from_str(stripped)
        .ok()
        .or_else(|| extract_braced_json(stripped).and_then(|s| serde_json::from_str(s).ok()))?;

    if plan.days.len() == expected_days as usize && plan.duration_days == expected_days {
        Some(plan)
    } else {
        None
    }
}

/// Drop a surrounding markdown code fence, with or without a language tag
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim_start();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Slice from the first '{' to the last '}' as a recovery attempt
fn extract_braced_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
