//! Merged activity history reader
//!
//! Fetches the caller's recent records across every capability collection
//! and merges them into one report, each slice independently capped and
//! sorted newest first.

use crate::activity::{ActivityError, ActivityStore};
use crate::types::Capability;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// The caller's recent activity across all capabilities
#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    /// Caller the history belongs to
    pub caller_id: String,
    /// Per-capability entry lists, keyed by collection name
    pub activities: Map<String, Value>,
    /// Total entries across all capabilities
    pub total_activities: usize,
}

/// Read the caller's merged history, newest first per capability.
///
/// # Errors
///
/// Propagates the first store error; a partially merged report is never
/// returned.
pub async fn merged_history(
    store: &dyn ActivityStore,
    caller_id: &str,
    limit: i64,
) -> Result<HistoryReport, ActivityError> {
    let mut activities = Map::new();
    let mut total_activities = 0;

    for capability in Capability::ALL {
        let records = store.recent(capability, caller_id, limit).await?;
        total_activities += records.len();

        let entries: Vec<Value> = records
            .into_iter()
            .map(|record| {
                let timestamp = record
                    .timestamp
                    .try_to_rfc3339_string()
                    .unwrap_or_default();
                serde_json::json!({
                    "timestamp": timestamp,
                    "data": record.payload.into_relaxed_extjson(),
                })
            })
            .collect();

        activities.insert(capability.collection().to_string(), Value::Array(entries));
    }

    debug!(caller_id, total_activities, "Merged history assembled");

    Ok(HistoryReport {
        caller_id: caller_id.to_string(),
        activities,
        total_activities,
    })
}
