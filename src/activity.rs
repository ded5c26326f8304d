//! Activity log writer and store
//!
//! Every successful orchestration appends one normalized record to its
//! capability's collection, tagged with the caller id and a timestamp.
//! Records are never mutated; the history reader fetches them back in
//! reverse-chronological capped batches.

use crate::config::Settings;
use crate::types::{Capability, ANONYMOUS_CALLER};
use bson::{doc, Bson};
use mongodb::{Client, Database};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while reading or writing activity records
#[derive(Debug, Error)]
pub enum ActivityError {
    /// MongoDB driver error
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    /// BSON serialization error
    #[error("bson error: {0}")]
    Bson(#[from] bson::ser::Error),
}

/// A normalized, persisted outcome of one successful orchestration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Caller identity, or the "anonymous" sentinel
    pub caller_id: String,
    /// Which capability produced this record
    pub capability: Capability,
    /// When the orchestration completed
    pub timestamp: bson::DateTime,
    /// The capability's normalized result
    pub payload: Bson,
}

impl ActivityRecord {
    /// Build a record timestamped now.
    ///
    /// # Errors
    ///
    /// Returns `ActivityError::Bson` if the payload cannot be serialized.
    pub fn new<T: Serialize>(
        caller_id: Option<&str>,
        capability: Capability,
        payload: &T,
    ) -> Result<Self, ActivityError> {
        Ok(Self {
            caller_id: caller_id.unwrap_or(ANONYMOUS_CALLER).to_string(),
            capability,
            timestamp: bson::DateTime::now(),
            payload: bson::to_bson(payload)?,
        })
    }
}

/// Interface for the activity persistence collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ActivityStore: Send + Sync {
    /// Append one record to its capability's collection
    async fn append(&self, record: ActivityRecord) -> Result<(), ActivityError>;

    /// Fetch up to `limit` of the caller's most recent records for one
    /// capability, newest first
    async fn recent(
        &self,
        capability: Capability,
        caller_id: &str,
        limit: i64,
    ) -> Result<Vec<ActivityRecord>, ActivityError>;
}

/// MongoDB-backed activity store
pub struct MongoActivityStore {
    db: Database,
}

impl MongoActivityStore {
    /// Connect to MongoDB and verify the connection with a ping.
    ///
    /// Returns `None` when no connection string is configured.
    ///
    /// # Errors
    ///
    /// Returns a driver error when the configured server is unreachable.
    pub async fn connect(settings: &Settings) -> Result<Option<Self>, ActivityError> {
        let Some(url) = settings.mongodb_url.as_ref() else {
            warn!("MONGODB_URL not configured; activity logging disabled");
            return Ok(None);
        };

        let client = Client::with_uri_str(url).await?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!(db = %settings.mongodb_db, "Connected to MongoDB");

        Ok(Some(Self {
            db: client.database(&settings.mongodb_db),
        }))
    }
}

#[async_trait::async_trait]
impl ActivityStore for MongoActivityStore {
    async fn append(&self, record: ActivityRecord) -> Result<(), ActivityError> {
        self.db
            .collection::<ActivityRecord>(record.capability.collection())
            .insert_one(&record)
            .await?;
        Ok(())
    }

    async fn recent(
        &self,
        capability: Capability,
        caller_id: &str,
        limit: i64,
    ) -> Result<Vec<ActivityRecord>, ActivityError> {
        use futures_util::TryStreamExt;

        let mut cursor = self
            .db
            .collection::<ActivityRecord>(capability.collection())
            .find(doc! { "caller_id": caller_id })
            .sort(doc! { "timestamp": -1 })
            .limit(limit)
            .await?;

        let mut records = Vec::new();
        while let Some(record) = cursor.try_next().await? {
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_defaults_to_anonymous() {
        let record = ActivityRecord::new(None, Capability::Sentiment, &serde_json::json!({"s": 1}))
            .expect("record builds");
        assert_eq!(record.caller_id, ANONYMOUS_CALLER);
        assert_eq!(record.capability, Capability::Sentiment);
    }

    #[test]
    fn test_record_payload_round_trips_typed_results() {
        let score = crate::types::SentimentScore::from_raw(0.5, 1.0);
        let record = ActivityRecord::new(Some("user-1"), Capability::Sentiment, &score)
            .expect("record builds");
        let doc = record.payload.as_document().expect("payload is a document");
        assert!((doc.get_f64("score").unwrap_or_default() - 0.5).abs() < 1e-6);
        assert_eq!(doc.get_str("label").unwrap_or_default(), "positive");
    }
}
