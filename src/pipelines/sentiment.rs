//! Sentiment analysis orchestrator
//!
//! The one pipeline with no fallback: a provider failure surfaces to the
//! caller unchanged.

use super::{log_activity, PipelineError};
use crate::activity::ActivityStore;
use crate::providers::{ProviderError, SentimentProvider};
use crate::types::{Capability, SentimentScore};
use serde::Serialize;
use std::sync::Arc;

/// Sentiment outcome plus the review it belongs to, if any
#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    /// Derived sentiment score
    #[serde(flatten)]
    pub score: SentimentScore,
    /// Review the text came from, when the caller supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
}

/// Orchestrator for the sentiment capability
pub struct SentimentPipeline {
    provider: Option<Arc<dyn SentimentProvider>>,
    store: Option<Arc<dyn ActivityStore>>,
}

impl SentimentPipeline {
    /// Create the pipeline from provider handles
    #[must_use]
    pub fn new(
        provider: Option<Arc<dyn SentimentProvider>>,
        store: Option<Arc<dyn ActivityStore>>,
    ) -> Self {
        Self { provider, store }
    }

    /// Score one piece of text.
    ///
    /// # Errors
    ///
    /// Fails with `MissingInput` for empty text and otherwise propagates
    /// the provider error; there is no local fallback for sentiment.
    pub async fn run(
        &self,
        text: &str,
        review_id: Option<String>,
        caller_id: Option<&str>,
    ) -> Result<SentimentReport, PipelineError> {
        if text.trim().is_empty() {
            return Err(PipelineError::MissingInput("text".to_string()));
        }

        let provider = self.provider.as_ref().ok_or_else(|| {
            ProviderError::Unavailable("sentiment provider not configured".to_string())
        })?;

        let score = provider.analyze(text).await?;

        let report = SentimentReport { score, review_id };
        log_activity(
            self.store.as_ref(),
            caller_id,
            Capability::Sentiment,
            &report,
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::MockActivityStore;
    use crate::providers::MockSentimentProvider;
    use crate::types::SentimentLabel;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_successful_run_appends_activity_record() {
        let mut provider = MockSentimentProvider::new();
        provider
            .expect_analyze()
            .returning(|_| Ok(crate::types::SentimentScore::from_raw(0.6, 1.2)));

        let (tx, rx) = std::sync::mpsc::channel();
        let mut store = MockActivityStore::new();
        store
            .expect_append()
            .withf(|record| {
                record.caller_id == "user-9" && record.capability == Capability::Sentiment
            })
            .times(1)
            .returning(move |_| {
                let _ = tx.send(());
                Ok(())
            });

        let pipeline = SentimentPipeline::new(Some(Arc::new(provider)), Some(Arc::new(store)));
        let report = pipeline
            .run("great trip", None, Some("user-9"))
            .await
            .expect("analysis succeeds");
        assert_eq!(report.score.label, SentimentLabel::Positive);

        // The log write runs on its own task; wait for it to land
        rx.recv_timeout(Duration::from_secs(2))
            .expect("append was invoked");
    }

    #[tokio::test]
    async fn test_empty_text_fails_before_any_provider_call() {
        let provider = MockSentimentProvider::new();
        let pipeline = SentimentPipeline::new(Some(Arc::new(provider)), None);
        let err = pipeline
            .run("   ", None, None)
            .await
            .expect_err("blank text must fail");
        assert!(matches!(err, PipelineError::MissingInput(field) if field == "text"));
    }
}
