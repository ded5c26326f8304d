//! Shared application state

use crate::activity::{ActivityError, ActivityStore, MongoActivityStore};
use crate::config::Settings;
use crate::pipelines::imaging::ImagingPipeline;
use crate::pipelines::itinerary::ItineraryPipeline;
use crate::pipelines::sentiment::SentimentPipeline;
use crate::pipelines::voice::VoicePipeline;
use crate::providers::generative::GeminiPlanner;
use crate::providers::sentiment::CloudSentiment;
use crate::providers::speech::CloudSpeech;
use crate::providers::translate::CloudTranslate;
use crate::providers::uploads::S3MediaStore;
use crate::providers::vision::CloudVision;
use crate::providers::{
    ItineraryPlanner, SentimentProvider, SpeechProvider, TranslationProvider, UploadStore,
    VisionProvider,
};
use std::sync::Arc;
use tracing::warn;

/// Shared handles for all routes; cheap to clone
#[derive(Clone)]
pub struct AppState {
    /// Voice translation orchestrator
    pub voice: Arc<VoicePipeline>,
    /// Image upload, landmark, and OCR orchestrator
    pub imaging: Arc<ImagingPipeline>,
    /// Itinerary generation orchestrator
    pub itinerary: Arc<ItineraryPipeline>,
    /// Sentiment analysis orchestrator
    pub sentiment: Arc<SentimentPipeline>,
    /// Speech adapter, used directly by the synthesis route
    pub speech: Option<Arc<dyn SpeechProvider>>,
    /// Activity store for the history route
    pub store: Option<Arc<dyn ActivityStore>>,
    /// Per-capability record cap for history responses
    pub history_limit: i64,
}

impl AppState {
    /// Wire providers from settings and assemble the pipelines.
    ///
    /// Each provider is constructed only when its credential is usable;
    /// missing or placeholder credentials leave the slot empty and the
    /// pipelines fall back per capability.
    ///
    /// # Errors
    ///
    /// Fails only when a MongoDB URL is configured but unreachable.
    pub async fn new(settings: &Settings) -> Result<Self, ActivityError> {
        let cloud_key = settings.usable_cloud_api_key().map(str::to_string);
        if cloud_key.is_none() {
            warn!("CLOUD_API_KEY not usable; vision/translation/speech/sentiment run on fallbacks");
        }

        let vision: Option<Arc<dyn VisionProvider>> = cloud_key
            .clone()
            .map(|key| Arc::new(CloudVision::new(key)) as Arc<dyn VisionProvider>);
        let translator: Option<Arc<dyn TranslationProvider>> = cloud_key
            .clone()
            .map(|key| Arc::new(CloudTranslate::new(key)) as Arc<dyn TranslationProvider>);
        let speech: Option<Arc<dyn SpeechProvider>> = cloud_key
            .clone()
            .map(|key| Arc::new(CloudSpeech::new(key)) as Arc<dyn SpeechProvider>);
        let sentiment: Option<Arc<dyn SentimentProvider>> =
            cloud_key.map(|key| Arc::new(CloudSentiment::new(key)) as Arc<dyn SentimentProvider>);

        let planner: Option<Arc<dyn ItineraryPlanner>> = settings
            .usable_gemini_api_key()
            .map(|key| Arc::new(GeminiPlanner::new(key.to_string())) as Arc<dyn ItineraryPlanner>);
        if planner.is_none() {
            warn!("GEMINI_API_KEY not usable; itineraries come from the template generator");
        }

        let uploads: Option<Arc<dyn UploadStore>> = S3MediaStore::from_settings(settings)
            .await
            .map(|store| Arc::new(store) as Arc<dyn UploadStore>);
        if uploads.is_none() {
            warn!("S3 storage not configured; combined image analysis disabled");
        }

        let store: Option<Arc<dyn ActivityStore>> = MongoActivityStore::connect(settings)
            .await?
            .map(|store| Arc::new(store) as Arc<dyn ActivityStore>);

        Ok(Self {
            voice: Arc::new(VoicePipeline::new(
                speech.clone(),
                translator.clone(),
                store.clone(),
            )),
            imaging: Arc::new(ImagingPipeline::new(
                vision,
                translator,
                uploads,
                store.clone(),
            )),
            itinerary: Arc::new(ItineraryPipeline::new(planner, store.clone())),
            sentiment: Arc::new(SentimentPipeline::new(sentiment, store.clone())),
            speech,
            store,
            history_limit: settings.history_limit,
        })
    }
}
