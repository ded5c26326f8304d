//! Image orchestrators: landmark detection, OCR, and combined
//! upload + analyze
//!
//! Detection capabilities never present "nothing found" as an error. In
//! the combined pipeline the three branches run concurrently and settle
//! independently: landmark/OCR failures are downgraded in place to empty
//! results, only an upload failure aborts the request.

use super::{log_activity, translate_with_fallback, PipelineError};
use crate::activity::ActivityStore;
use crate::media::{self, ImageProfile};
use crate::providers::{ProviderError, UploadStore, VisionProvider};
use crate::types::{Capability, LandmarkMatch, OcrResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Maximum landmark matches requested per detection call
const MAX_LANDMARK_RESULTS: u32 = 5;

/// Outcome of a standalone landmark detection
#[derive(Debug, Clone, Serialize)]
pub struct LandmarkReport {
    /// Recognized landmarks, possibly empty
    pub landmarks: Vec<LandmarkMatch>,
    /// Convenience flag derived from `landmarks`
    pub has_landmarks: bool,
}

/// Aggregate outcome of the combined upload + analyze pipeline
#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysisReport {
    /// Public URL of the stored image
    pub image_url: String,
    /// Recognized landmarks, possibly empty
    pub landmarks: Vec<LandmarkMatch>,
    /// Convenience flag derived from `landmarks`
    pub has_landmarks: bool,
    /// Extracted and translated text, possibly empty
    pub ocr: OcrResult,
    /// Convenience flag derived from `ocr.extracted_text`
    pub has_text: bool,
}

/// Orchestrator for the image-centric capabilities
pub struct ImagingPipeline {
    vision: Option<Arc<dyn VisionProvider>>,
    translator: Option<Arc<dyn crate::providers::TranslationProvider>>,
    uploads: Option<Arc<dyn UploadStore>>,
    store: Option<Arc<dyn ActivityStore>>,
}

impl ImagingPipeline {
    /// Create the pipeline from provider handles
    #[must_use]
    pub fn new(
        vision: Option<Arc<dyn VisionProvider>>,
        translator: Option<Arc<dyn crate::providers::TranslationProvider>>,
        uploads: Option<Arc<dyn UploadStore>>,
        store: Option<Arc<dyn ActivityStore>>,
    ) -> Self {
        Self {
            vision,
            translator,
            uploads,
            store,
        }
    }

    /// Standalone landmark detection over a base64 image.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidMedia` when the payload cannot be decoded and
    /// with `RejectedInput` when the provider refuses the image. An
    /// unavailable provider yields an empty report instead of an error.
    pub async fn landmarks(
        &self,
        image_base64: &str,
        caller_id: Option<&str>,
    ) -> Result<LandmarkReport, PipelineError> {
        let image = media::normalize_image(image_base64, ImageProfile::DETECTION)?;

        let landmarks = match self.vision.as_deref() {
            None => Vec::new(),
            Some(vision) => match vision.detect_landmarks(image, MAX_LANDMARK_RESULTS).await {
                Ok(landmarks) => landmarks,
                Err(ProviderError::Unavailable(reason)) => {
                    warn!(reason = %reason, "Landmark provider unavailable, returning empty result");
                    Vec::new()
                }
                Err(e @ ProviderError::RejectedInput(_)) => return Err(e.into()),
            },
        };

        let report = LandmarkReport {
            has_landmarks: !landmarks.is_empty(),
            landmarks,
        };

        log_activity(
            self.store.as_ref(),
            caller_id,
            Capability::LandmarkDetection,
            &report,
        );
        Ok(report)
    }

    /// Standalone OCR over a base64 image, translating any extracted text.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidMedia` when the payload cannot be decoded and
    /// with `RejectedInput` when a provider refuses the input.
    pub async fn ocr(
        &self,
        image_base64: &str,
        target_language: &str,
        caller_id: Option<&str>,
    ) -> Result<OcrResult, PipelineError> {
        let image = media::normalize_image(image_base64, ImageProfile::OCR)?;
        let result = self.extract_and_translate(image, target_language).await?;

        log_activity(
            self.store.as_ref(),
            caller_id,
            Capability::TextExtraction,
            &result,
        );
        Ok(result)
    }

    /// Detect text and, only when non-empty, translate it.
    ///
    /// Invariant: an empty or whitespace-only extraction short-circuits
    /// with an empty translation and no translation call.
    async fn extract_and_translate(
        &self,
        image: Vec<u8>,
        target_language: &str,
    ) -> Result<OcrResult, PipelineError> {
        let Some(vision) = self.vision.as_deref() else {
            return Ok(OcrResult::empty());
        };

        let annotation = match vision.detect_text(image).await {
            Ok(annotation) => annotation,
            Err(ProviderError::Unavailable(reason)) => {
                warn!(reason = %reason, "Text detection unavailable, returning empty result");
                return Ok(OcrResult::empty());
            }
            Err(e @ ProviderError::RejectedInput(_)) => return Err(e.into()),
        };

        let extracted = annotation.text.trim().to_string();
        if extracted.is_empty() {
            return Ok(OcrResult {
                extracted_text: String::new(),
                translated_text: String::new(),
                confidence: annotation.confidence,
            });
        }

        let translation = translate_with_fallback(
            self.translator.as_deref(),
            &extracted,
            "auto",
            target_language,
        )
        .await?;

        Ok(OcrResult {
            extracted_text: extracted,
            translated_text: translation.translated_text,
            confidence: annotation.confidence,
        })
    }

    /// Combined pipeline: normalize once, then upload, landmark-detect,
    /// and OCR concurrently.
    ///
    /// Landmark and OCR branch failures of any kind are swallowed into
    /// empty results so one provider's outage cannot block the others;
    /// an upload failure is fatal to the whole request.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidMedia` when the bytes do not decode as an image
    /// and with `Unavailable` when storage is unconfigured or the upload
    /// fails.
    pub async fn analyze(
        &self,
        image_bytes: &[u8],
        target_language: &str,
        caller_id: Option<&str>,
    ) -> Result<ImageAnalysisReport, PipelineError> {
        let normalized = media::normalize_image_bytes(image_bytes, ImageProfile::OCR)?;

        let uploads = self.uploads.as_ref().ok_or_else(|| {
            ProviderError::Unavailable("upload storage not configured".to_string())
        })?;

        let upload_branch = uploads.store_image(normalized.clone(), "image/jpeg");

        let landmark_branch = async {
            match self.vision.as_deref() {
                None => Vec::new(),
                Some(vision) => match vision
                    .detect_landmarks(normalized.clone(), MAX_LANDMARK_RESULTS)
                    .await
                {
                    Ok(landmarks) => landmarks,
                    Err(e) => {
                        warn!(error = %e, "Landmark branch failed, using empty result");
                        Vec::new()
                    }
                },
            }
        };

        let ocr_branch = async {
            match self
                .extract_and_translate(normalized.clone(), target_language)
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    warn!(error = %e, "OCR branch failed, using empty result");
                    OcrResult::empty()
                }
            }
        };

        let (upload_result, landmarks, ocr) =
            tokio::join!(upload_branch, landmark_branch, ocr_branch);
        let image_url = upload_result.map_err(PipelineError::Provider)?;

        let report = ImageAnalysisReport {
            image_url,
            has_landmarks: !landmarks.is_empty(),
            landmarks,
            has_text: !ocr.extracted_text.is_empty(),
            ocr,
        };

        log_activity(
            self.store.as_ref(),
            caller_id,
            Capability::ImageAnalysis,
            &report,
        );
        Ok(report)
    }
}
