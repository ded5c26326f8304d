//! Media payload normalization
//!
//! Decodes base64 image/audio payloads (with or without a data-URL prefix)
//! and re-encodes images into a bounded JPEG to cap downstream provider
//! cost and latency. Audio passes through untranscoded; producing a
//! provider-compatible encoding is the caller's responsibility.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;
use tracing::debug;

/// Errors raised while normalizing a media payload
#[derive(Debug, Error)]
pub enum MediaError {
    /// Payload could not be decoded as the declared media kind
    #[error("invalid {kind} payload: {reason}")]
    InvalidMedia {
        /// Declared media kind ("image" or "audio")
        kind: &'static str,
        /// Why decoding failed
        reason: String,
    },
}

/// Size and quality bounds for image re-encoding
#[derive(Debug, Clone, Copy)]
pub struct ImageProfile {
    /// Maximum output width in pixels
    pub max_width: u32,
    /// Maximum output height in pixels
    pub max_height: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl ImageProfile {
    /// Bounds for landmark-detection-oriented calls
    pub const DETECTION: Self = Self {
        max_width: 800,
        max_height: 600,
        jpeg_quality: 80,
    };

    /// Larger bounds for OCR-oriented calls, where fine text matters
    pub const OCR: Self = Self {
        max_width: 1024,
        max_height: 1024,
        jpeg_quality: 85,
    };
}

/// Strip a `data:<mime>;base64,` prefix if present, returning the raw base64
fn strip_data_url_prefix(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with("data:") {
        match trimmed.split_once(',') {
            Some((_, rest)) => rest,
            None => trimmed,
        }
    } else {
        trimmed
    }
}

fn decode_base64(raw: &str, kind: &'static str) -> Result<Vec<u8>, MediaError> {
    BASE64
        .decode(strip_data_url_prefix(raw))
        .map_err(|e| MediaError::InvalidMedia {
            kind,
            reason: e.to_string(),
        })
}

/// Decode a base64 image payload and re-encode it as a bounded JPEG.
///
/// The image is downscaled to fit the profile's bounding box (aspect ratio
/// preserved, never upscaled) and re-encoded at the profile's fixed
/// quality. The input is never mutated.
///
/// # Errors
///
/// Returns `MediaError::InvalidMedia` when the payload is not valid base64
/// or does not decode as an image.
pub fn normalize_image(raw: &str, profile: ImageProfile) -> Result<Vec<u8>, MediaError> {
    let bytes = decode_base64(raw, "image")?;
    normalize_image_bytes(&bytes, profile)
}

/// Normalize already-decoded image bytes (multipart uploads skip base64).
///
/// # Errors
///
/// Returns `MediaError::InvalidMedia` when the bytes do not decode as an image.
pub fn normalize_image_bytes(bytes: &[u8], profile: ImageProfile) -> Result<Vec<u8>, MediaError> {
    let img = image::load_from_memory(bytes).map_err(|e| MediaError::InvalidMedia {
        kind: "image",
        reason: e.to_string(),
    })?;

    let (w, h) = (img.width(), img.height());
    let resized = if w > profile.max_width || h > profile.max_height {
        img.resize(profile.max_width, profile.max_height, FilterType::Triangle)
    } else {
        img
    };

    debug!(
        original_w = w,
        original_h = h,
        out_w = resized.width(),
        out_h = resized.height(),
        "Normalized image"
    );

    let rgb = resized.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, profile.jpeg_quality)
        .encode_image(&rgb)
        .map_err(|e| MediaError::InvalidMedia {
            kind: "image",
            reason: format!("re-encode failed: {e}"),
        })?;
    Ok(out)
}

/// Decode a base64 audio payload, stripping any data-URL prefix.
///
/// No transcoding is performed.
///
/// # Errors
///
/// Returns `MediaError::InvalidMedia` when the payload is not valid base64.
pub fn normalize_audio(raw: &str) -> Result<Vec<u8>, MediaError> {
    let bytes = decode_base64(raw, "audio")?;
    if bytes.is_empty() {
        return Err(MediaError::InvalidMedia {
            kind: "audio",
            reason: "empty payload".to_string(),
        });
    }
    Ok(bytes)
}
