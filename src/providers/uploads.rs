//! Public blob upload adapter
//!
//! Stores normalized images in an S3-compatible bucket under a fixed
//! prefix with a UUID object name, marks them publicly readable, and
//! returns the public URL. Every failure here is `Unavailable`: the input
//! was already validated by the normalizer, so nothing about it can be
//! "rejected" by storage.

use super::{ProviderError, UploadStore};
use crate::config::{Settings, UPLOAD_PREFIX};
use aws_credential_types::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use aws_types::region::Region;
use tracing::{debug, info};
use uuid::Uuid;

/// S3-backed public media store
pub struct S3MediaStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3MediaStore {
    /// Create a new media store from settings.
    ///
    /// Returns `None` when any required storage credential is missing,
    /// which downstream treats as "uploads unavailable".
    pub async fn from_settings(settings: &Settings) -> Option<Self> {
        let endpoint_url = settings.s3_endpoint_url.as_ref()?;
        let access_key = settings.s3_access_key_id.as_ref()?;
        let secret_key = settings.s3_secret_access_key.as_ref()?;
        let bucket = settings.s3_bucket_name.as_ref()?;

        let credentials = Credentials::new(access_key, secret_key, None, None, "media-store");

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new("auto"))
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .endpoint_url(endpoint_url)
            .force_path_style(true)
            .build();

        let public_base_url = settings
            .s3_public_base_url
            .clone()
            .unwrap_or_else(|| format!("{}/{}", endpoint_url.trim_end_matches('/'), bucket));

        info!(bucket = %bucket, "Media store configured");

        Some(Self {
            client: Client::from_conf(s3_config),
            bucket: bucket.clone(),
            public_base_url,
        })
    }
}

#[async_trait::async_trait]
impl UploadStore for S3MediaStore {
    async fn store_image(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ProviderError> {
        let extension = match content_type {
            "image/png" => "png",
            _ => "jpg",
        };
        let key = format!("{UPLOAD_PREFIX}/{}.{extension}", Uuid::new_v4());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("upload failed: {e}")))?;

        let url = format!("{}/{key}", self.public_base_url.trim_end_matches('/'));
        debug!(key = %key, "Image stored");
        Ok(url)
    }
}
