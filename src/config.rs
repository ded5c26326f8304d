//! Configuration and settings management
//!
//! Loads settings from environment variables and configuration files, and
//! decides which provider credentials are actually usable.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Application settings loaded from environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Bind address for the HTTP server
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port for the HTTP server
    #[serde(default = "default_port")]
    pub port: u16,

    /// API key for the cloud vision/translation/speech/sentiment suite
    pub cloud_api_key: Option<String>,
    /// API key for the generative itinerary model
    pub gemini_api_key: Option<String>,

    /// MongoDB connection string for activity records
    pub mongodb_url: Option<String>,
    /// MongoDB database name
    #[serde(default = "default_mongodb_db")]
    pub mongodb_db: String,

    /// S3 storage access key ID
    pub s3_access_key_id: Option<String>,
    /// S3 storage secret access key
    pub s3_secret_access_key: Option<String>,
    /// S3 storage endpoint URL
    pub s3_endpoint_url: Option<String>,
    /// S3 storage bucket name
    pub s3_bucket_name: Option<String>,
    /// Public base URL for uploaded objects (defaults to endpoint/bucket)
    pub s3_public_base_url: Option<String>,

    /// Maximum records fetched per capability for the history endpoint
    #[serde(default = "default_history_limit")]
    pub history_limit: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_mongodb_db() -> String {
    "tourwise".to_string()
}

const fn default_history_limit() -> i64 {
    10
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name("config/default").required(false))
            // Add in the current environment file
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked into git
            .add_source(File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of APP)
            .add_source(Environment::with_prefix("APP").separator("__"))
            // Also add settings from environment variables directly (without prefix)
            // ignore_empty treats empty env vars as unset
            .add_source(Environment::default().ignore_empty(true))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        // Fallback: check environment variables directly if config didn't
        // pick them up. Automatic env mapping can miss these.
        if settings.s3_endpoint_url.is_none() {
            if let Ok(val) = std::env::var("S3_ENDPOINT_URL") {
                if !val.is_empty() {
                    settings.s3_endpoint_url = Some(val);
                }
            }
        }
        if settings.s3_access_key_id.is_none() {
            if let Ok(val) = std::env::var("S3_ACCESS_KEY_ID") {
                if !val.is_empty() {
                    settings.s3_access_key_id = Some(val);
                }
            }
        }
        if settings.s3_secret_access_key.is_none() {
            if let Ok(val) = std::env::var("S3_SECRET_ACCESS_KEY") {
                if !val.is_empty() {
                    settings.s3_secret_access_key = Some(val);
                }
            }
        }
        if settings.s3_bucket_name.is_none() {
            if let Ok(val) = std::env::var("S3_BUCKET_NAME") {
                if !val.is_empty() {
                    settings.s3_bucket_name = Some(val);
                }
            }
        }

        Ok(settings)
    }

    /// Returns the cloud suite API key if it is present and not a placeholder
    #[must_use]
    pub fn usable_cloud_api_key(&self) -> Option<&str> {
        usable_key(self.cloud_api_key.as_deref())
    }

    /// Returns the generative model API key if it is present and not a placeholder
    #[must_use]
    pub fn usable_gemini_api_key(&self) -> Option<&str> {
        usable_key(self.gemini_api_key.as_deref())
    }
}

fn usable_key(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !is_placeholder(k))
}

/// Returns true if the credential value is absent-in-spirit: empty or an
/// obvious template value left over from a sample configuration.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    if v.is_empty() {
        return true;
    }
    let lower = v.to_lowercase();
    lower.starts_with("your-")
        || lower.starts_with("your_")
        || lower.contains("placeholder")
        || lower.contains("changeme")
        || lower == "none"
}

/// Maximum accepted upload body size in bytes (enforced at the transport boundary)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Folder prefix for uploaded media objects
pub const UPLOAD_PREFIX: &str = "uploads";

/// Default per-person budget when the caller omits one
pub const DEFAULT_BUDGET: f64 = 500.0;

/// Default travel group size when the caller omits one
pub const DEFAULT_GROUP_SIZE: u32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
        assert!(is_placeholder("your-api-key-here"));
        assert!(is_placeholder("YOUR_API_KEY"));
        assert!(is_placeholder("sk-placeholder"));
        assert!(is_placeholder("changeme"));
        assert!(!is_placeholder("AIzaSyD4fake-but-shaped-like-a-key"));
    }

    #[test]
    fn test_usable_keys_filter_placeholders() {
        let mut settings = Settings {
            host: default_host(),
            port: default_port(),
            cloud_api_key: Some("your-api-key".to_string()),
            gemini_api_key: Some("real-key-123".to_string()),
            mongodb_url: None,
            mongodb_db: default_mongodb_db(),
            s3_access_key_id: None,
            s3_secret_access_key: None,
            s3_endpoint_url: None,
            s3_bucket_name: None,
            s3_public_base_url: None,
            history_limit: default_history_limit(),
        };

        assert!(settings.usable_cloud_api_key().is_none());
        assert_eq!(settings.usable_gemini_api_key(), Some("real-key-123"));

        settings.cloud_api_key = Some("AIza-real".to_string());
        assert_eq!(settings.usable_cloud_api_key(), Some("AIza-real"));
    }
}
