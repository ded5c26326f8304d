//! HTTP utilities shared by provider adapters
//!
//! Centralizes request sending and status-to-error mapping so every
//! adapter classifies failures the same way: 4xx input problems become
//! `RejectedInput`, everything transient (network, auth, quota, 5xx)
//! becomes `Unavailable`.

use super::ProviderError;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Default timeout for provider HTTP calls
const PROVIDER_HTTP_TIMEOUT_SECS: u64 = 30;

/// Creates an HTTP client configured with the standard provider timeout.
///
/// Prevents infinite hangs when a vendor API is slow or unresponsive.
#[must_use]
pub fn create_http_client() -> HttpClient {
    let timeout = Duration::from_secs(
        std::env::var("PROVIDER_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(PROVIDER_HTTP_TIMEOUT_SECS),
    );
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| HttpClient::new())
}

/// Sends an HTTP POST request with a JSON body and returns the parsed JSON
/// response, mapping failures into the provider error taxonomy.
///
/// # Errors
///
/// Returns `ProviderError::RejectedInput` for 400/404/413/415/422 statuses
/// and `ProviderError::Unavailable` for network failures and all other
/// non-success statuses (auth, quota, 5xx).
pub async fn send_json_request(
    client: &HttpClient,
    url: &str,
    body: &Value,
) -> Result<Value, ProviderError> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| ProviderError::Unavailable(format!("network error: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        let message = clean_error_text(status, &error_text);

        return Err(if is_input_rejection(status) {
            ProviderError::RejectedInput(message)
        } else {
            ProviderError::Unavailable(message)
        });
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::Unavailable(format!("malformed provider response: {e}")))
}

fn is_input_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST
            | StatusCode::NOT_FOUND
            | StatusCode::PAYLOAD_TOO_LARGE
            | StatusCode::UNSUPPORTED_MEDIA_TYPE
            | StatusCode::UNPROCESSABLE_ENTITY
    )
}

fn clean_error_text(status: StatusCode, error_text: &str) -> String {
    // Detect HTML error pages from proxies
    let trimmed = error_text.trim_start();
    let is_html = trimmed.starts_with("<!DOCTYPE")
        || trimmed.starts_with("<html")
        || trimmed.starts_with("<HTML");

    if is_html {
        // Don't include raw HTML in error messages
        return format!("API error: {status} (server returned HTML error page)");
    }

    // Truncate very long error bodies, backing off to a char boundary so
    // multi-byte vendor text cannot split mid-character
    let truncated = if error_text.len() > 500 {
        let cut = (0..=500)
            .rev()
            .find(|i| error_text.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... (truncated)", &error_text[..cut])
    } else {
        error_text.to_string()
    };
    format!("API error: {status} - {truncated}")
}

/// Extracts string content from a JSON response by navigating a path of
/// keys and numeric indices.
///
/// # Errors
///
/// Returns `ProviderError::Unavailable` if the path is missing or the
/// target is not a string, since that means the vendor response did not
/// have the shape this adapter was built against.
pub fn extract_text_content(response: &Value, path: &[&str]) -> Result<String, ProviderError> {
    let mut current = response;

    for segment in path {
        current = if let Ok(index) = segment.parse::<usize>() {
            current.get(index)
        } else {
            current.get(*segment)
        }
        .ok_or_else(|| {
            ProviderError::Unavailable(format!("unexpected response shape: missing {segment}"))
        })?;
    }

    current
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| {
            ProviderError::Unavailable(format!("expected string at path, got: {current:?}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_text_content_paths() {
        let v = json!({"choices": [{"message": {"content": "hi"}}]});
        let text = extract_text_content(&v, &["choices", "0", "message", "content"])
            .expect("path resolves");
        assert_eq!(text, "hi");

        assert!(extract_text_content(&v, &["choices", "1", "message"]).is_err());
        assert!(extract_text_content(&v, &["choices", "0", "message"]).is_err());
    }

    #[test]
    fn test_html_error_pages_are_not_echoed() {
        let msg = clean_error_text(StatusCode::BAD_GATEWAY, "<html><body>boom</body></html>");
        assert!(!msg.contains("<body>"));
        assert!(msg.contains("502"));
    }

    #[test]
    fn test_long_error_bodies_are_truncated() {
        let msg = clean_error_text(StatusCode::INTERNAL_SERVER_ERROR, &"x".repeat(2000));
        assert!(msg.contains("... (truncated)"));
        assert!(msg.len() < 600);
    }

    #[test]
    fn test_truncation_respects_multibyte_boundaries() {
        // A two-byte char straddling the cut offset must not split
        let body = format!("{}é{}", "x".repeat(499), "y".repeat(100));
        assert!(!body.is_char_boundary(500));
        let msg = clean_error_text(StatusCode::SERVICE_UNAVAILABLE, &body);
        assert!(msg.contains("... (truncated)"));
        assert!(msg.ends_with("... (truncated)"));
    }

    #[test]
    fn test_input_rejection_statuses() {
        assert!(is_input_rejection(StatusCode::BAD_REQUEST));
        assert!(is_input_rejection(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(!is_input_rejection(StatusCode::UNAUTHORIZED));
        assert!(!is_input_rejection(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_input_rejection(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
