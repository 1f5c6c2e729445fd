//! Shared plumbing for calls against the external services.
//!
//! Both services speak multipart/JSON over HTTP, and both report failures in
//! one of two shapes: a non-success status with a `detail` body (framework
//! errors), or a `200` whose body carries an `error` field (application
//! errors). The helpers here normalize either shape into [`ApiError`] so the
//! service handlers only deal with one error path.

use reelkit_bridge::config::CredentialsConfig;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// A failed call against one of the external services.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service reported a failure and provided its own message.
    #[error("{0}")]
    Service(String),
    /// The request could not be completed at the transport level.
    #[error("request failed: {0}")]
    Transport(String),
    /// The service answered, but the body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        // The URL carries query parameters like folder paths; strip it the
        // same way the rest of the app reports transport errors.
        Self::Transport(error.without_url().to_string())
    }
}

/// Joins a configured base URL and an endpoint path, tolerating trailing
/// slashes in the configuration.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Attaches the configured static credential headers, when present.
pub fn with_credentials(
    mut request: reqwest::RequestBuilder,
    credentials: &CredentialsConfig,
) -> reqwest::RequestBuilder {
    if let Some(client_id) = &credentials.client_id {
        request = request.header("Client-ID", client_id);
    }
    if let Some(client_secret) = &credentials.client_secret {
        request = request.header("Client-Secret", client_secret);
    }
    if let Some(user_agent) = &credentials.user_agent {
        request = request.header("User-Agent", user_agent);
    }
    request
}

#[derive(Debug, Deserialize)]
struct ServiceFailure {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ServiceFailure {
    fn message(self) -> Option<String> {
        self.detail.or(self.error)
    }
}

/// Extracts the service-provided failure message from a response body, or
/// produces a generic message carrying the status code.
pub fn failure_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ServiceFailure>(body)
        .ok()
        .and_then(ServiceFailure::message)
        .unwrap_or_else(|| format!("the service returned status {status}"))
}

/// Decodes a success body, treating an embedded `error` field as failure.
///
/// The scraper service reports application errors (bad filters, upstream
/// failures) with a `200` status and an error body, so a success status is
/// not enough to start deserializing the expected shape.
pub fn decode_reply<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    if let Ok(failure) = serde_json::from_str::<ServiceFailure>(body)
        && let Some(message) = failure.message()
    {
        return Err(ApiError::Service(message));
    }
    serde_json::from_str(body).map_err(|error| ApiError::MalformedResponse(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelkit_bridge::scrape::LocalFolderListing;

    #[test]
    fn endpoint_joins_tolerate_slashes() {
        assert_eq!(
            endpoint("http://127.0.0.1:8000", "scrape"),
            "http://127.0.0.1:8000/scrape"
        );
        assert_eq!(
            endpoint("http://127.0.0.1:8000/", "/overlay-video/"),
            "http://127.0.0.1:8000/overlay-video/"
        );
    }

    #[test]
    fn failure_message_prefers_the_service_detail() {
        let status = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(
            failure_message(status, r#"{"detail": "FFmpeg is not installed on the server"}"#),
            "FFmpeg is not installed on the server"
        );
        assert_eq!(
            failure_message(status, r#"{"error": "Invalid folder path"}"#),
            "Invalid folder path"
        );
        assert_eq!(
            failure_message(status, "<html>gateway timeout</html>"),
            "the service returned status 500 Internal Server Error"
        );
    }

    #[test]
    fn decode_reply_surfaces_embedded_errors() {
        let result = decode_reply::<LocalFolderListing>(
            r#"{"error": "Please provide a local folder path to save files"}"#,
        );
        match result {
            Err(ApiError::Service(message)) => {
                assert_eq!(message, "Please provide a local folder path to save files");
            }
            other => panic!("expected a service error, got {other:?}"),
        }
    }

    #[test]
    fn decode_reply_parses_the_expected_shape() {
        let listing: LocalFolderListing = decode_reply(
            r#"{"folder": "/tmp/media", "files": [{"name": "a.jpg", "path": "/tmp/media/a.jpg", "size": 123, "created": "2024-01-01 10:00:00"}]}"#,
        )
        .expect("valid listing body");
        assert_eq!(listing.folder, "/tmp/media");
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].size, 123);
    }

    #[test]
    fn decode_reply_rejects_malformed_bodies() {
        let result = decode_reply::<LocalFolderListing>(r#"{"folder": 42}"#);
        assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
    }
}
