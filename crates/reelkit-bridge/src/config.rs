use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Base URLs of the two external services the application talks to.
///
/// The scraper service owns `/scrape`, `/local-downloads` and
/// `/download/{filename}`; the media service owns `/convert-to-mp4` and
/// `/overlay-video/`. They are deployed separately and therefore configured
/// separately.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointsConfig {
    /// Base URL of the scraper service.
    pub scraper_base_url: String,
    /// Base URL of the media (convert/overlay) service.
    pub media_base_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            scraper_base_url: "http://127.0.0.1:8000".to_owned(),
            media_base_url: "http://127.0.0.1:8001".to_owned(),
        }
    }
}

/// Optional static credential headers attached to scraper-service calls.
///
/// The scraper service forwards these to the upstream content platform; all
/// of them may be left unset when the service is deployed with its own
/// credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// Value for the `Client-ID` header.
    pub client_id: Option<String>,
    /// Value for the `Client-Secret` header.
    pub client_secret: Option<String>,
    /// Value for the `User-Agent` header.
    pub user_agent: Option<String>,
}

impl CredentialsConfig {
    /// Returns `true` when no credential header is configured at all.
    pub fn is_empty(&self) -> bool {
        self.client_id.is_none() && self.client_secret.is_none() && self.user_agent.is_none()
    }
}

/// Configuration for the webcam/microphone capture pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// Platform-specific identifier of the camera input, if the default
    /// device should not be used (e.g. `/dev/video1` on Linux).
    pub video_input: Option<String>,
    /// Platform-specific identifier of the microphone input, if the default
    /// device should not be used.
    pub audio_input: Option<String>,
    /// Requested capture frame width in pixels.
    pub frame_width: u32,
    /// Requested capture frame height in pixels.
    pub frame_height: u32,
    /// Requested capture frame rate in frames per second.
    pub frame_rate: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            video_input: None,
            audio_input: None,
            frame_width: 500,
            frame_height: 500,
            frame_rate: 30,
        }
    }
}

/// Global application configuration.
///
/// The scalar field stays ahead of the nested tables so the TOML rendering
/// of the file is valid.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Directory where finished recordings, fetched media and processed
    /// videos are written. Falls back to the platform download directory
    /// when unset.
    pub downloads_dir: Option<PathBuf>,
    /// Base URLs of the external services.
    pub endpoints: EndpointsConfig,
    /// Optional credential headers for scraper-service calls.
    pub credentials: CredentialsConfig,
    /// Configuration for the capture pipeline.
    pub capture: CaptureConfig,
}
