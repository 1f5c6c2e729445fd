use serde::Deserialize;

/// References returned by the media service after a successful
/// convert-and-store upload. All fields are supplied by the backend and
/// treated as read-only by the UI.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteLinks {
    /// Opaque identifier of the stored file in the remote store.
    pub file_id: String,
    /// URL for viewing the stored file in a browser.
    pub view_url: String,
    /// URL for downloading the stored file directly.
    pub download_url: String,
    /// Optional human-readable status message from the service.
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_response_deserializes() {
        let body = r#"{
            "download_url": "https://drive.google.com/uc?export=download&id=abc",
            "view_url": "https://drive.google.com/file/d/abc/view",
            "file_id": "abc",
            "message": "File successfully converted and uploaded to Google Drive"
        }"#;
        let links: RemoteLinks = serde_json::from_str(body).expect("valid links body");
        assert_eq!(links.file_id, "abc");
        assert!(links.download_url.contains("export=download"));
        assert!(links.message.is_some());
    }
}
