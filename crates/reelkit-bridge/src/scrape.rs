use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classification of a scraped or produced asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// The value the scrape endpoint expects in its repeated `media_types`
    /// form field. Note the plural spelling, which differs from the singular
    /// `type` discriminator used in response items.
    pub fn form_value(self) -> &'static str {
        match self {
            Self::Image => "images",
            Self::Video => "videos",
        }
    }
}

/// Sort mode applied by the scrape endpoint when walking the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// The platform's default ranking.
    #[default]
    Hot,
    /// Most recent first.
    New,
    /// Highest score first.
    Top,
    /// Currently rising.
    Rising,
}

impl SortOrder {
    /// The value the scrape endpoint expects in its `sort_by` form field.
    pub fn form_value(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
            Self::Rising => "rising",
        }
    }
}

/// Remote-storage destination for scraped files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveTarget {
    /// Folder URL within the remote store; files land in the store root when
    /// unset.
    pub folder_url: Option<String>,
}

/// Local-storage destination for scraped files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalTarget {
    /// Absolute path of the folder scraped files should be copied into.
    pub folder_path: String,
}

/// A structured filter/query configuration for one scrape submission.
///
/// Constructed by the frontend form and validated with [`ScrapeFilter::validate`]
/// before any request is issued.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeFilter {
    /// Identifier of the source collection being queried.
    pub subreddit: String,
    /// Enabled media kinds; at least one must be present.
    pub media_kinds: Vec<MediaKind>,
    /// Optional keyword set; posts must mention at least one to match.
    pub keywords: Vec<String>,
    /// Sort mode applied by the service.
    pub sort_by: SortOrder,
    /// How many posts the service should inspect.
    pub limit: u32,
    /// Minimum score a post needs to be included.
    pub min_upvotes: u32,
    /// Earliest creation date a post may have to be included.
    pub date_after: Option<NaiveDate>,
    /// Ceiling on the number of files the service should download.
    pub download_limit: Option<u32>,
    /// Remote-storage destination, when uploading is requested.
    pub drive_target: Option<DriveTarget>,
    /// Local-storage destination, when local saving is requested.
    pub local_target: Option<LocalTarget>,
}

impl Default for ScrapeFilter {
    fn default() -> Self {
        Self {
            subreddit: String::new(),
            media_kinds: vec![MediaKind::Image, MediaKind::Video],
            keywords: Vec::new(),
            sort_by: SortOrder::default(),
            limit: 25,
            min_upvotes: 0,
            date_after: None,
            download_limit: None,
            drive_target: None,
            local_target: None,
        }
    }
}

/// Client-side validation failures that block a scrape submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The source identifier was left empty.
    #[error("enter a subreddit name to scrape")]
    MissingSubreddit,
    /// The media-kind set is empty, so nothing could match.
    #[error("select at least one media type to scrape")]
    NoMediaKinds,
    /// Local saving was requested without a folder path.
    #[error("provide a local folder path to save files")]
    MissingLocalFolder,
}

impl ScrapeFilter {
    /// Checks the filter invariants that must hold before submission.
    ///
    /// A failed validation short-circuits the submission; no network request
    /// is issued for an invalid filter.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.subreddit.trim().is_empty() {
            return Err(FilterError::MissingSubreddit);
        }
        if self.media_kinds.is_empty() {
            return Err(FilterError::NoMediaKinds);
        }
        if let Some(local) = &self.local_target
            && local.folder_path.trim().is_empty()
        {
            return Err(FilterError::MissingLocalFolder);
        }
        Ok(())
    }

    /// Serializes the filter into the multipart form fields the scrape
    /// endpoint expects. Multi-valued media kinds become repeated
    /// `media_types` entries.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(12);
        fields.push(("subreddit", self.subreddit.trim().to_owned()));
        for kind in &self.media_kinds {
            fields.push(("media_types", kind.form_value().to_owned()));
        }
        fields.push(("keywords", self.keywords.join(",")));
        fields.push(("sort_by", self.sort_by.form_value().to_owned()));
        fields.push(("limit", self.limit.to_string()));
        if let Some(date) = self.date_after {
            fields.push(("date_after", date.format("%Y-%m-%d").to_string()));
        }
        fields.push(("min_upvotes", self.min_upvotes.to_string()));
        if let Some(download_limit) = self.download_limit {
            fields.push(("download_limit", download_limit.to_string()));
        }
        fields.push(("save_to_drive", self.drive_target.is_some().to_string()));
        if let Some(drive) = &self.drive_target
            && let Some(folder_url) = &drive.folder_url
            && !folder_url.trim().is_empty()
        {
            fields.push(("drive_folder_url", folder_url.trim().to_owned()));
        }
        fields.push(("save_locally", self.local_target.is_some().to_string()));
        if let Some(local) = &self.local_target {
            fields.push(("local_folder", local.folder_path.trim().to_owned()));
        }
        fields
    }
}

/// Parses a user-entered `YYYY-MM-DD` date bound for [`ScrapeFilter::date_after`].
pub fn parse_date_after(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
}

/// One scraped asset as reported by the service. Owned by the service and
/// referenced read-only by the UI.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaItem {
    /// Whether the asset is an image or a video.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Backing filename under the service's download directory; used for the
    /// by-filename download endpoint.
    pub filename: String,
    /// Title of the originating post.
    pub title: String,
    /// URL of the originating post.
    pub url: String,
    /// Score of the originating post at scrape time.
    pub score: i64,
    /// Creation date of the originating post, `YYYY-MM-DD`.
    pub created: String,
    /// Viewing link in the remote store, when the scrape uploaded the file.
    #[serde(default)]
    pub drive_link: Option<String>,
    /// Path the file was copied to, when the scrape saved it locally.
    #[serde(default)]
    pub local_path: Option<String>,
}

/// The normalized result of one successful scrape: the echoed filter
/// parameters plus the scraped item list.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeOutcome {
    pub subreddit: String,
    pub sort_by: SortOrder,
    pub media_types: Vec<String>,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub date_after: Option<String>,
    #[serde(default)]
    pub min_upvotes: i64,
    #[serde(default)]
    pub download_limit: Option<i64>,
    #[serde(default)]
    pub save_to_drive: bool,
    #[serde(default)]
    pub drive_folder_url: Option<String>,
    #[serde(default)]
    pub save_locally: bool,
    #[serde(default)]
    pub local_folder: Option<String>,
    #[serde(default)]
    pub randomized: bool,
    pub media: Vec<MediaItem>,
}

impl ScrapeOutcome {
    /// Number of scraped items classified as images.
    pub fn image_count(&self) -> usize {
        self.media
            .iter()
            .filter(|item| item.kind == MediaKind::Image)
            .count()
    }

    /// Number of scraped items classified as videos.
    pub fn video_count(&self) -> usize {
        self.media
            .iter()
            .filter(|item| item.kind == MediaKind::Video)
            .count()
    }
}

/// One file found in a local download folder.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalFileEntry {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub created: String,
}

/// Listing of files already materialized in a local download folder, as
/// returned by the follow-up read-only call after a locally-saving scrape.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalFolderListing {
    /// The folder path that was listed, echoed by the service.
    pub folder: String,
    /// Files present in the folder.
    pub files: Vec<LocalFileEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(fields: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn empty_media_kinds_are_rejected() {
        let filter = ScrapeFilter {
            subreddit: "EarthPorn".to_owned(),
            media_kinds: Vec::new(),
            ..ScrapeFilter::default()
        };
        assert_eq!(filter.validate(), Err(FilterError::NoMediaKinds));
    }

    #[test]
    fn local_save_without_folder_is_rejected() {
        let filter = ScrapeFilter {
            subreddit: "EarthPorn".to_owned(),
            local_target: Some(LocalTarget {
                folder_path: "   ".to_owned(),
            }),
            ..ScrapeFilter::default()
        };
        assert_eq!(filter.validate(), Err(FilterError::MissingLocalFolder));
    }

    #[test]
    fn blank_subreddit_is_rejected() {
        let filter = ScrapeFilter {
            subreddit: " ".to_owned(),
            ..ScrapeFilter::default()
        };
        assert_eq!(filter.validate(), Err(FilterError::MissingSubreddit));
    }

    #[test]
    fn form_fields_match_the_endpoint_contract() {
        let filter = ScrapeFilter {
            subreddit: "EarthPorn".to_owned(),
            media_kinds: vec![MediaKind::Image],
            sort_by: SortOrder::Top,
            limit: 25,
            ..ScrapeFilter::default()
        };
        assert_eq!(filter.validate(), Ok(()));

        let fields = filter.form_fields();
        assert_eq!(field(&fields, "subreddit"), Some("EarthPorn"));
        assert_eq!(field(&fields, "media_types"), Some("images"));
        assert_eq!(field(&fields, "sort_by"), Some("top"));
        assert_eq!(field(&fields, "limit"), Some("25"));
        assert_eq!(field(&fields, "save_to_drive"), Some("false"));
        assert_eq!(field(&fields, "save_locally"), Some("false"));
        assert_eq!(field(&fields, "date_after"), None);
        assert_eq!(field(&fields, "download_limit"), None);
    }

    #[test]
    fn every_enabled_kind_becomes_a_repeated_field() {
        let filter = ScrapeFilter {
            subreddit: "aww".to_owned(),
            media_kinds: vec![MediaKind::Image, MediaKind::Video],
            ..ScrapeFilter::default()
        };
        let values: Vec<&str> = filter
            .form_fields()
            .into_iter()
            .filter(|(key, _)| *key == "media_types")
            .map(|(_, value)| {
                match value.as_str() {
                    "images" => "images",
                    "videos" => "videos",
                    other => panic!("unexpected media_types value: {other}"),
                }
            })
            .collect();
        assert_eq!(values, vec!["images", "videos"]);
    }

    #[test]
    fn optional_fields_serialize_when_present() {
        let filter = ScrapeFilter {
            subreddit: "aww".to_owned(),
            keywords: vec!["cat".to_owned(), "dog".to_owned()],
            date_after: NaiveDate::from_ymd_opt(2024, 2, 29),
            download_limit: Some(5),
            drive_target: Some(DriveTarget {
                folder_url: Some("https://drive.google.com/drive/folders/abc123".to_owned()),
            }),
            local_target: Some(LocalTarget {
                folder_path: "/tmp/media".to_owned(),
            }),
            ..ScrapeFilter::default()
        };

        let fields = filter.form_fields();
        assert_eq!(field(&fields, "keywords"), Some("cat,dog"));
        assert_eq!(field(&fields, "date_after"), Some("2024-02-29"));
        assert_eq!(field(&fields, "download_limit"), Some("5"));
        assert_eq!(field(&fields, "save_to_drive"), Some("true"));
        assert_eq!(
            field(&fields, "drive_folder_url"),
            Some("https://drive.google.com/drive/folders/abc123")
        );
        assert_eq!(field(&fields, "save_locally"), Some("true"));
        assert_eq!(field(&fields, "local_folder"), Some("/tmp/media"));
    }

    #[test]
    fn date_bounds_accept_iso_dates_only() {
        assert_eq!(
            parse_date_after(" 2024-02-29 "),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(parse_date_after("02/29/2024").is_err());
        assert!(parse_date_after("yesterday").is_err());
    }

    #[test]
    fn outcome_partitions_items_by_kind() {
        let body = r#"{
            "subreddit": "aww",
            "sort_by": "hot",
            "media_types": ["images", "videos"],
            "media": [
                {"type": "image", "filename": "image_a.jpg", "title": "a", "url": "https://example.com/a", "score": 10, "created": "2024-01-01"},
                {"type": "video", "filename": "video_b.mp4", "title": "b", "url": "https://example.com/b", "score": 20, "created": "2024-01-02", "drive_link": "https://drive.google.com/file/d/x/view"},
                {"type": "image", "filename": "image_c.png", "title": "c", "url": "https://example.com/c", "score": 30, "created": "2024-01-03", "local_path": "/tmp/media/image_c.png"}
            ]
        }"#;

        let outcome: ScrapeOutcome = serde_json::from_str(body).expect("valid outcome body");
        assert_eq!(outcome.media.len(), 3);
        assert_eq!(outcome.image_count(), 2);
        assert_eq!(outcome.video_count(), 1);
        assert_eq!(outcome.sort_by, SortOrder::Hot);
        assert_eq!(outcome.media[1].drive_link.as_deref(), Some("https://drive.google.com/file/d/x/view"));
    }

    #[test]
    fn outcome_with_no_items_deserializes_empty() {
        let body = r#"{"subreddit": "EarthPorn", "sort_by": "top", "media_types": ["images"], "media": []}"#;
        let outcome: ScrapeOutcome = serde_json::from_str(body).expect("valid outcome body");
        assert!(outcome.media.is_empty());
        assert_eq!(outcome.image_count(), 0);
        assert_eq!(outcome.video_count(), 0);
    }
}
