use reelkit_bridge::scrape::{LocalFolderListing, ScrapeOutcome};

/// Per-component state of the scrape form and its results.
///
/// Exactly one of `outcome`/`error` is populated after a submission
/// resolves; `pending` guards the submit button against duplicate
/// concurrent submissions.
#[derive(Debug, Clone, Default)]
pub struct ScrapeEntity {
    /// A submission this component started is still outstanding.
    pub pending: bool,
    /// The last successful result, with its echoed filter parameters.
    pub outcome: Option<ScrapeOutcome>,
    /// Listing of the local save folder, when the last scrape saved locally.
    pub local_files: Option<LocalFolderListing>,
    /// The last failure message, client-side or service-provided.
    pub error: Option<String>,
}

impl ScrapeEntity {
    /// Marks a new submission: pending, with all previous results cleared.
    pub fn begin_submission(&mut self) {
        self.pending = true;
        self.outcome = None;
        self.local_files = None;
        self.error = None;
    }
}
