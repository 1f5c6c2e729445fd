use reelkit_bridge::overlay::OverlayOutcome;

/// Per-component state of the overlay form.
#[derive(Debug, Clone, Default)]
pub struct OverlayEntity {
    /// A submission this component started is still outstanding.
    pub pending: bool,
    /// The last successful outcome (saved file or stored reference).
    pub outcome: Option<OverlayOutcome>,
    /// The last failure message, shown inline.
    pub error: Option<String>,
}
