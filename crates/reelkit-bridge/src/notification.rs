/// Severity of a user-visible notification.
///
/// Toasts are the delivery channel for outcomes that do not belong to one
/// page's inline state: saved settings, a stored recording, a download that
/// failed while the user was on another page.
#[derive(Debug, Clone)]
pub enum NotificationType {
    /// Neutral status update.
    Info,
    /// An operation finished as requested.
    Success,
    /// Something non-critical went wrong; the primary result still stands.
    Warning,
    /// An operation failed outright.
    Error,
}

/// One toast pushed from the backend to the notification surface.
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    /// Severity, which decides the toast's visual style.
    pub notification_type: NotificationType,
    /// The text shown to the user.
    pub message: String,
}
