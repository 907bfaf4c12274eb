use std::path::PathBuf;

use crate::export::{ExportError, ExportRequest};

/// Type alias for notification IDs (unique per `NotificationQueue`)
pub type NotificationId = u64;

/// Containers addressed by stable element identifiers on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerId {
    /// Grid of topic summary cards
    SandboxTopics,
    /// Expanded topic detail view
    SandboxContent,
}

impl ContainerId {
    /// Returns the element id used by the page markup
    pub fn element_id(&self) -> &'static str {
        match self {
            ContainerId::SandboxTopics => "sandbox-topics",
            ContainerId::SandboxContent => "sandbox-content",
        }
    }
}

/// Trait for the mutable document the presentation layer writes into.
///
/// This is the only way components touch the page:
/// - Style variables on the root element
/// - Document title and the language toggle control
/// - Notification elements appended to the body
/// - Topic summary/detail containers
///
/// Implementations are single-threaded and unsynchronized, matching the
/// host UI thread that owns them.
pub trait DocumentSurface {
    /// Sets every style variable in one pass.
    ///
    /// Implementations must make the whole batch visible at once; callers rely
    /// on never exposing a partially applied palette.
    fn set_style_properties(&mut self, properties: &[(&str, &str)]);

    /// Sets the document title
    fn set_title(&mut self, title: &str);

    /// Replaces the inner markup of the language toggle control.
    ///
    /// Returns false if the page has no such control.
    fn set_language_toggle(&mut self, inner_html: &str) -> bool;

    /// Appends a new notification element to the body
    fn append_notification(&mut self, id: NotificationId, class: &str, inner_html: &str);

    /// Replaces the class list of an existing notification element
    fn set_notification_class(&mut self, id: NotificationId, class: &str);

    /// Detaches a notification element from the document
    fn remove_notification(&mut self, id: NotificationId);

    /// Replaces the inner markup of a container
    fn set_container_html(&mut self, container: ContainerId, html: &str);

    /// Makes a container visible
    fn show_container(&mut self, container: ContainerId);

    /// Scrolls a container into view
    fn scroll_into_view(&mut self, container: ContainerId);
}

/// Read-only system signals consulted when no preference is stored
pub trait SystemSignals {
    /// Returns true if the host reports a light color-scheme preference
    fn prefers_light_scheme(&self) -> bool;

    /// Returns the host's reported language tag (e.g. "en-US"), if any
    fn locale(&self) -> Option<String>;
}

/// Size of the host viewport in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Capability implemented by every chart-like object that must recompute
/// its layout after the viewport changes.
pub trait Resizable {
    /// Recomputes layout for the given viewport
    fn resize(&mut self, viewport: Viewport);
}

/// Trait for the network side of an export round trip.
///
/// Implementations must be shareable with a worker thread so hosts can keep
/// the UI thread responsive while the request is in flight.
pub trait ExportTransport: Send + Sync {
    /// Issues one export request and returns the binary payload.
    ///
    /// Any non-success response is an error regardless of its body.
    fn request_export(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError>;
}

/// Trait for delivering a downloaded payload to the user
pub trait DownloadSink {
    /// Stores `bytes` under `file_name` and returns where it ended up
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}
