//! Requests a page makes of its host, and the host's answers.
//!
//! Everything the page surface would normally ask through callbacks
//! (permissions, extra windows, fullscreen media) goes through
//! [`KioskShell::handle`](super::KioskShell::handle) as plain values.

/// Something the page wants from the kiosk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellRequest {
    /// Location access for `origin`
    Geolocation { origin: String },
    /// Device resources (camera, microphone, ...) for `origin`
    Permission { origin: String, resources: Vec<String> },
    /// A link or script asked for a new window
    OpenWindow { url: String },
    /// The popup asked to close itself
    CloseWindow,
    /// A media element wants to go fullscreen
    ShowFullscreen { view_id: u64 },
    /// The fullscreen element exited
    HideFullscreen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellResponse {
    GeolocationDecision {
        origin: String,
        allow: bool,
        /// Whether the decision outlives this request
        retain: bool,
    },
    PermissionGranted { resources: Vec<String> },
    WindowOpened { url: String },
    WindowClosed,
    FullscreenShown { view_id: u64 },
    FullscreenHidden { view_id: u64 },
    /// The request had nothing to act on
    Ignored,
}
