//! Kiosk host
//!
//! Glue between the input stream, the browser surface, and the settings
//! panel:
//! - Gesture signals → open settings / reload
//! - Back and hardware keys → kiosk-safe navigation
//! - Page requests (permissions, popups, fullscreen) → [`ShellResponse`]

pub mod keys;
pub mod requests;

pub use keys::{HardwareKey, KeyRelease, LongPressDetector};
pub use requests::{ShellRequest, ShellResponse};

use crate::browser::Browser;
use crate::config::KioskConfig;
use crate::settings::KioskPrefs;
use crate::toast::{Toast, Toasts};
use crate::touch::{GestureClassifier, Outcome, PointerEvent, Signal};

/// What a back press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    FullscreenHidden,
    PopupClosed,
    WentBack,
    /// Nothing to go back to; the kiosk stays put
    Blocked,
}

pub struct KioskShell {
    classifier: GestureClassifier,
    toasts: Toasts,
    settings_open: bool,
    /// URL most recently handed to the browser by the shell
    loaded_url: Option<String>,
    popup: Option<String>,
    fullscreen: Option<u64>,
}

impl KioskShell {
    pub fn new(config: &KioskConfig, density: f32) -> Self {
        Self {
            classifier: GestureClassifier::new(config.gesture.clone(), density),
            toasts: Toasts::new(),
            settings_open: false,
            loaded_url: None,
            popup: None,
            fullscreen: None,
        }
    }

    pub fn set_density(&mut self, density: f32) {
        self.classifier.set_density(density);
    }

    pub fn toasts(&mut self) -> &mut Toasts {
        &mut self.toasts
    }

    pub fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn loaded_url(&self) -> Option<&str> {
        self.loaded_url.as_deref()
    }

    pub fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    pub fn fullscreen(&self) -> Option<u64> {
        self.fullscreen
    }

    /// Show the configured site.
    pub fn start(&mut self, browser: &mut dyn Browser, prefs: &KioskPrefs) {
        let url = prefs.configured_url();
        self.loaded_url = Some(url.clone());
        browser.load_url(&url);
    }

    /// Back from settings: pick up a changed URL.
    pub fn resume(&mut self, browser: &mut dyn Browser, prefs: &KioskPrefs) {
        let url = prefs.configured_url();
        if self.loaded_url.as_deref() != Some(url.as_str()) {
            self.toasts.push(Toast::short(format!("Loading new URL: {}", url)));
            self.loaded_url = Some(url.clone());
            browser.load_url(&url);
        }
    }

    pub fn open_settings(&mut self) {
        if !self.settings_open {
            log::info!("opening settings");
            self.settings_open = true;
        }
    }

    pub fn close_settings(&mut self, browser: &mut dyn Browser, prefs: &KioskPrefs) {
        if self.settings_open {
            self.settings_open = false;
            self.resume(browser, prefs);
        }
    }

    /// Classify a surface event and act on any signal. The caller still
    /// delivers `event` to the surface.
    pub fn on_touch(&mut self, event: &PointerEvent, browser: &mut dyn Browser) -> Outcome {
        let outcome = self.classifier.process(event);
        for signal in &outcome.signals {
            match signal {
                Signal::ReloadPage => {
                    self.toasts.push(Toast::short("Refreshing page..."));
                    browser.reload();
                }
                Signal::UnlockSettings => {
                    if !self.settings_open {
                        self.toasts.push(Toast::short("Opening Settings..."));
                        self.open_settings();
                    }
                }
            }
        }
        outcome
    }

    pub fn on_back(&mut self, browser: &mut dyn Browser) -> BackOutcome {
        if self.fullscreen.take().is_some() {
            return BackOutcome::FullscreenHidden;
        }
        if self.popup.take().is_some() {
            return BackOutcome::PopupClosed;
        }
        if browser.can_go_back() {
            browser.go_back();
            return BackOutcome::WentBack;
        }
        self.toasts
            .push(Toast::short("Press and hold settings button to configure"));
        BackOutcome::Blocked
    }

    /// Returns whether the long press was handled.
    pub fn on_key_long_press(&mut self, key: HardwareKey) -> bool {
        if !key.opens_settings() {
            return false;
        }
        self.toasts
            .push(Toast::short("Long press detected! Opening settings..."));
        self.open_settings();
        true
    }

    /// Answer a request from the page.
    pub fn handle(&mut self, request: ShellRequest) -> ShellResponse {
        log::debug!("shell request: {:?}", request);
        match request {
            ShellRequest::Geolocation { origin } => ShellResponse::GeolocationDecision {
                origin,
                allow: true,
                retain: false,
            },
            ShellRequest::Permission { resources, .. } => {
                ShellResponse::PermissionGranted { resources }
            }
            ShellRequest::OpenWindow { url } => {
                // The popup takes over the overlay, fullscreen media included
                self.fullscreen = None;
                self.popup = Some(url.clone());
                ShellResponse::WindowOpened { url }
            }
            ShellRequest::CloseWindow => match self.popup.take() {
                Some(_) => ShellResponse::WindowClosed,
                None => ShellResponse::Ignored,
            },
            ShellRequest::ShowFullscreen { view_id } => match self.fullscreen.take() {
                // A second request while one is showing just exits fullscreen
                Some(current) => ShellResponse::FullscreenHidden { view_id: current },
                None => {
                    self.fullscreen = Some(view_id);
                    ShellResponse::FullscreenShown { view_id }
                }
            },
            ShellRequest::HideFullscreen => match self.fullscreen.take() {
                Some(view_id) => ShellResponse::FullscreenHidden { view_id },
                None => ShellResponse::Ignored,
            },
        }
    }
}
