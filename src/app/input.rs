//! Input routing for `KioskApp`.
//!
//! Touches on the site surface go through the gesture classifier first and
//! are then left in egui's queue for the page widgets. Keys stand in for the
//! device's hardware buttons.

use eframe::egui;

use webview_kiosk::shell::{BackOutcome, HardwareKey, KeyRelease, LongPressDetector};

use super::KioskApp;

/// Desktop stand-ins for hardware buttons.
fn hardware_key(key: egui::Key) -> Option<HardwareKey> {
    match key {
        egui::Key::Escape | egui::Key::Backspace => Some(HardwareKey::Back),
        egui::Key::F1 => Some(HardwareKey::Menu),
        egui::Key::F2 => Some(HardwareKey::VolumeDown),
        _ => None,
    }
}

/// Feed one key transition to the long-press detector. Returns true for a
/// short Back press.
///
/// A press that belongs to a focused text field is not tracked, but releases
/// always reach the detector so no hold outlives its key.
fn key_transition(
    keys: &mut LongPressDetector,
    hw: HardwareKey,
    pressed: bool,
    taken_by_text_field: bool,
    now: u64,
) -> bool {
    if pressed {
        if !taken_by_text_field {
            keys.press(hw, now);
        }
        return false;
    }
    keys.release(hw) == Some(KeyRelease::Short) && hw == HardwareKey::Back
}

impl KioskApp {
    /// The gesture classifier only watches the site surface itself.
    fn surface_visible(&self) -> bool {
        self.settings.is_none() && self.popup_view.is_none() && self.fullscreen_src.is_none()
    }

    pub fn route_input(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        let ppp = ctx.pixels_per_point();
        let now = self.now_ms();
        let text_focused = ctx.wants_keyboard_input();

        for event in &events {
            match event {
                egui::Event::Touch { id, phase, pos, .. } => {
                    if let Some(ev) = self.tracker.on_touch(*id, *phase, *pos, ppp, now) {
                        if self.surface_visible() {
                            self.shell.on_touch(&ev, &mut self.view);
                        }
                    }
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if let Some(ev) = self.tracker.on_mouse_button(*pressed, *pos, ppp, now) {
                        if self.surface_visible() {
                            self.shell.on_touch(&ev, &mut self.view);
                        }
                    }
                }
                egui::Event::Key {
                    key,
                    pressed,
                    repeat: false,
                    ..
                } => {
                    let Some(hw) = hardware_key(*key) else {
                        continue;
                    };
                    let steals_backspace = text_focused && *key == egui::Key::Backspace;
                    if key_transition(&mut self.keys, hw, *pressed, steals_backspace, now) {
                        self.on_back();
                    }
                }
                _ => {}
            }
        }

        for key in self.keys.poll(now) {
            self.shell.on_key_long_press(key);
        }
    }

    fn on_back(&mut self) {
        if self.settings.is_some() {
            self.close_settings();
            return;
        }
        match self.shell.on_back(&mut self.view) {
            BackOutcome::FullscreenHidden => self.fullscreen_src = None,
            BackOutcome::PopupClosed => self.popup_view = None,
            BackOutcome::WentBack | BackOutcome::Blocked => {}
        }
    }
}
