//! `KioskApp`: the top-level egui application state.
//!
//! This module declares the `KioskApp` struct and its frame loop.
//! The rest is split across the sibling sub-modules:
//!
//! - `input`         : touch, mouse, and key routing into the shell
//! - `content`       : the site surface, popup window, and fullscreen media
//! - `settings_panel`: the password-gated settings form

pub mod content;
pub mod input;
pub mod settings_panel;

use std::time::{Duration, Instant};

use eframe::egui;

use webview_kiosk::browser::PageView;
use webview_kiosk::config::KioskConfig;
use webview_kiosk::settings::{KioskPrefs, PreferenceStore};
use webview_kiosk::shell::{KioskShell, LongPressDetector};
use webview_kiosk::touch::TouchTracker;

use self::settings_panel::SettingsForm;

// ─── Application state ───────────────────────────────────────────────────────

pub struct KioskApp {
    pub config: KioskConfig,
    pub prefs: KioskPrefs,
    pub shell: KioskShell,
    pub view: PageView,
    /// Companion view for a page-requested window
    pub popup_view: Option<PageView>,
    /// Media element currently shown fullscreen
    pub fullscreen_src: Option<String>,
    pub next_view_id: u64,
    pub tracker: TouchTracker,
    pub keys: LongPressDetector,
    pub settings: Option<SettingsForm>,
    pub app_start: Instant,
}

impl KioskApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: KioskConfig, store: Box<dyn PreferenceStore>) -> Self {
        let ctx = cc.egui_ctx.clone();
        let mut prefs = KioskPrefs::new(store, &config);
        if let Err(e) = prefs.ensure_default_password() {
            log::error!("could not seed settings password: {}", e);
        }

        let mut shell = KioskShell::new(&config, ctx.pixels_per_point());
        let mut view = PageView::new().with_repaint(ctx);
        shell.start(&mut view, &prefs);

        Self {
            keys: LongPressDetector::new(config.long_press_ms),
            config,
            prefs,
            shell,
            view,
            popup_view: None,
            fullscreen_src: None,
            next_view_id: 1,
            tracker: TouchTracker::new(),
            settings: None,
            app_start: Instant::now(),
        }
    }

    /// Milliseconds since start, the clock all gesture and toast timing uses.
    pub fn now_ms(&self) -> u64 {
        self.app_start.elapsed().as_millis() as u64
    }
}

impl eframe::App for KioskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Kiosk: the window never closes on request
        if ctx.input(|i| i.viewport().close_requested()) {
            log::info!("close request ignored");
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        self.view.poll();
        if let Some(popup) = self.popup_view.as_mut() {
            popup.poll();
        }
        self.shell.set_density(ctx.pixels_per_point());

        self.route_input(ctx);
        self.sync_settings();

        if self.settings.is_some() {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.draw_settings(ui);
            });
        } else if self.fullscreen_src.is_some() {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.draw_fullscreen(ui);
            });
        } else if self.popup_view.is_some() {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.draw_popup(ui, ctx);
            });
        } else {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.draw_content(ui, ctx);
            });
        }

        let now = self.now_ms();
        let toast = self.shell.toasts().current(now).cloned();
        if let Some(toast) = toast {
            crate::ui::show_toast(ctx, &toast);
        }

        // Timers (toast expiry, long presses, tap windows) are checked per frame
        if !self.shell.toasts().is_empty() || self.keys.any_held() || self.view.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
