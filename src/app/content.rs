//! Surface rendering for `KioskApp`.
//!
//! - `draw_content`   : the configured site
//! - `draw_popup`     : a page-requested window on top of it
//! - `draw_fullscreen`: fullscreen media placeholder

use eframe::egui;

use webview_kiosk::browser::{Browser, PageView};
use webview_kiosk::shell::{ShellRequest, ShellResponse};

use crate::ui::{render_dom_node, PageClick};
use super::KioskApp;

/// Draw one page view; returns whatever the user activated.
fn draw_page(ui: &mut egui::Ui, view: &PageView) -> Option<PageClick> {
    if let Some(err) = view.error() {
        ui.vertical_centered(|ui| {
            ui.add_space(64.0);
            ui.colored_label(egui::Color32::from_rgb(220, 60, 60), err);
        });
        return None;
    }

    let Some(page) = view.page() else {
        ui.centered_and_justified(|ui| {
            ui.spinner();
        });
        return None;
    };

    let mut clicked = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            render_dom_node(ui, &page.dom.body, &mut clicked);
        });
    clicked
}

impl KioskApp {
    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.view.is_loading() && self.view.page().is_some() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Refreshing...");
            });
        }
        let clicked = draw_page(ui, &self.view);
        if let Some(click) = clicked {
            self.activate(click, ctx);
        }
    }

    pub fn draw_popup(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        // Stand-in for the page's own window.close()
        if ui.button("\u{2715} Close").clicked() {
            if self.shell.handle(ShellRequest::CloseWindow) == ShellResponse::WindowClosed {
                self.popup_view = None;
            }
            return;
        }
        ui.separator();

        let Some(popup) = self.popup_view.as_mut() else {
            return;
        };
        if let Some(PageClick::Link { href, new_window }) = draw_page(ui, popup) {
            let url = popup.resolve(&href);
            if new_window {
                self.open_window(url, ctx);
            } else {
                popup.load_url(&url);
            }
        }
    }

    pub fn draw_fullscreen(&mut self, ui: &mut egui::Ui) {
        let src = self.fullscreen_src.clone().unwrap_or_default();
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.label(egui::RichText::new(src).size(18.0));
            ui.add_space(16.0);
            if ui.button("Exit fullscreen").clicked()
                && matches!(
                    self.shell.handle(ShellRequest::HideFullscreen),
                    ShellResponse::FullscreenHidden { .. }
                )
            {
                self.fullscreen_src = None;
            }
        });
    }

    fn activate(&mut self, click: PageClick, ctx: &egui::Context) {
        match click {
            PageClick::Link { href, new_window } => {
                let url = self.view.resolve(&href);
                if new_window {
                    self.open_window(url, ctx);
                } else {
                    self.view.load_url(&url);
                }
            }
            PageClick::Video { src } => {
                let view_id = self.next_view_id;
                self.next_view_id += 1;
                match self.shell.handle(ShellRequest::ShowFullscreen { view_id }) {
                    ShellResponse::FullscreenShown { .. } => self.fullscreen_src = Some(src),
                    _ => self.fullscreen_src = None,
                }
            }
        }
    }

    fn open_window(&mut self, url: String, ctx: &egui::Context) {
        if let ShellResponse::WindowOpened { url } = self.shell.handle(ShellRequest::OpenWindow { url }) {
            // Opening a window also ends fullscreen media
            self.fullscreen_src = None;
            let mut popup = PageView::new().with_repaint(ctx.clone());
            popup.load_url(&url);
            self.popup_view = Some(popup);
        }
    }
}
