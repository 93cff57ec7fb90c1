//! Stateless egui helpers: DOM rendering and the toast overlay.

use eframe::egui;
use webview_kiosk::dom::DomNode;
use webview_kiosk::toast::Toast;

/// Something the user activated while the page was drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum PageClick {
    Link { href: String, new_window: bool },
    Video { src: String },
}

// ─── DOM rendering ───────────────────────────────────────────────────────────

/// Recursively render a `DomNode` tree using egui widgets.
pub fn render_dom_node(ui: &mut egui::Ui, node: &DomNode, clicked: &mut Option<PageClick>) {
    match node.tag.as_str() {
        "h1" => heading(ui, node, 28.0, 8.0),
        "h2" => heading(ui, node, 22.0, 6.0),
        "h3" | "h4" | "h5" | "h6" => heading(ui, node, 18.0, 4.0),
        "p" | "blockquote" | "pre" => {
            let text = node.collect_text();
            if !text.is_empty() {
                ui.label(text);
                ui.add_space(8.0);
            }
        }
        "a" => {
            let text = node.collect_text();
            if text.is_empty() {
                return;
            }
            if let Some(href) = node.attr("href") {
                let rt = egui::RichText::new(&text)
                    .color(egui::Color32::from_rgb(0, 100, 200))
                    .underline();
                let link = ui.add(egui::Label::new(rt).sense(egui::Sense::click()));
                if link.clicked() {
                    *clicked = Some(PageClick::Link {
                        href: href.to_string(),
                        new_window: node.opens_new_window(),
                    });
                }
                link.on_hover_cursor(egui::CursorIcon::PointingHand);
            } else {
                ui.label(text);
            }
        }
        "li" => {
            let text = node.collect_text();
            if !text.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    ui.label("  \u{2022}");
                    ui.label(text);
                });
            }
        }
        "hr" => {
            ui.separator();
        }
        "br" => {
            ui.add_space(4.0);
        }
        "img" => {
            let alt = node.attr("alt").unwrap_or("Image");
            ui.colored_label(egui::Color32::GRAY, format!("[{}]", alt));
        }
        "video" => {
            let src = node.media_src().unwrap_or_default();
            if ui.button("\u{25B6} Play fullscreen").clicked() {
                *clicked = Some(PageClick::Video { src: src.to_string() });
            }
        }
        _ => {
            if node.is_text() {
                ui.label(node.text.as_str());
            }
            for child in &node.children {
                render_dom_node(ui, child, clicked);
            }
        }
    }
}

fn heading(ui: &mut egui::Ui, node: &DomNode, size: f32, space: f32) {
    let text = node.collect_text();
    if !text.is_empty() {
        ui.heading(egui::RichText::new(text).size(size).strong());
        ui.add_space(space);
    }
}

// ─── Toasts ──────────────────────────────────────────────────────────────────

pub fn show_toast(ctx: &egui::Context, toast: &Toast) {
    egui::Area::new(egui::Id::new("kiosk_toast"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -64.0))
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(egui::Color32::from_black_alpha(220))
                .rounding(16.0)
                .inner_margin(egui::Margin::symmetric(16.0, 10.0))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(&toast.message)
                            .color(egui::Color32::WHITE)
                            .size(16.0),
                    );
                });
        });
}
