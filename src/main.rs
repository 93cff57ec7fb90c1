use eframe::egui;

use webview_kiosk::config::KioskConfig;
use webview_kiosk::settings::{FileStore, MemoryStore, PreferenceStore};

mod app;
mod ui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = match KioskConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}; using defaults", e);
            KioskConfig::default()
        }
    };

    let prefs_path = config.prefs_path();
    let store: Box<dyn PreferenceStore> = match FileStore::open(prefs_path.clone()) {
        Ok(store) => {
            log::info!("settings stored in {}", prefs_path.display());
            Box::new(store)
        }
        Err(e) => {
            // Settings still work for this session, they just won't persist
            log::error!("cannot open {}: {}", prefs_path.display(), e);
            Box::new(MemoryStore::new())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_decorations(false),
        ..Default::default()
    };

    eframe::run_native(
        "Kiosk",
        options,
        Box::new(move |cc| Ok(Box::new(app::KioskApp::new(cc, config, store)))),
    )
}
