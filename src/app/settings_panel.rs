//! Settings panel for `KioskApp`.
//!
//! Password entry first; once verified, the URL field and the
//! change-password fields appear.

use eframe::egui;

use webview_kiosk::settings::{SettingsError, SettingsSession};

use super::KioskApp;

/// Field contents plus the session they feed.
pub struct SettingsForm {
    pub session: SettingsSession,
    pub password: String,
    pub url: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl KioskApp {
    /// Open or drop the form to match the shell's view of things.
    pub fn sync_settings(&mut self) {
        if self.shell.settings_open() && self.settings.is_none() {
            if let Err(e) = self.prefs.ensure_default_password() {
                self.shell.notify(SettingsError::from(e).toast());
            }
            self.settings = Some(SettingsForm {
                session: SettingsSession::new(&self.config),
                password: String::new(),
                url: String::new(),
                new_password: String::new(),
                confirm_password: String::new(),
            });
        }
    }

    pub fn close_settings(&mut self) {
        self.settings = None;
        self.shell.close_settings(&mut self.view, &self.prefs);
    }

    pub fn draw_settings(&mut self, ui: &mut egui::Ui) {
        let mut close = false;

        if let Some(form) = self.settings.as_mut() {
            ui.vertical_centered(|ui| {
                ui.set_max_width(420.0);
                ui.add_space(32.0);
                ui.heading("Kiosk Settings");
                ui.add_space(16.0);

                if !form.session.is_authenticated() {
                    ui.add(
                        egui::TextEdit::singleline(&mut form.password)
                            .password(true)
                            .hint_text("Password"),
                    );
                    if ui.button("Verify").clicked() {
                        match form.session.verify(&self.prefs, &form.password) {
                            Ok(toast) => {
                                self.shell.notify(toast);
                                form.url = self.prefs.raw_url();
                            }
                            Err(e) => {
                                if matches!(e, SettingsError::IncorrectPassword) {
                                    form.password.clear();
                                }
                                self.shell.notify(e.toast());
                            }
                        }
                    }
                } else {
                    ui.label("Website URL");
                    ui.add(egui::TextEdit::singleline(&mut form.url).hint_text("https://"));
                    if ui.button("Save").clicked() {
                        match form.session.save_url(&mut self.prefs, &form.url) {
                            Ok(toast) => self.shell.notify(toast),
                            Err(e) => self.shell.notify(e.toast()),
                        }
                        close = form.session.is_finished();
                    }

                    ui.add_space(24.0);
                    ui.separator();
                    ui.label("Change password");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.new_password)
                            .password(true)
                            .hint_text("New password"),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut form.confirm_password)
                            .password(true)
                            .hint_text("Confirm password"),
                    );
                    if ui.button("Change password").clicked() {
                        match form.session.change_password(
                            &mut self.prefs,
                            &form.new_password,
                            &form.confirm_password,
                        ) {
                            Ok(toast) => {
                                form.new_password.clear();
                                form.confirm_password.clear();
                                self.shell.notify(toast);
                            }
                            Err(e) => {
                                if matches!(e, SettingsError::PasswordMismatch) {
                                    form.confirm_password.clear();
                                }
                                self.shell.notify(e.toast());
                            }
                        }
                    }
                }

                ui.add_space(24.0);
                if ui.button("Back").clicked() {
                    close = true;
                }
            });
        }

        if close {
            self.close_settings();
        }
    }
}
