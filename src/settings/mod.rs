//! Kiosk settings: which site to show and who may change it.
//!
//! The settings panel is password protected. A [`SettingsSession`] lives for
//! one opening of the panel and gates URL and password changes behind a
//! successful [`SettingsSession::verify`].

pub mod password;
pub mod store;

use thiserror::Error;

use crate::config::KioskConfig;
use crate::toast::{Toast, ToastLength};

pub use password::hash_password;
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError};

pub const PREF_URL: &str = "web_url";
pub const PREF_PASSWORD_HASH: &str = "password_hash";

/// Prefix `https://` unless the URL already names http or https.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Typed access to the kiosk's preferences.
pub struct KioskPrefs {
    store: Box<dyn PreferenceStore>,
    default_url: String,
    default_password: String,
}

impl KioskPrefs {
    pub fn new(store: Box<dyn PreferenceStore>, config: &KioskConfig) -> Self {
        Self {
            store,
            default_url: config.default_url.clone(),
            default_password: config.default_password.clone(),
        }
    }

    /// The URL as the operator typed it, for the edit field.
    pub fn raw_url(&self) -> String {
        self.store
            .get(PREF_URL)
            .unwrap_or_else(|| self.default_url.clone())
    }

    /// The URL the browser should load.
    pub fn configured_url(&self) -> String {
        normalize_url(&self.raw_url())
    }

    pub fn set_url(&mut self, url: &str) -> Result<(), StoreError> {
        self.store.put(PREF_URL, url)
    }

    /// Seed the default password if none has ever been stored.
    pub fn ensure_default_password(&mut self) -> Result<(), StoreError> {
        if self.store.get(PREF_PASSWORD_HASH).is_none() {
            log::info!("no settings password stored, installing default");
            let hash = hash_password(&self.default_password);
            self.store.put(PREF_PASSWORD_HASH, &hash)?;
        }
        Ok(())
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.store
            .get(PREF_PASSWORD_HASH)
            .is_some_and(|stored| stored == hash_password(password))
    }

    pub fn set_password(&mut self, password: &str) -> Result<(), StoreError> {
        self.store.put(PREF_PASSWORD_HASH, &hash_password(password))
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Please enter password")]
    EmptyPassword,
    #[error("Incorrect password. Please try again.")]
    IncorrectPassword,
    #[error("Please authenticate first")]
    NotAuthenticated,
    #[error("Please enter a valid URL")]
    EmptyUrl,
    #[error("Please enter a new password")]
    EmptyNewPassword,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match. Please try again.")]
    PasswordMismatch,
    #[error("Could not save settings: {0}")]
    Store(#[from] StoreError),
}

impl SettingsError {
    pub fn toast(&self) -> Toast {
        let length = match self {
            SettingsError::IncorrectPassword
            | SettingsError::PasswordTooShort { .. }
            | SettingsError::PasswordMismatch
            | SettingsError::Store(_) => ToastLength::Long,
            _ => ToastLength::Short,
        };
        Toast {
            message: self.to_string(),
            length,
        }
    }
}

/// One visit to the settings panel.
#[derive(Debug)]
pub struct SettingsSession {
    authenticated: bool,
    finished: bool,
    min_password_length: usize,
}

impl SettingsSession {
    pub fn new(config: &KioskConfig) -> Self {
        Self {
            authenticated: false,
            finished: false,
            min_password_length: config.min_password_length,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether the panel asked to be closed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn verify(&mut self, prefs: &KioskPrefs, entered: &str) -> Result<Toast, SettingsError> {
        let entered = entered.trim();
        if entered.is_empty() {
            return Err(SettingsError::EmptyPassword);
        }
        if prefs.password_matches(entered) {
            log::info!("settings unlocked");
            self.authenticated = true;
            Ok(Toast::short("Authentication successful"))
        } else {
            log::warn!("settings password rejected");
            self.authenticated = false;
            Err(SettingsError::IncorrectPassword)
        }
    }

    pub fn save_url(&mut self, prefs: &mut KioskPrefs, input: &str) -> Result<Toast, SettingsError> {
        if !self.authenticated {
            return Err(SettingsError::NotAuthenticated);
        }
        let url = input.trim();
        if url.is_empty() {
            return Err(SettingsError::EmptyUrl);
        }
        prefs.set_url(url)?;
        log::info!("kiosk URL set to {}", url);
        self.finished = true;
        Ok(Toast::short("URL saved! Returning to app..."))
    }

    pub fn change_password(
        &mut self,
        prefs: &mut KioskPrefs,
        new_password: &str,
        confirm: &str,
    ) -> Result<Toast, SettingsError> {
        if !self.authenticated {
            return Err(SettingsError::NotAuthenticated);
        }
        let new_password = new_password.trim();
        let confirm = confirm.trim();

        if new_password.is_empty() {
            return Err(SettingsError::EmptyNewPassword);
        }
        if new_password.chars().count() < self.min_password_length {
            return Err(SettingsError::PasswordTooShort {
                min: self.min_password_length,
            });
        }
        if new_password != confirm {
            return Err(SettingsError::PasswordMismatch);
        }

        prefs.set_password(new_password)?;
        log::info!("settings password changed");
        Ok(Toast::long("Password updated successfully!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> KioskPrefs {
        let mut prefs = KioskPrefs::new(Box::new(MemoryStore::new()), &KioskConfig::default());
        prefs.ensure_default_password().expect("seed password");
        prefs
    }

    fn unlocked(prefs: &KioskPrefs) -> SettingsSession {
        let mut session = SettingsSession::new(&KioskConfig::default());
        session.verify(prefs, "12345").expect("default password");
        session
    }

    #[test]
    fn normalizes_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn default_url_until_configured() {
        let mut prefs = prefs();
        assert_eq!(prefs.configured_url(), "https://www.nikolaindustry.com");
        prefs.set_url("intranet.local/board").expect("set");
        assert_eq!(prefs.raw_url(), "intranet.local/board");
        assert_eq!(prefs.configured_url(), "https://intranet.local/board");
    }

    #[test]
    fn default_password_is_seeded_once() {
        let mut prefs = prefs();
        prefs.set_password("s3cret").expect("set");
        prefs.ensure_default_password().expect("seed");
        assert!(prefs.password_matches("s3cret"));
        assert!(!prefs.password_matches("12345"));
    }

    #[test]
    fn verify_checks_password() {
        let prefs = prefs();
        let mut session = SettingsSession::new(&KioskConfig::default());

        assert!(matches!(session.verify(&prefs, "   "), Err(SettingsError::EmptyPassword)));
        assert!(matches!(session.verify(&prefs, "54321"), Err(SettingsError::IncorrectPassword)));
        assert!(!session.is_authenticated());

        let toast = session.verify(&prefs, " 12345 ").expect("trimmed match");
        assert_eq!(toast.message, "Authentication successful");
        assert!(session.is_authenticated());
    }

    #[test]
    fn changes_require_authentication() {
        let mut prefs = prefs();
        let mut session = SettingsSession::new(&KioskConfig::default());
        assert!(matches!(
            session.save_url(&mut prefs, "example.com"),
            Err(SettingsError::NotAuthenticated)
        ));
        assert!(matches!(
            session.change_password(&mut prefs, "abcd", "abcd"),
            Err(SettingsError::NotAuthenticated)
        ));
        assert_eq!(prefs.raw_url(), "https://www.nikolaindustry.com");
    }

    #[test]
    fn save_url_stores_trimmed_text_and_finishes() {
        let mut prefs = prefs();
        let mut session = unlocked(&prefs);

        assert!(matches!(session.save_url(&mut prefs, "  "), Err(SettingsError::EmptyUrl)));
        assert!(!session.is_finished());

        session.save_url(&mut prefs, "  example.org  ").expect("save");
        assert_eq!(prefs.raw_url(), "example.org");
        assert!(session.is_finished());
    }

    #[test]
    fn change_password_validates_input() {
        let mut prefs = prefs();
        let mut session = unlocked(&prefs);

        assert!(matches!(
            session.change_password(&mut prefs, "", ""),
            Err(SettingsError::EmptyNewPassword)
        ));
        let short = session.change_password(&mut prefs, "abc", "abc").unwrap_err();
        assert_eq!(short.to_string(), "Password must be at least 4 characters");
        assert_eq!(short.toast().length, ToastLength::Long);
        assert!(matches!(
            session.change_password(&mut prefs, "abcd", "abce"),
            Err(SettingsError::PasswordMismatch)
        ));
        assert!(prefs.password_matches("12345"));

        session.change_password(&mut prefs, " abcd ", "abcd").expect("change");
        assert!(prefs.password_matches("abcd"));
        assert!(!prefs.password_matches("12345"));
    }
}
