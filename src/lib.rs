pub mod browser;
pub mod config;
pub mod dom;
pub mod net;
pub mod settings;
pub mod shell;
pub mod toast;

// Gesture recognition on the browser surface
pub mod touch;
