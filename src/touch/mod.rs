//! Kiosk touch handling
//!
//! - `event`: platform-style pointer events
//! - `tracker`: egui touches → pointer events
//! - `classifier`: hidden unlock tap sequence and three-finger reload swipe

pub mod classifier;
pub mod event;
pub mod tracker;

pub use classifier::{GestureClassifier, GestureConfig, Outcome, Signal};
pub use event::{Pointer, PointerAction, PointerEvent};
pub use tracker::TouchTracker;
