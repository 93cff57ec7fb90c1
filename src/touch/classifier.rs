//! Touch Gesture Classifier
//!
//! Watches the raw event stream of the browser surface and picks out two
//! hidden kiosk gestures:
//! - Tap sequence: 11 single-finger touch-downs within 3 s → unlock settings
//! - Three-finger swipe down: ≥120 dp within 1 s → reload page
//!
//! The classifier only observes. Every event still goes to the surface.

use serde::Deserialize;

use super::event::{PointerAction, PointerEvent};

/// Discrete, edge-triggered output of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Reveal the settings surface
    UnlockSettings,
    /// Reload the current document
    ReloadPage,
}

/// Result of classifying one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Always false: the event is never withheld from the surface.
    pub consumes_event: bool,
    pub signals: Vec<Signal>,
}

impl Outcome {
    pub fn contains(&self, signal: Signal) -> bool {
        self.signals.contains(&signal)
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    fn push(&mut self, signal: Signal) {
        if !self.signals.contains(&signal) {
            self.signals.push(signal);
        }
    }
}

/// Thresholds for both gestures.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Window in which the whole tap sequence must land
    pub tap_timeout_ms: u64,
    /// Taps needed to unlock settings
    pub tap_threshold: u32,
    /// Fingers needed for the reload swipe
    pub swipe_fingers: usize,
    /// Minimum downward travel, density-independent units
    pub swipe_min_distance_dp: f32,
    /// Maximum time from baseline to trigger
    pub swipe_max_duration_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_timeout_ms: 3000,
            tap_threshold: 11,
            swipe_fingers: 3,
            swipe_min_distance_dp: 120.0,
            swipe_max_duration_ms: 1000,
        }
    }
}

/// Progress towards the unlock threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapSequence {
    pub count: u32,
    pub window_start_ms: Option<u64>,
}

/// Baseline of an in-flight reload swipe.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeGesture {
    pub reference_y: f32,
    pub start_ms: u64,
    pub active: bool,
}

/// Gesture state machine for one browser surface.
///
/// Construct one per surface and drop it with the surface. Feed every event
/// through [`GestureClassifier::process`] before handing it on.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    /// Physical pixels per density-independent unit
    density: f32,
    taps: TapSequence,
    swipe: SwipeGesture,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig, density: f32) -> Self {
        Self {
            config,
            density,
            taps: TapSequence::default(),
            swipe: SwipeGesture::default(),
        }
    }

    /// Update the display density (e.g. when the window moves to another monitor).
    pub fn set_density(&mut self, density: f32) {
        self.density = density;
    }

    pub fn tap_sequence(&self) -> TapSequence {
        self.taps
    }

    pub fn swipe_gesture(&self) -> SwipeGesture {
        self.swipe
    }

    /// Minimum swipe distance in physical pixels.
    pub fn min_swipe_px(&self) -> f32 {
        (self.config.swipe_min_distance_dp * self.density).round()
    }

    /// Classify one event. Never fails and never consumes the event.
    pub fn process(&mut self, event: &PointerEvent) -> Outcome {
        let mut outcome = Outcome::default();

        // A cancel ends the swipe whatever it carries
        if event.action == PointerAction::Cancel {
            self.swipe.active = false;
        }

        // Nothing usable to look at
        if event.pointers.is_empty() {
            return outcome;
        }

        if self.track_swipe(event) {
            log::debug!("three-finger swipe recognised at {} ms", event.time_ms);
            outcome.push(Signal::ReloadPage);
        }

        if event.action == PointerAction::Down && event.pointer_count == 1 && self.track_tap(event.time_ms) {
            log::debug!("unlock tap sequence completed at {} ms", event.time_ms);
            outcome.push(Signal::UnlockSettings);
        }

        outcome
    }

    fn track_tap(&mut self, now: u64) -> bool {
        if self.taps.count > 0 {
            let start = self.taps.window_start_ms.unwrap_or(now);
            if now.saturating_sub(start) > self.config.tap_timeout_ms {
                self.taps = TapSequence::default();
            }
        }

        if self.taps.count == 0 {
            self.taps.window_start_ms = Some(now);
        }

        self.taps.count += 1;

        if self.taps.count >= self.config.tap_threshold {
            self.taps = TapSequence::default();
            return true;
        }
        false
    }

    fn track_swipe(&mut self, event: &PointerEvent) -> bool {
        let fingers = self.config.swipe_fingers;

        match event.action {
            PointerAction::Down | PointerAction::PointerDown => {
                if event.pointer_count >= fingers {
                    if let Some(y) = event.mean_y(fingers) {
                        self.swipe = SwipeGesture {
                            reference_y: y,
                            start_ms: event.time_ms,
                            active: true,
                        };
                    }
                }
                false
            }
            PointerAction::Move => {
                if !self.swipe.active {
                    return false;
                }
                if event.pointer_count < fingers {
                    self.swipe.active = false;
                    return false;
                }
                let Some(current_y) = event.mean_y(fingers) else {
                    return false;
                };

                let dy = current_y - self.swipe.reference_y;
                let elapsed = event.time_ms.saturating_sub(self.swipe.start_ms);

                if dy >= self.min_swipe_px() && elapsed <= self.config.swipe_max_duration_ms {
                    self.swipe.active = false;
                    return true;
                }
                false
            }
            PointerAction::Up | PointerAction::PointerUp | PointerAction::Cancel => {
                self.swipe.active = false;
                false
            }
        }
    }
}
