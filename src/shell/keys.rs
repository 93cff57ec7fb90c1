//! Hardware key handling.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardwareKey {
    Back,
    Menu,
    VolumeDown,
}

impl HardwareKey {
    /// Keys whose long press opens settings.
    pub fn opens_settings(self) -> bool {
        matches!(self, HardwareKey::Menu | HardwareKey::VolumeDown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRelease {
    /// Released before the long-press timeout
    Short,
    /// A long press was already reported for this hold
    Long,
}

#[derive(Debug, Clone, Copy)]
struct Hold {
    down_at: u64,
    fired: bool,
}

/// Detects keys held past a timeout. Polled once per frame.
#[derive(Debug)]
pub struct LongPressDetector {
    timeout_ms: u64,
    held: HashMap<HardwareKey, Hold>,
}

impl LongPressDetector {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            held: HashMap::new(),
        }
    }

    /// Key went down. Auto-repeat presses keep the original start time.
    pub fn press(&mut self, key: HardwareKey, now_ms: u64) {
        self.held.entry(key).or_insert(Hold {
            down_at: now_ms,
            fired: false,
        });
    }

    /// Key went up. `None` if it was never seen going down.
    pub fn release(&mut self, key: HardwareKey) -> Option<KeyRelease> {
        self.held.remove(&key).map(|hold| {
            if hold.fired {
                KeyRelease::Long
            } else {
                KeyRelease::Short
            }
        })
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// Keys whose hold crossed the timeout since the last poll.
    pub fn poll(&mut self, now_ms: u64) -> Vec<HardwareKey> {
        let mut fired = Vec::new();
        for (key, hold) in self.held.iter_mut() {
            if !hold.fired && now_ms.saturating_sub(hold.down_at) >= self.timeout_ms {
                hold.fired = true;
                fired.push(*key);
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_press_fires_once() {
        let mut keys = LongPressDetector::new(500);
        keys.press(HardwareKey::Menu, 1_000);
        assert!(keys.poll(1_499).is_empty());
        assert_eq!(keys.poll(1_500), vec![HardwareKey::Menu]);
        assert!(keys.poll(2_000).is_empty());
        assert_eq!(keys.release(HardwareKey::Menu), Some(KeyRelease::Long));
        assert!(!keys.any_held());
    }

    #[test]
    fn repeat_presses_keep_start_time() {
        let mut keys = LongPressDetector::new(500);
        keys.press(HardwareKey::VolumeDown, 0);
        keys.press(HardwareKey::VolumeDown, 400);
        assert_eq!(keys.poll(500), vec![HardwareKey::VolumeDown]);
    }

    #[test]
    fn short_press_and_unknown_release() {
        let mut keys = LongPressDetector::new(500);
        keys.press(HardwareKey::Back, 0);
        assert!(keys.poll(100).is_empty());
        assert_eq!(keys.release(HardwareKey::Back), Some(KeyRelease::Short));
        assert_eq!(keys.release(HardwareKey::Back), None);
    }

    #[test]
    fn only_menu_and_volume_open_settings() {
        assert!(HardwareKey::Menu.opens_settings());
        assert!(HardwareKey::VolumeDown.opens_settings());
        assert!(!HardwareKey::Back.opens_settings());
    }
}
