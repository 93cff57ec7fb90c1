//! Translate egui's per-contact touch events into whole-gesture
//! [`PointerEvent`]s, the shape the classifier and the page surface expect.
//!
//! egui reports each contact separately (`Event::Touch` with its own id and
//! phase). Platform motion events instead carry every held contact on each
//! event and distinguish the first/last contact from the others, so the
//! tracker keeps the set of live contacts in the order they landed.

use egui::{Pos2, TouchId, TouchPhase};

use super::event::{Pointer, PointerAction, PointerEvent};

/// Id used for the emulated mouse pointer
const MOUSE_POINTER_ID: u64 = u64::MAX;

/// Live contact set for one surface.
#[derive(Debug, Default)]
pub struct TouchTracker {
    /// Held contacts in landing order
    active: Vec<Pointer>,
    mouse_down: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts currently held.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Feed one egui touch. `pixels_per_point` converts egui points to
    /// physical pixels so distances match the classifier's density scaling.
    pub fn on_touch(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        pos: Pos2,
        pixels_per_point: f32,
        time_ms: u64,
    ) -> Option<PointerEvent> {
        let pointer = Pointer::new(id.0, pos.x * pixels_per_point, pos.y * pixels_per_point);
        self.apply(pointer, phase, time_ms)
    }

    /// Emulate a single finger with the primary mouse button, but only when
    /// no real touches are in flight (touch screens also synthesise clicks).
    pub fn on_mouse_button(
        &mut self,
        pressed: bool,
        pos: Pos2,
        pixels_per_point: f32,
        time_ms: u64,
    ) -> Option<PointerEvent> {
        let pointer = Pointer::new(MOUSE_POINTER_ID, pos.x * pixels_per_point, pos.y * pixels_per_point);
        if pressed {
            if !self.active.is_empty() {
                return None;
            }
            self.mouse_down = true;
            self.apply(pointer, TouchPhase::Start, time_ms)
        } else {
            if !self.mouse_down {
                return None;
            }
            self.mouse_down = false;
            self.apply(pointer, TouchPhase::End, time_ms)
        }
    }

    fn apply(&mut self, pointer: Pointer, phase: TouchPhase, time_ms: u64) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Start => {
                let action = if self.active.is_empty() {
                    PointerAction::Down
                } else {
                    PointerAction::PointerDown
                };
                self.active.retain(|p| p.id != pointer.id);
                self.active.push(pointer);
                Some(self.snapshot(action, time_ms))
            }
            TouchPhase::Move => {
                let slot = self.active.iter_mut().find(|p| p.id == pointer.id)?;
                *slot = pointer;
                Some(self.snapshot(PointerAction::Move, time_ms))
            }
            TouchPhase::End => {
                let slot = self.active.iter_mut().find(|p| p.id == pointer.id)?;
                *slot = pointer;
                let action = if self.active.len() == 1 {
                    PointerAction::Up
                } else {
                    PointerAction::PointerUp
                };
                // The lifting contact is still part of its own up event
                let event = self.snapshot(action, time_ms);
                self.active.retain(|p| p.id != pointer.id);
                Some(event)
            }
            TouchPhase::Cancel => {
                if self.active.is_empty() {
                    return None;
                }
                let event = self.snapshot(PointerAction::Cancel, time_ms);
                self.active.clear();
                self.mouse_down = false;
                Some(event)
            }
        }
    }

    fn snapshot(&self, action: PointerAction, time_ms: u64) -> PointerEvent {
        PointerEvent::new(action, time_ms, self.active.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn touch(t: &mut TouchTracker, id: u64, phase: TouchPhase, y: f32) -> Option<PointerEvent> {
        t.on_touch(TouchId(id), phase, pos2(10.0 * id as f32, y), 1.0, 0)
    }

    #[test]
    fn builds_platform_style_actions() {
        let mut t = TouchTracker::new();
        assert_eq!(touch(&mut t, 1, TouchPhase::Start, 0.0).map(|e| e.action), Some(PointerAction::Down));
        assert_eq!(touch(&mut t, 2, TouchPhase::Start, 0.0).map(|e| e.action), Some(PointerAction::PointerDown));

        let ev = touch(&mut t, 3, TouchPhase::Start, 0.0).expect("third finger");
        assert_eq!(ev.pointer_count, 3);
        assert_eq!(ev.pointers.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        let mv = touch(&mut t, 2, TouchPhase::Move, 40.0).expect("move");
        assert_eq!(mv.action, PointerAction::Move);
        assert_eq!(mv.pointers[1].y, 40.0);

        let up = touch(&mut t, 2, TouchPhase::End, 40.0).expect("lift");
        assert_eq!(up.action, PointerAction::PointerUp);
        assert_eq!(up.pointer_count, 3);
        assert_eq!(t.active_count(), 2);

        touch(&mut t, 1, TouchPhase::End, 0.0);
        let last = touch(&mut t, 3, TouchPhase::End, 0.0).expect("last lift");
        assert_eq!(last.action, PointerAction::Up);
        assert_eq!(t.active_count(), 0);
    }

    #[test]
    fn unknown_contacts_are_ignored() {
        let mut t = TouchTracker::new();
        assert!(touch(&mut t, 9, TouchPhase::Move, 0.0).is_none());
        assert!(touch(&mut t, 9, TouchPhase::End, 0.0).is_none());
        assert!(touch(&mut t, 9, TouchPhase::Cancel, 0.0).is_none());
    }

    #[test]
    fn cancel_clears_everything() {
        let mut t = TouchTracker::new();
        touch(&mut t, 1, TouchPhase::Start, 0.0);
        touch(&mut t, 2, TouchPhase::Start, 0.0);
        let ev = touch(&mut t, 1, TouchPhase::Cancel, 0.0).expect("cancel");
        assert_eq!(ev.action, PointerAction::Cancel);
        assert_eq!(t.active_count(), 0);
    }

    #[test]
    fn scales_to_physical_pixels() {
        let mut t = TouchTracker::new();
        let ev = t
            .on_touch(TouchId(1), TouchPhase::Start, pos2(10.0, 20.0), 2.5, 7)
            .expect("down");
        assert_eq!(ev.pointers[0].x, 25.0);
        assert_eq!(ev.pointers[0].y, 50.0);
        assert_eq!(ev.time_ms, 7);
    }

    #[test]
    fn mouse_emulation_yields_to_touch() {
        let mut t = TouchTracker::new();
        let down = t.on_mouse_button(true, pos2(1.0, 1.0), 1.0, 0).expect("click");
        assert_eq!(down.action, PointerAction::Down);
        assert_eq!(t.on_mouse_button(false, pos2(1.0, 1.0), 1.0, 1).map(|e| e.action), Some(PointerAction::Up));

        touch(&mut t, 1, TouchPhase::Start, 0.0);
        assert!(t.on_mouse_button(true, pos2(1.0, 1.0), 1.0, 2).is_none());
        touch(&mut t, 1, TouchPhase::End, 0.0);
        assert!(t.on_mouse_button(false, pos2(1.0, 1.0), 1.0, 3).is_none());
    }
}
