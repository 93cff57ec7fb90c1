//! Raw pointer events as delivered to the browser surface.

/// Kind of pointer transition, mirroring the platform's masked actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// First contact of a gesture
    Down,
    /// Additional contact while others are held
    PointerDown,
    /// One or more held contacts moved
    Move,
    /// A contact lifted while others remain
    PointerUp,
    /// Last contact lifted
    Up,
    /// Gesture aborted by the system
    Cancel,
}

/// One active point of contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// A single input event.
///
/// `pointer_count` is what the input system claims; `pointers` is what it
/// actually delivered. They normally agree, but a sloppy source may report
/// more pointers than it lists, so consumers must never index past
/// `pointers.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pointer_count: usize,
    pub pointers: Vec<Pointer>,
    /// Milliseconds on a monotonic clock
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(action: PointerAction, time_ms: u64, pointers: Vec<Pointer>) -> Self {
        Self {
            action,
            pointer_count: pointers.len(),
            pointers,
            time_ms,
        }
    }

    /// Override the claimed pointer count.
    pub fn with_pointer_count(mut self, count: usize) -> Self {
        self.pointer_count = count;
        self
    }

    /// Mean Y of the first `limit` pointers that are actually present.
    /// `None` when there is nothing to average.
    pub fn mean_y(&self, limit: usize) -> Option<f32> {
        let n = self.pointers.len().min(limit);
        if n == 0 {
            return None;
        }
        let sum: f32 = self.pointers[..n].iter().map(|p| p.y).sum();
        Some(sum / n as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_y_uses_first_pointers_only() {
        let ev = PointerEvent::new(
            PointerAction::Move,
            0,
            vec![
                Pointer::new(1, 0.0, 100.0),
                Pointer::new(2, 0.0, 200.0),
                Pointer::new(3, 0.0, 300.0),
                Pointer::new(4, 0.0, 10_000.0),
            ],
        );
        assert_eq!(ev.mean_y(3), Some(200.0));
    }

    #[test]
    fn mean_y_tolerates_missing_pointers() {
        let ev = PointerEvent::new(
            PointerAction::Move,
            0,
            vec![Pointer::new(1, 0.0, 50.0)],
        )
        .with_pointer_count(3);
        assert_eq!(ev.pointer_count, 3);
        assert_eq!(ev.mean_y(3), Some(50.0));

        let empty = PointerEvent::new(PointerAction::Move, 0, Vec::new()).with_pointer_count(3);
        assert_eq!(empty.mean_y(3), None);
    }
}
