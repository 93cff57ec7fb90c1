//! Transient on-screen messages.
//!
//! Toasts are shown one at a time in arrival order; each stays up for its
//! length, measured from the moment it first becomes visible.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLength {
    Short,
    Long,
}

impl ToastLength {
    pub fn duration_ms(self) -> u64 {
        match self {
            ToastLength::Short => 2000,
            ToastLength::Long => 3500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub length: ToastLength,
}

impl Toast {
    pub fn short(message: impl Into<String>) -> Self {
        Self { message: message.into(), length: ToastLength::Short }
    }

    pub fn long(message: impl Into<String>) -> Self {
        Self { message: message.into(), length: ToastLength::Long }
    }
}

#[derive(Debug, Default)]
pub struct Toasts {
    queue: VecDeque<Toast>,
    /// When the head of the queue became visible
    shown_at: Option<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        log::info!("toast: {}", toast.message);
        self.queue.push_back(toast);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop expired toasts and return the one to display at `now_ms`.
    pub fn current(&mut self, now_ms: u64) -> Option<&Toast> {
        loop {
            let duration = self.queue.front()?.length.duration_ms();
            match self.shown_at {
                None => {
                    self.shown_at = Some(now_ms);
                    break;
                }
                Some(start) if now_ms.saturating_sub(start) >= duration => {
                    self.queue.pop_front();
                    self.shown_at = None;
                }
                Some(_) => break,
            }
        }
        self.queue.front()
    }
}
