//! The browser surface the kiosk drives.
//!
//! The shell only needs a handful of operations from whatever renders the
//! site, so they sit behind [`Browser`]. [`PageView`] is the built-in
//! implementation: fetch, parse, and hand the DOM to the UI for drawing.

pub mod page_view;

pub use page_view::{Page, PageError, PageLoader, PageView};

pub trait Browser {
    /// Navigate to `url`, pushing it onto the history.
    fn load_url(&mut self, url: &str);

    /// Load the current entry again.
    fn reload(&mut self);

    fn can_go_back(&self) -> bool;

    fn go_back(&mut self);

    /// URL of the current history entry.
    fn current_url(&self) -> Option<&str>;
}
