//! Page loading and history for the kiosk surface.
//!
//! Loads run on a background thread; the UI thread calls [`PageView::poll`]
//! every frame to pick up the result.

use std::sync::{mpsc, Arc};
use std::time::Duration;

use thiserror::Error;

use super::Browser;
use crate::dom::parser::parse_html;
use crate::dom::DomTree;
use crate::net::fetch::{fetch_url, FetchError};

/// A loaded document.
#[derive(Debug, Clone)]
pub struct Page {
    pub dom: DomTree,
    pub status: u16,
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("[fetch] {0}")]
    Fetch(#[from] FetchError),
    #[error("Not a web page ({0})")]
    NotHtml(String),
    #[error("[load] {0}")]
    Other(String),
}

/// Turns a URL into a page. Runs off the UI thread.
pub type PageLoader = Arc<dyn Fn(&str) -> Result<Page, PageError> + Send + Sync>;

fn network_loader() -> PageLoader {
    Arc::new(|url: &str| {
        let fetched = fetch_url(url)?;
        if !fetched.is_html() {
            return Err(PageError::NotHtml(fetched.content_type));
        }
        let dom = parse_html(&fetched.html, &fetched.url);
        Ok(Page {
            dom,
            status: fetched.status,
        })
    })
}

pub struct PageView {
    loader: PageLoader,
    repaint: Option<egui::Context>,
    history: Vec<String>,
    history_idx: usize,
    page: Option<Page>,
    error: Option<String>,
    loading: bool,
    fetch_rx: Option<mpsc::Receiver<Result<Page, PageError>>>,
    load_count: u64,
}

impl Default for PageView {
    fn default() -> Self {
        Self::with_loader(network_loader())
    }
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(loader: PageLoader) -> Self {
        Self {
            loader,
            repaint: None,
            history: Vec::new(),
            history_idx: 0,
            page: None,
            error: None,
            loading: false,
            fetch_rx: None,
            load_count: 0,
        }
    }

    /// Wake the UI when a background load finishes.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Number of loads started so far.
    pub fn load_count(&self) -> u64 {
        self.load_count
    }

    /// Resolve a link clicked on the shown page. Without a page the link is
    /// returned unchanged.
    pub fn resolve(&self, href: &str) -> String {
        match &self.page {
            Some(page) => page.dom.resolve(href),
            None => href.to_string(),
        }
    }

    /// Start an async page fetch without touching history.
    ///
    /// A load already in flight is superseded; its result is dropped.
    fn start_load(&mut self, url: String) {
        self.loading = true;
        self.error = None;
        self.load_count += 1;
        log::info!("loading {}", url);

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let loader = Arc::clone(&self.loader);
        let ctx = self.repaint.clone();

        std::thread::spawn(move || {
            let result = loader(&url);
            let _ = tx.send(result);
            if let Some(ctx) = ctx {
                ctx.request_repaint();
            }
        });
    }

    /// Poll the fetch channel and update state when a result arrives.
    /// Returns true when a load finished.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.fetch_rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.finish(result);
                true
            }
            Err(mpsc::TryRecvError::Empty) => false,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.finish(Err(PageError::Other("loader stopped".to_string())));
                true
            }
        }
    }

    /// Block until the in-flight load finishes or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let Some(rx) = &self.fetch_rx else {
            return false;
        };
        match rx.recv_timeout(timeout) {
            Ok(result) => {
                self.finish(result);
                true
            }
            Err(_) => false,
        }
    }

    fn finish(&mut self, result: Result<Page, PageError>) {
        match result {
            Ok(page) => {
                log::info!("loaded {} ({})", page.dom.url, page.status);
                self.page = Some(page);
                self.error = None;
            }
            Err(e) => {
                log::warn!("page load failed: {}", e);
                self.error = Some(e.to_string());
                self.page = None;
            }
        }
        self.loading = false;
        self.fetch_rx = None;
    }
}

impl Browser for PageView {
    fn load_url(&mut self, url: &str) {
        let url = url.to_string();
        if self.history.is_empty() || self.history[self.history_idx] != url {
            // Truncate forward history before pushing
            self.history.truncate(self.history_idx + 1);
            self.history.push(url.clone());
            self.history_idx = self.history.len() - 1;
        }
        self.start_load(url);
    }

    fn reload(&mut self) {
        if let Some(url) = self.current_url().map(str::to_string) {
            self.start_load(url);
        }
    }

    fn can_go_back(&self) -> bool {
        self.history_idx > 0
    }

    fn go_back(&mut self) {
        if self.history_idx > 0 {
            self.history_idx -= 1;
            let url = self.history[self.history_idx].clone();
            self.start_load(url);
        }
    }

    fn current_url(&self) -> Option<&str> {
        self.history.get(self.history_idx).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    fn stub_view() -> PageView {
        PageView::with_loader(Arc::new(|url: &str| {
            if url.contains("broken") {
                return Err(PageError::Other("unreachable host".to_string()));
            }
            if url.contains("pdf") {
                return Err(PageError::NotHtml("application/pdf".to_string()));
            }
            let html = format!("<html><head><title>{url}</title></head><body><p>{url}</p></body></html>");
            Ok(Page {
                dom: parse_html(&html, url),
                status: 200,
            })
        }))
    }

    #[test]
    fn loads_and_tracks_history() {
        let mut view = stub_view();
        assert!(!view.can_go_back());
        assert_eq!(view.current_url(), None);

        view.load_url("https://a.test/");
        assert!(view.is_loading());
        assert!(view.wait(WAIT));
        assert!(!view.is_loading());
        assert_eq!(view.page().map(|p| p.dom.body.collect_text()), Some("https://a.test/".to_string()));

        view.load_url("https://b.test/");
        view.wait(WAIT);
        assert!(view.can_go_back());

        view.go_back();
        view.wait(WAIT);
        assert_eq!(view.current_url(), Some("https://a.test/"));
        assert!(!view.can_go_back());

        // Navigating from the middle drops the forward entry
        view.load_url("https://c.test/");
        view.wait(WAIT);
        view.go_back();
        view.wait(WAIT);
        assert_eq!(view.current_url(), Some("https://a.test/"));
    }

    #[test]
    fn reload_refetches_current_entry() {
        let mut view = stub_view();
        view.reload();
        assert_eq!(view.load_count(), 0);

        view.load_url("https://a.test/");
        view.wait(WAIT);
        view.reload();
        assert_eq!(view.load_count(), 2);
        view.wait(WAIT);
        assert_eq!(view.current_url(), Some("https://a.test/"));
        assert!(!view.can_go_back());
    }

    #[test]
    fn same_url_is_not_pushed_twice() {
        let mut view = stub_view();
        view.load_url("https://a.test/");
        view.load_url("https://a.test/");
        view.wait(WAIT);
        assert!(!view.can_go_back());
    }

    #[test]
    fn failures_are_reported() {
        let mut view = stub_view();
        view.load_url("https://broken.test/");
        view.wait(WAIT);
        assert!(view.page().is_none());
        assert_eq!(view.error(), Some("[load] unreachable host"));
    }

    #[test]
    fn non_html_is_reported() {
        let mut view = stub_view();
        view.load_url("https://a.test/menu.pdf");
        view.wait(WAIT);
        assert!(view.page().is_none());
        assert_eq!(view.error(), Some("Not a web page (application/pdf)"));
    }

    #[test]
    fn links_resolve_against_shown_page() {
        let mut view = stub_view();
        assert_eq!(view.resolve("/menu"), "/menu");
        view.load_url("https://a.test/x/index.html");
        view.wait(WAIT);
        assert_eq!(view.resolve("menu"), "https://a.test/x/menu");
        assert_eq!(view.resolve("//cdn.test/a"), "https://cdn.test/a");
    }

    #[test]
    fn newer_load_supersedes_older() {
        let mut view = stub_view();
        view.load_url("https://a.test/");
        view.load_url("https://b.test/");
        view.wait(WAIT);
        assert_eq!(view.page().map(|p| p.dom.url.as_str()), Some("https://b.test/"));
    }
}
