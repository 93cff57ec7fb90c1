//! Minimal document model for the kiosk page view.
//!
//! A [`DomTree`] holds only the `<body>` of a page and only the attributes
//! the surface acts on; see [`parser`] for what gets dropped.

pub mod parser;

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct DomNode {
    /// Empty for text nodes
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub children: Vec<DomNode>,
}

impl DomNode {
    pub fn element(
        tag: impl Into<String>,
        attrs: HashMap<String, String>,
        children: Vec<DomNode>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes: attrs,
            text: String::new(),
            children,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: String::new(),
            attributes: HashMap::new(),
            text: content.into(),
            children: Vec::new(),
        }
    }

    pub fn is_text(&self) -> bool {
        self.tag.is_empty()
    }

    /// All text below this node, joined with single spaces.
    pub fn collect_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text_inner(&mut buf);
        buf
    }

    fn collect_text_inner(&self, buf: &mut String) {
        if !self.text.is_empty() {
            if !buf.is_empty() {
                buf.push(' ');
            }
            buf.push_str(&self.text);
        }
        for child in &self.children {
            child.collect_text_inner(buf);
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Depth-first search for the first element with `tag`.
    pub fn find(&self, tag: &str) -> Option<&DomNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(tag))
    }

    /// Anchors that ask for a separate browsing context.
    pub fn opens_new_window(&self) -> bool {
        self.tag == "a" && self.attr("target") == Some("_blank")
    }

    /// Media source of a `<video>`, either its own `src` or its first `<source>`.
    pub fn media_src(&self) -> Option<&str> {
        self.attr("src")
            .or_else(|| self.find("source").and_then(|s| s.attr("src")))
    }
}

/// A loaded page body and the URL it came from.
#[derive(Debug, Clone)]
pub struct DomTree {
    pub body: DomNode,
    /// Final URL after redirects; links resolve against it
    pub url: String,
}

impl DomTree {
    /// Resolve a link found in this document.
    pub fn resolve(&self, href: &str) -> String {
        resolve_url(&self.url, href)
    }
}

fn resolve_url(base: &str, href: &str) -> String {
    // Protocol-relative
    if href.starts_with("//") {
        return format!("https:{}", href);
    }
    match url::Url::parse(base).and_then(|b| b.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_links() {
        assert_eq!(resolve_url("https://a.test/x/y", "z"), "https://a.test/x/z");
        assert_eq!(resolve_url("https://a.test/x/y", "/root"), "https://a.test/root");
        assert_eq!(resolve_url("https://a.test/", "//cdn.test/p"), "https://cdn.test/p");
        assert_eq!(resolve_url("https://a.test/", "http://b.test/"), "http://b.test/");
        // Nothing to resolve against
        assert_eq!(resolve_url("", "menu.html"), "menu.html");
    }

    #[test]
    fn detects_new_window_links() {
        let mut attrs = HashMap::new();
        attrs.insert("target".to_string(), "_blank".to_string());
        let link = DomNode::element("a", attrs, vec![DomNode::text("pay")]);
        assert!(link.opens_new_window());
        assert!(!DomNode::element("a", HashMap::new(), Vec::new()).opens_new_window());
    }

    #[test]
    fn text_flattens_children() {
        let p = DomNode::element(
            "p",
            HashMap::new(),
            vec![
                DomNode::text("Open"),
                DomNode::element("b", HashMap::new(), vec![DomNode::text("daily")]),
                DomNode::text("9-5"),
            ],
        );
        assert_eq!(p.collect_text(), "Open daily 9-5");
        assert!(!p.is_text());
        assert!(p.children[0].is_text());
    }

    #[test]
    fn media_src_falls_back_to_source_child() {
        let mut src = HashMap::new();
        src.insert("src".to_string(), "/promo.mp4".to_string());
        let video = DomNode::element("video", HashMap::new(), vec![DomNode::element("source", src, Vec::new())]);
        assert_eq!(video.media_src(), Some("/promo.mp4"));
        assert_eq!(DomNode::element("video", HashMap::new(), Vec::new()).media_src(), None);
    }
}
