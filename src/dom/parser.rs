//! HTML to [`DomTree`] for the kiosk surface.
//!
//! Only what the surface draws survives: the `<body>` subtree, visible text
//! with whitespace collapsed, and the few attributes links, images and media
//! read. Everything else is dropped during conversion.

use std::collections::HashMap;

use scraper::{ElementRef, Html, Node, Selector};

use super::{DomNode, DomTree};

/// Elements that never render; their whole subtree is skipped.
const HIDDEN: &[&str] = &[
    "head", "script", "style", "noscript", "svg", "template", "iframe", "object",
];

/// Attributes `ui::render_dom_node` and link handling look at.
const KEPT_ATTRS: &[&str] = &["href", "target", "src", "alt"];

/// Parse raw HTML fetched from `url`.
pub fn parse_html(html: &str, url: &str) -> DomTree {
    let document = Html::parse_document(html);

    // html5ever always synthesises a body, even for fragments
    let body = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .and_then(convert)
        .unwrap_or_else(|| DomNode::element("body", HashMap::new(), Vec::new()));

    DomTree {
        body,
        url: url.to_string(),
    }
}

fn convert(el: ElementRef<'_>) -> Option<DomNode> {
    let tag = el.value().name();
    if HIDDEN.contains(&tag) {
        return None;
    }

    let attributes = el
        .value()
        .attrs()
        .filter(|(name, _)| KEPT_ATTRS.contains(name))
        .map(|(name, value)| (name.to_string(), value.trim().to_string()))
        .collect();

    let children = el
        .children()
        .filter_map(|child| match child.value() {
            Node::Element(_) => ElementRef::wrap(child).and_then(convert),
            Node::Text(t) => collapse_whitespace(&t.text).map(DomNode::text),
            _ => None,
        })
        .collect();

    Some(DomNode::element(tag, attributes, children))
}

fn collapse_whitespace(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_body() {
        let html = r#"
        <html>
            <head><title>Lobby Board</title></head>
            <body>
                <h1>Welcome</h1>
                <p>Check   in
                   at the desk</p>
            </body>
        </html>
        "#;

        let tree = parse_html(html, "https://kiosk.test");
        assert_eq!(tree.body.tag, "body");
        assert_eq!(tree.body.collect_text(), "Welcome Check in at the desk");
        assert!(tree.body.find("title").is_none());
    }

    #[test]
    fn drops_hidden_subtrees() {
        let html = r#"
        <html><body>
            <p>Visible</p>
            <script>alert("hidden");</script>
            <style>p { color: red }</style>
            <template><p>later</p></template>
        </body></html>
        "#;

        let tree = parse_html(html, "https://kiosk.test");
        assert_eq!(tree.body.collect_text(), "Visible");
        assert!(tree.body.find("script").is_none());
        assert!(tree.body.find("template").is_none());
    }

    #[test]
    fn keeps_only_attributes_the_surface_reads() {
        let tree = parse_html(
            r#"<body><a class="btn" href=" /pay " target="_blank" onclick="x()">Pay</a></body>"#,
            "https://shop.test/cart",
        );
        let link = tree.body.find("a").expect("anchor");
        assert_eq!(link.attr("href"), Some("/pay"));
        assert_eq!(link.attr("class"), None);
        assert_eq!(link.attr("onclick"), None);
        assert!(link.opens_new_window());
        assert_eq!(tree.resolve("/pay"), "https://shop.test/pay");
    }

    #[test]
    fn fragments_get_a_body() {
        let tree = parse_html("just text", "https://kiosk.test");
        assert_eq!(tree.body.tag, "body");
        assert_eq!(tree.body.collect_text(), "just text");
    }
}
