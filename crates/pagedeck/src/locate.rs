//! Finding the content root and the element that actually scrolls it.
//!
//! Both are recomputed on every call: the host re-renders freely and may
//! swap either element at any time.

use crate::classify::Classifier;
use crate::host::HostDocument;
use crate::tree;

/// Where scroll offsets live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget<N> {
    Viewport,
    Element(N),
}

/// Best-effort root of slide-worthy content. Always returns an element,
/// falling back to `<body>`.
pub fn content_root<H: HostDocument>(host: &H, classifier: &Classifier) -> H::Node {
    let document = host.document_element();
    classifier
        .content_roots
        .iter()
        .find_map(|m| tree::find_first(host, &document, |n| m.matches(host, n)))
        .unwrap_or_else(|| host.body())
}

pub fn scroll_target<H: HostDocument>(host: &H, classifier: &Classifier) -> ScrollTarget<H::Node> {
    let root = content_root(host, classifier);
    if let Some(el) = tree::closest(host, &root, |n| classifier.is_scrollable(host, n)) {
        return ScrollTarget::Element(el);
    }

    let document = host.document_element();
    classifier
        .scroll_candidates
        .iter()
        .filter_map(|m| tree::find_first(host, &document, |n| m.matches(host, n)))
        .find(|el| classifier.is_scrollable(host, el))
        .map(ScrollTarget::Element)
        .unwrap_or(ScrollTarget::Viewport)
}
