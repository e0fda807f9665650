//! Heuristic classification of host elements.
//!
//! What counts as a content block, a slide-opening heading, a divider, page
//! chrome or a real scroll container is environment-specific guesswork. All
//! of it lives here, as data, so it can be tuned from the config file without
//! touching the scanner or the state machine.

use serde::{Deserialize, Serialize};

use crate::host::HostDocument;
use crate::tree;

/// A single-element selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Matcher {
    Tag(String),
    Class(String),
    Attr {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Every inner matcher must hold.
    All(Vec<Matcher>),
}

impl Matcher {
    pub fn tag(name: &str) -> Self {
        Matcher::Tag(name.to_string())
    }

    pub fn class(name: &str) -> Self {
        Matcher::Class(name.to_string())
    }

    pub fn attr(name: &str, value: &str) -> Self {
        Matcher::Attr {
            name: name.to_string(),
            value: Some(value.to_string()),
        }
    }

    pub fn has_attr(name: &str) -> Self {
        Matcher::Attr {
            name: name.to_string(),
            value: None,
        }
    }

    pub fn matches<H: HostDocument>(&self, host: &H, node: &H::Node) -> bool {
        match self {
            Matcher::Tag(tag) => host.tag_name(node).eq_ignore_ascii_case(tag),
            Matcher::Class(class) => host
                .attribute(node, "class")
                .is_some_and(|c| c.split_whitespace().any(|c| c == class)),
            Matcher::Attr { name, value } => match (host.attribute(node, name), value) {
                (Some(actual), Some(expected)) => actual == *expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
            Matcher::All(inner) => inner.iter().all(|m| m.matches(host, node)),
        }
    }

    /// CSS selector text matching the same elements.
    pub fn to_css(&self) -> String {
        match self {
            Matcher::Tag(tag) => tag.clone(),
            Matcher::Class(class) => format!(".{class}"),
            Matcher::Attr { name, value: None } => format!("[{name}]"),
            Matcher::Attr {
                name,
                value: Some(value),
            } => format!("[{name}={}]", css_string(value)),
            Matcher::All(inner) => {
                // Type selectors must lead a compound selector.
                let (tags, rest): (Vec<&Matcher>, Vec<&Matcher>) =
                    inner.iter().partition(|m| matches!(m, Matcher::Tag(_)));
                tags.into_iter().chain(rest).map(Matcher::to_css).collect()
            }
        }
    }
}

/// Quote `value` as a CSS string literal.
pub fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn any_match<H: HostDocument>(matchers: &[Matcher], host: &H, node: &H::Node) -> bool {
    matchers.iter().any(|m| m.matches(host, node))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classifier {
    /// Attribute carrying a content block's stable identifier.
    pub block_attribute: String,
    /// Class the host puts on selectable units that may lack an identifier.
    pub selectable_class: String,
    /// Content root candidates, most specific first.
    pub content_roots: Vec<Matcher>,
    /// Fallback scroll container candidates, probed in order.
    pub scroll_candidates: Vec<Matcher>,
    pub headings: Vec<Matcher>,
    pub dividers: Vec<Matcher>,
    /// Page chrome hidden while presenting.
    pub chrome: Vec<Matcher>,
    pub editable_tags: Vec<String>,
    /// A container only counts as scrollable when its content overflows
    /// by more than this many pixels.
    pub scroll_excess_px: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            block_attribute: "data-block-id".to_string(),
            selectable_class: "notion-selectable".to_string(),
            content_roots: vec![
                Matcher::attr("data-testid", "page-content"),
                Matcher::class("notion-page-content"),
                Matcher::attr("role", "main"),
            ],
            scroll_candidates: vec![
                Matcher::class("notion-frame"),
                Matcher::class("notion-scroller"),
                Matcher::attr("role", "main"),
            ],
            headings: vec![
                Matcher::All(vec![
                    Matcher::attr("role", "heading"),
                    Matcher::attr("aria-level", "1"),
                ]),
                Matcher::tag("h1"),
            ],
            dividers: vec![
                Matcher::tag("hr"),
                Matcher::attr("role", "separator"),
                Matcher::class("notion-divider-block"),
            ],
            chrome: vec![
                Matcher::class("notion-topbar"),
                Matcher::attr("data-testid", "topbar"),
                Matcher::class("notion-sidebar"),
                Matcher::attr("data-testid", "app-sidebar"),
                Matcher::class("notion-page-header"),
                Matcher::attr("data-testid", "page-header"),
                Matcher::attr("data-testid", "page-properties"),
                Matcher::attr("data-testid", "page-cover"),
                Matcher::attr("data-testid", "page-icon"),
                Matcher::class("notion-page-controls"),
                Matcher::class("notion-peek-renderer"),
                Matcher::attr("data-testid", "right-pane"),
                Matcher::attr("role", "complementary"),
            ],
            editable_tags: vec![
                "input".to_string(),
                "textarea".to_string(),
                "select".to_string(),
            ],
            scroll_excess_px: 50.0,
        }
    }
}

impl Classifier {
    pub fn is_block<H: HostDocument>(&self, host: &H, node: &H::Node) -> bool {
        host.attribute(node, &self.block_attribute).is_some()
    }

    /// The node's stable identifier, if it carries a non-empty one.
    pub fn block_id<H: HostDocument>(&self, host: &H, node: &H::Node) -> Option<String> {
        host.attribute(node, &self.block_attribute)
            .filter(|id| !id.is_empty())
    }

    pub fn is_heading<H: HostDocument>(&self, host: &H, node: &H::Node) -> bool {
        any_match(&self.headings, host, node)
    }

    pub fn is_divider<H: HostDocument>(&self, host: &H, node: &H::Node) -> bool {
        any_match(&self.dividers, host, node)
    }

    pub fn is_chrome<H: HostDocument>(&self, host: &H, node: &H::Node) -> bool {
        any_match(&self.chrome, host, node)
    }

    pub fn is_scrollable<H: HostDocument>(&self, host: &H, node: &H::Node) -> bool {
        host.overflow_y(node).can_scroll()
            && host.scroll_height(node) > host.client_height(node) + self.scroll_excess_px
    }

    /// Whether keyboard focus on `node` means the user is typing.
    pub fn is_editable<H: HostDocument>(&self, host: &H, node: &H::Node) -> bool {
        let tag = host.tag_name(node);
        if self.editable_tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            return true;
        }
        // The nearest explicit contenteditable decides, as in the DOM.
        let decided = tree::closest(host, node, |n| {
            host.attribute(n, "contenteditable").is_some()
        });
        decided
            .and_then(|n| host.attribute(&n, "contenteditable"))
            .is_some_and(|v| matches!(v.as_str(), "" | "true" | "plaintext-only"))
    }

    /// Nearest block owning `node`: a block-identified ancestor, else a
    /// selectable ancestor, else the node itself.
    pub fn owning_block<H: HostDocument>(&self, host: &H, node: &H::Node) -> H::Node {
        tree::closest(host, node, |n| self.is_block(host, n))
            .or_else(|| {
                tree::closest(host, node, |n| {
                    Matcher::Class(self.selectable_class.clone()).matches(host, n)
                })
            })
            .unwrap_or_else(|| node.clone())
    }

    /// Selector list for the content root candidates.
    pub fn content_root_selector(&self) -> String {
        self.content_roots
            .iter()
            .map(Matcher::to_css)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
