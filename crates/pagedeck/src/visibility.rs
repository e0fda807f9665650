//! Which content blocks belong to the current slide.

use std::collections::HashSet;

use crate::boundary::{self, Boundary};
use crate::classify::{Classifier, css_string};
use crate::host::HostDocument;
use crate::tree;

/// Stable ids of the blocks on screen for the current slide, in document
/// order. Empty means "hide nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleRange {
    ids: Vec<String>,
}

impl VisibleRange {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// A single rule hiding every block outside the range, scoped under
    /// `scope`. An empty range produces no rule so a bad computation can
    /// never blank the page.
    pub fn exclusion_rule(&self, scope: &str, block_attribute: &str) -> Option<String> {
        if self.ids.is_empty() {
            return None;
        }
        let mut selector = format!("{scope} [{block_attribute}]");
        for id in &self.ids {
            selector.push_str(&format!(":not([{block_attribute}={}])", css_string(id)));
        }
        Some(format!("{selector} {{ display: none !important; }}"))
    }
}

/// Blocks from the current boundary's block up to (excluding) the next
/// boundary's block, or to the end of the document when the next boundary
/// does not resolve, plus every block that encloses one of them.
pub fn compute_visible_range<H: HostDocument>(
    host: &H,
    classifier: &Classifier,
    root: &H::Node,
    boundaries: &[Boundary<H::Node>],
    current: usize,
) -> VisibleRange {
    let Some(current_boundary) = boundaries.get(current) else {
        return VisibleRange::default();
    };
    let blocks: Vec<H::Node> = tree::descendants(host, root)
        .into_iter()
        .filter(|n| classifier.is_block(host, n))
        .collect();
    let position_of = |boundary: &Boundary<H::Node>| {
        let el = boundary::resolve(host, classifier, root, boundary)?;
        let block = classifier.owning_block(host, &el);
        blocks.iter().position(|b| *b == block)
    };

    let Some(start) = position_of(current_boundary) else {
        return VisibleRange::default();
    };
    let end = boundaries
        .get(current + 1)
        .and_then(position_of)
        .unwrap_or(blocks.len());
    if end <= start {
        return VisibleRange::default();
    }

    // Hiding a block hides everything nested in it, so every block that
    // contains an in-range block stays visible too.
    let mut containers = HashSet::new();
    for block in &blocks[start..end] {
        let mut cur = host.parent(block);
        while let Some(node) = cur {
            if node == *root {
                break;
            }
            if classifier.is_block(host, &node) {
                containers.insert(node.clone());
            }
            cur = host.parent(&node);
        }
    }

    let ids = blocks
        .iter()
        .enumerate()
        .filter(|(i, b)| (start..end).contains(i) || containers.contains(*b))
        .filter_map(|(_, b)| classifier.block_id(host, b))
        .collect();
    VisibleRange { ids }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::scan;
    use crate::page::{Element, NodeId, Page};
    use pretty_assertions::assert_eq;

    fn range(page: &Page, root: NodeId, index: usize) -> Vec<String> {
        let c = Classifier::default();
        let bs = scan(page, &c, &root);
        compute_visible_range(page, &c, &root, &bs, index).ids().to_vec()
    }

    fn five_blocks() -> (Page, NodeId, Vec<NodeId>) {
        let mut page = Page::new(600.0);
        let root = page.body();
        let blocks = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|id| page.append(root, Element::new("div").block(id).height(100.0)))
            .collect();
        (page, root, blocks)
    }

    #[test]
    fn heading_and_divider_ranges() {
        let (mut page, root, blocks) = five_blocks();
        page.append(blocks[2], Element::new("h1"));
        page.append(blocks[2], Element::new("hr"));

        assert_eq!(range(&page, root, 0), vec!["A", "B"]);
        assert_eq!(range(&page, root, 1), vec!["C"]);
        assert_eq!(range(&page, root, 2), vec!["D", "E"]);
    }

    #[test]
    fn single_slide_shows_everything() {
        let (page, root, _) = five_blocks();
        assert_eq!(range(&page, root, 0), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn unresolvable_next_boundary_extends_to_end() {
        let (mut page, root, blocks) = five_blocks();
        page.append(blocks[3], Element::new("h1"));
        let c = Classifier::default();
        let bs = scan(&page, &c, &root);
        page.remove(blocks[3]);

        let r = compute_visible_range(&page, &c, &root, &bs, 0);
        assert_eq!(r.ids(), ["A", "B", "C", "E"]);
    }

    #[test]
    fn inverted_range_fails_open() {
        let (mut page, root, blocks) = five_blocks();
        // Divider boundaries are listed after headings, so a divider early in
        // the page follows a later heading in the list.
        page.append(blocks[0], Element::new("hr"));
        page.append(blocks[3], Element::new("h1"));

        assert_eq!(range(&page, root, 1), Vec::<String>::new());
        assert_eq!(range(&page, root, 2), vec!["B", "C", "D", "E"]);
    }

    #[test]
    fn enclosing_blocks_stay_visible() {
        let mut page = Page::new(600.0);
        let root = page.body();
        page.append(root, Element::new("div").block("A").height(100.0));
        let parent = page.append(root, Element::new("div").block("P"));
        let x = page.append(parent, Element::new("div").block("X").height(100.0));
        page.append(x, Element::new("h1"));
        page.append(parent, Element::new("div").block("Y").height(100.0));
        page.append(root, Element::new("div").block("B").height(100.0));

        assert_eq!(range(&page, root, 0), vec!["A", "P"]);
        assert_eq!(range(&page, root, 1), vec!["P", "X", "Y", "B"]);

        let c = Classifier::default();
        let bs = scan(&page, &c, &root);
        let rule = compute_visible_range(&page, &c, &root, &bs, 1)
            .exclusion_rule(":root", "data-block-id")
            .unwrap();
        assert!(rule.contains(r#":not([data-block-id="P"])"#));
    }

    #[test]
    fn out_of_range_index_is_empty() {
        let (page, root, _) = five_blocks();
        assert!(range(&page, root, 7).is_empty());
    }

    #[test]
    fn exclusion_rule_lists_visible_ids() {
        let r = VisibleRange {
            ids: vec!["a".to_string(), "b\"c".to_string()],
        };
        assert_eq!(
            r.exclusion_rule(":root.ns-presenting", "data-block-id").as_deref(),
            Some(
                r#":root.ns-presenting [data-block-id]:not([data-block-id="a"]):not([data-block-id="b\"c"]) { display: none !important; }"#
            )
        );
        assert!(VisibleRange::default().exclusion_rule(":root", "data-block-id").is_none());
        assert!(r.contains("a"));
        assert!(!r.contains("b"));
    }
}
