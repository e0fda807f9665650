//! Slide boundaries: scanning the content root for them and mapping a
//! captured boundary back onto the live tree.

use std::collections::HashSet;
use std::fmt;

use crate::classify::Classifier;
use crate::host::HostDocument;
use crate::tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    Start,
    Heading,
    Divider,
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryKind::Start => "start",
            BoundaryKind::Heading => "heading",
            BoundaryKind::Divider => "divider",
        };
        f.write_str(name)
    }
}

/// A slide-start marker.
///
/// `snapshot` is the element seen at scan time and is only trusted while it
/// stays attached; `stable_id` is what survives the host rebuilding the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary<N> {
    pub kind: BoundaryKind,
    pub stable_id: Option<String>,
    pub snapshot: N,
}

impl<N> Boundary<N> {
    /// The single boundary used when a scan has nothing better to offer.
    pub fn synthetic_start(root: N) -> Self {
        Self {
            kind: BoundaryKind::Start,
            stable_id: None,
            snapshot: root,
        }
    }
}

#[derive(PartialEq, Eq, Hash)]
enum DedupKey<N> {
    Id(String),
    Node(N),
}

fn boundary_at<H: HostDocument>(
    host: &H,
    classifier: &Classifier,
    kind: BoundaryKind,
    node: H::Node,
) -> Boundary<H::Node> {
    Boundary {
        kind,
        stable_id: classifier.block_id(host, &node),
        snapshot: node,
    }
}

/// Scan `root` for slide boundaries.
///
/// The result always starts with a `Start` boundary at the first content
/// block (or `root` when there are none), followed by heading boundaries and
/// then divider boundaries, each group in document order. Entries resolving
/// to an already-seen block are dropped, so earlier groups win. The list is
/// deliberately not re-sorted.
pub fn scan<H: HostDocument>(host: &H, classifier: &Classifier, root: &H::Node) -> Vec<Boundary<H::Node>> {
    let nodes = tree::descendants(host, root);
    let blocks: Vec<H::Node> = nodes
        .iter()
        .filter(|n| classifier.is_block(host, n))
        .cloned()
        .collect();

    let mut found = Vec::new();
    let first = blocks.first().cloned().unwrap_or_else(|| root.clone());
    found.push(boundary_at(host, classifier, BoundaryKind::Start, first));

    for heading in nodes.iter().filter(|n| classifier.is_heading(host, n)) {
        let block = classifier.owning_block(host, heading);
        found.push(boundary_at(host, classifier, BoundaryKind::Heading, block));
    }

    for divider in nodes.iter().filter(|n| classifier.is_divider(host, n)) {
        let block = classifier.owning_block(host, divider);
        // A divider closes the previous slide; the next one opens at the
        // block after it.
        let target = blocks
            .iter()
            .position(|b| *b == block)
            .and_then(|i| blocks.get(i + 1))
            .cloned()
            .unwrap_or(block);
        found.push(boundary_at(host, classifier, BoundaryKind::Divider, target));
    }

    dedup(found)
}

fn dedup<N: Clone + Eq + std::hash::Hash>(boundaries: Vec<Boundary<N>>) -> Vec<Boundary<N>> {
    let mut seen = HashSet::new();
    boundaries
        .into_iter()
        .filter(|b| {
            let key = match &b.stable_id {
                Some(id) => DedupKey::Id(id.clone()),
                None => DedupKey::Node(b.snapshot.clone()),
            };
            seen.insert(key)
        })
        .collect()
}

/// The live element for `boundary`, if it currently has one.
///
/// An attached snapshot is returned as is. Otherwise the block is looked up
/// again by stable id below `root`. `None` means the slide's anchor has no
/// live representation right now (typically virtualized away).
pub fn resolve<H: HostDocument>(
    host: &H,
    classifier: &Classifier,
    root: &H::Node,
    boundary: &Boundary<H::Node>,
) -> Option<H::Node> {
    if host.is_connected(&boundary.snapshot) {
        return Some(boundary.snapshot.clone());
    }
    let id = boundary.stable_id.as_deref()?;
    tree::find_first(host, root, |n| {
        host.attribute(n, &classifier.block_attribute).as_deref() == Some(id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Element, NodeId, Page};
    use pretty_assertions::assert_eq;

    fn summary(bs: &[Boundary<NodeId>]) -> Vec<(BoundaryKind, Option<&str>)> {
        bs.iter().map(|b| (b.kind, b.stable_id.as_deref())).collect()
    }

    fn block(page: &mut Page, parent: NodeId, id: &str) -> NodeId {
        page.append(parent, Element::new("div").block(id).height(100.0))
    }

    #[test]
    fn heading_and_divider_scenario() {
        let mut page = Page::new(600.0);
        let root = page.body();
        block(&mut page, root, "A");
        block(&mut page, root, "B");
        let c = block(&mut page, root, "C");
        page.append(c, Element::new("h1").text("Section"));
        page.append(c, Element::new("hr"));
        block(&mut page, root, "D");
        block(&mut page, root, "E");

        let bs = scan(&page, &Classifier::default(), &root);
        assert_eq!(
            summary(&bs),
            vec![
                (BoundaryKind::Start, Some("A")),
                (BoundaryKind::Heading, Some("C")),
                (BoundaryKind::Divider, Some("D")),
            ]
        );
    }

    #[test]
    fn plain_document_has_single_start() {
        let mut page = Page::new(600.0);
        let root = page.body();
        for id in ["A", "B", "C"] {
            block(&mut page, root, id);
        }
        let bs = scan(&page, &Classifier::default(), &root);
        assert_eq!(summary(&bs), vec![(BoundaryKind::Start, Some("A"))]);
    }

    #[test]
    fn empty_root_starts_at_root() {
        let page = Page::new(600.0);
        let root = page.body();
        let bs = scan(&page, &Classifier::default(), &root);
        assert_eq!(bs, vec![Boundary::synthetic_start(root)]);
    }

    #[test]
    fn start_outranks_heading_on_same_block() {
        let mut page = Page::new(600.0);
        let root = page.body();
        let a = block(&mut page, root, "A");
        page.append(a, Element::new("div").attr("role", "heading").attr("aria-level", "1"));
        block(&mut page, root, "B");

        let bs = scan(&page, &Classifier::default(), &root);
        assert_eq!(summary(&bs), vec![(BoundaryKind::Start, Some("A"))]);
    }

    #[test]
    fn divider_block_points_at_following_block() {
        let mut page = Page::new(600.0);
        let root = page.body();
        block(&mut page, root, "A");
        let div = page.append(root, Element::new("div").block("X").class("notion-divider-block"));
        page.append(div, Element::new("div").attr("role", "separator"));
        block(&mut page, root, "B");

        let bs = scan(&page, &Classifier::default(), &root);
        // The class and the inner separator both resolve to B; one survives.
        assert_eq!(
            summary(&bs),
            vec![(BoundaryKind::Start, Some("A")), (BoundaryKind::Divider, Some("B"))]
        );
    }

    #[test]
    fn trailing_divider_keeps_its_own_block() {
        let mut page = Page::new(600.0);
        let root = page.body();
        block(&mut page, root, "A");
        let last = block(&mut page, root, "Z");
        page.append(last, Element::new("hr"));

        let bs = scan(&page, &Classifier::default(), &root);
        assert_eq!(
            summary(&bs),
            vec![(BoundaryKind::Start, Some("A")), (BoundaryKind::Divider, Some("Z"))]
        );
    }

    #[test]
    fn headings_precede_dividers_regardless_of_position() {
        let mut page = Page::new(600.0);
        let root = page.body();
        let a = block(&mut page, root, "A");
        page.append(a, Element::new("hr"));
        block(&mut page, root, "B");
        let c = block(&mut page, root, "C");
        page.append(c, Element::new("h1"));

        let bs = scan(&page, &Classifier::default(), &root);
        assert_eq!(
            summary(&bs),
            vec![
                (BoundaryKind::Start, Some("A")),
                (BoundaryKind::Heading, Some("C")),
                (BoundaryKind::Divider, Some("B")),
            ]
        );
    }

    #[test]
    fn unidentified_headings_dedup_by_element() {
        let mut page = Page::new(600.0);
        let root = page.body();
        block(&mut page, root, "A");
        let loose = page.append(root, Element::new("section"));
        page.append(loose, Element::new("h1"));
        let h1 = page.append(root, Element::new("h1"));

        let bs = scan(&page, &Classifier::default(), &root);
        assert_eq!(bs.len(), 3);
        assert_eq!(bs[2].snapshot, h1);
        assert!(bs[1].stable_id.is_none());
    }

    #[test]
    fn scan_is_idempotent() {
        let mut page = Page::new(600.0);
        let root = page.body();
        for id in ["A", "B", "C", "D"] {
            let b = block(&mut page, root, id);
            if id == "C" {
                page.append(b, Element::new("h1"));
            }
        }
        let c = Classifier::default();
        assert_eq!(summary(&scan(&page, &c, &root)), summary(&scan(&page, &c, &root)));
    }

    #[test]
    fn resolve_falls_back_to_stable_id() {
        let mut page = Page::new(600.0);
        let root = page.body();
        block(&mut page, root, "A");
        let b = block(&mut page, root, "B");
        page.append(b, Element::new("h1"));
        let c = Classifier::default();
        let bs = scan(&page, &c, &root);

        assert_eq!(resolve(&page, &c, &root, &bs[1]), Some(b));

        let fresh = page.recreate(b).expect("attached");
        assert_eq!(resolve(&page, &c, &root, &bs[1]), Some(fresh));

        page.remove(fresh);
        assert_eq!(resolve(&page, &c, &root, &bs[1]), None);
    }

    #[test]
    fn resolve_without_id_needs_attached_snapshot() {
        let mut page = Page::new(600.0);
        let root = page.body();
        let h1 = page.append(root, Element::new("h1"));
        let boundary = Boundary {
            kind: BoundaryKind::Heading,
            stable_id: None,
            snapshot: h1,
        };
        let c = Classifier::default();
        assert_eq!(resolve(&page, &c, &root, &boundary), Some(h1));
        page.remove(h1);
        assert_eq!(resolve(&page, &c, &root, &boundary), None);
    }
}
