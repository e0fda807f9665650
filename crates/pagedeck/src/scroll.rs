//! Translating between scroll offsets and boundary indices in whichever
//! coordinate space currently scrolls: the viewport or a nested container.

use crate::boundary::{self, Boundary};
use crate::classify::Classifier;
use crate::host::{HostDocument, ScrollBehavior};
use crate::locate::ScrollTarget;

/// Absorbs sub-pixel jitter when comparing a boundary's top with the
/// current offset.
pub const BOUNDARY_SLACK_PX: f64 = 4.0;

pub fn current_offset<H: HostDocument>(host: &H, target: &ScrollTarget<H::Node>) -> f64 {
    match target {
        ScrollTarget::Viewport => host.window_scroll_y(),
        ScrollTarget::Element(el) => host.scroll_top(el),
    }
}

/// Top edge of `el` in the scroll space of `target`.
pub fn element_top<H: HostDocument>(host: &H, target: &ScrollTarget<H::Node>, el: &H::Node) -> f64 {
    match target {
        ScrollTarget::Viewport => host.client_top(el) + host.window_scroll_y(),
        ScrollTarget::Element(container) => {
            host.client_top(el) - host.client_top(container) + host.scroll_top(container)
        }
    }
}

/// Index of the last boundary (by list position) whose top is at or above
/// the current offset. Boundaries that do not resolve are skipped; with no
/// qualifying boundary the answer is 0.
pub fn nearest_boundary_index<H: HostDocument>(
    host: &H,
    classifier: &Classifier,
    root: &H::Node,
    target: &ScrollTarget<H::Node>,
    boundaries: &[Boundary<H::Node>],
) -> usize {
    let offset = current_offset(host, target);
    boundaries
        .iter()
        .enumerate()
        .filter_map(|(i, b)| boundary::resolve(host, classifier, root, b).map(|el| (i, el)))
        .filter(|(_, el)| element_top(host, target, el) <= offset + BOUNDARY_SLACK_PX)
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

pub fn scroll_to_offset<H: HostDocument>(
    host: &mut H,
    target: &ScrollTarget<H::Node>,
    top: f64,
    behavior: ScrollBehavior,
) {
    match target {
        ScrollTarget::Viewport => host.scroll_window_to(top, behavior),
        ScrollTarget::Element(el) => host.set_scroll_top(el, top, behavior),
    }
}

/// Scroll `target` so that `el` starts at the top of it.
pub fn scroll_to_start<H: HostDocument>(
    host: &mut H,
    target: &ScrollTarget<H::Node>,
    el: &H::Node,
    behavior: ScrollBehavior,
) {
    let top = element_top(host, target, el);
    scroll_to_offset(host, target, top, behavior);
}
