use crate::host::HostDocument;

/// All elements below `root` in document order, `root` itself excluded.
pub fn descendants<H: HostDocument>(host: &H, root: &H::Node) -> Vec<H::Node> {
    let mut out = Vec::new();
    let mut stack: Vec<H::Node> = host.children(root).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        stack.extend(host.children(&node).into_iter().rev());
        out.push(node);
    }
    out
}

/// First element below `root` in document order satisfying `pred`.
pub fn find_first<H, F>(host: &H, root: &H::Node, mut pred: F) -> Option<H::Node>
where
    H: HostDocument,
    F: FnMut(&H::Node) -> bool,
{
    let mut stack: Vec<H::Node> = host.children(root).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if pred(&node) {
            return Some(node);
        }
        stack.extend(host.children(&node).into_iter().rev());
    }
    None
}

/// Nearest of `node` and its ancestors satisfying `pred`. Not bounded by any root.
pub fn closest<H, F>(host: &H, node: &H::Node, mut pred: F) -> Option<H::Node>
where
    H: HostDocument,
    F: FnMut(&H::Node) -> bool,
{
    let mut cur = Some(node.clone());
    while let Some(n) = cur {
        if pred(&n) {
            return Some(n);
        }
        cur = host.parent(&n);
    }
    None
}
