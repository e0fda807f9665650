//! An in-memory document that behaves enough like a rendered notes page to
//! drive the presenter: elements with attributes, block-flow layout, nested
//! scroll containers, a single mutation observer, and node replacement the
//! way virtualizing editors do it.

use crate::host::{
    HostDocument, HostError, MutationKind, MutationRecord, ObserveOptions, Overflow,
    PresentationSurface, ScrollBehavior,
};

/// Handle to an element of a [`Page`]. Handles from an earlier generation of
/// the page (see [`Page::replace_content`]) never resolve again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    generation: u32,
    index: u32,
}

/// Element description used to build pages.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    height: Option<f64>,
    overflow: Overflow,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        set_attr(&mut self.attrs, name, value);
        self
    }

    /// Append a class to the `class` attribute.
    pub fn class(mut self, class: &str) -> Self {
        let joined = match self.attrs.iter().find(|(k, _)| k == "class") {
            Some((_, existing)) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        set_attr(&mut self.attrs, "class", &joined);
        self
    }

    /// Mark the element as a content block with the given stable id.
    pub fn block(self, id: &str) -> Self {
        self.attr("data-block-id", id)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Fixed box height. Without one, the box is as tall as its children.
    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }
}

fn set_attr(attrs: &mut Vec<(String, String)>, name: &str, value: &str) {
    match attrs.iter_mut().find(|(k, _)| k == name) {
        Some(slot) => slot.1 = value.to_string(),
        None => attrs.push((name.to_string(), value.to_string())),
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    element: Element,
    parent: Option<usize>,
    children: Vec<usize>,
    top: f64,
    box_height: f64,
    content_height: f64,
    scroll_top: f64,
}

impl NodeData {
    fn new(element: Element) -> Self {
        Self {
            element,
            parent: None,
            children: Vec::new(),
            top: 0.0,
            box_height: 0.0,
            content_height: 0.0,
            scroll_top: 0.0,
        }
    }
}

const HTML: usize = 0;
const BODY: usize = 1;

#[derive(Debug, Clone)]
pub struct Page {
    generation: u32,
    nodes: Vec<NodeData>,
    viewport_height: f64,
    window_scroll: f64,
    observer: Option<(usize, ObserveOptions)>,
    mutations: Vec<MutationRecord<NodeId>>,
    stylesheet: Option<String>,
    presenting: bool,
    overlay: Option<String>,
    fullscreen: bool,
    fullscreen_rejection: Option<String>,
    fullscreen_supported: bool,
    last_scroll_behavior: Option<ScrollBehavior>,
}

impl Page {
    pub fn new(viewport_height: f64) -> Self {
        let mut nodes = vec![NodeData::new(Element::new("html")), NodeData::new(Element::new("body"))];
        nodes[HTML].children.push(BODY);
        nodes[BODY].parent = Some(HTML);
        let mut page = Self {
            generation: 0,
            nodes,
            viewport_height,
            window_scroll: 0.0,
            observer: None,
            mutations: Vec::new(),
            stylesheet: None,
            presenting: false,
            overlay: None,
            fullscreen: false,
            fullscreen_rejection: None,
            fullscreen_supported: true,
            last_scroll_behavior: None,
        };
        page.relayout();
        page
    }

    fn id(&self, index: usize) -> NodeId {
        NodeId {
            generation: self.generation,
            index: index as u32,
        }
    }

    fn index(&self, id: &NodeId) -> Option<usize> {
        let index = id.index as usize;
        (id.generation == self.generation && index < self.nodes.len()).then_some(index)
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Append `element` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let position = self
            .index(&parent)
            .map(|p| self.nodes[p].children.len())
            .unwrap_or(0);
        self.insert(parent, position, element)
    }

    /// Insert `element` as child number `position` of `parent` (clamped).
    /// An unknown parent leaves the new element detached.
    pub fn insert(&mut self, parent: NodeId, position: usize, element: Element) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(NodeData::new(element));
        if let Some(p) = self.index(&parent) {
            let position = position.min(self.nodes[p].children.len());
            self.nodes[p].children.insert(position, index);
            self.nodes[index].parent = Some(p);
            self.relayout();
            self.record(MutationKind::ChildList, p);
        }
        self.id(index)
    }

    /// Detach `node` (and its subtree) from the document.
    pub fn remove(&mut self, node: NodeId) {
        let Some(index) = self.index(&node) else {
            return;
        };
        let Some(parent) = self.nodes[index].parent.take() else {
            return;
        };
        self.nodes[parent].children.retain(|&c| c != index);
        self.relayout();
        self.record(MutationKind::ChildList, parent);
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(index) = self.index(&node) {
            self.nodes[index].element.text = text.to_string();
            self.record(MutationKind::CharacterData, index);
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(index) = self.index(&node) {
            set_attr(&mut self.nodes[index].element.attrs, name, value);
            self.record(MutationKind::Attributes, index);
        }
    }

    /// Swap `node` for a deep copy with fresh handles at the same position.
    /// The old handle stays valid but detached, mirroring how virtualizing
    /// editors tear down and rebuild blocks that scroll out of view.
    pub fn recreate(&mut self, node: NodeId) -> Option<NodeId> {
        let index = self.index(&node)?;
        let parent = self.nodes[index].parent?;
        let copy = self.deep_copy(index);
        let slot = self.nodes[parent].children.iter().position(|&c| c == index)?;
        self.nodes[parent].children[slot] = copy;
        self.nodes[copy].parent = Some(parent);
        self.nodes[index].parent = None;
        self.relayout();
        self.record(MutationKind::ChildList, parent);
        Some(self.id(copy))
    }

    fn deep_copy(&mut self, index: usize) -> usize {
        let mut data = NodeData::new(self.nodes[index].element.clone());
        data.scroll_top = self.nodes[index].scroll_top;
        let copy = self.nodes.len();
        self.nodes.push(data);
        let children = self.nodes[index].children.clone();
        for child in children {
            let c = self.deep_copy(child);
            self.nodes[c].parent = Some(copy);
            self.nodes[copy].children.push(c);
        }
        copy
    }

    /// Replace the whole tree with the one from `other`, keeping viewport
    /// state, observation and presentation surface. Handles issued before
    /// the swap are detached afterwards. The observer follows the new body
    /// and receives a child-list record for the swap.
    pub fn replace_content(&mut self, other: Page) {
        self.generation = self.generation.max(other.generation) + 1;
        self.nodes = other.nodes;
        self.relayout();
        if let Some((_, options)) = self.observer {
            self.observer = Some((BODY, options));
            self.record(MutationKind::ChildList, BODY);
        }
    }

    /// Mutation records collected since the last call.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord<NodeId>> {
        std::mem::take(&mut self.mutations)
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    pub fn stylesheet(&self) -> Option<&str> {
        self.stylesheet.as_deref()
    }

    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    pub fn presenting_flag(&self) -> bool {
        self.presenting
    }

    pub fn last_scroll_behavior(&self) -> Option<ScrollBehavior> {
        self.last_scroll_behavior
    }

    /// Make subsequent fullscreen requests fail with `reason`.
    pub fn reject_fullscreen(&mut self, reason: &str) {
        self.fullscreen_rejection = Some(reason.to_string());
    }

    /// Behave like an environment without a fullscreen API.
    pub fn disable_fullscreen(&mut self) {
        self.fullscreen_supported = false;
    }

    fn record(&mut self, kind: MutationKind, target: usize) {
        let Some((root, options)) = self.observer else {
            return;
        };
        if !options.accepts(kind) {
            return;
        }
        let in_scope = target == root || (options.subtree && self.is_inclusive_ancestor(root, target));
        if in_scope {
            self.mutations.push(MutationRecord {
                kind,
                target: self.id(target),
            });
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: usize, node: usize) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.nodes[n].parent;
        }
        false
    }

    fn relayout(&mut self) {
        self.layout(HTML, 0.0);
        self.window_scroll = self.window_scroll.clamp(0.0, self.max_window_scroll());
    }

    fn layout(&mut self, index: usize, y: f64) -> f64 {
        self.nodes[index].top = y;
        let children = self.nodes[index].children.clone();
        let mut cursor = y;
        for child in children {
            cursor += self.layout(child, cursor);
        }
        let content = cursor - y;
        let node = &mut self.nodes[index];
        node.box_height = node.element.height.unwrap_or(content);
        node.content_height = content.max(node.box_height);
        let max_scroll = (node.content_height - node.box_height).max(0.0);
        node.scroll_top = node.scroll_top.clamp(0.0, max_scroll);
        node.box_height
    }

    fn max_window_scroll(&self) -> f64 {
        (self.nodes[HTML].box_height - self.viewport_height).max(0.0)
    }
}

impl HostDocument for Page {
    type Node = NodeId;

    fn document_element(&self) -> NodeId {
        self.id(HTML)
    }

    fn body(&self) -> NodeId {
        self.id(BODY)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        let index = self.index(node)?;
        self.nodes[index].parent.map(|p| self.id(p))
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.index(node)
            .map(|i| self.nodes[i].children.iter().map(|&c| self.id(c)).collect())
            .unwrap_or_default()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.index(node)
            .map(|i| self.nodes[i].element.tag.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let index = self.index(node)?;
        self.nodes[index]
            .element
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        self.index(node)
            .is_some_and(|i| self.is_inclusive_ancestor(HTML, i))
    }

    fn client_top(&self, node: &NodeId) -> f64 {
        let Some(index) = self.index(node) else {
            return 0.0;
        };
        let mut top = self.nodes[index].top - self.window_scroll;
        let mut cur = self.nodes[index].parent;
        while let Some(p) = cur {
            if self.nodes[p].element.overflow.can_scroll() {
                top -= self.nodes[p].scroll_top;
            }
            cur = self.nodes[p].parent;
        }
        top
    }

    fn overflow_y(&self, node: &NodeId) -> Overflow {
        self.index(node)
            .map(|i| self.nodes[i].element.overflow)
            .unwrap_or_default()
    }

    fn scroll_height(&self, node: &NodeId) -> f64 {
        self.index(node)
            .map(|i| self.nodes[i].content_height)
            .unwrap_or(0.0)
    }

    fn client_height(&self, node: &NodeId) -> f64 {
        self.index(node)
            .map(|i| self.nodes[i].box_height)
            .unwrap_or(0.0)
    }

    fn scroll_top(&self, node: &NodeId) -> f64 {
        self.index(node)
            .map(|i| self.nodes[i].scroll_top)
            .unwrap_or(0.0)
    }

    fn set_scroll_top(&mut self, node: &NodeId, top: f64, behavior: ScrollBehavior) {
        if let Some(index) = self.index(node) {
            let n = &mut self.nodes[index];
            let max = (n.content_height - n.box_height).max(0.0);
            n.scroll_top = top.clamp(0.0, max);
            self.last_scroll_behavior = Some(behavior);
        }
    }

    fn window_scroll_y(&self) -> f64 {
        self.window_scroll
    }

    fn scroll_window_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.window_scroll = top.clamp(0.0, self.max_window_scroll());
        self.last_scroll_behavior = Some(behavior);
    }

    fn observe(&mut self, root: &NodeId, options: ObserveOptions) {
        if let Some(index) = self.index(root) {
            self.observer = Some((index, options));
        }
    }

    fn disconnect(&mut self) {
        self.observer = None;
        self.mutations.clear();
    }
}

impl PresentationSurface for Page {
    fn set_presenting_flag(&mut self, on: bool) {
        self.presenting = on;
    }

    fn install_stylesheet(&mut self, css: &str) {
        self.stylesheet = Some(css.to_string());
    }

    fn remove_stylesheet(&mut self) {
        self.stylesheet = None;
    }

    fn set_overlay(&mut self, text: Option<&str>) {
        self.overlay = text.map(str::to_string);
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), HostError> {
        if !self.fullscreen_supported {
            return Err(HostError::FullscreenUnsupported);
        }
        if let Some(reason) = &self.fullscreen_rejection {
            return Err(HostError::FullscreenRejected(reason.clone()));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), HostError> {
        self.fullscreen = false;
        Ok(())
    }
}
