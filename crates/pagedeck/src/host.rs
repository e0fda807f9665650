//! The boundary between the engine and the live document it presents.
//!
//! Nothing in the engine reaches into a document directly. A host (a browser
//! content script, or the in-memory [`Page`](crate::page::Page)) implements
//! [`HostDocument`] for reads, scrolling and mutation observation, and
//! [`PresentationSurface`] for the visual collaborators that sit above the
//! engine (stylesheet, overlay counter, fullscreen).

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
    Scroll,
}

impl Overflow {
    /// Whether this overflow mode lets the user scroll vertically.
    pub fn can_scroll(self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    CharacterData,
    Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord<N> {
    pub kind: MutationKind,
    pub target: N,
}

/// Which mutations an observer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserveOptions {
    pub subtree: bool,
    pub child_list: bool,
    pub character_data: bool,
    pub attributes: bool,
}

impl ObserveOptions {
    /// Child insertion/removal and text edits anywhere below the root.
    /// Attribute churn is left out: hosts rewrite attributes constantly for
    /// cosmetic reasons and none of them move a slide boundary.
    pub const STRUCTURAL: Self = Self {
        subtree: true,
        child_list: true,
        character_data: true,
        attributes: false,
    };

    pub fn accepts(&self, kind: MutationKind) -> bool {
        match kind {
            MutationKind::ChildList => self.child_list,
            MutationKind::CharacterData => self.character_data,
            MutationKind::Attributes => self.attributes,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("fullscreen request rejected: {0}")]
    FullscreenRejected(String),

    #[error("fullscreen is not supported in this environment")]
    FullscreenUnsupported,
}

/// Read access, scrolling and observation over the host's element tree.
pub trait HostDocument {
    /// A handle to one element. Handles stay comparable after the element
    /// is detached; [`HostDocument::is_connected`] tells whether it is live.
    type Node: Clone + Eq + Hash + Debug;

    fn document_element(&self) -> Self::Node;
    fn body(&self) -> Self::Node;
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    /// Element children in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;
    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Top edge of the element's border box, relative to the viewport.
    fn client_top(&self, node: &Self::Node) -> f64;
    fn overflow_y(&self, node: &Self::Node) -> Overflow;
    fn scroll_height(&self, node: &Self::Node) -> f64;
    fn client_height(&self, node: &Self::Node) -> f64;
    fn scroll_top(&self, node: &Self::Node) -> f64;
    fn set_scroll_top(&mut self, node: &Self::Node, top: f64, behavior: ScrollBehavior);

    fn window_scroll_y(&self) -> f64;
    fn scroll_window_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Start delivering mutations below `root`. Replaces any previous observation.
    fn observe(&mut self, root: &Self::Node, options: ObserveOptions);
    fn disconnect(&mut self);
}

/// Visual collaborators driven by the presenter.
pub trait PresentationSurface {
    /// Toggle the scope marker on the document root that the stylesheet keys off.
    fn set_presenting_flag(&mut self, on: bool);
    /// Install or replace the presentation stylesheet.
    fn install_stylesheet(&mut self, css: &str);
    fn remove_stylesheet(&mut self);
    /// Show the slide counter with the given text, or unmount it with `None`.
    fn set_overlay(&mut self, text: Option<&str>);

    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<(), HostError>;
    fn exit_fullscreen(&mut self) -> Result<(), HostError>;
}
