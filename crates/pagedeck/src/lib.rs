//! Present a live notes page as slides.
//!
//! The page is split at its first content block, at every top-level heading
//! and after every divider. Navigation scrolls the page to the next slide
//! start and hides everything outside the current slide, while the host is
//! free to re-render, virtualize and edit the document underneath.
//!
//! The engine talks to the document only through [`host::HostDocument`] and
//! [`host::PresentationSurface`]. [`page::Page`] is an in-memory host used by
//! the CLI and the tests.

pub mod boundary;
pub mod classify;
pub mod debounce;
pub mod fixture;
pub mod host;
pub mod locate;
pub mod messaging;
pub mod page;
pub mod presenter;
pub mod scroll;
pub mod session;
pub mod shortcuts;
pub mod styles;
pub mod tree;
pub mod visibility;

pub use boundary::{Boundary, BoundaryKind};
pub use classify::{Classifier, Matcher};
pub use fixture::Fixture;
pub use host::{HostDocument, HostError, PresentationSurface, ScrollBehavior};
pub use page::{Element, NodeId, Page};
pub use presenter::{Presenter, RescanReason, Settings};
pub use shortcuts::{KeyInput, Shortcut, handle_key};
pub use visibility::VisibleRange;
