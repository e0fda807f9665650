//! YAML page descriptions for the CLI and tests.
//!
//! ```yaml
//! viewport: 600
//! body:
//!   - class: notion-frame
//!     overflow: auto
//!     height: 600
//!     children:
//!       - class: notion-page-content
//!         children:
//!           - block: intro
//!             height: 300
//!           - block: agenda
//!             children:
//!               - tag: h1
//!                 text: Agenda
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::host::{HostDocument, Overflow};
use crate::page::{Element, NodeId, Page};

const DEFAULT_VIEWPORT: f64 = 600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default = "default_viewport")]
    pub viewport: f64,

    #[serde(default)]
    pub fullscreen: FullscreenMode,

    #[serde(default)]
    pub body: Vec<FixtureNode>,
}

/// How the page answers fullscreen requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FullscreenMode {
    #[default]
    Allowed,
    /// Requests fail, as browsers do without a user gesture.
    Rejected,
    Unsupported,
}

fn default_viewport() -> f64 {
    DEFAULT_VIEWPORT
}

fn default_tag() -> String {
    "div".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureNode {
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Shorthand for the block id attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,

    /// Space-separated class list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default)]
    pub overflow: Overflow,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FixtureNode>,
}

impl FixtureNode {
    fn element(&self) -> Element {
        let mut element = Element::new(&self.tag).overflow(self.overflow);
        for (name, value) in &self.attrs {
            element = element.attr(name, value);
        }
        if let Some(class) = &self.class {
            for c in class.split_whitespace() {
                element = element.class(c);
            }
        }
        if let Some(id) = &self.block {
            element = element.block(id);
        }
        if let Some(text) = &self.text {
            element = element.text(text);
        }
        if let Some(height) = self.height {
            element = element.height(height);
        }
        element
    }

    fn build_into(&self, page: &mut Page, parent: NodeId) {
        let node = page.append(parent, self.element());
        for child in &self.children {
            child.build_into(page, node);
        }
    }
}

impl Fixture {
    pub fn parse(yaml: &str) -> Result<Self> {
        let fixture: Fixture = serde_yaml::from_str(yaml).context("Invalid page fixture")?;
        if !(fixture.viewport.is_finite() && fixture.viewport > 0.0) {
            anyhow::bail!("Invalid viewport height: {}", fixture.viewport);
        }
        Ok(fixture)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn build(&self) -> Page {
        let mut page = Page::new(self.viewport);
        match self.fullscreen {
            FullscreenMode::Allowed => {}
            FullscreenMode::Rejected => page.reject_fullscreen("fullscreen requires a user gesture"),
            FullscreenMode::Unsupported => page.disable_fullscreen(),
        }
        let body = page.body();
        for node in &self.body {
            node.build_into(&mut page, body);
        }
        // Building is not an edit anyone observed.
        page.take_mutations();
        page
    }
}
