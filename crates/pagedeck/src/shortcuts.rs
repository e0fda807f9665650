//! Keyboard intents while presenting.

use std::fmt;

use crate::host::{HostDocument, PresentationSurface};
use crate::presenter::Presenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Next,
    Prev,
    Start,
    Exit,
    Fullscreen,
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shortcut::Next => "next",
            Shortcut::Prev => "prev",
            Shortcut::Start => "start",
            Shortcut::Exit => "exit",
            Shortcut::Fullscreen => "fullscreen",
            Shortcut::ZoomIn => "zoom-in",
            Shortcut::ZoomOut => "zoom-out",
            Shortcut::ZoomReset => "zoom-reset",
        };
        f.write_str(name)
    }
}

/// A key press as reported by the host, using DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyInput {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Default::default()
        }
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Ctrl, Alt or Meta. Shift alone does not count.
    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }

    /// Parse names like `ArrowRight`, `Shift+Space` or `Ctrl+ArrowLeft`.
    pub fn parse(spec: &str) -> Self {
        let mut input = KeyInput::default();
        let mut parts: Vec<&str> = spec.split('+').collect();
        // A bare "+" (or "Shift++") splits into empty pieces.
        let key = if spec.ends_with('+') {
            parts.retain(|p| !p.is_empty());
            "+".to_string()
        } else {
            parts.pop().unwrap_or_default().to_string()
        };
        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "shift" => input.shift = true,
                "ctrl" | "control" => input.ctrl = true,
                "alt" | "option" => input.alt = true,
                "meta" | "cmd" | "super" => input.meta = true,
                _ => {}
            }
        }
        input.key = match key.as_str() {
            "Space" | "space" => " ".to_string(),
            "Esc" | "esc" => "Escape".to_string(),
            _ => key,
        };
        input
    }
}

pub fn interpret_key(input: &KeyInput) -> Option<Shortcut> {
    let key = input.key.as_str();
    match key {
        "Escape" => Some(Shortcut::Exit),
        "f" | "F" if !input.has_modifier() => Some(Shortcut::Fullscreen),
        "=" | "+" => Some(Shortcut::ZoomIn),
        "-" | "_" => Some(Shortcut::ZoomOut),
        "0" if !input.shift => Some(Shortcut::ZoomReset),
        "ArrowLeft" | "PageUp" => Some(Shortcut::Prev),
        " " if input.shift => Some(Shortcut::Prev),
        "ArrowRight" | "PageDown" | " " => Some(Shortcut::Next),
        "Home" => Some(Shortcut::Start),
        _ => None,
    }
}

/// Route a key press to the presenter.
///
/// Only acts while presenting. Exit is always honored; everything else is
/// left to the page when `focus` is editable and no modifier is held.
/// Returns whether the key was consumed, so the host can suppress its
/// default scrolling.
pub fn handle_key<H>(presenter: &mut Presenter<H>, input: &KeyInput, focus: Option<&H::Node>) -> bool
where
    H: HostDocument + PresentationSurface,
{
    let editable = focus.is_some_and(|n| {
        presenter
            .settings()
            .classifier
            .is_editable(presenter.host(), n)
    });
    dispatch(presenter, input, editable)
}

fn dispatch<H>(presenter: &mut Presenter<H>, input: &KeyInput, focus_editable: bool) -> bool
where
    H: HostDocument + PresentationSurface,
{
    if !presenter.is_presenting() {
        return false;
    }
    let Some(shortcut) = interpret_key(input) else {
        return false;
    };
    if shortcut != Shortcut::Exit && focus_editable && !input.has_modifier() {
        return false;
    }

    tracing::debug!(%shortcut, "key");
    match shortcut {
        Shortcut::Next => presenter.next(),
        Shortcut::Prev => presenter.prev(),
        Shortcut::Start => presenter.start(),
        Shortcut::Exit => presenter.exit(),
        Shortcut::Fullscreen => presenter.fullscreen(),
        Shortcut::ZoomIn => presenter.zoom_in(),
        Shortcut::ZoomOut => presenter.zoom_out(),
        Shortcut::ZoomReset => presenter.zoom_reset(),
    }
    true
}
