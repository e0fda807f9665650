//! The stylesheet installed while presenting.

use crate::classify::Classifier;
use crate::session::Zoom;
use crate::visibility::VisibleRange;

/// Root class raised by [`PresentationSurface::set_presenting_flag`](crate::host::PresentationSurface::set_presenting_flag).
pub const SCOPE_CLASS: &str = "ns-presenting";

pub fn scope() -> String {
    format!(":root.{SCOPE_CLASS}")
}

/// Chrome hiding, zoom and (optionally) the one-slide-at-a-time rule,
/// all scoped under the presenting root class.
pub fn presentation_stylesheet(
    classifier: &Classifier,
    zoom: &Zoom,
    range: Option<&VisibleRange>,
) -> String {
    let scope = scope();
    let mut css = format!(
        "{scope} {{ overscroll-behavior: none; }}\n{scope} body {{ overflow: hidden; }}\n"
    );

    if !classifier.chrome.is_empty() {
        let selectors: Vec<String> = classifier
            .chrome
            .iter()
            .map(|m| format!("{scope} {}", m.to_css()))
            .collect();
        css.push_str(&format!(
            "{} {{ display: none !important; }}\n",
            selectors.join(",\n")
        ));
    }

    if (zoom.level() - 1.0).abs() > f64::EPSILON && !classifier.content_roots.is_empty() {
        let selectors: Vec<String> = classifier
            .content_roots
            .iter()
            .map(|m| format!("{scope} {}", m.to_css()))
            .collect();
        css.push_str(&format!(
            "{} {{ zoom: {:.2}; }}\n",
            selectors.join(",\n"),
            zoom.level()
        ));
    }

    if let Some(rule) = range.and_then(|r| r.exclusion_rule(&scope, &classifier.block_attribute)) {
        css.push_str(&rule);
        css.push('\n');
    }

    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Matcher;

    fn bare() -> Classifier {
        Classifier {
            chrome: vec![Matcher::tag("nav")],
            content_roots: vec![Matcher::class("page")],
            ..Classifier::default()
        }
    }

    #[test]
    fn default_zoom_emits_only_chrome_rules() {
        let css = presentation_stylesheet(&bare(), &Zoom::default(), None);
        assert!(css.contains(":root.ns-presenting nav { display: none !important; }"));
        assert!(!css.contains("zoom"));
        assert!(!css.contains("data-block-id"));
    }

    #[test]
    fn zoom_targets_content_roots() {
        let mut zoom = Zoom::default();
        zoom.zoom_in();
        let css = presentation_stylesheet(&bare(), &zoom, None);
        assert!(css.contains(":root.ns-presenting .page { zoom: 1.10; }"));
    }

    #[test]
    fn empty_range_hides_nothing() {
        let css = presentation_stylesheet(&bare(), &Zoom::default(), Some(&VisibleRange::default()));
        assert!(!css.contains(":not("));
    }
}
