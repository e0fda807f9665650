use crate::boundary::Boundary;

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    level: f64,
    default: f64,
}

impl Zoom {
    pub fn new(default: f64) -> Self {
        let default = default.clamp(ZOOM_MIN, ZOOM_MAX);
        Self {
            level: default,
            default,
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn percent(&self) -> u32 {
        (self.level * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) {
        self.set(self.level + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set(self.level - ZOOM_STEP);
    }

    pub fn reset(&mut self) {
        self.level = self.default;
    }

    fn set(&mut self, level: f64) {
        // Snap to the step grid so repeated steps don't drift.
        let snapped = (level / ZOOM_STEP).round() * ZOOM_STEP;
        self.level = snapped.clamp(ZOOM_MIN, ZOOM_MAX);
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// State of one presentation. Owned by the presenter, read by everything
/// that renders it.
#[derive(Debug, Clone)]
pub struct Session<N> {
    pub is_presenting: bool,
    pub boundaries: Vec<Boundary<N>>,
    pub current_index: usize,
    pub saved_scroll_offset: Option<f64>,
    pub zoom: Zoom,
}

impl<N> Session<N> {
    pub fn idle(zoom: Zoom) -> Self {
        Self {
            is_presenting: false,
            boundaries: Vec::new(),
            current_index: 0,
            saved_scroll_offset: None,
            zoom,
        }
    }

    pub fn current(&self) -> Option<&Boundary<N>> {
        self.boundaries.get(self.current_index)
    }

    pub fn last_index(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    /// `current + delta`, clamped into the boundary list.
    pub fn clamped(&self, current: usize, delta: isize) -> usize {
        current.saturating_add_signed(delta).min(self.last_index())
    }

    /// Overlay text: `"3/7"`, or `"3/7 · 120%"` with zoom shown.
    pub fn status_text(&self, show_zoom: bool) -> String {
        let counter = format!("{}/{}", self.current_index + 1, self.boundaries.len().max(1));
        if show_zoom {
            format!("{counter} \u{b7} {}%", self.zoom.percent())
        } else {
            counter
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryKind;
    use proptest::prelude::*;

    fn session(len: usize) -> Session<usize> {
        let mut s = Session::idle(Zoom::default());
        s.boundaries = (0..len)
            .map(|i| Boundary {
                kind: if i == 0 { BoundaryKind::Start } else { BoundaryKind::Heading },
                stable_id: Some(format!("b{i}")),
                snapshot: i,
            })
            .collect();
        s
    }

    #[test]
    fn status_text_formats_counter_and_zoom() {
        let mut s = session(7);
        s.current_index = 2;
        assert_eq!(s.status_text(false), "3/7");
        s.zoom.zoom_in();
        s.zoom.zoom_in();
        assert_eq!(s.status_text(true), "3/7 \u{b7} 120%");
        assert_eq!(session(0).status_text(false), "1/1");
    }

    #[test]
    fn zoom_is_bounded_and_resettable() {
        let mut z = Zoom::new(1.5);
        for _ in 0..40 {
            z.zoom_in();
        }
        assert_eq!(z.level(), ZOOM_MAX);
        for _ in 0..40 {
            z.zoom_out();
        }
        assert_eq!(z.level(), ZOOM_MIN);
        z.reset();
        assert_eq!(z.percent(), 150);
        assert_eq!(Zoom::new(9.0).level(), ZOOM_MAX);
    }

    proptest! {
        #[test]
        fn clamped_stays_in_bounds(len in 1usize..20, current in 0usize..20, delta in -30isize..30) {
            let s = session(len);
            let current = current.min(len - 1);
            let next = s.clamped(current, delta);
            prop_assert!(next < len);
            if delta >= 0 {
                prop_assert!(next >= current);
            } else {
                prop_assert!(next <= current);
            }
        }
    }
}
