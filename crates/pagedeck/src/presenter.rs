//! The presentation state machine.
//!
//! `Presenter` owns the host and the single session. Every public operation
//! is total: when the document refuses to cooperate (an anchor was
//! virtualized away, fullscreen was denied) the operation degrades to "no
//! visible change" and the logical position is still kept.

use std::time::{Duration, Instant};

use crate::boundary::{self, Boundary};
use crate::classify::Classifier;
use crate::debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
use crate::host::{HostDocument, MutationRecord, ObserveOptions, PresentationSurface, ScrollBehavior};
use crate::locate;
use crate::scroll;
use crate::session::{Session, Zoom};
use crate::styles;
use crate::visibility::{self, VisibleRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescanReason {
    Enter,
    Mutation,
    Navigate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub classifier: Classifier,
    /// How long the document must stay quiet before a mutation rescan.
    pub quiet_period: Duration,
    pub scroll_behavior: ScrollBehavior,
    /// Hide every block outside the current slide.
    pub isolate_slides: bool,
    pub default_zoom: f64,
    /// Append the zoom percentage to the overlay counter.
    pub show_zoom: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            classifier: Classifier::default(),
            quiet_period: DEFAULT_QUIET_PERIOD,
            scroll_behavior: ScrollBehavior::Smooth,
            isolate_slides: true,
            default_zoom: 1.0,
            show_zoom: false,
        }
    }
}

pub struct Presenter<H: HostDocument> {
    host: H,
    settings: Settings,
    session: Session<H::Node>,
    debouncer: Debouncer,
}

impl<H> Presenter<H>
where
    H: HostDocument + PresentationSurface,
{
    pub fn new(host: H, settings: Settings) -> Self {
        let session = Session::idle(Zoom::new(settings.default_zoom));
        let debouncer = Debouncer::new(settings.quiet_period);
        Self {
            host,
            settings,
            session,
            debouncer,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Direct access for hosts that mutate the document themselves.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn session(&self) -> &Session<H::Node> {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_presenting(&self) -> bool {
        self.session.is_presenting
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index
    }

    pub fn boundaries(&self) -> &[Boundary<H::Node>] {
        &self.session.boundaries
    }

    pub fn status_text(&self) -> String {
        self.session.status_text(self.settings.show_zoom)
    }

    pub fn toggle(&mut self) {
        if self.session.is_presenting {
            self.exit();
        } else {
            self.enter();
        }
    }

    pub fn enter(&mut self) {
        if self.session.is_presenting {
            return;
        }
        tracing::info!("entering presentation");

        let target = locate::scroll_target(&self.host, &self.settings.classifier);
        self.session.saved_scroll_offset = Some(scroll::current_offset(&self.host, &target));
        self.session.is_presenting = true;

        self.host.set_presenting_flag(true);
        self.rescan(RescanReason::Enter);

        let root = locate::content_root(&self.host, &self.settings.classifier);
        self.host.observe(&root, ObserveOptions::STRUCTURAL);
    }

    pub fn exit(&mut self) {
        if !self.session.is_presenting {
            return;
        }
        tracing::info!("exiting presentation");

        // Nothing may fire into the session once teardown starts.
        self.debouncer.cancel();
        self.host.disconnect();

        if self.host.is_fullscreen() {
            if let Err(e) = self.host.exit_fullscreen() {
                tracing::warn!("leaving fullscreen failed: {e}");
            }
        }

        self.host.set_presenting_flag(false);
        self.host.set_overlay(None);
        self.host.remove_stylesheet();

        // Restore only once our styles are gone, so layout is the host's own.
        if let Some(offset) = self.session.saved_scroll_offset.take() {
            let target = locate::scroll_target(&self.host, &self.settings.classifier);
            scroll::scroll_to_offset(&mut self.host, &target, offset, ScrollBehavior::Instant);
        }

        self.session = Session::idle(Zoom::new(self.settings.default_zoom));
    }

    pub fn next(&mut self) {
        self.navigate(1);
    }

    pub fn prev(&mut self) {
        self.navigate(-1);
    }

    /// Jump to the first slide.
    pub fn start(&mut self) {
        let delta = -(self.session.current_index as isize);
        self.navigate(delta);
    }

    pub fn navigate(&mut self, delta: isize) {
        if !self.session.is_presenting {
            return;
        }
        let index = self.session.clamped(self.session.current_index, delta);
        let classifier = &self.settings.classifier;

        let mut resolved = {
            let root = locate::content_root(&self.host, classifier);
            self.session
                .boundaries
                .get(index)
                .and_then(|b| boundary::resolve(&self.host, classifier, &root, b))
        };

        let mut index = index;
        if resolved.is_none() {
            tracing::debug!(index, "boundary anchor missing, rescanning");
            self.rescan(RescanReason::Navigate);
            index = index.min(self.session.last_index());
            let classifier = &self.settings.classifier;
            let root = locate::content_root(&self.host, classifier);
            resolved = self
                .session
                .boundaries
                .get(index)
                .and_then(|b| boundary::resolve(&self.host, classifier, &root, b));
        }

        self.session.current_index = index;
        let Some(el) = resolved else {
            tracing::debug!(index, "boundary still unresolved, keeping logical position only");
            self.render();
            return;
        };

        tracing::debug!(index, "navigating");
        self.render();
        // Hiding blocks can change which element scrolls; ask again.
        let target = locate::scroll_target(&self.host, &self.settings.classifier);
        scroll::scroll_to_start(&mut self.host, &target, &el, self.settings.scroll_behavior);
    }

    /// Rebuild the boundary list and re-derive the current index.
    ///
    /// After a mutation the previous boundary is looked up by stable id
    /// first. Only when that fails does the scroll position decide, because
    /// our own hiding and resizing moves scroll offsets for reasons that
    /// have nothing to do with where the user is.
    pub fn rescan(&mut self, reason: RescanReason) {
        if !self.session.is_presenting {
            return;
        }
        let classifier = &self.settings.classifier;
        let root = locate::content_root(&self.host, classifier);
        let target = locate::scroll_target(&self.host, classifier);

        let previous_id = match reason {
            RescanReason::Mutation => self.session.current().and_then(|b| b.stable_id.clone()),
            RescanReason::Enter | RescanReason::Navigate => None,
        };

        let mut boundaries = boundary::scan(&self.host, classifier, &root);
        if boundaries.is_empty() {
            boundaries.push(Boundary::synthetic_start(root.clone()));
        }

        let kept = previous_id.and_then(|id| {
            boundaries
                .iter()
                .position(|b| b.stable_id.as_deref() == Some(id.as_str()))
        });
        let index = kept.unwrap_or_else(|| {
            scroll::nearest_boundary_index(&self.host, classifier, &root, &target, &boundaries)
        });

        tracing::debug!(
            ?reason,
            boundaries = boundaries.len(),
            index,
            by_identity = kept.is_some(),
            "rescanned"
        );

        self.session.boundaries = boundaries;
        self.session.current_index = index.min(self.session.last_index());
        self.render();
    }

    /// Feed a batch of observed mutations. Restarts the quiet period.
    pub fn on_mutations(&mut self, records: &[MutationRecord<H::Node>], now: Instant) {
        if !self.session.is_presenting {
            return;
        }
        let relevant = records
            .iter()
            .filter(|r| ObserveOptions::STRUCTURAL.accepts(r.kind))
            .count();
        tracing::trace!(total = records.len(), relevant, "mutation batch");
        if relevant > 0 {
            self.debouncer.schedule(now);
        }
    }

    /// Advance time; runs the pending mutation rescan once it is due.
    /// Returns whether a rescan happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.debouncer.fire_if_due(now) && self.session.is_presenting {
            self.rescan(RescanReason::Mutation);
            return true;
        }
        false
    }

    /// When the host should call [`Presenter::tick`] next, if at all.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Toggle fullscreen. Refusals are logged and otherwise ignored.
    pub fn fullscreen(&mut self) {
        let result = if self.host.is_fullscreen() {
            self.host.exit_fullscreen()
        } else {
            self.host.request_fullscreen()
        };
        if let Err(e) = result {
            tracing::warn!("fullscreen failed: {e}");
        }
    }

    pub fn zoom_in(&mut self) {
        self.session.zoom.zoom_in();
        self.render_if_presenting();
    }

    pub fn zoom_out(&mut self) {
        self.session.zoom.zoom_out();
        self.render_if_presenting();
    }

    pub fn zoom_reset(&mut self) {
        self.session.zoom.reset();
        self.render_if_presenting();
    }

    pub fn zoom_level(&self) -> f64 {
        self.session.zoom.level()
    }

    /// Blocks of the current slide.
    pub fn visible_range(&self) -> VisibleRange {
        let classifier = &self.settings.classifier;
        let root = locate::content_root(&self.host, classifier);
        visibility::compute_visible_range(
            &self.host,
            classifier,
            &root,
            &self.session.boundaries,
            self.session.current_index,
        )
    }

    fn render_if_presenting(&mut self) {
        if self.session.is_presenting {
            self.render();
        }
    }

    fn render(&mut self) {
        let range = self.settings.isolate_slides.then(|| self.visible_range());
        let css = styles::presentation_stylesheet(
            &self.settings.classifier,
            &self.session.zoom,
            range.as_ref(),
        );
        self.host.install_stylesheet(&css);
        self.refresh_overlay();
    }

    fn refresh_overlay(&mut self) {
        let text = self.status_text();
        self.host.set_overlay(Some(&text));
    }
}
