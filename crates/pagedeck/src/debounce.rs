use std::time::{Duration, Instant};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

/// A cancellable single-slot timer.
///
/// Every `schedule` replaces the pending deadline, so the slot only fires
/// once the event stream has been quiet for the whole period. There is never
/// more than one deadline outstanding.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once per settled burst, clearing the slot.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(400 * MS);
        d.schedule(t0);
        assert!(!d.fire_if_due(t0 + 399 * MS));
        assert!(d.fire_if_due(t0 + 400 * MS));
        assert!(!d.is_pending());
        assert!(!d.fire_if_due(t0 + 2_000 * MS));
    }

    #[test]
    fn new_events_restart_the_timer() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(400 * MS);
        d.schedule(t0);
        d.schedule(t0 + 300 * MS);
        assert!(!d.fire_if_due(t0 + 500 * MS));
        assert_eq!(d.deadline(), Some(t0 + 700 * MS));
        assert!(d.fire_if_due(t0 + 700 * MS));
    }

    #[test]
    fn cancel_discards_pending_deadline() {
        let t0 = Instant::now();
        let mut d = Debouncer::default();
        d.schedule(t0);
        d.cancel();
        assert!(!d.fire_if_due(t0 + Duration::from_secs(5)));
        assert_eq!(d.quiet_period(), DEFAULT_QUIET_PERIOD);
    }
}
