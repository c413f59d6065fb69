//! Result-count announcements
//!
//! Assistive output should hear "87 results" once the dust settles, not on
//! every keystroke. Count changes are debounced (trailing edge: only the
//! last observation in a burst fires) and the very first count after mount
//! is swallowed, so opening a table does not announce its initial load.

use std::time::{Duration, Instant};

/// Quiescence window before a count change is announced.
pub const ANNOUNCE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct CountAnnouncer {
    delay: Duration,
    last_value: Option<usize>,
    pending: Option<(usize, Instant)>,
    seen_first: bool,
}

impl Default for CountAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountAnnouncer {
    pub fn new() -> Self {
        Self::with_delay(ANNOUNCE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            last_value: None,
            pending: None,
            seen_first: false,
        }
    }

    /// Feed the current result count. Call whenever a valid count is
    /// available; while data is loading there is nothing to observe.
    pub fn observe(&mut self, count: usize, now: Instant) {
        if !self.seen_first {
            // One-shot latch: the first valid count is the initial load.
            self.seen_first = true;
            self.last_value = Some(count);
            return;
        }

        if self.last_value == Some(count) {
            // Back to the already-announced value before the delay elapsed.
            self.pending = None;
            return;
        }

        match self.pending {
            // Same value already waiting: keep its window, so per-frame
            // re-observation cannot starve the announcement.
            Some((pending_count, _)) if pending_count == count => {}
            _ => self.pending = Some((count, now)),
        }
    }

    /// Whether an announcement is waiting for its quiet window. Callers in
    /// immediate-mode UIs use this to schedule a wake-up frame.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Return a due announcement, if any. Polling is cheap; call once per
    /// frame.
    pub fn poll(&mut self, now: Instant) -> Option<usize> {
        let (count, at) = self.pending?;
        if now.duration_since(at) < self.delay {
            return None;
        }
        self.pending = None;
        self.last_value = Some(count);
        Some(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn at(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn first_count_is_swallowed() {
        let start = Instant::now();
        let mut announcer = CountAnnouncer::with_delay(DELAY);

        announcer.observe(100, start);
        assert_eq!(announcer.poll(at(start, 1000)), None);
    }

    #[test]
    fn a_change_is_announced_after_the_delay() {
        let start = Instant::now();
        let mut announcer = CountAnnouncer::with_delay(DELAY);

        announcer.observe(100, start);
        announcer.observe(4, at(start, 50));

        assert_eq!(announcer.poll(at(start, 100)), None);
        assert_eq!(announcer.poll(at(start, 400)), Some(4));
        // Announced once, not again.
        assert_eq!(announcer.poll(at(start, 800)), None);
    }

    #[test]
    fn bursts_debounce_to_the_last_value() {
        let start = Instant::now();
        let mut announcer = CountAnnouncer::with_delay(DELAY);
        announcer.observe(100, start);

        // A typing burst: each new count resets the window.
        announcer.observe(40, at(start, 10));
        announcer.observe(12, at(start, 150));
        announcer.observe(4, at(start, 290));

        // 290 + 300 has not elapsed at 400.
        assert_eq!(announcer.poll(at(start, 400)), None);
        assert_eq!(announcer.poll(at(start, 600)), Some(4));
    }

    #[test]
    fn re_observing_the_pending_value_keeps_its_window() {
        let start = Instant::now();
        let mut announcer = CountAnnouncer::with_delay(DELAY);
        announcer.observe(100, start);

        // A UI polling every frame feeds the same new count repeatedly; the
        // window must run from the first observation.
        announcer.observe(4, at(start, 10));
        announcer.observe(4, at(start, 150));
        announcer.observe(4, at(start, 300));

        assert_eq!(announcer.poll(at(start, 350)), Some(4));
    }

    #[test]
    fn returning_to_the_announced_value_cancels_the_pending_announcement() {
        let start = Instant::now();
        let mut announcer = CountAnnouncer::with_delay(DELAY);
        announcer.observe(100, start);

        announcer.observe(4, at(start, 10));
        announcer.observe(100, at(start, 50));

        assert_eq!(announcer.poll(at(start, 1000)), None);
    }
}
