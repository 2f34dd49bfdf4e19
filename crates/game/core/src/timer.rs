//! Frame-counting countdown primitive.
//!
//! A [`Timer`] counts up from zero towards `max_time`, one frame per
//! [`Timer::tick`]. Completion is always derived from the two counters and
//! re-evaluated after every mutation, so there is no way to observe a timer
//! whose `complete` flag disagrees with its time.
//!
//! An optional completion hook fires on every false-to-true transition of
//! `complete` and never otherwise.

use core::fmt;

/// Zero-argument hook invoked when a timer transitions into completion.
pub type CompletionHook = Box<dyn FnMut() + Send>;

/// Frame-based timer with an optional completion hook.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timer {
    current_time: u32,
    max_time: u32,
    complete: bool,
    /// When set, time stops at `max_time` once complete instead of counting on.
    stop_counting: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    on_complete: Option<CompletionHook>,
}

impl Timer {
    /// Creates a timer that clamps at `max_time` once complete.
    ///
    /// A zero duration yields a timer that is already complete.
    pub fn new(max_time: u32) -> Self {
        Self::with_stop_counting(max_time, true)
    }

    /// Creates a timer, choosing whether time keeps counting past completion.
    pub fn with_stop_counting(max_time: u32, stop_counting: bool) -> Self {
        Self {
            current_time: 0,
            max_time,
            complete: max_time == 0,
            stop_counting,
            on_complete: None,
        }
    }

    /// Builds a timer from a signed duration; negative durations are degenerate
    /// and treated as already complete.
    pub fn from_signed(max_time: i64) -> Self {
        Self::new(max_time.clamp(0, u32::MAX as i64) as u32)
    }

    /// Attaches the completion hook (builder pattern).
    #[must_use]
    pub fn on_complete(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Replaces the completion hook on an existing timer.
    pub fn set_on_complete(&mut self, hook: impl FnMut() + Send + 'static) {
        self.on_complete = Some(Box::new(hook));
    }

    pub fn current_time(&self) -> u32 {
        self.current_time
    }

    pub fn max_time(&self) -> u32 {
        self.max_time
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn stops_counting(&self) -> bool {
        self.stop_counting
    }

    /// Frames left until completion, zero once complete.
    pub fn remaining(&self) -> u32 {
        self.max_time.saturating_sub(self.current_time)
    }

    /// Advances the timer by one frame.
    ///
    /// A complete timer that stops counting does nothing.
    pub fn tick(&mut self) {
        if self.complete && self.stop_counting {
            return;
        }

        self.current_time = self.current_time.saturating_add(1);
        self.refresh();
    }

    /// Sets the elapsed time directly.
    pub fn set_current_time(&mut self, time: u32) {
        self.current_time = time;
        self.refresh();
    }

    /// Adjusts the elapsed time by `delta`, flooring at zero.
    pub fn mod_current_time(&mut self, delta: i64) {
        let next = (self.current_time as i64)
            .saturating_add(delta)
            .clamp(0, u32::MAX as i64);
        self.current_time = next as u32;
        self.refresh();
    }

    /// Changes the duration, re-deriving completion against the current time.
    pub fn set_max_time(&mut self, max_time: u32) {
        self.max_time = max_time;
        self.refresh();
    }

    /// Jumps straight to the end of the duration.
    pub fn force_complete(&mut self) {
        self.current_time = self.max_time;
        self.refresh();
    }

    /// Zeroes the elapsed time without firing the hook.
    pub fn reset(&mut self) {
        self.current_time = 0;
        self.complete = self.max_time == 0;
    }

    /// Re-derives `complete` and fires the hook on a false-to-true transition.
    fn refresh(&mut self) {
        let was_complete = self.complete;
        self.complete = self.current_time >= self.max_time;

        if self.complete && self.stop_counting {
            self.current_time = self.max_time;
        }

        if self.complete
            && !was_complete
            && let Some(hook) = self.on_complete.as_mut()
        {
            hook();
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("current_time", &self.current_time)
            .field("max_time", &self.max_time)
            .field("complete", &self.complete)
            .field("stop_counting", &self.stop_counting)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn counting_timer(max: u32, stop: bool) -> (Timer, Arc<AtomicU32>) {
        let fired = Arc::new(AtomicU32::new(0));
        let hook_count = Arc::clone(&fired);
        let timer = Timer::with_stop_counting(max, stop).on_complete(move || {
            hook_count.fetch_add(1, Ordering::SeqCst);
        });
        (timer, fired)
    }

    #[test]
    fn completes_exactly_at_max_and_fires_once() {
        let (mut timer, fired) = counting_timer(3, true);

        let mut last = 0;
        for frame in 1..=10 {
            timer.tick();
            assert!(timer.current_time() >= last);
            last = timer.current_time();
            assert_eq!(timer.is_complete(), frame >= 3);
        }

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_counting_clamps_time() {
        let (mut timer, _) = counting_timer(5, true);
        for _ in 0..20 {
            timer.tick();
        }
        assert_eq!(timer.current_time(), 5);
        assert!(timer.is_complete());
    }

    #[test]
    fn keeps_counting_when_not_clamped() {
        let (mut timer, fired) = counting_timer(2, false);
        for _ in 0..6 {
            timer.tick();
        }
        assert_eq!(timer.current_time(), 6);
        assert!(timer.is_complete());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn going_below_max_uncompletes_and_refires_on_next_transition() {
        let (mut timer, fired) = counting_timer(4, true);
        timer.force_complete();
        assert!(timer.is_complete());
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        timer.mod_current_time(-2);
        assert!(!timer.is_complete());
        assert_eq!(timer.current_time(), 2);

        timer.set_current_time(9);
        assert!(timer.is_complete());
        assert_eq!(timer.current_time(), 4);
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn reset_does_not_fire() {
        let (mut timer, fired) = counting_timer(2, true);
        timer.tick();
        timer.tick();
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        timer.reset();
        assert_eq!(timer.current_time(), 0);
        assert!(!timer.is_complete());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn degenerate_durations_are_already_complete() {
        assert!(Timer::new(0).is_complete());
        assert!(Timer::from_signed(-30).is_complete());

        let (mut timer, fired) = counting_timer(0, true);
        timer.tick();
        assert_eq!(timer.current_time(), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn mod_current_time_floors_at_zero() {
        let mut timer = Timer::new(10);
        timer.mod_current_time(-50);
        assert_eq!(timer.current_time(), 0);
        assert_eq!(timer.remaining(), 10);
    }

    #[test]
    fn mod_current_time_saturates_on_extreme_deltas() {
        let mut timer = Timer::new(10);
        timer.tick();
        timer.mod_current_time(i64::MAX);
        assert!(timer.is_complete());
        assert_eq!(timer.current_time(), 10);

        let mut unclamped = Timer::with_stop_counting(10, false);
        unclamped.mod_current_time(i64::MAX);
        assert_eq!(unclamped.current_time(), u32::MAX);

        unclamped.mod_current_time(i64::MIN);
        assert_eq!(unclamped.current_time(), 0);
        assert!(!unclamped.is_complete());
    }

    #[test]
    fn hook_can_be_replaced_in_place() {
        let (mut timer, first) = counting_timer(2, false);
        assert!(!timer.stops_counting());

        let second = Arc::new(AtomicU32::new(0));
        let hook_count = Arc::clone(&second);
        timer.set_on_complete(move || {
            hook_count.fetch_add(1, Ordering::SeqCst);
        });

        timer.tick();
        timer.tick();
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert!(Timer::new(3).stops_counting());
    }
}
