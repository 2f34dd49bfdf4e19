use crate::timer::Timer;

/// Timer-backed alert state.
///
/// Alerting starts (or restarts) a countdown; the battler stays alerted until
/// the countdown completes.
#[derive(Debug)]
pub struct AlertTracker {
    timer: Timer,
}

impl AlertTracker {
    /// A calm tracker.
    pub fn new() -> Self {
        Self {
            timer: Timer::new(0),
        }
    }

    /// Alerts for `frames` frames, replacing any remaining duration.
    pub fn alert(&mut self, frames: u32) {
        self.timer.set_max_time(frames);
        self.timer.reset();
    }

    /// Advances the alert countdown by one frame.
    pub fn update(&mut self) {
        self.timer.tick();
    }

    pub fn is_alerted(&self) -> bool {
        !self.timer.is_complete()
    }

    pub fn remaining(&self) -> u32 {
        self.timer.remaining()
    }

    /// Ends the alert immediately.
    pub fn clear(&mut self) {
        self.timer.force_complete();
    }
}

impl Default for AlertTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_expires_after_duration() {
        let mut alert = AlertTracker::new();
        assert!(!alert.is_alerted());

        alert.alert(3);
        assert!(alert.is_alerted());
        alert.update();
        alert.update();
        assert!(alert.is_alerted());
        assert_eq!(alert.remaining(), 1);
        alert.update();
        assert!(!alert.is_alerted());
    }

    #[test]
    fn realert_restarts_and_clear_ends() {
        let mut alert = AlertTracker::new();
        alert.alert(2);
        alert.update();
        alert.alert(5);
        assert_eq!(alert.remaining(), 5);

        alert.clear();
        assert!(!alert.is_alerted());
    }
}
