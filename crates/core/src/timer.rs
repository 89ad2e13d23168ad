//! Countdown driven by external one-second ticks.
//!
//! The countdown holds no clock of its own; whoever owns the interval calls
//! [`Countdown::tick`]. Starting always replaces whatever was running, so at
//! most one countdown is ever live.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    #[default]
    Stopped,
    Running,
    Expired,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown is not running; nothing changed.
    Idle,
    /// One second elapsed, this many remain.
    Ticked(u32),
    /// The countdown just hit zero. Reported once per run.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    state: CountdownState,
    remaining: u32,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arm at `secs` and start running.
    pub fn start(&mut self, secs: u32) {
        self.remaining = secs;
        self.state = CountdownState::Running;
    }

    /// Stop without touching the remaining time.
    pub fn stop(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Stopped;
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != CountdownState::Running {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = CountdownState::Expired;
            return TickOutcome::Expired;
        }
        TickOutcome::Ticked(self.remaining)
    }

    #[must_use]
    pub fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_countdown_ignores_ticks() {
        let mut countdown = Countdown::new();
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.state(), CountdownState::Stopped);
    }

    #[test]
    fn expires_exactly_once() {
        let mut countdown = Countdown::new();
        countdown.start(3);
        assert_eq!(countdown.tick(), TickOutcome::Ticked(2));
        assert_eq!(countdown.tick(), TickOutcome::Ticked(1));
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert_eq!(countdown.state(), CountdownState::Expired);
        assert_eq!(countdown.remaining(), 0);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
    }

    #[test]
    fn restart_replaces_running_countdown() {
        let mut countdown = Countdown::new();
        countdown.start(60);
        countdown.tick();
        countdown.start(60);
        assert_eq!(countdown.remaining(), 60);
        assert!(countdown.is_running());
    }

    #[test]
    fn zero_start_expires_on_first_tick() {
        let mut countdown = Countdown::new();
        countdown.start(0);
        assert_eq!(countdown.tick(), TickOutcome::Expired);
    }

    #[test]
    fn stop_keeps_remaining_time() {
        let mut countdown = Countdown::new();
        countdown.start(10);
        countdown.tick();
        countdown.stop();
        assert_eq!(countdown.remaining(), 9);
        assert_eq!(countdown.tick(), TickOutcome::Idle);
    }
}
