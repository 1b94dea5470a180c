//! Poll scheduling.
//!
//! Views without a push channel refresh their data on a fixed interval.
//! [`PollSchedule`] owns the decisions (when to arm or disarm the timer,
//! whether a tick should fetch) while the frontend owns the actual timer
//! and the page-visibility listener. Keeping the decisions here lets them
//! be exercised without a browser.

use std::time::Duration;

use log::{debug, info};

/// What the timer owner has to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollAction {
    /// Fetch fresh data right now.
    pub fetch: bool,
    /// Arm (`Some(true)`) or disarm (`Some(false)`) the interval timer.
    pub timer: Option<bool>,
}

impl PollAction {
    const NONE: PollAction = PollAction { fetch: false, timer: None };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    /// Running but the page is hidden; the timer is disarmed.
    Paused,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSchedule {
    name: &'static str,
    interval: Duration,
    phase: Phase,
}

impl PollSchedule {
    pub fn new(name: &'static str, interval: Duration) -> Self {
        Self {
            name,
            interval,
            phase: Phase::Idle,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.phase == Phase::Stopped
    }

    /// Starts polling: one immediate fetch, then the timer. `hidden`
    /// reports whether the page is currently in the background.
    pub fn start(&mut self, hidden: bool) -> PollAction {
        if self.phase != Phase::Idle {
            return PollAction::NONE;
        }
        info!("polling {} every {:?}", self.name, self.interval);
        if hidden {
            self.phase = Phase::Paused;
            return PollAction { fetch: true, timer: None };
        }
        self.phase = Phase::Running;
        PollAction {
            fetch: true,
            timer: Some(true),
        }
    }

    /// A timer tick. Fetches only while running.
    pub fn tick(&mut self) -> PollAction {
        PollAction {
            fetch: self.phase == Phase::Running,
            timer: None,
        }
    }

    /// Page visibility changed. Hiding disarms the timer; showing again
    /// fetches at once and re-arms it.
    pub fn visibility_changed(&mut self, hidden: bool) -> PollAction {
        match (self.phase, hidden) {
            (Phase::Running, true) => {
                debug!("polling {} paused: page hidden", self.name);
                self.phase = Phase::Paused;
                PollAction {
                    fetch: false,
                    timer: Some(false),
                }
            }
            (Phase::Paused, false) => {
                debug!("polling {} resumed", self.name);
                self.phase = Phase::Running;
                PollAction {
                    fetch: true,
                    timer: Some(true),
                }
            }
            _ => PollAction::NONE,
        }
    }

    /// Stops for good. Later events are ignored.
    pub fn stop(&mut self) -> PollAction {
        let was_armed = self.phase == Phase::Running;
        if self.phase != Phase::Stopped {
            info!("polling {} stopped", self.name);
        }
        self.phase = Phase::Stopped;
        PollAction {
            fetch: false,
            timer: was_armed.then_some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> PollSchedule {
        PollSchedule::new("admin orders", Duration::from_secs(5))
    }

    #[test]
    fn start_fetches_and_arms() {
        let mut poll = schedule();
        assert_eq!(poll.start(false), PollAction { fetch: true, timer: Some(true) });
        assert!(poll.is_running());
        assert!(poll.tick().fetch);
        assert_eq!(poll.start(false), PollAction::default());
    }

    #[test]
    fn hidden_page_pauses_and_resume_fetches_immediately() {
        let mut poll = schedule();
        poll.start(false);

        assert_eq!(poll.visibility_changed(true), PollAction { fetch: false, timer: Some(false) });
        assert!(!poll.tick().fetch);
        assert_eq!(poll.visibility_changed(true), PollAction::default());

        assert_eq!(poll.visibility_changed(false), PollAction { fetch: true, timer: Some(true) });
        assert!(poll.tick().fetch);
    }

    #[test]
    fn starting_in_background_waits_for_visibility() {
        let mut poll = schedule();
        assert_eq!(poll.start(true), PollAction { fetch: true, timer: None });
        assert!(!poll.tick().fetch);
        assert_eq!(poll.visibility_changed(false).timer, Some(true));
    }

    #[test]
    fn stop_is_final() {
        let mut poll = schedule();
        poll.start(false);
        assert_eq!(poll.stop(), PollAction { fetch: false, timer: Some(false) });
        assert!(poll.is_stopped());
        assert!(!poll.tick().fetch);
        assert_eq!(poll.visibility_changed(false), PollAction::default());
        assert_eq!(poll.start(false), PollAction::default());
        assert_eq!(poll.stop().timer, None);
    }
}
