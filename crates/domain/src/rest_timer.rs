//! Wall-clock synchronized rest countdown.
//!
//! The countdown is anchored to whole seconds of the wall clock. Instead of accumulating tick
//! deltas, every tick recomputes the elapsed time from the recorded start second, so delayed or
//! throttled ticks (e.g. in a background tab) never cause drift.
//!
//! The timer itself is passive. A driver calls [`RestTimer::activate`], waits the returned delay,
//! calls [`RestTimer::begin`], then [`RestTimer::tick`] every [`TICK_INTERVAL_MS`] until the timer
//! expires or is dismissed, waits [`EXIT_ANIMATION_MS`] and finally calls [`RestTimer::finish`].

use chrono::{DateTime, Utc};

use crate::Time;

pub const TICK_INTERVAL_MS: u32 = 1000;
pub const EXIT_ANIMATION_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inactive,
    /// Waiting for the next second boundary.
    Armed { start: i64 },
    Running { start: i64 },
    /// Exit animation is playing, the outcome is delivered by `finish`.
    Finishing { outcome: Outcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running,
    Expired,
    Idle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestTimer {
    rest_time: Time,
    phase: Phase,
    elapsed: u32,
}

impl RestTimer {
    #[must_use]
    pub fn new(rest_time: Time) -> Self {
        Self {
            rest_time,
            phase: Phase::Inactive,
            elapsed: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn rest_time(&self) -> Time {
        self.rest_time
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Inactive
    }

    #[must_use]
    pub fn is_animating_out(&self) -> bool {
        matches!(self.phase, Phase::Finishing { .. })
    }

    #[must_use]
    pub fn remaining(&self) -> Time {
        Time::new(self.rest_time.seconds().saturating_sub(self.elapsed))
    }

    /// Share of the rest time that has passed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.rest_time == Time::ZERO {
            return 1.0;
        }
        (f64::from(self.elapsed) / f64::from(self.rest_time.seconds())).min(1.0)
    }

    /// Share of the rest time that is left, in `[0, 1]`.
    #[must_use]
    pub fn remaining_fraction(&self) -> f64 {
        if self.rest_time == Time::ZERO {
            return 0.0;
        }
        f64::from(self.remaining().seconds()) / f64::from(self.rest_time.seconds())
    }

    /// Starts the countdown and returns the delay in milliseconds until the next second
    /// boundary, at which `begin` must be called. Returns `None` if the timer is already active.
    pub fn activate(&mut self, now: DateTime<Utc>) -> Option<u32> {
        if self.is_active() {
            return None;
        }
        self.elapsed = 0;
        self.phase = Phase::Armed {
            start: now.timestamp(),
        };
        Some(TICK_INTERVAL_MS - now.timestamp_subsec_millis().min(TICK_INTERVAL_MS - 1))
    }

    pub fn begin(&mut self, now: DateTime<Utc>) -> Tick {
        let Phase::Armed { start } = self.phase else {
            return Tick::Idle;
        };
        self.phase = Phase::Running { start };
        self.tick(now)
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        let Phase::Running { start } = self.phase else {
            return Tick::Idle;
        };
        self.elapsed = elapsed_seconds(start, now);
        if self.remaining() == Time::ZERO {
            self.phase = Phase::Finishing {
                outcome: Outcome::Completed,
            };
            return Tick::Expired;
        }
        Tick::Running
    }

    /// Changes the rest time without restarting the countdown.
    ///
    /// A running timer keeps its start second, so the remaining time reflects the new rest time
    /// immediately. If no time is left, the timer expires on the next tick.
    pub fn set_rest_time(&mut self, rest_time: Time, now: DateTime<Utc>) {
        self.rest_time = rest_time;
        if let Phase::Running { start } = self.phase {
            self.elapsed = elapsed_seconds(start, now);
        }
    }

    /// Ends the countdown early. Returns `false` if there was no countdown to end.
    pub fn dismiss(&mut self) -> bool {
        match self.phase {
            Phase::Armed { .. } | Phase::Running { .. } => {
                self.phase = Phase::Finishing {
                    outcome: Outcome::Dismissed,
                };
                true
            }
            Phase::Inactive | Phase::Finishing { .. } => false,
        }
    }

    /// Completes the exit animation. The outcome is returned exactly once.
    pub fn finish(&mut self) -> Option<Outcome> {
        let Phase::Finishing { outcome } = self.phase else {
            return None;
        };
        self.phase = Phase::Inactive;
        self.elapsed = 0;
        Some(outcome)
    }

    /// Cancels the countdown without any outcome.
    pub fn deactivate(&mut self) {
        self.phase = Phase::Inactive;
        self.elapsed = 0;
    }
}

fn elapsed_seconds(start: i64, now: DateTime<Utc>) -> u32 {
    u32::try_from((now.timestamp() - start).max(0)).unwrap_or(u32::MAX)
}
