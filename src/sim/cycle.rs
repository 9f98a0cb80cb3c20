// src/sim/cycle.rs

use thiserror::Error;

use crate::constants::{DEFAULT_RESET_PERIOD, DEFAULT_SAMPLE_PERIOD};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("{which} period must be at least 1 step")]
    ZeroPeriod { which: &'static str },
}

/// What the stepper does on a given counter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleAction {
    /// Restore the tracked body to its default state and restart the counter.
    Reset,
    /// Read the sensor joint wrench and emit it.
    Sample,
    Idle,
}

/// Two periodic triggers keyed on one counter.
///
/// Precedence: when the counter is a multiple of both periods only `Reset`
/// fires, so no sample is taken on a reset tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSchedule {
    reset_period: u64,
    sample_period: u64,
}

impl CycleSchedule {
    pub fn new(reset_period: u64, sample_period: u64) -> Result<Self, ScheduleError> {
        if reset_period == 0 {
            return Err(ScheduleError::ZeroPeriod { which: "reset" });
        }
        if sample_period == 0 {
            return Err(ScheduleError::ZeroPeriod { which: "sample" });
        }
        Ok(Self {
            reset_period,
            sample_period,
        })
    }

    pub fn reset_period(&self) -> u64 {
        self.reset_period
    }

    pub fn sample_period(&self) -> u64 {
        self.sample_period
    }

    pub fn action_for(&self, counter: u64) -> CycleAction {
        if counter % self.reset_period == 0 {
            CycleAction::Reset
        } else if counter % self.sample_period == 0 {
            CycleAction::Sample
        } else {
            CycleAction::Idle
        }
    }
}

impl Default for CycleSchedule {
    fn default() -> Self {
        Self {
            reset_period: DEFAULT_RESET_PERIOD,
            sample_period: DEFAULT_SAMPLE_PERIOD,
        }
    }
}

/// Step counter that restarts from zero on every reset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleCounter {
    count: u64,
}

impl CycleCounter {
    pub fn current(&self) -> u64 {
        self.count
    }

    pub fn advance(&mut self) {
        self.count += 1;
    }

    pub fn restart(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_periods_are_rejected() {
        assert_eq!(
            CycleSchedule::new(0, 5),
            Err(ScheduleError::ZeroPeriod { which: "reset" })
        );
        assert!(CycleSchedule::new(400, 0).is_err());
    }

    #[test]
    fn reset_wins_on_shared_multiples() {
        let schedule = CycleSchedule::new(400, 5).unwrap();
        assert_eq!(schedule.action_for(0), CycleAction::Reset);
        assert_eq!(schedule.action_for(400), CycleAction::Reset);
        assert_eq!(schedule.action_for(800), CycleAction::Reset);
        assert_eq!(schedule.action_for(5), CycleAction::Sample);
        assert_eq!(schedule.action_for(395), CycleAction::Sample);
        assert_eq!(schedule.action_for(7), CycleAction::Idle);
    }

    #[test]
    fn counter_advances_and_restarts() {
        let mut counter = CycleCounter::default();
        counter.advance();
        counter.advance();
        assert_eq!(counter.current(), 2);
        counter.restart();
        assert_eq!(counter.current(), 0);
    }
}

// src/sim/cycle.rs
