//! Time Source
//!
//! Log timestamps come from an injected [`Clock`] so the session can be
//! driven with a fixed time in tests.

use chrono::{Duration, NaiveDateTime};
use std::cell::Cell;

/// Source of local wall-clock time
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// The system clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }

    pub fn set(&self, to: NaiveDateTime) {
        self.current.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Format a time the way the robot log displays it, e.g. `3:04:05 PM`
pub fn format_time(at: NaiveDateTime) -> String {
    at.format("%-I:%M:%S %p").to_string()
}
