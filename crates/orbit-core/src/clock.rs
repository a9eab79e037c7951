//! Wall-clock sources.
//!
//! Evaluators never read the system clock themselves; they are handed a
//! [`WallTime`] obtained from a [`ClockSource`] once per tick.

use std::sync::Mutex;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A local wall-clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallTime(NaiveDateTime);

impl WallTime {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    pub fn hour(&self) -> u8 {
        self.0.hour() as u8
    }

    pub fn minute(&self) -> u8 {
        self.0.minute() as u8
    }

    /// Weekday index, 0 = Sunday .. 6 = Saturday.
    pub fn weekday(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// The reading truncated to the start of its minute.
    pub fn minute_stamp(&self) -> NaiveDateTime {
        self.0
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(self.0)
    }
}

impl From<NaiveDateTime> for WallTime {
    fn from(at: NaiveDateTime) -> Self {
        Self(at)
    }
}

/// Supplies the current local time on demand.
pub trait ClockSource: Send + Sync {
    fn now(&self) -> WallTime;
}

/// The system clock in the observer's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> WallTime {
        WallTime(Local::now().naive_local())
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(at),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> WallTime {
        WallTime(*self.now.lock().unwrap_or_else(|e| e.into_inner()))
    }
}
