use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alarm::Alarm;

/// Every state change in the tools panel produces an Event.
/// The presentation layer consumes them for sound, overlays and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// An alarm matched the current minute. The carried alarm already
    /// reflects any deactivation applied by the evaluator.
    AlarmTriggered {
        alarm: Alarm,
        /// Local wall time of the matching tick.
        at: NaiveDateTime,
    },
    CountdownStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownCompleted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownReset {
        at: DateTime<Utc>,
    },
    StopwatchStarted {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchPaused {
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StopwatchReset {
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_alarm(&self) -> bool {
        matches!(self, Event::AlarmTriggered { .. })
    }

    pub fn is_countdown_completed(&self) -> bool {
        matches!(self, Event::CountdownCompleted { .. })
    }
}
