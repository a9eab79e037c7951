//! Countdown timer.
//!
//! Tick-driven: each `tick()` while running removes exactly one second.
//! The countdown keeps no clock of its own, so a paused countdown resumes
//! from where it stopped no matter how many ticks went by.
//!
//! ## State Transitions
//!
//! ```text
//! Editing -> Running <-> Paused
//!            Running -> Completed -> Editing (reset)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut countdown = Countdown::new(300);
//! countdown.start()?;
//! // Once per second:
//! countdown.tick(); // Returns Some(Event::CountdownCompleted) exactly once
//! ```

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Editing,
    Running,
    Paused,
    /// Reached zero while running. Stays here until reset.
    Completed,
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CountdownState::Editing => "editing",
            CountdownState::Running => "running",
            CountdownState::Paused => "paused",
            CountdownState::Completed => "completed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    state: CountdownState,
    /// Duration used by the next `start()`; fixed while a run is in progress.
    total_duration_secs: u64,
    remaining_secs: u64,
}

impl Default for Countdown {
    fn default() -> Self {
        // Five minutes.
        Self::new(5 * 60)
    }
}

impl Countdown {
    /// Create a countdown in the `Editing` state.
    pub fn new(duration_secs: u64) -> Self {
        Self {
            state: CountdownState::Editing,
            total_duration_secs: duration_secs,
            remaining_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn total_duration_secs(&self) -> u64 {
        self.total_duration_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn completed(&self) -> bool {
        self.state == CountdownState::Completed
    }

    /// 1.0 .. 0.0 fraction of the duration still remaining.
    pub fn progress(&self) -> f64 {
        if self.total_duration_secs == 0 {
            return 0.0;
        }
        self.remaining_secs as f64 / self.total_duration_secs as f64
    }

    /// `HH:MM:SS` when at least an hour remains, else `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format_secs(self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Change the duration for the next run. Only allowed while editing.
    pub fn set_duration(&mut self, duration_secs: u64) -> Result<(), ValidationError> {
        if self.state != CountdownState::Editing {
            return Err(self.misuse("set duration"));
        }
        self.total_duration_secs = duration_secs;
        Ok(())
    }

    /// Start a run from `Editing`. A zero duration is refused and leaves
    /// the countdown untouched.
    pub fn start(&mut self) -> Result<Event, ValidationError> {
        if self.state != CountdownState::Editing {
            return Err(self.misuse("start"));
        }
        if self.total_duration_secs == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        self.remaining_secs = self.total_duration_secs;
        self.state = CountdownState::Running;
        debug!(duration_secs = self.total_duration_secs, "countdown started");
        Ok(Event::CountdownStarted {
            duration_secs: self.total_duration_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Running => {
                self.state = CountdownState::Paused;
                Some(Event::CountdownPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Paused => {
                self.state = CountdownState::Running;
                Some(Event::CountdownResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Pause when running, resume when paused.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            CountdownState::Running => self.pause(),
            CountdownState::Paused => self.resume(),
            _ => None,
        }
    }

    /// Back to `Editing`, keeping the configured duration.
    pub fn reset(&mut self) -> Event {
        self.state = CountdownState::Editing;
        self.remaining_secs = 0;
        Event::CountdownReset { at: Utc::now() }
    }

    /// Call once per second. Returns `Some(Event::CountdownCompleted)` on the
    /// tick that reaches zero, and never again for the same run.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != CountdownState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.state = CountdownState::Completed;
        debug!(duration_secs = self.total_duration_secs, "countdown completed");
        Some(Event::CountdownCompleted {
            duration_secs: self.total_duration_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn misuse(&self, action: &'static str) -> ValidationError {
        ValidationError::InvalidCountdownState {
            action,
            state: self.state.to_string(),
        }
    }
}

pub(crate) fn format_secs(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Parse `90`, `45s`, `5m`, `1h30m`, `1h2m3s`, `MM:SS` or `HH:MM:SS` into seconds.
pub fn parse_duration(text: &str) -> Result<u64, ValidationError> {
    let invalid = || ValidationError::InvalidDuration(text.to_string());
    let text = text.trim();
    if text.is_empty() {
        return Err(invalid());
    }

    if text.contains(':') {
        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }
        let mut total: u64 = 0;
        for part in parts {
            let n: u64 = part.parse().map_err(|_| invalid())?;
            total = total.checked_mul(60).and_then(|t| t.checked_add(n)).ok_or_else(invalid)?;
        }
        return Ok(total);
    }

    if let Ok(secs) = text.parse::<u64>() {
        return Ok(secs);
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit = match c.to_ascii_lowercase() {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(invalid()),
        };
        let n: u64 = digits.parse().map_err(|_| invalid())?;
        digits.clear();
        total = n
            .checked_mul(unit)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(invalid)?;
    }
    if !digits.is_empty() {
        return Err(invalid());
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_second_countdown_completes_on_fifth_tick() {
        let mut c = Countdown::new(5);
        c.start().unwrap();

        let mut completions = 0;
        for _ in 0..5 {
            if let Some(event) = c.tick() {
                assert!(event.is_countdown_completed());
                completions += 1;
            }
        }
        assert_eq!(c.remaining_secs(), 0);
        assert!(!c.running());
        assert!(c.completed());
        assert_eq!(completions, 1);

        // Further ticks are inert.
        for _ in 0..3 {
            assert!(c.tick().is_none());
        }
    }

    #[test]
    fn pause_keeps_remaining_across_idle_ticks() {
        let mut c = Countdown::new(5);
        c.start().unwrap();
        c.tick();
        c.tick();
        assert_eq!(c.remaining_secs(), 3);

        assert!(c.pause().is_some());
        for _ in 0..10 {
            assert!(c.tick().is_none());
        }
        assert_eq!(c.remaining_secs(), 3);

        assert!(c.resume().is_some());
        c.tick();
        assert_eq!(c.remaining_secs(), 2);
    }

    #[test]
    fn zero_duration_start_is_rejected_without_transition() {
        let mut c = Countdown::new(0);
        assert_eq!(c.start().unwrap_err(), ValidationError::ZeroDuration);
        assert_eq!(c.state(), CountdownState::Editing);
        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn reset_returns_to_editing() {
        let mut c = Countdown::new(2);
        c.start().unwrap();
        c.tick();
        c.tick();
        assert!(c.completed());
        c.reset();
        assert_eq!(c.state(), CountdownState::Editing);
        assert_eq!(c.remaining_secs(), 0);
        assert!(!c.running() && !c.completed());
        assert_eq!(c.total_duration_secs(), 2);
        assert!(c.start().is_ok());
    }

    #[test]
    fn cannot_start_or_edit_while_running() {
        let mut c = Countdown::new(10);
        c.start().unwrap();
        assert!(matches!(
            c.start(),
            Err(ValidationError::InvalidCountdownState { action: "start", .. })
        ));
        assert!(c.set_duration(20).is_err());
        assert_eq!(c.total_duration_secs(), 10);
    }

    #[test]
    fn pause_and_resume_only_from_matching_states() {
        let mut c = Countdown::new(10);
        assert!(c.pause().is_none());
        assert!(c.resume().is_none());
        c.start().unwrap();
        assert!(c.resume().is_none());
        assert!(c.toggle().is_some());
        assert_eq!(c.state(), CountdownState::Paused);
        assert!(c.toggle().is_some());
        assert_eq!(c.state(), CountdownState::Running);
    }

    #[test]
    fn formats_remaining() {
        assert_eq!(format_secs(0), "00:00");
        assert_eq!(format_secs(65), "01:05");
        assert_eq!(format_secs(3600 + 2 * 60 + 3), "01:02:03");
    }

    #[test]
    fn progress_fraction() {
        let mut c = Countdown::new(4);
        c.start().unwrap();
        assert_eq!(c.progress(), 1.0);
        c.tick();
        assert_eq!(c.progress(), 0.75);
    }

    #[test]
    fn parses_durations() {
        assert_eq!(parse_duration("90"), Ok(90));
        assert_eq!(parse_duration("45s"), Ok(45));
        assert_eq!(parse_duration("5m"), Ok(300));
        assert_eq!(parse_duration("1h30m"), Ok(5400));
        assert_eq!(parse_duration("1h2m3s"), Ok(3723));
        assert_eq!(parse_duration("01:30"), Ok(90));
        assert_eq!(parse_duration("01:30:00"), Ok(5400));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("5x").is_err());
        assert!(parse_duration("m").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
        assert!(parse_duration("10m5").is_err());
    }
}
