//! Stopwatch.
//!
//! Operates on wall-clock deltas, not tick counts: elapsed time is flushed
//! from the last start timestamp whenever it is read or the stopwatch pauses.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    /// Elapsed time accumulated up to `last_start_epoch_ms`.
    elapsed_ms: u64,
    /// Set while running.
    #[serde(default)]
    last_start_epoch_ms: Option<u64>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(&self) -> bool {
        self.last_start_epoch_ms.is_some()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms_at(now_ms())
    }

    pub fn elapsed_ms_at(&self, now_ms: u64) -> u64 {
        match self.last_start_epoch_ms {
            Some(start) => self.elapsed_ms + now_ms.saturating_sub(start),
            None => self.elapsed_ms,
        }
    }

    /// `MM:SS.cc`; minutes are not wrapped into hours.
    pub fn format(&self) -> String {
        format_elapsed(self.elapsed_ms())
    }

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.running() {
            return None;
        }
        self.last_start_epoch_ms = Some(now_ms);
        Some(Event::StopwatchStarted {
            elapsed_ms: self.elapsed_ms,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if !self.running() {
            return None;
        }
        self.elapsed_ms = self.elapsed_ms_at(now_ms);
        self.last_start_epoch_ms = None;
        Some(Event::StopwatchPaused {
            elapsed_ms: self.elapsed_ms,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop and clear.
    pub fn reset(&mut self) -> Event {
        self.elapsed_ms = 0;
        self.last_start_epoch_ms = None;
        Event::StopwatchReset { at: Utc::now() }
    }
}

pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centis = (ms % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_across_pauses() {
        let mut sw = Stopwatch::new();
        assert!(sw.start_at(1_000).is_some());
        assert!(sw.start_at(1_500).is_none());
        assert_eq!(sw.elapsed_ms_at(3_500), 2_500);

        assert!(sw.pause_at(4_000).is_some());
        assert_eq!(sw.elapsed_ms_at(99_000), 3_000);

        sw.start_at(10_000);
        assert_eq!(sw.elapsed_ms_at(10_250), 3_250);
    }

    #[test]
    fn reset_clears() {
        let mut sw = Stopwatch::new();
        sw.start_at(0);
        sw.pause_at(5_000);
        sw.reset();
        assert!(!sw.running());
        assert_eq!(sw.elapsed_ms(), 0);
    }

    #[test]
    fn formats_centiseconds() {
        assert_eq!(format_elapsed(0), "00:00.00");
        assert_eq!(format_elapsed(61_234), "01:01.23");
        assert_eq!(format_elapsed(75 * 60_000), "75:00.00");
    }
}
