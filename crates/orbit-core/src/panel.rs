//! The tools panel: alarms, countdown and stopwatch under one owner.
//!
//! The panel owns the alarm collection and lends it to the evaluator by
//! reference on each tick, so edits made between ticks are always seen.

use serde::Serialize;

use crate::alarm::{AlarmBook, AlarmEvaluator};
use crate::clock::WallTime;
use crate::events::Event;
use crate::timer::{Countdown, CountdownState, Stopwatch};

#[derive(Debug, Default)]
pub struct ToolsPanel {
    alarms: AlarmBook,
    evaluator: AlarmEvaluator,
    countdown: Countdown,
    stopwatch: Stopwatch,
}

/// Read-only view of the panel for display.
#[derive(Debug, Clone, Serialize)]
pub struct PanelSnapshot {
    pub active_alarms: usize,
    pub total_alarms: usize,
    pub countdown_state: CountdownState,
    pub countdown_remaining: String,
    pub stopwatch: String,
    pub stopwatch_running: bool,
}

impl ToolsPanel {
    pub fn new(alarms: AlarmBook, countdown: Countdown) -> Self {
        Self {
            alarms,
            evaluator: AlarmEvaluator::new(),
            countdown,
            stopwatch: Stopwatch::new(),
        }
    }

    pub fn alarms(&self) -> &AlarmBook {
        &self.alarms
    }

    pub fn alarms_mut(&mut self) -> &mut AlarmBook {
        &mut self.alarms
    }

    /// Swap in a freshly loaded alarm list.
    ///
    /// Fired-minute records carry over for ids still present, so an alarm
    /// that already fired this minute stays quiet after the swap.
    pub fn replace_alarms(&mut self, alarms: AlarmBook) {
        self.alarms = alarms;
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn countdown_mut(&mut self) -> &mut Countdown {
        &mut self.countdown
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.stopwatch
    }

    /// One evaluation step: alarms first, then the countdown.
    pub fn tick(&mut self, now: &WallTime) -> Vec<Event> {
        let mut events = self.evaluator.evaluate(now, self.alarms.as_mut_slice());
        events.extend(self.countdown.tick());
        events
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            active_alarms: self.alarms.iter().filter(|a| a.active).count(),
            total_alarms: self.alarms.len(),
            countdown_state: self.countdown.state(),
            countdown_remaining: self.countdown.format_remaining(),
            stopwatch: self.stopwatch.format(),
            stopwatch_running: self.stopwatch.running(),
        }
    }

    pub fn into_alarms(self) -> AlarmBook {
        self.alarms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{AlarmDraft, DaySet};
    use chrono::NaiveDate;

    fn wall(h: u32, m: u32, s: u32) -> WallTime {
        // Monday
        WallTime::new(
            NaiveDate::from_ymd_opt(2024, 1, 8)
                .unwrap()
                .and_hms_opt(h, m, s)
                .unwrap(),
        )
    }

    #[test]
    fn tick_runs_both_evaluators() {
        let mut book = AlarmBook::new();
        book.add(AlarmDraft {
            time: "07:00".parse().unwrap(),
            label: "Wake".into(),
            days: DaySet::WEEKDAYS,
            repeat: true,
        });
        let mut panel = ToolsPanel::new(book, Countdown::new(1));
        panel.countdown_mut().start().unwrap();

        let events = panel.tick(&wall(7, 0, 0));
        assert_eq!(events.len(), 2);
        assert!(events[0].is_alarm());
        assert!(events[1].is_countdown_completed());

        assert!(panel.tick(&wall(7, 0, 1)).is_empty());
    }

    #[test]
    fn edits_between_ticks_are_seen() {
        let mut panel = ToolsPanel::new(AlarmBook::new(), Countdown::default());
        assert!(panel.tick(&wall(9, 30, 0)).is_empty());

        let id = panel.alarms_mut().add(AlarmDraft {
            time: "09:30".parse().unwrap(),
            ..AlarmDraft::default()
        });
        let events = panel.tick(&wall(9, 30, 10));
        assert_eq!(events.len(), 1);
        assert_eq!(panel.alarms().get(id).map(|a| a.active), Some(false));

        let snap = panel.snapshot();
        assert_eq!(snap.total_alarms, 1);
        assert_eq!(snap.active_alarms, 0);
    }

    #[test]
    fn replaced_alarms_keep_their_fired_minute() {
        let mut book = AlarmBook::new();
        book.add(AlarmDraft {
            time: "08:15".parse().unwrap(),
            days: DaySet::EVERY_DAY,
            repeat: true,
            ..AlarmDraft::default()
        });
        let reloaded = book.clone();
        let mut panel = ToolsPanel::new(book, Countdown::default());
        assert_eq!(panel.tick(&wall(8, 15, 0)).len(), 1);

        panel.replace_alarms(reloaded);
        assert!(panel.tick(&wall(8, 15, 30)).is_empty());

        let mut fresh = AlarmBook::new();
        fresh.add(AlarmDraft {
            time: "08:15".parse().unwrap(),
            ..AlarmDraft::default()
        });
        panel.replace_alarms(fresh);
        assert_eq!(panel.tick(&wall(8, 15, 45)).len(), 1, "new id fires");
    }
}
