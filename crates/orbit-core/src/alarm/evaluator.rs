//! Alarm evaluation.
//!
//! A match is `active && hour == now.hour && minute == now.minute && (days is
//! empty || now.weekday in days)`. The predicate stays true for the whole
//! minute, so the evaluator remembers the minute each entry last fired in and
//! suppresses repeats. It remembers ids only, never the alarms themselves.
//!
//! Minutes are naive local wall-clock minutes. When a daylight-saving
//! fall-back replays a local hour, an alarm inside that hour fires once on
//! each pass, the same as a wall clock would ring twice.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::debug;
use uuid::Uuid;

use super::entry::Alarm;
use crate::clock::WallTime;
use crate::events::Event;

#[derive(Debug, Default, Clone)]
pub struct AlarmEvaluator {
    last_fired: HashMap<Uuid, NaiveDateTime>,
}

impl AlarmEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `alarm` matches `now`, ignoring de-duplication.
    pub fn matches(alarm: &Alarm, now: &WallTime) -> bool {
        alarm.active
            && alarm.time.hour() == now.hour()
            && alarm.time.minute() == now.minute()
            && (alarm.days.is_empty() || alarm.days.contains(now.weekday()))
    }

    /// Evaluate every alarm against `now`.
    ///
    /// One-time alarms are deactivated before their trigger event is built.
    pub fn evaluate(&mut self, now: &WallTime, alarms: &mut [Alarm]) -> Vec<Event> {
        let minute = now.minute_stamp();
        self.last_fired.retain(|id, fired| {
            *fired == minute && alarms.iter().any(|a| a.id() == *id)
        });

        let mut events = Vec::new();
        for alarm in alarms.iter_mut() {
            if !Self::matches(alarm, now) {
                continue;
            }
            if self.last_fired.get(&alarm.id()) == Some(&minute) {
                continue;
            }
            self.last_fired.insert(alarm.id(), minute);

            if alarm.is_one_time() {
                alarm.active = false;
            }
            debug!(
                alarm_id = %alarm.id(),
                label = %alarm.label(),
                time = %alarm.time,
                one_time = alarm.is_one_time(),
                "alarm triggered"
            );
            events.push(Event::AlarmTriggered {
                alarm: alarm.clone(),
                at: now.naive(),
            });
        }
        events
    }

    /// Drop the fired-minute record for `id`, e.g. after the alarm is edited.
    pub fn forget(&mut self, id: Uuid) {
        self.last_fired.remove(&id);
    }
}
