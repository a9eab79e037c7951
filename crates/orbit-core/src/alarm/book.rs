//! The owned alarm collection and the user-facing edits on it.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::entry::{Alarm, DaySet, TimeOfDay};
use crate::error::ValidationError;
use crate::ids::resolve_prefix;

/// Field values for creating or editing an alarm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmDraft {
    pub time: TimeOfDay,
    pub label: String,
    pub days: DaySet,
    pub repeat: bool,
}

impl AlarmDraft {
    /// The form defaults: 08:00, no label, one-time.
    pub fn new() -> Self {
        Self {
            time: TimeOfDay::hm(8, 0),
            label: String::new(),
            days: DaySet::empty(),
            repeat: false,
        }
    }
}

impl Default for AlarmDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Alarm> for AlarmDraft {
    fn from(alarm: &Alarm) -> Self {
        Self {
            time: alarm.time,
            label: alarm.label().to_string(),
            days: alarm.days,
            repeat: alarm.repeat,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmBook {
    alarms: Vec<Alarm>,
}

impl AlarmBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_alarms(alarms: Vec<Alarm>) -> Self {
        Self { alarms }
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alarm> {
        self.alarms.iter()
    }

    pub fn as_slice(&self) -> &[Alarm] {
        &self.alarms
    }

    /// Mutable view handed to the evaluator for one tick.
    pub fn as_mut_slice(&mut self) -> &mut [Alarm] {
        &mut self.alarms
    }

    pub fn get(&self, id: Uuid) -> Option<&Alarm> {
        self.alarms.iter().find(|a| a.id() == id)
    }

    /// Add a new active alarm built from `draft`. Returns its id.
    pub fn add(&mut self, draft: AlarmDraft) -> Uuid {
        let alarm = Alarm::new(draft.time, &draft.label, draft.days, draft.repeat);
        let id = alarm.id();
        debug!(alarm_id = %id, time = %alarm.time, "alarm added");
        self.alarms.push(alarm);
        id
    }

    /// Replace the editable fields of an alarm, keeping its id and active flag.
    pub fn update(&mut self, id: Uuid, draft: AlarmDraft) -> Result<&Alarm, ValidationError> {
        let alarm = self.get_mut(id)?;
        alarm.time = draft.time;
        alarm.set_label(&draft.label);
        alarm.days = draft.days;
        alarm.repeat = draft.repeat;
        debug!(alarm_id = %id, time = %alarm.time, "alarm updated");
        Ok(&*alarm)
    }

    /// Flip the active flag. Returns the new value.
    pub fn toggle(&mut self, id: Uuid) -> Result<bool, ValidationError> {
        let alarm = self.get_mut(id)?;
        alarm.active = !alarm.active;
        Ok(alarm.active)
    }

    pub fn set_active(&mut self, id: Uuid, active: bool) -> Result<(), ValidationError> {
        self.get_mut(id)?.active = active;
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Alarm, ValidationError> {
        let index = self
            .alarms
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| ValidationError::UnknownAlarm(id.to_string()))?;
        Ok(self.alarms.remove(index))
    }

    /// Resolve a full id or a unique prefix of one.
    pub fn resolve(&self, id_or_prefix: &str) -> Result<Uuid, ValidationError> {
        resolve_prefix(self.alarms.iter().map(Alarm::id), id_or_prefix)
            .ok_or_else(|| ValidationError::UnknownAlarm(id_or_prefix.to_string()))
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Alarm, ValidationError> {
        self.alarms
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or_else(|| ValidationError::UnknownAlarm(id.to_string()))
    }
}
