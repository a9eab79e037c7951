//! Calendar events and the month grid they are laid out on.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::alarm::TimeOfDay;
use crate::error::ValidationError;
use crate::ids::resolve_prefix;
use crate::reminders::{optional_text, required_text, Priority};

/// Cells in a month view: six Sunday-first weeks.
pub const GRID_CELLS: usize = 42;

fn deserialize_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    required_text(&raw, "event title").map_err(de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    id: Uuid,
    #[serde(deserialize_with = "deserialize_title")]
    title: String,
    pub date: NaiveDate,
    /// All-day when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeOfDay>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<TimeOfDay>,
    pub priority: Priority,
    pub description: Option<String>,
}

impl EventDraft {
    /// All-day, medium priority.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
            time: None,
            priority: Priority::Medium,
            description: None,
        }
    }
}

impl From<&CalendarEvent> for EventDraft {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date,
            time: event.time,
            priority: event.priority,
            description: event.description.clone(),
        }
    }
}

/// One day cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    /// False for the leading and trailing days of neighbouring months.
    pub in_month: bool,
}

/// The 42 days shown for `year`-`month`, starting on the Sunday on or before
/// the 1st. `None` for an invalid month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<GridDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let start = first - Duration::days(lead);
    Some(
        start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| GridDay {
                date,
                in_month: date.year() == year && date.month() == month,
            })
            .collect(),
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Calendar {
    events: Vec<CalendarEvent>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarEvent> {
        self.events.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events on `date`: all-day ones first, then by time, ties in
    /// insertion order.
    pub fn on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let mut events: Vec<_> = self.events.iter().filter(|e| e.date == date).collect();
        events.sort_by_key(|e| e.time);
        events
    }

    pub fn has_events(&self, date: NaiveDate) -> bool {
        self.events.iter().any(|e| e.date == date)
    }

    /// Append an event. Returns its id.
    pub fn add(&mut self, draft: EventDraft) -> Result<Uuid, ValidationError> {
        let event = CalendarEvent {
            id: Uuid::new_v4(),
            title: required_text(&draft.title, "event title")?,
            date: draft.date,
            time: draft.time,
            priority: draft.priority,
            description: optional_text(draft.description),
        };
        let id = event.id;
        debug!(event_id = %id, date = %event.date, "calendar event added");
        self.events.push(event);
        Ok(id)
    }

    pub fn update(&mut self, id: Uuid, draft: EventDraft) -> Result<&CalendarEvent, ValidationError> {
        let title = required_text(&draft.title, "event title")?;
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ValidationError::UnknownEvent(id.to_string()))?;
        event.title = title;
        event.date = draft.date;
        event.time = draft.time;
        event.priority = draft.priority;
        event.description = optional_text(draft.description);
        Ok(&*event)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<CalendarEvent, ValidationError> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ValidationError::UnknownEvent(id.to_string()))?;
        Ok(self.events.remove(index))
    }

    pub fn resolve(&self, id_or_prefix: &str) -> Result<Uuid, ValidationError> {
        resolve_prefix(self.events.iter().map(CalendarEvent::id), id_or_prefix)
            .ok_or_else(|| ValidationError::UnknownEvent(id_or_prefix.to_string()))
    }
}
