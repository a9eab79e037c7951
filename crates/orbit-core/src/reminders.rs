//! Reminders: a to-do list with priority, an optional due date and an
//! optional category.
//!
//! New reminders go to the front of the list. Filtering and sorting are left
//! to the presentation layer.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::ids::resolve_prefix;

/// Shared by reminders and calendar events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidPriority(s.to_string()))
    }
}

/// Trim `text`, refusing blank input.
pub(crate) fn required_text(text: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText(field));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text is stored as `None`.
pub(crate) fn optional_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    required_text(&raw, "reminder text").map_err(de::Error::custom)
}

/// Where a due date stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Today,
    Tomorrow,
    Upcoming(NaiveDate),
}

impl DueStatus {
    pub fn of(due: NaiveDate, today: NaiveDate) -> Self {
        if due < today {
            DueStatus::Overdue
        } else if due == today {
            DueStatus::Today
        } else if due == today + Duration::days(1) {
            DueStatus::Tomorrow
        } else {
            DueStatus::Upcoming(due)
        }
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueStatus::Overdue => f.write_str("Overdue"),
            DueStatus::Today => f.write_str("Due today"),
            DueStatus::Tomorrow => f.write_str("Due tomorrow"),
            DueStatus::Upcoming(date) => write!(f, "Due {}", date.format("%b %-d")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    id: Uuid,
    #[serde(deserialize_with = "deserialize_text")]
    text: String,
    #[serde(default)]
    pub completed: bool,
    /// Day the reminder was written down.
    pub created: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Reminder {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn due_status(&self, today: NaiveDate) -> Option<DueStatus> {
        self.due_date.map(|due| DueStatus::of(due, today))
    }
}

/// Field values for creating or editing a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub text: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category: Option<String>,
}

impl ReminderDraft {
    /// Medium priority, no due date, no category.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: Priority::Medium,
            due_date: None,
            category: None,
        }
    }
}

impl From<&Reminder> for ReminderDraft {
    fn from(reminder: &Reminder) -> Self {
        Self {
            text: reminder.text.clone(),
            priority: reminder.priority,
            due_date: reminder.due_date,
            category: reminder.category.clone(),
        }
    }
}

/// Counts shown in the list header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReminderStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    /// Open reminders with high priority.
    pub high_priority: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderList {
    reminders: Vec<Reminder>,
}

impl ReminderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }

    /// Add an open reminder at the front of the list. Returns its id.
    pub fn add(&mut self, draft: ReminderDraft, today: NaiveDate) -> Result<Uuid, ValidationError> {
        let reminder = Reminder {
            id: Uuid::new_v4(),
            text: required_text(&draft.text, "reminder text")?,
            completed: false,
            created: today,
            due_date: draft.due_date,
            priority: draft.priority,
            category: optional_text(draft.category),
        };
        let id = reminder.id;
        debug!(reminder_id = %id, priority = %reminder.priority, "reminder added");
        self.reminders.insert(0, reminder);
        Ok(id)
    }

    /// Replace the editable fields, keeping id, creation day and completion.
    pub fn update(&mut self, id: Uuid, draft: ReminderDraft) -> Result<&Reminder, ValidationError> {
        let text = required_text(&draft.text, "reminder text")?;
        let reminder = self.get_mut(id)?;
        reminder.text = text;
        reminder.priority = draft.priority;
        reminder.due_date = draft.due_date;
        reminder.category = optional_text(draft.category);
        Ok(&*reminder)
    }

    /// Flip the completed flag. Returns the new value.
    pub fn toggle(&mut self, id: Uuid) -> Result<bool, ValidationError> {
        let reminder = self.get_mut(id)?;
        reminder.completed = !reminder.completed;
        Ok(reminder.completed)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Reminder, ValidationError> {
        let index = self
            .reminders
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ValidationError::UnknownReminder(id.to_string()))?;
        Ok(self.reminders.remove(index))
    }

    pub fn resolve(&self, id_or_prefix: &str) -> Result<Uuid, ValidationError> {
        resolve_prefix(self.reminders.iter().map(Reminder::id), id_or_prefix)
            .ok_or_else(|| ValidationError::UnknownReminder(id_or_prefix.to_string()))
    }

    pub fn stats(&self) -> ReminderStats {
        let completed = self.reminders.iter().filter(|r| r.completed).count();
        ReminderStats {
            total: self.reminders.len(),
            active: self.reminders.len() - completed,
            completed,
            high_priority: self
                .reminders
                .iter()
                .filter(|r| !r.completed && r.priority == Priority::High)
                .count(),
        }
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Reminder, ValidationError> {
        self.reminders
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ValidationError::UnknownReminder(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn add_puts_newest_first_and_trims() {
        let mut list = ReminderList::new();
        let first = list.add(ReminderDraft::new("Call the client"), day(1, 8)).unwrap();
        let second = list
            .add(
                ReminderDraft {
                    category: Some("  ".into()),
                    ..ReminderDraft::new("  Review budget ")
                },
                day(1, 9),
            )
            .unwrap();

        let ids: Vec<_> = list.iter().map(Reminder::id).collect();
        assert_eq!(ids, vec![second, first]);
        let newest = list.get(second).unwrap();
        assert_eq!(newest.text(), "Review budget");
        assert_eq!(newest.category, None);
        assert_eq!(newest.priority, Priority::Medium);
        assert_eq!(newest.created, day(1, 9));
    }

    #[test]
    fn blank_text_is_refused() {
        let mut list = ReminderList::new();
        assert_eq!(
            list.add(ReminderDraft::new("   "), day(1, 8)),
            Err(ValidationError::EmptyText("reminder text"))
        );
        assert!(list.is_empty());

        let id = list.add(ReminderDraft::new("Stretch"), day(1, 8)).unwrap();
        assert!(list.update(id, ReminderDraft::new("")).is_err());
        assert_eq!(list.get(id).unwrap().text(), "Stretch");
    }

    #[test]
    fn update_keeps_completion_and_creation_day() {
        let mut list = ReminderList::new();
        let id = list.add(ReminderDraft::new("Dentist"), day(1, 8)).unwrap();
        assert_eq!(list.toggle(id), Ok(true));

        let draft = ReminderDraft {
            priority: Priority::Low,
            due_date: Some(day(1, 11)),
            category: Some("Health".into()),
            ..ReminderDraft::new("Schedule dentist appointment")
        };
        let updated = list.update(id, draft).unwrap();
        assert!(updated.completed);
        assert_eq!(updated.created, day(1, 8));
        assert_eq!(updated.category.as_deref(), Some("Health"));
    }

    #[test]
    fn toggle_remove_and_stats() {
        let mut list = ReminderList::new();
        let high = list
            .add(
                ReminderDraft {
                    priority: Priority::High,
                    ..ReminderDraft::new("Ship")
                },
                day(1, 8),
            )
            .unwrap();
        let done = list.add(ReminderDraft::new("Update deps"), day(1, 8)).unwrap();
        list.toggle(done).unwrap();

        assert_eq!(
            list.stats(),
            ReminderStats {
                total: 2,
                active: 1,
                completed: 1,
                high_priority: 1
            }
        );

        list.remove(high).unwrap();
        assert_eq!(list.stats().high_priority, 0);
        assert_eq!(
            list.remove(high).unwrap_err(),
            ValidationError::UnknownReminder(high.to_string())
        );
    }

    #[test]
    fn due_status_text() {
        let today = day(3, 10);
        assert_eq!(DueStatus::of(day(3, 9), today).to_string(), "Overdue");
        assert_eq!(DueStatus::of(day(3, 10), today).to_string(), "Due today");
        assert_eq!(DueStatus::of(day(3, 11), today).to_string(), "Due tomorrow");
        assert_eq!(DueStatus::of(day(4, 2), today).to_string(), "Due Apr 2");
    }

    #[test]
    fn priority_parses_and_serializes_lowercase() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"low\"");
        assert_eq!(format!("[{:<6}]", Priority::High), "[high  ]");
    }

    #[test]
    fn deserialize_rejects_blank_text() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "text": " ",
            "created": "2024-01-08",
        });
        assert!(serde_json::from_value::<Reminder>(json).is_err());
    }
}
