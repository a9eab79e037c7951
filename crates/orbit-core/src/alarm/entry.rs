//! Alarm records: time of day, weekday set, and the alarm itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const DEFAULT_LABEL: &str = "Alarm";

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A validated hour/minute pair, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ValidationError::MinuteOutOfRange(minute));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// For literal times known to be in range.
    pub(crate) const fn hm(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTimeFormat(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| {
            (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(h) || !digits(m) {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Set of weekday indices, 0 = Sunday .. 6 = Saturday.
///
/// Stored as a 7-bit mask so duplicates cannot exist; serialized as a
/// sorted list of indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DaySet(u8);

impl DaySet {
    pub const EVERY_DAY: DaySet = DaySet(0b111_1111);
    pub const WEEKDAYS: DaySet = DaySet(0b011_1110);
    pub const WEEKENDS: DaySet = DaySet(0b100_0001);

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn from_days<I: IntoIterator<Item = u8>>(days: I) -> Result<Self, ValidationError> {
        let mut set = Self::empty();
        for day in days {
            set.insert(day)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, day: u8) -> Result<(), ValidationError> {
        if day > 6 {
            return Err(ValidationError::WeekdayOutOfRange(day));
        }
        self.0 |= 1 << day;
        Ok(())
    }

    pub fn contains(&self, day: u8) -> bool {
        day <= 6 && self.0 & (1 << day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..7u8).filter(move |d| self.contains(*d))
    }

    /// Human summary, e.g. "Weekdays" or "Mon, Wed".
    pub fn summary(&self) -> String {
        match *self {
            s if s.is_empty() => "One time".to_string(),
            Self::EVERY_DAY => "Every day".to_string(),
            Self::WEEKDAYS => "Weekdays".to_string(),
            Self::WEEKENDS => "Weekends".to_string(),
            s => s
                .iter()
                .map(|d| DAY_NAMES[d as usize])
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl TryFrom<Vec<u8>> for DaySet {
    type Error = ValidationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_days(value)
    }
}

impl From<DaySet> for Vec<u8> {
    fn from(value: DaySet) -> Self {
        value.iter().collect()
    }
}

/// One configured alarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    id: Uuid,
    pub time: TimeOfDay,
    #[serde(default = "default_label", deserialize_with = "deserialize_label")]
    label: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub days: DaySet,
    /// Informational; whether an alarm survives firing depends on `days`.
    #[serde(default)]
    pub repeat: bool,
}

fn default_true() -> bool {
    true
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

pub(crate) fn normalize_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_label(&raw))
}

impl Alarm {
    /// Create an active alarm with a fresh id.
    pub fn new(time: TimeOfDay, label: &str, days: DaySet, repeat: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            time,
            label: normalize_label(label),
            active: true,
            days,
            repeat,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Never empty; blank input becomes [`DEFAULT_LABEL`].
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = normalize_label(label);
    }

    pub fn is_one_time(&self) -> bool {
        self.days.is_empty()
    }

    /// The seed alarms of a fresh configuration.
    pub fn seed() -> Vec<Alarm> {
        let mut deep_work = Alarm::new(
            TimeOfDay::hm(23, 0),
            "Deep Work",
            DaySet::empty(),
            false,
        );
        deep_work.active = false;
        vec![
            Alarm::new(
                TimeOfDay::hm(7, 0),
                "Morning Brief",
                DaySet::WEEKDAYS,
                true,
            ),
            deep_work,
        ]
    }
}
