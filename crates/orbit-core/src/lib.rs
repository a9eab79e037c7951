//! # Orbit Core Library
//!
//! Core logic for the Orbit dashboard's tools panel: alarms, a countdown
//! timer, a stopwatch, world clocks and weather types. Everything is usable
//! from the standalone `orbit-cli` binary.
//!
//! ## Architecture
//!
//! - **Alarms**: an [`AlarmBook`] of configured alarms and an [`AlarmEvaluator`]
//!   that fires each alarm at most once per matching minute
//! - **Timers**: [`Countdown`] and [`Stopwatch`] state machines. The caller
//!   drives the countdown by invoking `tick()` once per second
//! - **Scheduler**: a [`Ticker`] that owns the periodic tick task
//! - **Reminders and calendar**: a prioritised to-do list and dated events
//! - **Storage**: TOML-based configuration, including alarms, reminders and
//!   events
//!
//! ## Key Components
//!
//! - [`ToolsPanel`]: alarms, countdown and stopwatch ticked together
//! - [`ClockSource`]: injectable wall clock
//! - [`Config`]: Application configuration management
//! - [`WeatherProvider`]: Trait for weather sources

pub mod alarm;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod events;
mod ids;
pub mod panel;
pub mod reminders;
pub mod scheduler;
pub mod storage;
pub mod timer;
pub mod weather;
pub mod world_clock;

pub use alarm::{Alarm, AlarmBook, AlarmDraft, AlarmEvaluator, DaySet, TimeOfDay};
pub use calendar::{month_grid, Calendar, CalendarEvent, EventDraft, GridDay};
pub use clock::{ClockSource, ManualClock, SystemClock, WallTime};
pub use error::{ConfigError, CoreError, ValidationError, WeatherError};
pub use events::Event;
pub use panel::{PanelSnapshot, ToolsPanel};
pub use reminders::{DueStatus, Priority, Reminder, ReminderDraft, ReminderList, ReminderStats};
pub use scheduler::{drive_panel, reload_alarms, Ticker};
pub use storage::{Config, ConfigWatcher};
pub use timer::{Countdown, CountdownState, Stopwatch};
pub use weather::{WeatherCondition, WeatherProvider, WeatherSnapshot};
pub use world_clock::{ClockReading, WorldClock, WorldClockCity};
