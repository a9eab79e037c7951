//! Config round-trips through disk, including alarms, reminders and events.

use chrono::NaiveDate;
use orbit_core::{AlarmDraft, Config, DaySet, EventDraft, Priority, ReminderDraft, TimeOfDay};

#[test]
fn alarms_survive_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut cfg = Config::load_from(&path).unwrap();
    let id = cfg.alarms.add(AlarmDraft {
        time: TimeOfDay::new(6, 15).unwrap(),
        label: "Run".into(),
        days: DaySet::WEEKENDS,
        repeat: true,
    });
    cfg.alarms.toggle(id).unwrap();
    cfg.set("clock.tick_interval_ms", "250").unwrap();
    cfg.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.alarms, cfg.alarms);
    assert_eq!(loaded.clock.tick_interval_ms, 250);
    let run = loaded.alarms.get(id).unwrap();
    assert_eq!(run.time.to_string(), "06:15");
    assert_eq!(run.days.summary(), "Weekends");
    assert!(!run.active);
}

#[test]
fn hand_written_alarm_tables_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[countdown]
default_duration_secs = 600

[[alarms]]
id = "6f1c2f0e-5a61-4d55-9a43-0d9a3a0f1b11"
time = "7:05"
label = "  "
days = [1, 3, 5]
"#,
    )
    .unwrap();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.countdown.default_duration_secs, 600);
    assert_eq!(cfg.alarms.len(), 1);
    let alarm = cfg.alarms.iter().next().unwrap();
    assert_eq!(alarm.time.to_string(), "07:05");
    assert_eq!(alarm.label(), "Alarm");
    assert!(alarm.active);
    assert!(!alarm.repeat);
    assert_eq!(alarm.days.summary(), "Mon, Wed, Fri");
}

#[test]
fn out_of_range_alarm_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[[alarms]]\nid = \"6f1c2f0e-5a61-4d55-9a43-0d9a3a0f1b11\"\ntime = \"07:00\"\nlabel = \"x\"\ndays = [7]\n",
    )
    .unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn reminders_and_events_survive_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();

    let mut cfg = Config::load_from(&path).unwrap();
    let done = cfg.reminders.add(ReminderDraft::new("Call the client"), today).unwrap();
    cfg.reminders.toggle(done).unwrap();
    cfg.reminders
        .add(
            ReminderDraft {
                priority: Priority::High,
                due_date: Some(today),
                category: Some("Work".into()),
                ..ReminderDraft::new("Review Q1 budget")
            },
            today,
        )
        .unwrap();
    cfg.events
        .add(EventDraft {
            time: Some(TimeOfDay::new(14, 0).unwrap()),
            description: Some("Project review".into()),
            ..EventDraft::new("Client Meeting", today)
        })
        .unwrap();
    cfg.events.add(EventDraft::new("Holiday", today)).unwrap();
    cfg.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.reminders, cfg.reminders);
    assert_eq!(loaded.events, cfg.events);
    assert_eq!(loaded.reminders.stats().high_priority, 1);
    assert_eq!(loaded.events.on(today)[0].title(), "Holiday");
}

#[test]
fn hand_written_reminder_and_event_tables_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[[reminders]]
id = "0b7d8c1e-2f3a-4b5c-8d9e-0f1a2b3c4d5e"
text = "Schedule dentist appointment"
created = "2024-01-08"
due_date = "2024-01-11"
category = "Health"

[[events]]
id = "1c8e9d2f-3a4b-4c6d-9eaf-1a2b3c4d5e6f"
title = "Gym Session"
date = "2024-01-16"
time = "7:00"
priority = "low"
"#,
    )
    .unwrap();

    let cfg = Config::load_from(&path).unwrap();
    let reminder = cfg.reminders.iter().next().unwrap();
    assert_eq!(reminder.priority, Priority::Medium);
    assert!(!reminder.completed);
    assert_eq!(reminder.category.as_deref(), Some("Health"));
    let event = cfg.events.iter().next().unwrap();
    assert_eq!(event.time.map(|t| t.to_string()).as_deref(), Some("07:00"));
    assert_eq!(event.priority, Priority::Low);
    assert_eq!(cfg.alarms.len(), 2, "absent alarm table keeps the seeds");
}

#[test]
fn blank_reminder_text_on_disk_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[[reminders]]\nid = \"0b7d8c1e-2f3a-4b5c-8d9e-0f1a2b3c4d5e\"\ntext = \" \"\ncreated = \"2024-01-08\"\n",
    )
    .unwrap();
    assert!(Config::load_from(&path).is_err());
}
