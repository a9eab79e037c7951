use clap::Subcommand;
use orbit_core::{AlarmDraft, Config, DaySet, TimeOfDay};

#[derive(Subcommand)]
pub enum AlarmAction {
    /// List configured alarms
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an alarm
    Add {
        /// Time of day, HH:MM
        time: TimeOfDay,
        /// Label shown when the alarm fires
        #[arg(long, default_value = "")]
        label: String,
        /// Days: "1,2,3" (0 = Sunday), "weekdays", "weekends" or "daily".
        /// Omit for a one-time alarm.
        #[arg(long, value_parser = parse_days)]
        days: Option<DaySet>,
        /// Mark as repeating
        #[arg(long)]
        repeat: bool,
    },
    /// Edit an alarm; unspecified fields are kept
    Edit {
        /// Alarm ID or unique prefix
        id: String,
        #[arg(long)]
        time: Option<TimeOfDay>,
        #[arg(long)]
        label: Option<String>,
        /// Same forms as `add`; "none" makes the alarm one-time
        #[arg(long, value_parser = parse_days)]
        days: Option<DaySet>,
        #[arg(long)]
        repeat: Option<bool>,
    },
    /// Enable or disable an alarm
    Toggle {
        /// Alarm ID or unique prefix
        id: String,
    },
    /// Remove an alarm
    Remove {
        /// Alarm ID or unique prefix
        id: String,
    },
}

fn parse_days(text: &str) -> Result<DaySet, String> {
    match text.trim().to_lowercase().as_str() {
        "" | "none" | "once" => Ok(DaySet::empty()),
        "daily" | "everyday" | "every-day" => Ok(DaySet::EVERY_DAY),
        "weekdays" => Ok(DaySet::WEEKDAYS),
        "weekends" => Ok(DaySet::WEEKENDS),
        list => {
            let days = list
                .split(',')
                .map(|d| d.trim().parse::<u8>().map_err(|e| format!("'{d}': {e}")))
                .collect::<Result<Vec<_>, _>>()?;
            DaySet::from_days(days).map_err(|e| e.to_string())
        }
    }
}

pub fn run(action: AlarmAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    match action {
        AlarmAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config.alarms)?);
            } else if config.alarms.is_empty() {
                println!("No alarms.");
            } else {
                for alarm in config.alarms.iter() {
                    let id = alarm.id().to_string();
                    println!(
                        "{}  {}  {:<3}  {:<20}  {}",
                        &id[..8],
                        alarm.time,
                        if alarm.active { "on" } else { "off" },
                        alarm.label(),
                        alarm.days.summary(),
                    );
                }
            }
        }
        AlarmAction::Add {
            time,
            label,
            days,
            repeat,
        } => {
            let id = config.alarms.add(AlarmDraft {
                time,
                label,
                days: days.unwrap_or_default(),
                repeat,
            });
            config.save()?;
            println!("Alarm created: {id}");
        }
        AlarmAction::Edit {
            id,
            time,
            label,
            days,
            repeat,
        } => {
            let id = config.alarms.resolve(&id)?;
            let current = config.alarms.get(id).ok_or("alarm disappeared")?;
            let mut draft = AlarmDraft::from(current);
            if let Some(time) = time {
                draft.time = time;
            }
            if let Some(label) = label {
                draft.label = label;
            }
            if let Some(days) = days {
                draft.days = days;
            }
            if let Some(repeat) = repeat {
                draft.repeat = repeat;
            }
            let alarm = config.alarms.update(id, draft)?;
            println!("Alarm updated: {} {} ({})", alarm.time, alarm.label(), alarm.days.summary());
            config.save()?;
        }
        AlarmAction::Toggle { id } => {
            let id = config.alarms.resolve(&id)?;
            let active = config.alarms.toggle(id)?;
            config.save()?;
            println!("Alarm {id} {}", if active { "enabled" } else { "disabled" });
        }
        AlarmAction::Remove { id } => {
            let id = config.alarms.resolve(&id)?;
            let alarm = config.alarms.remove(id)?;
            config.save()?;
            println!("Alarm removed: {} {}", alarm.time, alarm.label());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_keywords() {
        assert_eq!(parse_days("weekdays"), Ok(DaySet::WEEKDAYS));
        assert_eq!(parse_days("Daily"), Ok(DaySet::EVERY_DAY));
        assert_eq!(parse_days("none"), Ok(DaySet::empty()));
    }

    #[test]
    fn day_lists() {
        let days = parse_days("1, 3,5").unwrap();
        assert_eq!(days.summary(), "Mon, Wed, Fri");
        assert!(parse_days("1,9").is_err());
        assert!(parse_days("mon").is_err());
    }
}
