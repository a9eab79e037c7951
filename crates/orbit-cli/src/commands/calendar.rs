use chrono::{Datelike, Local, NaiveDate};
use clap::Subcommand;
use orbit_core::{month_grid, CalendarEvent, Config, EventDraft, Priority, TimeOfDay};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// List events, or only those on one day
    List {
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an event
    Add {
        title: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// HH:MM; omit for an all-day event
        #[arg(long)]
        time: Option<TimeOfDay>,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit an event; unspecified fields are kept
    Edit {
        /// Event ID or unique prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, conflicts_with = "all_day")]
        time: Option<TimeOfDay>,
        /// Drop the time
        #[arg(long)]
        all_day: bool,
        #[arg(long)]
        priority: Option<Priority>,
        /// Empty text clears the description
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove an event
    Remove {
        /// Event ID or unique prefix
        id: String,
    },
    /// Print a month grid; days with events are starred
    Month {
        /// YYYY-MM, defaults to the current month
        month: Option<String>,
    },
}

fn parse_month(text: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("invalid month '{text}': expected YYYY-MM");
    let (year, month) = text.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse().map_err(|_| invalid())?;
    let month = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn describe(event: &CalendarEvent) -> String {
    let when = match event.time {
        Some(time) => time.to_string(),
        None => "all-day".to_string(),
    };
    let mut line = format!(
        "{}  {}  {:<7}  {:<6}  {}",
        &event.id().to_string()[..8],
        event.date,
        when,
        event.priority,
        event.title(),
    );
    if let Some(description) = &event.description {
        line.push_str(&format!("  - {description}"));
    }
    line
}

fn print_month(config: &Config, year: i32, month: u32) -> Result<(), Box<dyn std::error::Error>> {
    let grid = month_grid(year, month).ok_or("invalid month")?;
    let today = Local::now().date_naive();
    let title = grid
        .iter()
        .find(|day| day.in_month)
        .map(|day| day.date.format("%B %Y").to_string())
        .unwrap_or_default();
    println!("{title:^28}");
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in grid.chunks(7) {
        let row: String = week
            .iter()
            .map(|day| {
                if !day.in_month {
                    return "    ".to_string();
                }
                let mark = if config.events.has_events(day.date) {
                    '*'
                } else if day.date == today {
                    '.'
                } else {
                    ' '
                };
                format!("{:>3}{mark}", day.date.day())
            })
            .collect();
        println!("{}", row.trim_end());
    }
    Ok(())
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    match action {
        CalendarAction::List { date, json } => {
            let events: Vec<&CalendarEvent> = match date {
                Some(date) => config.events.on(date),
                None => config.events.iter().collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else if events.is_empty() {
                println!("No events.");
            } else {
                for event in events {
                    println!("{}", describe(event));
                }
            }
        }
        CalendarAction::Add {
            title,
            date,
            time,
            priority,
            description,
        } => {
            let id = config.events.add(EventDraft {
                time,
                priority,
                description,
                ..EventDraft::new(title, date)
            })?;
            config.save()?;
            println!("Event created: {id}");
        }
        CalendarAction::Edit {
            id,
            title,
            date,
            time,
            all_day,
            priority,
            description,
        } => {
            let id = config.events.resolve(&id)?;
            let current = config.events.get(id).ok_or("event disappeared")?;
            let mut draft = EventDraft::from(current);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(date) = date {
                draft.date = date;
            }
            if time.is_some() || all_day {
                draft.time = time;
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            if description.is_some() {
                draft.description = description;
            }
            let event = config.events.update(id, draft)?;
            println!("Event updated: {}", describe(event));
            config.save()?;
        }
        CalendarAction::Remove { id } => {
            let id = config.events.resolve(&id)?;
            let event = config.events.remove(id)?;
            config.save()?;
            println!("Event removed: {} {}", event.date, event.title());
        }
        CalendarAction::Month { month } => {
            let (year, month) = match month {
                Some(text) => parse_month(&text)?,
                None => {
                    let today = Local::now().date_naive();
                    (today.year(), today.month())
                }
            };
            print_month(&config, year, month)?;
        }
    }
    Ok(())
}
