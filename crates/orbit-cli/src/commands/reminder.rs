use chrono::{Local, NaiveDate};
use clap::Subcommand;
use orbit_core::{Config, Priority, Reminder, ReminderDraft};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// List reminders, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a reminder
    Add {
        text: String,
        /// low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Edit a reminder; unspecified fields are kept
    Edit {
        /// Reminder ID or unique prefix
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        /// Due date, YYYY-MM-DD
        #[arg(long, conflicts_with = "no_due")]
        due: Option<NaiveDate>,
        /// Clear the due date
        #[arg(long)]
        no_due: bool,
        /// Empty text clears the category
        #[arg(long)]
        category: Option<String>,
    },
    /// Mark a reminder done, or open again
    Toggle {
        /// Reminder ID or unique prefix
        id: String,
    },
    /// Remove a reminder
    Remove {
        /// Reminder ID or unique prefix
        id: String,
    },
}

fn describe(reminder: &Reminder, today: NaiveDate) -> String {
    let mut line = format!(
        "{}  [{}]  {:<6}  {}",
        &reminder.id().to_string()[..8],
        if reminder.completed { "x" } else { " " },
        reminder.priority,
        reminder.text(),
    );
    if let Some(category) = &reminder.category {
        line.push_str(&format!("  #{category}"));
    }
    if let Some(status) = reminder.due_status(today) {
        line.push_str(&format!("  ({status})"));
    }
    line
}

pub fn run(action: ReminderAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    let today = Local::now().date_naive();
    match action {
        ReminderAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config.reminders)?);
            } else if config.reminders.is_empty() {
                println!("No reminders.");
            } else {
                let stats = config.reminders.stats();
                println!(
                    "{} total, {} active, {} completed, {} high priority",
                    stats.total, stats.active, stats.completed, stats.high_priority
                );
                for reminder in config.reminders.iter() {
                    println!("{}", describe(reminder, today));
                }
            }
        }
        ReminderAction::Add {
            text,
            priority,
            due,
            category,
        } => {
            let draft = ReminderDraft {
                priority,
                due_date: due,
                category,
                ..ReminderDraft::new(text)
            };
            let id = config.reminders.add(draft, today)?;
            config.save()?;
            println!("Reminder created: {id}");
        }
        ReminderAction::Edit {
            id,
            text,
            priority,
            due,
            no_due,
            category,
        } => {
            let id = config.reminders.resolve(&id)?;
            let current = config.reminders.get(id).ok_or("reminder disappeared")?;
            let mut draft = ReminderDraft::from(current);
            if let Some(text) = text {
                draft.text = text;
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            if due.is_some() || no_due {
                draft.due_date = due;
            }
            if category.is_some() {
                draft.category = category;
            }
            let reminder = config.reminders.update(id, draft)?;
            println!("Reminder updated: {}", describe(reminder, today));
            config.save()?;
        }
        ReminderAction::Toggle { id } => {
            let id = config.reminders.resolve(&id)?;
            let completed = config.reminders.toggle(id)?;
            config.save()?;
            println!("Reminder {id} {}", if completed { "completed" } else { "reopened" });
        }
        ReminderAction::Remove { id } => {
            let id = config.reminders.resolve(&id)?;
            let reminder = config.reminders.remove(id)?;
            config.save()?;
            println!("Reminder removed: {}", reminder.text());
        }
    }
    Ok(())
}
