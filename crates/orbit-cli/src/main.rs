use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "orbit-cli", version, about = "Orbit tools panel CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Alarm management
    Alarm {
        #[command(subcommand)]
        action: commands::alarm::AlarmAction,
    },
    /// Reminder list
    Reminder {
        #[command(subcommand)]
        action: commands::reminder::ReminderAction,
    },
    /// Calendar events
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Run the alarm loop until Ctrl-C
    Watch(commands::watch::WatchArgs),
    /// Run a countdown timer
    Countdown(commands::countdown::CountdownArgs),
    /// Run a stopwatch until Ctrl-C
    Stopwatch(commands::stopwatch::StopwatchArgs),
    /// World clock readings
    Clock(commands::clock::ClockArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ORBIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Alarm { action } => commands::alarm::run(action),
        Commands::Reminder { action } => commands::reminder::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Countdown(args) => commands::countdown::run(args),
        Commands::Stopwatch(args) => commands::stopwatch::run(args),
        Commands::Clock(args) => commands::clock::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
