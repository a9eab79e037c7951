pub mod alarm;
pub mod calendar;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod reminder;
pub mod stopwatch;
pub mod watch;

/// Runtime for the long-running commands. The tick task and Ctrl-C handling
/// share one thread.
pub(crate) fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Print an event as one JSON line on stdout.
pub(crate) fn emit(event: &orbit_core::Event) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
