use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Args;
use orbit_core::{Config, Stopwatch, Ticker};
use tokio::sync::mpsc;

#[derive(Args)]
pub struct StopwatchArgs {
    /// Display refresh interval in milliseconds.
    /// Defaults to `clock.tick_interval_ms`.
    #[arg(long)]
    pub refresh_ms: Option<u64>,
}

pub fn run(args: StopwatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let refresh = match args.refresh_ms {
        Some(ms) => Duration::from_millis(ms),
        None => Config::load()?.tick_interval(),
    };

    let mut stopwatch = Stopwatch::new();
    if let Some(event) = stopwatch.start() {
        super::emit(&event)?;
    }
    let stopwatch = Arc::new(Mutex::new(stopwatch));

    let rt = super::runtime()?;
    rt.block_on(async {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shared = Arc::clone(&stopwatch);
        let mut ticker = Ticker::start(refresh, move || {
            let sw = shared.lock().unwrap_or_else(|e| e.into_inner());
            let _ = tx.send(sw.format());
        })?;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                shown = rx.recv() => {
                    let Some(shown) = shown else { break };
                    eprint!("\r{shown} ");
                    std::io::stderr().flush()?;
                }
                _ = &mut ctrl_c => break,
            }
        }
        ticker.stop();

        let mut sw = stopwatch.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(event) = sw.pause() {
            eprintln!("\r{} ", sw.format());
            super::emit(&event)?;
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
