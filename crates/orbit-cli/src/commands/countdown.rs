use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Args;
use orbit_core::timer::parse_duration;
use orbit_core::{Config, Countdown, Ticker};
use tokio::sync::mpsc;

#[derive(Args)]
pub struct CountdownArgs {
    /// Duration: 90, 45s, 5m, 1h30m, MM:SS or HH:MM:SS.
    /// Defaults to `countdown.default_duration_secs`.
    #[arg(value_parser = parse_duration)]
    pub duration: Option<u64>,
}

pub fn run(args: CountdownArgs) -> Result<(), Box<dyn std::error::Error>> {
    let secs = match args.duration {
        Some(secs) => secs,
        None => Config::load()?.countdown.default_duration_secs,
    };

    let mut countdown = Countdown::new(secs);
    let started = countdown.start()?;
    super::emit(&started)?;
    let countdown = Arc::new(Mutex::new(countdown));

    let rt = super::runtime()?;
    rt.block_on(async {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shared = Arc::clone(&countdown);
        // The countdown counts ticks, so its period is fixed at one second.
        let mut ticker = Ticker::start(Duration::from_secs(1), move || {
            let mut cd = shared.lock().unwrap_or_else(|e| e.into_inner());
            let event = cd.tick();
            let _ = tx.send((cd.format_remaining(), event));
        })?;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                update = rx.recv() => {
                    let Some((remaining, event)) = update else { break };
                    eprint!("\r{remaining} ");
                    std::io::stderr().flush()?;
                    if let Some(event) = event {
                        eprintln!();
                        super::emit(&event)?;
                        break;
                    }
                }
                _ = &mut ctrl_c => {
                    eprintln!();
                    let mut cd = countdown.lock().unwrap_or_else(|e| e.into_inner());
                    if let Some(event) = cd.pause() {
                        super::emit(&event)?;
                    }
                    break;
                }
            }
        }

        ticker.stop();
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
