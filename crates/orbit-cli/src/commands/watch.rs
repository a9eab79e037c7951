use std::sync::{Arc, Mutex};

use clap::Args;
use orbit_core::{drive_panel, reload_alarms, ClockSource, Config, ConfigWatcher, Event, SystemClock};
use tracing::{info, warn};

#[derive(Args)]
pub struct WatchArgs {
    /// Exit after the first alarm fires
    #[arg(long)]
    pub once: bool,
}

/// Record a one-time alarm's deactivation in the on-disk config.
///
/// The file is reloaded first so edits made by other invocations while the
/// loop runs are kept.
fn persist_deactivation(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    let Event::AlarmTriggered { alarm, .. } = event else {
        return Ok(());
    };
    if !alarm.is_one_time() {
        return Ok(());
    }
    let mut config = Config::load()?;
    if config.alarms.set_active(alarm.id(), false).is_ok() {
        config.save()?;
        info!(alarm_id = %alarm.id(), "one-time alarm deactivated");
    }
    Ok(())
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let watcher = ConfigWatcher::new(Config::path()?);
    let panel = Arc::new(Mutex::new(config.panel()));
    let clock: Arc<dyn ClockSource> = Arc::new(SystemClock);

    eprintln!(
        "Watching {} active alarm(s). Press Ctrl-C to stop.",
        config.alarms.iter().filter(|a| a.active).count()
    );

    let rt = super::runtime()?;
    rt.block_on(async {
        let (mut ticker, mut events) =
            drive_panel(Arc::clone(&panel), clock, config.tick_interval())?;
        // Alarms added or edited by other invocations take effect without a restart.
        let mut reloader = reload_alarms(panel, watcher, config.tick_interval())?;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    super::emit(&event)?;
                    if let Err(e) = persist_deactivation(&event) {
                        warn!("failed to persist alarm state: {e}");
                    }
                    if args.once && event.is_alarm() {
                        break;
                    }
                }
                _ = &mut ctrl_c => break,
            }
        }

        ticker.stop();
        reloader.stop();
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
