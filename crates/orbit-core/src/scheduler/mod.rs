//! Periodic tick source.
//!
//! A [`Ticker`] is an explicitly owned handle on one tokio task that calls a
//! tick function at a fixed period. Ticks run one at a time and missed ticks
//! are skipped rather than replayed in a burst. Stopping the ticker, or
//! dropping it, aborts the task so no tick fires afterwards.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::clock::ClockSource;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::panel::ToolsPanel;
use crate::storage::ConfigWatcher;

#[derive(Debug)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
    period: Duration,
}

impl Ticker {
    /// Spawn the tick task on the current tokio runtime.
    ///
    /// The first tick fires immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if `period` is zero or no tokio runtime is running.
    pub fn start<F>(period: Duration, on_tick: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            return Err(CoreError::Scheduler("tick period must be non-zero".into()));
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| CoreError::Scheduler(format!("no tokio runtime: {e}")))?;

        let mut on_tick = on_tick;
        let handle = runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                on_tick();
            }
        });
        info!(period_ms = period.as_millis() as u64, "ticker started");
        Ok(Self {
            handle: Some(handle),
            period,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the tick task. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Drive `panel` from `clock` every `period`, forwarding events on a channel.
///
/// The panel is locked only for the duration of one tick, so callers may
/// edit alarms or control the countdown between ticks.
pub fn drive_panel(
    panel: Arc<Mutex<ToolsPanel>>,
    clock: Arc<dyn ClockSource>,
    period: Duration,
) -> Result<(Ticker, mpsc::UnboundedReceiver<Event>)> {
    let (tx, rx) = mpsc::unbounded_channel();
    let ticker = Ticker::start(period, move || {
        let now = clock.now();
        let events = lock_panel(&panel).tick(&now);
        for event in events {
            if tx.send(event).is_err() {
                break;
            }
        }
    })?;
    Ok((ticker, rx))
}

fn lock_panel(panel: &Mutex<ToolsPanel>) -> std::sync::MutexGuard<'_, ToolsPanel> {
    match panel.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("panel lock poisoned; continuing with inner state");
            poisoned.into_inner()
        }
    }
}

/// Poll `watcher` every `period` and swap changed alarm lists into `panel`.
///
/// A config that fails to load is logged and the current alarms are kept.
pub fn reload_alarms(
    panel: Arc<Mutex<ToolsPanel>>,
    mut watcher: ConfigWatcher,
    period: Duration,
) -> Result<Ticker> {
    Ticker::start(period, move || match watcher.poll() {
        Ok(Some(config)) => {
            let count = config.alarms.len();
            lock_panel(&panel).replace_alarms(config.alarms);
            info!(alarms = count, path = %watcher.path().display(), "alarms reloaded");
        }
        Ok(None) => {}
        Err(e) => warn!("keeping current alarms: {e}"),
    })
}
