//! Background driver for the reminder timer.
//!
//! A 1-second tokio interval ticks the shared timer while it is running.
//! Every transition out of `Running` cancels that task, and events reach the
//! caller over an mpsc channel.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use uvg_core::KeyValueStore;

use crate::clock::Clock;
use crate::timer::{ReminderTimer, TimerEvent, TimerPhase, TimerState};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub type SharedTimer = Arc<Mutex<ReminderTimer>>;

/// Handle to a scheduled tick task. Dropping it cancels the task.
pub struct Ticker {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn the tick loop on the current tokio runtime.
    ///
    /// The loop ends on its own once the timer stops reporting events
    /// (it left `Running`) or after delivering `ReminderDue`.
    pub fn spawn(timer: SharedTimer, events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately
            interval.tick().await;

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => {
                        tracing::debug!("Reminder ticker cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        let Some(event) = timer.lock().tick() else {
                            break;
                        };
                        let finished = event == TimerEvent::ReminderDue;
                        if events.send(event).is_err() || finished {
                            break;
                        }
                    }
                }
            }
        });

        Self { token, handle }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Owns the single timer instance and its tick task.
pub struct ReminderService {
    timer: SharedTimer,
    ticker: Option<Ticker>,
    events_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl ReminderService {
    /// Restore any persisted countdown and resume ticking if it is still running.
    ///
    /// A reminder that came due while closed is queued on the returned
    /// receiver straight away. Must be called within a tokio runtime.
    pub fn restore(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        duration: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (timer, pending) = ReminderTimer::restore(store, clock, duration);

        let mut service = Self {
            timer: Arc::new(Mutex::new(timer)),
            ticker: None,
            events_tx,
        };

        if let Some(event) = pending {
            let _ = service.events_tx.send(event);
        }
        service.sync_ticker();

        (service, events_rx)
    }

    pub fn state(&self) -> TimerState {
        self.timer.lock().state()
    }

    pub fn start(&mut self) -> bool {
        let started = self.timer.lock().start();
        self.sync_ticker();
        started
    }

    pub fn stop(&mut self) -> bool {
        self.cancel_ticker();
        let stopped = self.timer.lock().stop();
        self.sync_ticker();
        stopped
    }

    pub fn acknowledge(&mut self) -> bool {
        self.cancel_ticker();
        let acknowledged = self.timer.lock().acknowledge();
        self.sync_ticker();
        acknowledged
    }

    pub fn toggle(&mut self) -> TimerPhase {
        if self.state().is_running() {
            self.cancel_ticker();
        }
        let phase = self.timer.lock().toggle();
        self.sync_ticker();
        phase
    }

    /// True while a tick task is scheduled and alive.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Keep exactly one live ticker while running and none otherwise.
    fn sync_ticker(&mut self) {
        let running = self.timer.lock().phase() == TimerPhase::Running;
        if !running {
            self.cancel_ticker();
            return;
        }
        if !self.is_ticking() {
            self.ticker = Some(Ticker::spawn(self.timer.clone(), self.events_tx.clone()));
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}
