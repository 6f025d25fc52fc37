//! Sunscreen reapplication countdown.
//!
//! The start time is persisted under [`keys::TIMER_START`] so a countdown
//! survives a restart. While running, the remaining time is always derived
//! from the clock: `max(0, duration - floor((now - start) / 1000))`.

use std::sync::Arc;
use std::time::Duration;

use uvg_core::{keys, KeyValueStore};

use crate::clock::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    /// Countdown reached zero; waiting for the reminder to be acknowledged.
    Elapsed,
}

/// Point-in-time view of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub phase: TimerPhase,
    pub start_epoch_ms: Option<i64>,
    pub remaining_secs: u64,
    pub duration_secs: u64,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// The reapply dialog is showing.
    pub fn reminder_visible(&self) -> bool {
        self.phase == TimerPhase::Elapsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { remaining_secs: u64 },
    ReminderDue,
}

pub struct ReminderTimer {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    duration_secs: u64,
    phase: TimerPhase,
    start_epoch_ms: Option<i64>,
    remaining_secs: u64,
}

fn elapsed_secs(start_ms: i64, now_ms: i64) -> u64 {
    // A start in the future (clock moved backwards) counts as no time elapsed
    u64::try_from(now_ms.saturating_sub(start_ms) / 1000).unwrap_or(0)
}

impl ReminderTimer {
    /// Idle timer; does not look at the store.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, duration: Duration) -> Self {
        let duration_secs = duration.as_secs().max(1);
        Self {
            store,
            clock,
            duration_secs,
            phase: TimerPhase::Idle,
            start_epoch_ms: None,
            remaining_secs: duration_secs,
        }
    }

    /// Rebuild the timer from a persisted start time.
    ///
    /// A countdown that finished while nothing was running comes back as
    /// `Elapsed`, and `ReminderDue` is returned so the reminder is not lost.
    pub fn restore(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        duration: Duration,
    ) -> (Self, Option<TimerEvent>) {
        let mut timer = Self::new(store, clock, duration);

        let start_ms = match timer.store.get(keys::TIMER_START) {
            Ok(Some(raw)) => match raw.trim().parse::<i64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    tracing::warn!("Discarding unreadable timer start {:?}", raw);
                    timer.clear_persisted();
                    return (timer, None);
                }
            },
            Ok(None) => return (timer, None),
            Err(e) => {
                tracing::warn!("Failed to read timer start: {}", e);
                return (timer, None);
            }
        };

        let elapsed = elapsed_secs(start_ms, timer.clock.now_ms());
        timer.start_epoch_ms = Some(start_ms);

        if elapsed < timer.duration_secs {
            timer.phase = TimerPhase::Running;
            timer.remaining_secs = timer.duration_secs - elapsed;
            tracing::info!(
                "Resumed sunscreen timer with {}s remaining",
                timer.remaining_secs
            );
            (timer, None)
        } else {
            timer.phase = TimerPhase::Elapsed;
            timer.remaining_secs = 0;
            tracing::info!("Sunscreen timer elapsed while closed ({}s ago)", elapsed);
            (timer, Some(TimerEvent::ReminderDue))
        }
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            phase: self.phase,
            start_epoch_ms: self.start_epoch_ms,
            remaining_secs: self.remaining_secs,
            duration_secs: self.duration_secs,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Begin a countdown. Returns false (and changes nothing) unless idle.
    pub fn start(&mut self) -> bool {
        if self.phase != TimerPhase::Idle {
            tracing::debug!("Ignoring start while {:?}", self.phase);
            return false;
        }

        let now = self.clock.now_ms();
        if let Err(e) = self.store.set(keys::TIMER_START, &now.to_string()) {
            tracing::warn!("Failed to persist timer start: {}", e);
        }

        self.phase = TimerPhase::Running;
        self.start_epoch_ms = Some(now);
        self.remaining_secs = self.duration_secs;
        tracing::info!("Sunscreen timer started for {}s", self.duration_secs);
        true
    }

    /// Advance a running countdown. `None` when not running.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        let start = self.start_epoch_ms?;

        let elapsed = elapsed_secs(start, self.clock.now_ms());
        self.remaining_secs = self.duration_secs.saturating_sub(elapsed);

        if self.remaining_secs == 0 {
            self.phase = TimerPhase::Elapsed;
            tracing::info!("Sunscreen timer elapsed");
            Some(TimerEvent::ReminderDue)
        } else {
            Some(TimerEvent::Tick {
                remaining_secs: self.remaining_secs,
            })
        }
    }

    /// Cancel a running countdown without a reminder.
    pub fn stop(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        self.reset();
        tracing::info!("Sunscreen timer stopped");
        true
    }

    /// Dismiss the reminder of an elapsed countdown.
    pub fn acknowledge(&mut self) -> bool {
        if self.phase != TimerPhase::Elapsed {
            return false;
        }
        self.reset();
        tracing::info!("Sunscreen reminder acknowledged");
        true
    }

    /// Single start/stop control: starts when idle, stops when running,
    /// dismisses the reminder when elapsed.
    pub fn toggle(&mut self) -> TimerPhase {
        match self.phase {
            TimerPhase::Idle => {
                self.start();
            }
            TimerPhase::Running => {
                self.stop();
            }
            TimerPhase::Elapsed => {
                self.acknowledge();
            }
        }
        self.phase
    }

    fn reset(&mut self) {
        self.clear_persisted();
        self.phase = TimerPhase::Idle;
        self.start_epoch_ms = None;
        self.remaining_secs = self.duration_secs;
    }

    fn clear_persisted(&self) {
        if let Err(e) = self.store.remove(keys::TIMER_START) {
            tracing::warn!("Failed to clear timer start: {}", e);
        }
    }
}
