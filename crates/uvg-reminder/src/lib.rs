//! Sunscreen reapplication reminder: a persisted countdown that survives
//! restarts, plus the background task that ticks it.

pub mod clock;
pub mod format;
pub mod service;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use format::{format_hms, reminder_message, REMINDER_TITLE};
pub use service::{ReminderService, SharedTimer, Ticker, TICK_INTERVAL};
pub use timer::{ReminderTimer, TimerEvent, TimerPhase, TimerState};
