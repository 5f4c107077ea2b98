//! # Countdown Clock
//!
//! Pure decomposition of the time left until the ceremony. Readings depend
//! only on the target instant and "now"; nothing here touches the document.

use chrono::{Local, NaiveDateTime, NaiveTime};
use std::sync::Mutex;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Time of day the countdown targets when none is configured
pub fn default_ceremony_time() -> NaiveTime {
    NaiveTime::from_hms_opt(15, 0, 0).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownReading {
    Remaining(Countdown),
    /// The target instant has been reached
    Elapsed,
}

impl CountdownReading {
    /// Components to render; all zero once elapsed
    pub fn countdown(&self) -> Countdown {
        match self {
            CountdownReading::Remaining(countdown) => *countdown,
            CountdownReading::Elapsed => Countdown::default(),
        }
    }

    pub fn is_elapsed(&self) -> bool {
        matches!(self, CountdownReading::Elapsed)
    }
}

/// Time left from `now` until `target`, truncated to whole seconds
pub fn countdown_between(target: NaiveDateTime, now: NaiveDateTime) -> CountdownReading {
    let delta = (target - now).num_milliseconds();
    if delta <= 0 {
        return CountdownReading::Elapsed;
    }

    CountdownReading::Remaining(Countdown {
        days: (delta / MS_PER_DAY) as u64,
        hours: ((delta % MS_PER_DAY) / MS_PER_HOUR) as u64,
        minutes: ((delta % MS_PER_HOUR) / MS_PER_MINUTE) as u64,
        seconds: ((delta % MS_PER_MINUTE) / MS_PER_SECOND) as u64,
    })
}

/// Source of "now" for countdown readings
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and previews
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let now = self.now();
        self.set(now + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
