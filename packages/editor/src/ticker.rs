//! # Countdown Ticker
//!
//! Owns the timer task that recomputes the countdown on a fixed period and
//! hands each reading to a render callback. The first reading is delivered
//! immediately. After the first `Elapsed` reading the ticker stops itself.
//!
//! Dropping the ticker aborts the task, so a view that goes away cannot leave
//! a timer running.

use crate::countdown::{countdown_between, Clock, CountdownReading};
use chrono::{NaiveDateTime, NaiveTime};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use weddingsite_document::WeddingDocument;

/// Default recomputation period
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Shortest period the ticker accepts; zero is raised to this
pub const MIN_TICK: Duration = Duration::from_millis(1);

pub struct CountdownTicker {
    target: NaiveDateTime,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTicker {
    /// Spawn the timer task. Must be called inside a tokio runtime.
    /// Periods below [`MIN_TICK`] are raised to it.
    pub fn start<F>(
        target: NaiveDateTime,
        clock: Arc<dyn Clock>,
        period: Duration,
        mut on_tick: F,
    ) -> Self
    where
        F: FnMut(CountdownReading) + Send + 'static,
    {
        let period = period.max(MIN_TICK);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let reading = countdown_between(target, clock.now());
                on_tick(reading);

                if reading.is_elapsed() {
                    debug!(%target, "Countdown elapsed, ticker stopping");
                    break;
                }
            }
        });

        Self {
            target,
            handle: Some(handle),
        }
    }

    /// Ticker toward the document's ceremony instant, or `None` when the
    /// wedding date is missing or malformed
    pub fn for_document<F>(
        doc: &WeddingDocument,
        ceremony_time: NaiveTime,
        clock: Arc<dyn Clock>,
        period: Duration,
        on_tick: F,
    ) -> Option<Self>
    where
        F: FnMut(CountdownReading) + Send + 'static,
    {
        let target = doc.ceremony_instant(ceremony_time)?;
        Some(Self::start(target, clock, period, on_tick))
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
