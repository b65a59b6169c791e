//! Polling scheduler
//!
//! Channel-keyed recurring tasks. Each logical channel holds at most one
//! live timer, owned exclusively by the scheduler; controllers never touch
//! timer handles directly. Restarting a channel aborts the previous timer
//! first, so repeated `start` calls can never double-fire.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

/// Logical polling channels of the console.
///
/// The list channel belongs to the list controller, the two detail channels
/// to the detail controller; the router guarantees the two owners are never
/// live at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    SolutionList,
    DetailStatus,
    DetailLog,
}

/// Recurring-task scheduler keyed by [`Channel`].
#[derive(Default)]
pub struct PollingScheduler {
    timers: Mutex<HashMap<Channel, JoinHandle<()>>>,
}

impl PollingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start polling on a channel; the first invocation fires immediately
    /// so the view shows data without waiting a full period.
    ///
    /// Any timer already live on the channel is cancelled first. A failed
    /// `task` invocation does not stop the timer; tasks are self-contained
    /// fetch-and-render units and the next tick retries.
    pub fn start<F, Fut>(&self, channel: Channel, period: Duration, task: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.spawn(channel, Instant::now(), period, task);
    }

    /// Start polling on a channel with the first invocation one full period
    /// away.
    ///
    /// Used when the caller has already performed the immediate fetch
    /// itself, e.g. to inspect the result before deciding to poll at all.
    pub fn start_after<F, Fut>(&self, channel: Channel, period: Duration, task: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.spawn(channel, Instant::now() + period, period, task);
    }

    fn spawn<F, Fut>(&self, channel: Channel, first: Instant, period: Duration, task: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.stop(channel);

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(first, period);
            // Ticks are short relative to the period; if one ever overruns,
            // fall back to a steady cadence instead of a burst.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                task().await;
            }
        });

        if let Some(stale) = self.timers.lock().unwrap().insert(channel, handle) {
            // Two starts raced on the same channel; keep the newer timer.
            stale.abort();
        }
    }

    /// Cancel the channel's timer if any; no-op otherwise.
    ///
    /// Cancels future ticks only. An in-flight request issued by a previous
    /// tick completes on its own and is discarded by the caller's staleness
    /// checks.
    pub fn stop(&self, channel: Channel) {
        if let Some(handle) = self.timers.lock().unwrap().remove(&channel) {
            handle.abort();
        }
    }

    /// Cancel every live timer. Used on console shutdown.
    pub fn stop_all(&self) {
        for (_, handle) in self.timers.lock().unwrap().drain() {
            handle.abort();
        }
    }

    /// Whether the channel currently holds a live timer.
    #[allow(dead_code)]
    pub fn is_active(&self, channel: Channel) -> bool {
        self.timers
            .lock()
            .unwrap()
            .get(&channel)
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.stop_all();
    }
}
