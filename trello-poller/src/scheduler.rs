//! Per-trigger polling loop.

use crate::publisher::ExecutionSink;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};
use trello::trigger::PollWindow;
use trello::{CardTrigger, TriggerExecution};

/// Runs one [`CardTrigger`] on its interval and hands executions to a sink.
///
/// Polls of a trigger never overlap: the loop awaits each poll before the
/// next tick, and ticks missed while a poll was running are skipped. Each
/// window starts where the last successful one ended, so skipped or failed
/// ticks widen the next window instead of leaving a gap.
pub struct TriggerScheduler {
    trigger: CardTrigger,
    sink: Arc<dyn ExecutionSink>,
    status: Arc<Mutex<TriggerStatus>>,
}

/// Status information for a running trigger.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TriggerStatus {
    pub trigger_id: String,
    pub interval_secs: u64,
    /// Last poll that completed without error
    pub last_poll: Option<DateTime<Utc>>,
    /// Last time the trigger fired
    pub last_event: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Scheduled time of the last successful poll; the next window starts here
    pub covered_until: Option<DateTime<Utc>>,
    pub poll_count: u64,
    /// Number of executions dispatched
    pub event_count: u64,
    pub error_count: u64,
}

/// Maps tokio tick instants onto wall-clock time.
///
/// Ticks are offsets from a single anchor, so the scheduled times of two
/// consecutive ticks are exactly one period apart however late the task
/// wakes up.
#[derive(Clone, Copy, Debug)]
pub struct TickClock {
    start: Instant,
    start_utc: DateTime<Utc>,
}

impl TickClock {
    pub fn new(start: Instant, start_utc: DateTime<Utc>) -> Self {
        Self { start, start_utc }
    }

    pub fn now() -> Self {
        Self::new(Instant::now(), Utc::now())
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Wall-clock time `tick` was scheduled for.
    pub fn scheduled(&self, tick: Instant) -> Option<DateTime<Utc>> {
        let offset = chrono::Duration::from_std(tick.saturating_duration_since(self.start)).ok()?;
        self.start_utc.checked_add_signed(offset)
    }
}

impl TriggerScheduler {
    pub fn new(trigger: CardTrigger, sink: Arc<dyn ExecutionSink>) -> Self {
        let status = TriggerStatus {
            trigger_id: trigger.id.clone(),
            interval_secs: trigger.interval_secs,
            ..Default::default()
        };
        Self {
            trigger,
            sink,
            status: Arc::new(Mutex::new(status)),
        }
    }

    pub fn status(&self) -> Arc<Mutex<TriggerStatus>> {
        Arc::clone(&self.status)
    }

    /// Spawn the polling loop. The first poll runs immediately.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        let interval_secs = self.trigger.interval_secs.max(1);

        tokio::spawn(async move {
            info!(
                trigger_id = %self.trigger.id,
                interval_secs = interval_secs,
                "Starting trigger scheduler"
            );

            let clock = TickClock::now();
            let mut ticker = interval_at(clock.start(), Duration::from_secs(interval_secs));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                let tick = ticker.tick().await;
                let scheduled = clock.scheduled(tick).unwrap_or_else(Utc::now);
                self.run_tick(scheduled).await;
            }
        })
    }

    /// Poll for the tick scheduled at `scheduled`, dispatch the execution if
    /// the trigger fired and record the outcome in the status.
    pub async fn run_tick(&self, scheduled: DateTime<Utc>) {
        debug!(trigger_id = %self.trigger.id, scheduled = %scheduled, "Polling trigger");
        let outcome = self.poll_once(scheduled).await;

        let mut status = self.status.lock().await;
        match outcome {
            Ok(fired) => {
                status.last_poll = Some(Utc::now());
                status.last_error = None;
                status.covered_until = Some(scheduled);
                status.poll_count += 1;
                if let Some(execution) = fired {
                    status.last_event = Some(Utc::now());
                    status.event_count += 1;
                    info!(
                        trigger_id = %self.trigger.id,
                        execution_id = %execution.execution_id,
                        new_cards_count = execution.payload.new_cards_count,
                        "Trigger fired"
                    );
                }
            }
            Err(e) => {
                error!(
                    trigger_id = %self.trigger.id,
                    error = %e,
                    "Trigger poll failed"
                );
                status.last_error = Some(format!("{:#}", e));
                status.error_count += 1;
            }
        }
    }

    /// Window for the tick scheduled at `scheduled`.
    ///
    /// Starts at the last successful poll's scheduled time, or one interval
    /// before `scheduled` when there is none yet.
    pub async fn window_for(&self, scheduled: DateTime<Utc>) -> Result<PollWindow> {
        let covered_until = self.status.lock().await.covered_until;
        match covered_until {
            Some(cutoff) if cutoff < scheduled => Ok(PollWindow { cutoff }),
            _ => PollWindow::resolve(Some(scheduled), self.trigger.interval()?, Utc::now()),
        }
    }

    async fn poll_once(&self, scheduled: DateTime<Utc>) -> Result<Option<TriggerExecution>> {
        let window = self.window_for(scheduled).await?;
        let Some(event) = self.trigger.evaluate_window(&window).await? else {
            return Ok(None);
        };

        let execution = TriggerExecution::new(&self.trigger.id, event);
        self.sink.dispatch(&execution).await?;
        Ok(Some(execution))
    }
}
