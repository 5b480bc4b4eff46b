//! Trigger manager - starts one scheduler per configured trigger.

use crate::publisher::ExecutionSink;
use crate::scheduler::{TriggerScheduler, TriggerStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use trello::CardTrigger;

/// Status of every running trigger, keyed by trigger id.
pub type StatusMap = Arc<Mutex<HashMap<String, Arc<Mutex<TriggerStatus>>>>>;

pub struct PollerManager {
    sink: Arc<dyn ExecutionSink>,
    status_map: StatusMap,
    handles: HashMap<String, JoinHandle<()>>,
}

impl PollerManager {
    pub fn new(sink: Arc<dyn ExecutionSink>) -> Self {
        Self {
            sink,
            status_map: Arc::new(Mutex::new(HashMap::new())),
            handles: HashMap::new(),
        }
    }

    /// Returns a clone of the status map for external monitoring.
    pub fn status_map(&self) -> StatusMap {
        Arc::clone(&self.status_map)
    }

    /// Start a scheduler for each trigger. Returns the number started.
    pub async fn start(&mut self, triggers: Vec<CardTrigger>) -> usize {
        if triggers.is_empty() {
            warn!("No triggers configured, nothing to start");
            return 0;
        }

        let mut started = 0;
        for trigger in triggers {
            if self.start_trigger(trigger).await {
                started += 1;
            }
        }

        info!(schedulers_started = started, "Trigger manager started");
        started
    }

    /// Start one trigger. A trigger whose id is already running is skipped.
    pub async fn start_trigger(&mut self, trigger: CardTrigger) -> bool {
        if self.handles.contains_key(&trigger.id) {
            warn!(trigger_id = %trigger.id, "Trigger already running, skipping");
            return false;
        }

        let trigger_id = trigger.id.clone();
        let scheduler = TriggerScheduler::new(trigger, Arc::clone(&self.sink));

        self.status_map
            .lock()
            .await
            .insert(trigger_id.clone(), scheduler.status());
        self.handles.insert(trigger_id, scheduler.start());
        true
    }

    pub fn running_count(&self) -> usize {
        self.handles.len()
    }

    /// Abort every scheduler. Polls in flight are dropped.
    pub async fn shutdown(&mut self) {
        info!(scheduler_count = self.handles.len(), "Shutting down trigger manager");

        for (trigger_id, handle) in self.handles.drain() {
            handle.abort();
            info!(trigger_id = %trigger_id, "Trigger scheduler stopped");
        }
    }
}

impl Drop for PollerManager {
    fn drop(&mut self) {
        for handle in self.handles.values() {
            handle.abort();
        }
    }
}
