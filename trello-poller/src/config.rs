//! Poller configuration file.
//!
//! ```toml
//! dispatch_url = "http://localhost:8080/api/executions"
//! api_port = 3002
//!
//! [[triggers]]
//! id = "card_trigger"
//! apiKey = "..."
//! apiToken = "..."
//! listId = "5abbe4b7ddc1b351ef961414"
//! interval = 300
//! ```

use anyhow::{bail, Result};
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::warn;
use trello::trigger::PollWindow;
use trello::CardTrigger;

#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Where executions are POSTed; executions are only logged when unset
    #[serde(default)]
    pub dispatch_url: Option<String>,
    /// Port of the status API
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    #[serde(default)]
    pub triggers: Vec<CardTrigger>,
}

fn default_api_port() -> u16 {
    3002
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            dispatch_url: None,
            api_port: default_api_port(),
            triggers: Vec::new(),
        }
    }
}

impl PollerConfig {
    pub fn load(path: &str) -> Result<Self> {
        let config: Self = trello::config::load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Trigger ids must be unique and intervals must yield a valid cutoff.
    /// A trigger without any list or board is accepted but never fires.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for trigger in &self.triggers {
            if !seen.insert(trigger.id.as_str()) {
                bail!("duplicate trigger id '{}'", trigger.id);
            }
            if trigger.interval_secs == 0 {
                bail!("trigger '{}' has a zero interval", trigger.id);
            }
            PollWindow::resolve(None, trigger.interval()?, Utc::now())?;
            if trigger.targets().is_empty() {
                warn!(trigger_id = %trigger.id, "Trigger has no listId, listIds or boardId configured");
            }
        }
        Ok(())
    }
}
