use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};

use super::card::CardAction;

/// Activity this close to the cutoff is taken as the card's creation.
pub const CREATION_GRACE_SECS: i64 = 60;

/// Time window of one poll.
///
/// Only `cutoff` matters: activity strictly after it is new. It is derived
/// from the scheduler's next-execution time, or handed in by a host that
/// tracks the previous cutoff itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollWindow {
    pub cutoff: DateTime<Utc>,
}

impl PollWindow {
    /// `next_execution - interval`, or `now - interval` without a hint.
    pub fn resolve(
        next_execution: Option<DateTime<Utc>>,
        interval: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let anchor = next_execution.unwrap_or(now);
        let cutoff = anchor
            .checked_sub_signed(interval)
            .with_context(|| format!("poll cutoff {} before {} is out of range", interval, anchor))?;
        Ok(Self { cutoff })
    }

    pub fn includes(&self, last_activity: DateTime<Utc>) -> bool {
        last_activity > self.cutoff
    }

    /// A card whose activity falls within the grace margin of the cutoff
    /// is classified as created, anything newer as updated.
    pub fn classify(&self, last_activity: DateTime<Utc>) -> CardAction {
        if last_activity - Duration::seconds(CREATION_GRACE_SECS) < self.cutoff {
            CardAction::Created
        } else {
            CardAction::Updated
        }
    }
}
