//! Notification events emitted by the overdue sweeper and the deadline
//! watchdog. The caller delivers them; the engine stays stateless about
//! what was already sent, so repeated watchdog ticks re-emit alerts and
//! any rate limiting happens at the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The task's anchor passed and it moved to the overdue bucket.
    /// Emitted exactly once per transition.
    TaskOverdue {
        task_id: String,
        title: String,
        anchor: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// The anchor is at most 24 hours away.
    DeadlineApproaching {
        task_id: String,
        title: String,
        anchor: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// The anchor is at most 4 hours away. Fires alongside
    /// `DeadlineApproaching`, not instead of it.
    DeadlineUrgent {
        task_id: String,
        title: String,
        anchor: DateTime<Utc>,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Human-readable notification payload.
    pub fn message(&self) -> String {
        match self {
            Event::TaskOverdue { title, anchor, .. } => format!(
                "Deadline for \"{title}\" passed {}. Task moved to the overdue list.",
                anchor.format("%Y-%m-%d %H:%M")
            ),
            Event::DeadlineApproaching { title, .. } => {
                format!("Deadline for \"{title}\" is approaching. Time to speed up.")
            }
            Event::DeadlineUrgent { title, .. } => {
                format!("URGENT: deadline for \"{title}\" is less than 4 hours away!")
            }
        }
    }
}
