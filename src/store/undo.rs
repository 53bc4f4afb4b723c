//! Single-slot undo buffer for deletes
//!
//! A delete parks the removed task here until `expires_at`. A newer delete
//! replaces the slot, so only the most recent delete can be undone.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use crate::models::Task;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum UndoSlot {
    #[default]
    Empty,
    Pending {
        task: Task,
        #[serde(rename = "expiresAt")]
        expires_at: NaiveDateTime,
    },
}

impl UndoSlot {
    pub fn pending(task: Task, now: NaiveDateTime, window: Duration) -> Self {
        UndoSlot::Pending { task, expires_at: now + window }
    }

    /// True while a delete can still be undone at `now`
    pub fn is_pending(&self, now: NaiveDateTime) -> bool {
        matches!(self, UndoSlot::Pending { expires_at, .. } if now < *expires_at)
    }

    /// Empty the slot, returning the task if it had not yet expired
    pub fn take(&mut self, now: NaiveDateTime) -> Option<Task> {
        match std::mem::take(self) {
            UndoSlot::Pending { task, expires_at } if now < expires_at => Some(task),
            _ => None,
        }
    }

    /// Drop an expired pending delete. Returns true when something was dropped.
    pub fn expire(&mut self, now: NaiveDateTime) -> bool {
        if matches!(self, UndoSlot::Pending { expires_at, .. } if now >= *expires_at) {
            *self = UndoSlot::Empty;
            true
        } else {
            false
        }
    }
}
