//! Reminder timers
//!
//! One timer per task with a future `reminderAt`. The whole timer map is
//! rebuilt from the task list on every change rather than patched
//! incrementally; every existing timer is cancelled first.

use std::collections::HashMap;
use chrono::NaiveDateTime;
use crate::models::Task;

/// A pending reminder for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub task_id: String,
    pub title: String,
    pub fire_at: NaiveDateTime,
}

/// A reminder whose time has come
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub task_id: String,
    pub title: String,
    pub body: String,
    pub fire_at: NaiveDateTime,
}

#[derive(Debug, Default)]
pub struct ReminderScheduler {
    timers: HashMap<String, Timer>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every timer and create one per eligible task
    ///
    /// A task is eligible when it is not done and its reminder lies after
    /// `now`. Without notification permission no timers are created.
    /// Returns the number of timers scheduled.
    pub fn reschedule(&mut self, tasks: &[Task], permission: bool, now: NaiveDateTime) -> usize {
        let cancelled = self.cancel_all();
        if cancelled > 0 {
            log::debug!("cancelled {} reminder timer(s)", cancelled);
        }

        if !permission {
            return 0;
        }

        for task in tasks {
            let Some(fire_at) = task.reminder_at else {
                continue;
            };
            if task.is_done() || fire_at <= now {
                continue;
            }
            self.timers.insert(
                task.id.clone(),
                Timer { task_id: task.id.clone(), title: task.title.clone(), fire_at },
            );
        }

        log::debug!("scheduled {} reminder timer(s)", self.timers.len());
        self.timers.len()
    }

    /// Cancel one task's timer. Returns true if one was pending.
    pub fn cancel(&mut self, task_id: &str) -> bool {
        self.timers.remove(task_id).is_some()
    }

    /// Cancel all timers, returning how many were pending
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    /// Pending timers, soonest first
    pub fn pending(&self) -> Vec<&Timer> {
        let mut timers: Vec<&Timer> = self.timers.values().collect();
        timers.sort_by(|a, b| a.fire_at.cmp(&b.fire_at).then_with(|| a.title.cmp(&b.title)));
        timers
    }

    pub fn next_fire_at(&self) -> Option<NaiveDateTime> {
        self.timers.values().map(|t| t.fire_at).min()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Remove and return every timer due at `now`
    ///
    /// Timers for tasks that have since been deleted or completed are
    /// dropped without a notification.
    pub fn fire_due(&mut self, tasks: &[Task], now: NaiveDateTime) -> Vec<Notification> {
        let due_ids: Vec<String> = self.timers
            .values()
            .filter(|t| t.fire_at <= now)
            .map(|t| t.task_id.clone())
            .collect();

        let mut fired = Vec::new();
        for id in due_ids {
            let Some(timer) = self.timers.remove(&id) else {
                continue;
            };
            let still_open = tasks.iter().any(|t| t.id == timer.task_id && !t.is_done());
            if !still_open {
                log::debug!("dropping reminder for closed or deleted task {}", timer.task_id);
                continue;
            }
            fired.push(Notification {
                body: format!("Reminder: {}", timer.title),
                task_id: timer.task_id,
                title: timer.title,
                fire_at: timer.fire_at,
            });
        }

        fired.sort_by(|a, b| a.fire_at.cmp(&b.fire_at));
        fired
    }
}
