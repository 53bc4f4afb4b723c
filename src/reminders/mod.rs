//! Reminder scheduling and delivery

pub mod notifier;
pub mod scheduler;

pub use notifier::*;
pub use scheduler::*;

use chrono::NaiveDateTime;
use anyhow::Result;
use crate::models::Task;

/// Fire every due reminder through `notifier`, returning how many were delivered
pub fn deliver_due<N: Notifier>(
    scheduler: &mut ReminderScheduler,
    tasks: &[Task],
    now: NaiveDateTime,
    notifier: &mut N,
) -> Result<usize> {
    let fired = scheduler.fire_due(tasks, now);
    for notification in &fired {
        log::info!("delivering reminder for task {}", notification.task_id);
        notifier.notify(notification)?;
    }
    Ok(fired.len())
}
