//! Completion toggling and streak tracking
//!
//! Completing a repeating task never leaves it done: it rolls forward to the
//! next occurrence immediately, with the streak and habit history updated.
//! Non-repeating tasks simply flip between todo and done.

use chrono::{NaiveDate, NaiveDateTime};
use crate::models::{date_key, Task, TaskStatus};
use crate::recur::cadence::{advance, cadence_delta};

/// What a completion toggle did to the task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Non-repeating task marked done
    Completed,
    /// Done task flipped back to todo
    Reopened,
    /// Repeating task moved to its next occurrence
    RolledOver { next_due: NaiveDate, streak: u32 },
}

/// The rewritten task plus what happened to it
#[derive(Debug, Clone)]
pub struct Completion {
    pub task: Task,
    pub outcome: CompletionOutcome,
}

/// Toggle completion of `task` at `now`
pub fn toggle_completion(task: &Task, now: NaiveDateTime) -> Completion {
    let mut task = task.clone();

    // Undoing a completion is a plain status flip for every kind of task
    if task.is_done() {
        task.status = TaskStatus::Todo;
        return Completion { task, outcome: CompletionOutcome::Reopened };
    }

    if !task.is_repeating() {
        task.status = TaskStatus::Done;
        task.last_completed_at = Some(now);
        return Completion { task, outcome: CompletionOutcome::Completed };
    }

    let today = now.date();
    task.streak = next_streak(&task, today);

    let base = task.due_date.unwrap_or(today);
    let next_due = advance(task.repeat, base);

    let key = date_key(today);
    if !task.completed_dates.contains(&key) {
        task.completed_dates.push(key);
    }

    task.status = TaskStatus::Todo;
    task.due_date = Some(next_due);
    task.last_completed_at = Some(now);

    log::debug!(
        "rolled over task {} ({}) to {} with streak {}",
        task.id,
        task.repeat.as_str(),
        next_due,
        task.streak
    );

    let streak = task.streak;
    Completion { task, outcome: CompletionOutcome::RolledOver { next_due, streak } }
}

/// Streak after completing on `today`, given the previous completion
pub fn next_streak(task: &Task, today: NaiveDate) -> u32 {
    let last = match task.last_completed_at {
        Some(last) => last.date(),
        None => return 1,
    };

    match cadence_delta(task.repeat, last, today) {
        d if d <= 0 => task.streak,
        1 => task.streak + 1,
        _ => 1,
    }
}
