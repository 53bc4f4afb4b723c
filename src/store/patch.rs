use chrono::{NaiveDate, NaiveDateTime};
use crate::models::{Priority, Repeat, Task, TaskStatus};
use crate::store::error::StoreError;

/// Partial field update for `TaskStore::update`
///
/// `None` leaves a field alone. For optional fields, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub section: Option<String>,
    pub tags: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub repeat: Option<Repeat>,
    pub due_date: Option<Option<NaiveDate>>,
    pub reminder_at: Option<Option<NaiveDateTime>>,
    pub status: Option<TaskStatus>,
    pub notes: Option<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }

    /// Title and category may be changed but never blanked
    pub fn validate(&self) -> Result<(), StoreError> {
        for (field, value) in [("title", &self.title), ("category", &self.category)] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(StoreError::InvalidField {
                        field: field.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(section) = self.section {
            task.section = section;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(repeat) = self.repeat {
            task.repeat = repeat;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(reminder_at) = self.reminder_at {
            task.reminder_at = reminder_at;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(notes) = self.notes {
            task.notes = notes;
        }
    }
}
