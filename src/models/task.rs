use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format a calendar date as a `yyyy-mm-dd` date-key
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Task status (lifecycle state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in-progress" | "doing" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "high" | "p1" => Some(Priority::High),
            "medium" | "med" | "p2" => Some(Priority::Medium),
            "low" | "p3" => Some(Priority::Low),
            "none" | "" => Some(Priority::None),
            _ => None,
        }
    }
}

/// Repeat cadence of a habit-style task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Repeat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Repeat::None => "none",
            Repeat::Daily => "daily",
            Repeat::Weekly => "weekly",
            Repeat::Monthly => "monthly",
            Repeat::Yearly => "yearly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" | "" => Some(Repeat::None),
            "daily" => Some(Repeat::Daily),
            "weekly" => Some(Repeat::Weekly),
            "monthly" => Some(Repeat::Monthly),
            "yearly" => Some(Repeat::Yearly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            done: false,
        }
    }
}

/// Task model
///
/// Serialized with camelCase keys; this is the shape of the persisted blob
/// and of export files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub reminder_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub my_day: Vec<String>,
    #[serde(default)]
    pub last_completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub completed_dates: Vec<String>,
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Create a new task
    pub fn new(title: String, category: String, created_at: NaiveDateTime) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            category,
            section: String::new(),
            tags: Vec::new(),
            priority: Priority::None,
            repeat: Repeat::None,
            due_date: None,
            reminder_at: None,
            status: TaskStatus::Todo,
            notes: String::new(),
            checklist: Vec::new(),
            my_day: Vec::new(),
            last_completed_at: None,
            streak: 0,
            completed_dates: Vec::new(),
            created_at,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat != Repeat::None
    }

    /// Due before `today` and not yet done
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.due_date.map(|d| d < today).unwrap_or(false)
    }

    pub fn is_in_my_day(&self, today: NaiveDate) -> bool {
        let key = date_key(today);
        self.my_day.iter().any(|k| *k == key)
    }

    /// Add or remove `today` from the My Day picks. Returns the new membership.
    pub fn toggle_my_day(&mut self, today: NaiveDate) -> bool {
        let key = date_key(today);
        if let Some(pos) = self.my_day.iter().position(|k| *k == key) {
            self.my_day.remove(pos);
            false
        } else {
            self.my_day.push(key);
            true
        }
    }

    pub fn completed_on(&self, date: NaiveDate) -> bool {
        let key = date_key(date);
        self.completed_dates.iter().any(|k| *k == key)
    }

    /// Checklist progress as (done, total)
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|item| item.done).count();
        (done, self.checklist.len())
    }

    pub fn short_id(&self) -> &str {
        let end = self.id.len().min(8);
        &self.id[..end]
    }
}
