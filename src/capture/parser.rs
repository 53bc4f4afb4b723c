//! Quick-capture parser
//!
//! Turns one line of free text into a structured `TaskDraft`. Every field has
//! its own extractor that reads the full raw input, so directives can appear
//! anywhere and in any order. The title comes from a separate cleaning pass
//! over the same input.
//!
//! Directives:
//! - `#work` category, `@errand` tag, `>Launch` section
//! - `!high`/`p1`, `!med`/`!medium`/`p2`, `!low`/`p3` priority
//! - `daily`/`every day` (and week, month, year) repeat
//! - `today`, `tomorrow`, `next friday`, `friday` due date
//! - `remind [at] [today|tomorrow] 3pm` reminder

use std::sync::LazyLock;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use crate::capture::when::{extract_due_date, extract_reminder, strip_date_words, strip_reminder};
use crate::models::{find_category, Category, Priority, Repeat, Task, FALLBACK_CATEGORY};

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)#([\p{L}\p{N}-]+)").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)@([\p{L}\p{N}-]+)").unwrap());

static HIGH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)(?:!high|p1)\b").unwrap());

static MEDIUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)(?:!medium|!med|p2)\b").unwrap());

static LOW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)(?:!low|p3)\b").unwrap());

static DAILY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:every\s+day|daily)\b").unwrap());

static WEEKLY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:every\s+week|weekly)\b").unwrap());

static MONTHLY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:every\s+month|monthly)\b").unwrap());

static YEARLY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:every\s+year|yearly)\b").unwrap());

// Section runs from '>' to the next directive-start character
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">([^#@!]*)").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// An unsaved task produced by the parser
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub category: String,
    pub section: String,
    pub tags: Vec<String>,
    pub priority: Priority,
    pub repeat: Repeat,
    pub due_date: Option<NaiveDate>,
    pub reminder_at: Option<NaiveDateTime>,
}

impl TaskDraft {
    /// A draft with nothing left in the title is not captured
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
    }

    /// Turn the draft into a task created at `now`, or `None` when empty
    pub fn into_task(self, now: NaiveDateTime) -> Option<Task> {
        if self.is_empty() {
            return None;
        }
        let mut task = Task::new(self.title, self.category, now);
        task.section = self.section;
        task.tags = self.tags;
        task.priority = self.priority;
        task.repeat = self.repeat;
        task.due_date = self.due_date;
        task.reminder_at = self.reminder_at;
        Some(task)
    }
}

/// Parse one line of capture text
///
/// `categories` is the ordered configured set; the first entry is the
/// default when no `#category` matches.
pub fn parse(input: &str, categories: &[Category], now: NaiveDateTime) -> TaskDraft {
    let category = extract_category(input, categories)
        .or_else(|| categories.first().map(|c| c.id.clone()))
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

    TaskDraft {
        title: clean_title(input),
        category,
        section: extract_section(input).unwrap_or_default(),
        tags: extract_tags(input),
        priority: extract_priority(input).unwrap_or(Priority::None),
        repeat: extract_repeat(input).unwrap_or(Repeat::None),
        due_date: extract_due_date(input, now.date()),
        reminder_at: extract_reminder(input, now),
    }
}

/// First `#slug` that names a configured category
pub fn extract_category(input: &str, categories: &[Category]) -> Option<String> {
    CATEGORY_RE
        .captures_iter(input)
        .find_map(|caps| find_category(categories, &caps[1]).map(|c| c.id.clone()))
}

/// All `@slug` tags, lowercased, in order of first appearance
pub fn extract_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for caps in TAG_RE.captures_iter(input) {
        let tag = caps[1].to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

pub fn extract_priority(input: &str) -> Option<Priority> {
    if HIGH_RE.is_match(input) {
        Some(Priority::High)
    } else if MEDIUM_RE.is_match(input) {
        Some(Priority::Medium)
    } else if LOW_RE.is_match(input) {
        Some(Priority::Low)
    } else {
        None
    }
}

pub fn extract_repeat(input: &str) -> Option<Repeat> {
    [
        (&*DAILY_RE, Repeat::Daily),
        (&*WEEKLY_RE, Repeat::Weekly),
        (&*MONTHLY_RE, Repeat::Monthly),
        (&*YEARLY_RE, Repeat::Yearly),
    ]
    .into_iter()
    .find(|(re, _)| re.is_match(input))
    .map(|(_, repeat)| repeat)
}

pub fn extract_section(input: &str) -> Option<String> {
    let caps = SECTION_RE.captures(input)?;
    Some(caps[1].trim().to_string())
}

/// Input with every directive removed and whitespace collapsed
pub fn clean_title(input: &str) -> String {
    let mut text = strip_reminder(input);

    for re in [
        &*SECTION_RE,
        &*CATEGORY_RE,
        &*TAG_RE,
        &*HIGH_RE,
        &*MEDIUM_RE,
        &*LOW_RE,
        &*DAILY_RE,
        &*WEEKLY_RE,
        &*MONTHLY_RE,
        &*YEARLY_RE,
    ] {
        text = re.replace_all(&text, " ").into_owned();
    }

    let text = strip_date_words(&text);
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
