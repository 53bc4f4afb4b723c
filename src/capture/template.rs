//! Capture templates
//!
//! A template is a named list of capture lines from the rc file
//! (`template.morning=Stretch daily #health; Plan day #work`).

use chrono::NaiveDateTime;
use crate::capture::parser::parse;
use crate::models::{Category, Task};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub lines: Vec<String>,
}

impl Template {
    /// Build a template from a `;`-separated line list
    pub fn parse(name: &str, text: &str) -> Self {
        let lines = text
            .split(';')
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();
        Self {
            name: name.to_string(),
            lines,
        }
    }

    /// Parse every line into a task, in template order; empty drafts are skipped
    pub fn expand(&self, categories: &[Category], now: NaiveDateTime) -> Vec<Task> {
        self.lines
            .iter()
            .filter_map(|line| parse(line, categories, now).into_task(now))
            .collect()
    }
}
