//! Configuration from the rc file
//!
//! `~/.taskpad/rc` holds `key=value` lines:
//!
//! ```text
//! data.location=./taskpad.db
//! notifications=on
//! undo.seconds=5
//! category.work=Work,magenta
//! template.morning=Stretch daily #health; Plan the day #work
//! ```
//!
//! Missing file or keys fall back to defaults. Relative `data.location`
//! paths resolve against the rc file's directory.

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use chrono::Duration;
use crate::capture::Template;
use crate::models::{default_categories, Category};

/// Default undo window for deletes, in seconds
pub const DEFAULT_UNDO_SECONDS: i64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_location: PathBuf,
    /// Whether reminders may raise notifications
    pub notifications: bool,
    pub undo_window: Duration,
    pub categories: Vec<Category>,
    pub templates: Vec<Template>,
}

impl Config {
    /// Directory holding the rc file and default database
    pub fn config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".taskpad")
    }

    /// Get the configuration file path
    pub fn rc_path() -> PathBuf {
        Self::config_dir().join("rc")
    }

    /// Get the default database path
    pub fn default_data_path() -> PathBuf {
        Self::config_dir().join("taskpad.db")
    }

    /// Load configuration from the rc file, or defaults when it does not exist
    pub fn load() -> Result<Self> {
        let rc_path = Self::rc_path();
        if !rc_path.exists() {
            log::debug!("no rc file at {}, using defaults", rc_path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&rc_path)
            .with_context(|| format!("Failed to read config file: {}", rc_path.display()))?;
        let rc_dir = rc_path.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::parse(&content, rc_dir))
    }

    /// Parse rc content; `rc_dir` anchors relative paths
    pub fn parse(content: &str, rc_dir: &Path) -> Self {
        let mut config = Self::default();
        let mut categories = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                log::warn!("rc line {}: expected key=value, got '{}'", line_no + 1, line);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            if let Some(id) = key.strip_prefix("category.") {
                let mut parts = value.splitn(2, ',');
                let name = parts.next().map(str::trim).filter(|n| !n.is_empty()).unwrap_or(id);
                let color = parts.next().map(str::trim).unwrap_or("white");
                categories.push(Category::new(id, name, color));
                continue;
            }

            if let Some(name) = key.strip_prefix("template.") {
                config.templates.push(Template::parse(name, value));
                continue;
            }

            match key {
                "data.location" => {
                    let path = PathBuf::from(value);
                    config.data_location = if path.is_relative() { rc_dir.join(path) } else { path };
                }
                "notifications" => match parse_switch(value) {
                    Some(on) => config.notifications = on,
                    None => log::warn!("rc line {}: notifications expects on/off, got '{}'", line_no + 1, value),
                },
                "undo.seconds" => match value.parse::<i64>() {
                    Ok(secs) if secs >= 0 => config.undo_window = Duration::seconds(secs),
                    _ => log::warn!("rc line {}: undo.seconds expects a non-negative number, got '{}'", line_no + 1, value),
                },
                _ => log::warn!("rc line {}: unknown key '{}'", line_no + 1, key),
            }
        }

        if !categories.is_empty() {
            config.categories = categories;
        }
        config
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_location: Self::default_data_path(),
            notifications: true,
            undo_window: Duration::seconds(DEFAULT_UNDO_SECONDS),
            categories: default_categories(),
            templates: Vec::new(),
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
