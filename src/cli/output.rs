// Output formatting utilities

use chrono::{Datelike, Duration, NaiveDate};
use std::io::IsTerminal;
use crate::models::{find_category, Category, Priority, Task, TaskStatus};
use crate::reminders::Timer;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";

const ANSI_FG_RED: &str = "\x1b[31m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BLUE: &str = "\x1b[34m";
const ANSI_FG_MAGENTA: &str = "\x1b[35m";
const ANSI_FG_CYAN: &str = "\x1b[36m";
const ANSI_FG_WHITE: &str = "\x1b[37m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

/// Map a category color name to its ANSI foreground code
pub fn color_name_to_fg(name: &str) -> Option<&'static str> {
    match name {
        "red" => Some(ANSI_FG_RED),
        "green" => Some(ANSI_FG_GREEN),
        "yellow" => Some(ANSI_FG_YELLOW),
        "blue" => Some(ANSI_FG_BLUE),
        "magenta" => Some(ANSI_FG_MAGENTA),
        "cyan" => Some(ANSI_FG_CYAN),
        "white" => Some(ANSI_FG_WHITE),
        "gray" | "grey" | "bright_black" => Some(ANSI_FG_BRIGHT_BLACK),
        _ => None,
    }
}

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate, with fallback to the COLUMNS environment
/// variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    100
}

fn paint(text: &str, code: Option<&str>, tty: bool) -> String {
    match code {
        Some(code) if tty => format!("{}{}{}", code, text, ANSI_RESET),
        _ => text.to_string(),
    }
}

/// Truncate to `width` characters, marking the cut with "..."
fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{}...", kept)
}

fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

pub fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Done => "[x]",
    }
}

pub fn priority_marker(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "!!!",
        Priority::Medium => "!!",
        Priority::Low => "!",
        Priority::None => "",
    }
}

/// Due date relative to `today` for the common cases
pub fn format_due(due: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(due) = due else {
        return String::new();
    };
    match (due - today).num_days() {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => due.format("%Y-%m-%d").to_string(),
    }
}

fn category_label(task: &Task, categories: &[Category], tty: bool) -> String {
    match find_category(categories, &task.category) {
        Some(category) => paint(&category.name, color_name_to_fg(&category.color), tty),
        None => task.category.clone(),
    }
}

/// Render tasks as a table. `rows` pairs each task with its 1-based position.
pub fn format_task_table(
    rows: &[(usize, &Task)],
    categories: &[Category],
    today: NaiveDate,
    tty: bool,
    width: usize,
) -> String {
    const FIXED: usize = 4 + 4 + 4 + 11 + 11;
    let title_width = width.saturating_sub(FIXED + 16).max(16);

    let mut out = String::new();
    let header = format!(
        "{} {} {} {} {} {} {}",
        pad("#", 3),
        pad("St", 3),
        pad("Pri", 3),
        pad("Title", title_width),
        pad("Category", 10),
        pad("Due", 10),
        "Tags"
    );
    out.push_str(&paint(header.trim_end(), Some(ANSI_BOLD), tty));
    out.push('\n');

    for (position, task) in rows {
        let mut title = task.title.clone();
        if !task.section.is_empty() {
            title = format!("{} > {}", task.section, title);
        }
        let (done, total) = task.checklist_progress();
        if total > 0 {
            title = format!("{} ({}/{})", title, done, total);
        }

        let due = format_due(task.due_date, today);
        let due_cell = pad(&due, 10);
        let due_cell = if task.is_overdue(today) {
            paint(&due_cell, Some(ANSI_FG_RED), tty)
        } else {
            due_cell
        };

        let category = category_label(task, categories, tty);
        // Colour codes take no width on screen
        let category_visible = find_category(categories, &task.category)
            .map(|c| c.name.chars().count())
            .unwrap_or_else(|| task.category.chars().count());
        let category_cell = format!("{}{}", category, " ".repeat(10usize.saturating_sub(category_visible)));

        let tags = task.tags.iter().map(|t| format!("@{}", t)).collect::<Vec<_>>().join(" ");

        let line = format!(
            "{} {} {} {} {} {} {}",
            pad(&position.to_string(), 3),
            status_marker(task.status),
            pad(priority_marker(task.priority), 3),
            pad(&truncate(&title, title_width), title_width),
            category_cell,
            due_cell,
            tags
        );
        let line = line.trim_end().to_string();
        if task.is_done() {
            out.push_str(&paint(&line, Some(ANSI_DIM), tty));
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }

    out
}

/// Detailed multi-line view of one task
pub fn format_task_summary(position: usize, task: &Task, categories: &[Category], today: NaiveDate, tty: bool) -> String {
    let mut out = String::new();
    out.push_str(&paint(&format!("Task {}: {}", position, task.title), Some(ANSI_BOLD), tty));
    out.push('\n');

    let mut field = |name: &str, value: String| {
        if !value.is_empty() {
            out.push_str(&format!("  {:<12}{}\n", format!("{}:", name), value));
        }
    };

    field("Id", task.id.clone());
    field("Status", task.status.as_str().to_string());
    field("Category", category_label(task, categories, tty));
    field("Section", task.section.clone());
    field("Tags", task.tags.join(", "));
    if task.priority != Priority::None {
        field("Priority", task.priority.as_str().to_string());
    }
    if task.is_repeating() {
        field("Repeat", task.repeat.as_str().to_string());
        field("Streak", task.streak.to_string());
    }
    field("Due", task.due_date.map(|d| d.format("%Y-%m-%d (%a)").to_string()).unwrap_or_default());
    field("Reminder", task.reminder_at.map(|r| r.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default());
    field("Completed", task.last_completed_at.map(|c| c.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default());
    if task.is_in_my_day(today) {
        field("My Day", "yes".to_string());
    }
    field("Created", task.created_at.format("%Y-%m-%d %H:%M").to_string());
    field("Notes", task.notes.clone());

    if !task.checklist.is_empty() {
        out.push_str("  Checklist:\n");
        for (i, item) in task.checklist.iter().enumerate() {
            let mark = if item.done { "[x]" } else { "[ ]" };
            out.push_str(&format!("    {}. {} {}\n", i + 1, mark, item.text));
        }
    }

    out
}

/// Seven-day view starting at `week_start`
pub fn format_week(rows: &[(usize, &Task)], week_start: NaiveDate, today: NaiveDate, tty: bool) -> String {
    let mut out = String::new();
    out.push_str(&paint(&format!("Week of {}", week_start.format("%Y-%m-%d")), Some(ANSI_BOLD), tty));
    out.push('\n');

    for offset in 0..7 {
        let day = week_start + Duration::days(offset);
        let heading = format!("{} {}", day.format("%a"), day.format("%m-%d"));
        let heading = if day == today { format!("{} (today)", heading) } else { heading };
        out.push_str(&paint(&heading, if day == today { Some(ANSI_FG_CYAN) } else { None }, tty));
        out.push('\n');

        let mut any = false;
        for (position, task) in rows.iter().filter(|(_, t)| t.due_date == Some(day)) {
            any = true;
            out.push_str(&format!(
                "  {:>3} {} {}\n",
                position,
                status_marker(task.status),
                task.title
            ));
        }
        if !any {
            out.push_str(&paint("  -", Some(ANSI_DIM), tty));
            out.push('\n');
        }
    }

    out
}

/// Habit overview: streak and the last seven days of completions
pub fn format_habits(rows: &[(usize, &Task)], today: NaiveDate, tty: bool) -> String {
    let mut out = String::new();
    let days: Vec<NaiveDate> = (0..7).rev().map(|i| today - Duration::days(i)).collect();
    let day_header: String = days
        .iter()
        .map(|d| d.weekday().to_string().chars().next().unwrap_or(' '))
        .collect();

    let header = format!("{} {} {} {} {}", pad("#", 3), pad("Habit", 30), pad("Every", 8), pad("Streak", 6), day_header);
    out.push_str(&paint(&header, Some(ANSI_BOLD), tty));
    out.push('\n');

    for (position, task) in rows {
        let history: String = days
            .iter()
            .map(|d| if task.completed_on(*d) { '#' } else { '.' })
            .collect();
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            pad(&position.to_string(), 3),
            pad(&truncate(&task.title, 30), 30),
            pad(task.repeat.as_str(), 8),
            pad(&task.streak.to_string(), 6),
            paint(&history, Some(ANSI_FG_GREEN), tty)
        ));
    }

    out
}

/// Upcoming reminder timers
pub fn format_reminders(timers: &[&Timer]) -> String {
    let mut out = String::new();
    for timer in timers {
        out.push_str(&format!("  {}  {}\n", timer.fire_at.format("%Y-%m-%d %H:%M"), timer.title));
    }
    out
}
