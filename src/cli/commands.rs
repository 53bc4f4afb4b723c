use std::path::{Path, PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use chrono::{Local, NaiveDate, NaiveDateTime};
use anyhow::{Context, Result};
use crate::capture::parse;
use crate::cli::abbrev;
use crate::cli::error::{user_error, validate_item_number, validate_non_empty};
use crate::cli::output::{
    color_name_to_fg, format_habits, format_reminders, format_task_summary, format_task_table,
    format_week, get_terminal_width, is_tty,
};
use crate::cli::parser::parse_modify_args;
use crate::config::Config;
use crate::models::{ChecklistItem, Task, TaskStatus};
use crate::recur::CompletionOutcome;
use crate::reminders::{deliver_due, ConsoleNotifier, ReminderScheduler};
use crate::store::{export_file_name, SqliteBlobStore, TaskStore};
use crate::utils::{fuzzy, parse_date_expr, shifted_week_start};

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(about = "Taskpad - quick-capture tasks, habits and reminders from the command line")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a task from free text (e.g. "Call mom tomorrow #personal !high")
    Add {
        /// Capture text with inline #category, @tags, !priority, >section, repeat and date words
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        text: Vec<String>,
    },
    /// List tasks
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Only tasks in this category (id or name)
        #[arg(short, long)]
        category: Option<String>,
        /// Include done tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Show detailed summary of a task
    Show {
        /// List position or id prefix
        target: String,
    },
    /// Toggle completion (repeating tasks roll over to their next occurrence)
    Done {
        /// List position or id prefix
        target: String,
    },
    /// Mark a task in progress
    Start {
        /// List position or id prefix
        target: String,
    },
    /// Modify a task
    Modify {
        /// List position or id prefix
        target: String,
        /// Modifications: field=value, +tag, -tag, or new title words
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Move a task to another day
    Move {
        /// List position or id prefix
        target: String,
        /// Date expression (yyyy-mm-dd, today, tomorrow, +Nd, none)
        date: String,
    },
    /// Show the week view
    Week {
        /// Weeks relative to the current one
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
    /// Show My Day plus overdue and due-today tasks
    Today,
    /// Add a task to My Day, or remove it
    Myday {
        /// List position or id prefix
        target: String,
    },
    /// Edit a task's checklist
    Check {
        /// List position or id prefix
        target: String,
        /// Checklist action
        action: CheckAction,
        /// Item text for add, item number for toggle and remove
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Replace a task's notes (no text clears them)
    Notes {
        /// List position or id prefix
        target: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Delete a task (undoable for a few seconds)
    Delete {
        /// List position or id prefix
        target: String,
    },
    /// Restore the most recently deleted task
    Undo,
    /// Show repeating tasks with streaks and recent history
    Habits,
    /// Export all tasks as JSON
    Export {
        /// Output file (defaults to tasks-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all tasks from an exported JSON file
    Import {
        file: PathBuf,
    },
    /// List upcoming reminders
    Reminders,
    /// Stay running and deliver reminders as they come due
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// List configured categories
    Categories,
    /// Capture templates
    Templates {
        #[command(subcommand)]
        subcommand: TemplateCommands,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CheckAction {
    Add,
    Toggle,
    Remove,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List templates from the rc file
    List,
    /// Capture every line of a template
    Apply {
        name: String,
    },
}

pub fn run() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    args = match abbrev::expand_command_abbreviations(args) {
        Ok(expanded) => expanded,
        Err(e) => user_error(&e),
    };

    // Implicit default: `taskpad 3` shows task 3
    if args.len() == 1 && args[0].parse::<usize>().is_ok() {
        args.insert(0, "show".to_string());
    }

    let clap_args = std::iter::once("taskpad".to_string()).chain(args);
    let cli = match Cli::try_parse_from(clap_args) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let config = Config::load()?;
    handle_command(cli, &config)
}

fn handle_command(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Commands::Add { text } => handle_add(config, text),
        Commands::List { json, category, all } => handle_list(config, json, category, all),
        Commands::Show { target } => handle_show(config, &target),
        Commands::Done { target } => handle_done(config, &target),
        Commands::Start { target } => handle_start(config, &target),
        Commands::Modify { target, args } => handle_modify(config, &target, args),
        Commands::Move { target, date } => handle_move(config, &target, &date),
        Commands::Week { offset } => handle_week(config, offset),
        Commands::Today => handle_today(config),
        Commands::Myday { target } => handle_myday(config, &target),
        Commands::Check { target, action, args } => handle_check(config, &target, action, args),
        Commands::Notes { target, text } => handle_notes(config, &target, text),
        Commands::Delete { target } => handle_delete(config, &target),
        Commands::Undo => handle_undo(config),
        Commands::Habits => handle_habits(config),
        Commands::Export { output } => handle_export(config, output),
        Commands::Import { file } => handle_import(config, &file),
        Commands::Reminders => handle_reminders(config),
        Commands::Watch { interval } => handle_watch(config, interval),
        Commands::Categories => handle_categories(config),
        Commands::Templates { subcommand } => match subcommand {
            TemplateCommands::List => handle_templates_list(config),
            TemplateCommands::Apply { name } => handle_templates_apply(config, &name),
        },
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn open_store(config: &Config) -> Result<TaskStore<SqliteBlobStore>> {
    let blob = SqliteBlobStore::open(&config.data_location)
        .context("Failed to open task database")?;
    let mut store = TaskStore::open(blob, config.undo_window);
    if store.expire_undo(now())? {
        log::debug!("cleared expired undo slot");
    }
    Ok(store)
}

/// Tasks paired with their 1-based list position
fn numbered(tasks: &[Task]) -> Vec<(usize, &Task)> {
    tasks.iter().enumerate().map(|(i, t)| (i + 1, t)).collect()
}

fn position_of(store: &TaskStore<SqliteBlobStore>, id: &str) -> usize {
    store.position(id).map(|p| p + 1).unwrap_or(0)
}

fn describe_capture(task: &Task) -> String {
    let mut parts = vec![format!("#{}", task.category)];
    if !task.section.is_empty() {
        parts.push(format!(">{}", task.section));
    }
    parts.extend(task.tags.iter().map(|t| format!("@{}", t)));
    if task.priority != crate::models::Priority::None {
        parts.push(format!("!{}", task.priority.as_str()));
    }
    if task.is_repeating() {
        parts.push(task.repeat.as_str().to_string());
    }
    if let Some(due) = task.due_date {
        parts.push(format!("due {}", due.format("%Y-%m-%d")));
    }
    if let Some(at) = task.reminder_at {
        parts.push(format!("remind {}", at.format("%Y-%m-%d %H:%M")));
    }
    parts.join(" ")
}

fn handle_add(config: &Config, text: Vec<String>) -> Result<()> {
    let now = now();
    let input = text.join(" ");
    let Some(task) = parse(&input, &config.categories, now).into_task(now) else {
        println!("Nothing to capture.");
        return Ok(());
    };

    let summary = format!("{} ({})", task.title, describe_capture(&task));
    let mut store = open_store(config)?;
    store.add(task)?;
    println!("Created task 1: {}", summary);
    Ok(())
}

fn handle_list(config: &Config, json: bool, category: Option<String>, all: bool) -> Result<()> {
    let store = open_store(config)?;

    let category_id = match category {
        Some(candidate) => match crate::models::find_category(&config.categories, &candidate) {
            Some(found) => Some(found.id.clone()),
            None => {
                let ids = config.categories.iter().map(|c| c.id.as_str());
                match fuzzy::suggest(&candidate, ids, 2) {
                    Some(s) => user_error(&format!("Unknown category '{}'. Did you mean '{}'?", candidate, s)),
                    None => user_error(&format!("Unknown category '{}'", candidate)),
                }
            }
        },
        None => None,
    };

    let rows: Vec<(usize, &Task)> = numbered(store.list())
        .into_iter()
        .filter(|(_, t)| all || !t.is_done())
        .filter(|(_, t)| category_id.as_ref().map_or(true, |c| &t.category == c))
        .collect();

    if json {
        let tasks: Vec<&Task> = rows.iter().map(|(_, t)| *t).collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    let today = now().date();
    print!("{}", format_task_table(&rows, &config.categories, today, is_tty(), get_terminal_width()));
    Ok(())
}

fn handle_show(config: &Config, target: &str) -> Result<()> {
    let store = open_store(config)?;
    let id = store.resolve(target)?;
    if let Some(task) = store.get(&id) {
        let today = now().date();
        print!("{}", format_task_summary(position_of(&store, &id), task, &config.categories, today, is_tty()));
    }
    Ok(())
}

fn handle_done(config: &Config, target: &str) -> Result<()> {
    let mut store = open_store(config)?;
    let id = store.resolve(target)?;
    let outcome = store.toggle(&id, now())?;
    let position = position_of(&store, &id);
    let title = store.get(&id).map(|t| t.title.clone()).unwrap_or_default();

    match outcome {
        CompletionOutcome::Completed => println!("Completed task {}: {}", position, title),
        CompletionOutcome::Reopened => println!("Reopened task {}: {}", position, title),
        CompletionOutcome::RolledOver { next_due, streak } => println!(
            "Completed task {}: {} (next due {}, streak {})",
            position,
            title,
            next_due.format("%Y-%m-%d"),
            streak
        ),
    }
    Ok(())
}

fn handle_start(config: &Config, target: &str) -> Result<()> {
    let mut store = open_store(config)?;
    let id = store.resolve(target)?;
    let task = store.edit(&id, |task| task.status = TaskStatus::InProgress)?;
    println!("Started task: {}", task.title);
    Ok(())
}

fn handle_modify(config: &Config, target: &str, args: Vec<String>) -> Result<()> {
    let today = now().date();
    let parsed = match parse_modify_args(&args, &config.categories, today) {
        Ok(parsed) => parsed,
        Err(e) => user_error(&e.to_string()),
    };
    if parsed.is_empty() {
        user_error("No modifications given");
    }

    let mut store = open_store(config)?;
    let id = store.resolve(target)?;
    let patch = match store.get(&id) {
        Some(task) => parsed.into_patch(task),
        None => user_error(&format!("Task '{}' not found", target)),
    };
    let task = store.update(&id, patch)?;
    println!("Modified task: {}", task.title);
    Ok(())
}

fn handle_move(config: &Config, target: &str, date: &str) -> Result<()> {
    let today = now().date();
    let due = match parse_date_expr(date, today) {
        Ok(due) => due,
        Err(e) => user_error(&e.to_string()),
    };

    let mut store = open_store(config)?;
    let id = store.resolve(target)?;
    let task = store.reschedule(&id, due)?;
    match due {
        Some(due) => println!("Moved '{}' to {}", task.title, due.format("%a %Y-%m-%d")),
        None => println!("Cleared due date of '{}'", task.title),
    }
    Ok(())
}

fn handle_week(config: &Config, offset: i64) -> Result<()> {
    let store = open_store(config)?;
    let today = now().date();
    let week_start = match shifted_week_start(today, offset) {
        Some(week_start) => week_start,
        None => user_error("Week offset out of range"),
    };
    let rows = numbered(store.list());
    print!("{}", format_week(&rows, week_start, today, is_tty()));
    Ok(())
}

fn is_for_today(task: &Task, today: NaiveDate) -> bool {
    if task.is_done() {
        return false;
    }
    task.is_in_my_day(today) || task.due_date.map_or(false, |due| due <= today)
}

fn handle_today(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let today = now().date();
    let rows: Vec<(usize, &Task)> = numbered(store.list())
        .into_iter()
        .filter(|(_, t)| is_for_today(t, today))
        .collect();

    if rows.is_empty() {
        println!("Nothing planned for today.");
        return Ok(());
    }
    print!("{}", format_task_table(&rows, &config.categories, today, is_tty(), get_terminal_width()));
    Ok(())
}

fn handle_myday(config: &Config, target: &str) -> Result<()> {
    let mut store = open_store(config)?;
    let id = store.resolve(target)?;
    let today = now().date();
    let mut added = false;
    let task = store.edit(&id, |task| added = task.toggle_my_day(today))?;
    if added {
        println!("Added to My Day: {}", task.title);
    } else {
        println!("Removed from My Day: {}", task.title);
    }
    Ok(())
}

fn parse_item_number(args: &[String]) -> usize {
    match args.first().map(|a| a.parse::<usize>()) {
        Some(Ok(n)) => n,
        Some(Err(_)) => user_error(&format!("Invalid checklist item '{}'. Expected a number.", args[0])),
        None => user_error("Checklist item number is required"),
    }
}

fn handle_check(config: &Config, target: &str, action: CheckAction, args: Vec<String>) -> Result<()> {
    let mut store = open_store(config)?;
    let id = store.resolve(target)?;
    let len = store.get(&id).map(|t| t.checklist.len()).unwrap_or(0);

    match action {
        CheckAction::Add => {
            let text = args.join(" ");
            if let Err(e) = validate_non_empty(&text, "Checklist item") {
                user_error(&e);
            }
            let task = store.edit(&id, |task| task.checklist.push(ChecklistItem::new(text.trim().to_string())))?;
            let (done, total) = task.checklist_progress();
            println!("Added checklist item to '{}' ({}/{})", task.title, done, total);
        }
        CheckAction::Toggle => {
            let index = validate_item_number(parse_item_number(&args), len).unwrap_or_else(|e| user_error(&e));
            let task = store.edit(&id, |task| {
                let item = &mut task.checklist[index];
                item.done = !item.done;
            })?;
            let (done, total) = task.checklist_progress();
            println!("Toggled item {} of '{}' ({}/{})", index + 1, task.title, done, total);
        }
        CheckAction::Remove => {
            let index = validate_item_number(parse_item_number(&args), len).unwrap_or_else(|e| user_error(&e));
            let mut removed = String::new();
            let task = store.edit(&id, |task| removed = task.checklist.remove(index).text)?;
            println!("Removed '{}' from '{}'", removed, task.title);
        }
    }
    Ok(())
}

fn handle_notes(config: &Config, target: &str, text: Vec<String>) -> Result<()> {
    let mut store = open_store(config)?;
    let id = store.resolve(target)?;
    let notes = text.join(" ");
    let cleared = notes.trim().is_empty();
    let task = store.edit(&id, |task| task.notes = notes.trim().to_string())?;
    if cleared {
        println!("Cleared notes of '{}'", task.title);
    } else {
        println!("Updated notes of '{}'", task.title);
    }
    Ok(())
}

fn handle_delete(config: &Config, target: &str) -> Result<()> {
    let mut store = open_store(config)?;
    let id = store.resolve(target)?;
    let task = store.remove(&id, now())?;
    println!(
        "Deleted task: {} [{}] (run 'taskpad undo' within {}s to restore)",
        task.title,
        task.short_id(),
        config.undo_window.num_seconds()
    );
    Ok(())
}

fn handle_undo(config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    match store.undo(now())? {
        Some(task) => println!("Restored task 1: {}", task.title),
        None => println!("Nothing to undo."),
    }
    Ok(())
}

fn handle_habits(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let rows: Vec<(usize, &Task)> = numbered(store.list())
        .into_iter()
        .filter(|(_, t)| t.is_repeating())
        .collect();

    if rows.is_empty() {
        println!("No habits yet. Add one with a repeat word, e.g. 'taskpad add Stretch daily'.");
        return Ok(());
    }
    print!("{}", format_habits(&rows, now().date(), is_tty()));
    Ok(())
}

fn handle_export(config: &Config, output: Option<PathBuf>) -> Result<()> {
    let store = open_store(config)?;
    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(now().date())));
    let json = store.export_json()?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    println!("Exported {} task(s) to {}", store.list().len(), path.display());
    Ok(())
}

fn handle_import(config: &Config, file: &Path) -> Result<()> {
    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => user_error(&format!("Cannot read {}: {}", file.display(), e)),
    };

    let mut store = open_store(config)?;
    if store.import_json(&text)? {
        println!("Imported {} task(s)", store.list().len());
    }
    Ok(())
}

fn handle_reminders(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let mut scheduler = ReminderScheduler::new();
    scheduler.reschedule(store.list(), config.notifications, now());

    if !config.notifications {
        println!("Notifications are off (set notifications=on in the rc file).");
        return Ok(());
    }
    if scheduler.is_empty() {
        println!("No upcoming reminders.");
        return Ok(());
    }
    println!("Upcoming reminders:");
    print!("{}", format_reminders(&scheduler.pending()));
    Ok(())
}

fn handle_watch(config: &Config, interval: u64) -> Result<()> {
    let interval = std::time::Duration::from_secs(interval.max(1));
    let mut scheduler = ReminderScheduler::new();
    let mut notifier = ConsoleNotifier::new(std::io::stdout(), is_tty());
    let mut last_seen: Option<Vec<Task>> = None;

    println!("Watching reminders (Ctrl-C to stop)");
    loop {
        let now = now();
        let store = open_store(config)?;
        let tasks = store.list().to_vec();

        deliver_due(&mut scheduler, &tasks, now, &mut notifier)?;

        if last_seen.as_ref() != Some(&tasks) {
            let scheduled = scheduler.reschedule(&tasks, config.notifications, now);
            log::debug!("task set changed, {} reminder(s) scheduled", scheduled);
            last_seen = Some(tasks);
        }

        std::thread::sleep(interval);
    }
}

fn handle_categories(config: &Config) -> Result<()> {
    let tty = is_tty();
    for category in &config.categories {
        let name = match color_name_to_fg(&category.color) {
            Some(code) if tty => format!("{}{}\x1b[0m", code, category.name),
            _ => category.name.clone(),
        };
        println!("{:<12} {} ({})", category.id, name, category.color);
    }
    Ok(())
}

fn handle_templates_list(config: &Config) -> Result<()> {
    if config.templates.is_empty() {
        println!("No templates defined. Add 'template.<name>=line; line' to the rc file.");
        return Ok(());
    }
    for template in &config.templates {
        println!("{}:", template.name);
        for line in &template.lines {
            println!("  {}", line);
        }
    }
    Ok(())
}

fn handle_templates_apply(config: &Config, name: &str) -> Result<()> {
    let Some(template) = config.template(name) else {
        let names = config.templates.iter().map(|t| t.name.as_str());
        match fuzzy::suggest(name, names, 2) {
            Some(s) => user_error(&format!("Template '{}' not found. Did you mean '{}'?", name, s)),
            None => user_error(&format!("Template '{}' not found", name)),
        }
    };

    let tasks = template.expand(&config.categories, now());
    let count = tasks.len();
    let mut store = open_store(config)?;
    // Prepend in reverse so the list reads in template order
    for task in tasks.into_iter().rev() {
        store.add(task)?;
    }
    println!("Created {} task(s) from template '{}'", count, name);
    Ok(())
}
