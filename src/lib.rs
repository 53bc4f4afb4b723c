//! Taskpad - quick-capture task manager with habits and reminders
//!
//! This library provides the core functionality for Taskpad, including:
//! - Natural-language capture of tasks (category, tags, priority, dates, reminders)
//! - Recurrence and habit streak tracking on completion
//! - A JSON task collection persisted in a SQLite key-value table, with undo
//! - Reminder scheduling and delivery
//! - CLI command parsing and execution
//!
//! # Example
//!
//! ```no_run
//! use taskpad::cli::run;
//!
//! fn main() {
//!     if let Err(e) = run() {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod capture;
pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod recur;
pub mod reminders;
pub mod store;
pub mod utils;
