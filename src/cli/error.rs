// Error handling utilities for consistent error messages and exit codes

use std::process;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing tasks, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a 1-based checklist item number against the list length
pub fn validate_item_number(number: usize, len: usize) -> Result<usize, String> {
    if len == 0 {
        return Err("Task has no checklist items".to_string());
    }
    if number == 0 || number > len {
        return Err(format!("Invalid checklist item {}. Expected 1-{}.", number, len));
    }
    Ok(number - 1)
}
