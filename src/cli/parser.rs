// CLI parsing utilities for the modify command

use chrono::NaiveDate;
use crate::models::{find_category, Category, Priority, Repeat, Task, TaskStatus};
use crate::store::TaskPatch;
use crate::utils::fuzzy::suggest;
use crate::utils::{parse_date_expr, parse_datetime_expr};

/// Parsed `modify` arguments
#[derive(Debug, Default)]
pub struct ModifyArgs {
    /// Bare words; when present they replace the title
    pub title_words: Vec<String>,
    pub patch: TaskPatch,
    pub tags_add: Vec<String>,
    pub tags_remove: Vec<String>,
}

impl ModifyArgs {
    pub fn is_empty(&self) -> bool {
        self.title_words.is_empty()
            && self.patch.is_empty()
            && self.tags_add.is_empty()
            && self.tags_remove.is_empty()
    }

    /// Fold title words and tag edits into a patch against the current task
    pub fn into_patch(self, task: &Task) -> TaskPatch {
        let mut patch = self.patch;
        if !self.title_words.is_empty() {
            patch.title = Some(self.title_words.join(" "));
        }
        if !self.tags_add.is_empty() || !self.tags_remove.is_empty() {
            let mut tags: Vec<String> = task
                .tags
                .iter()
                .filter(|t| !self.tags_remove.contains(t))
                .cloned()
                .collect();
            for tag in self.tags_add {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
            patch.tags = Some(tags);
        }
        patch
    }
}

#[derive(Debug)]
pub enum FieldParseError {
    InvalidFieldName {
        field: String,
        suggestion: String,
    },
    ReadOnlyField {
        field: String,
        hint: String,
    },
    UnknownFieldToken {
        token: String,
    },
    InvalidValue {
        field: String,
        message: String,
    },
    InvalidTag {
        message: String,
    },
}

impl std::fmt::Display for FieldParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldParseError::InvalidFieldName { field, suggestion } => {
                write!(f, "Unrecognized field name '{}'\n  Did you mean '{}'?", field, suggestion)
            }
            FieldParseError::ReadOnlyField { field, hint } => {
                write!(f, "Field '{}' cannot be modified directly.\n  {}", field, hint)
            }
            FieldParseError::UnknownFieldToken { token } => {
                write!(f, "Unrecognized field token '{}'\n  If this is meant to be part of the title, remove the equals sign.", token)
            }
            FieldParseError::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
            FieldParseError::InvalidTag { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/// Valid field names (exact match only)
const FIELD_NAMES: &[&str] = &[
    "title",
    "category",
    "section",
    "priority",
    "repeat",
    "due",
    "remind",
    "status",
    "notes",
];

/// Fields that exist on a task but are maintained automatically
const READ_ONLY_FIELDS: &[&str] = &["id", "created", "streak", "completed"];

fn get_read_only_hint(field: &str) -> String {
    match field.to_lowercase().as_str() {
        "id" => "Task IDs are assigned automatically and cannot be changed.".to_string(),
        "created" => "Created timestamp is set automatically and cannot be changed.".to_string(),
        "streak" | "completed" => "Use 'taskpad done' to record a completion.".to_string(),
        _ => "This field is read-only.".to_string(),
    }
}

fn invalid(field: &str, message: String) -> FieldParseError {
    FieldParseError::InvalidValue { field: field.to_string(), message }
}

fn parse_category(value: &str, categories: &[Category]) -> Result<String, FieldParseError> {
    if let Some(category) = find_category(categories, value) {
        return Ok(category.id.clone());
    }
    let known = categories.iter().map(|c| c.id.as_str());
    let message = match suggest(value, known, 2) {
        Some(suggestion) => format!("unknown category '{}'. Did you mean '{}'?", value, suggestion),
        None => format!(
            "unknown category '{}'. Known categories: {}",
            value,
            categories.iter().map(|c| c.id.as_str()).collect::<Vec<_>>().join(", ")
        ),
    };
    Err(invalid("category", message))
}

fn apply_field(
    patch: &mut TaskPatch,
    field: &str,
    value: &str,
    categories: &[Category],
    today: NaiveDate,
) -> Result<(), FieldParseError> {
    let none = value.is_empty() || value.eq_ignore_ascii_case("none");
    match field {
        "title" => {
            if value.trim().is_empty() {
                return Err(invalid(field, "title cannot be empty".to_string()));
            }
            patch.title = Some(value.to_string());
        }
        "category" => patch.category = Some(parse_category(value, categories)?),
        "section" => patch.section = Some(if none { String::new() } else { value.to_string() }),
        "notes" => patch.notes = Some(if none { String::new() } else { value.to_string() }),
        "priority" => {
            let priority = if none { Some(Priority::None) } else { Priority::from_str(value) };
            patch.priority = Some(priority.ok_or_else(|| {
                invalid(field, format!("'{}'. Expected high, medium, low or none", value))
            })?);
        }
        "repeat" => {
            let repeat = if none { Some(Repeat::None) } else { Repeat::from_str(value) };
            patch.repeat = Some(repeat.ok_or_else(|| {
                invalid(field, format!("'{}'. Expected daily, weekly, monthly, yearly or none", value))
            })?);
        }
        "status" => {
            let status = TaskStatus::from_str(value).ok_or_else(|| {
                invalid(field, format!("'{}'. Expected todo, in-progress or done", value))
            })?;
            patch.status = Some(status);
        }
        "due" => {
            let due = parse_date_expr(value, today).map_err(|e| invalid(field, e.to_string()))?;
            patch.due_date = Some(due);
        }
        "remind" => {
            let at = parse_datetime_expr(value).map_err(|e| invalid(field, e.to_string()))?;
            patch.reminder_at = Some(at);
        }
        _ => unreachable!("field names are checked against FIELD_NAMES"),
    }
    Ok(())
}

/// Parse a field token (field=value)
///
/// Returns `Ok(None)` when the token is not a field assignment.
fn parse_field_token(token: &str) -> Result<Option<(String, String)>, FieldParseError> {
    let Some((field, value)) = token.split_once('=') else {
        return Ok(None);
    };

    if READ_ONLY_FIELDS.iter().any(|f| f.eq_ignore_ascii_case(field)) {
        return Err(FieldParseError::ReadOnlyField {
            field: field.to_string(),
            hint: get_read_only_hint(field),
        });
    }

    if FIELD_NAMES.contains(&field) {
        return Ok(Some((field.to_string(), value.to_string())));
    }

    if let Some(suggestion) = suggest(field, FIELD_NAMES.iter().copied(), 3) {
        return Err(FieldParseError::InvalidFieldName {
            field: field.to_string(),
            suggestion: suggestion.to_string(),
        });
    }

    // Alphabetic left-hand side looks like an attempted field
    if field.len() >= 2 && field.chars().all(|c| c.is_ascii_alphabetic() || c == '_' || c == '.') {
        return Err(FieldParseError::UnknownFieldToken { token: token.to_string() });
    }

    Ok(None)
}

/// Parse a tag token (+tag or -tag)
fn parse_tag_token(token: &str) -> Result<Option<(bool, String)>, FieldParseError> {
    let (add, name) = if let Some(name) = token.strip_prefix('+') {
        (true, name)
    } else if let Some(name) = token.strip_prefix('-') {
        (false, name)
    } else {
        return Ok(None);
    };

    if name.is_empty() {
        return Err(FieldParseError::InvalidTag {
            message: "Tag name cannot be empty. Use '+tagname' to add a tag.".to_string(),
        });
    }
    if !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(FieldParseError::InvalidTag {
            message: format!("Invalid tag '{}'. Tags can only contain letters, numbers, underscores and hyphens.", name),
        });
    }
    Ok(Some((add, name.to_lowercase())))
}

/// Parse `modify` arguments
///
/// Field tokens, tag tokens and title words can appear in any order.
pub fn parse_modify_args(
    args: &[String],
    categories: &[Category],
    today: NaiveDate,
) -> Result<ModifyArgs, FieldParseError> {
    let mut parsed = ModifyArgs::default();

    for arg in args {
        if let Some((field, value)) = parse_field_token(arg)? {
            apply_field(&mut parsed.patch, &field, &value, categories, today)?;
            continue;
        }
        match parse_tag_token(arg)? {
            Some((true, tag)) => parsed.tags_add.push(tag),
            Some((false, tag)) => parsed.tags_remove.push(tag),
            None => parsed.title_words.push(arg.clone()),
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_categories;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_fields_and_tags() {
        let parsed = parse_modify_args(
            &args(&["priority=high", "+urgent", "due=tomorrow", "-old", "category=Work"]),
            &default_categories(),
            today(),
        )
        .unwrap();
        assert_eq!(parsed.patch.priority, Some(Priority::High));
        assert_eq!(parsed.patch.due_date, Some(NaiveDate::from_ymd_opt(2026, 10, 17)));
        assert_eq!(parsed.patch.category, Some("work".to_string()));
        assert_eq!(parsed.tags_add, vec!["urgent"]);
        assert_eq!(parsed.tags_remove, vec!["old"]);
        assert!(parsed.title_words.is_empty());
    }

    #[test]
    fn test_clear_values() {
        let parsed = parse_modify_args(&args(&["due=", "remind=none", "section="]), &default_categories(), today()).unwrap();
        assert_eq!(parsed.patch.due_date, Some(None));
        assert_eq!(parsed.patch.reminder_at, Some(None));
        assert_eq!(parsed.patch.section, Some(String::new()));
    }

    #[test]
    fn test_title_words_and_tag_merge() {
        let mut task = Task::new("old".to_string(), "work".to_string(), today().and_hms_opt(9, 0, 0).unwrap());
        task.tags = vec!["a".to_string(), "b".to_string()];
        let parsed = parse_modify_args(&args(&["new", "title", "+c", "-a", "+b"]), &default_categories(), today()).unwrap();
        let patch = parsed.into_patch(&task);
        assert_eq!(patch.title, Some("new title".to_string()));
        assert_eq!(patch.tags, Some(vec!["b".to_string(), "c".to_string()]));
    }

    #[test]
    fn test_typo_suggests_field() {
        match parse_modify_args(&args(&["priorty=high"]), &default_categories(), today()) {
            Err(FieldParseError::InvalidFieldName { field, suggestion }) => {
                assert_eq!(field, "priorty");
                assert_eq!(suggestion, "priority");
            }
            other => panic!("Expected InvalidFieldName, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_category_suggests() {
        let err = parse_modify_args(&args(&["category=wrok"]), &default_categories(), today()).unwrap_err();
        assert!(err.to_string().contains("Did you mean 'work'?"));
    }

    #[test]
    fn test_read_only_and_bad_values() {
        assert!(matches!(
            parse_modify_args(&args(&["streak=4"]), &default_categories(), today()),
            Err(FieldParseError::ReadOnlyField { .. })
        ));
        assert!(matches!(
            parse_modify_args(&args(&["priority=urgent"]), &default_categories(), today()),
            Err(FieldParseError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_modify_args(&args(&["+"]), &default_categories(), today()),
            Err(FieldParseError::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_time_words_stay_in_title() {
        let parsed = parse_modify_args(&args(&["call", "at", "09:00"]), &default_categories(), today()).unwrap();
        assert_eq!(parsed.title_words, vec!["call", "at", "09:00"]);
    }
}
