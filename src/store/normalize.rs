//! Normalization of persisted and imported task records
//!
//! Older records lack fields added later, carry `null` where a list is now
//! expected, use numeric ids, or store instants as UTC ISO strings. Every
//! record passes through here before it is deserialized into a `Task`.

use chrono::{DateTime, Local};
use serde_json::{json, Map, Value};
use crate::models::Task;

const INSTANT_FIELDS: &[&str] = &["reminderAt", "lastCompletedAt", "createdAt"];

fn defaults() -> [(&'static str, Value); 12] {
    [
        ("tags", json!([])),
        ("repeat", json!("none")),
        ("checklist", json!([])),
        ("reminderAt", Value::Null),
        ("myDay", json!([])),
        ("lastCompletedAt", Value::Null),
        ("streak", json!(0)),
        ("completedDates", json!([])),
        ("section", json!("")),
        ("notes", json!("")),
        ("priority", json!("none")),
        ("status", json!("todo")),
    ]
}

/// Normalize a single record and decode it
pub fn normalize_record(value: Value) -> Result<Task, serde_json::Error> {
    let value = match value {
        Value::Object(mut map) => {
            fill_defaults(&mut map);
            stringify_id(&mut map);
            if let Some(Value::Array(items)) = map.get_mut("checklist") {
                for item in items.iter_mut() {
                    if let Value::Object(item) = item {
                        stringify_id(item);
                    }
                }
            }
            normalize_due_date(&mut map);
            for field in INSTANT_FIELDS {
                normalize_instant(&mut map, field);
            }
            Value::Object(map)
        }
        other => other,
    };
    serde_json::from_value(value)
}

/// Strict: all records must normalize, and the document must be an array
///
/// Used for imports, which are all-or-nothing.
pub fn normalize_records(value: Value) -> Option<Vec<Task>> {
    match value {
        Value::Array(records) => records
            .into_iter()
            .map(|record| normalize_record(record).ok())
            .collect(),
        _ => None,
    }
}

/// Lenient: undecodable records are skipped and logged
///
/// Used when loading the local store so one bad record does not hide the rest.
pub fn load_records(value: Value) -> Vec<Task> {
    let Value::Array(records) = value else {
        log::warn!("stored task collection is not an array, starting empty");
        return Vec::new();
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match normalize_record(record) {
            Ok(task) => Some(task),
            Err(e) => {
                log::warn!("skipping stored task #{}: {}", index, e);
                None
            }
        })
        .collect()
}

fn fill_defaults(map: &mut Map<String, Value>) {
    for (key, default) in defaults() {
        let missing = map.get(key).map(Value::is_null).unwrap_or(true);
        if missing {
            map.insert(key.to_string(), default);
        }
    }
}

fn stringify_id(map: &mut Map<String, Value>) {
    if let Some(Value::Number(n)) = map.get("id") {
        let id = n.to_string();
        map.insert("id".to_string(), Value::String(id));
    }
}

/// Reduce datetime-shaped due dates to their calendar date
fn normalize_due_date(map: &mut Map<String, Value>) {
    let Some(Value::String(raw)) = map.get("dueDate") else {
        return;
    };
    if raw.len() <= 10 {
        return;
    }
    let date = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Local).date_naive().format("%Y-%m-%d").to_string(),
        Err(_) => raw.chars().take(10).collect(),
    };
    map.insert("dueDate".to_string(), Value::String(date));
}

/// Convert zoned instants (`...Z`, `+02:00`) to local wall-clock time
fn normalize_instant(map: &mut Map<String, Value>, field: &str) {
    let Some(Value::String(raw)) = map.get(field) else {
        return;
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let local = dt.with_timezone(&Local).naive_local();
        map.insert(field.to_string(), Value::String(local.format("%Y-%m-%dT%H:%M:%S").to_string()));
    }
}
