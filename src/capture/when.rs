//! Due-date and reminder extraction for quick capture
//!
//! `today`, `tomorrow` and `next <weekday>` resolve forward; a bare weekday
//! resolves backwards starting at yesterday. Reminders come from a
//! `remind [at] [today|tomorrow] <time|date>` phrase.

use std::sync::LazyLock;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use regex::Regex;
use crate::utils::start_of_week;

/// Hour used when a reminder names a date but no time
pub const DEFAULT_REMINDER_HOUR: u32 = 9;

static TODAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btoday\b").unwrap());

static TOMORROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btomorrow\b").unwrap());

static NEXT_WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bnext\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b").unwrap()
});

static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b").unwrap()
});

static REMINDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bremind(?:\s+at)?(?:\s+(?P<day>today|tomorrow))?\s+(?P<slot>(?P<date>\d{4}-\d{2}-\d{2})|(?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?\s*(?P<meridiem>am|pm)?)\b",
    )
    .unwrap()
});

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// `weekday` in the ISO week after the one containing `today`
pub fn next_week_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    start_of_week(today) + Duration::days(7 + weekday.num_days_from_monday() as i64)
}

/// Most recent `weekday` on or before yesterday
pub fn previous_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let from = today.weekday().num_days_from_monday() as i64;
    let to = weekday.num_days_from_monday() as i64;
    // Always in 1..=7
    let days_back = (from - to - 1).rem_euclid(7) + 1;
    today - Duration::days(days_back)
}

/// Due date named in the input, checked as today, tomorrow, next weekday, weekday
pub fn extract_due_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    if TODAY_RE.is_match(input) {
        return Some(today);
    }
    if TOMORROW_RE.is_match(input) {
        return Some(today + Duration::days(1));
    }
    if let Some(caps) = NEXT_WEEKDAY_RE.captures(input) {
        let weekday = weekday_from_name(&caps[1])?;
        return Some(next_week_weekday(today, weekday));
    }
    if let Some(caps) = WEEKDAY_RE.captures(input) {
        let weekday = weekday_from_name(&caps[1])?;
        return Some(previous_weekday(today, weekday));
    }
    None
}

/// Reminder instant from a `remind ...` phrase; `None` when absent or unparseable
pub fn extract_reminder(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = REMINDER_RE.captures(input)?;
    let today = now.date();

    // "10:75" must not degrade to "10"
    let slot_end = caps.name("slot")?.end();
    if input[slot_end..].starts_with(':') {
        return None;
    }

    if let Some(date) = caps.name("date") {
        let date = NaiveDate::parse_from_str(date.as_str(), "%Y-%m-%d").ok()?;
        return date.and_hms_opt(DEFAULT_REMINDER_HOUR, 0, 0);
    }

    let mut hour: u32 = caps.name("hour")?.as_str().parse().ok()?;
    let minute: u32 = match caps.name("minute") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match caps.name("meridiem").map(|m| m.as_str().to_lowercase()) {
        Some(ref m) if m == "am" && hour == 12 => hour = 0,
        Some(ref m) if m == "pm" && (1..=11).contains(&hour) => hour += 12,
        _ => {}
    }

    let day = match caps.name("day").map(|d| d.as_str().to_lowercase()) {
        Some(ref d) if d == "tomorrow" => today + Duration::days(1),
        _ => today,
    };

    // and_hms_opt rejects hour > 23 and minute > 59
    day.and_hms_opt(hour, minute, 0)
}

/// Remove the reminder phrase from capture text
pub fn strip_reminder(text: &str) -> String {
    REMINDER_RE.replace_all(text, " ").into_owned()
}

/// Remove relative-date words (today, tomorrow, weekdays) from capture text
pub fn strip_date_words(text: &str) -> String {
    let mut out = NEXT_WEEKDAY_RE.replace_all(text, " ").into_owned();
    for re in [&*WEEKDAY_RE, &*TODAY_RE, &*TOMORROW_RE] {
        out = re.replace_all(&out, " ").into_owned();
    }
    out
}
