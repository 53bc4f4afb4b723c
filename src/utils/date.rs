// Date expression parsing for manual edits (move, modify due=/remind=)

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use anyhow::{Context, Result};

/// Monday of the ISO week containing `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Monday of the week `offset` weeks away from the one containing `today`
///
/// `None` when any day of that week falls outside the representable range.
pub fn shifted_week_start(today: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let week_start = Duration::try_weeks(offset)
        .and_then(|delta| start_of_week(today).checked_add_signed(delta))?;
    week_start.checked_add_signed(Duration::days(6))?;
    Some(week_start)
}

/// Parse a date expression relative to `today`
///
/// Supported: `yyyy-mm-dd`, `today`, `tomorrow`, `yesterday`, `+Nd`, `-Nd`.
/// Returns `None` for `none` (clear the date).
pub fn parse_date_expr(expr: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
    let expr = expr.trim().to_lowercase();

    if let Ok(date) = NaiveDate::parse_from_str(&expr, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    match expr.as_str() {
        "none" | "" => return Ok(None),
        "today" => return Ok(Some(today)),
        "tomorrow" => return Ok(Some(today + Duration::days(1))),
        "yesterday" => return Ok(Some(today - Duration::days(1))),
        _ => {}
    }

    // Relative offsets: +3d, -1d
    if let Some(days) = expr.strip_suffix('d') {
        if days.starts_with('+') || days.starts_with('-') {
            let offset: i64 = days.parse()
                .with_context(|| format!("Invalid day offset: {}", expr))?;
            let date = Duration::try_days(offset)
                .and_then(|delta| today.checked_add_signed(delta))
                .ok_or_else(|| anyhow::anyhow!("Unsupported date expression: {}. Day offset out of range.", expr))?;
            return Ok(Some(date));
        }
    }

    anyhow::bail!("Unsupported date expression: {}. Use yyyy-mm-dd, today, tomorrow or +Nd.", expr)
}

/// Parse a reminder expression: `yyyy-mm-ddTHH:MM`, `yyyy-mm-dd HH:MM`, or `none`
pub fn parse_datetime_expr(expr: &str) -> Result<Option<NaiveDateTime>> {
    let expr = expr.trim();
    if expr.eq_ignore_ascii_case("none") || expr.is_empty() {
        return Ok(None);
    }

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(expr, format) {
            return Ok(Some(dt));
        }
    }

    // Date alone means the default reminder hour
    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        let nine = NaiveTime::from_hms_opt(9, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid time"))?;
        return Ok(Some(date.and_time(nine)));
    }

    anyhow::bail!("Unsupported reminder expression: {}. Use yyyy-mm-ddTHH:MM.", expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_of_week() {
        // 2026-10-16 is a Friday
        assert_eq!(start_of_week(day(2026, 10, 16)), day(2026, 10, 12));
        assert_eq!(start_of_week(day(2026, 10, 12)), day(2026, 10, 12));
        assert_eq!(start_of_week(day(2026, 10, 18)), day(2026, 10, 12));
    }

    #[test]
    fn test_shifted_week_start() {
        let today = day(2026, 10, 16);
        assert_eq!(shifted_week_start(today, 0), Some(day(2026, 10, 12)));
        assert_eq!(shifted_week_start(today, 1), Some(day(2026, 10, 19)));
        assert_eq!(shifted_week_start(today, -2), Some(day(2026, 9, 28)));
        assert_eq!(shifted_week_start(today, 99999999999), None);
        assert_eq!(shifted_week_start(today, -99999999999), None);
        assert_eq!(shifted_week_start(today, i64::MAX), None);
    }

    #[test]
    fn test_parse_date_expr() {
        let today = day(2026, 10, 16);
        assert_eq!(parse_date_expr("2026-11-01", today).unwrap(), Some(day(2026, 11, 1)));
        assert_eq!(parse_date_expr("tomorrow", today).unwrap(), Some(day(2026, 10, 17)));
        assert_eq!(parse_date_expr("+3d", today).unwrap(), Some(day(2026, 10, 19)));
        assert_eq!(parse_date_expr("-2d", today).unwrap(), Some(day(2026, 10, 14)));
        assert_eq!(parse_date_expr("none", today).unwrap(), None);
        assert!(parse_date_expr("someday", today).is_err());
    }

    #[test]
    fn test_huge_day_offset_is_an_error() {
        let today = day(2026, 10, 16);
        let err = parse_date_expr("+999999999d", today).unwrap_err();
        assert!(err.to_string().contains("Unsupported date expression"));
        assert!(parse_date_expr("+99999999999999d", today).is_err());
        assert!(parse_date_expr("-99999999999999d", today).is_err());
    }

    #[test]
    fn test_parse_datetime_expr() {
        let dt = parse_datetime_expr("2026-10-16T14:30").unwrap().unwrap();
        assert_eq!(dt, day(2026, 10, 16).and_hms_opt(14, 30, 0).unwrap());

        let dt = parse_datetime_expr("2026-10-16").unwrap().unwrap();
        assert_eq!(dt, day(2026, 10, 16).and_hms_opt(9, 0, 0).unwrap());

        assert_eq!(parse_datetime_expr("none").unwrap(), None);
        assert!(parse_datetime_expr("later").is_err());
    }
}
