use chrono::{NaiveDate, NaiveDateTime};
use taskpad::models::{Repeat, Task, TaskStatus};
use taskpad::recur::{advance, cadence_delta, toggle_completion, CompletionOutcome};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(date: NaiveDate, h: u32) -> NaiveDateTime {
    date.and_hms_opt(h, 0, 0).unwrap()
}

fn habit(repeat: Repeat, due: Option<NaiveDate>) -> Task {
    let mut task = Task::new("Habit".to_string(), "health".to_string(), at(day(2026, 1, 1), 8));
    task.repeat = repeat;
    task.due_date = due;
    task
}

#[test]
fn test_monthly_clamps_to_month_end() {
    assert_eq!(advance(Repeat::Monthly, day(2026, 1, 31)), day(2026, 2, 28));
    assert_eq!(advance(Repeat::Monthly, day(2028, 1, 31)), day(2028, 2, 29));
    assert_eq!(advance(Repeat::Monthly, day(2026, 12, 15)), day(2027, 1, 15));
    assert_eq!(advance(Repeat::Yearly, day(2028, 2, 29)), day(2029, 2, 28));
}

#[test]
fn test_weekly_delta_uses_monday_weeks() {
    // Sunday to the following Monday is one week apart
    assert_eq!(cadence_delta(Repeat::Weekly, day(2026, 10, 18), day(2026, 10, 19)), 1);
    // Monday to Sunday of the same week
    assert_eq!(cadence_delta(Repeat::Weekly, day(2026, 10, 12), day(2026, 10, 18)), 0);
    assert_eq!(cadence_delta(Repeat::Monthly, day(2026, 10, 31), day(2026, 11, 1)), 1);
    assert_eq!(cadence_delta(Repeat::Yearly, day(2026, 12, 31), day(2028, 1, 1)), 2);
}

#[test]
fn test_streak_across_a_week_of_daily_completions() {
    let mut task = habit(Repeat::Daily, Some(day(2026, 10, 10)));
    for offset in 0..5 {
        let when = at(day(2026, 10, 10) + chrono::Duration::days(offset), 7);
        task = toggle_completion(&task, when).task;
    }
    assert_eq!(task.streak, 5);
    assert_eq!(task.due_date, Some(day(2026, 10, 15)));
    assert_eq!(task.completed_dates.len(), 5);
    assert_eq!(task.status, TaskStatus::Todo);

    // Skipping two days resets
    let task = toggle_completion(&task, at(day(2026, 10, 17), 7)).task;
    assert_eq!(task.streak, 1);
}

#[test]
fn test_monthly_habit_outcome() {
    let task = habit(Repeat::Monthly, Some(day(2026, 1, 31)));
    let completion = toggle_completion(&task, at(day(2026, 2, 2), 9));
    assert_eq!(
        completion.outcome,
        CompletionOutcome::RolledOver { next_due: day(2026, 2, 28), streak: 1 }
    );
    assert_eq!(completion.task.last_completed_at, Some(at(day(2026, 2, 2), 9)));
}
