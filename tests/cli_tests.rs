use chrono::{Duration, Local};
use predicates::prelude::*;
use test_env::TestEnv;

fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}

#[test]
fn test_add_parses_capture_text() {
    let env = TestEnv::new();
    env.cmd()
        .args(["add", "Pay rent tomorrow #work !high @money"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task 1: Pay rent"));

    let tasks = env.tasks();
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task["title"], "Pay rent");
    assert_eq!(task["category"], "work");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["tags"], serde_json::json!(["money"]));
    let tomorrow = (today() + Duration::days(1)).format("%Y-%m-%d").to_string();
    assert_eq!(task["dueDate"], tomorrow.as_str());
}

#[test]
fn test_add_words_without_quotes() {
    let env = TestEnv::new();
    env.run(&["add", "Water", "plants", "daily", "#health"]);
    let tasks = env.tasks();
    assert_eq!(tasks[0]["title"], "Water plants");
    assert_eq!(tasks[0]["repeat"], "daily");
    assert_eq!(tasks[0]["category"], "health");
}

#[test]
fn test_add_markers_only_is_noop() {
    let env = TestEnv::new();
    env.cmd()
        .args(["add", "#work !high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to capture."));
    assert!(env.tasks().is_empty());
}

#[test]
fn test_list_newest_first_and_hides_done() {
    let env = TestEnv::new();
    env.run(&["add", "first"]);
    env.run(&["add", "second"]);
    env.run(&["done", "2"]);

    let out = env.run(&["list"]);
    assert!(out.contains("second"));
    assert!(!out.contains("first"));

    let out = env.run(&["list", "--all"]);
    let second = out.find("second").unwrap();
    let first = out.find("first").unwrap();
    assert!(second < first);
}

#[test]
fn test_list_category_filter_and_suggestion() {
    let env = TestEnv::new();
    env.run(&["add", "Report #work"]);
    env.run(&["add", "Run #health"]);

    let out = env.run(&["list", "--category", "Work"]);
    assert!(out.contains("Report"));
    assert!(!out.contains("Run"));

    env.cmd()
        .args(["list", "--category", "wrok"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Did you mean 'work'?"));
}

#[test]
fn test_done_toggles_plain_task() {
    let env = TestEnv::new();
    env.run(&["add", "Buy milk"]);
    env.cmd()
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed task 1: Buy milk"));
    assert_eq!(env.tasks()[0]["status"], "done");

    env.cmd()
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened"));
    assert_eq!(env.tasks()[0]["status"], "todo");
}

#[test]
fn test_done_rolls_repeating_task_over() {
    let env = TestEnv::new();
    env.run(&["add", "Stretch daily #health"]);
    env.cmd()
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("streak 1"));

    let task = &env.tasks()[0];
    assert_eq!(task["status"], "todo");
    assert_eq!(task["streak"], 1);
    let tomorrow = (today() + Duration::days(1)).format("%Y-%m-%d").to_string();
    assert_eq!(task["dueDate"], tomorrow.as_str());
    assert_eq!(task["completedDates"], serde_json::json!([today().format("%Y-%m-%d").to_string()]));
}

#[test]
fn test_unknown_reference_is_user_error() {
    let env = TestEnv::new();
    env.run(&["add", "only task"]);
    env.cmd()
        .args(["done", "7"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Task not found: 7"));
}

#[test]
fn test_modify_fields_and_tags() {
    let env = TestEnv::new();
    env.run(&["add", "Draft slides @old"]);
    env.run(&["modify", "1", "priority=medium", "+talk", "-old", "due=2030-01-15", "section=Conference"]);

    let task = &env.tasks()[0];
    assert_eq!(task["priority"], "medium");
    assert_eq!(task["tags"], serde_json::json!(["talk"]));
    assert_eq!(task["dueDate"], "2030-01-15");
    assert_eq!(task["section"], "Conference");
    assert_eq!(task["title"], "Draft slides");
}

#[test]
fn test_modify_typo_suggests_field() {
    let env = TestEnv::new();
    env.run(&["add", "Something"]);
    env.cmd()
        .args(["modify", "1", "priorty=high"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Did you mean 'priority'?"));
}

#[test]
fn test_move_and_week_view() {
    let env = TestEnv::new();
    env.run(&["add", "Dentist"]);
    env.run(&["move", "1", "today"]);
    assert_eq!(env.tasks()[0]["dueDate"], today().format("%Y-%m-%d").to_string().as_str());

    env.cmd()
        .args(["week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(today)"))
        .stdout(predicate::str::contains("Dentist"));

    env.cmd()
        .args(["week", "--offset", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dentist").not());
}

#[test]
fn test_out_of_range_dates_are_user_errors() {
    let env = TestEnv::new();
    env.run(&["add", "Dentist"]);

    env.cmd()
        .args(["move", "1", "+999999999d"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported date expression"));

    env.cmd()
        .args(["week", "--offset", "99999999999"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Week offset out of range"));

    env.cmd()
        .args(["week", "--offset", "-99999999999"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_myday_and_today() {
    let env = TestEnv::new();
    env.run(&["add", "Focus task"]);
    env.run(&["add", "Someday task"]);
    env.cmd()
        .args(["myday", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added to My Day: Focus task"));

    let out = env.run(&["today"]);
    assert!(out.contains("Focus task"));
    assert!(!out.contains("Someday task"));

    env.cmd()
        .args(["myday", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed from My Day"));
}

#[test]
fn test_checklist_and_notes() {
    let env = TestEnv::new();
    env.run(&["add", "Pack for trip"]);
    env.run(&["check", "1", "add", "passport"]);
    env.run(&["check", "1", "add", "charger"]);
    env.cmd()
        .args(["check", "1", "toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1/2)"));
    env.run(&["check", "1", "remove", "2"]);
    env.run(&["notes", "1", "flight", "at", "noon"]);

    let task = &env.tasks()[0];
    assert_eq!(task["checklist"].as_array().unwrap().len(), 1);
    assert_eq!(task["checklist"][0]["text"], "passport");
    assert_eq!(task["checklist"][0]["done"], true);
    assert_eq!(task["notes"], "flight at noon");

    env.cmd()
        .args(["check", "1", "toggle", "5"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_delete_then_undo() {
    let env = TestEnv::new();
    env.run(&["add", "keep me"]);
    env.run(&["add", "delete me"]);
    env.cmd()
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task: delete me"));
    assert_eq!(env.tasks().len(), 1);

    env.cmd()
        .args(["undo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored task 1: delete me"));
    assert_eq!(env.tasks()[0]["title"], "delete me");

    env.cmd()
        .args(["undo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo."));
}

#[test]
fn test_undo_after_window_is_noop() {
    let env = TestEnv::with_rc("undo.seconds=0\n");
    env.run(&["add", "gone"]);
    env.run(&["delete", "1"]);
    std::thread::sleep(std::time::Duration::from_millis(1100));
    env.cmd()
        .args(["undo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo."));
    assert!(env.tasks().is_empty());
}

#[test]
fn test_export_import_round_trip() {
    let env = TestEnv::new();
    env.run(&["add", "Alpha #work"]);
    env.run(&["add", "Beta weekly"]);
    let export_path = env.path("backup.json");
    env.cmd()
        .args(["export", "--output", export_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 task(s)"));
    let before = env.tasks();

    env.run(&["delete", "1"]);
    env.run(&["import", export_path.to_str().unwrap()]);
    assert_eq!(env.tasks(), before);
}

#[test]
fn test_export_default_file_name() {
    let env = TestEnv::new();
    env.run(&["add", "Alpha"]);
    env.run(&["export"]);
    let name = format!("tasks-{}.json", today().format("%Y-%m-%d"));
    assert!(env.path(&name).exists());
}

#[test]
fn test_malformed_import_is_ignored() {
    let env = TestEnv::new();
    env.run(&["add", "Survivor"]);
    let bad = env.path("bad.json");
    std::fs::write(&bad, "{\"tasks\": []}").unwrap();
    env.cmd()
        .args(["import", bad.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(env.tasks().len(), 1);
}

#[test]
fn test_habits_view() {
    let env = TestEnv::new();
    env.run(&["add", "Read weekly #learning"]);
    env.run(&["add", "One-off"]);
    let out = env.run(&["habits"]);
    assert!(out.contains("Read"));
    assert!(out.contains("weekly"));
    assert!(!out.contains("One-off"));
}

#[test]
fn test_reminders_listing() {
    let env = TestEnv::new();
    env.run(&["add", "Call Sam"]);
    env.run(&["modify", "1", "remind=2099-05-01T10:30"]);
    env.cmd()
        .args(["reminders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2099-05-01 10:30  Call Sam"));

    env.run(&["done", "1"]);
    env.cmd()
        .args(["reminders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No upcoming reminders."));
}

#[test]
fn test_reminders_respect_notifications_switch() {
    let env = TestEnv::with_rc("notifications=off\n");
    env.run(&["add", "Call Sam"]);
    env.run(&["modify", "1", "remind=2099-05-01T10:30"]);
    env.cmd()
        .args(["reminders"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notifications are off"));
}

#[test]
fn test_custom_categories_and_templates() {
    let env = TestEnv::with_rc(
        "category.errands=Errands,cyan\ncategory.home=Home\ntemplate.weekend=Groceries #errands; Clean kitchen #home\n",
    );
    let out = env.run(&["categories"]);
    assert!(out.contains("errands"));
    assert!(!out.contains("Personal"));

    env.cmd()
        .args(["templates", "apply", "weekend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 2 task(s)"));
    let tasks = env.tasks();
    assert_eq!(tasks[0]["title"], "Groceries");
    assert_eq!(tasks[0]["category"], "errands");
    assert_eq!(tasks[1]["title"], "Clean kitchen");

    env.cmd()
        .args(["templates", "apply", "weekned"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you mean 'weekend'?"));
}

#[test]
fn test_command_abbreviation_and_implicit_show() {
    let env = TestEnv::new();
    env.run(&["add", "Abbreviated"]);
    env.cmd()
        .args(["sh", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1: Abbreviated"));
    env.cmd()
        .args(["1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1: Abbreviated"));
    env.cmd()
        .args(["d", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ambiguous command"));
}

#[test]
fn test_show_by_id_prefix() {
    let env = TestEnv::new();
    env.run(&["add", "Prefixed"]);
    let id = env.tasks()[0]["id"].as_str().unwrap().to_string();
    env.cmd()
        .args(["show", &id[..6]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prefixed"));
}
