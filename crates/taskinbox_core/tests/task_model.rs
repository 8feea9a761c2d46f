use chrono::{TimeZone, Utc};
use taskinbox_core::{format_timestamp, Task, TaskId, TaskValidationError};

#[test]
fn task_new_sets_defaults_and_trims_title() {
    let created_at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
    let task = Task::new(TaskId::new(1), "  Buy milk  ", created_at).unwrap();

    assert_eq!(task.id, TaskId::new(1));
    assert_eq!(task.title, "Buy milk");
    assert!(!task.completed);
    assert!(!task.completed);
    assert_eq!(task.created_at, created_at);
}

#[test]
fn task_new_rejects_blank_title() {
    let err = Task::new(TaskId::new(1), "   ", Utc::now()).unwrap_err();
    assert_eq!(err, TaskValidationError::TitleRequired);
    assert_eq!(err.to_string(), "Title is required");
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let created_at = Utc
        .with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
        .unwrap()
        + chrono::Duration::milliseconds(123);
    let mut task = Task::new(TaskId::new(7), "Ship release", created_at).unwrap();
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "7");
    assert_eq!(json["title"], "Ship release");
    assert_eq!(json["completed"], true);
    assert_eq!(json["createdAt"], "2026-10-16T09:30:00.123Z");
    assert_eq!(json.as_object().unwrap().len(), 4);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn timestamp_format_always_carries_milliseconds() {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(format_timestamp(&created_at), "2026-01-02T03:04:05.000Z");
}

#[test]
fn deserialize_rejects_numeric_id() {
    let value = serde_json::json!({
        "id": 1,
        "title": "numeric id",
        "completed": false,
        "createdAt": "2026-10-16T09:30:00.000Z"
    });

    assert!(serde_json::from_value::<Task>(value).is_err());
}
