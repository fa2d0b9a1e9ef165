//! Invocations as hosts send them, in JSON

use serde_json::json;

use pimkit::notify::{MemorySink, Notification, NotificationSink};
use pimkit::Generator;

#[tokio::test]
async fn test_contact_call() {
    let _ = env_logger::builder().is_test(true).try_init();

    let sink = MemorySink::new();
    let vcard = Generator::default().call_json(&json!({
        "name": "create_contact_vcard",
        "arguments": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "x-nickname": "Enchantress",
        },
    }), &sink).await.unwrap();

    assert!(vcard.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
    assert!(vcard.contains("\r\nN:Lovelace;Ada;;;\r\n"));
    assert!(vcard.contains("\r\nEMAIL;TYPE=INTERNET:ada@example.com\r\n"));
    assert!(vcard.contains("\r\nX-NICKNAME:Enchantress\r\n"));

    let notifications = sink.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0], Notification::message(format!("```vcard\n{}\n```\n", vcard)));
}

#[tokio::test]
async fn test_todo_call_with_non_string_arguments() {
    let _ = env_logger::builder().is_test(true).try_init();

    let sink = MemorySink::new();
    let ical = Generator::default().call_json(&json!({
        "name": "create_icalendar_todo",
        "arguments": {
            "summary": "Buy milk",
            "dtstamp": "2024-01-01T00:00:00Z",
            "x-estimate": 30,
            "x-ignored": null,
        },
    }), &sink).await.unwrap();

    assert!(ical.contains("\r\nX-ESTIMATE:30\r\n"));
    assert!(!ical.contains("X-IGNORED"));
}

#[tokio::test]
async fn test_event_call() {
    let sink = MemorySink::new();
    let ical = Generator::default().call_json(&json!({
        "name": "create_icalendar_event",
        "arguments": {
            "summary": "Standup",
            "dtstart": "2024-01-01 09:00",
            "dtend": "2024-01-01 09:15",
        },
    }), &sink).await.unwrap();

    assert!(ical.contains("\r\nDTSTART:20240101T090000Z\r\nDTEND:20240101T091500Z\r\n"));
}

#[tokio::test]
async fn test_invalid_calls() {
    let _ = env_logger::builder().is_test(true).try_init();

    let invalid_calls = vec![
        json!({ "name": "delete_everything", "arguments": {} }),
        json!({ "name": "create_icalendar_event", "arguments": { "summary": "No start" } }),
        json!({ "arguments": { "summary": "Buy milk" } }),
        json!("create_icalendar_todo"),
    ];

    for call in invalid_calls {
        let sink = MemorySink::new();
        assert_eq!(Generator::default().call_json(&call, &sink).await, None);

        let notifications = sink.notifications();
        assert_eq!(notifications.len(), 1);
        match &notifications[0] {
            Notification::Status { description, done, .. } => {
                assert!(description.starts_with("Invalid tool call: "));
                assert!(*done);
            },
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_dyn_sink() {
    let sink = MemorySink::new();
    let dyn_sink: &dyn NotificationSink = &sink;

    let result = Generator::default().call_json(&json!({
        "name": "create_icalendar_todo",
        "arguments": { "summary": "Buy milk" },
    }), dyn_sink).await;

    assert!(result.is_some());
    assert_eq!(sink.notifications().len(), 1);
}
