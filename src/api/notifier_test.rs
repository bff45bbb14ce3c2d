//! Tests for the change notifier.

use serde_json::json;

use crate::api::notifier::{ChangeNotifier, UpdateMessage};

#[tokio::test(flavor = "multi_thread")]
async fn notify_reaches_subscriber() {
    let notifier = ChangeNotifier::new();
    let mut rx = notifier.subscribe();

    notifier.notify(UpdateMessage::CarCreated {
        car_id: "car00001".to_string(),
    });

    let received = rx.recv().await.expect("Message should arrive");
    assert_eq!(
        received,
        UpdateMessage::CarCreated {
            car_id: "car00001".to_string()
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn notify_without_subscribers_does_not_panic() {
    let notifier = ChangeNotifier::new();
    notifier.notify(UpdateMessage::TasksRefreshed);
}

#[test]
fn update_message_serializes_tagged() {
    let msg = UpdateMessage::WeightRecorded {
        entry_id: "wt000001".to_string(),
    };

    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(
        value,
        json!({"type": "WeightRecorded", "data": {"entry_id": "wt000001"}})
    );
}

#[test]
fn tasks_refreshed_serializes_without_data() {
    let value = serde_json::to_value(UpdateMessage::TasksRefreshed).unwrap();
    assert_eq!(value, json!({"type": "TasksRefreshed"}));
}
