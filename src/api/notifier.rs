//! Change notification system for broadcasting data updates to
//! WebSocket clients.
//!
//! The tasks page additionally receives a `TasksRefreshed` signal
//! after every bulk task read, marking its cached data stale.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages broadcast when entities change or cached page data
/// becomes stale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data")]
pub enum UpdateMessage {
    // Cars
    CarCreated { car_id: String },
    CarUpdated { car_id: String },

    // Breaking vehicles
    BreakingVehicleCreated { vehicle_id: String },

    // Tasks
    TaskCreated { task_id: String },
    TaskDetailCreated { detail_id: String },
    /// Cache-invalidation hint for the tasks page.
    TasksRefreshed,

    // Weight log
    WeightRecorded { entry_id: String },
}

/// Pub/sub notifier for broadcasting changes to all subscribers.
#[derive(Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<UpdateMessage>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    /// Create a new ChangeNotifier with a buffer of 100 messages.
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self { tx }
    }

    /// Subscribe to receive update notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<UpdateMessage> {
        self.tx.subscribe()
    }

    /// Broadcast an update message to all subscribers.
    pub fn notify(&self, msg: UpdateMessage) {
        let _ = self.tx.send(msg);
    }
}
