use tokio::sync::broadcast;

/// Shared state: the broadcast channel fanning notify payloads out to
/// currently connected SSE subscribers.
///
/// Delivery is at most once and best effort; there is no replay for
/// subscribers that connect after a broadcast.
#[derive(Clone)]
pub struct NotifyState {
    pub event_tx: broadcast::Sender<serde_json::Value>,
}

impl NotifyState {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { event_tx: tx }
    }
}

impl Default for NotifyState {
    fn default() -> Self {
        Self::new()
    }
}
