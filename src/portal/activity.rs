use serde_json::Value;
use tracing::info;

/// Fire-and-forget activity sink. Callers never rely on a return value; a
/// sink that drops events must not affect the operation that emitted them.
pub trait ActivityLog: Send + Sync {
    fn record(&self, event: &str, payload: Value);
}

/// Production sink that forwards activity events to the tracing pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingActivityLog;

impl ActivityLog for TracingActivityLog {
    fn record(&self, event: &str, payload: Value) {
        info!(event, %payload, "activity");
    }
}
