//! Event sink trait and implementations.

use async_trait::async_trait;
use tracing::{debug, info, Level};

use crate::core::PipelineEvent;

/// Trait for event sinks that can receive pipeline events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event asynchronously.
    async fn emit(&self, event: PipelineEvent);

    /// Emits an event without blocking.
    ///
    /// Called from inside `tick()`, so implementations must not block or
    /// panic. Errors are logged and suppressed.
    fn try_emit(&self, event: &PipelineEvent);
}

/// A no-op event sink that discards all events.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: PipelineEvent) {}

    fn try_emit(&self, _event: &PipelineEvent) {}
}

/// An event sink that logs events using the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a new logging event sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    /// Creates an info-level logging sink.
    #[must_use]
    pub fn info() -> Self {
        Self::new(Level::INFO)
    }

    fn log_event(&self, event: &PipelineEvent) {
        // progress ticks are noisy, keep them at debug regardless of level
        if self.level == Level::DEBUG || event.event_type == "stage.progress" {
            debug!(
                event_type = %event.event_type,
                event_data = %event.payload(),
                "Event: {}", event.event_type
            );
        } else {
            info!(
                event_type = %event.event_type,
                event_data = %event.payload(),
                "Event: {}", event.event_type
            );
        }
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: PipelineEvent) {
        self.log_event(&event);
    }

    fn try_emit(&self, event: &PipelineEvent) {
        self.log_event(event);
    }
}

/// A collecting event sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: parking_lot::RwLock<Vec<PipelineEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.read().clone()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }

    /// Returns events matching a type prefix.
    #[must_use]
    pub fn events_of_type(&self, type_prefix: &str) -> Vec<PipelineEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.event_type.starts_with(type_prefix))
            .cloned()
            .collect()
    }

    /// Returns the event types in emission order.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events.read().iter().map(|e| e.event_type.clone()).collect()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: PipelineEvent) {
        self.events.write().push(event);
    }

    fn try_emit(&self, event: &PipelineEvent) {
        self.events.write().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_sink() {
        let sink = NoOpEventSink;
        sink.emit(PipelineEvent::new("test")).await;
        sink.try_emit(&PipelineEvent::stage_started("CS-2024-001", "intake", 10));
    }

    #[tokio::test]
    async fn test_logging_sink() {
        let sink = LoggingEventSink::default();
        sink.emit(PipelineEvent::run_completed("CS-2024-001", 8)).await;
        sink.try_emit(&PipelineEvent::stage_progress("CS-2024-001", "auth", 40));
        LoggingEventSink::debug().try_emit(&PipelineEvent::new("x"));
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingEventSink::new();
        assert!(sink.is_empty());

        tokio_test::block_on(sink.emit(PipelineEvent::new("event1")));
        sink.try_emit(&PipelineEvent::new("event2"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.event_types(), vec!["event1", "event2"]);
    }

    #[test]
    fn test_collecting_sink_filter() {
        let sink = CollectingEventSink::new();
        sink.try_emit(&PipelineEvent::stage_started("c", "intake", 10));
        sink.try_emit(&PipelineEvent::stage_completed("c", "intake", 1.2));
        sink.try_emit(&PipelineEvent::run_completed("c", 1));

        assert_eq!(sink.events_of_type("stage.").len(), 2);
        assert_eq!(sink.events_of_type("run.").len(), 1);

        sink.clear();
        assert!(sink.is_empty());
    }
}
