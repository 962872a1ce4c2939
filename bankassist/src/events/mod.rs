//! Event sink system for observability.
//!
//! The stepper and the runner report lifecycle events through an
//! [`EventSink`]. Sinks never fail the caller.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use std::sync::Arc;

/// Returns the default sink used when none is configured.
#[must_use]
pub fn default_sink() -> Arc<dyn EventSink> {
    Arc::new(NoOpEventSink)
}
