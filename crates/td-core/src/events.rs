//! System-wide event bus
//!
//! Decouples table internals from app concerns like toasts and logging.
//! Handlers are keyed by event type id and invoked synchronously on publish.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

/// System-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Common system events
pub mod events {
    use super::Event;

    /// A roster finished loading into the console.
    #[derive(Debug, Clone)]
    pub struct RosterLoaded {
        pub source_name: String,
        pub row_count: usize,
        pub column_count: usize,
    }

    /// A roster failed to load.
    #[derive(Debug, Clone)]
    pub struct RosterLoadFailed {
        pub source_name: String,
        pub error: String,
    }

    /// The visible result count changed (post-debounce).
    #[derive(Debug, Clone)]
    pub struct ResultCountAnnounced {
        pub count: usize,
    }

    /// The resolved selection changed.
    #[derive(Debug, Clone)]
    pub struct SelectionChanged {
        pub selected: Vec<String>,
    }

    /// An export was requested with nothing selected.
    #[derive(Debug, Clone)]
    pub struct ExportBlocked;

    /// An export of the selected rows completed.
    #[derive(Debug, Clone)]
    pub struct ExportFinished {
        pub row_count: usize,
        pub path: String,
    }

    // Implement Event trait for all event types
    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        RosterLoaded,
        RosterLoadFailed,
        ResultCountAnnounced,
        SelectionChanged,
        ExportBlocked,
        ExportFinished
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::SelectionChanged;
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn publish_reaches_typed_subscribers() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        bus.subscribe::<SelectionChanged>(handler_from_fn(move |event| {
            if let Some(change) = event.as_any().downcast_ref::<SelectionChanged>() {
                sink.lock().push(change.selected.len());
            }
        }));

        bus.publish(SelectionChanged {
            selected: vec!["1".into(), "2".into()],
        });
        // Events of other types do not reach this handler.
        bus.publish(super::events::ExportBlocked);

        assert_eq!(*seen.lock(), vec![2]);
    }
}
