use crate::{
    input::events::{MapEvent, MapEventKind},
    prelude::HashMap,
};
use std::collections::VecDeque;

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent)>;

/// Map-level listeners, notified after the layers saw an event
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event kind
    listeners: HashMap<MapEventKind, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Process all queued events
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(&event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    pub fn listener_count(&self, kind: MapEventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .field("event_queue", &self.event_queue)
            .finish()
    }
}
