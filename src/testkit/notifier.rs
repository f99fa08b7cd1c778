//! Notifiers for asserting on engine events.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::port::outbound::notifier::{Event, Notifier, TicketWonEvent, TriggerEvent};

/// Thread-safe event collector for notification assertions in tests.
///
/// Clones share the same event list, so a test can keep one handle and
/// hand another to the engine.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn triggered(&self) -> Vec<TriggerEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::StrategyTriggered(e) => Some(e.clone()),
                Event::TicketWon(_) => None,
            })
            .collect()
    }

    pub fn won(&self) -> Vec<TicketWonEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::TicketWon(e) => Some(e.clone()),
                Event::StrategyTriggered(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events.lock().push(event);
    }
}

/// Panics on every event.
pub struct PanickingNotifier;

impl Notifier for PanickingNotifier {
    fn notify(&self, _event: Event) {
        panic!("notifier exploded");
    }
}
