use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ErrorKind;

/// load lifecycle events emitted by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    LoadStarted {
        location: String,
        timestamp: DateTime<Utc>,
    },
    LoadSucceeded {
        snapshot_id: Uuid,
        records: usize,
        months: usize,
        timestamp: DateTime<Utc>,
    },
    LoadFailed {
        kind: ErrorKind,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    /// one line status for the consumer
    pub fn status_message(&self) -> String {
        match self {
            Event::LoadStarted { .. } => "📥 Cargando datos…".to_string(),
            Event::LoadSucceeded { records, months, .. } => {
                format!("✅ Listo. Registros: {}. Meses con pago: {}.", records, months)
            }
            Event::LoadFailed { reason, .. } => format!("❌ Error: {}", reason),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::LoadStarted { timestamp, .. }
            | Event::LoadSucceeded { timestamp, .. }
            | Event::LoadFailed { timestamp, .. } => *timestamp,
        }
    }
}

/// events of the latest load attempt; a `LoadStarted` starts a fresh log
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        if matches!(event, Event::LoadStarted { .. }) {
            self.events.clear();
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }
}
