//! Event logging for scheduler auditing.
//!
//! Every command the scheduler issues to the host, and every change to the set
//! of tracked instruments, is captured as an [`Event`]. The log lets the
//! overlay (or a test) answer "what did automatic mode do, and when":
//! - **Tracking**: vessel switches, assistants created or cleared
//! - **Commands**: deploy, reset, transmission start
//!
//! # Example
//!
//! ```rust
//! use science_manager_core::models::{Event, EventLog};
//!
//! let mut log = EventLog::new();
//! log.log(Event::DeployIssued {
//!     tick: 3,
//!     instrument_id: "thermometer-1".to_string(),
//! });
//!
//! assert_eq!(log.events_at_tick(3).len(), 1);
//! assert_eq!(log.events()[0].instrument_id(), Some("thermometer-1"));
//! ```

use super::subject::SubjectKey;
use serde::Serialize;

/// Why the tracked assistants were dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClearReason {
    /// The player took control of a different vessel
    VesselChanged,
    /// Automatic mode was switched off
    AutoModeDisabled,
}

/// Scheduler event capturing a command or tracking change.
///
/// All events carry the tick they happened on. Events are logged in the
/// order they occur within a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Event {
    /// Scheduler started tracking a vessel
    VesselTracked { tick: usize, vessel_id: String },

    /// All assistants were dropped
    AssistantsCleared {
        tick: usize,
        reason: ClearReason,
        count: usize,
    },

    /// An assistant was created for a newly seen instrument
    InstrumentTracked { tick: usize, instrument_id: String },

    /// Deploy command sent to an instrument
    DeployIssued { tick: usize, instrument_id: String },

    /// Reset command sent to an instrument
    ResetIssued {
        tick: usize,
        instrument_id: String,
        cooldown: f64,
    },

    /// Held data handed to a transmission device
    TransmissionStarted {
        tick: usize,
        instrument_id: String,
        device_id: String,
        subject: SubjectKey,
        value: f64,
    },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::VesselTracked { tick, .. } => *tick,
            Event::AssistantsCleared { tick, .. } => *tick,
            Event::InstrumentTracked { tick, .. } => *tick,
            Event::DeployIssued { tick, .. } => *tick,
            Event::ResetIssued { tick, .. } => *tick,
            Event::TransmissionStarted { tick, .. } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::VesselTracked { .. } => "VesselTracked",
            Event::AssistantsCleared { .. } => "AssistantsCleared",
            Event::InstrumentTracked { .. } => "InstrumentTracked",
            Event::DeployIssued { .. } => "DeployIssued",
            Event::ResetIssued { .. } => "ResetIssued",
            Event::TransmissionStarted { .. } => "TransmissionStarted",
        }
    }

    /// Get instrument ID if event relates to a specific instrument
    pub fn instrument_id(&self) -> Option<&str> {
        match self {
            Event::InstrumentTracked { instrument_id, .. } => Some(instrument_id),
            Event::DeployIssued { instrument_id, .. } => Some(instrument_id),
            Event::ResetIssued { instrument_id, .. } => Some(instrument_id),
            Event::TransmissionStarted { instrument_id, .. } => Some(instrument_id),
            _ => None,
        }
    }
}

/// Event log for storing and querying scheduler events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get events for a specific instrument
    pub fn events_for_instrument(&self, instrument_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.instrument_id() == Some(instrument_id))
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deploy(tick: usize, id: &str) -> Event {
        Event::DeployIssued {
            tick,
            instrument_id: id.to_string(),
        }
    }

    #[test]
    fn test_event_type() {
        let event = Event::ResetIssued {
            tick: 10,
            instrument_id: "goo-1".to_string(),
            cooldown: 5.0,
        };

        assert_eq!(event.event_type(), "ResetIssued");
        assert_eq!(event.tick(), 10);
    }

    #[test]
    fn test_vessel_events_have_no_instrument() {
        let event = Event::VesselTracked {
            tick: 0,
            vessel_id: "probe".to_string(),
        };

        assert_eq!(event.instrument_id(), None);
    }

    #[test]
    fn test_event_log_query_by_tick() {
        let mut log = EventLog::new();

        log.log(deploy(1, "goo-1"));
        log.log(deploy(1, "goo-2"));
        log.log(deploy(2, "goo-3"));

        assert_eq!(log.events_at_tick(1).len(), 2);
        assert_eq!(log.events_at_tick(2).len(), 1);
    }

    #[test]
    fn test_event_log_query_by_instrument() {
        let mut log = EventLog::new();

        log.log(Event::InstrumentTracked {
            tick: 0,
            instrument_id: "goo-1".to_string(),
        });
        log.log(deploy(0, "goo-1"));
        log.log(deploy(0, "goo-2"));

        assert_eq!(log.events_for_instrument("goo-1").len(), 2);
        assert_eq!(log.events_of_type("DeployIssued").len(), 2);
    }

    #[test]
    fn test_event_log_clear() {
        let mut log = EventLog::new();
        log.log(deploy(1, "goo-1"));
        assert_eq!(log.len(), 1);

        log.clear();
        assert!(log.is_empty());
    }
}
