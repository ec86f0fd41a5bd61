//! Instrument Scheduler - automatic mode
//!
//! Cycles every instrument on the tracked vessel through deploy, transmit and
//! reset without player input.
//!
//! See `engine.rs` for the tick loop and `assistant.rs` for the
//! per-instrument state machine.

pub mod assistant;
pub mod devices;
pub mod engine;

// Re-export main types for convenience
pub use assistant::{
    next_phase, AssistantPhase, InstrumentAssistant, InstrumentObservation, Transmission,
};
pub use devices::{cheapest_idle, idle_count};
pub use engine::{InstrumentScheduler, TickResult};
