//! Science Manager Core
//!
//! Decides what a spacecraft's science instruments should do every frame:
//! deploy, transmit their data home over the cheapest free antenna, or reset
//! and try again. Also values every piece of data aboard for the overlay.
//!
//! # Architecture
//!
//! - **core**: Frame clock
//! - **models**: Domain types (ResearchSubject, DataUnit, Event)
//! - **host**: Traits the game (or the sandbox) implements
//! - **valuation**: Science valuation with diminishing returns
//! - **scheduler**: Per-instrument assistants and the tick loop
//! - **report**: Overlay figures and the manual buttons
//! - **settings**: Persisted overlay settings
//! - **sandbox**: In-memory host used by tests and the headless CLI
//!
//! # Critical Invariants
//!
//! 1. Valuation never exceeds a subject's cap
//! 2. At most one transmission starts per tick
//! 3. An instrument is never sent a second deploy while one is pending

pub mod config;
pub mod core;
pub mod host;
pub mod models;
pub mod report;
pub mod sandbox;
pub mod scheduler;
pub mod settings;
pub mod valuation;

// Re-exports for convenience
pub use config::{ConfigError, SchedulerConfig, SessionSettings};
pub use core::time::FlightClock;
pub use host::{
    DataContainer, DeviceDirectory, FlightContext, Instrument, ResearchLedger, ResultsDialog,
    TransmissionDevice, Vessel,
};
pub use models::{ClearReason, DataUnit, Event, EventLog, ResearchSubject, SubjectKey};
pub use report::{
    dialog::{answer_results, DialogChoice},
    manual::{deploy_all, send_all, toggle_instrument, ManualAction, SendAllOutcome},
    ReportLine, ScienceReport,
};
pub use scheduler::{AssistantPhase, InstrumentAssistant, InstrumentScheduler, TickResult};
pub use settings::{Extent, OverlaySettings, SettingsError, WindowPosition};
pub use valuation::{ScienceSimulator, ValuationMode};
