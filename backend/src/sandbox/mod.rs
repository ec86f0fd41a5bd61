//! Sandbox Host
//!
//! In-memory implementations of every host trait, with simple timing:
//! instruments take a configurable time to deploy, transmitters stay busy
//! for a time proportional to the data they send and credit the ledger when
//! they finish.
//!
//! Used by the integration tests and the headless CLI. Timing only moves when
//! the owner calls `advance`, so a test decides exactly when the host
//! "catches up" with the scheduler's commands.
//!
//! NOTE: Available in all builds so integration tests and the CLI can share
//! it; not meant to back a real game integration.

pub mod dialog;
pub mod instrument;
pub mod ledger;
pub mod transmitter;
pub mod vessel;

pub use dialog::SandboxResultsDialog;
pub use instrument::SandboxInstrument;
pub use ledger::SandboxLedger;
pub use transmitter::SandboxTransmitter;
pub use vessel::{SandboxContainer, SandboxFlight, SandboxVessel};
