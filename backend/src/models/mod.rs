//! Domain models for the science manager

pub mod data;
pub mod event;
pub mod subject;

// Re-exports
pub use data::DataUnit;
pub use event::{ClearReason, Event, EventLog};
pub use subject::{ResearchSubject, SubjectKey};
