//! Science Valuation
//!
//! Computes how many research points a unit of collected data is worth.
//!
//! # Diminishing Returns
//!
//! Every subject pays less for each additional result: the first data unit is
//! valued at the subject's current multiplier, and each unit folded in after
//! it shrinks the multiplier to `1 - accumulated / cap`. When several
//! instruments on one vessel hold data for the same subject, valuing them
//! independently would count the full rate several times over. The
//! [`ScienceSimulator`] keeps a running tally per subject for the duration of
//! one *pass* (one overlay redraw, one batch of manual actions) so each unit
//! is valued against what the units before it already claimed.
//!
//! Keep and Transmit valuations are tallied separately: they answer two
//! different "what if" questions about the same data.
//!
//! # Single-Shot Valuation
//!
//! The scheduler does not run passes. It asks "what would transmitting this
//! right now be worth" against the live ledger ([`transmit_value_now`]), with
//! an extra guard that treats a subject within a small epsilon of its cap as
//! worthless.

pub mod instant;
pub mod simulator;

pub use instant::{instant_value, transmit_value_now, DEFAULT_NEAR_CAP_EPSILON};
pub use simulator::{ScienceSimulator, SubjectTally, ValuationKey, ValuationMode};
