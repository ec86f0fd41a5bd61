//! Per-instrument controller
//!
//! An [`InstrumentAssistant`] drives one instrument through
//! deploy → (data held) → transmit → reset → cooldown → deploy ...
//!
//! # State Model
//!
//! ```text
//!            deploy()              observed deployed
//!   Idle ─────────────▶ Deploying ──────────────────▶ Deployed
//!    ▲                                                   │
//!    │ observed ready           reset(cooldown)          │ transmit() ──▶ Transmitting (orthogonal)
//!    └──────────────── Resetting ◀───────────────────────┘
//! ```
//!
//! The recorded phase only says which command was last issued; the
//! instrument's own `deployed`/data flags and the device's busy flag are the
//! source of truth. [`next_phase`] is the single transition function that
//! reconciles the two, and every query and command goes through it.
//!
//! Commands that are not allowed in the current state are silent no-ops and
//! return `false`/`None`; the scheduler simply tries again next tick.

use crate::core::time::sanitize_delta;
use crate::host::{Instrument, ResearchLedger, TransmissionDevice};
use crate::models::DataUnit;
use crate::scheduler::devices::cheapest_idle;
use crate::valuation::transmit_value_now;
use serde::Serialize;
use std::fmt;
use std::rc::{Rc, Weak};

/// Last command-driven phase of an instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssistantPhase {
    /// Stowed, possibly cooling down
    Idle,
    /// Deploy issued, instrument not yet reporting deployed
    Deploying,
    /// Instrument deployed (normally holding data)
    Deployed,
    /// Reset issued, instrument not yet ready again
    Resetting,
}

/// What the instrument reports about itself this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentObservation {
    pub deployed: bool,
    pub has_data: bool,
}

impl InstrumentObservation {
    pub fn observe(instrument: &dyn Instrument) -> Self {
        Self {
            deployed: instrument.is_deployed(),
            has_data: instrument.held_data().is_some(),
        }
    }

    /// Eligible for a fresh deployment: stowed, empty and out of cooldown
    pub fn is_ready(&self, cooldown_remaining: f64) -> bool {
        !self.deployed && cooldown_remaining <= 0.0 && !self.has_data
    }
}

/// Reconcile the recorded phase with what the instrument reports
///
/// # Example
///
/// ```
/// use science_manager_core::scheduler::{next_phase, AssistantPhase, InstrumentObservation};
///
/// let deployed = InstrumentObservation { deployed: true, has_data: true };
/// assert_eq!(next_phase(AssistantPhase::Deploying, deployed, 0.0), AssistantPhase::Deployed);
///
/// let stowed = InstrumentObservation { deployed: false, has_data: false };
/// assert_eq!(next_phase(AssistantPhase::Resetting, stowed, 2.0), AssistantPhase::Resetting);
/// assert_eq!(next_phase(AssistantPhase::Resetting, stowed, 0.0), AssistantPhase::Idle);
/// ```
pub fn next_phase(
    phase: AssistantPhase,
    observed: InstrumentObservation,
    cooldown_remaining: f64,
) -> AssistantPhase {
    match phase {
        AssistantPhase::Deploying if observed.deployed => AssistantPhase::Deployed,
        AssistantPhase::Deploying => AssistantPhase::Deploying,
        AssistantPhase::Resetting if observed.is_ready(cooldown_remaining) => AssistantPhase::Idle,
        AssistantPhase::Resetting => AssistantPhase::Resetting,
        // Follow deploys and resets done by the player outside automatic mode
        AssistantPhase::Idle | AssistantPhase::Deployed if observed.deployed => {
            AssistantPhase::Deployed
        }
        AssistantPhase::Idle | AssistantPhase::Deployed => AssistantPhase::Idle,
    }
}

/// A transmission handed to a device
pub struct Transmission {
    pub device: Rc<dyn TransmissionDevice>,
    pub data: DataUnit,
    /// Whether the follow-up reset command was actually issued
    pub reset_issued: bool,
}

/// Automatic controller for one instrument
pub struct InstrumentAssistant {
    instrument: Rc<dyn Instrument>,
    phase: AssistantPhase,
    cooldown_remaining: f64,
    /// Device carrying this instrument's last transmission; only meaningful while it is busy
    uplink: Option<Weak<dyn TransmissionDevice>>,
}

impl InstrumentAssistant {
    /// Start tracking an instrument in whatever state it is in
    pub fn new(instrument: Rc<dyn Instrument>) -> Self {
        let phase = if instrument.is_deployed() {
            AssistantPhase::Deployed
        } else {
            AssistantPhase::Idle
        };
        Self {
            instrument,
            phase,
            cooldown_remaining: 0.0,
            uplink: None,
        }
    }

    pub fn id(&self) -> &str {
        self.instrument.id()
    }

    pub fn instrument(&self) -> &Rc<dyn Instrument> {
        &self.instrument
    }

    pub fn observe(&self) -> InstrumentObservation {
        InstrumentObservation::observe(self.instrument.as_ref())
    }

    /// Current phase, reconciled against the instrument
    pub fn phase(&self) -> AssistantPhase {
        next_phase(self.phase, self.observe(), self.cooldown_remaining)
    }

    pub fn is_deployed(&self) -> bool {
        self.instrument.is_deployed()
    }

    pub fn is_deploying(&self) -> bool {
        self.phase() == AssistantPhase::Deploying
    }

    pub fn is_resetting(&self) -> bool {
        self.phase() == AssistantPhase::Resetting
    }

    pub fn is_ready(&self) -> bool {
        self.observe().is_ready(self.cooldown_remaining)
    }

    /// Whether the device carrying this instrument's data is still busy
    pub fn is_transmitting(&self) -> bool {
        self.active_device().is_some()
    }

    /// Device currently transmitting this instrument's data
    pub fn active_device(&self) -> Option<Rc<dyn TransmissionDevice>> {
        self.uplink
            .as_ref()
            .and_then(Weak::upgrade)
            .filter(|device| device.is_busy())
    }

    pub fn cooldown_remaining(&self) -> f64 {
        self.cooldown_remaining
    }

    pub fn held_data(&self) -> Option<DataUnit> {
        self.instrument.held_data()
    }

    /// What transmitting the held data would earn right now
    pub fn transmit_value(&self, ledger: &dyn ResearchLedger, near_cap_epsilon: f64) -> f64 {
        transmit_value_now(ledger, self.held_data().as_ref(), near_cap_epsilon)
    }

    /// Commit the reconciled phase and drop a finished uplink
    pub fn sync(&mut self) {
        self.phase = self.phase();
        if self.active_device().is_none() {
            self.uplink = None;
        }
    }

    /// Let `delta` units of game time pass on the cooldown timer
    ///
    /// The timer is not clamped: anything at or below zero counts as expired.
    pub fn tick_cooldown(&mut self, delta: f64) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining -= sanitize_delta(delta);
        }
    }

    /// Deploy the instrument if it is ready and not already deploying
    ///
    /// Returns `true` if the deploy command was issued.
    pub fn deploy(&mut self) -> bool {
        self.sync();
        if !self.is_ready() || self.phase == AssistantPhase::Deploying {
            return false;
        }
        self.phase = AssistantPhase::Deploying;
        self.instrument.deploy();
        true
    }

    /// Reset the instrument unless a reset is already under way
    ///
    /// A positive `cooldown` starts the cooldown timer, unless one is already
    /// running. Returns `true` if the reset command was issued.
    pub fn reset(&mut self, cooldown: f64) -> bool {
        self.sync();
        if self.phase == AssistantPhase::Resetting {
            return false;
        }
        if cooldown > 0.0 && self.cooldown_remaining <= 0.0 {
            self.cooldown_remaining = cooldown;
        }
        self.phase = AssistantPhase::Resetting;
        self.instrument.reset();
        true
    }

    /// Send the held data through the cheapest idle device, then reset
    ///
    /// Does nothing (returns `None`) when the instrument is not deployed, is
    /// already transmitting, holds no data, or every device is busy.
    pub fn transmit(&mut self, devices: &[Rc<dyn TransmissionDevice>]) -> Option<Transmission> {
        self.sync();
        if self.is_transmitting() || !self.is_deployed() {
            return None;
        }
        let data = self.held_data()?;
        let device = Rc::clone(cheapest_idle(devices)?);

        device.transmit(vec![data.clone()]);
        self.uplink = Some(Rc::downgrade(&device));
        let reset_issued = self.reset(0.0);

        Some(Transmission {
            device,
            data,
            reset_issued,
        })
    }
}

impl fmt::Debug for InstrumentAssistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstrumentAssistant")
            .field("id", &self.id())
            .field("phase", &self.phase())
            .field("transmitting", &self.is_transmitting())
            .field("deployed", &self.is_deployed())
            .field("ready", &self.is_ready())
            .field("cooldown_remaining", &self.cooldown_remaining)
            .finish()
    }
}
