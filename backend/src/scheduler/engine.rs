//! Scheduler Engine
//!
//! Runs automatic mode for the vessel the player is flying.
//!
//! # Tick Loop
//!
//! ```text
//! For each host frame:
//! 1. Resolve the tracked vessel (EVA keeps the last one)
//! 2. Automatic mode off → drop assistants, stop
//! 3. No assistants yet → create one per instrument on the vessel
//! 4. Reconcile every assistant with its instrument, decay cooldowns
//! 5. Deploy every ready instrument
//! 6. Transmit the single most valuable deployed instrument's data
//! 7. Reset every deployed instrument whose data is worth nothing
//! 8. Advance the clock
//! ```
//!
//! Only one transmission starts per tick, across the whole vessel. Devices
//! are scarce and the most valuable data should go first; anything that
//! loses out is reconsidered on the next tick.
//!
//! # Example
//!
//! ```rust
//! use science_manager_core::sandbox::{SandboxFlight, SandboxInstrument, SandboxLedger, SandboxTransmitter, SandboxVessel};
//! use science_manager_core::{DataUnit, InstrumentScheduler, ResearchSubject, SchedulerConfig, SessionSettings};
//! use std::rc::Rc;
//!
//! let ledger = Rc::new(SandboxLedger::new());
//! ledger.insert(ResearchSubject::new("crewReport@KerbinFlyingLow", 5.0));
//!
//! let vessel = SandboxVessel::new("probe")
//!     .with_instrument(SandboxInstrument::new(
//!         "report-1",
//!         "crewReport",
//!         DataUnit::new("crewReport@KerbinFlyingLow", 1.0),
//!     ))
//!     .with_transmitter(SandboxTransmitter::new("antenna", 6.0, Rc::clone(&ledger)));
//! let flight = SandboxFlight::flying(Rc::new(vessel));
//!
//! let mut scheduler = InstrumentScheduler::new(SchedulerConfig::default()).unwrap();
//! let result = scheduler.tick(&flight, &*ledger, &SessionSettings::automatic(), 0.02);
//!
//! // Deployed, collected and handed to the antenna within one tick
//! assert_eq!(result.deployed, 1);
//! assert_eq!(result.transmitted.as_deref(), Some("report-1"));
//! ```

use crate::config::{ConfigError, SchedulerConfig, SessionSettings};
use crate::core::time::FlightClock;
use crate::host::{FlightContext, ResearchLedger, Vessel};
use crate::models::{ClearReason, Event, EventLog};
use crate::scheduler::assistant::InstrumentAssistant;
use crate::scheduler::devices::idle_count;
use std::rc::Rc;
use tracing::{debug, info};

/// Result of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Tick number
    pub tick: usize,

    /// Assistants tracked at the end of the tick
    pub tracked: usize,

    /// Deploy commands issued this tick
    pub deployed: usize,

    /// Instrument whose data started transmitting this tick
    pub transmitted: Option<String>,

    /// Reset commands issued for worthless data this tick
    pub resets: usize,
}

impl TickResult {
    fn at(tick: usize) -> Self {
        Self {
            tick,
            ..Default::default()
        }
    }
}

/// Automatic-mode driver for the player's vessel
///
/// Owns one [`InstrumentAssistant`] per instrument on the tracked vessel and
/// the log of every command it has issued.
pub struct InstrumentScheduler {
    config: SchedulerConfig,

    clock: FlightClock,

    /// Vessel whose instruments are being tracked
    vessel: Option<Rc<dyn Vessel>>,

    assistants: Vec<InstrumentAssistant>,

    event_log: EventLog,
}

impl InstrumentScheduler {
    /// Create a scheduler after validating its configuration
    pub fn new(config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            clock: FlightClock::new(),
            vessel: None,
            assistants: Vec::new(),
            event_log: EventLog::new(),
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn current_tick(&self) -> usize {
        self.clock.current_tick()
    }

    pub fn clock(&self) -> &FlightClock {
        &self.clock
    }

    pub fn tracked_vessel(&self) -> Option<&Rc<dyn Vessel>> {
        self.vessel.as_ref()
    }

    pub fn assistants(&self) -> &[InstrumentAssistant] {
        &self.assistants
    }

    pub fn assistant(&self, instrument_id: &str) -> Option<&InstrumentAssistant> {
        self.assistants.iter().find(|a| a.id() == instrument_id)
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Run one scheduling tick covering `delta` units of game time
    pub fn tick(
        &mut self,
        flight: &dyn FlightContext,
        ledger: &dyn ResearchLedger,
        session: &SessionSettings,
        delta: f64,
    ) -> TickResult {
        let mut result = TickResult::at(self.clock.current_tick());
        let vessel = self.observe_flight(flight);

        if !session.auto_mode {
            if !self.assistants.is_empty() {
                self.clear_assistants(ClearReason::AutoModeDisabled);
            }
        } else if let Some(vessel) = vessel {
            self.run_automation(&*vessel, ledger, delta, &mut result);
        }

        result.tracked = self.assistants.len();
        self.clock.advance(delta);
        result
    }

    /// Work out which vessel to track this tick
    ///
    /// While on EVA the last vessel stays tracked. Switching to another vessel
    /// (or to none) drops every assistant. Returns the tracked vessel.
    pub fn observe_flight(&mut self, flight: &dyn FlightContext) -> Option<Rc<dyn Vessel>> {
        if flight.is_on_eva() {
            return self.vessel.clone();
        }

        let active = flight.active_vessel();
        let unchanged = match (&self.vessel, &active) {
            (Some(tracked), Some(active)) => tracked.id() == active.id(),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return self.vessel.clone();
        }

        if !self.assistants.is_empty() {
            self.clear_assistants(ClearReason::VesselChanged);
        }
        if let Some(vessel) = &active {
            info!(vessel_id = %vessel.id(), "Tracking vessel");
            self.event_log.log(Event::VesselTracked {
                tick: self.clock.current_tick(),
                vessel_id: vessel.id().to_string(),
            });
        }
        self.vessel = active;
        self.vessel.clone()
    }

    /// Drop every assistant; instruments and devices are left as they are
    pub fn clear_assistants(&mut self, reason: ClearReason) {
        info!(count = self.assistants.len(), ?reason, "Clearing instrument assistants");
        self.event_log.log(Event::AssistantsCleared {
            tick: self.clock.current_tick(),
            reason,
            count: self.assistants.len(),
        });
        self.assistants.clear();
    }

    fn run_automation(
        &mut self,
        vessel: &dyn Vessel,
        ledger: &dyn ResearchLedger,
        delta: f64,
        result: &mut TickResult,
    ) {
        let tick = self.clock.current_tick();

        if self.assistants.is_empty() {
            self.track_instruments(vessel, tick);
        }

        for assistant in &mut self.assistants {
            assistant.sync();
            assistant.tick_cooldown(delta);
        }

        result.deployed = self.deploy_ready(tick);
        result.transmitted = self.transmit_best(vessel, ledger, tick);
        result.resets = self.reset_worthless(ledger, tick);
    }

    /// Create one assistant per instrument not already tracked
    fn track_instruments(&mut self, vessel: &dyn Vessel, tick: usize) {
        for instrument in vessel.instruments() {
            if self.assistants.iter().any(|a| a.id() == instrument.id()) {
                continue;
            }
            debug!(instrument_id = %instrument.id(), "Tracking instrument");
            self.event_log.log(Event::InstrumentTracked {
                tick,
                instrument_id: instrument.id().to_string(),
            });
            self.assistants.push(InstrumentAssistant::new(instrument));
        }
    }

    fn deploy_ready(&mut self, tick: usize) -> usize {
        let mut deployed = 0;
        for assistant in self.assistants.iter_mut().filter(|a| a.is_ready()) {
            if assistant.deploy() {
                debug!(instrument_id = %assistant.id(), "Deploying instrument");
                self.event_log.log(Event::DeployIssued {
                    tick,
                    instrument_id: assistant.id().to_string(),
                });
                deployed += 1;
            }
        }
        deployed
    }

    /// Start at most one transmission: the most valuable deployed, idle candidate
    fn transmit_best(
        &mut self,
        vessel: &dyn Vessel,
        ledger: &dyn ResearchLedger,
        tick: usize,
    ) -> Option<String> {
        let epsilon = self.config.near_cap_epsilon;

        let mut best: Option<(usize, f64)> = None;
        for (index, assistant) in self.assistants.iter().enumerate() {
            if !assistant.is_deployed() || assistant.is_transmitting() {
                continue;
            }
            let value = assistant.transmit_value(ledger, epsilon);
            if value > 0.0 && best.map_or(true, |(_, top)| value > top) {
                best = Some((index, value));
            }
        }
        let (index, value) = best?;

        let devices = vessel.transmission_devices();
        let assistant = &mut self.assistants[index];
        let Some(transmission) = assistant.transmit(&devices) else {
            debug!(
                instrument_id = %assistant.id(),
                value,
                devices = devices.len(),
                idle = idle_count(&devices),
                "No idle transmission device"
            );
            return None;
        };

        let instrument_id = assistant.id().to_string();
        info!(
            instrument_id = %instrument_id,
            device_id = %transmission.device.id(),
            subject = %transmission.data.subject,
            value,
            "Transmission started"
        );
        self.event_log.log(Event::TransmissionStarted {
            tick,
            instrument_id: instrument_id.clone(),
            device_id: transmission.device.id().to_string(),
            subject: transmission.data.subject.clone(),
            value,
        });
        if transmission.reset_issued {
            self.event_log.log(Event::ResetIssued {
                tick,
                instrument_id: instrument_id.clone(),
                cooldown: 0.0,
            });
        }
        Some(instrument_id)
    }

    /// Reclaim instruments stuck holding data nobody will pay for
    fn reset_worthless(&mut self, ledger: &dyn ResearchLedger, tick: usize) -> usize {
        let epsilon = self.config.near_cap_epsilon;
        let cooldown = self.config.worthless_reset_cooldown;

        let mut resets = 0;
        for assistant in &mut self.assistants {
            if !assistant.is_deployed() || assistant.transmit_value(ledger, epsilon) != 0.0 {
                continue;
            }
            if assistant.reset(cooldown) {
                debug!(instrument_id = %assistant.id(), cooldown, "Resetting worthless instrument");
                self.event_log.log(Event::ResetIssued {
                    tick,
                    instrument_id: assistant.id().to_string(),
                    cooldown,
                });
                resets += 1;
            }
        }
        resets
    }
}
