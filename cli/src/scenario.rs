//! JSON scenarios for the headless harness
//!
//! A scenario describes one sandbox vessel, the research subjects it can
//! study, and how long to fly it. [`Scenario::build`] turns it into sandbox
//! objects and [`Scenario::run`] drives the scheduler over them.

use science_manager_core::report::ScienceReport;
use science_manager_core::sandbox::{
    SandboxContainer, SandboxFlight, SandboxInstrument, SandboxLedger, SandboxTransmitter,
    SandboxVessel,
};
use science_manager_core::valuation::ScienceSimulator;
use science_manager_core::{
    deploy_all, send_all, ConfigError, DataUnit, EventLog, InstrumentScheduler, ResearchSubject,
    SchedulerConfig, SessionSettings, TickResult,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info};

/// Scenario flown when no file is given
pub const BUILTIN_SCENARIO: &str = include_str!("../scenarios/mun_lander.json");

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scheduler config: {0}")]
    Config(#[from] ConfigError),

    #[error("Instrument '{instrument}' yields data for unknown subject '{subject}'")]
    UnknownSubject { instrument: String, subject: String },

    #[error("Duplicate id '{0}'")]
    DuplicateId(String),

    #[error("Invalid tick delta {0}: must be finite and positive")]
    InvalidDelta(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectSpec {
    pub key: String,
    #[serde(default)]
    pub title: String,
    pub science_cap: f64,
    #[serde(default)]
    pub current_science: f64,
    #[serde(default = "one")]
    pub data_scale: f64,
    #[serde(default = "one")]
    pub subject_value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentSpec {
    pub id: String,
    pub experiment_id: String,
    pub yields: DataUnit,
    #[serde(default)]
    pub deploy_time: f64,
    /// Start deployed and holding its data
    #[serde(default)]
    pub loaded: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransmitterSpec {
    pub id: String,
    pub resource_cost: f64,
    #[serde(default = "one")]
    pub time_per_unit: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerSpec {
    pub title: String,
    #[serde(default)]
    pub data: Vec<DataUnit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_vessel")]
    pub vessel: String,
    pub ticks: usize,
    #[serde(default = "one")]
    pub delta: f64,
    /// Without automatic mode the harness plays "Deploy All" then "Send All" every tick
    #[serde(default = "enabled")]
    pub auto_mode: bool,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    pub subjects: Vec<SubjectSpec>,
    pub instruments: Vec<InstrumentSpec>,
    #[serde(default)]
    pub transmitters: Vec<TransmitterSpec>,
    #[serde(default)]
    pub containers: Vec<ContainerSpec>,
}

fn one() -> f64 {
    1.0
}

fn enabled() -> bool {
    true
}

fn default_vessel() -> String {
    "sandbox".to_string()
}

/// Sandbox objects built from a scenario
pub struct Flight {
    pub ledger: Rc<SandboxLedger>,
    pub vessel: Rc<SandboxVessel>,
    pub flight: SandboxFlight,
}

/// What a scenario run produced
#[derive(Debug)]
pub struct RunSummary {
    pub ticks: Vec<TickResult>,
    pub events: EventLog,
    pub manual_batches: usize,
    pub science_banked: f64,
    pub final_report: ScienceReport,
}

impl RunSummary {
    pub fn transmissions(&self) -> usize {
        self.events.events_of_type("TransmissionStarted").len() + self.manual_batches
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn builtin() -> Result<Self, ScenarioError> {
        Self::from_json(BUILTIN_SCENARIO)
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if !self.delta.is_finite() || self.delta <= 0.0 {
            return Err(ScenarioError::InvalidDelta(self.delta));
        }
        self.scheduler.validate()?;

        let subjects: HashSet<&str> = self.subjects.iter().map(|s| s.key.as_str()).collect();
        let mut ids = HashSet::new();
        for instrument in &self.instruments {
            if !ids.insert(instrument.id.as_str()) {
                return Err(ScenarioError::DuplicateId(instrument.id.clone()));
            }
            if !subjects.contains(instrument.yields.subject.as_str()) {
                return Err(ScenarioError::UnknownSubject {
                    instrument: instrument.id.clone(),
                    subject: instrument.yields.subject.to_string(),
                });
            }
        }
        for transmitter in &self.transmitters {
            if !ids.insert(transmitter.id.as_str()) {
                return Err(ScenarioError::DuplicateId(transmitter.id.clone()));
            }
        }
        Ok(())
    }

    pub fn build(&self) -> Flight {
        let ledger = Rc::new(SandboxLedger::new());
        for spec in &self.subjects {
            ledger.insert(
                ResearchSubject::new(spec.key.as_str(), spec.science_cap)
                    .with_title(spec.title.as_str())
                    .with_data_scale(spec.data_scale)
                    .with_subject_value(spec.subject_value)
                    .with_current_science(spec.current_science),
            );
        }

        let mut vessel = SandboxVessel::new(self.vessel.as_str());
        for spec in &self.instruments {
            let instrument = SandboxInstrument::new(
                spec.id.as_str(),
                spec.experiment_id.as_str(),
                spec.yields.clone(),
            )
            .with_deploy_time(spec.deploy_time);
            if spec.loaded {
                instrument.load(spec.yields.clone());
            }
            vessel = vessel.with_instrument(instrument);
        }
        for spec in &self.transmitters {
            vessel = vessel.with_transmitter(
                SandboxTransmitter::new(spec.id.as_str(), spec.resource_cost, Rc::clone(&ledger))
                    .with_time_per_unit(spec.time_per_unit),
            );
        }
        for spec in &self.containers {
            let container = SandboxContainer::new(spec.title.as_str());
            for data in &spec.data {
                container.store(data.clone());
            }
            vessel = vessel.with_container(container);
        }

        let vessel = Rc::new(vessel);
        Flight {
            ledger,
            flight: SandboxFlight::flying(Rc::clone(&vessel)),
            vessel,
        }
    }

    /// Fly the scenario to completion
    pub fn run(&self) -> Result<RunSummary, ScenarioError> {
        let Flight {
            ledger,
            vessel,
            flight,
        } = self.build();
        let mut scheduler = InstrumentScheduler::new(self.scheduler.clone())?;
        let session = SessionSettings {
            auto_mode: self.auto_mode,
        };

        info!(
            vessel = %self.vessel,
            ticks = self.ticks,
            auto_mode = self.auto_mode,
            "Running scenario"
        );

        let mut ticks = Vec::with_capacity(self.ticks);
        let mut manual_batches = 0;
        for _ in 0..self.ticks {
            let result = scheduler.tick(&flight, &*ledger, &session, self.delta);
            if !self.auto_mode {
                deploy_all(&*vessel);
                if let Some(outcome) = send_all(&*vessel, &*ledger) {
                    if !outcome.transmitted.is_empty() {
                        manual_batches += 1;
                    }
                }
            }
            debug!(?result, "Tick complete");
            ticks.push(result);
            vessel.advance(self.delta);
        }

        let final_report =
            ScienceReport::build(&*vessel, &*ledger, &mut ScienceSimulator::new());

        Ok(RunSummary {
            ticks,
            events: scheduler.event_log().clone(),
            manual_batches,
            science_banked: ledger.total_credited(),
            final_report,
        })
    }
}
