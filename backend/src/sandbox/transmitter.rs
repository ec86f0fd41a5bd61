//! Simulated transmission device

use crate::core::time::sanitize_delta;
use crate::host::TransmissionDevice;
use crate::models::DataUnit;
use crate::sandbox::ledger::SandboxLedger;
use crate::valuation::ValuationMode;
use std::cell::RefCell;
use std::rc::Rc;

/// Time a transmitter needs per unit of data, unless overridden
pub const DEFAULT_TIME_PER_UNIT: f64 = 1.0;

#[derive(Debug)]
struct Job {
    data: Vec<DataUnit>,
    remaining: f64,
}

#[derive(Debug, Default)]
struct TransmitterState {
    job: Option<Job>,
    forced_busy: bool,
    jobs_started: usize,
    delivered: Vec<DataUnit>,
}

/// Transmitter that credits the ledger when a job finishes
#[derive(Debug)]
pub struct SandboxTransmitter {
    id: String,
    resource_cost: f64,
    time_per_unit: f64,
    ledger: Rc<SandboxLedger>,
    state: RefCell<TransmitterState>,
}

impl SandboxTransmitter {
    pub fn new(id: impl Into<String>, resource_cost: f64, ledger: Rc<SandboxLedger>) -> Self {
        Self {
            id: id.into(),
            resource_cost,
            time_per_unit: DEFAULT_TIME_PER_UNIT,
            ledger,
            state: RefCell::new(TransmitterState::default()),
        }
    }

    /// Game time needed per unit of data sent
    pub fn with_time_per_unit(mut self, time_per_unit: f64) -> Self {
        self.time_per_unit = time_per_unit;
        self
    }

    /// Mark the device busy (or free) regardless of jobs, as if something else holds it
    pub fn set_busy(&self, busy: bool) {
        self.state.borrow_mut().forced_busy = busy;
    }

    /// Let `delta` units of game time pass; a finished job is credited to the ledger
    pub fn advance(&self, delta: f64) {
        let finished = {
            let mut state = self.state.borrow_mut();
            let Some(job) = state.job.as_mut() else {
                return;
            };
            job.remaining -= sanitize_delta(delta);
            if job.remaining > 0.0 {
                return;
            }
            state.job.take()
        };

        if let Some(job) = finished {
            for data in &job.data {
                self.ledger.submit(data, ValuationMode::Transmit);
            }
            self.state.borrow_mut().delivered.extend(job.data);
        }
    }

    /// Number of `transmit` calls received
    pub fn jobs_started(&self) -> usize {
        self.state.borrow().jobs_started
    }

    /// Every data unit delivered so far
    pub fn delivered(&self) -> Vec<DataUnit> {
        self.state.borrow().delivered.clone()
    }
}

impl TransmissionDevice for SandboxTransmitter {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_busy(&self) -> bool {
        let state = self.state.borrow();
        state.forced_busy || state.job.is_some()
    }

    fn resource_cost(&self) -> f64 {
        self.resource_cost
    }

    fn transmit(&self, data: Vec<DataUnit>) {
        let remaining = data.iter().map(|d| d.data_amount).sum::<f64>() * self.time_per_unit;
        let mut state = self.state.borrow_mut();
        state.jobs_started += 1;
        state.job = Some(Job { data, remaining });
    }
}
