//! Simulated science instrument

use crate::core::time::sanitize_delta;
use crate::host::Instrument;
use crate::models::DataUnit;
use std::cell::RefCell;

#[derive(Debug, Default)]
struct InstrumentState {
    deployed: bool,
    data: Option<DataUnit>,
    /// Time left until a pending deploy completes
    deploying: Option<f64>,
    deploy_commands: usize,
    reset_commands: usize,
}

/// Instrument that yields the same data unit every time it deploys
#[derive(Debug)]
pub struct SandboxInstrument {
    id: String,
    experiment_id: String,
    yields: DataUnit,
    deploy_time: f64,
    state: RefCell<InstrumentState>,
}

impl SandboxInstrument {
    /// Instrument that deploys instantly
    pub fn new(id: impl Into<String>, experiment_id: impl Into<String>, yields: DataUnit) -> Self {
        Self {
            id: id.into(),
            experiment_id: experiment_id.into(),
            yields,
            deploy_time: 0.0,
            state: RefCell::new(InstrumentState::default()),
        }
    }

    /// Make deploys take `deploy_time` units of game time
    pub fn with_deploy_time(mut self, deploy_time: f64) -> Self {
        self.deploy_time = deploy_time;
        self
    }

    /// Put the instrument straight into the deployed state holding `data`
    pub fn load(&self, data: DataUnit) {
        let mut state = self.state.borrow_mut();
        state.deployed = true;
        state.deploying = None;
        state.data = Some(data);
    }

    /// Let `delta` units of game time pass
    pub fn advance(&self, delta: f64) {
        let mut state = self.state.borrow_mut();
        let Some(remaining) = state.deploying else {
            return;
        };
        let remaining = remaining - sanitize_delta(delta);
        if remaining <= 0.0 {
            state.deploying = None;
            state.deployed = true;
            state.data = Some(self.yields.clone());
        } else {
            state.deploying = Some(remaining);
        }
    }

    /// Deploy commands received, including ignored ones
    pub fn deploy_commands(&self) -> usize {
        self.state.borrow().deploy_commands
    }

    /// Reset commands received
    pub fn reset_commands(&self) -> usize {
        self.state.borrow().reset_commands
    }

    pub fn is_deploy_pending(&self) -> bool {
        self.state.borrow().deploying.is_some()
    }
}

impl Instrument for SandboxInstrument {
    fn id(&self) -> &str {
        &self.id
    }

    fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    fn is_deployed(&self) -> bool {
        self.state.borrow().deployed
    }

    fn held_data(&self) -> Option<DataUnit> {
        self.state.borrow().data.clone()
    }

    fn deploy(&self) {
        let mut state = self.state.borrow_mut();
        state.deploy_commands += 1;
        if state.deployed || state.deploying.is_some() {
            return;
        }
        if self.deploy_time > 0.0 {
            state.deploying = Some(self.deploy_time);
        } else {
            state.deployed = true;
            state.data = Some(self.yields.clone());
        }
    }

    fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.reset_commands += 1;
        state.deployed = false;
        state.deploying = None;
        state.data = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delayed_deploy_completes_after_advance() {
        let instrument =
            SandboxInstrument::new("goo-1", "mysteryGoo", DataUnit::new("goo@Kerbin", 3.0))
                .with_deploy_time(2.0);

        instrument.deploy();
        assert!(!instrument.is_deployed());
        assert!(instrument.is_deploy_pending());

        instrument.advance(1.0);
        assert!(!instrument.is_deployed());

        instrument.advance(1.0);
        assert!(instrument.is_deployed());
        assert_eq!(instrument.held_data().unwrap().data_amount, 3.0);
    }

    #[test]
    fn test_reset_discards_data() {
        let instrument =
            SandboxInstrument::new("goo-1", "mysteryGoo", DataUnit::new("goo@Kerbin", 3.0));
        instrument.deploy();
        instrument.reset();

        assert!(!instrument.is_deployed());
        assert!(instrument.held_data().is_none());
        assert_eq!(instrument.reset_commands(), 1);
    }
}
