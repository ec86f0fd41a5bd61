//! Simulated vessel, data container and flight context

use crate::host::{
    DataContainer, DeviceDirectory, FlightContext, Instrument, TransmissionDevice, Vessel,
};
use crate::models::DataUnit;
use crate::sandbox::instrument::SandboxInstrument;
use crate::sandbox::transmitter::SandboxTransmitter;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Storage module holding collected data
#[derive(Debug)]
pub struct SandboxContainer {
    title: String,
    data: RefCell<Vec<DataUnit>>,
}

impl SandboxContainer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            data: RefCell::new(Vec::new()),
        }
    }

    pub fn with_data(self, data: DataUnit) -> Self {
        self.store(data);
        self
    }

    pub fn store(&self, data: DataUnit) {
        self.data.borrow_mut().push(data);
    }
}

impl DataContainer for SandboxContainer {
    fn title(&self) -> &str {
        &self.title
    }

    fn stored_data(&self) -> Vec<DataUnit> {
        self.data.borrow().clone()
    }
}

/// Vessel assembled from sandbox parts
#[derive(Debug)]
pub struct SandboxVessel {
    id: String,
    instruments: Vec<Rc<SandboxInstrument>>,
    transmitters: Vec<Rc<SandboxTransmitter>>,
    containers: Vec<Rc<SandboxContainer>>,
}

impl SandboxVessel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            instruments: Vec::new(),
            transmitters: Vec::new(),
            containers: Vec::new(),
        }
    }

    pub fn with_instrument(mut self, instrument: SandboxInstrument) -> Self {
        self.instruments.push(Rc::new(instrument));
        self
    }

    pub fn with_transmitter(mut self, transmitter: SandboxTransmitter) -> Self {
        self.transmitters.push(Rc::new(transmitter));
        self
    }

    pub fn with_container(mut self, container: SandboxContainer) -> Self {
        self.containers.push(Rc::new(container));
        self
    }

    pub fn instrument(&self, id: &str) -> Option<Rc<SandboxInstrument>> {
        self.instruments.iter().find(|i| i.id() == id).cloned()
    }

    pub fn transmitter(&self, id: &str) -> Option<Rc<SandboxTransmitter>> {
        self.transmitters.iter().find(|t| t.id() == id).cloned()
    }

    pub fn sandbox_instruments(&self) -> &[Rc<SandboxInstrument>] {
        &self.instruments
    }

    pub fn sandbox_transmitters(&self) -> &[Rc<SandboxTransmitter>] {
        &self.transmitters
    }

    /// Let `delta` units of game time pass for every part
    pub fn advance(&self, delta: f64) {
        for instrument in &self.instruments {
            instrument.advance(delta);
        }
        for transmitter in &self.transmitters {
            transmitter.advance(delta);
        }
    }
}

impl DeviceDirectory for SandboxVessel {
    fn transmission_devices(&self) -> Vec<Rc<dyn TransmissionDevice>> {
        self.transmitters
            .iter()
            .map(|t| Rc::clone(t) as Rc<dyn TransmissionDevice>)
            .collect()
    }
}

impl Vessel for SandboxVessel {
    fn id(&self) -> &str {
        &self.id
    }

    fn instruments(&self) -> Vec<Rc<dyn Instrument>> {
        self.instruments
            .iter()
            .map(|i| Rc::clone(i) as Rc<dyn Instrument>)
            .collect()
    }

    fn containers(&self) -> Vec<Rc<dyn DataContainer>> {
        self.containers
            .iter()
            .map(|c| Rc::clone(c) as Rc<dyn DataContainer>)
            .collect()
    }
}

/// Which sandbox vessel the "player" is flying
#[derive(Debug, Default)]
pub struct SandboxFlight {
    active: RefCell<Option<Rc<SandboxVessel>>>,
    on_eva: Cell<bool>,
}

impl SandboxFlight {
    pub fn flying(vessel: Rc<SandboxVessel>) -> Self {
        Self {
            active: RefCell::new(Some(vessel)),
            on_eva: Cell::new(false),
        }
    }

    /// Take control of another vessel (or of none)
    pub fn switch_to(&self, vessel: Option<Rc<SandboxVessel>>) {
        *self.active.borrow_mut() = vessel;
    }

    pub fn set_eva(&self, on_eva: bool) {
        self.on_eva.set(on_eva);
    }

    pub fn sandbox_vessel(&self) -> Option<Rc<SandboxVessel>> {
        self.active.borrow().clone()
    }
}

impl FlightContext for SandboxFlight {
    fn active_vessel(&self) -> Option<Rc<dyn Vessel>> {
        self.active
            .borrow()
            .clone()
            .map(|vessel| vessel as Rc<dyn Vessel>)
    }

    fn is_on_eva(&self) -> bool {
        self.on_eva.get()
    }
}
