//! Host Game Interface
//!
//! The science manager never touches the game's object model directly. The
//! integration layer implements the traits in this module on top of whatever
//! the host engine exposes, and the valuation and scheduling code only calls
//! these methods.
//!
//! # Ownership
//!
//! Host objects are shared, not owned: the game may hold the same instrument
//! that the scheduler is tracking, and both sides poll or command it on every
//! frame. Handles are therefore passed around as `Rc<dyn Trait>` and every
//! method takes `&self`; implementations use interior mutability for their
//! own state. Everything runs on the host's main thread.
//!
//! # Implementing a host
//!
//! ```rust
//! use science_manager_core::host::Instrument;
//! use science_manager_core::DataUnit;
//! use std::cell::{Cell, RefCell};
//!
//! struct Barometer {
//!     deployed: Cell<bool>,
//!     data: RefCell<Option<DataUnit>>,
//! }
//!
//! impl Instrument for Barometer {
//!     fn id(&self) -> &str {
//!         "barometer-1"
//!     }
//!
//!     fn experiment_id(&self) -> &str {
//!         "barometerScan"
//!     }
//!
//!     fn is_deployed(&self) -> bool {
//!         self.deployed.get()
//!     }
//!
//!     fn held_data(&self) -> Option<DataUnit> {
//!         self.data.borrow().clone()
//!     }
//!
//!     fn deploy(&self) {
//!         self.deployed.set(true);
//!         *self.data.borrow_mut() = Some(DataUnit::new("barometerScan@KerbinFlyingLow", 4.0));
//!     }
//!
//!     fn reset(&self) {
//!         self.deployed.set(false);
//!         self.data.borrow_mut().take();
//!     }
//! }
//! ```

use crate::models::{DataUnit, ResearchSubject, SubjectKey};
use std::rc::Rc;

/// A science instrument mounted on a vessel
///
/// Must tolerate being polled every tick. Commands are fire-and-forget: the
/// instrument may take several ticks to report the resulting state.
pub trait Instrument {
    /// Stable identity of this instrument instance
    fn id(&self) -> &str;

    /// Kind of experiment the instrument runs (used for display ordering)
    fn experiment_id(&self) -> &str;

    /// Whether the instrument is currently deployed
    fn is_deployed(&self) -> bool;

    /// Data currently held by the instrument, if any
    fn held_data(&self) -> Option<DataUnit>;

    /// Ask the instrument to deploy and collect data
    fn deploy(&self);

    /// Ask the instrument to stow itself and discard any held data
    fn reset(&self);
}

/// A device that sends data home for credit
///
/// One job at a time: while busy, the device must not be handed more data.
pub trait TransmissionDevice {
    fn id(&self) -> &str;

    /// Whether a transmission is in progress
    fn is_busy(&self) -> bool;

    /// Resource (electric charge) spent per unit of data sent
    fn resource_cost(&self) -> f64;

    /// Start sending the given data; claims the device
    fn transmit(&self, data: Vec<DataUnit>);
}

/// Storage for data that has been collected and removed from instruments
pub trait DataContainer {
    /// Display name; also the key the overlay sorts containers by
    fn title(&self) -> &str;

    fn stored_data(&self) -> Vec<DataUnit>;
}

/// Lists the transmission devices reachable by a vessel
///
/// Order is arbitrary; each device appears once.
pub trait DeviceDirectory {
    fn transmission_devices(&self) -> Vec<Rc<dyn TransmissionDevice>>;
}

/// A vessel the player can control
pub trait Vessel: DeviceDirectory {
    fn id(&self) -> &str;

    fn instruments(&self) -> Vec<Rc<dyn Instrument>>;

    fn containers(&self) -> Vec<Rc<dyn DataContainer>>;
}

/// The host's experiment-results dialog
///
/// Optional: hosts that never pop a results page after a deploy don't need
/// one. Choices refer to pages by instrument id; a choice for an instrument
/// without an open page is ignored.
pub trait ResultsDialog {
    /// Instruments whose results page is waiting for the player
    fn open_pages(&self) -> Vec<String>;

    /// Close the page and leave the data in the instrument
    fn keep(&self, instrument_id: &str);

    /// Close the page and throw the data away
    fn discard(&self, instrument_id: &str);
}

/// The player's research standing, read-only to the core
pub trait ResearchLedger {
    /// Current snapshot of a subject, or `None` if the ledger has never heard of it
    fn subject(&self, key: &SubjectKey) -> Option<ResearchSubject>;
}

/// Which vessel the player is flying right now
pub trait FlightContext {
    /// The vessel currently under control, if any
    fn active_vessel(&self) -> Option<Rc<dyn Vessel>>;

    /// Whether the player is outside any vessel (EVA)
    fn is_on_eva(&self) -> bool;
}

impl<T: ResearchLedger + ?Sized> ResearchLedger for Rc<T> {
    fn subject(&self, key: &SubjectKey) -> Option<ResearchSubject> {
        (**self).subject(key)
    }
}
