//! Manual overlay actions
//!
//! The buttons the overlay offers while automatic mode is off. They act on
//! the host directly and keep no state of their own.

use crate::host::{Instrument, ResearchLedger, Vessel};
use crate::scheduler::cheapest_idle;
use std::rc::Rc;
use tracing::info;

/// What a per-instrument button press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualAction {
    Deployed,
    Reset,
}

/// Outcome of "Send All"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendAllOutcome {
    /// Device the batch went to
    pub device_id: String,
    /// Instruments reset because their subject was already capped
    pub discarded: Vec<String>,
    /// Instruments whose data went into the batch
    pub transmitted: Vec<String>,
}

/// Deploy every instrument on the vessel that is not deployed
///
/// Returns the number of deploy commands issued.
pub fn deploy_all(vessel: &dyn Vessel) -> usize {
    let mut issued = 0;
    for instrument in vessel.instruments() {
        if !instrument.is_deployed() {
            instrument.deploy();
            issued += 1;
        }
    }
    issued
}

/// Reset an instrument holding data, deploy one that holds none
pub fn toggle_instrument(instrument: &dyn Instrument) -> ManualAction {
    if instrument.held_data().is_some() {
        instrument.reset();
        ManualAction::Reset
    } else {
        instrument.deploy();
        ManualAction::Deployed
    }
}

/// Transmit all held data on the cheapest idle device in one batch
///
/// Data for subjects that are already capped is discarded first (its
/// instrument is reset) since sending it would earn nothing. Every
/// instrument whose data joins the batch is reset afterwards. Returns `None`
/// and does nothing when every device is busy.
pub fn send_all(vessel: &dyn Vessel, ledger: &dyn ResearchLedger) -> Option<SendAllOutcome> {
    let devices = vessel.transmission_devices();
    let device = Rc::clone(cheapest_idle(&devices)?);

    let mut discarded = Vec::new();
    let mut transmitted = Vec::new();
    let mut batch = Vec::new();

    for instrument in vessel.instruments() {
        let Some(data) = instrument.held_data() else {
            continue;
        };
        let capped = ledger
            .subject(&data.subject)
            .map_or(false, |subject| subject.is_capped());
        instrument.reset();
        if capped {
            discarded.push(instrument.id().to_string());
        } else {
            transmitted.push(instrument.id().to_string());
            batch.push(data);
        }
    }

    if !batch.is_empty() {
        info!(
            device_id = %device.id(),
            units = batch.len(),
            discarded = discarded.len(),
            "Sending all held data"
        );
        device.transmit(batch);
    }

    Some(SendAllOutcome {
        device_id: device.id().to_string(),
        discarded,
        transmitted,
    })
}
