//! Manual overlay action tests

use science_manager_core::host::Instrument;
use science_manager_core::sandbox::{
    SandboxInstrument, SandboxLedger, SandboxTransmitter, SandboxVessel,
};
use science_manager_core::{
    deploy_all, send_all, toggle_instrument, DataUnit, ManualAction, ResearchSubject,
};
use std::rc::Rc;

fn instrument(id: &str, subject: &str) -> SandboxInstrument {
    SandboxInstrument::new(id, id, DataUnit::new(subject, 2.0))
}

fn loaded(id: &str, subject: &str) -> SandboxInstrument {
    let instrument = instrument(id, subject);
    instrument.load(DataUnit::new(subject, 2.0));
    instrument
}

fn ledger() -> Rc<SandboxLedger> {
    let ledger = Rc::new(SandboxLedger::new());
    ledger.insert(ResearchSubject::new("temp@Duna", 10.0));
    ledger.insert(ResearchSubject::new("pressure@Duna", 10.0));
    ledger.insert(ResearchSubject::new("seismic@Duna", 10.0).with_current_science(10.0));
    ledger
}

// ============================================================================
// Deploy All
// ============================================================================

#[test]
fn test_deploy_all_skips_deployed_instruments() {
    let vessel = SandboxVessel::new("rover")
        .with_instrument(instrument("a", "temp@Duna"))
        .with_instrument(instrument("b", "pressure@Duna"))
        .with_instrument(loaded("c", "seismic@Duna"));

    assert_eq!(deploy_all(&vessel), 2);
    assert!(vessel.instrument("a").unwrap().is_deployed());
    assert_eq!(vessel.instrument("c").unwrap().deploy_commands(), 0);

    assert_eq!(deploy_all(&vessel), 0);
}

// ============================================================================
// Toggle
// ============================================================================

#[test]
fn test_toggle_resets_instrument_with_data() {
    let loaded = loaded("a", "temp@Duna");

    assert_eq!(toggle_instrument(&loaded), ManualAction::Reset);
    assert!(loaded.held_data().is_none());
}

#[test]
fn test_toggle_deploys_empty_instrument() {
    let empty = instrument("a", "temp@Duna");

    assert_eq!(toggle_instrument(&empty), ManualAction::Deployed);
    assert!(empty.is_deployed());
}

// ============================================================================
// Send All
// ============================================================================

#[test]
fn test_send_all_batches_valuable_and_discards_capped() {
    let ledger = ledger();
    let vessel = SandboxVessel::new("rover")
        .with_instrument(loaded("thermo", "temp@Duna"))
        .with_instrument(loaded("baro", "pressure@Duna"))
        .with_instrument(loaded("seismo", "seismic@Duna"))
        .with_instrument(instrument("idle", "temp@Duna"))
        .with_transmitter(SandboxTransmitter::new("dish", 4.0, Rc::clone(&ledger)))
        .with_transmitter(SandboxTransmitter::new("whip", 1.0, Rc::clone(&ledger)));

    let outcome = send_all(&vessel, &*ledger).unwrap();

    assert_eq!(outcome.device_id, "whip");
    assert_eq!(outcome.transmitted, vec!["thermo", "baro"]);
    assert_eq!(outcome.discarded, vec!["seismo"]);

    let whip = vessel.transmitter("whip").unwrap();
    assert_eq!(whip.jobs_started(), 1);
    assert_eq!(vessel.transmitter("dish").unwrap().jobs_started(), 0);
    for id in ["thermo", "baro", "seismo"] {
        let instrument = vessel.instrument(id).unwrap();
        assert_eq!(instrument.reset_commands(), 1);
        assert!(instrument.held_data().is_none());
    }
    assert_eq!(vessel.instrument("idle").unwrap().reset_commands(), 0);

    whip.advance(4.0);
    assert_eq!(whip.delivered().len(), 2);
    assert_eq!(ledger.total_credited(), 4.0);
}

#[test]
fn test_send_all_with_every_device_busy_does_nothing() {
    let ledger = ledger();
    let vessel = SandboxVessel::new("rover")
        .with_instrument(loaded("thermo", "temp@Duna"))
        .with_transmitter(SandboxTransmitter::new("whip", 1.0, Rc::clone(&ledger)));
    vessel.transmitter("whip").unwrap().set_busy(true);

    assert!(send_all(&vessel, &*ledger).is_none());
    assert!(vessel.instrument("thermo").unwrap().held_data().is_some());
}

#[test]
fn test_send_all_without_data_starts_no_job() {
    let ledger = ledger();
    let vessel = SandboxVessel::new("rover")
        .with_instrument(instrument("thermo", "temp@Duna"))
        .with_transmitter(SandboxTransmitter::new("whip", 1.0, Rc::clone(&ledger)));

    let outcome = send_all(&vessel, &*ledger).unwrap();

    assert!(outcome.transmitted.is_empty());
    assert!(outcome.discarded.is_empty());
    assert_eq!(vessel.transmitter("whip").unwrap().jobs_started(), 0);
}
