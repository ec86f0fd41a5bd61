//! Overlay report tests

use science_manager_core::report::{LineSource, ScienceReport};
use science_manager_core::host::{Instrument, ResultsDialog};
use science_manager_core::sandbox::{
    SandboxContainer, SandboxInstrument, SandboxLedger, SandboxResultsDialog, SandboxTransmitter,
    SandboxVessel,
};
use science_manager_core::valuation::ScienceSimulator;
use science_manager_core::{answer_results, DataUnit, DialogChoice, ResearchSubject};
use std::rc::Rc;

fn goo(amount: f64) -> DataUnit {
    DataUnit::new("mysteryGoo@MunSrf", amount)
        .with_title("Mystery Goo Observation")
        .with_transmit_value(0.5)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn lander(ledger: &Rc<SandboxLedger>) -> SandboxVessel {
    let thermometer = SandboxInstrument::new("thermo", "temperatureScan", goo(6.0));
    thermometer.load(goo(6.0));

    SandboxVessel::new("lander")
        .with_container(SandboxContainer::new("Science Jr.").with_data(goo(6.0)))
        .with_instrument(thermometer)
        .with_instrument(SandboxInstrument::new(
            "baro",
            "barometerScan",
            DataUnit::new("pressure@MunSrf", 1.0),
        ))
        .with_transmitter(SandboxTransmitter::new("dish", 3.0, Rc::clone(ledger)))
        .with_transmitter(SandboxTransmitter::new("whip", 1.5, Rc::clone(ledger)))
}

#[test]
fn test_report_layout() {
    let ledger = Rc::new(SandboxLedger::new());
    ledger.insert(ResearchSubject::new("mysteryGoo@MunSrf", 10.0));
    let vessel = SandboxVessel::new("lander")
        .with_container(
            SandboxContainer::new("Pod")
                .with_data(goo(1.0).with_title("Zeta"))
                .with_data(goo(1.0).with_title("Alpha")),
        )
        .with_container(SandboxContainer::new("Lab").with_data(goo(1.0)))
        .with_instrument(SandboxInstrument::new("i-z", "zScan", goo(1.0)))
        .with_instrument(SandboxInstrument::new("i-a", "aScan", goo(1.0)));

    let report = ScienceReport::build(&vessel, &*ledger, &mut ScienceSimulator::new());

    let sources: Vec<String> = report
        .lines
        .iter()
        .map(|line| match &line.source {
            LineSource::Container { title } => format!(
                "{title}/{}",
                line.value.as_ref().map_or("", |v| v.data.title.as_str())
            ),
            LineSource::Instrument { experiment_id, .. } => experiment_id.clone(),
        })
        .collect();
    assert_eq!(sources, vec!["Lab/Mystery Goo Observation", "Pod/Alpha", "Pod/Zeta", "aScan", "zScan"]);
}

#[test]
fn test_report_values_share_one_pass() {
    let ledger = Rc::new(SandboxLedger::new());
    ledger.insert(ResearchSubject::new("mysteryGoo@MunSrf", 10.0));
    let vessel = lander(&ledger);

    let report = ScienceReport::build(&vessel, &*ledger, &mut ScienceSimulator::new());

    let values: Vec<(f64, f64)> = report
        .valued_lines()
        .map(|(_, value)| (value.keep, value.transmit))
        .collect();
    assert_eq!(values.len(), 2);
    assert_close(values[0].0, 6.0);
    assert_close(values[0].1, 3.0);
    // Second unit of the same subject is diminished separately per mode
    assert_close(values[1].0, 2.4);
    assert_close(values[1].1, 2.1);

    assert_close(report.return_science, 8.4);
    assert_close(report.transmit_science, 5.1);
    assert_close(report.data_amount, 12.0);
}

#[test]
fn test_empty_instrument_has_a_line_without_value() {
    let ledger = Rc::new(SandboxLedger::new());
    let vessel = lander(&ledger);

    let report = ScienceReport::build(&vessel, &*ledger, &mut ScienceSimulator::new());

    let baro = report
        .lines
        .iter()
        .find(|line| matches!(&line.source, LineSource::Instrument { id, .. } if id == "baro"))
        .unwrap();
    assert!(baro.value.is_none());
}

#[test]
fn test_energy_cost_uses_cheapest_idle_device() {
    let ledger = Rc::new(SandboxLedger::new());
    ledger.insert(ResearchSubject::new("mysteryGoo@MunSrf", 10.0));
    let vessel = lander(&ledger);

    let report = ScienceReport::build(&vessel, &*ledger, &mut ScienceSimulator::new());
    assert_close(report.energy_cost, 18.0);

    vessel.transmitter("whip").unwrap().set_busy(true);
    let report = ScienceReport::build(&vessel, &*ledger, &mut ScienceSimulator::new());
    assert_close(report.energy_cost, 36.0);

    vessel.transmitter("dish").unwrap().set_busy(true);
    let report = ScienceReport::build(&vessel, &*ledger, &mut ScienceSimulator::new());
    assert_eq!(report.energy_cost, 0.0);
}

#[test]
fn test_rebuilding_starts_a_fresh_pass() {
    let ledger = Rc::new(SandboxLedger::new());
    ledger.insert(ResearchSubject::new("mysteryGoo@MunSrf", 10.0));
    let vessel = lander(&ledger);
    let mut simulator = ScienceSimulator::new();

    let first = ScienceReport::build(&vessel, &*ledger, &mut simulator);
    let second = ScienceReport::build(&vessel, &*ledger, &mut simulator);

    assert_eq!(first, second);
}

#[test]
fn test_unknown_subject_contributes_data_but_no_science() {
    let ledger = Rc::new(SandboxLedger::new());
    let vessel = lander(&ledger);

    let report = ScienceReport::build(&vessel, &*ledger, &mut ScienceSimulator::new());

    assert_eq!(report.return_science, 0.0);
    assert_eq!(report.transmit_science, 0.0);
    assert_close(report.data_amount, 12.0);
}

#[test]
fn test_report_serializes() {
    let ledger = Rc::new(SandboxLedger::new());
    ledger.insert(ResearchSubject::new("mysteryGoo@MunSrf", 10.0));
    let vessel = lander(&ledger);

    let report = ScienceReport::build(&vessel, &*ledger, &mut ScienceSimulator::new());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["lines"].as_array().unwrap().len(), 3);
    assert_eq!(json["lines"][0]["source"]["Container"]["title"], "Science Jr.");
}

// ============================================================================
// Results dialog
// ============================================================================

fn loaded(id: &str, experiment_id: &str, subject: &str) -> SandboxInstrument {
    let instrument = SandboxInstrument::new(id, experiment_id, DataUnit::new(subject, 2.0));
    instrument.load(DataUnit::new(subject, 2.0));
    instrument
}

#[test]
fn test_results_pages_keep_uncapped_and_discard_capped() {
    let ledger = Rc::new(SandboxLedger::new());
    ledger.insert(ResearchSubject::new("temp@Minmus", 10.0).with_current_science(9.0));
    ledger.insert(ResearchSubject::new("seismic@Minmus", 10.0).with_current_science(10.0));
    let vessel = SandboxVessel::new("hopper")
        .with_instrument(loaded("thermo", "temperatureScan", "temp@Minmus"))
        .with_instrument(loaded("seismo", "seismicScan", "seismic@Minmus"));
    let dialog = SandboxResultsDialog::new();
    dialog.open(vessel.instrument("thermo").unwrap());
    dialog.open(vessel.instrument("seismo").unwrap());

    let answers = answer_results(&vessel, &*ledger, &dialog);

    assert_eq!(
        answers,
        vec![
            ("seismo".to_string(), DialogChoice::Discard),
            ("thermo".to_string(), DialogChoice::Keep),
        ]
    );
    assert!(dialog.open_pages().is_empty());
    assert!(vessel.instrument("thermo").unwrap().held_data().is_some());
    assert!(vessel.instrument("seismo").unwrap().held_data().is_none());
}

#[test]
fn test_results_pages_only_touch_open_pages_with_data() {
    let ledger = Rc::new(SandboxLedger::new());
    let empty = SandboxInstrument::new("baro", "barometerScan", DataUnit::new("pressure@Minmus", 1.0));
    let vessel = SandboxVessel::new("hopper")
        .with_instrument(loaded("thermo", "temperatureScan", "temp@Minmus"))
        .with_instrument(loaded("goo", "mysteryGoo", "goo@Minmus"))
        .with_instrument(empty);
    let dialog = SandboxResultsDialog::new();
    dialog.open(vessel.instrument("thermo").unwrap());
    dialog.open(vessel.instrument("baro").unwrap());

    let answers = answer_results(&vessel, &*ledger, &dialog);

    // Unknown subject counts as uncapped; the empty instrument's page stays up
    assert_eq!(answers, vec![("thermo".to_string(), DialogChoice::Keep)]);
    assert_eq!(dialog.answers(), answers);
    assert_eq!(dialog.open_pages(), vec!["baro".to_string()]);
    assert!(vessel.instrument("goo").unwrap().held_data().is_some());
}
