//! Overlay Report
//!
//! Builds the numbers the science overlay shows on every redraw: what each
//! piece of data on the vessel is worth if brought home versus transmitted,
//! plus vessel-wide totals.
//!
//! # Layout
//!
//! Containers come first, ordered by title, each listing its data ordered by
//! data title. Instruments follow, ordered by experiment id; an instrument
//! without data still gets a line (the overlay shows a Deploy button for it).
//!
//! Open results pages are answered separately, see [`dialog`].
//!
//! All lines are valued in one [`ScienceSimulator`] pass, so the second
//! result for a subject shows its diminished worth.

pub mod dialog;
pub mod manual;

use crate::host::{ResearchLedger, Vessel};
use crate::models::DataUnit;
use crate::scheduler::cheapest_idle;
use crate::valuation::{ScienceSimulator, ValuationMode};
use serde::Serialize;

/// Where a report line's data sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LineSource {
    Container { title: String },
    Instrument { id: String, experiment_id: String },
}

/// Keep and transmit worth of one data unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineValue {
    pub data: DataUnit,
    pub keep: f64,
    pub transmit: f64,
}

/// One row of the overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub source: LineSource,
    /// `None` for an instrument holding no data
    pub value: Option<LineValue>,
}

/// Everything the overlay displays for a vessel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScienceReport {
    pub lines: Vec<ReportLine>,
    /// Points if every unit is recovered
    pub return_science: f64,
    /// Points if every unit is transmitted
    pub transmit_science: f64,
    /// Sum of all data amounts
    pub data_amount: f64,
    /// Resource needed to transmit everything on the cheapest idle device (0 if none)
    pub energy_cost: f64,
}

impl ScienceReport {
    /// Value every data unit on `vessel` in a fresh pass
    ///
    /// # Example
    ///
    /// ```
    /// use science_manager_core::report::ScienceReport;
    /// use science_manager_core::sandbox::{SandboxContainer, SandboxLedger, SandboxTransmitter, SandboxVessel};
    /// use science_manager_core::valuation::ScienceSimulator;
    /// use science_manager_core::{DataUnit, ResearchSubject};
    /// use std::rc::Rc;
    ///
    /// let ledger = Rc::new(SandboxLedger::new());
    /// ledger.insert(ResearchSubject::new("surfaceSample@Mun", 30.0));
    ///
    /// let vessel = SandboxVessel::new("lander")
    ///     .with_container(SandboxContainer::new("Science Jr.").with_data(
    ///         DataUnit::new("surfaceSample@Mun", 10.0).with_transmit_value(0.25),
    ///     ))
    ///     .with_transmitter(SandboxTransmitter::new("whip", 4.0, Rc::clone(&ledger)));
    ///
    /// let report = ScienceReport::build(&vessel, &*ledger, &mut ScienceSimulator::new());
    /// assert_eq!(report.return_science, 10.0);
    /// assert_eq!(report.transmit_science, 2.5);
    /// assert_eq!(report.energy_cost, 40.0);
    /// ```
    pub fn build(
        vessel: &dyn Vessel,
        ledger: &dyn ResearchLedger,
        simulator: &mut ScienceSimulator,
    ) -> Self {
        simulator.reset_pass();
        let mut report = ScienceReport::default();

        let mut containers = vessel.containers();
        containers.sort_by(|a, b| a.title().cmp(b.title()));
        for container in &containers {
            let mut stored = container.stored_data();
            stored.sort_by(|a, b| a.title.cmp(&b.title));
            for data in stored {
                let value = report.value(ledger, simulator, data);
                report.lines.push(ReportLine {
                    source: LineSource::Container {
                        title: container.title().to_string(),
                    },
                    value: Some(value),
                });
            }
        }

        let mut instruments = vessel.instruments();
        instruments.sort_by(|a, b| a.experiment_id().cmp(b.experiment_id()));
        for instrument in &instruments {
            let value = instrument
                .held_data()
                .map(|data| report.value(ledger, simulator, data));
            report.lines.push(ReportLine {
                source: LineSource::Instrument {
                    id: instrument.id().to_string(),
                    experiment_id: instrument.experiment_id().to_string(),
                },
                value,
            });
        }

        let devices = vessel.transmission_devices();
        report.energy_cost = cheapest_idle(&devices)
            .map(|device| report.data_amount * device.resource_cost())
            .unwrap_or(0.0);
        report
    }

    /// Fold one data unit into the pass and the totals
    fn value(
        &mut self,
        ledger: &dyn ResearchLedger,
        simulator: &mut ScienceSimulator,
        data: DataUnit,
    ) -> LineValue {
        let keep = simulator.evaluate(ledger, &data, ValuationMode::Keep);
        let transmit = simulator.evaluate(ledger, &data, ValuationMode::Transmit);
        self.return_science += keep;
        self.transmit_science += transmit;
        self.data_amount += data.data_amount;
        LineValue {
            data,
            keep,
            transmit,
        }
    }

    /// Lines that carry data
    pub fn valued_lines(&self) -> impl Iterator<Item = (&LineSource, &LineValue)> {
        self.lines
            .iter()
            .filter_map(|line| line.value.as_ref().map(|value| (&line.source, value)))
    }
}
