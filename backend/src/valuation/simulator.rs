//! Pass-scoped valuation with shared diminishing-returns bookkeeping

use crate::host::ResearchLedger;
use crate::models::{DataUnit, ResearchSubject, SubjectKey};
use serde::Serialize;
use std::collections::HashMap;

/// Whether data is valued as recovered in person or as transmitted home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValuationMode {
    Keep,
    Transmit,
}

impl ValuationMode {
    /// Multiplier this mode applies to the data amount
    pub fn factor(self, data: &DataUnit) -> f64 {
        match self {
            ValuationMode::Keep => 1.0,
            ValuationMode::Transmit => data.transmit_value,
        }
    }
}

/// Tally key: one running total per subject and mode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValuationKey {
    pub subject: SubjectKey,
    pub mode: ValuationMode,
}

impl ValuationKey {
    pub fn new(subject: SubjectKey, mode: ValuationMode) -> Self {
        Self { subject, mode }
    }
}

/// Running total for one key within a pass
///
/// # Invariants
///
/// - `remaining_fraction` stays within `[0, 1]`
/// - `remaining_fraction` never increases while the pass lasts
/// - `accumulated_science` never exceeds the subject's cap through folding
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubjectTally {
    /// Banked science plus everything folded in this pass
    pub accumulated_science: f64,
    /// Fraction of full value the next unit is worth
    pub remaining_fraction: f64,
}

impl SubjectTally {
    /// Starting point for a subject first seen in this pass
    fn opening(subject: &ResearchSubject) -> Self {
        Self {
            accumulated_science: subject.current_science,
            remaining_fraction: subject.scientific_value.clamp(0.0, 1.0),
        }
    }

    /// Value `data` against this tally, fold the result in, and return it
    fn fold(&mut self, subject: &ResearchSubject, data: &DataUnit, mode: ValuationMode) -> f64 {
        let headroom = (subject.science_cap - self.accumulated_science).max(0.0);
        let science = raw_value(subject, data, mode, self.remaining_fraction).min(headroom);

        self.accumulated_science += science;
        let implied = (1.0 - self.accumulated_science / subject.science_cap).max(0.0);
        self.remaining_fraction = self.remaining_fraction.min(implied);

        science
    }
}

/// `amount * factor / scale * subject_value * fraction`, capped at the subject cap
pub(crate) fn raw_value(
    subject: &ResearchSubject,
    data: &DataUnit,
    mode: ValuationMode,
    fraction: f64,
) -> f64 {
    let science = data.data_amount * mode.factor(data) / subject.data_scale
        * subject.subject_value
        * fraction;
    science.min(subject.science_cap).max(0.0)
}

/// Per-pass valuation accumulator
///
/// # Example
///
/// ```
/// use science_manager_core::host::ResearchLedger;
/// use science_manager_core::valuation::{ScienceSimulator, ValuationMode};
/// use science_manager_core::{DataUnit, ResearchSubject, SubjectKey};
///
/// struct OneSubject(ResearchSubject);
///
/// impl ResearchLedger for OneSubject {
///     fn subject(&self, key: &SubjectKey) -> Option<ResearchSubject> {
///         (key == &self.0.key).then(|| self.0.clone())
///     }
/// }
///
/// let ledger = OneSubject(ResearchSubject::new("seismic@Mun", 10.0));
/// let data = DataUnit::new("seismic@Mun", 6.0);
///
/// let mut sim = ScienceSimulator::new();
/// let first = sim.evaluate(&ledger, &data, ValuationMode::Keep);
/// let second = sim.evaluate(&ledger, &data, ValuationMode::Keep);
/// assert_eq!(first, 6.0);
/// assert!(second < first);
///
/// sim.reset_pass();
/// assert_eq!(sim.evaluate(&ledger, &data, ValuationMode::Keep), first);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScienceSimulator {
    tallies: HashMap<ValuationKey, SubjectTally>,
}

impl ScienceSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything folded in so far and start a new pass
    pub fn reset_pass(&mut self) {
        self.tallies.clear();
    }

    /// Marginal value of `data` given everything already folded in this pass
    ///
    /// Unknown subjects, and subjects with a non-positive cap or data scale,
    /// are worth 0 and leave the pass untouched.
    pub fn evaluate(
        &mut self,
        ledger: &dyn ResearchLedger,
        data: &DataUnit,
        mode: ValuationMode,
    ) -> f64 {
        let Some(subject) = ledger.subject(&data.subject) else {
            return 0.0;
        };
        if !subject.is_valuable() {
            return 0.0;
        }

        let key = ValuationKey::new(data.subject.clone(), mode);
        self.tallies
            .entry(key)
            .or_insert_with(|| SubjectTally::opening(&subject))
            .fold(&subject, data, mode)
    }

    /// Same as [`evaluate`](Self::evaluate), with absent data worth 0
    pub fn evaluate_held(
        &mut self,
        ledger: &dyn ResearchLedger,
        data: Option<&DataUnit>,
        mode: ValuationMode,
    ) -> f64 {
        match data {
            Some(data) => self.evaluate(ledger, data, mode),
            None => 0.0,
        }
    }

    /// Current tally for a subject and mode, if referenced this pass
    pub fn tally(&self, subject: &SubjectKey, mode: ValuationMode) -> Option<SubjectTally> {
        self.tallies
            .get(&ValuationKey::new(subject.clone(), mode))
            .copied()
    }

    /// Number of keys referenced this pass
    pub fn tracked_keys(&self) -> usize {
        self.tallies.len()
    }
}
