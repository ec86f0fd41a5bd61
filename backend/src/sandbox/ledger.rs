//! Research ledger backed by a map

use crate::host::ResearchLedger;
use crate::models::{DataUnit, ResearchSubject, SubjectKey};
use crate::valuation::{instant_value, ValuationMode};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Mutable research ledger
///
/// # Example
///
/// ```
/// use science_manager_core::sandbox::SandboxLedger;
/// use science_manager_core::{ResearchSubject, SubjectKey};
///
/// let ledger = SandboxLedger::new();
/// ledger.insert(ResearchSubject::new("evaReport@Mun", 8.0));
///
/// let credited = ledger.credit(&SubjectKey::new("evaReport@Mun"), 10.0);
/// assert_eq!(credited, 8.0);
/// assert_eq!(ledger.get(&SubjectKey::new("evaReport@Mun")).unwrap().scientific_value, 0.0);
/// ```
#[derive(Debug, Default)]
pub struct SandboxLedger {
    subjects: RefCell<HashMap<SubjectKey, ResearchSubject>>,
    total_credited: Cell<f64>,
}

impl SandboxLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a subject
    pub fn insert(&self, subject: ResearchSubject) {
        self.subjects.borrow_mut().insert(subject.key.clone(), subject);
    }

    pub fn get(&self, key: &SubjectKey) -> Option<ResearchSubject> {
        self.subjects.borrow().get(key).cloned()
    }

    /// Bank up to `points` for a subject; returns what the cap allowed
    pub fn credit(&self, key: &SubjectKey, points: f64) -> f64 {
        let mut subjects = self.subjects.borrow_mut();
        let Some(subject) = subjects.get_mut(key) else {
            return 0.0;
        };
        let credited = points.max(0.0).min(subject.headroom());
        subject.current_science += credited;
        subject.scientific_value = subject.derived_scientific_value();
        self.total_credited.set(self.total_credited.get() + credited);
        credited
    }

    /// Bank what `data` is worth when it arrives in `mode`
    pub fn submit(&self, data: &DataUnit, mode: ValuationMode) -> f64 {
        let Some(subject) = self.get(&data.subject) else {
            return 0.0;
        };
        let value = instant_value(&subject, data, mode, 0.0);
        self.credit(&data.subject, value)
    }

    /// Everything banked through this ledger so far
    pub fn total_credited(&self) -> f64 {
        self.total_credited.get()
    }
}

impl ResearchLedger for SandboxLedger {
    fn subject(&self, key: &SubjectKey) -> Option<ResearchSubject> {
        self.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_applies_transmit_penalty() {
        let ledger = SandboxLedger::new();
        ledger.insert(ResearchSubject::new("s", 10.0));

        let banked = ledger.submit(
            &DataUnit::new("s", 4.0).with_transmit_value(0.5),
            ValuationMode::Transmit,
        );

        assert_eq!(banked, 2.0);
        assert_eq!(ledger.get(&SubjectKey::new("s")).unwrap().current_science, 2.0);
    }

    #[test]
    fn test_credit_unknown_subject() {
        let ledger = SandboxLedger::new();
        assert_eq!(ledger.credit(&SubjectKey::new("nope"), 3.0), 0.0);
        assert_eq!(ledger.total_credited(), 0.0);
    }
}
