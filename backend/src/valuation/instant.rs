//! Single-shot valuation against live ledger state

use super::simulator::{raw_value, ValuationMode};
use crate::host::ResearchLedger;
use crate::models::{DataUnit, ResearchSubject};

/// Subjects within this many points of their cap are treated as exhausted
pub const DEFAULT_NEAR_CAP_EPSILON: f64 = 0.01;

/// Value of `data` against `subject` as it stands right now, ignoring any pass
///
/// Returns exactly 0 once `current_science >= science_cap - near_cap_epsilon`.
pub fn instant_value(
    subject: &ResearchSubject,
    data: &DataUnit,
    mode: ValuationMode,
    near_cap_epsilon: f64,
) -> f64 {
    if !subject.is_valuable() || subject.is_near_cap(near_cap_epsilon) {
        return 0.0;
    }
    raw_value(subject, data, mode, subject.scientific_value.clamp(0.0, 1.0))
}

/// What transmitting `data` would earn right now; 0 for absent data or unknown subjects
///
/// # Example
///
/// ```
/// use science_manager_core::host::ResearchLedger;
/// use science_manager_core::valuation::{transmit_value_now, DEFAULT_NEAR_CAP_EPSILON};
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
/// let data = DataUnit::new("goo@Minmus", 4.0).with_transmit_value(0.5);
///
/// let fresh = OneSubject(ResearchSubject::new("goo@Minmus", 10.0));
/// assert_eq!(transmit_value_now(&fresh, Some(&data), DEFAULT_NEAR_CAP_EPSILON), 2.0);
///
/// let done = OneSubject(ResearchSubject::new("goo@Minmus", 10.0).with_current_science(9.995));
/// assert_eq!(transmit_value_now(&done, Some(&data), DEFAULT_NEAR_CAP_EPSILON), 0.0);
/// ```
pub fn transmit_value_now(
    ledger: &dyn ResearchLedger,
    data: Option<&DataUnit>,
    near_cap_epsilon: f64,
) -> f64 {
    let Some(data) = data else {
        return 0.0;
    };
    match ledger.subject(&data.subject) {
        Some(subject) => instant_value(&subject, data, ValuationMode::Transmit, near_cap_epsilon),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_value_ignores_headroom() {
        // Single-shot values are only capped by the subject cap, like the host reports them.
        let subject = ResearchSubject::new("s", 10.0).with_current_science(5.0);
        let data = DataUnit::new("s", 20.0);

        let value = instant_value(&subject, &data, ValuationMode::Keep, DEFAULT_NEAR_CAP_EPSILON);

        assert!((value - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_instant_value_just_outside_epsilon() {
        let subject = ResearchSubject::new("s", 10.0).with_current_science(9.9);
        let data = DataUnit::new("s", 10.0);

        let value = instant_value(&subject, &data, ValuationMode::Transmit, DEFAULT_NEAR_CAP_EPSILON);

        assert!(value > 0.0);
    }
}
