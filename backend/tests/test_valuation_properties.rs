//! Property tests for valuation invariants

use proptest::prelude::*;
use science_manager_core::sandbox::SandboxLedger;
use science_manager_core::valuation::{ScienceSimulator, ValuationMode};
use science_manager_core::{DataUnit, ResearchSubject, SubjectKey};

fn subject_strategy() -> impl Strategy<Value = ResearchSubject> {
    (1.0f64..200.0, 0.0f64..1.0, 0.1f64..5.0, 0.1f64..3.0).prop_map(
        |(cap, banked_share, data_scale, subject_value)| {
            ResearchSubject::new("prop@Kerbin", cap)
                .with_data_scale(data_scale)
                .with_subject_value(subject_value)
                .with_current_science(cap * banked_share)
        },
    )
}

proptest! {
    #[test]
    fn prop_tally_never_exceeds_cap(
        subject in subject_strategy(),
        amounts in prop::collection::vec(0.0f64..100.0, 1..12),
    ) {
        let cap = subject.science_cap;
        let ledger = SandboxLedger::new();
        ledger.insert(subject);
        let mut sim = ScienceSimulator::new();

        let mut previous_fraction = f64::INFINITY;
        for amount in amounts {
            let value = sim.evaluate(&ledger, &DataUnit::new("prop@Kerbin", amount), ValuationMode::Keep);
            prop_assert!(value >= 0.0);

            let tally = sim.tally(&SubjectKey::new("prop@Kerbin"), ValuationMode::Keep).unwrap();
            prop_assert!(tally.accumulated_science <= cap + 1e-9);
            prop_assert!((0.0..=1.0).contains(&tally.remaining_fraction));
            prop_assert!(tally.remaining_fraction <= previous_fraction);
            previous_fraction = tally.remaining_fraction;
        }
    }

    #[test]
    fn prop_transmit_never_beats_keep(
        subject in subject_strategy(),
        amount in 0.0f64..100.0,
        transmit_value in 0.0f64..=1.0,
    ) {
        let ledger = SandboxLedger::new();
        ledger.insert(subject);
        let data = DataUnit::new("prop@Kerbin", amount).with_transmit_value(transmit_value);

        let keep = ScienceSimulator::new().evaluate(&ledger, &data, ValuationMode::Keep);
        let transmit = ScienceSimulator::new().evaluate(&ledger, &data, ValuationMode::Transmit);

        prop_assert!(transmit <= keep + 1e-12);
    }

    #[test]
    fn prop_reset_pass_is_repeatable(
        subject in subject_strategy(),
        amount in 0.0f64..100.0,
    ) {
        let ledger = SandboxLedger::new();
        ledger.insert(subject);
        let data = DataUnit::new("prop@Kerbin", amount);
        let mut sim = ScienceSimulator::new();

        let first = sim.evaluate(&ledger, &data, ValuationMode::Keep);
        sim.evaluate(&ledger, &data, ValuationMode::Keep);
        sim.reset_pass();

        prop_assert_eq!(sim.evaluate(&ledger, &data, ValuationMode::Keep), first);
    }
}
