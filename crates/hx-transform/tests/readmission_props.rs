//! Property tests: the sorted sweep agrees with the pairwise definition.

use chrono::{Days, NaiveDate};
use hx_model::{Encounter, ReadmissionRule};
use hx_transform::{readmission_flags, readmission_flags_pairwise};
use proptest::prelude::*;

fn arb_encounter() -> impl Strategy<Value = Encounter> {
    (
        0u8..4,
        0u64..120,
        prop::sample::select(vec!["inpatient", "outpatient", "emergency"]),
    )
        .prop_map(|(patient, offset, kind)| {
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            Encounter {
                encounter_id: String::new(),
                patient_id: format!("P{patient}"),
                start_date: base + Days::new(offset),
                encounter_type: Some(kind.to_string()),
                facility: None,
                was_readmit: false,
            }
        })
}

proptest! {
    #[test]
    fn sweep_matches_pairwise(
        encounters in prop::collection::vec(arb_encounter(), 0..40),
        window_days in 0u32..45,
    ) {
        let rule = ReadmissionRule { window_days, ..ReadmissionRule::default() };
        prop_assert_eq!(
            readmission_flags(&encounters, &rule),
            readmission_flags_pairwise(&encounters, &rule)
        );
    }

    #[test]
    fn non_candidates_never_flagged(encounters in prop::collection::vec(arb_encounter(), 0..40)) {
        let rule = ReadmissionRule::default();
        let flags = readmission_flags(&encounters, &rule);
        for (encounter, flag) in encounters.iter().zip(flags) {
            if !encounter.is_type("inpatient") {
                prop_assert!(!flag);
            }
        }
    }
}
