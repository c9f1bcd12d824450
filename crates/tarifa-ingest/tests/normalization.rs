//! Property tests for cell normalization.

use proptest::prelude::*;
use tarifa_ingest::{normalize_number, renormalize};
use tarifa_model::CellValue;

proptest! {
    #[test]
    fn normalization_is_idempotent(raw in ".{0,24}", integer in any::<bool>(), allow_text in any::<bool>()) {
        let once = normalize_number(&raw, integer, allow_text);
        let twice = renormalize(&once, integer, allow_text);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn integer_mode_never_has_fraction(raw in "[-$ ]{0,2}[0-9]{1,6}([.,][0-9]{1,3}){0,2}") {
        if let CellValue::Number(value) = normalize_number(&raw, true, false) {
            prop_assert_eq!(value, value.floor());
        }
    }

    #[test]
    fn plain_integers_round_trip(value in 0u32..1_000_000) {
        prop_assert_eq!(
            normalize_number(&value.to_string(), false, false),
            CellValue::Number(f64::from(value))
        );
    }
}
