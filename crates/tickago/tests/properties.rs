//! Property tests for the calendar difference engine.

use proptest::prelude::*;
use tickago::{compare, format_diff, parse_date, select_unit, Labels, DEFAULT_NOW};

/// 1970-01-01 .. 2100-01-01 in epoch milliseconds.
fn epoch_millis() -> impl Strategy<Value = i64> {
    0i64..4_102_444_800_000
}

proptest! {
    #[test]
    fn same_instant_is_all_zero(a in epoch_millis()) {
        let diff = compare(a, a).unwrap();
        prop_assert!(diff.is_zero());
        prop_assert!(!diff.is_future);
        prop_assert_eq!(diff.raw.milliseconds, 0.0);
    }

    #[test]
    fn direction_follows_argument_order(a in epoch_millis(), b in epoch_millis()) {
        let forward = compare(a, b).unwrap();
        let backward = compare(b, a).unwrap();
        prop_assert_eq!(forward.is_future, b > a);
        prop_assert_eq!(backward.is_future, a > b);
        prop_assert_eq!(
            (forward.years, forward.months, forward.days, forward.hours, forward.minutes, forward.seconds),
            (backward.years, backward.months, backward.days, backward.hours, backward.minutes, backward.seconds)
        );
    }

    #[test]
    fn fields_stay_within_their_modulus(a in epoch_millis(), b in epoch_millis()) {
        let diff = compare(a, b).unwrap();
        prop_assert!(diff.months < 12, "months = {}", diff.months);
        prop_assert!(diff.days <= 31, "days = {}", diff.days);
        prop_assert!(diff.hours < 24, "hours = {}", diff.hours);
        prop_assert!(diff.minutes < 60, "minutes = {}", diff.minutes);
        prop_assert!(diff.seconds < 60, "seconds = {}", diff.seconds);
    }

    #[test]
    fn raw_milliseconds_match_epoch_distance(a in epoch_millis(), b in epoch_millis()) {
        let diff = compare(a, b).unwrap();
        let expected = parse_date(b).unwrap().to_epoch_millis() - parse_date(a).unwrap().to_epoch_millis();
        prop_assert_eq!(diff.raw.milliseconds, expected.abs() as f64);
        prop_assert!((diff.raw.seconds * 1000.0 - diff.raw.milliseconds).abs() < 1e-3);
    }

    #[test]
    fn now_label_only_when_no_unit_qualifies(a in epoch_millis(), offset in -3_000i64..3_000) {
        let diff = compare(a, a + offset).unwrap();
        let text = format_diff(&diff, &Labels::new());
        prop_assert_eq!(select_unit(&diff).is_none(), text == DEFAULT_NOW);
    }

    #[test]
    fn larger_gaps_never_render_as_now(a in epoch_millis(), gap in 2_000i64..10_000_000_000) {
        // A DST fold can bring the two wall clocks within a second of each other.
        let wall_gap = parse_date(a).unwrap().naive_local() - parse_date(a - gap).unwrap().naive_local();
        prop_assume!(wall_gap.num_seconds().abs() >= 2);
        let text = format_diff(&compare(a, a - gap).unwrap(), &Labels::new());
        prop_assert!(text.ends_with(" ago"), "got: {}", text);
    }
}
