//! The bus driver / passenger scenarios

mod common;

use common::*;
use split_core::sequential;
use split_hanging::{HangingClassification, HangingDetector, HangingDetectorBuilder, HangingStatistics};
use split_segments::ClassAnalyzer;

#[test]
fn test_passenger_behind_driver_for_three_legs() {
    let table = table(&hanging_scenario(|_| None));
    let profiles = HangingDetector::default().analyze_class(&table, &sequential());

    let passenger = &profiles[PASSENGER];
    assert_eq!(passenger.pairs.len(), 3);
    assert_eq!(passenger.classification, HangingClassification::HighHanging);

    let driver_id = 2000 + DRIVER as u64;
    for (pair, leg) in passenger.pairs.iter().zip(HANGING_LEGS) {
        assert_eq!(pair.leg_number, leg as u32 + 1);
        assert_eq!(pair.bus_driver_id, driver_id);
        assert_eq!(pair.bus_driver_race_number, DRIVER as u32 + 1);
        assert_relative_eq!(pair.time_delta_seconds, 1.0, epsilon = 1e-6);
        assert!(pair.passenger_pi > pair.bus_driver_pi + 0.05);
        assert!(pair.hanging_index > 0.0 && pair.hanging_index <= 100.0);
        assert!(pair.improvement_percent > 0.0);
    }

    for (i, profile) in profiles.iter().enumerate() {
        if i != PASSENGER {
            assert!(profile.pairs.is_empty(), "runner {i} has pairs");
            assert_eq!(profile.classification, HangingClassification::NoHanging);
        }
    }

    let stats = HangingStatistics::from_profiles(&profiles, table.excluded_splits, vec![]);
    assert_eq!(stats.pair_count, 3);
    assert_eq!(stats.bus_driver_count, 1);
    assert_eq!(stats.high_hanging_count, 1);
    assert_eq!(stats.no_hanging_count, 9);
}

#[test]
fn test_pair_uses_normal_pis() {
    let table = table(&hanging_scenario(|_| None));
    let profiles = HangingDetector::default().analyze_class(&table, &sequential());
    let pair = &profiles[PASSENGER].pairs[0];
    assert_relative_eq!(pair.passenger_pi, table.runners[PASSENGER].normal_pi.unwrap());
    assert_relative_eq!(pair.bus_driver_pi, table.runners[DRIVER].normal_pi.unwrap());
}

#[test]
fn test_distant_clock_arrivals_break_pairs() {
    // Same clock start: the passenger is minutes behind by the third control
    let class = hanging_scenario(|_| Some(36_000.0));
    let profiles = HangingDetector::default().analyze_class(&table(&class), &sequential());
    assert!(profiles[PASSENGER].pairs.is_empty());
    assert_eq!(profiles[PASSENGER].classification, HangingClassification::NoHanging);

    let lenient = HangingDetectorBuilder::new().require_same_arrival(false).build().unwrap();
    let profiles = lenient.analyze_class(&table(&class), &sequential());
    assert_eq!(profiles[PASSENGER].pairs.len(), 3);
}

#[test]
fn test_small_class_is_insufficient_data() {
    let mut class = hanging_scenario(|_| None);
    class.runners.retain(|r| r.identity.race_number <= 3 || r.identity.race_number == 10);
    let table = table(&class);
    assert!(!table.reliable_data);

    let profiles = HangingDetector::default().analyze_class(&table, &sequential());
    assert!(profiles
        .iter()
        .all(|p| p.classification == HangingClassification::InsufficientData));
}

#[test]
fn test_min_hanging_index_filters_counted_pairs() {
    let table = table(&hanging_scenario(|_| None));
    let strict = HangingDetectorBuilder::new().min_hanging_index(99.0).build().unwrap();
    let profiles = strict.analyze_class(&table, &sequential());
    let passenger = &profiles[PASSENGER];
    assert_eq!(passenger.pairs.len(), 3);
    assert_eq!(passenger.counted_pair_count, 0);
    assert_eq!(passenger.classification, HangingClassification::NoHanging);
}

#[test]
fn test_equally_close_drivers_resolve_to_lower_race_number() {
    let table = table(&tie_scenario());
    let detector = HangingDetectorBuilder::new().window_fraction(0.01).build().unwrap();
    let profiles = detector.analyze_class(&table, &sequential());

    let passenger = &profiles[PASSENGER];
    assert_eq!(passenger.pairs.len(), 1);
    let pair = &passenger.pairs[0];
    assert_eq!(pair.leg_number, TIE_LEG as u32 + 1);
    assert_relative_eq!(pair.time_delta_seconds, 1.0, epsilon = 1e-6);
    // The twin listed first carries the higher race number
    assert_eq!(pair.bus_driver_race_number, TWIN_RACE_NUMBERS[1]);
    assert_eq!(pair.bus_driver_id, 2004);

    // Equal normal PIs never pair
    assert!(profiles[3].pairs.is_empty());
    assert!(profiles[4].pairs.is_empty());
}

#[test]
fn test_reference_fraction_window_scales_with_segment() {
    let table = table(&tie_scenario());
    let reference = table.runners[PASSENGER].legs[TIE_LEG].reference_time_seconds.unwrap();

    // A 0.2% window is well under the one second delta on a ~360 s leg
    let narrow = HangingDetectorBuilder::new().window_fraction(0.002).build().unwrap();
    assert!(0.002 * reference < 1.0);
    let profiles = narrow.analyze_class(&table, &sequential());
    assert!(profiles[PASSENGER].pairs.is_empty());

    let wide = HangingDetectorBuilder::new().window_fraction(0.01).build().unwrap();
    let profiles = wide.analyze_class(&table, &sequential());
    let pair = &profiles[PASSENGER].pairs[0];
    let window = 0.01 * reference;
    assert_relative_eq!(
        pair.hanging_index,
        wide.hanging_index(1.0, window, pair.passenger_pi - pair.bus_driver_pi),
        epsilon = 1e-9
    );
}
