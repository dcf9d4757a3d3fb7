use approx::assert_relative_eq;
use chart_scale::core::{
    Interval, LinearScaleEngine, MAX_MINOR_STEPS, ScaleAttributes, ScaleEngine, TickType,
    Transform,
};

#[test]
fn divides_hundred_into_steps_of_ten() {
    let engine = LinearScaleEngine::default();
    let division = engine.divide_scale(0.0, 100.0, 10, 5, 0.0);

    let expected: Vec<f64> = (0..=10).map(|i| f64::from(i) * 10.0).collect();
    assert_eq!(division.ticks(TickType::Major), expected.as_slice());
    assert_eq!(division.lower_bound(), 0.0);
    assert_eq!(division.upper_bound(), 100.0);
}

#[test]
fn minor_ticks_split_each_major_step() {
    let engine = LinearScaleEngine::default();
    let division = engine.divide_scale(0.0, 100.0, 10, 5, 0.0);

    let minor = division.ticks(TickType::Minor);
    assert_eq!(minor.len(), 40);
    assert_eq!(&minor[..4], &[2.0, 4.0, 6.0, 8.0]);
    assert!(minor.iter().all(|tick| *tick > 0.0 && *tick < 100.0));
    assert!(division.ticks(TickType::Medium).is_empty());
}

#[test]
fn odd_minor_count_promotes_middle_tick_to_medium() {
    let engine = LinearScaleEngine::default();

    let division = engine.divide_scale(0.0, 100.0, 10, 2, 0.0);
    assert!(division.ticks(TickType::Minor).is_empty());
    let medium = division.ticks(TickType::Medium);
    assert_eq!(medium.len(), 10);
    assert_eq!(medium[0], 5.0);
    assert_eq!(medium[9], 95.0);

    let division = engine.divide_scale(0.0, 100.0, 5, 5, 0.0);
    assert_eq!(division.ticks(TickType::Major).len(), 6);
    assert_eq!(&division.ticks(TickType::Medium)[..2], &[10.0, 30.0]);
    assert_eq!(&division.ticks(TickType::Minor)[..2], &[5.0, 15.0]);
}

#[test]
fn explicit_step_size_overrides_max_major_steps() {
    let engine = LinearScaleEngine::default();
    let division = engine.divide_scale(0.0, 10.0, 2, 0, 2.5);

    assert_eq!(division.ticks(TickType::Major), &[0.0, 2.5, 5.0, 7.5, 10.0]);
    assert!(division.ticks(TickType::Minor).is_empty());
}

#[test]
fn unaligned_bounds_strip_outside_ticks() {
    let engine = LinearScaleEngine::default();
    let division = engine.divide_scale(3.0, 97.0, 10, 0, 0.0);

    let major = division.ticks(TickType::Major);
    assert_eq!(major.first().copied(), Some(10.0));
    assert_eq!(major.last().copied(), Some(90.0));
    assert_eq!(division.lower_bound(), 3.0);
    assert_eq!(division.upper_bound(), 97.0);
}

#[test]
fn ticks_near_zero_snap_to_zero() {
    let engine = LinearScaleEngine::default();
    let division = engine.divide_scale(-0.3, 0.3, 6, 0, 0.1);

    let major = division.ticks(TickType::Major);
    assert!(major.contains(&0.0));
    assert!(major.iter().all(|tick| *tick == 0.0 || tick.abs() > 1e-9));
}

#[test]
fn inverted_request_gives_inverted_division() {
    let engine = LinearScaleEngine::default();
    let forward = engine.divide_scale(0.0, 100.0, 10, 5, 0.0);
    let backward = engine.divide_scale(100.0, 0.0, 10, 5, 0.0);

    assert!(backward.lower_bound() > backward.upper_bound());
    assert_eq!(backward, forward.inverted());

    let mut reversed = forward.ticks(TickType::Major).to_vec();
    reversed.reverse();
    assert_eq!(backward.ticks(TickType::Major), reversed.as_slice());
}

#[test]
fn degenerate_requests_give_empty_divisions() {
    let engine = LinearScaleEngine::default();

    let division = engine.divide_scale(5.0, 5.0, 10, 5, 0.0);
    assert!(division.is_empty());
    assert!(division.ticks(TickType::Major).is_empty());

    let division = engine.divide_scale(-f64::MAX, f64::MAX, 10, 5, 0.0);
    assert!(division.ticks(TickType::Major).is_empty());

    let division = engine.divide_scale(0.0, 1.0, 0, 0, 0.0);
    assert!(!division.ticks(TickType::Major).is_empty());
}

#[test]
fn auto_scale_rounds_outward_to_nice_bounds() {
    let engine = LinearScaleEngine::default();
    assert_eq!(engine.auto_scale(10, 0.0, 97.3, 0.0), (0.0, 100.0, 10.0));
    assert_eq!(engine.auto_scale(10, 97.3, 0.0, 0.0), (0.0, 100.0, 10.0));
}

#[test]
fn auto_scale_applies_margins_before_alignment() {
    let mut engine = LinearScaleEngine::default();
    engine.set_margins(5.0, 5.0);
    assert_eq!(engine.auto_scale(10, 0.0, 97.3, 0.0), (-20.0, 120.0, 20.0));

    engine.set_margins(-1.0, -2.0);
    assert_eq!(engine.lower_margin(), 0.0);
    assert_eq!(engine.upper_margin(), 0.0);
}

#[test]
fn auto_scale_symmetric_centers_on_reference() {
    let mut engine = LinearScaleEngine::default();
    engine.set_attribute(ScaleAttributes::SYMMETRIC, true);
    engine.set_reference(0.0);

    assert_eq!(engine.auto_scale(10, -20.0, 97.3, 0.0), (-100.0, 100.0, 20.0));
}

#[test]
fn auto_scale_includes_reference() {
    let mut engine = LinearScaleEngine::default();
    engine.set_attribute(ScaleAttributes::INCLUDE_REFERENCE, true);
    engine.set_reference(0.0);

    assert_eq!(engine.auto_scale(10, 20.0, 97.3, 0.0), (0.0, 100.0, 10.0));
}

#[test]
fn auto_scale_floating_keeps_data_bounds() {
    let mut engine = LinearScaleEngine::default();
    engine.set_attribute(ScaleAttributes::FLOATING, true);

    assert_eq!(engine.auto_scale(10, 0.0, 97.3, 0.0), (0.0, 97.3, 10.0));
}

#[test]
fn auto_scale_inverted_swaps_bounds_and_negates_step() {
    let mut engine = LinearScaleEngine::default();
    engine.set_attribute(ScaleAttributes::INVERTED, true);

    assert_eq!(engine.auto_scale(10, 0.0, 97.3, 0.0), (100.0, 0.0, -10.0));
}

#[test]
fn auto_scale_widens_single_value() {
    let engine = LinearScaleEngine::default();
    let (x1, x2, step) = engine.auto_scale(10, 5.0, 5.0, 0.0);

    assert_eq!((x1, x2), (2.5, 7.5));
    assert_relative_eq!(step, 0.5, max_relative = 1e-12);
}

#[test]
fn align_keeps_bounds_already_on_step() {
    let engine = LinearScaleEngine::default();
    assert_eq!(engine.align(Interval::new(10.0, 90.0), 10.0), Interval::new(10.0, 90.0));
    assert_eq!(engine.align(Interval::new(11.0, 89.0), 10.0), Interval::new(10.0, 90.0));
}

#[test]
fn configuration_round_trips_through_accessors() {
    let mut engine = LinearScaleEngine::new(1);
    assert_eq!(engine.base(), 2);
    engine.set_base(16);
    assert_eq!(engine.base(), 16);

    assert_eq!(engine.transformation(), Transform::Identity);
    engine.set_attributes(ScaleAttributes::FLOATING | ScaleAttributes::INVERTED);
    assert!(engine.test_attribute(ScaleAttributes::FLOATING));
    assert!(engine.test_attribute(ScaleAttributes::INVERTED));
    assert!(!engine.test_attribute(ScaleAttributes::SYMMETRIC));
}

#[test]
fn base_two_steps_are_powers_of_two() {
    let engine = LinearScaleEngine::new(2);
    let division = engine.divide_scale(0.0, 100.0, 4, 0, 0.0);

    assert_eq!(division.ticks(TickType::Major), &[0.0, 32.0, 64.0, 96.0]);
}

#[test]
fn huge_minor_step_budget_is_capped() {
    let engine = LinearScaleEngine::default();

    let capped = engine.divide_scale(0.0, 100.0, 10, u32::MAX, 0.0);
    let reference = engine.divide_scale(0.0, 100.0, 10, MAX_MINOR_STEPS, 0.0);
    assert_eq!(capped, reference);

    let subticks = capped.ticks(TickType::Minor).len() + capped.ticks(TickType::Medium).len();
    assert!(subticks > 0);
    assert!(subticks <= 10 * MAX_MINOR_STEPS as usize);
}
