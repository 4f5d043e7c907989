use approx::assert_relative_eq;
use fieldkit::mapper::{
    Range, RangedValue, Track, map_click, map_drag, map_spectrum, map_strip,
};

#[test]
fn test_drag_snaps_to_step() {
    let range = Range::new(0.0, 100.0, 10.0);
    let track = Track::new(0.0, 200.0);
    // 24% of the track: raw 24, snapped 20
    assert_relative_eq!(map_drag(track, 48.0, range), 20.0);
    // 25% rounds half up
    assert_relative_eq!(map_drag(track, 50.0, range), 30.0);
}

#[test]
fn test_drag_beyond_edges_returns_bounds() {
    let range = Range::new(0.0, 100.0, 10.0);
    let track = Track::new(100.0, 200.0);
    assert_eq!(map_drag(track, 1000.0, range), 100.0);
    assert_eq!(map_drag(track, -50.0, range), 0.0);
}

#[test]
fn test_drag_result_stays_in_range_when_step_overshoots() {
    // max is not a multiple of step: snapping 100 to 105 must clamp back
    let range = Range::new(0.0, 100.0, 15.0);
    let track = Track::new(0.0, 100.0);
    assert_eq!(map_drag(track, 100.0, range), 100.0);
    for x in 0..=100 {
        let value = map_drag(track, f64::from(x), range);
        assert!((0.0..=100.0).contains(&value), "{value} out of range at {x}");
    }
}

#[test]
fn test_click_clamps_only_after_snapping() {
    let range = Range::new(0.0, 100.0, 1.0);
    let track = Track::new(0.0, 100.0);
    assert_eq!(map_click(track, 150.0, range), 100.0);
    assert_eq!(map_click(track, -20.0, range), 0.0);
    assert_eq!(map_click(track, 42.4, range), 42.0);
}

#[test]
fn test_offset_range() {
    let range = Range::new(-50.0, 50.0, 5.0);
    let track = Track::new(10.0, 100.0);
    assert_eq!(map_drag(track, 10.0, range), -50.0);
    assert_eq!(map_drag(track, 60.0, range), 0.0);
    assert_eq!(map_drag(track, 110.0, range), 50.0);
}

#[test]
fn test_percent_inverse() {
    let range = Range::new(0.0, 200.0, 1.0);
    assert_relative_eq!(range.percent(50.0), 25.0);
    assert_relative_eq!(range.percent(200.0), 100.0);
    assert_eq!(Range::new(5.0, 5.0, 1.0).percent(5.0), 0.0);
}

#[test]
fn test_steps_stop_at_bounds() {
    let range = Range::new(0.0, 10.0, 3.0);
    assert_eq!(range.step_up(9.0), 10.0);
    assert_eq!(range.step_down(2.0), 0.0);
    assert_eq!(range.step_up(3.0), 6.0);
}

#[test]
fn test_strip_and_spectrum() {
    let track = Track::new(0.0, 36.0);
    assert_relative_eq!(map_strip(track, 9.0, 360.0), 90.0);
    assert_relative_eq!(map_strip(track, 99.0, 360.0), 360.0);
    assert_relative_eq!(map_strip(track, -1.0, 100.0), 0.0);

    let x = Track::new(0.0, 100.0);
    let y = Track::new(0.0, 50.0);
    let (saturation, brightness) = map_spectrum(x, y, 25.0, 10.0);
    assert_relative_eq!(saturation, 25.0);
    assert_relative_eq!(brightness, 80.0);

    // Top-right corner is full saturation and brightness
    let (saturation, brightness) = map_spectrum(x, y, 500.0, -5.0);
    assert_relative_eq!(saturation, 100.0);
    assert_relative_eq!(brightness, 100.0);
}

#[test]
fn test_ranged_value_clamps_and_displays() {
    let mut value = RangedValue::new(500.0, Range::new(0.0, 100.0, 1.0), "px");
    assert_eq!(value.value(), 100.0);
    assert!(value.set(12.0));
    assert!(!value.set(12.0));
    assert_eq!(value.to_string(), "12px");
    assert_relative_eq!(value.percent(), 12.0);
}
