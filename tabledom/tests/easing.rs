use tabledom::{Easing, Rect, ScrollMetrics};

// =============================================================================
// Easing Tests
// =============================================================================

#[test]
fn test_easing_boundaries() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInOutCubic,
    ] {
        assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
        assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
    }
}

#[test]
fn test_easing_clamps_input() {
    assert_eq!(Easing::EaseInOutCubic.apply(-1.0), 0.0);
    assert_eq!(Easing::EaseInOutCubic.apply(2.0), 1.0);
}

#[test]
fn test_ease_in_out_cubic_shape() {
    assert_eq!(Easing::EaseInOutCubic.apply(0.5), 0.5);
    assert!(Easing::EaseInOutCubic.apply(0.25) < 0.25);
    assert!(Easing::EaseInOutCubic.apply(0.75) > 0.75);
}

#[test]
fn test_easing_monotonic() {
    for easing in [Easing::EaseInOut, Easing::EaseInOutCubic] {
        let mut prev = 0.0;
        for i in 1..=20 {
            let val = easing.apply(i as f64 / 20.0);
            assert!(val >= prev, "{:?} not monotonic at step {}", easing, i);
            prev = val;
        }
    }
}

#[test]
fn test_interpolate() {
    assert_eq!(Easing::Linear.interpolate(100.0, 300.0, 0.5), 200.0);
    assert_eq!(Easing::EaseInOutCubic.interpolate(100.0, 300.0, 1.0), 300.0);
}

// =============================================================================
// Geometry Tests
// =============================================================================

#[test]
fn test_rect_intersects() {
    let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(viewport.intersects(&Rect::new(50.0, 50.0, 10.0, 10.0)));
    assert!(!viewport.intersects(&Rect::new(0.0, 100.0, 10.0, 10.0)));
}

#[test]
fn test_scroll_metrics_measurable() {
    assert!(!ScrollMetrics::default().is_measurable());
    assert!(!ScrollMetrics::horizontal(800.0, 0.0, 0.0).is_measurable());
    assert!(ScrollMetrics::horizontal(800.0, 600.0, 0.0).is_measurable());
}

#[test]
fn test_scroll_metrics_max_scroll() {
    let m = ScrollMetrics::horizontal(800.0, 600.0, 0.0).with_vertical(1000.0, 400.0, 0.0);
    assert_eq!(m.max_scroll_left(), 200.0);
    assert_eq!(m.max_scroll_top(), 600.0);
    assert_eq!(ScrollMetrics::horizontal(500.0, 600.0, 0.0).max_scroll_left(), 0.0);
}
