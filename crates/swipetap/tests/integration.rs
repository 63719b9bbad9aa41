//! End-to-end gesture scenarios across every adapter, driven natively on a
//! manual clock.

use swipetap::{
    detect_adapter_kind, AdapterKind, Environment, EnvironmentError, GestureEvent, GestureKind,
    GestureOptions, ListenerPlan, Point, Supports,
};
use swipetap_test::Harness;

const ADAPTERS: [AdapterKind; 4] = [
    AdapterKind::Pointer,
    AdapterKind::Touch,
    AdapterKind::Mouse,
    AdapterKind::TouchAndMouse,
];

fn origin() -> Point {
    Point::new(0.0, 0.0)
}

// ============================================================================
// Tap and double tap
// ============================================================================

#[test]
fn test_tap_fires_after_double_tap_window() {
    for kind in ADAPTERS {
        let mut h = Harness::new(kind);
        h.press(origin()).advance_by(50.0);
        h.release(origin()).advance_to(349.0);
        assert!(h.kinds().is_empty(), "{kind:?}: tap fired early");

        h.advance_to(350.0);
        let gestures = h.gestures();
        assert_eq!(gestures.len(), 1, "{kind:?}");
        assert_eq!(gestures[0].at, 350.0);
        assert_eq!(gestures[0].kind(), GestureKind::Tap);
        assert_eq!(gestures[0].event.point(), Some(origin()));
    }
}

#[test]
fn test_second_tap_becomes_double_tap() {
    for kind in ADAPTERS {
        let mut h = Harness::new(kind);
        h.tap_at(origin(), 50.0).advance_to(200.0);
        h.tap_at(origin(), 20.0);

        let gestures = h.gestures();
        assert_eq!(gestures.len(), 1, "{kind:?}");
        assert_eq!(gestures[0].at, 220.0);
        assert_eq!(gestures[0].kind(), GestureKind::DoubleTap);

        h.advance_to(2_000.0);
        h.assert_gestures(&[GestureKind::DoubleTap]);
    }
}

#[test]
fn test_taps_outside_window_stay_single() {
    let mut h = Harness::new(AdapterKind::Pointer);
    h.tap_at(origin(), 50.0).advance_to(600.0);
    h.tap_at(origin(), 50.0).advance_to(2_000.0);
    h.assert_gestures(&[GestureKind::Tap, GestureKind::Tap]);
}

#[test]
fn test_mouse_and_touch_taps_share_one_window() {
    let mut h = Harness::new(AdapterKind::TouchAndMouse);
    h.touch_start(&[(0, 5.0, 5.0)]).advance_to(40.0);
    h.touch_end(&[]).advance_to(150.0);
    h.mouse_down(5.0, 5.0).advance_to(180.0);
    h.mouse_up(5.0, 5.0).advance_to(1_000.0);
    h.assert_gestures(&[GestureKind::DoubleTap]);
}

// ============================================================================
// Swipes
// ============================================================================

#[test]
fn test_swipe_right_reference_scenario() {
    for kind in ADAPTERS {
        let mut h = Harness::new(kind);
        h.press(origin()).advance_to(100.0);
        h.drag(Point::new(100.0, 0.0)).advance_to(150.0);
        h.release(Point::new(100.0, 0.0));

        let gestures = h.gestures();
        assert_eq!(gestures.len(), 1, "{kind:?}");
        assert_eq!(
            gestures[0].event,
            GestureEvent::Swipe {
                direction: swipetap::SwipeDirection::Right,
                point: Point::new(100.0, 0.0),
            }
        );
    }
}

#[test]
fn test_swipe_directions() {
    let cases = [
        (Point::new(-80.0, 10.0), GestureKind::SwipeLeft),
        (Point::new(80.0, -10.0), GestureKind::SwipeRight),
        (Point::new(10.0, -80.0), GestureKind::SwipeUp),
        (Point::new(-10.0, 80.0), GestureKind::SwipeDown),
    ];
    for (to, expected) in cases {
        let mut h = Harness::new(AdapterKind::Pointer);
        h.swipe(origin(), to, 120.0, 4).advance_to(2_000.0);
        h.assert_gestures(&[expected]);
    }
}

#[test]
fn test_slow_drag_is_neither_swipe_nor_tap() {
    for kind in ADAPTERS {
        let mut h = Harness::new(kind);
        h.swipe(origin(), Point::new(100.0, 0.0), 400.0, 8)
            .advance_to(3_000.0);
        assert!(h.kinds().is_empty(), "{kind:?}: {:?}", h.kinds());
    }
}

#[test]
fn test_short_drag_is_not_a_swipe() {
    let mut h = Harness::new(AdapterKind::Touch);
    h.swipe(origin(), Point::new(25.0, 0.0), 100.0, 2)
        .advance_to(2_000.0);
    assert!(h.kinds().is_empty());
}

// ============================================================================
// Long press
// ============================================================================

#[test]
fn test_long_press_fires_once_without_tap() {
    for kind in ADAPTERS {
        let mut h = Harness::new(kind);
        h.press(Point::new(10.0, 10.0)).advance_to(999.0);
        assert!(h.kinds().is_empty(), "{kind:?}");

        h.advance_to(1_000.0);
        h.assert_count(GestureKind::LongPress, 1);

        h.advance_to(1_200.0);
        h.release(Point::new(10.0, 10.0)).advance_to(3_000.0);
        h.assert_gestures(&[GestureKind::LongPress]);
    }
}

#[test]
fn test_long_press_reports_held_point() {
    let mut h = Harness::new(AdapterKind::Pointer);
    h.press(Point::new(10.0, 10.0)).advance_to(300.0);
    h.drag(Point::new(14.0, 12.0)).advance_to(1_000.0);

    let gestures = h.gestures();
    assert_eq!(gestures.len(), 1);
    assert_eq!(gestures[0].event.point(), Some(Point::new(14.0, 12.0)));
}

#[test]
fn test_sliding_hold_is_not_a_long_press() {
    let mut h = Harness::new(AdapterKind::Mouse);
    h.press(origin()).advance_to(500.0);
    h.drag(Point::new(60.0, 0.0)).advance_to(2_000.0);
    assert!(h.kinds().is_empty());
}

// ============================================================================
// Multi-touch
// ============================================================================

#[test]
fn test_first_of_two_fingers_is_not_a_tap() {
    let mut h = Harness::new(AdapterKind::Touch);
    h.touch_start(&[(0, 0.0, 0.0)]).advance_to(20.0);
    h.touch_start(&[(0, 0.0, 0.0), (1, 50.0, 50.0)]).advance_to(80.0);
    h.touch_end(&[(1, 50.0, 50.0)]).advance_to(100.0);
    // Lifting a finger also ends the other finger's long press.
    assert_eq!(h.engine().next_deadline(), None);

    // The second finger lifts alone, so it still taps.
    h.touch_end(&[]).advance_to(2_000.0);
    let gestures = h.gestures();
    assert_eq!(gestures.len(), 1);
    assert_eq!(gestures[0].at, 400.0);
    assert_eq!(gestures[0].kind(), GestureKind::Tap);
}

#[test]
fn test_pointer_family_reports_every_contact() {
    let mut h = Harness::new(AdapterKind::Pointer);
    h.pointer_down(1, 0.0, 0.0).pointer_down(2, 30.0, 40.0);

    let downs: Vec<_> = h
        .recorded()
        .into_iter()
        .filter(|r| r.kind() == GestureKind::PointerDown)
        .collect();
    assert_eq!(downs.len(), 2);
    assert_eq!(
        downs[1].event.points(),
        Some(&[Point::new(0.0, 0.0), Point::new(30.0, 40.0)][..])
    );
}

#[test]
fn test_mouse_emits_no_pointer_family_events() {
    let mut h = Harness::new(AdapterKind::Mouse);
    h.tap_at(origin(), 30.0).advance_to(1_000.0);
    assert_eq!(h.recorded().len(), 1);
    h.assert_gestures(&[GestureKind::Tap]);
}

// ============================================================================
// Options and guard
// ============================================================================

#[test]
fn test_options_from_json_change_thresholds() {
    let options = GestureOptions::from_json(r#"{"swipeDistance": 80, "doubleTapTimeLimit": 100}"#)
        .expect("valid options");

    let mut h = Harness::with_options(AdapterKind::Pointer, options.clone());
    h.swipe(origin(), Point::new(60.0, 0.0), 100.0, 3)
        .advance_to(2_000.0);
    assert!(h.kinds().is_empty());

    let mut h = Harness::with_options(AdapterKind::Pointer, options);
    h.tap_at(origin(), 20.0).advance_to(119.0);
    assert!(h.kinds().is_empty());
    h.advance_to(120.0);
    h.assert_gestures(&[GestureKind::Tap]);
}

#[test]
fn test_guard_follows_options() {
    let mut h = Harness::new(AdapterKind::Touch);
    h.press(origin());
    assert!(h.last_dispatch().prevent_default);
    assert!(!h.last_dispatch().stop_propagation);

    let options = GestureOptions {
        prevent_default: false,
        stop_propagation: true,
        ..GestureOptions::default()
    };
    let mut h = Harness::with_options(AdapterKind::Touch, options);
    h.press(origin());
    assert!(!h.last_dispatch().prevent_default);
    assert!(h.last_dispatch().stop_propagation);
}

#[test]
fn test_prevent_translate_skips_recognition() {
    let mut h = Harness::new(AdapterKind::Mouse);
    h.engine_mut()
        .set_prevent_translate_callback(|event| event.position().is_some_and(|p| p.x > 100.0));
    h.tap_at(Point::new(200.0, 0.0), 30.0).advance_to(1_000.0);
    assert!(h.kinds().is_empty());

    h.tap_at(Point::new(50.0, 0.0), 30.0).advance_to(2_000.0);
    h.assert_gestures(&[GestureKind::Tap]);
}

// ============================================================================
// Destroy
// ============================================================================

#[test]
fn test_destroy_silences_engine() {
    for kind in ADAPTERS {
        let mut h = Harness::new(kind);
        h.press(origin());
        h.engine_mut().destroy();
        assert!(h.engine().is_destroyed());

        h.advance_to(1_500.0);
        h.release(origin());
        h.tap_at(origin(), 20.0).advance_to(3_000.0);
        assert!(h.kinds().is_empty(), "{kind:?}");
        assert_eq!(h.engine().next_deadline(), None);
    }
}

#[test]
fn test_destroy_cancels_pending_tap() {
    let mut h = Harness::new(AdapterKind::Pointer);
    h.tap_at(origin(), 50.0).advance_to(100.0);
    h.engine_mut().destroy();
    h.engine_mut().destroy();
    h.advance_to(1_000.0);
    assert!(h.kinds().is_empty());
}

// ============================================================================
// Environment and listener plan
// ============================================================================

#[test]
fn test_environment_to_listener_plan() {
    let iphone = Environment::new(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 13_3 like Mac OS X) AppleWebKit/605.1.15",
        Supports {
            pointer: true,
            touch: true,
            mouse: true,
        },
    );
    let kind = detect_adapter_kind(&iphone).expect("supported");
    assert_eq!(kind, AdapterKind::Touch);

    let plan = ListenerPlan::new(kind, &GestureOptions::default(), &iphone);
    let routed: Vec<_> = plan.registrations().map(|(t, _)| t).collect();
    assert_eq!(routed, ["touchstart", "touchmove", "touchend", "touchcancel"]);
}

#[test]
fn test_unsupported_environments_are_errors() {
    let ipad_without_touch = Environment::new(
        "Mozilla/5.0 (iPad; CPU OS 12_0 like Mac OS X)",
        Supports::default(),
    );
    assert_eq!(
        detect_adapter_kind(&ipad_without_touch),
        Err(EnvironmentError::IosWithoutTouch)
    );

    let bare = Environment::new("curl/8.0", Supports::default());
    let err = swipetap::TranslatorError::from(detect_adapter_kind(&bare).unwrap_err());
    assert!(matches!(
        err,
        swipetap::TranslatorError::Environment(EnvironmentError::Unsupported)
    ));
}
