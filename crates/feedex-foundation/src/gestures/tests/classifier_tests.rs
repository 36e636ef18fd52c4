use super::*;

fn classifier() -> GestureClassifier {
    GestureClassifier::new(10.0, FlingThresholds::default())
}

#[test]
fn vertical_drag_reports_progress_then_trigger() {
    let mut classifier = classifier();
    classifier.set_trigger_distance(Some(120.0));

    assert_eq!(classifier.classify(&MotionSample::down(100.0, 50.0, 0)), GestureSignal::None);
    assert_eq!(
        classifier.classify(&MotionSample::move_to(100.0, 55.0, 16)),
        GestureSignal::None
    );
    assert_eq!(
        classifier.classify(&MotionSample::move_to(100.0, 110.0, 32)),
        GestureSignal::PullProgress(60.0)
    );
    assert_eq!(
        classifier.classify(&MotionSample::move_to(100.0, 250.0, 48)),
        GestureSignal::PullTrigger
    );
}

#[test]
fn unknown_trigger_distance_only_reports_progress() {
    let mut classifier = classifier();
    classifier.classify(&MotionSample::down(0.0, 0.0, 0));
    assert_eq!(
        classifier.classify(&MotionSample::move_to(0.0, 900.0, 16)),
        GestureSignal::PullProgress(900.0)
    );
}

#[test]
fn fast_leftward_swipe_is_a_fling_toggle() {
    let mut classifier = classifier();
    classifier.classify(&MotionSample::down(300.0, 200.0, 0));
    classifier.classify(&MotionSample::move_to(260.0, 202.0, 10));
    classifier.classify(&MotionSample::move_to(220.0, 204.0, 20));
    let signal = classifier.classify(&MotionSample::up(170.0, 205.0, 30));

    match signal {
        GestureSignal::FlingToggle {
            direction,
            velocity,
            start,
            end,
        } => {
            assert_eq!(direction, Some(FlingDirection::Left));
            assert!(velocity < -150.0, "velocity {velocity}");
            assert_eq!(start, Point::new(300.0, 200.0));
            assert_eq!(end, Point::new(170.0, 205.0));
        }
        other => panic!("expected fling, got {other:?}"),
    }
    assert!(!classifier.is_tracking());
}

#[test]
fn slow_release_is_not_a_fling() {
    let mut classifier = classifier();
    classifier.classify(&MotionSample::down(300.0, 200.0, 0));
    classifier.classify(&MotionSample::move_to(150.0, 200.0, 50));
    classifier.classify(&MotionSample::move_to(150.0, 200.0, 500));
    assert_eq!(
        classifier.classify(&MotionSample::up(150.0, 200.0, 560)),
        GestureSignal::None
    );
}

#[test]
fn short_fast_swipe_reports_a_fling_without_direction() {
    let mut classifier = classifier();
    classifier.classify(&MotionSample::down(300.0, 200.0, 0));
    classifier.classify(&MotionSample::move_to(280.0, 201.0, 10));
    classifier.classify(&MotionSample::move_to(260.0, 202.0, 20));
    classifier.classify(&MotionSample::move_to(240.0, 203.0, 30));

    match classifier.classify(&MotionSample::up(220.0, 204.0, 40)) {
        GestureSignal::FlingToggle {
            direction, velocity, ..
        } => {
            assert_eq!(direction, None);
            assert!(velocity < -150.0, "velocity {velocity}");
        }
        other => panic!("expected fling, got {other:?}"),
    }
}

#[test]
fn moves_without_a_session_are_ignored() {
    let mut classifier = classifier();
    assert_eq!(
        classifier.classify(&MotionSample::move_to(0.0, 500.0, 0)),
        GestureSignal::None
    );
    assert_eq!(classifier.classify(&MotionSample::up(0.0, 500.0, 16)), GestureSignal::None);
}

#[test]
fn cancel_clears_the_session_silently() {
    let mut classifier = classifier();
    classifier.classify(&MotionSample::down(0.0, 0.0, 0));
    assert_eq!(
        classifier.classify(&MotionSample::cancel(0.0, 0.0, 16)),
        GestureSignal::None
    );
    assert!(classifier.session().is_none());
}

#[test]
fn second_down_restarts_the_session() {
    let mut classifier = classifier();
    classifier.classify(&MotionSample::down(0.0, 0.0, 0));
    classifier.classify(&MotionSample::move_to(0.0, 40.0, 16));
    classifier.classify(&MotionSample::down(0.0, 300.0, 32));

    let session = classifier.session().copied().expect("session");
    assert_eq!(session.start.y(), 300.0);
    assert_eq!(session.delta_accum, (0.0, 0.0));
    assert_eq!(
        classifier.classify(&MotionSample::move_to(0.0, 320.0, 48)),
        GestureSignal::PullProgress(20.0)
    );
}
