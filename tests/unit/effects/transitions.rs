use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 1920,
        height: 1080,
    }
}

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn spec(kind: TransitionKind, duration: f64) -> TransitionSpec {
    TransitionSpec {
        kind,
        duration_in_frames: duration,
        delay: 0.0,
        direction: SlideDirection::default(),
        axis: FlipAxis::default(),
        easing: None,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn fade_ramps_both_ways() {
    assert_eq!(fade(0.25, TransitionPhase::In).opacity, 0.25);
    assert_eq!(fade(0.25, TransitionPhase::Out).opacity, 0.75);
}

#[test]
fn slide_travels_one_canvas() {
    let c = canvas();
    let start = slide(0.0, TransitionPhase::In, SlideDirection::Left, c);
    assert_eq!(start.offset, Vec2::new(1920.0, 0.0));
    let end = slide(1.0, TransitionPhase::In, SlideDirection::Left, c);
    assert_eq!(end.offset.x, 0.0);

    let out = slide(1.0, TransitionPhase::Out, SlideDirection::Left, c);
    assert_eq!(out.offset, Vec2::new(-1920.0, 0.0));
    let down = slide(0.5, TransitionPhase::Out, SlideDirection::Down, c);
    assert_eq!(down.offset, Vec2::new(0.0, 540.0));
    let up_in = slide(0.0, TransitionPhase::In, SlideDirection::Up, c);
    assert_eq!(up_in.offset, Vec2::new(0.0, 1080.0));
}

#[test]
fn curtain_in_retracts_from_centre() {
    let c = canvas();
    let closed = curtain(0.0, TransitionPhase::In, c);
    assert_eq!(closed.left, Rect::new(0.0, 0.0, 960.0, 1080.0));
    assert_eq!(closed.right, Rect::new(960.0, 0.0, 1920.0, 1080.0));
    assert_eq!(closed.coverage, 1.0);

    let open = curtain(1.0, TransitionPhase::In, c);
    assert!(open.left.x1 <= 0.0);
    assert!(open.right.x0 >= 1920.0);
    assert_eq!(open.coverage, 0.0);

    let closing = curtain(1.0, TransitionPhase::Out, c);
    assert_eq!(closing.left.x1, 960.0);
    assert_eq!(closing.coverage, 1.0);
}

#[test]
fn curtain_scenario_fully_retracted_by_frame_20() {
    let s = spec(TransitionKind::Curtain, 20.0);
    let TransitionFrame::Curtain(mid) = s.render(10.0, TransitionPhase::In, canvas(), fps())
    else {
        panic!("expected curtain");
    };
    assert!(approx(mid.coverage, 0.5));

    let TransitionFrame::Curtain(end) = s.render(20.0, TransitionPhase::In, canvas(), fps())
    else {
        panic!("expected curtain");
    };
    assert_eq!(end.coverage, 0.0);
    assert!(end.left.x1 <= 0.0 && end.right.x0 >= 1920.0);
}

#[test]
fn wheel_swings_around_low_pivot() {
    let c = canvas();
    let start = wheel(0.0, TransitionPhase::In, c);
    assert_eq!(start.rotation, WHEEL_MAX_DEGREES);
    assert_eq!(start.pivot, Point::new(960.0, 2160.0));

    // The scene centre lands where the affine sends it.
    let centre = Point::new(960.0, 540.0);
    let moved = start.transform * centre;
    assert!(approx(moved.x, centre.x + start.offset.x));
    assert!(approx(moved.y, centre.y + start.offset.y));
    assert!(start.offset.x > 0.0 && start.offset.y > 0.0);

    let settled = wheel(1.0, TransitionPhase::In, c);
    assert_eq!(settled.rotation, 0.0);
    assert!(approx(settled.offset.x, 0.0) && approx(settled.offset.y, 0.0));

    assert_eq!(wheel(1.0, TransitionPhase::Out, c).rotation, -WHEEL_MAX_DEGREES);
}

#[test]
fn flip_swaps_faces_at_half() {
    let a = flip(0.49, TransitionPhase::In, FlipAxis::Y);
    assert!(a.front_visible && !a.back_visible);
    let b = flip(0.5, TransitionPhase::In, FlipAxis::Y);
    assert!(!b.front_visible && b.back_visible);
    assert_eq!(b.front_rotation, 90.0);
    assert_eq!(b.back_rotation, -90.0);

    let done = flip(1.0, TransitionPhase::In, FlipAxis::X);
    assert_eq!(done.back_rotation, 0.0);
    assert_eq!(done.axis, FlipAxis::X);

    let out_start = flip(0.0, TransitionPhase::Out, FlipAxis::Y);
    assert!(out_start.back_visible);
}

#[test]
fn timing_honours_delay_and_easing() {
    let t = TransitionTiming {
        delay: 5.0,
        duration: 10.0,
        easing: Easing::EaseIn,
    };
    assert_eq!(t.progress(3.0, fps()), 0.0);
    assert_eq!(t.progress(5.0, fps()), 0.0);
    assert!(approx(t.progress(10.0, fps()), 0.125));
    assert_eq!(t.progress(15.0, fps()), 1.0);
    assert_eq!(t.end(), 15.0);

    let instant = TransitionTiming {
        delay: 0.0,
        duration: 0.0,
        easing: Easing::Linear,
    };
    assert_eq!(instant.progress(0.0, fps()), 1.0);
}

#[test]
fn scene_lookup_is_scene_relative_and_expires() {
    let scenes = vec![
        Scene {
            id: "a".into(),
            start_frame: 0,
            duration_in_frames: 50,
            transition: Some(spec(TransitionKind::Fade, 10.0)),
        },
        Scene {
            id: "b".into(),
            start_frame: 50,
            duration_in_frames: 50,
            transition: Some(spec(TransitionKind::Curtain, 20.0)),
        },
    ];

    let at = scene_transition_at(&scenes, 55, canvas(), fps()).unwrap();
    assert_eq!(at.scene_id, "b");
    assert_eq!(at.kind, TransitionKind::Curtain);
    assert!(approx(at.progress, 0.25));

    assert!(scene_transition_at(&scenes, 70, canvas(), fps()).is_none());
    assert!(scene_transition_at(&scenes, 20, canvas(), fps()).is_none());
    assert!(scene_transition_at(&scenes, 500, canvas(), fps()).is_none());
    assert_eq!(
        scene_transition_at(&scenes, 4, canvas(), fps()).unwrap().frame,
        TransitionFrame::Fade(FadeFrame { opacity: 0.4 })
    );
}

#[test]
fn spec_parses_from_json() {
    let s: TransitionSpec = serde_json::from_str(
        r#"{ "type": "slide", "durationInFrames": 12, "direction": "up", "easing": "ease-out" }"#,
    )
    .unwrap();
    assert_eq!(s.kind, TransitionKind::Slide);
    assert_eq!(s.direction, SlideDirection::Up);
    assert_eq!(s.easing, Some(Easing::EaseOut));
    assert_eq!(s.axis, FlipAxis::Y);

    assert!(
        serde_json::from_str::<TransitionSpec>(r#"{ "type": "dissolve", "durationInFrames": 5 }"#)
            .is_err()
    );
}
