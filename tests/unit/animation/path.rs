use super::*;

fn three_points() -> MotionPath {
    MotionPath::new(vec![
        PathPoint::new(0.0, 0.0),
        PathPoint::new(0.5, 1.0),
        PathPoint::new(1.0, 0.0),
    ])
}

#[test]
fn ends_are_exact() {
    let p = three_points();
    assert_eq!(p.evaluate(0.0), PathSample { x: 0.0, y: 0.0, rotation: None });
    assert_eq!(p.evaluate(1.0), PathSample { x: 1.0, y: 0.0, rotation: None });
    assert_eq!(p.evaluate(-3.0).x, 0.0);
    assert_eq!(p.evaluate(7.0).x, 1.0);
    assert_eq!(p.evaluate(f64::NAN).x, 0.0);
}

#[test]
fn progress_is_split_evenly_per_segment() {
    let p = three_points();
    // Middle waypoint sits exactly at progress 0.5 regardless of segment length.
    let mid = p.evaluate(0.5);
    assert!((mid.x - 0.5).abs() < 1e-12 && (mid.y - 1.0).abs() < 1e-12);
}

#[test]
fn default_control_points_follow_neighbours() {
    let p = three_points();
    let first = p.segment(0).unwrap();
    // prev == p0 on the first segment: cp1 = p0 + (p1 - p0) / 6
    assert!((first.p1.x - 0.5 / 6.0).abs() < 1e-12);
    assert!((first.p1.y - 1.0 / 6.0).abs() < 1e-12);
    // cp2 = p1 - (p2 - p0) / 6
    assert!((first.p2.x - (0.5 - 1.0 / 6.0)).abs() < 1e-12);
    assert!((first.p2.y - 1.0).abs() < 1e-12);
    assert!(p.segment(2).is_none());
}

#[test]
fn explicit_control_points_win() {
    let mut pts = vec![PathPoint::new(0.0, 0.0), PathPoint::new(1.0, 0.0)];
    pts[0].control_point1 = Some(Point::new(0.0, 1.0));
    pts[0].control_point2 = Some(Point::new(1.0, 1.0));
    let seg = MotionPath::new(pts).segment(0).unwrap();
    assert_eq!(seg.p1, Point::new(0.0, 1.0));
    assert_eq!(seg.p2, Point::new(1.0, 1.0));
}

#[test]
fn auto_rotate_follows_tangent() {
    let mut p = MotionPath::new(vec![PathPoint::new(0.0, 0.0), PathPoint::new(1.0, 0.0)]);
    p.auto_rotate = true;
    let r = p.evaluate(0.5).rotation.unwrap();
    assert!(r.abs() < 1e-9);

    let mut down = MotionPath::new(vec![PathPoint::new(0.0, 0.0), PathPoint::new(0.0, 1.0)]);
    down.auto_rotate = true;
    let r = down.evaluate(0.5).rotation.unwrap();
    assert!((r - 90.0).abs() < 1e-9);
}

#[test]
fn degenerate_paths() {
    assert_eq!(
        MotionPath::new(Vec::new()).evaluate(0.5),
        PathSample { x: 0.0, y: 0.0, rotation: None }
    );
    let single = MotionPath::new(vec![PathPoint::new(0.3, 0.7)]);
    assert_eq!(single.evaluate(0.9), PathSample { x: 0.3, y: 0.7, rotation: None });
    assert_eq!(single.arc_length(), 0.0);
}

#[test]
fn arc_length_of_straight_segment() {
    let p = MotionPath::new(vec![PathPoint::new(0.0, 0.0), PathPoint::new(0.6, 0.8)]);
    assert!((p.arc_length() - 1.0).abs() < 1e-6);
}

#[test]
fn keyframes_are_in_canvas_pixels() {
    let mut p = three_points();
    p.auto_rotate = true;
    let canvas = Canvas {
        width: 1000,
        height: 500,
    };
    let keys = p.to_keyframes(60.0, canvas);
    assert_eq!(keys.len(), 3);
    assert_eq!(keys[0].frame, 0.0);
    assert_eq!(keys[1].frame, 30.0);
    assert_eq!(keys[2].frame, 60.0);
    assert_eq!(keys[2].number("x"), Some(1000.0));
    assert_eq!(keys[2].number("y"), Some(0.0));
    assert!(keys[1].number("rotation").is_some());
    assert!(MotionPath::new(Vec::new()).to_keyframes(10.0, canvas).is_empty());
}

#[test]
fn deserializes_points_or_preset() {
    let p: MotionPath = serde_json::from_str(
        r#"{ "points": [ { "x": 0, "y": 0, "controlPoint1": { "x": 0.2, "y": 0.4 } }, { "x": 1, "y": 1 } ] }"#,
    )
    .unwrap();
    assert!(!p.auto_rotate);
    assert_eq!(p.points[0].control_point1, Some(Point::new(0.2, 0.4)));

    let p: MotionPath = serde_json::from_str(r#"{ "preset": "arc-up", "autoRotate": true }"#).unwrap();
    assert!(p.auto_rotate);
    assert_eq!(p.points, PathPreset::ArcUp.path().points);

    assert!(serde_json::from_str::<MotionPath>(r#"{ "preset": "zigzag" }"#).is_err());
}
