use super::*;

#[test]
fn closed_forms_hit_endpoints() {
    for e in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::CubicBezier {
            x1: 0.25,
            y1: 0.1,
            x2: 0.25,
            y2: 1.0,
        },
    ] {
        assert_eq!(e.apply(0.0), 0.0, "{e:?}");
        assert_eq!(e.apply(1.0), 1.0, "{e:?}");
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Easing::EaseIn.apply(-3.0), 0.0);
    assert_eq!(Easing::EaseOut.apply(7.0), 1.0);
    assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
}

#[test]
fn ease_in_is_slow_then_fast() {
    assert!(Easing::EaseIn.apply(0.5) < 0.5);
    assert!(Easing::EaseOut.apply(0.5) > 0.5);
    assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn parses_names_and_bezier_objects() {
    let e: Easing = serde_json::from_str("\"ease-in-out\"").unwrap();
    assert_eq!(e, Easing::EaseInOut);
    let e: Easing = serde_json::from_str("\"easeOut\"").unwrap();
    assert_eq!(e, Easing::EaseOut);
    let e: Easing = serde_json::from_str("{\"cubicBezier\": [0.4, 0.0, 0.2, 1.0]}").unwrap();
    assert!(matches!(e, Easing::CubicBezier { .. }));
    assert!(serde_json::from_str::<Easing>("\"wobble\"").is_err());
}

#[test]
fn serializes_to_canonical_names() {
    assert_eq!(
        serde_json::to_string(&Easing::EaseIn).unwrap(),
        "\"ease-in\""
    );
    let v = serde_json::to_value(Easing::CubicBezier {
        x1: 0.1,
        y1: 0.2,
        x2: 0.3,
        y2: 0.4,
    })
    .unwrap();
    assert_eq!(v, serde_json::json!({ "cubicBezier": [0.1, 0.2, 0.3, 0.4] }));
}
