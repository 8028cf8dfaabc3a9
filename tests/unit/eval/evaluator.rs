use super::*;
use crate::cursor::resolver::ResolvedPoint;

fn comp() -> Composition {
    serde_json::from_str(
        r##"{
          "fps": 30, "width": 1280, "height": 720, "durationInFrames": 90,
          "tracks": [
            { "id": "titles", "type": "text", "items": [
              { "id": "title", "type": "text", "text": "Hi", "from": 10, "durationInFrames": 40,
                "keyframes": [
                  { "frame": 0, "values": { "opacity": 0 } },
                  { "frame": 20, "values": { "opacity": 1 } }
                ],
                "motionPath": { "points": [ { "x": 0, "y": 0 }, { "x": 1, "y": 1 } ] } }
            ] },
            { "id": "pointer", "type": "cursor", "items": [
              { "id": "cur", "type": "cursor", "from": 0, "durationInFrames": 90, "keyframes": [
                { "frame": 0, "x": 100, "y": 100 },
                { "frame": 30, "target": "#cta", "interaction": { "selector": "#cta", "action": "click" } }
              ] }
            ] }
          ],
          "scenes": [
            { "id": "s1", "startFrame": 0, "durationInFrames": 90,
              "transition": { "type": "fade", "durationInFrames": 10 } }
          ]
        }"##,
    )
    .unwrap()
}

#[test]
fn visible_items_only() {
    let c = comp();
    let ev = FrameEvaluator::new(&c);
    let f5 = ev.evaluate(5);
    let ids: Vec<_> = f5.items.iter().map(|i| i.item_id.as_str()).collect();
    assert_eq!(ids, vec!["cur"]);

    let f20 = ev.evaluate(20);
    assert_eq!(f20.items.len(), 2);
    let title = &f20.items[0];
    assert_eq!(title.track_id, "titles");
    assert_eq!(title.local_frame, 10);
    assert_eq!(title.properties["opacity"], 0.5);
    // Progress 10/40 on a single eased bezier segment along the diagonal.
    let path = title.path.unwrap();
    assert!((path.x - 0.203125).abs() < 1e-12);
    assert_eq!(path.x, path.y);
    assert!(title.cursor.is_none());
}

#[test]
fn cursor_uses_resolved_targets() {
    let c = comp();
    let mut lookup = TargetLookup::new();
    lookup.insert(
        "cur:30".into(),
        ResolvedPoint {
            x: 700.0,
            y: 400.0,
            found: true,
        },
    );
    let ev = FrameEvaluator::new(&c).with_targets(Arc::new(lookup));
    let f = ev.evaluate(45);
    let cur = f.items.iter().find(|i| i.item_id == "cur").unwrap();
    assert_eq!(cur.cursor, Some(Point::new(700.0, 400.0)));

    // Without targets the keyframe falls back to the canvas centre.
    let plain = FrameEvaluator::new(&c).evaluate(45);
    let cur = plain.items.iter().find(|i| i.item_id == "cur").unwrap();
    assert_eq!(cur.cursor, Some(Point::new(640.0, 360.0)));
}

#[test]
fn interactions_and_transitions_are_bundled() {
    let c = comp();
    let ev = FrameEvaluator::new(&c);
    let f = ev.evaluate(33);
    assert!(f.interactions.contains_key("#cta"));
    assert!(f.transition.is_none());

    let early = ev.evaluate(5);
    let tr = early.transition.unwrap();
    assert_eq!(tr.scene_id, "s1");
    assert_eq!(tr.progress, 0.5);
}

#[test]
fn frame_state_serializes_camel_case() {
    let c = comp();
    let json = serde_json::to_value(FrameEvaluator::new(&c).evaluate(20)).unwrap();
    assert_eq!(json["frame"], 20);
    assert_eq!(json["items"][0]["itemId"], "title");
    assert_eq!(json["items"][0]["localFrame"], 10);
    assert!(json.get("transition").is_none());
}
