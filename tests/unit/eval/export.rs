use super::*;
use crate::composition::model::Composition;

fn comp() -> Composition {
    serde_json::from_str(
        r##"{
          "fps": 24, "width": 320, "height": 180, "durationInFrames": 150,
          "tracks": [
            { "id": "t", "type": "image", "items": [
              { "id": "logo", "type": "image", "src": "logo.png", "from": 0, "durationInFrames": 150,
                "keyframes": [
                  { "frame": 0, "values": { "scale": 0.5 }, "springPreset": "bouncy" },
                  { "frame": 60, "values": { "scale": 1 }, "easing": "ease-in-out" },
                  { "frame": 149, "values": { "scale": 2 } }
                ] }
            ] },
            { "id": "c", "type": "cursor", "items": [
              { "id": "cur", "type": "cursor", "from": 20, "durationInFrames": 100, "keyframes": [
                { "frame": 0, "x": 10, "y": 10 },
                { "frame": 10, "interaction": { "selector": "#q", "action": "type", "value": "query" } }
              ] }
            ] }
          ]
        }"##,
    )
    .unwrap()
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

#[test]
fn parallel_matches_sequential() {
    let c = comp();
    let ev = FrameEvaluator::new(&c);
    let seq = evaluate_range(&ev, range(0, 150), &EvalOpts::default()).unwrap();
    let par = evaluate_range(
        &ev,
        range(0, 150),
        &EvalOpts {
            parallel: true,
            threads: Some(3),
            chunk_size: 7,
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 150);
    assert_eq!(seq, par);
    assert!(seq.iter().enumerate().all(|(i, f)| f.frame == i as u64));
}

#[test]
fn zero_chunk_size_still_progresses() {
    let c = comp();
    let ev = FrameEvaluator::new(&c);
    let out = evaluate_range(
        &ev,
        range(10, 14),
        &EvalOpts {
            parallel: true,
            threads: Some(1),
            chunk_size: 0,
        },
    )
    .unwrap();
    assert_eq!(out.len(), 4);
}

#[test]
fn rejects_bad_ranges_and_options() {
    let c = comp();
    let ev = FrameEvaluator::new(&c);
    assert!(evaluate_range(&ev, range(5, 5), &EvalOpts::default()).is_err());
    assert!(evaluate_range(&ev, range(100, 151), &EvalOpts::default()).is_err());
    let err = evaluate_range(
        &ev,
        range(0, 2),
        &EvalOpts {
            parallel: true,
            threads: Some(0),
            chunk_size: 4,
        },
    )
    .unwrap_err();
    assert!(matches!(err, FramelineError::Validation(_)));
}
