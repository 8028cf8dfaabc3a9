use std::time::Duration;

use super::*;
use crate::composition::model::Composition;
use crate::cursor::bridge::channel;
use crate::cursor::snapshot::LayoutSnapshot;

#[test]
fn validation_names_the_offending_scene() {
    let comp: Composition = serde_json::from_str(
        r#"{ "fps": 30, "width": 64, "height": 64, "durationInFrames": 10,
             "scenes": [ { "id": "intro", "startFrame": 0, "durationInFrames": 0 } ] }"#,
    )
    .unwrap();
    let err = comp.validate().unwrap_err();
    assert!(matches!(err, FramelineError::Validation(_)));
    assert_eq!(
        err.to_string(),
        "validation error: scene 'intro' has zero duration"
    );
}

#[test]
fn unreadable_json_is_a_serde_error() {
    let err = LayoutSnapshot::from_reader("[1, 2".as_bytes()).unwrap_err();
    assert!(matches!(err, FramelineError::Serde(_)));
    assert!(err.to_string().starts_with("serialization error: parse layout snapshot JSON"));
}

#[test]
fn missing_file_keeps_path_and_io_source() {
    let path = std::env::temp_dir().join("frameline-no-such-composition.json");
    let err = Composition::from_path(&path).unwrap_err();
    let FramelineError::Other(inner) = &err else {
        panic!("expected an I/O error, got {err:?}");
    };
    assert!(err.to_string().contains("frameline-no-such-composition.json"));
    let io = inner.downcast_ref::<std::io::Error>().unwrap();
    assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn bridge_timeout_reports_the_request() {
    let (mut client, _server) = channel::<u8, u8>();
    let err = client.call(7, Duration::from_millis(5)).unwrap_err();
    assert!(matches!(err, FramelineError::Bridge(_)));
    assert!(err.to_string().starts_with("bridge error: request 0 timed out"));
}
