use std::thread;

use super::*;
use crate::cursor::snapshot::{LayoutSnapshot, MeasuredContainer, MeasuredElement};

#[test]
fn round_trips_on_another_thread() {
    let (mut client, server) = channel::<u32, u32>();
    let worker = thread::spawn(move || server.serve_until_closed(|x| x * 10));
    assert_eq!(client.call(4, Duration::from_secs(5)).unwrap(), 40);
    assert_eq!(client.call(5, Duration::from_secs(5)).unwrap(), 50);
    drop(client);
    assert_eq!(worker.join().unwrap(), 2);
}

#[test]
fn timeout_is_a_bridge_error_and_late_reply_is_dropped() {
    let (mut client, server) = channel::<u32, u32>();
    let err = client.call(1, Duration::from_millis(10)).unwrap_err();
    assert!(matches!(err, FramelineError::Bridge(_)));

    // The late reply to request 0 is queued ahead of the reply to request 1.
    assert_eq!(server.serve_pending(|x| x + 100), 1);
    let worker = thread::spawn(move || server.serve_until_closed(|x| x + 200));
    assert_eq!(client.call(2, Duration::from_secs(5)).unwrap(), 202);
    drop(client);
    worker.join().unwrap();
}

#[test]
fn closed_server_is_an_error() {
    let (mut client, server) = channel::<u32, u32>();
    drop(server);
    assert!(client.call(1, Duration::from_secs(1)).is_err());
}

#[test]
fn bridged_resolver_measures_remotely_and_degrades() {
    let canvas = Canvas {
        width: 200,
        height: 100,
    };
    let (client, server) = channel();
    let worker = thread::spawn(move || {
        let snap = LayoutSnapshot {
            preview: kurbo::Rect::new(0.0, 0.0, 100.0, 50.0),
            containers: vec![MeasuredContainer {
                name: "ui".into(),
                elements: vec![MeasuredElement {
                    selectors: vec!["#ok".into()],
                    rect: kurbo::Rect::new(10.0, 10.0, 20.0, 20.0),
                }],
            }],
        };
        server.serve_until_closed(measure_handler(&snap, canvas))
    });

    let mut resolver = BridgedResolver::new(client, Duration::from_secs(5));
    let hit = resolver.resolve("#ok", None, Point::ZERO);
    assert_eq!(hit, ResolvedPoint { x: 30.0, y: 30.0, found: true });
    let miss = resolver.resolve("#missing", None, Point::new(1.0, 1.0));
    assert_eq!(miss, ResolvedPoint::fallback(Point::new(1.0, 1.0)));
    drop(resolver);
    worker.join().unwrap();

    let (client, _server) = channel();
    let mut stalled = BridgedResolver::new(client, Duration::from_millis(5));
    assert_eq!(
        stalled.resolve("#ok", None, Point::new(3.0, 4.0)),
        ResolvedPoint::fallback(Point::new(3.0, 4.0))
    );
}
