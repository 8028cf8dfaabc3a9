//! Request/response channel to the thread that owns the layout surface.
//!
//! Layout measurement has to happen where the UI lives. Other threads hold a
//! [`BridgeClient`] and block on [`BridgeClient::call`] with a timeout; the owning thread
//! drains requests through its [`BridgeServer`]. Every request carries a correlation id so a
//! late reply to a timed-out call is recognised and dropped.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::{Duration, Instant};

use kurbo::{Point, Vec2};

use crate::composition::model::Composition;
use crate::cursor::resolver::{
    LayoutSurface, ResolvedPoint, TargetLookup, resolve_all_targets_with, resolve_target,
};
use crate::foundation::core::Canvas;
use crate::foundation::error::{FramelineError, FramelineResult};

/// A payload tagged with its correlation id.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope<T> {
    /// Correlation id, unique per client.
    pub id: u64,
    /// Message body.
    pub payload: T,
}

/// Calling side of a bridge.
#[derive(Debug)]
pub struct BridgeClient<Req, Resp> {
    next_id: u64,
    tx: Sender<Envelope<Req>>,
    rx: Receiver<Envelope<Resp>>,
}

/// Serving side of a bridge.
#[derive(Debug)]
pub struct BridgeServer<Req, Resp> {
    rx: Receiver<Envelope<Req>>,
    tx: Sender<Envelope<Resp>>,
}

/// Connected client/server pair.
pub fn channel<Req, Resp>() -> (BridgeClient<Req, Resp>, BridgeServer<Req, Resp>) {
    let (req_tx, req_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    (
        BridgeClient {
            next_id: 0,
            tx: req_tx,
            rx: resp_rx,
        },
        BridgeServer {
            rx: req_rx,
            tx: resp_tx,
        },
    )
}

impl<Req, Resp> BridgeClient<Req, Resp> {
    /// Send `req` and wait up to `timeout` for its reply.
    ///
    /// Replies to earlier, timed-out calls are discarded while waiting.
    pub fn call(&mut self, req: Req, timeout: Duration) -> FramelineResult<Resp> {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.tx
            .send(Envelope { id, payload: req })
            .map_err(|_| FramelineError::bridge("bridge server is gone"))?;

        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(env) if env.id == id => return Ok(env.payload),
                Ok(env) => {
                    tracing::debug!(stale = env.id, expected = id, "dropping stale bridge reply");
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(FramelineError::bridge(format!(
                        "request {id} timed out after {timeout:?}"
                    )));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(FramelineError::bridge("bridge server is gone"));
                }
            }
        }
    }
}

impl<Req, Resp> BridgeServer<Req, Resp> {
    /// Answer every request already queued, without blocking. Returns how many were served.
    ///
    /// Meant to be called from the owning thread's event loop.
    pub fn serve_pending<F>(&self, mut handler: F) -> usize
    where
        F: FnMut(Req) -> Resp,
    {
        let mut served = 0;
        loop {
            match self.rx.try_recv() {
                Ok(env) => {
                    if !self.reply(env.id, handler(env.payload)) {
                        break;
                    }
                    served += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        served
    }

    /// Block answering requests until every client is dropped. Returns how many were served.
    pub fn serve_until_closed<F>(&self, mut handler: F) -> usize
    where
        F: FnMut(Req) -> Resp,
    {
        let mut served = 0;
        while let Ok(env) = self.rx.recv() {
            if !self.reply(env.id, handler(env.payload)) {
                break;
            }
            served += 1;
        }
        served
    }

    fn reply(&self, id: u64, payload: Resp) -> bool {
        self.tx.send(Envelope { id, payload }).is_ok()
    }
}

/// A selector measurement request.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasureRequest {
    /// Target selector.
    pub selector: String,
    /// Offset from the target centre.
    pub offset: Option<Vec2>,
    /// Position to report when nothing matches.
    pub fallback: Point,
}

/// Handler answering [`MeasureRequest`]s against `surface`.
pub fn measure_handler<'a>(
    surface: &'a dyn LayoutSurface,
    canvas: Canvas,
) -> impl FnMut(MeasureRequest) -> ResolvedPoint + 'a {
    move |req| resolve_target(&req.selector, req.offset, req.fallback, surface, canvas)
}

/// Resolves cursor targets from any thread by asking the surface's owner over a bridge.
///
/// Timeouts and a closed bridge degrade to the fallback with `found: false`.
#[derive(Debug)]
pub struct BridgedResolver {
    client: BridgeClient<MeasureRequest, ResolvedPoint>,
    timeout: Duration,
}

impl BridgedResolver {
    /// Wrap a client; each measurement waits at most `timeout`.
    pub fn new(client: BridgeClient<MeasureRequest, ResolvedPoint>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Resolve one selector.
    pub fn resolve(&mut self, selector: &str, offset: Option<Vec2>, fallback: Point) -> ResolvedPoint {
        let req = MeasureRequest {
            selector: selector.to_owned(),
            offset,
            fallback,
        };
        match self.client.call(req, self.timeout) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(selector, error = %e, "cursor target measurement failed");
                ResolvedPoint::fallback(fallback)
            }
        }
    }

    /// Resolve every cursor keyframe of `comp`.
    pub fn resolve_all(&mut self, comp: &Composition) -> TargetLookup {
        resolve_all_targets_with(comp, |sel, offset, fallback| {
            self.resolve(sel, offset, fallback)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cursor/bridge.rs"]
mod tests;
