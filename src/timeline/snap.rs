//! Snap-to-point assistance for dragging items on the timeline.
//!
//! Drag deltas arrive in screen pixels; snapping happens in frames. The threshold is given in
//! pixels so it feels the same at every zoom level.

use serde::Serialize;

use crate::composition::model::Composition;

/// What a snap point marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapKind {
    /// Frame 0.
    Origin,
    /// Current playhead.
    Playhead,
    /// Composition end.
    CompositionEnd,
    /// Start of an item.
    ItemStart,
    /// End of an item.
    ItemEnd,
}

/// A frame a drag can lock onto.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapPoint {
    /// Frame position.
    pub frame: f64,
    /// What the frame marks.
    pub kind: SnapKind,
    /// Owning item for item edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

/// Snap tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapOpts {
    /// Capture distance in pixels.
    pub threshold_px: f64,
}

impl Default for SnapOpts {
    fn default() -> Self {
        Self { threshold_px: 10.0 }
    }
}

/// Outcome of a snapped drag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapResult {
    /// Delta to apply, in pixels. Equals the input delta when nothing snapped.
    pub delta_px: f64,
    /// Resulting frame of the dragged edge.
    pub frame: f64,
    /// Point that captured the drag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapped: Option<SnapPoint>,
}

/// Gather snap points: origin, playhead, composition end and every item edge.
///
/// Items with id `exclude_item` (the one being dragged) contribute nothing. Points are sorted
/// by frame and de-duplicated; when two share a frame the one gathered first is kept.
pub fn collect_snap_points(
    comp: &Composition,
    playhead: f64,
    exclude_item: Option<&str>,
) -> Vec<SnapPoint> {
    let mut points = vec![
        SnapPoint {
            frame: 0.0,
            kind: SnapKind::Origin,
            item_id: None,
        },
        SnapPoint {
            frame: playhead,
            kind: SnapKind::Playhead,
            item_id: None,
        },
        SnapPoint {
            frame: comp.duration_in_frames as f64,
            kind: SnapKind::CompositionEnd,
            item_id: None,
        },
    ];

    for item in comp.tracks.iter().flat_map(|t| t.items.iter()) {
        if exclude_item.is_some_and(|id| id == item.id) {
            continue;
        }
        points.push(SnapPoint {
            frame: item.from as f64,
            kind: SnapKind::ItemStart,
            item_id: Some(item.id.clone()),
        });
        points.push(SnapPoint {
            frame: item.end() as f64,
            kind: SnapKind::ItemEnd,
            item_id: Some(item.id.clone()),
        });
    }

    points.retain(|p| p.frame.is_finite());
    points.sort_by(|a, b| a.frame.total_cmp(&b.frame));
    points.dedup_by(|later, earlier| later.frame == earlier.frame);
    points
}

fn nearest<'a>(points: &'a [SnapPoint], frame: f64) -> Option<(&'a SnapPoint, f64)> {
    points
        .iter()
        .map(|p| (p, (p.frame - frame).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Snap one dragged edge.
///
/// The proposed frame is `original_frame + delta_px / px_per_frame`. When the nearest point
/// is within the threshold the delta is rewritten so the edge lands exactly on it. A
/// non-positive or non-finite scale disables snapping.
pub fn snap_drag(
    points: &[SnapPoint],
    original_frame: f64,
    delta_px: f64,
    px_per_frame: f64,
    opts: SnapOpts,
) -> SnapResult {
    if !(px_per_frame > 0.0) || !px_per_frame.is_finite() {
        return SnapResult {
            delta_px,
            frame: original_frame,
            snapped: None,
        };
    }

    let proposed = original_frame + delta_px / px_per_frame;
    let threshold = opts.threshold_px / px_per_frame;
    match nearest(points, proposed) {
        Some((p, dist)) if dist <= threshold => SnapResult {
            delta_px: (p.frame - original_frame) * px_per_frame,
            frame: p.frame,
            snapped: Some(p.clone()),
        },
        _ => SnapResult {
            delta_px,
            frame: proposed,
            snapped: None,
        },
    }
}

/// Snap a dragged span (`start..start + len`) by whichever edge is closer to a point.
///
/// The returned `frame` is the span's new start.
pub fn snap_span_drag(
    points: &[SnapPoint],
    start: f64,
    len: f64,
    delta_px: f64,
    px_per_frame: f64,
    opts: SnapOpts,
) -> SnapResult {
    let head = snap_drag(points, start, delta_px, px_per_frame, opts);
    let tail = snap_drag(points, start + len, delta_px, px_per_frame, opts);

    let pull = |r: &SnapResult| (r.delta_px - delta_px).abs();
    match (&head.snapped, &tail.snapped) {
        (None, Some(_)) => SnapResult {
            frame: tail.frame - len,
            ..tail
        },
        (Some(_), Some(_)) if pull(&tail) < pull(&head) => SnapResult {
            frame: tail.frame - len,
            ..tail
        },
        _ => head,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/snap.rs"]
mod tests;
