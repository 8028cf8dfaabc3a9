use kurbo::Point;

use crate::animation::ease::Easing;
use crate::composition::model::Item;
use crate::cursor::resolver::{TargetLookup, manual_position, target_key};
use crate::foundation::core::Canvas;
use crate::foundation::math::lerp;

/// Pointer position of a cursor item at `rel_frame` frames after its start.
///
/// Each keyframe's position comes from `lookup` (see
/// [`resolve_all_targets`](crate::cursor::resolver::resolve_all_targets)), falling back to its
/// manual `x`/`y`. The pointer moves between consecutive keyframes with ease-in-out and holds
/// at the first and last keyframe outside their range. `None` for items without cursor
/// keyframes.
pub fn cursor_position_at(
    item: &Item,
    rel_frame: f64,
    lookup: &TargetLookup,
    canvas: Canvas,
) -> Option<Point> {
    let mut keys: Vec<(f64, Point)> = item
        .cursor_keyframes()
        .iter()
        .filter(|k| k.frame.is_finite())
        .map(|k| {
            let p = lookup
                .get(&target_key(&item.id, k.frame))
                .map(|r| r.point())
                .unwrap_or_else(|| manual_position(k, canvas));
            (k.frame, p)
        })
        .collect();
    keys.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (first, last) = (*keys.first()?, *keys.last()?);
    if !rel_frame.is_finite() || rel_frame <= first.0 {
        return Some(first.1);
    }
    if rel_frame >= last.0 {
        return Some(last.1);
    }

    let idx = keys.partition_point(|(f, _)| *f <= rel_frame);
    let ((f0, p0), (f1, p1)) = (keys[idx - 1], keys[idx]);
    let span = f1 - f0;
    if !(span > 0.0) {
        return Some(p0);
    }
    let t = Easing::EaseInOut.apply((rel_frame - f0) / span);
    Some(Point::new(lerp(p0.x, p1.x, t), lerp(p0.y, p1.y, t)))
}

#[cfg(test)]
#[path = "../../tests/unit/cursor/motion.rs"]
mod tests;
