//! Property keyframe interpolation.

use std::collections::{BTreeMap, BTreeSet};

use crate::animation::ease::Easing;
use crate::animation::progress::resolve_progress;
use crate::composition::model::PropertyKeyframe;
use crate::foundation::core::Fps;
use crate::foundation::math::lerp;

/// Interpolated numeric properties at `frame` (item-relative).
///
/// Keyframes with non-finite frames are ignored and the rest are stable-sorted by frame. At
/// or before the first keyframe (and at or after the last) the end keyframe's values are
/// returned verbatim; the interpolator never extrapolates. Between keyframes every property
/// interpolates inside the bracketing pair using the start keyframe's easing or spring. A
/// property missing (or non-numeric) on either side of the pair is left out.
pub fn interpolate_keyframes(
    keyframes: &[PropertyKeyframe],
    frame: f64,
    fps: Fps,
) -> BTreeMap<String, f64> {
    let mut sorted: Vec<&PropertyKeyframe> =
        keyframes.iter().filter(|k| k.frame.is_finite()).collect();
    sorted.sort_by(|a, b| a.frame.total_cmp(&b.frame));

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return BTreeMap::new();
    };
    if sorted.len() == 1 || !frame.is_finite() || frame <= first.frame {
        return numeric_values(first);
    }
    if frame >= last.frame {
        return numeric_values(last);
    }

    // first.frame < frame < last.frame, so 1 <= idx <= len - 1
    let idx = sorted.partition_point(|k| k.frame <= frame);
    let (a, b) = (sorted[idx - 1], sorted[idx]);
    let duration = b.frame - a.frame;
    let progress = (duration > 0.0).then(|| {
        resolve_progress(
            frame - a.frame,
            duration,
            a.easing.unwrap_or(Easing::Linear),
            a.spring(),
            fps,
        )
    });

    let names: BTreeSet<&String> = a.values.keys().chain(b.values.keys()).collect();
    names
        .into_iter()
        .filter_map(|name| {
            let from = a.number(name)?;
            let to = b.number(name)?;
            let v = match progress {
                Some(p) => lerp(from, to, p),
                None => from,
            };
            v.is_finite().then(|| (name.clone(), v))
        })
        .collect()
}

fn numeric_values(k: &PropertyKeyframe) -> BTreeMap<String, f64> {
    k.values
        .keys()
        .filter_map(|name| k.number(name).map(|v| (name.clone(), v)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
