use std::collections::BTreeMap;

use kurbo::{Point, Rect, Vec2};
use serde::Serialize;

use crate::composition::model::{Composition, CursorKeyframe};
use crate::foundation::core::Canvas;

/// Failure reported by a layout surface while answering a selector query.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The selector could not be parsed.
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    /// The element exists but could not be measured.
    #[error("measurement failed: {0}")]
    Measurement(String),
}

/// One rendered container that can be searched for elements.
pub trait ElementContainer {
    /// Bounding box of the first element matching `selector`, in the same coordinate space
    /// as [`LayoutSurface::preview_rect`].
    fn query(&self, selector: &str) -> Result<Option<Rect>, LayoutError>;
}

/// A live (or recorded) layout: the measured preview surface plus its containers.
pub trait LayoutSurface {
    /// Where the composition preview is drawn. `None` when it is not laid out.
    fn preview_rect(&self) -> Option<Rect>;

    /// Containers in search order.
    fn containers(&self) -> Vec<&dyn ElementContainer>;
}

/// A cursor position in composition pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ResolvedPoint {
    /// Composition x.
    pub x: f64,
    /// Composition y.
    pub y: f64,
    /// Whether the target selector matched; `false` means `x`/`y` are the fallback.
    pub found: bool,
}

impl ResolvedPoint {
    /// Unmatched result at `p`.
    pub fn fallback(p: Point) -> Self {
        Self {
            x: p.x,
            y: p.y,
            found: false,
        }
    }

    /// Position as a point.
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Resolved cursor positions keyed by [`target_key`].
pub type TargetLookup = BTreeMap<String, ResolvedPoint>;

/// `"itemId:frame"` key of a cursor keyframe.
pub fn target_key(item_id: &str, frame: f64) -> String {
    format!("{item_id}:{frame}")
}

/// Manual position of a keyframe, defaulting each missing axis to the canvas centre.
pub fn manual_position(k: &CursorKeyframe, canvas: Canvas) -> Point {
    let c = canvas.center();
    Point::new(
        k.x.filter(|v| v.is_finite()).unwrap_or(c.x),
        k.y.filter(|v| v.is_finite()).unwrap_or(c.y),
    )
}

/// Resolve `selector` against `surface` into composition pixels.
///
/// Containers are searched in order and the first match wins. The match's centre is mapped
/// from preview space into composition space and `offset` is added. A missing or degenerate
/// preview rect, no match, or a container error yields `fallback` with `found: false`.
/// Container errors are logged and treated as non-matches.
pub fn resolve_target(
    selector: &str,
    offset: Option<Vec2>,
    fallback: Point,
    surface: &dyn LayoutSurface,
    canvas: Canvas,
) -> ResolvedPoint {
    let Some(preview) = surface.preview_rect().filter(|r| usable(*r)) else {
        tracing::debug!(selector, "preview surface not measured; using fallback");
        return ResolvedPoint::fallback(fallback);
    };

    let hit = surface
        .containers()
        .into_iter()
        .enumerate()
        .find_map(|(i, container)| match container.query(selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(selector, container = i, error = %e, "selector query failed");
                None
            }
        });
    let Some(rect) = hit else {
        return ResolvedPoint::fallback(fallback);
    };

    let centre = rect.center();
    let sx = canvas.width_f64() / preview.width();
    let sy = canvas.height_f64() / preview.height();
    let offset = offset.unwrap_or(Vec2::ZERO);
    let x = (centre.x - preview.x0) * sx + offset.x;
    let y = (centre.y - preview.y0) * sy + offset.y;
    if !(x.is_finite() && y.is_finite()) {
        return ResolvedPoint::fallback(fallback);
    }
    ResolvedPoint { x, y, found: true }
}

fn usable(r: Rect) -> bool {
    r.width() > 0.0 && r.height() > 0.0 && r.width().is_finite() && r.height().is_finite()
}

/// Build a lookup for every keyframe of every cursor item, resolving targets with `resolve`.
///
/// `resolve` receives the selector, offset and fallback. Keyframes without a target map to
/// their manual position with `found: false`; keyframes with non-finite frames are skipped.
pub fn resolve_all_targets_with<F>(comp: &Composition, mut resolve: F) -> TargetLookup
where
    F: FnMut(&str, Option<Vec2>, Point) -> ResolvedPoint,
{
    let canvas = comp.canvas();
    let mut out = TargetLookup::new();
    for item in comp.cursor_items() {
        for k in item.cursor_keyframes() {
            if !k.frame.is_finite() {
                continue;
            }
            let fallback = manual_position(k, canvas);
            let resolved = match k.target.as_deref() {
                Some(sel) => resolve(sel, k.target_offset, fallback),
                None => ResolvedPoint::fallback(fallback),
            };
            out.insert(target_key(&item.id, k.frame), resolved);
        }
    }
    out
}

/// [`resolve_all_targets_with`] against a surface on the current thread.
#[tracing::instrument(skip_all)]
pub fn resolve_all_targets(comp: &Composition, surface: &dyn LayoutSurface) -> TargetLookup {
    let canvas = comp.canvas();
    let lookup = resolve_all_targets_with(comp, |sel, offset, fallback| {
        resolve_target(sel, offset, fallback, surface, canvas)
    });
    tracing::debug!(
        keyframes = lookup.len(),
        found = lookup.values().filter(|p| p.found).count(),
        "resolved cursor targets"
    );
    lookup
}

#[cfg(test)]
#[path = "../../tests/unit/cursor/resolver.rs"]
mod tests;
