use kurbo::{CubicBez, ParamCurve, ParamCurveArclen, ParamCurveDeriv, Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::animation::path_presets::PathPreset;
use crate::composition::model::PropertyKeyframe;
use crate::foundation::core::Canvas;

const ARCLEN_ACCURACY: f64 = 1e-6;

/// One waypoint of a motion path in normalized `0..1` canvas space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPoint {
    /// Normalized x.
    pub x: f64,
    /// Normalized y.
    pub y: f64,
    /// First control point of the segment leaving this point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_point1: Option<Point>,
    /// Second control point of the segment leaving this point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_point2: Option<Point>,
}

impl PathPoint {
    /// Waypoint without explicit control points.
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            control_point1: None,
            control_point2: None,
        }
    }

    fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Ordered bezier waypoints, optionally rotating along the tangent.
///
/// JSON accepts `{ "points": [...], "autoRotate": bool }` or a catalog reference
/// `{ "preset": "wave", "autoRotate": bool }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionPath {
    /// Waypoints.
    pub points: Vec<PathPoint>,
    /// Emit a tangent rotation with every sample.
    pub auto_rotate: bool,
}

impl<'de> Deserialize<'de> for MotionPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged, rename_all = "camelCase")]
        enum Repr {
            #[serde(rename_all = "camelCase")]
            Points {
                points: Vec<PathPoint>,
                #[serde(default)]
                auto_rotate: bool,
            },
            #[serde(rename_all = "camelCase")]
            Preset {
                preset: String,
                #[serde(default)]
                auto_rotate: bool,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Points {
                points,
                auto_rotate,
            } => Ok(Self {
                points,
                auto_rotate,
            }),
            Repr::Preset {
                preset,
                auto_rotate,
            } => {
                let p = PathPreset::by_name(&preset).ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown motion path preset \"{preset}\""))
                })?;
                Ok(Self {
                    auto_rotate,
                    ..p.path()
                })
            }
        }
    }
}

/// Position (and optional tangent angle) sampled from a motion path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PathSample {
    /// Normalized x.
    pub x: f64,
    /// Normalized y.
    pub y: f64,
    /// Tangent angle in degrees, present when the path auto-rotates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl MotionPath {
    /// Path through `points` without auto-rotation.
    pub fn new(points: Vec<PathPoint>) -> Self {
        Self {
            points,
            auto_rotate: false,
        }
    }

    /// Number of bezier segments.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Cubic bezier for segment `i`, filling missing control points with Catmull-Rom style
    /// tangents: a third of half the span between the neighbouring points.
    pub fn segment(&self, i: usize) -> Option<CubicBez> {
        let p0 = self.points.get(i)?;
        let p1 = self.points.get(i + 1)?;
        let prev = if i == 0 { p0 } else { &self.points[i - 1] };
        let next = self.points.get(i + 2).unwrap_or(p1);

        let cp1 = p0
            .control_point1
            .unwrap_or_else(|| p0.pos() + (p1.pos() - prev.pos()) / 6.0);
        let cp2 = p0
            .control_point2
            .unwrap_or_else(|| p1.pos() - (next.pos() - p0.pos()) / 6.0);
        Some(CubicBez::new(p0.pos(), cp1, cp2, p1.pos()))
    }

    /// Sample the path at `progress` in `[0, 1]`.
    ///
    /// Each segment receives an equal share of progress regardless of its length. Progress is
    /// clamped (non-finite reads as 0); the ends return the first/last point exactly. An empty
    /// path samples the origin.
    pub fn evaluate(&self, progress: f64) -> PathSample {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let rotation_if = |tangent: Option<Vec2>| {
            self.auto_rotate
                .then(|| tangent.map(tangent_degrees).unwrap_or(0.0))
        };

        let n = self.segment_count();
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return PathSample {
                x: 0.0,
                y: 0.0,
                rotation: rotation_if(None),
            };
        };
        if n == 0 {
            return PathSample {
                x: first.x,
                y: first.y,
                rotation: rotation_if(None),
            };
        }

        let scaled = progress * n as f64;
        let idx = (scaled.floor() as usize).min(n - 1);
        let t = scaled - idx as f64;
        let Some(bez) = self.segment(idx) else {
            return PathSample {
                x: first.x,
                y: first.y,
                rotation: rotation_if(None),
            };
        };

        let pos = if progress <= 0.0 {
            first.pos()
        } else if progress >= 1.0 {
            last.pos()
        } else {
            bez.eval(t)
        };
        let tangent = bez.deriv().eval(t).to_vec2();
        PathSample {
            x: pos.x,
            y: pos.y,
            rotation: rotation_if(Some(tangent)),
        }
    }

    /// True arc length of the whole path in normalized units.
    ///
    /// [`MotionPath::evaluate`] does not use it: progress is distributed per segment, not per
    /// unit of length.
    pub fn arc_length(&self) -> f64 {
        (0..self.segment_count())
            .filter_map(|i| self.segment(i))
            .map(|s| s.arclen(ARCLEN_ACCURACY))
            .sum()
    }

    /// Sample `N + 1` evenly spaced points (`N` = segment count) into property keyframes over
    /// `duration` frames, with `x`/`y` in canvas pixels and `rotation` when auto-rotating.
    pub fn to_keyframes(&self, duration: f64, canvas: Canvas) -> Vec<PropertyKeyframe> {
        if self.points.is_empty() {
            return Vec::new();
        }
        let n = self.segment_count();
        let duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };

        (0..=n)
            .map(|i| {
                let progress = if n == 0 { 0.0 } else { i as f64 / n as f64 };
                let s = self.evaluate(progress);
                let mut values = vec![
                    ("x", s.x * canvas.width_f64()),
                    ("y", s.y * canvas.height_f64()),
                ];
                if let Some(r) = s.rotation {
                    values.push(("rotation", r));
                }
                PropertyKeyframe::new(progress * duration, values)
            })
            .collect()
    }
}

fn tangent_degrees(v: Vec2) -> f64 {
    if v.hypot2() <= f64::EPSILON {
        return 0.0;
    }
    v.y.atan2(v.x).to_degrees()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/path.rs"]
mod tests;
