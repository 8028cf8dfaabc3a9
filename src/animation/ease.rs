use serde::{Deserialize, Serialize};

/// Easing curve applied toward the next keyframe.
///
/// JSON accepts `"linear"`, `"ease-in"`, `"ease-out"`, `"ease-in-out"`, `"spring"` (camelCase
/// and snake_case spellings too) or `{ "cubicBezier": [x1, y1, x2, y2] }`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    /// Identity mapping.
    #[default]
    Linear,
    /// Cubic ease-in (`t³`).
    EaseIn,
    /// Cubic ease-out.
    EaseOut,
    /// Cubic ease-in/out.
    EaseInOut,
    /// Mass-spring-damper step response. Resolved by [`crate::animation::progress`], not
    /// by [`Easing::apply`].
    Spring,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`.
    CubicBezier {
        /// First control point x.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Easing {
    /// Parse a named easing. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "linear" => Some(Self::Linear),
            "ease-in" | "easeIn" | "ease_in" => Some(Self::EaseIn),
            "ease-out" | "easeOut" | "ease_out" => Some(Self::EaseOut),
            "ease-in-out" | "easeInOut" | "ease_in_out" => Some(Self::EaseInOut),
            "spring" => Some(Self::Spring),
            _ => None,
        }
    }

    /// Canonical name, or `None` for parameterized curves.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::Linear => Some("linear"),
            Self::EaseIn => Some("ease-in"),
            Self::EaseOut => Some("ease-out"),
            Self::EaseInOut => Some("ease-in-out"),
            Self::Spring => Some("spring"),
            Self::CubicBezier { .. } => None,
        }
    }

    /// Apply this easing to normalized progress `t`, clamped to `[0, 1]` first.
    ///
    /// `Spring` maps linearly here; spring motion needs time and fps, see
    /// [`crate::animation::progress::resolve_progress`].
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear | Self::Spring => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum EasingRepr {
    Str(String),
    CubicBezier {
        #[serde(rename = "cubicBezier")]
        cubic_bezier: [f64; 4],
    },
}

impl Serialize for Easing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let repr = match *self {
            Self::CubicBezier { x1, y1, x2, y2 } => EasingRepr::CubicBezier {
                cubic_bezier: [x1, y1, x2, y2],
            },
            other => EasingRepr::Str(other.name().unwrap_or("linear").to_owned()),
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Easing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match EasingRepr::deserialize(deserializer)? {
            EasingRepr::Str(s) => Self::from_name(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown easing \"{s}\""))),
            EasingRepr::CubicBezier {
                cubic_bezier: [x1, y1, x2, y2],
            } => Ok(Self::CubicBezier { x1, y1, x2, y2 }),
        }
    }
}

/// Deserialize an optional easing, mapping unknown or malformed values to `None`.
///
/// One bad keyframe must not reject a whole composition, so the keyframe simply falls back
/// to linear motion.
pub(crate) fn lenient_easing<'de, D>(deserializer: D) -> Result<Option<Easing>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    match serde_json::from_value::<Easing>(raw.clone()) {
        Ok(e) => Ok(Some(e)),
        Err(e) => {
            tracing::warn!(easing = %raw, error = %e, "ignoring unknown easing; using linear");
            Ok(None)
        }
    }
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // CSS cubic-bezier: given x in [0,1], solve u such that bx(u)=x, then return by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // CSS requires x control points inside [0,1] for the curve to be a function of x.
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);

    // Newton-Raphson with bisection fallback (fixed iterations, no adaptive loops).
    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t);
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
