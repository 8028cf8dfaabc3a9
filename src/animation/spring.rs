//! Mass-spring-damper step response used as animation progress.
//!
//! The spring starts at rest-position 0 (with an optional initial velocity) and is pulled
//! toward 1. Its closed-form solution is evaluated directly, so every frame is independent of
//! every other frame. Local time is stretched so the spring's natural settle time lands on the
//! segment duration: a heavily damped spring still arrives by the next keyframe, a bouncy one
//! still overshoots on the way.

use serde::{Deserialize, Serialize};

use crate::foundation::core::Fps;
use crate::foundation::math::ratio01;

/// Residual error below which a spring counts as settled.
pub const SETTLE_EPSILON: f64 = 0.005;

/// Upper bound for the settle-time search (seconds).
pub const MAX_SETTLE_SECS: f64 = 60.0;

/// Physical step-response parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringConfig {
    /// Moving mass (> 0).
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Spring constant (> 0).
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Damping coefficient (>= 0).
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Initial velocity in progress units per second.
    #[serde(default)]
    pub velocity: f64,
}

fn default_mass() -> f64 {
    1.0
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_damping() -> f64 {
    10.0
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: default_mass(),
            stiffness: default_stiffness(),
            damping: default_damping(),
            velocity: 0.0,
        }
    }
}

/// Named spring presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpringPreset {
    /// `{1, 100, 10}`: lively with visible overshoot.
    Default,
    /// `{1, 100, 200}`: no overshoot, slow approach.
    Smooth,
    /// `{1, 200, 20}`: quick, barely overshoots.
    Snappy,
    /// `{1, 100, 8}`: several visible bounces.
    Bouncy,
    /// `{2, 80, 15}`: slow and weighty.
    Heavy,
    /// `{1, 120, 14}`.
    Gentle,
}

impl SpringPreset {
    /// Every preset, in catalog order.
    pub const ALL: [SpringPreset; 6] = [
        Self::Default,
        Self::Smooth,
        Self::Snappy,
        Self::Bouncy,
        Self::Heavy,
        Self::Gentle,
    ];

    /// Look up a preset by its JSON name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// JSON name of the preset.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Smooth => "smooth",
            Self::Snappy => "snappy",
            Self::Bouncy => "bouncy",
            Self::Heavy => "heavy",
            Self::Gentle => "gentle",
        }
    }

    /// Physical parameters of the preset.
    pub fn config(self) -> SpringConfig {
        let (mass, stiffness, damping) = match self {
            Self::Default => (1.0, 100.0, 10.0),
            Self::Smooth => (1.0, 100.0, 200.0),
            Self::Snappy => (1.0, 200.0, 20.0),
            Self::Bouncy => (1.0, 100.0, 8.0),
            Self::Heavy => (2.0, 80.0, 15.0),
            Self::Gentle => (1.0, 120.0, 14.0),
        };
        SpringConfig {
            mass,
            stiffness,
            damping,
            velocity: 0.0,
        }
    }
}

/// Error-term coefficients of the closed-form solution `e(t) = x(t) - 1`.
#[derive(Clone, Copy, Debug)]
enum Regime {
    Underdamped { decay: f64, wd: f64, a: f64, b: f64 },
    Critical { w0: f64, a: f64, b: f64 },
    Overdamped { r1: f64, r2: f64, c1: f64, c2: f64 },
}

impl SpringConfig {
    /// Resolve a named preset; unknown names fall back to [`SpringPreset::Default`].
    pub fn preset(name: &str) -> Self {
        match SpringPreset::by_name(name) {
            Some(p) => p.config(),
            None => {
                tracing::debug!(preset = name, "unknown spring preset; using default");
                SpringPreset::Default.config()
            }
        }
    }

    /// Whether the parameters describe a physical spring.
    pub fn is_valid(&self) -> bool {
        self.mass.is_finite()
            && self.stiffness.is_finite()
            && self.damping.is_finite()
            && self.velocity.is_finite()
            && self.mass > 0.0
            && self.stiffness > 0.0
            && self.damping >= 0.0
    }

    fn regime(&self) -> Regime {
        let k = self.stiffness;
        let c = self.damping;
        let m = self.mass;
        let v0 = self.velocity;

        let w0 = (k / m).sqrt();
        let zeta = c / (2.0 * (k * m).sqrt());
        // e(0) = -1, e'(0) = v0
        let a = -1.0;

        if (zeta - 1.0).abs() < 1e-6 {
            Regime::Critical {
                w0,
                a,
                b: v0 + w0 * a,
            }
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let decay = zeta * w0;
            Regime::Underdamped {
                decay,
                wd,
                a,
                b: (v0 + decay * a) / wd,
            }
        } else {
            let z2 = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - z2);
            let r2 = -w0 * (zeta + z2);
            let c1 = (v0 + r2) / (r1 - r2);
            Regime::Overdamped {
                r1,
                r2,
                c1,
                c2: -1.0 - c1,
            }
        }
    }

    /// Step response `x(t)` at `secs` seconds. Invalid configs return 1 (settled).
    pub fn step(&self, secs: f64) -> f64 {
        if !self.is_valid() {
            return 1.0;
        }
        if secs <= 0.0 {
            return 0.0;
        }
        let e = match self.regime() {
            Regime::Underdamped { decay, wd, a, b } => {
                (-decay * secs).exp() * (a * (wd * secs).cos() + b * (wd * secs).sin())
            }
            Regime::Critical { w0, a, b } => (a + b * secs) * (-w0 * secs).exp(),
            Regime::Overdamped { r1, r2, c1, c2 } => c1 * (r1 * secs).exp() + c2 * (r2 * secs).exp(),
        };
        1.0 + e
    }

    /// Time after which `|x(t) - 1|` stays below [`SETTLE_EPSILON`], from the decay envelope.
    pub fn settle_secs(&self) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        let eps = SETTLE_EPSILON;
        let t = match self.regime() {
            Regime::Underdamped { decay, a, b, .. } => {
                if decay <= 0.0 {
                    return MAX_SETTLE_SECS;
                }
                let amp = (a * a + b * b).sqrt();
                (amp / eps).ln() / decay
            }
            Regime::Overdamped { r1, c1, c2, .. } => {
                let amp = c1.abs() + c2.abs();
                (amp / eps).ln() / -r1
            }
            Regime::Critical { w0, a, b } => {
                let (a, b) = (a.abs(), b.abs());
                let envelope = |t: f64| (a + b * t) * (-w0 * t).exp();
                // The envelope rises until `1/w0 - a/b`, then decays monotonically.
                let mut lo = if b > 0.0 {
                    (1.0 / w0 - a / b).max(0.0)
                } else {
                    0.0
                };
                let mut hi = MAX_SETTLE_SECS;
                if envelope(hi) > eps {
                    return MAX_SETTLE_SECS;
                }
                if envelope(lo) <= eps {
                    return lo;
                }
                for _ in 0..48 {
                    let mid = 0.5 * (lo + hi);
                    if envelope(mid) > eps {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                hi
            }
        };
        if t.is_finite() {
            t.clamp(0.0, MAX_SETTLE_SECS)
        } else {
            MAX_SETTLE_SECS
        }
    }

    /// Natural settle duration in whole frames at `fps` (at least one frame).
    pub fn settle_frames(&self, fps: Fps) -> f64 {
        let fps = fps.as_f64();
        if fps <= 0.0 {
            return 0.0;
        }
        (self.settle_secs() * fps).ceil().max(1.0)
    }

    /// Progress `local_frame` frames into a segment lasting `duration` frames.
    ///
    /// The natural settle time is mapped onto `duration`, so progress is 0 at the segment start
    /// and within [`SETTLE_EPSILON`] of 1 at its end. May exceed 1 mid-segment.
    pub fn progress(&self, local_frame: f64, duration: f64, fps: Fps) -> f64 {
        if !local_frame.is_finite() || local_frame <= 0.0 {
            return 0.0;
        }
        if !(duration > 0.0) {
            return 1.0;
        }
        if !self.is_valid() {
            return ratio01(local_frame, duration);
        }

        let natural_frames = self.settle_frames(fps);
        let secs = if natural_frames > 0.0 {
            fps.frames_to_secs(local_frame * natural_frames / duration)
        } else {
            (local_frame / duration) * self.settle_secs()
        };
        self.step(secs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
