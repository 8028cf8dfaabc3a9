//! Scene transition generators.
//!
//! Each generator is a pure function of a progress value (see [`TransitionTiming`]) and the
//! canvas; it returns plain geometry for the host to apply. Nothing here draws.

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::animation::ease::{Easing, lenient_easing};
use crate::animation::progress::resolve_progress;
use crate::composition::model::Scene;
use crate::foundation::core::{Canvas, Fps};

/// Maximum swing of the wheel transition, in degrees.
pub const WHEEL_MAX_DEGREES: f64 = 30.0;

/// Transition generator kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Opacity ramp.
    Fade,
    /// Full-canvas translation.
    Slide,
    /// Two half-width panels parting from (or closing to) the centre.
    Curtain,
    /// Swing around a pivot below the frame.
    Wheel,
    /// Two-sided card flip.
    Flip,
}

/// Travel direction of a slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    /// Moves toward -x.
    #[default]
    Left,
    /// Moves toward +x.
    Right,
    /// Moves toward -y.
    Up,
    /// Moves toward +y.
    Down,
}

/// Rotation axis of a flip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Horizontal axis (card tips forward).
    X,
    /// Vertical axis (card turns sideways).
    #[default]
    Y,
}

/// Whether the transition brings a scene in or takes it out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    /// Scene is entering.
    #[default]
    In,
    /// Scene is leaving.
    Out,
}

/// A scene's transition as written in composition JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionSpec {
    /// Generator kind.
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    /// Length in frames, after `delay`.
    pub duration_in_frames: f64,
    /// Frames to wait before progress starts.
    #[serde(default)]
    pub delay: f64,
    /// Slide direction.
    #[serde(default)]
    pub direction: SlideDirection,
    /// Flip axis.
    #[serde(default)]
    pub axis: FlipAxis,
    /// Progress easing (linear when absent).
    #[serde(
        default,
        deserialize_with = "lenient_easing",
        skip_serializing_if = "Option::is_none"
    )]
    pub easing: Option<Easing>,
}

/// Delay, duration and easing of one transition run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTiming {
    /// Frames before progress starts.
    pub delay: f64,
    /// Frames from 0 to 1.
    pub duration: f64,
    /// Progress easing.
    pub easing: Easing,
}

impl TransitionTiming {
    /// Progress at `frame` frames after the transition was triggered.
    ///
    /// 0 throughout the delay. A zero duration jumps to 1 once the delay has passed.
    pub fn progress(&self, frame: f64, fps: Fps) -> f64 {
        let local = frame - self.delay.max(0.0);
        if local < 0.0 {
            return 0.0;
        }
        resolve_progress(local, self.duration, self.easing, None, fps)
    }

    /// Frame at which the run is over.
    pub fn end(&self) -> f64 {
        self.delay.max(0.0) + self.duration.max(0.0)
    }
}

/// One frame of a fade.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FadeFrame {
    /// Scene opacity.
    pub opacity: f64,
}

/// One frame of a slide.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SlideFrame {
    /// Scene translation in pixels.
    pub offset: Vec2,
}

/// One frame of a curtain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurtainFrame {
    /// Left panel in canvas pixels.
    pub left: Rect,
    /// Right panel in canvas pixels.
    pub right: Rect,
    /// Fraction of the canvas the panels cover.
    pub coverage: f64,
}

/// One frame of a wheel swing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WheelFrame {
    /// Swing angle in degrees (positive is clockwise on screen).
    pub rotation: f64,
    /// Translation of the scene centre caused by the swing.
    pub offset: Vec2,
    /// Swing pivot in canvas pixels.
    pub pivot: Point,
    /// Equivalent affine transform.
    pub transform: Affine,
}

/// One frame of a card flip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipFrame {
    /// Rotation axis.
    pub axis: FlipAxis,
    /// Front face rotation in degrees (0 → 180).
    pub front_rotation: f64,
    /// Back face rotation in degrees (-180 → 0).
    pub back_rotation: f64,
    /// Front face drawn.
    pub front_visible: bool,
    /// Back face drawn.
    pub back_visible: bool,
}

/// Output of any generator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransitionFrame {
    /// See [`fade`].
    Fade(FadeFrame),
    /// See [`slide`].
    Slide(SlideFrame),
    /// See [`curtain`].
    Curtain(CurtainFrame),
    /// See [`wheel`].
    Wheel(WheelFrame),
    /// See [`flip`].
    Flip(FlipFrame),
}

/// Opacity ramp: `p` when entering, `1 - p` when leaving.
pub fn fade(p: f64, phase: TransitionPhase) -> FadeFrame {
    let opacity = match phase {
        TransitionPhase::In => p,
        TransitionPhase::Out => 1.0 - p,
    };
    FadeFrame { opacity }
}

/// Full-canvas translation travelling toward `dir`.
///
/// Entering scenes start one canvas away and arrive at the origin; leaving scenes start at
/// the origin and end one canvas away.
pub fn slide(p: f64, phase: TransitionPhase, dir: SlideDirection, canvas: Canvas) -> SlideFrame {
    let distance = match phase {
        TransitionPhase::In => p - 1.0,
        TransitionPhase::Out => p,
    };
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let offset = match dir {
        SlideDirection::Left => Vec2::new(-w * distance, 0.0),
        SlideDirection::Right => Vec2::new(w * distance, 0.0),
        SlideDirection::Up => Vec2::new(0.0, -h * distance),
        SlideDirection::Down => Vec2::new(0.0, h * distance),
    };
    SlideFrame { offset }
}

/// Two half-width, full-height panels.
///
/// `In` retracts them from the centre outward (fully off-canvas at `p = 1`); `Out` closes
/// them toward the centre (meeting at `p = 1`).
pub fn curtain(p: f64, phase: TransitionPhase, canvas: Canvas) -> CurtainFrame {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let half = w / 2.0;
    let open = match phase {
        TransitionPhase::In => p,
        TransitionPhase::Out => 1.0 - p,
    };
    let off = half * open;
    CurtainFrame {
        left: Rect::new(-off, 0.0, half - off, h),
        right: Rect::new(half + off, 0.0, w + off, h),
        coverage: (1.0 - open).clamp(0.0, 1.0),
    }
}

/// Whole-scene swing around a pivot one canvas height below the bottom edge.
///
/// Entering scenes swing in from [`WHEEL_MAX_DEGREES`] to 0; leaving scenes swing out to
/// `-WHEEL_MAX_DEGREES`.
pub fn wheel(p: f64, phase: TransitionPhase, canvas: Canvas) -> WheelFrame {
    let h = canvas.height_f64();
    let degrees = match phase {
        TransitionPhase::In => WHEEL_MAX_DEGREES * (1.0 - p),
        TransitionPhase::Out => -WHEEL_MAX_DEGREES * p,
    };
    let theta = degrees.to_radians();
    let pivot = Point::new(canvas.width_f64() / 2.0, 2.0 * h);
    let radius = 1.5 * h;
    WheelFrame {
        rotation: degrees,
        offset: Vec2::new(radius * theta.sin(), radius * (1.0 - theta.cos())),
        pivot,
        transform: Affine::rotate_about(theta, pivot),
    }
}

/// Two-sided card flip around `axis`.
///
/// The front turns 0 → 180 degrees and is drawn while progress is below one half; the back
/// turns -180 → 0 and takes over from one half. `Out` plays the flip backwards.
pub fn flip(p: f64, phase: TransitionPhase, axis: FlipAxis) -> FlipFrame {
    let p = match phase {
        TransitionPhase::In => p,
        TransitionPhase::Out => 1.0 - p,
    };
    let front_visible = p < 0.5;
    FlipFrame {
        axis,
        front_rotation: 180.0 * p,
        back_rotation: -180.0 * (1.0 - p),
        front_visible,
        back_visible: !front_visible,
    }
}

impl TransitionSpec {
    /// Timing of this transition.
    pub fn timing(&self) -> TransitionTiming {
        TransitionTiming {
            delay: self.delay,
            duration: self.duration_in_frames,
            easing: self.easing.unwrap_or_default(),
        }
    }

    /// Run the generator at `frame` frames after the trigger.
    pub fn render(
        &self,
        frame: f64,
        phase: TransitionPhase,
        canvas: Canvas,
        fps: Fps,
    ) -> TransitionFrame {
        let p = self.timing().progress(frame, fps);
        match self.kind {
            TransitionKind::Fade => TransitionFrame::Fade(fade(p, phase)),
            TransitionKind::Slide => {
                TransitionFrame::Slide(slide(p, phase, self.direction, canvas))
            }
            TransitionKind::Curtain => TransitionFrame::Curtain(curtain(p, phase, canvas)),
            TransitionKind::Wheel => TransitionFrame::Wheel(wheel(p, phase, canvas)),
            TransitionKind::Flip => TransitionFrame::Flip(flip(p, phase, self.axis)),
        }
    }
}

/// The in-transition of the scene playing at `frame`, while it is running.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTransition {
    /// Scene being revealed.
    pub scene_id: String,
    /// Generator kind.
    pub kind: TransitionKind,
    /// Eased progress.
    pub progress: f64,
    /// Generator output.
    pub frame: TransitionFrame,
}

/// Active scene transition at absolute `frame`.
///
/// When scenes overlap the last one listed wins. Returns `None` once the transition's delay
/// plus duration has elapsed, or when the scene has no transition.
pub fn scene_transition_at(
    scenes: &[Scene],
    frame: u64,
    canvas: Canvas,
    fps: Fps,
) -> Option<ActiveTransition> {
    let scene = scenes.iter().rev().find(|s| s.contains(frame))?;
    let spec = scene.transition.as_ref()?;
    let local = (frame - scene.start_frame) as f64;
    let timing = spec.timing();
    if local >= timing.end() {
        return None;
    }
    Some(ActiveTransition {
        scene_id: scene.id.clone(),
        kind: spec.kind,
        progress: timing.progress(local, fps),
        frame: spec.render(local, TransitionPhase::In, canvas, fps),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
