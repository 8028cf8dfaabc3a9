//! Frameline evaluates video compositions frame by frame.
//!
//! A composition is a JSON document of tracks, items, scenes and cursor keyframes. Given a
//! frame number, frameline answers what every visible item looks like at that instant:
//!
//! - Load and validate a [`Composition`]
//! - Resolve cursor targets against a layout ([`resolve_all_targets`], [`TargetCache`])
//! - Build a [`FrameEvaluator`] and evaluate single frames or a range with [`evaluate_range`]
//!
//! Every evaluator is a pure function of its inputs, so frames can be computed in any order
//! and on any thread.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easings, springs, keyframe interpolation and motion paths.
pub mod animation;
/// Composition model and loading.
pub mod composition;
/// Cursor target resolution and pointer motion.
pub mod cursor;
/// Scene transitions.
pub mod effects;
/// Whole-frame evaluation.
pub mod eval;
/// Shared primitives.
pub mod foundation;
/// Simulated UI interactions.
pub mod interaction;
/// Timeline editing helpers.
pub mod timeline;

pub use crate::animation::ease::Easing;
pub use crate::animation::keyframes::interpolate_keyframes;
pub use crate::animation::path::{MotionPath, PathPoint, PathSample};
pub use crate::animation::progress::resolve_progress;
pub use crate::animation::spring::SpringConfig;
pub use crate::composition::Composition;
pub use crate::cursor::{LayoutSnapshot, TargetCache, resolve_all_targets, resolve_target};
pub use crate::effects::transitions::scene_transition_at;
pub use crate::eval::{EvalOpts, FrameEvaluator, FrameState, evaluate_range};
pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Vec2,
};
pub use crate::foundation::error::{FramelineError, FramelineResult};
pub use crate::interaction::evaluate_interactions;
pub use crate::timeline::snap::{collect_snap_points, snap_drag};
