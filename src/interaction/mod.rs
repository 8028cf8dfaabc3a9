//! Simulated UI interactions driven by cursor keyframes.
//!
//! Cursor keyframes may carry an [`Interaction`](crate::composition::model::Interaction)
//! (hover, click, focus, type, select, check). Each one opens a window on the cursor item's
//! local timeline; while the window is open an effect writes style overrides for the target
//! selector. Every effect is a pure function of the frames elapsed since its keyframe, so
//! frames can be evaluated in any order.

pub mod effects;
/// Per-frame element overrides.
pub mod state;
/// Interaction windows.
pub mod timeline;

pub use state::{ElementOverride, InteractionFrame, InteractionIndex, evaluate_interactions};
pub use timeline::{InteractionTimeline, InteractionWindow};
