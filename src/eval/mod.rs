//! Whole-frame evaluation and range export.

/// Single-frame evaluation.
pub mod evaluator;
/// Frame range evaluation.
pub mod export;

pub use evaluator::{FrameEvaluator, FrameState, ItemState};
pub use export::{EvalOpts, evaluate_range};
