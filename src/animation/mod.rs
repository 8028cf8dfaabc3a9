//! Frame-indexed animation math: easings, springs, keyframes and motion paths.

/// Easing curves.
pub mod ease;
pub mod keyframes;
/// Bezier motion paths.
pub mod path;
/// Named motion path shapes.
pub mod path_presets;
/// Easing or spring progress for a keyframe segment.
pub mod progress;
pub mod spring;
