use crate::animation::ease::Easing;
use crate::animation::spring::SpringConfig;
use crate::foundation::core::Fps;

/// Map elapsed local time inside a segment to animation progress.
///
/// - non-finite `local_frame` → 0
/// - `duration <= 0` (or NaN) → 1, the end state
/// - a spring configuration, or [`Easing::Spring`] without one, runs the spring step response
/// - otherwise the closed-form easing of `clamp(local_frame / duration, 0, 1)`
///
/// Spring progress can leave `[0, 1]` before settling; closed-form easings never do.
pub fn resolve_progress(
    local_frame: f64,
    duration: f64,
    easing: Easing,
    spring: Option<SpringConfig>,
    fps: Fps,
) -> f64 {
    if !local_frame.is_finite() {
        return 0.0;
    }
    if !(duration > 0.0) {
        return 1.0;
    }

    let spring = match (spring, easing) {
        (Some(cfg), _) => Some(cfg),
        (None, Easing::Spring) => Some(SpringConfig::default()),
        (None, _) => None,
    };
    match spring {
        Some(cfg) => cfg.progress(local_frame, duration, fps),
        None => easing.apply(local_frame / duration),
    }
}
