use crate::composition::model::{CursorKeyframe, Interaction, InteractionAction};

/// Default hover window in frames.
pub const DEFAULT_HOVER_FRAMES: f64 = 20.0;
/// Default click window in frames.
pub const DEFAULT_CLICK_FRAMES: f64 = 10.0;

/// The span of cursor-local frames during which one interaction is in effect.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionWindow {
    /// Keyframe frame; elapsed time is measured from here.
    pub start: f64,
    /// Exclusive end. Infinite for latched and persistent actions.
    pub end: f64,
    /// The interaction payload.
    pub interaction: Interaction,
}

impl InteractionWindow {
    /// Whether `rel_frame` falls inside `[start, end)`.
    pub fn contains(&self, rel_frame: f64) -> bool {
        self.start <= rel_frame && rel_frame < self.end
    }

    /// Frames since the window opened.
    pub fn elapsed(&self, rel_frame: f64) -> f64 {
        rel_frame - self.start
    }

    /// Window length: the hold duration for hover and click, infinite otherwise.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Precomputed interaction windows of one cursor item, in keyframe order.
///
/// Focus is latched: its window stays open until a later keyframe starts an interaction on a
/// different selector. The latch is resolved once here, so evaluating a frame never scans
/// forward through the keyframes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionTimeline {
    windows: Vec<InteractionWindow>,
}

impl InteractionTimeline {
    /// Build windows from a cursor item's keyframes. Keyframes with non-finite frames are
    /// ignored; the rest are taken in stable frame order.
    pub fn build(keyframes: &[CursorKeyframe]) -> Self {
        let mut keyed: Vec<(f64, &Interaction)> = keyframes
            .iter()
            .filter(|k| k.frame.is_finite())
            .filter_map(|k| k.interaction.as_ref().map(|ix| (k.frame, ix)))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

        let windows = keyed
            .iter()
            .enumerate()
            .map(|(i, &(start, ix))| {
                let end = match ix.action {
                    InteractionAction::Hover => start + hold(ix, DEFAULT_HOVER_FRAMES),
                    InteractionAction::Click => start + hold(ix, DEFAULT_CLICK_FRAMES),
                    InteractionAction::Focus => keyed[i + 1..]
                        .iter()
                        .find(|(f, other)| *f > start && other.selector != ix.selector)
                        .map(|(f, _)| *f)
                        .unwrap_or(f64::INFINITY),
                    InteractionAction::Type
                    | InteractionAction::Select
                    | InteractionAction::Check => f64::INFINITY,
                };
                InteractionWindow {
                    start,
                    end,
                    interaction: ix.clone(),
                }
            })
            .collect();

        Self { windows }
    }

    /// All windows, in keyframe order.
    pub fn windows(&self) -> &[InteractionWindow] {
        &self.windows
    }

    /// Windows open at `rel_frame`, in keyframe order.
    pub fn active_at(&self, rel_frame: f64) -> impl Iterator<Item = &InteractionWindow> {
        self.windows.iter().filter(move |w| w.contains(rel_frame))
    }

    /// Whether no keyframe carries an interaction.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

fn hold(ix: &Interaction, default: f64) -> f64 {
    match ix.hold_duration {
        Some(h) if h.is_finite() && h > 0.0 => h,
        _ => default,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/timeline.rs"]
mod tests;
