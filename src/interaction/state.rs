use std::collections::BTreeMap;

use serde::Serialize;

use crate::composition::model::Track;
use crate::interaction::effects;
use crate::interaction::timeline::InteractionTimeline;

/// Style and value overrides for one selector-addressed element.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementOverride {
    /// CSS property (camelCase) to value.
    pub styles: BTreeMap<String, String>,
    /// Form value to display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Typing caret visibility while text is still being typed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_typing_cursor: Option<bool>,
    /// Checkbox state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl ElementOverride {
    pub(crate) fn set(&mut self, key: &str, value: String) {
        self.styles.insert(key.to_owned(), value);
    }
}

/// Selector → overrides for one frame. Empty when no interaction is active.
pub type InteractionFrame = BTreeMap<String, ElementOverride>;

#[derive(Clone, Debug)]
struct CursorLane {
    from: u64,
    end: u64,
    timeline: InteractionTimeline,
}

/// Interaction timelines of every cursor item, built once per composition.
///
/// [`InteractionIndex::evaluate`] gives the same result as [`evaluate_interactions`] without
/// rebuilding the timelines each frame.
#[derive(Clone, Debug, Default)]
pub struct InteractionIndex {
    lanes: Vec<CursorLane>,
}

impl InteractionIndex {
    /// Index every cursor item on `tracks`, in track order.
    pub fn build(tracks: &[Track]) -> Self {
        let lanes = tracks
            .iter()
            .flat_map(|t| t.items.iter())
            .filter(|item| item.is_cursor())
            .map(|item| CursorLane {
                from: item.from,
                end: item.end(),
                timeline: InteractionTimeline::build(item.cursor_keyframes()),
            })
            .filter(|lane| !lane.timeline.is_empty())
            .collect();
        Self { lanes }
    }

    /// Overrides at absolute `frame`.
    ///
    /// Windows apply in keyframe order, cursor items in track order, so later interactions
    /// overwrite earlier ones on the same selector key by key.
    pub fn evaluate(&self, frame: u64) -> InteractionFrame {
        let mut out = InteractionFrame::new();
        for lane in &self.lanes {
            if !(lane.from <= frame && frame < lane.end) {
                continue;
            }
            let rel = (frame - lane.from) as f64;
            for window in lane.timeline.active_at(rel) {
                let entry = out
                    .entry(window.interaction.selector.clone())
                    .or_default();
                effects::apply(window, window.elapsed(rel), entry);
            }
        }
        out
    }

    /// Whether no cursor item carries interactions.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

/// One-shot evaluation of every cursor item's interactions at absolute `frame`.
pub fn evaluate_interactions(tracks: &[Track], frame: u64) -> InteractionFrame {
    InteractionIndex::build(tracks).evaluate(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/state.rs"]
mod tests;
