use std::collections::BTreeMap;
use std::sync::Arc;

use kurbo::Point;
use serde::Serialize;

use crate::animation::keyframes::interpolate_keyframes;
use crate::animation::path::PathSample;
use crate::composition::model::{Composition, Item, Track};
use crate::cursor::motion::cursor_position_at;
use crate::cursor::resolver::TargetLookup;
use crate::effects::transitions::{ActiveTransition, scene_transition_at};
use crate::foundation::math::ratio01;
use crate::interaction::state::{InteractionFrame, InteractionIndex};

/// One visible item at one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemState {
    /// Item id.
    pub item_id: String,
    /// Owning track id.
    pub track_id: String,
    /// Frames since the item started.
    pub local_frame: u64,
    /// Interpolated numeric properties.
    pub properties: BTreeMap<String, f64>,
    /// Motion path sample, for items with a path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathSample>,
    /// Pointer position, for cursor items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Point>,
}

/// Everything the evaluators produce for one absolute frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameState {
    /// Absolute frame.
    pub frame: u64,
    /// Visible items in track order.
    pub items: Vec<ItemState>,
    /// Interaction overrides by selector.
    pub interactions: InteractionFrame,
    /// Running scene transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<ActiveTransition>,
}

/// Evaluates whole frames of one composition.
///
/// Construction indexes cursor interactions once; [`FrameEvaluator::evaluate`] is then a pure
/// function of the frame number and can be called from many threads at once.
#[derive(Debug)]
pub struct FrameEvaluator<'a> {
    comp: &'a Composition,
    interactions: InteractionIndex,
    targets: Arc<TargetLookup>,
}

impl<'a> FrameEvaluator<'a> {
    /// Evaluator with no resolved cursor targets (manual positions only).
    pub fn new(comp: &'a Composition) -> Self {
        Self {
            comp,
            interactions: InteractionIndex::build(&comp.tracks),
            targets: Arc::new(TargetLookup::new()),
        }
    }

    /// Use pre-resolved cursor targets.
    pub fn with_targets(mut self, targets: Arc<TargetLookup>) -> Self {
        self.targets = targets;
        self
    }

    /// The composition being evaluated.
    pub fn composition(&self) -> &'a Composition {
        self.comp
    }

    /// Evaluate absolute `frame`. Items whose window does not contain it are left out.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn evaluate(&self, frame: u64) -> FrameState {
        let items = self
            .comp
            .tracks
            .iter()
            .flat_map(|t| t.items.iter().map(move |i| (t, i)))
            .filter(|(_, item)| item.contains(frame))
            .map(|(track, item)| self.item_state(track, item, frame))
            .collect();

        FrameState {
            frame,
            items,
            interactions: self.interactions.evaluate(frame),
            transition: scene_transition_at(
                &self.comp.scenes,
                frame,
                self.comp.canvas(),
                self.comp.fps,
            ),
        }
    }

    fn item_state(&self, track: &Track, item: &Item, frame: u64) -> ItemState {
        let local = frame - item.from;
        let local_f = local as f64;
        let canvas = self.comp.canvas();

        ItemState {
            item_id: item.id.clone(),
            track_id: track.id.clone(),
            local_frame: local,
            properties: interpolate_keyframes(&item.keyframes, local_f, self.comp.fps),
            path: item.motion_path.as_ref().map(|p| {
                p.evaluate(ratio01(local_f, item.duration_in_frames as f64))
            }),
            cursor: if item.is_cursor() {
                cursor_position_at(item, local_f, &self.targets, canvas)
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
