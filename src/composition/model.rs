use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::animation::ease::{Easing, lenient_easing};
use crate::animation::path::MotionPath;
use crate::animation::spring::SpringConfig;
use crate::effects::transitions::TransitionSpec;
use crate::foundation::core::{Canvas, Fps, Vec2};

/// A timed composition: tracks of items plus optional scenes.
///
/// Evaluators treat a composition as immutable input; nothing is cached on it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Total length in frames.
    pub duration_in_frames: u64,
    /// Ordered lanes of items.
    #[serde(default)]
    pub tracks: Vec<Track>,
    /// Macro time groupings with their own in-transitions.
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl Composition {
    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Every cursor item across all tracks, in track order.
    pub fn cursor_items(&self) -> impl Iterator<Item = &Item> {
        self.tracks
            .iter()
            .flat_map(|t| t.items.iter())
            .filter(|i| i.is_cursor())
    }
}

/// Kind tag of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Text overlays.
    Text,
    /// Video clips.
    Video,
    /// Audio clips.
    Audio,
    /// Still images.
    Image,
    /// Rendered UI components.
    Component,
    /// Simulated pointer lanes.
    Cursor,
    /// Gradient backgrounds.
    Gradient,
}

/// An ordered lane of items. Items are intended not to overlap; evaluators do not enforce it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Stable track id.
    #[serde(default)]
    pub id: String,
    /// Kind tag.
    #[serde(rename = "type")]
    pub kind: TrackKind,
    /// Placed items.
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A placed, timed instance on a track.
#[derive(Debug, Clone)]
pub struct Item {
    /// Stable item id.
    pub id: String,
    /// Absolute start frame.
    pub from: u64,
    /// Length in frames.
    pub duration_in_frames: u64,
    /// Kind-specific payload.
    pub kind: ItemKind,
    /// Item-relative property keyframes. Always empty for cursor items, whose keyframes live
    /// in [`ItemKind::Cursor`].
    pub keyframes: Vec<PropertyKeyframe>,
    /// Optional motion path sampled by item progress.
    pub motion_path: Option<MotionPath>,
}

impl Item {
    /// Exclusive end frame.
    pub fn end(&self) -> u64 {
        self.from.saturating_add(self.duration_in_frames)
    }

    /// Whether `frame` falls inside `[from, from + duration)`.
    pub fn contains(&self, frame: u64) -> bool {
        self.from <= frame && frame < self.end()
    }

    /// Whether this item drives a simulated pointer.
    pub fn is_cursor(&self) -> bool {
        matches!(self.kind, ItemKind::Cursor { .. })
    }

    /// Cursor keyframes, empty for non-cursor items.
    pub fn cursor_keyframes(&self) -> &[CursorKeyframe] {
        match &self.kind {
            ItemKind::Cursor { keyframes } => keyframes,
            _ => &[],
        }
    }
}

/// Kind-specific item payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// Text overlay.
    Text {
        /// Displayed text.
        text: String,
    },
    /// Video clip.
    Video {
        /// Media source.
        src: String,
    },
    /// Audio clip.
    Audio {
        /// Media source.
        src: String,
    },
    /// Still image.
    Image {
        /// Media source.
        src: String,
    },
    /// Rendered UI component.
    Component {
        /// Component name.
        name: String,
    },
    /// Simulated pointer.
    Cursor {
        /// Pointer waypoints, relative to the cursor item's start.
        keyframes: Vec<CursorKeyframe>,
    },
    /// Gradient background.
    Gradient {
        /// CSS color stops.
        colors: Vec<String>,
    },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ItemKindRepr {
    Text {
        #[serde(default)]
        text: String,
    },
    Video {
        #[serde(default)]
        src: String,
    },
    Audio {
        #[serde(default)]
        src: String,
    },
    Image {
        #[serde(default)]
        src: String,
    },
    Component {
        #[serde(default)]
        name: String,
    },
    Cursor {},
    Gradient {
        #[serde(default)]
        colors: Vec<String>,
    },
}

impl ItemKindRepr {
    fn into_kind(self) -> ItemKind {
        match self {
            Self::Text { text } => ItemKind::Text { text },
            Self::Video { src } => ItemKind::Video { src },
            Self::Audio { src } => ItemKind::Audio { src },
            Self::Image { src } => ItemKind::Image { src },
            Self::Component { name } => ItemKind::Component { name },
            Self::Cursor {} => ItemKind::Cursor {
                keyframes: Vec::new(),
            },
            Self::Gradient { colors } => ItemKind::Gradient { colors },
        }
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Repr {
            #[serde(default)]
            id: String,
            from: u64,
            duration_in_frames: u64,
            #[serde(default)]
            keyframes: Vec<serde_json::Value>,
            #[serde(default)]
            motion_path: Option<MotionPath>,
            #[serde(flatten)]
            kind: ItemKindRepr,
        }

        fn parse_all<T>(raw: Vec<serde_json::Value>, item: &str) -> Vec<T>
        where
            T: serde::de::DeserializeOwned,
        {
            raw.into_iter()
                .enumerate()
                .filter_map(|(i, v)| match serde_json::from_value(v) {
                    Ok(k) => Some(k),
                    Err(e) => {
                        tracing::warn!(
                            item,
                            keyframe = i,
                            error = %e,
                            "dropping malformed keyframe"
                        );
                        None
                    }
                })
                .collect()
        }

        let r = Repr::deserialize(deserializer)?;
        let (kind, keyframes) = match r.kind {
            ItemKindRepr::Cursor {} => (
                ItemKind::Cursor {
                    keyframes: parse_all(r.keyframes, &r.id),
                },
                Vec::new(),
            ),
            other => (
                other.into_kind(),
                parse_all(r.keyframes, &r.id),
            ),
        };

        Ok(Self {
            id: r.id,
            from: r.from,
            duration_in_frames: r.duration_in_frames,
            kind,
            keyframes,
            motion_path: r.motion_path,
        })
    }
}

/// A `(frame, values)` waypoint for property interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyKeyframe {
    /// Item-relative frame. Missing, `null` or non-numeric frames read as NaN and are
    /// ignored by the interpolator.
    #[serde(default = "missing_frame", deserialize_with = "lenient_frame")]
    pub frame: f64,
    /// Property values; only finite numbers are interpolated.
    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
    /// Easing toward the next keyframe (linear when absent).
    #[serde(
        default,
        deserialize_with = "lenient_easing",
        skip_serializing_if = "Option::is_none"
    )]
    pub easing: Option<Easing>,
    /// Named spring preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spring_preset: Option<String>,
    /// Explicit spring parameters; override `spring_preset`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spring_config: Option<SpringConfig>,
}

impl PropertyKeyframe {
    /// Keyframe with numeric values and no easing.
    pub fn new<I, K>(frame: f64, values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            frame,
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), serde_json::Value::from(v)))
                .collect(),
            easing: None,
            spring_preset: None,
            spring_config: None,
        }
    }

    /// Builder-style easing setter.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Builder-style spring setter.
    pub fn with_spring(mut self, cfg: SpringConfig) -> Self {
        self.spring_config = Some(cfg);
        self
    }

    /// Finite numeric value of `name`, if any.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.values
            .get(name)
            .and_then(serde_json::Value::as_f64)
            .filter(|v| v.is_finite())
    }

    /// Spring driving the segment that starts at this keyframe.
    ///
    /// An explicit config wins over a preset; `easing: "spring"` alone uses the default spring.
    pub fn spring(&self) -> Option<SpringConfig> {
        if let Some(cfg) = self.spring_config {
            return Some(cfg);
        }
        if let Some(name) = &self.spring_preset {
            return Some(SpringConfig::preset(name));
        }
        match self.easing {
            Some(Easing::Spring) => Some(SpringConfig::default()),
            _ => None,
        }
    }
}

/// A pointer waypoint on a cursor item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorKeyframe {
    /// Frame relative to the cursor item's start. Unusable frames read as NaN and the
    /// keyframe is skipped.
    #[serde(default = "missing_frame", deserialize_with = "lenient_frame")]
    pub frame: f64,
    /// Selector of the element to point at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Pixel offset from the target's centre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_offset: Option<Vec2>,
    /// Manual x, also the fallback when the target is not found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Manual y, also the fallback when the target is not found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Simulated UI action starting at this keyframe. Unknown actions are dropped.
    #[serde(
        default,
        deserialize_with = "lenient_interaction",
        skip_serializing_if = "Option::is_none"
    )]
    pub interaction: Option<Interaction>,
}

/// Simulated UI action on a selector-addressed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Target element selector.
    pub selector: String,
    /// Action kind.
    pub action: InteractionAction,
    /// Typed or selected value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Window length override for hover/click.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_duration: Option<f64>,
    /// Frames per character for `type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

fn missing_frame() -> f64 {
    f64::NAN
}

fn lenient_frame<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Some(raw) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(f64::NAN);
    };
    match raw.as_f64() {
        Some(f) => Ok(f),
        None => {
            tracing::warn!(frame = %raw, "ignoring keyframe with a non-numeric frame");
            Ok(f64::NAN)
        }
    }
}

fn lenient_interaction<'de, D>(deserializer: D) -> Result<Option<Interaction>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Some(raw) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value::<Interaction>(raw.clone()) {
        Ok(ix) => Ok(Some(ix)),
        Err(e) => {
            tracing::warn!(interaction = %raw, error = %e, "ignoring unsupported interaction");
            Ok(None)
        }
    }
}

/// Supported UI actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAction {
    /// Pointer hover glow.
    Hover,
    /// Press bounce.
    Click,
    /// Latched focus ring.
    Focus,
    /// Progressive text entry.
    Type,
    /// Option selection.
    Select,
    /// Checkbox toggle.
    Check,
}

/// Macro time grouping with an optional in-transition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Stable scene id.
    #[serde(default)]
    pub id: String,
    /// Absolute start frame.
    pub start_frame: u64,
    /// Length in frames.
    pub duration_in_frames: u64,
    /// Transition played at the scene start.
    #[serde(default)]
    pub transition: Option<TransitionSpec>,
}

impl Scene {
    /// Whether `frame` falls inside the scene.
    pub fn contains(&self, frame: u64) -> bool {
        self.start_frame <= frame && frame < self.start_frame.saturating_add(self.duration_in_frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
