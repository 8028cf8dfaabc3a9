//! Composition data model and JSON loading.

mod load;
/// Serde model of a composition document.
pub mod model;

pub use model::{
    Composition, CursorKeyframe, Interaction, InteractionAction, Item, ItemKind,
    PropertyKeyframe, Scene, Track, TrackKind,
};
