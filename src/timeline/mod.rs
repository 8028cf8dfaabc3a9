//! Editing assistance for the timeline view.

pub mod snap;
