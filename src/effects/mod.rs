//! Scene-level visual effects.

pub mod transitions;
