/// Frame, rate and canvas primitives.
pub mod core;
/// Error types.
pub mod error;
/// Stable content hashing.
pub mod hash;
pub(crate) mod math;
