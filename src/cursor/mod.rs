//! Cursor target resolution.
//!
//! This is the one impure corner of the crate: it reads externally measured layout through
//! [`LayoutSurface`]. Everything else consumes the resolved [`TargetLookup`].

pub mod bridge;
/// Memoised target lookups.
pub mod cache;
/// Pointer motion between resolved targets.
pub mod motion;
/// Selector to screen-point resolution.
pub mod resolver;
pub mod snapshot;

pub use cache::{TargetCache, TargetCacheOpts, TargetCacheStats};
pub use resolver::{
    ElementContainer, LayoutError, LayoutSurface, ResolvedPoint, TargetLookup,
    resolve_all_targets, resolve_target,
};
pub use snapshot::{LayoutSnapshot, MeasuredContainer, MeasuredElement};
