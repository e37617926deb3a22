//! Geometry primitives used across trellis.
//!
//! All coordinates are `f32` screen-space units. Nothing here clamps: negative
//! sizes and out-of-range values pass through arithmetic untouched, since the
//! layout engine relies on extrapolation for percentage tricks.

/// Rectangle operations.
mod rect;
/// Two-component vectors.
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
