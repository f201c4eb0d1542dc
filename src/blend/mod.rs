//! Fixed-function pixel blending.

/// Blend factor tags.
pub mod factor;
/// Blend state and the per-pixel blend function.
pub mod unit;
