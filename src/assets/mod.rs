//! Image asset loading.

/// Decoding and filesystem loading.
pub mod decode;
