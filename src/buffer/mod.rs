//! CPU framebuffers.

/// Owned pixel buffer and borrowed source views.
pub mod pixel_buffer;
