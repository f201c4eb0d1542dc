//! Declarative scenes built on the pixel buffer, plus the blend comparison sheet.

/// Scene rendering and sheet composition.
pub mod compose;
/// JSON scene description.
pub mod config;
