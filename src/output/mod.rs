//! Named render outputs and the sinks that present them.
//!
//! Consumers mint a [`RenderOutputHandle`](handle::RenderOutputHandle) from an
//! [`OutputRegistry`](registry::OutputRegistry), draw into a buffer they own, and submit it each
//! tick. The registry forwards frames to a [`PresentationSink`](sink::PresentationSink).

/// Generation-tagged output handles.
pub mod handle;
/// Handle table and lifecycle checks.
pub mod registry;
/// Presentation sink trait and built-in sinks.
pub mod sink;
