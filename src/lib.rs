//! softblit is a software pixel compositing engine.
//!
//! It provides a CPU framebuffer with direct pixel writes, clipped rectangular copies, and
//! per-pixel blending parameterized by fixed-function blend factors, plus a handle-based registry
//! of named render outputs that forwards completed frames to a presentation sink.
//!
//! # Data flow
//!
//! 1. **Register**: [`OutputRegistry::create_output`] mints a [`RenderOutputHandle`]
//! 2. **Draw**: the consumer writes, copies and blends into a [`PixelBuffer`] it owns
//! 3. **Submit**: [`OutputRegistry::submit_frame`] validates the handle and calls the
//!    [`PresentationSink`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Straight-alpha RGBA8** everywhere; no color spaces, no premultiplication.
//! - **Clip, never fault**: pixel coordinates outside a buffer are skipped silently.
//! - **Single owner**: buffers and registries are plain values mutated by one caller per tick.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod blend;
mod buffer;
mod foundation;
mod output;
mod scene;

pub use assets::decode::{AssetLoader, FsAssetLoader, ImageAsset, decode_image};
pub use blend::factor::BlendFactor;
pub use blend::unit::{BlendState, blend};
pub use buffer::pixel_buffer::{PixelBuffer, PixelView};
pub use foundation::color::{Color, parse_hex};
pub use foundation::core::{Canvas, PixelRect};
pub use foundation::error::{BlitError, BlitResult, HandleFault};
pub use output::handle::RenderOutputHandle;
pub use output::registry::{OutputRegistry, RegistryOpts};
pub use output::sink::{
    InMemorySink, PngSink, PngSinkOpts, PresentationSink, SinkEvent, write_png,
};
pub use scene::compose::{
    DEFAULT_SHEET_SAMPLES, SHEET_BACKGROUND, SHEET_COLUMNS, SHEET_MARGIN, blend_test_sheet,
    gradient_image, render_scene,
};
pub use scene::config::{LayerSource, LayerSpec, MAX_SCENE_EDGE, SceneConfig};
