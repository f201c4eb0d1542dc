use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::blend::unit::BlendState;
use crate::foundation::color::Color;
use crate::foundation::core::{Canvas, PixelRect};
use crate::foundation::error::{BlitError, BlitResult};

/// Largest canvas or layer edge accepted from a scene file.
pub const MAX_SCENE_EDGE: u32 = 16_384;

/// A static frame described as a clear color plus an ordered stack of layers.
///
/// ```json
/// {
///   "name": "demo",
///   "canvas": { "width": 320, "height": 224 },
///   "clear": "#646464",
///   "layers": [
///     { "source": { "kind": "gradient", "width": 64, "height": 64 }, "at": [16, 16] },
///     {
///       "source": { "kind": "image", "path": "alpha.png" },
///       "at": [100, 100],
///       "blend": {
///         "color_src": "SourceAlpha", "color_dst": "OneMinusSourceAlpha",
///         "alpha_src": "One", "alpha_dst": "One"
///       }
///     }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Output name used when registering the scene.
    #[serde(default = "default_name")]
    pub name: String,
    /// Frame dimensions.
    pub canvas: Canvas,
    /// Color the frame is cleared to before drawing layers.
    #[serde(default = "default_clear")]
    pub clear: Color,
    /// Layers drawn in order, later on top.
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
}

/// One copy or blended copy onto the scene frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerSpec {
    /// Where the pixels come from.
    pub source: LayerSource,
    /// Region of the source to draw; the whole source when absent.
    #[serde(default)]
    pub src_rect: Option<PixelRect>,
    /// Destination of the region's top-left corner. May be negative.
    #[serde(default)]
    pub at: [i32; 2],
    /// Blend factors; a plain overwrite when absent.
    #[serde(default)]
    pub blend: Option<BlendState>,
}

/// Pixel source of a layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerSource {
    /// Image file, relative to the scene file's directory.
    Image {
        /// Path to the image.
        path: PathBuf,
    },
    /// Rectangle of one color.
    Solid {
        /// Fill color.
        color: Color,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Red-over-x, green-over-y ramp.
    Gradient {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

fn default_name() -> String {
    "scene".to_owned()
}

fn default_clear() -> Color {
    Color::rgb(100, 100, 100)
}

impl SceneConfig {
    /// Parse and validate a scene from JSON text.
    pub fn from_json_str(s: &str) -> BlitResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| BlitError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a scene file.
    pub fn from_path(path: &Path) -> BlitResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check dimension limits. Source rects are checked against their sources at render time.
    pub fn validate(&self) -> BlitResult<()> {
        check_edges("canvas", self.canvas.width, self.canvas.height)?;
        for (i, layer) in self.layers.iter().enumerate() {
            match &layer.source {
                LayerSource::Solid { width, height, .. }
                | LayerSource::Gradient { width, height } => {
                    check_edges(&format!("layer {i}"), *width, *height)?;
                }
                LayerSource::Image { path } => {
                    if path.as_os_str().is_empty() {
                        return Err(BlitError::validation(format!(
                            "layer {i}: image path must be non-empty"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_edges(what: &str, width: u32, height: u32) -> BlitResult<()> {
    if width > MAX_SCENE_EDGE || height > MAX_SCENE_EDGE {
        return Err(BlitError::validation(format!(
            "{what}: {width}x{height} exceeds the {MAX_SCENE_EDGE} pixel edge limit"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
