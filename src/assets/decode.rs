use std::path::{Path, PathBuf};

use crate::buffer::pixel_buffer::{PixelBuffer, PixelView};
use crate::foundation::color::Color;
use crate::foundation::error::{BlitError, BlitResult};

/// Decoded raster image: flat row-major straight-alpha pixels plus dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAsset {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major pixels, `width * height` long.
    pub pixels: Vec<Color>,
}

impl ImageAsset {
    /// Borrow as a copy source.
    pub fn view(&self) -> BlitResult<PixelView<'_>> {
        PixelView::new(&self.pixels, self.width, self.height)
    }

    /// Convert into an owned buffer.
    pub fn into_buffer(self) -> BlitResult<PixelBuffer> {
        PixelBuffer::from_pixels(self.width, self.height, self.pixels)
    }
}

/// Decode encoded image bytes (any format the `image` crate understands) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> BlitResult<ImageAsset> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BlitError::asset(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let pixels = rgba
        .into_raw()
        .chunks_exact(4)
        .map(|p| Color::new(p[0], p[1], p[2], p[3]))
        .collect();

    Ok(ImageAsset {
        width,
        height,
        pixels,
    })
}

/// Source of decoded images addressed by path.
pub trait AssetLoader {
    /// Load and decode the image at `path`.
    fn load(&self, path: &Path) -> BlitResult<ImageAsset>;
}

/// Loads images from the filesystem, resolving relative paths against `root`.
#[derive(Clone, Debug)]
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    /// Create a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory for relative paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl AssetLoader for FsAssetLoader {
    #[tracing::instrument(skip(self))]
    fn load(&self, path: &Path) -> BlitResult<ImageAsset> {
        let full = self.resolve(path);
        let bytes = std::fs::read(&full)
            .map_err(|e| BlitError::asset(format!("read '{}': {e}", full.display())))?;
        let asset = decode_image(&bytes).map_err(|e| match e {
            BlitError::Asset(msg) => BlitError::asset(format!("'{}': {msg}", full.display())),
            other => other,
        })?;
        tracing::debug!(
            path = %full.display(),
            width = asset.width,
            height = asset.height,
            "loaded image"
        );
        Ok(asset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
