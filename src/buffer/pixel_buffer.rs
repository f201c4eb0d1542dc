use crate::blend::unit::BlendState;
use crate::foundation::color::Color;
use crate::foundation::core::PixelRect;
use crate::foundation::error::{BlitError, BlitResult};

/// Borrowed, validated view of a flat row-major pixel array used as a copy source.
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    width: u32,
    height: u32,
    pixels: &'a [Color],
}

impl<'a> PixelView<'a> {
    /// Wrap `pixels` as a `width x height` image.
    ///
    /// Fails when `pixels.len() != width * height`.
    pub fn new(pixels: &'a [Color], width: u32, height: u32) -> BlitResult<Self> {
        let expected = checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(BlitError::validation(format!(
                "pixel array has {} entries, expected {width}x{height} = {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &'a [Color] {
        self.pixels
    }

    fn row(&self, y: u32, x: u32, len: usize) -> &'a [Color] {
        let start = y as usize * self.width as usize + x as usize;
        &self.pixels[start..start + len]
    }
}

/// Owned, fixed-size, row-major grid of [`Color`] pixels.
///
/// Every pixel-writing operation clips silently: coordinates outside `[0, width) x [0, height)`
/// are skipped and out-of-range reads return [`Color::TRANSPARENT`]. A buffer with a zero
/// dimension is valid and inert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a `width x height` buffer filled with [`Color::TRANSPARENT`].
    ///
    /// # Panics
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Create a `width x height` buffer filled with `color`.
    ///
    /// # Panics
    /// Panics if `width * height` overflows `usize`.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let len = (width as usize)
            .checked_mul(height as usize)
            .unwrap_or_else(|| panic!("pixel buffer size overflows usize: {width}x{height}"));
        Self {
            width,
            height,
            pixels: vec![color; len],
        }
    }

    /// Take ownership of existing row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> BlitResult<Self> {
        PixelView::new(&pixels, width, height)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from tightly packed RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> BlitResult<Self> {
        let expected = checked_len(width, height)?
            .checked_mul(4)
            .ok_or_else(|| BlitError::validation("rgba8 byte length overflows usize"))?;
        if bytes.len() != expected {
            return Err(BlitError::validation(format!(
                "rgba8 buffer has {} bytes, expected {expected}",
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| Color::new(p[0], p[1], p[2], p[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Export as tightly packed RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Return `true` when the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable row-major pixels. The length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Borrow this buffer as a copy source.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Write one pixel. Out-of-range coordinates are a no-op.
    pub fn set_pixel(&mut self, color: Color, x: u32, y: u32) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Write one pixel by linear row-major index. Out-of-range indices are a no-op.
    pub fn set_pixel_at_index(&mut self, color: Color, index: usize) {
        if let Some(p) = self.pixels.get_mut(index) {
            *p = color;
        }
    }

    /// Read one pixel, or [`Color::TRANSPARENT`] when out of range.
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        self.get_pixel_checked(x, y).unwrap_or(Color::TRANSPARENT)
    }

    /// Read one pixel, or `None` when out of range.
    pub fn get_pixel_checked(&self, x: u32, y: u32) -> Option<Color> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Blend one pixel onto the buffer. Out-of-range coordinates are a no-op.
    pub fn set_pixel_blended(&mut self, color: Color, x: u32, y: u32, state: BlendState) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = state.apply(color, self.pixels[i]);
        }
    }

    /// Blend one pixel by linear row-major index. Out-of-range indices are a no-op.
    pub fn set_pixel_blended_at_index(&mut self, color: Color, index: usize, state: BlendState) {
        if let Some(p) = self.pixels.get_mut(index) {
            *p = state.apply(color, *p);
        }
    }

    /// Overwrite a `width x height` rectangle at signed `(x, y)`, clipped to the buffer.
    pub fn fill_rect(&mut self, color: Color, x: i32, y: i32, width: u32, height: u32) {
        let Some(clip) = self.clip(x, y, width, height) else {
            return;
        };
        for row in 0..clip.rows {
            let start = self.linear(clip.dst_x, clip.dst_y + row);
            self.pixels[start..start + clip.cols].fill(color);
        }
    }

    /// Copy `src_rect` of `src` to `(dest_x, dest_y)`, overwriting destination pixels.
    ///
    /// Only the overlap with this buffer is written. `src_rect` must lie inside `src`; that is
    /// checked before any pixel is touched.
    pub fn copy_from(
        &mut self,
        src: PixelView<'_>,
        src_rect: PixelRect,
        dest_x: i32,
        dest_y: i32,
    ) -> BlitResult<()> {
        src_rect.check_within(src.width, src.height)?;
        let Some(clip) = self.clip(dest_x, dest_y, src_rect.width, src_rect.height) else {
            return Ok(());
        };
        for row in 0..clip.rows {
            let from = src.row(
                src_rect.y + clip.skip_y + row as u32,
                src_rect.x + clip.skip_x,
                clip.cols,
            );
            let start = self.linear(clip.dst_x, clip.dst_y + row);
            self.pixels[start..start + clip.cols].copy_from_slice(from);
        }
        Ok(())
    }

    /// Like [`PixelBuffer::copy_from`], but each destination pixel becomes
    /// `state.apply(source, destination)`.
    pub fn copy_from_blended(
        &mut self,
        src: PixelView<'_>,
        src_rect: PixelRect,
        dest_x: i32,
        dest_y: i32,
        state: BlendState,
    ) -> BlitResult<()> {
        src_rect.check_within(src.width, src.height)?;
        let Some(clip) = self.clip(dest_x, dest_y, src_rect.width, src_rect.height) else {
            return Ok(());
        };
        for row in 0..clip.rows {
            let from = src.row(
                src_rect.y + clip.skip_y + row as u32,
                src_rect.x + clip.skip_x,
                clip.cols,
            );
            let start = self.linear(clip.dst_x, clip.dst_y + row);
            for (d, s) in self.pixels[start..start + clip.cols].iter_mut().zip(from) {
                *d = state.apply(*s, *d);
            }
        }
        Ok(())
    }

    /// Copy from a flat `src_width x src_height` array. See [`PixelBuffer::copy_from`].
    pub fn copy_from_array(
        &mut self,
        src: &[Color],
        src_width: u32,
        src_height: u32,
        src_rect: PixelRect,
        dest_x: i32,
        dest_y: i32,
    ) -> BlitResult<()> {
        let view = PixelView::new(src, src_width, src_height)?;
        self.copy_from(view, src_rect, dest_x, dest_y)
    }

    /// Blended copy from a flat array. See [`PixelBuffer::copy_from_blended`].
    #[allow(clippy::too_many_arguments)]
    pub fn copy_from_array_blended(
        &mut self,
        src: &[Color],
        src_width: u32,
        src_height: u32,
        src_rect: PixelRect,
        dest_x: i32,
        dest_y: i32,
        state: BlendState,
    ) -> BlitResult<()> {
        let view = PixelView::new(src, src_width, src_height)?;
        self.copy_from_blended(view, src_rect, dest_x, dest_y, state)
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(self.linear(x as usize, y as usize))
        } else {
            None
        }
    }

    fn linear(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }

    /// Intersect a `width x height` rectangle placed at signed `(x, y)` with the buffer.
    fn clip(&self, x: i32, y: i32, width: u32, height: u32) -> Option<Clip> {
        let (cols, skip_x, dst_x) = clip_axis(x, width, self.width)?;
        let (rows, skip_y, dst_y) = clip_axis(y, height, self.height)?;
        Some(Clip {
            cols,
            rows,
            skip_x,
            skip_y,
            dst_x,
            dst_y,
        })
    }
}

/// Overlap of a placed rectangle with the destination, in both coordinate spaces.
#[derive(Clone, Copy, Debug)]
struct Clip {
    cols: usize,
    rows: usize,
    /// Offset into the placed rectangle of the first visible column/row.
    skip_x: u32,
    skip_y: u32,
    dst_x: usize,
    dst_y: usize,
}

/// Clip the 1-D span `[pos, pos + len)` to `[0, limit)`.
///
/// Returns `(visible_len, skipped_leading, dst_start)` or `None` when nothing is visible.
fn clip_axis(pos: i32, len: u32, limit: u32) -> Option<(usize, u32, usize)> {
    let start = i64::from(pos);
    let end = start + i64::from(len);
    let vis_start = start.max(0);
    let vis_end = end.min(i64::from(limit));
    if vis_start >= vis_end {
        return None;
    }
    let skipped = (vis_start - start) as u32;
    Some(((vis_end - vis_start) as usize, skipped, vis_start as usize))
}

fn checked_len(width: u32, height: u32) -> BlitResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| BlitError::validation(format!("image size overflows: {width}x{height}")))
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/pixel_buffer.rs"]
mod tests;
