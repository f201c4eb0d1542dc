use crate::assets::decode::{AssetLoader, ImageAsset};
use crate::blend::factor::BlendFactor;
use crate::blend::unit::BlendState;
use crate::buffer::pixel_buffer::PixelBuffer;
use crate::foundation::color::Color;
use crate::foundation::core::PixelRect;
use crate::foundation::error::{BlitError, BlitResult};
use crate::scene::config::{LayerSource, SceneConfig};

/// Background of the blend comparison sheet.
pub const SHEET_BACKGROUND: Color = Color::rgb(100, 100, 100);
/// Gap between sheet cells and around the border.
pub const SHEET_MARGIN: u32 = 50;
/// Cells per sheet row.
pub const SHEET_COLUMNS: u32 = 3;

/// Color factor pairs shown by default on the comparison sheet. Alpha accumulates with
/// `(One, One)`.
pub const DEFAULT_SHEET_SAMPLES: [BlendState; 6] = [
    BlendState::new(BlendFactor::One, BlendFactor::One),
    BlendState::new(BlendFactor::One, BlendFactor::Zero),
    BlendState::new(BlendFactor::SourceAlpha, BlendFactor::OneMinusSourceAlpha),
    BlendState::new(BlendFactor::DestinationColor, BlendFactor::Zero),
    BlendState::new(BlendFactor::DestinationColor, BlendFactor::SourceColor),
    BlendState::new(BlendFactor::OneMinusDestinationColor, BlendFactor::One),
];

/// Opaque ramp: red grows along x, green along y.
pub fn gradient_image(width: u32, height: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (255 * u64::from(x) / u64::from(width)) as u8;
            let g = (255 * u64::from(y) / u64::from(height)) as u8;
            buf.set_pixel(Color::rgb(r, g, 0), x, y);
        }
    }
    buf
}

/// Render a scene into a fresh buffer.
///
/// Image layers are loaded through `loader`; every source rect is validated against its source
/// before that layer writes anything.
#[tracing::instrument(skip_all, fields(scene = %cfg.name))]
pub fn render_scene(cfg: &SceneConfig, loader: &dyn AssetLoader) -> BlitResult<PixelBuffer> {
    let mut frame = PixelBuffer::filled(cfg.canvas.width, cfg.canvas.height, cfg.clear);

    for (i, layer) in cfg.layers.iter().enumerate() {
        let source = match &layer.source {
            LayerSource::Image { path } => loader.load(path)?.into_buffer()?,
            LayerSource::Solid {
                color,
                width,
                height,
            } => PixelBuffer::filled(*width, *height, *color),
            LayerSource::Gradient { width, height } => gradient_image(*width, *height),
        };
        let rect = layer
            .src_rect
            .unwrap_or_else(|| PixelRect::full(source.width(), source.height()));
        let [x, y] = layer.at;

        match layer.blend {
            Some(state) => frame.copy_from_blended(source.view(), rect, x, y, state)?,
            None => frame.copy_from(source.view(), rect, x, y)?,
        }
        tracing::debug!(layer = i, x, y, blended = layer.blend.is_some(), "drew layer");
    }

    Ok(frame)
}

/// Build the blend comparison sheet for `overlay`.
///
/// The first row shows a gradient base the size of the overlay, the overlay's color with alpha
/// forced opaque, and its alpha as grey. Each following cell shows the base with the overlay
/// blended on top using one entry of `samples`.
pub fn blend_test_sheet(overlay: &ImageAsset, samples: &[BlendState]) -> BlitResult<PixelBuffer> {
    let (w, h) = (overlay.width, overlay.height);
    let overlay_view = overlay.view()?;

    let too_large = || BlitError::validation(format!("overlay {w}x{h} is too large for a sheet"));
    let rows = u32::try_from(samples.len())
        .ok()
        .and_then(|n| n.div_ceil(SHEET_COLUMNS).checked_add(1))
        .ok_or_else(too_large)?;
    let cell_w = w.checked_add(SHEET_MARGIN).ok_or_else(too_large)?;
    let cell_h = h.checked_add(SHEET_MARGIN).ok_or_else(too_large)?;
    let sheet_w = SHEET_COLUMNS
        .checked_mul(cell_w)
        .and_then(|v| v.checked_add(SHEET_MARGIN))
        .ok_or_else(too_large)?;
    let sheet_h = rows
        .checked_mul(cell_h)
        .and_then(|v| v.checked_add(SHEET_MARGIN))
        .ok_or_else(too_large)?;
    if i32::try_from(sheet_w).is_err() || i32::try_from(sheet_h).is_err() {
        return Err(too_large());
    }
    let base = gradient_image(w, h);
    let mut sheet = PixelBuffer::filled(sheet_w, sheet_h, SHEET_BACKGROUND);

    // Cell origins lie inside the sheet, so the u32 math cannot overflow.
    let origin = |cell: u32| -> BlitResult<(i32, i32)> {
        let col = cell % SHEET_COLUMNS;
        let row = cell / SHEET_COLUMNS;
        let x = i32::try_from(SHEET_MARGIN + col * cell_w).map_err(|_| too_large())?;
        let y = i32::try_from(SHEET_MARGIN + row * cell_h).map_err(|_| too_large())?;
        Ok((x, y))
    };
    let full = PixelRect::full(w, h);

    let (x, y) = origin(0)?;
    sheet.copy_from(base.view(), full, x, y)?;

    let (cx, cy) = origin(1)?;
    let (ax, ay) = origin(2)?;
    let (cx, cy, ax, ay) = (cx as u32, cy as u32, ax as u32, ay as u32);
    for (py, row) in overlay.pixels.chunks_exact(w.max(1) as usize).enumerate() {
        let py = py as u32;
        for (px, p) in row.iter().enumerate() {
            let px = px as u32;
            sheet.set_pixel(Color::rgb(p.r, p.g, p.b), cx + px, cy + py);
            sheet.set_pixel(Color::rgb(p.a, p.a, p.a), ax + px, ay + py);
        }
    }

    for (i, state) in samples.iter().enumerate() {
        let (x, y) = origin(SHEET_COLUMNS + i as u32)?;
        sheet.copy_from(base.view(), full, x, y)?;
        sheet.copy_from_blended(overlay_view, full, x, y, *state)?;
        tracing::debug!(
            cell = i,
            src = state.color_src.label(),
            dest = state.color_dst.label(),
            "sheet sample"
        );
    }

    Ok(sheet)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
