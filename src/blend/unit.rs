use crate::blend::factor::BlendFactor;
use crate::foundation::color::Color;
use crate::foundation::math::{clamp_u8, div255_round};

/// The four factors parameterizing one blend: a source/destination pair for the color channels
/// and another for alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BlendState {
    /// Factor applied to the source R, G and B.
    pub color_src: BlendFactor,
    /// Factor applied to the destination R, G and B.
    pub color_dst: BlendFactor,
    /// Factor applied to the source alpha.
    pub alpha_src: BlendFactor,
    /// Factor applied to the destination alpha.
    pub alpha_dst: BlendFactor,
}

impl BlendState {
    /// Opaque overwrite: the result is the source.
    pub const REPLACE: Self = Self::separate(
        BlendFactor::One,
        BlendFactor::Zero,
        BlendFactor::One,
        BlendFactor::Zero,
    );

    /// No-op: the result is the destination.
    pub const KEEP: Self = Self::separate(
        BlendFactor::Zero,
        BlendFactor::One,
        BlendFactor::Zero,
        BlendFactor::One,
    );

    /// Standard straight-alpha compositing.
    pub const ALPHA: Self = Self::separate(
        BlendFactor::SourceAlpha,
        BlendFactor::OneMinusSourceAlpha,
        BlendFactor::SourceAlpha,
        BlendFactor::OneMinusSourceAlpha,
    );

    /// Saturating add of both operands.
    pub const ADDITIVE: Self = Self::separate(
        BlendFactor::One,
        BlendFactor::One,
        BlendFactor::One,
        BlendFactor::One,
    );

    /// Source multiplied by destination.
    pub const MULTIPLY: Self = Self::separate(
        BlendFactor::DestinationColor,
        BlendFactor::Zero,
        BlendFactor::DestinationAlpha,
        BlendFactor::Zero,
    );

    /// Color factors as given, alpha accumulated additively `(One, One)`.
    pub const fn new(color_src: BlendFactor, color_dst: BlendFactor) -> Self {
        Self::separate(color_src, color_dst, BlendFactor::One, BlendFactor::One)
    }

    /// Fully separate color and alpha factors.
    pub const fn separate(
        color_src: BlendFactor,
        color_dst: BlendFactor,
        alpha_src: BlendFactor,
        alpha_dst: BlendFactor,
    ) -> Self {
        Self {
            color_src,
            color_dst,
            alpha_src,
            alpha_dst,
        }
    }

    /// Blend `src` onto `dst` with this state.
    pub fn apply(self, src: Color, dst: Color) -> Color {
        blend(
            src,
            dst,
            self.color_src,
            self.color_dst,
            self.alpha_src,
            self.alpha_dst,
        )
    }
}

impl Default for BlendState {
    fn default() -> Self {
        Self::ALPHA
    }
}

/// Compute `clamp(src * Fs + dst * Fd)` per channel.
///
/// R, G and B use the color factors; A uses the alpha factors. For the alpha channel the "color"
/// factors resolve against alpha. Products are summed in `u32` and rounded once, so `One`/`Zero`
/// combinations are exact.
pub fn blend(
    src: Color,
    dst: Color,
    color_src: BlendFactor,
    color_dst: BlendFactor,
    alpha_src: BlendFactor,
    alpha_dst: BlendFactor,
) -> Color {
    let channel = |s: u8, d: u8, fs: BlendFactor, fd: BlendFactor| -> u8 {
        let ws = fs.resolve(s, src.a, d, dst.a);
        let wd = fd.resolve(s, src.a, d, dst.a);
        clamp_u8(div255_round(u32::from(s) * ws + u32::from(d) * wd))
    };

    Color {
        r: channel(src.r, dst.r, color_src, color_dst),
        g: channel(src.g, dst.g, color_src, color_dst),
        b: channel(src.b, dst.b, color_src, color_dst),
        a: channel(src.a, dst.a, alpha_src, alpha_dst),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/unit.rs"]
mod tests;
