use std::str::FromStr;

use crate::foundation::error::BlitError;

/// Weighting coefficient applied to one side of a blend.
///
/// The set mirrors the fixed-function blend stage of a GPU. Each factor resolves to a value in
/// `0..=255` (fixed-point `0.0..=1.0`) against the source and destination pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum BlendFactor {
    /// Constant `0`.
    Zero = 0,
    /// Constant `1`.
    One = 1,
    /// Source channel value.
    SourceColor = 2,
    /// `1 - source channel`.
    OneMinusSourceColor = 3,
    /// Source alpha.
    SourceAlpha = 4,
    /// `1 - source alpha`.
    OneMinusSourceAlpha = 5,
    /// Destination channel value.
    DestinationColor = 6,
    /// `1 - destination channel`.
    OneMinusDestinationColor = 7,
    /// Destination alpha.
    DestinationAlpha = 8,
    /// `1 - destination alpha`.
    OneMinusDestinationAlpha = 9,
}

impl BlendFactor {
    /// Every factor, in tag order.
    pub const ALL: [Self; 10] = [
        Self::Zero,
        Self::One,
        Self::SourceColor,
        Self::OneMinusSourceColor,
        Self::SourceAlpha,
        Self::OneMinusSourceAlpha,
        Self::DestinationColor,
        Self::OneMinusDestinationColor,
        Self::DestinationAlpha,
        Self::OneMinusDestinationAlpha,
    ];

    /// Short human-readable label, e.g. `"1 - Src Alpha"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Zero => "Zero",
            Self::One => "One",
            Self::SourceColor => "Src Color",
            Self::OneMinusSourceColor => "1 - Src Color",
            Self::SourceAlpha => "Src Alpha",
            Self::OneMinusSourceAlpha => "1 - Src Alpha",
            Self::DestinationColor => "Dest Color",
            Self::OneMinusDestinationColor => "1 - Dest Color",
            Self::DestinationAlpha => "Dest Alpha",
            Self::OneMinusDestinationAlpha => "1 - Dest Alpha",
        }
    }

    /// Raw tag value.
    pub fn as_tag(self) -> u8 {
        self as u8
    }

    /// Convert a raw tag back into a factor.
    ///
    /// # Panics
    /// Panics if `tag` is not one of the ten defined tags. An unknown tag can only come from a
    /// code defect, so it is not reported as a recoverable error.
    pub fn from_tag(tag: u8) -> Self {
        match Self::ALL.get(usize::from(tag)) {
            Some(f) => *f,
            None => panic!("invalid blend factor tag: {tag}"),
        }
    }

    /// Resolve the factor for one channel, in `0..=255`.
    ///
    /// `src_c`/`dst_c` are the channel being blended; `src_a`/`dst_a` are the alphas. For the alpha
    /// channel the caller passes the alphas in both positions.
    pub(crate) fn resolve(self, src_c: u8, src_a: u8, dst_c: u8, dst_a: u8) -> u32 {
        let v = match self {
            Self::Zero => 0,
            Self::One => 255,
            Self::SourceColor => src_c,
            Self::OneMinusSourceColor => 255 - src_c,
            Self::SourceAlpha => src_a,
            Self::OneMinusSourceAlpha => 255 - src_a,
            Self::DestinationColor => dst_c,
            Self::OneMinusDestinationColor => 255 - dst_c,
            Self::DestinationAlpha => dst_a,
            Self::OneMinusDestinationAlpha => 255 - dst_a,
        };
        u32::from(v)
    }
}

impl std::fmt::Display for BlendFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BlendFactor {
    type Err = BlitError;

    /// Parse a variant name (`"OneMinusSourceAlpha"`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| format!("{f:?}").eq_ignore_ascii_case(needle))
            .ok_or_else(|| BlitError::validation(format!("unknown blend factor \"{needle}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/factor.rs"]
mod tests;
