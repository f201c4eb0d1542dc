/// Divide by 255 with round-to-nearest, for sums of `channel * factor` products.
pub(crate) fn div255_round(x: u32) -> u32 {
    (x + 127) / 255
}

/// Saturate a widened channel value back into `0..=255`.
pub(crate) fn clamp_u8(x: u32) -> u8 {
    x.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
