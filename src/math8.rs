/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Divide and round to nearest, ties away from zero
#[inline]
pub const fn div_round(numerator: usize, denominator: usize) -> usize {
    if denominator == 0 {
        return 0;
    }
    (2 * numerator + denominator) / (2 * denominator)
}

/// Subtract a fractional step from a level, round to nearest and clamp at zero
///
/// A non-zero level always drops by at least one so a fade cannot stall.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn decay8(level: u8, step: f32) -> u8 {
    if level == 0 {
        return 0;
    }
    let next = libm::roundf(f32::from(level) - step);
    if next <= 0.0 {
        return 0;
    }
    (next as u8).min(level - 1)
}
