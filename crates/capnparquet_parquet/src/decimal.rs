//! Byte widths for fixed-length decimals.

use std::f64::consts::LOG10_2;

/// Smallest byte width whose two's-complement range holds `precision` digits.
///
/// Returns the least `w >= 1` with `2^(8w - 1) >= 10^precision`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn min_bytes_for_precision(precision: u32) -> u32 {
    if precision <= 38 {
        let limit = 10_u128.pow(precision);
        let mut width = 1;
        while width < 16 && (1_u128 << (8 * width - 1)) < limit {
            width += 1;
        }
        return width;
    }
    // Beyond u128: estimate from base-10 logarithms, then settle on the
    // exact boundary. 2^(8w-1) is never a power of ten, so there is no tie.
    let digits = f64::from(precision);
    let holds = |w: u64| (8 * w - 1) as f64 * LOG10_2 >= digits;
    let mut width = ((digits / LOG10_2 + 1.0) / 8.0).ceil() as u64;
    while width > 17 && holds(width - 1) {
        width -= 1;
    }
    while !holds(width) {
        width += 1;
    }
    u32::try_from(width).unwrap_or(u32::MAX)
}

/// Largest decimal precision a fixed-length array of `bytes` can hold.
///
/// Computes `floor(log10(2^(8n - 1) - 1))`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn max_precision_for_bytes(bytes: u32) -> u32 {
    if bytes == 0 {
        return 0;
    }
    if bytes <= 16 {
        let max = (1_u128 << (8 * bytes - 1)) - 1;
        return max.checked_ilog10().unwrap_or(0);
    }
    let digits = ((8 * u64::from(bytes) - 1) as f64 * LOG10_2).floor();
    digits.min(f64::from(u32::MAX)) as u32
}
