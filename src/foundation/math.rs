use crate::foundation::fixpt::Fixed31_32;

/// `ceil(a / b)` for `b > 0`.
pub(crate) fn ceil_div(a: u64, b: u64) -> u64 {
    a.div_ceil(b)
}

/// `ceil(a / b)` on signed values, `b > 0`.
pub(crate) fn ceil_div_signed(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b > 0 { q + 1 } else { q }
}

/// Round `v` up to the next multiple of `m` (`m > 0`).
pub(crate) fn round_up_to_multiple(v: u64, m: u64) -> u64 {
    ceil_div(v, m) * m
}

/// Scaling factor `dst / src` in thousandths, the unit the capability table uses.
pub(crate) fn ratio_1000(dst: u32, src: u32) -> u64 {
    if src == 0 {
        return u64::MAX;
    }
    u64::from(dst) * 1000 / u64::from(src)
}

/// Scaler step `src / dst`: how many source pixels advance per destination pixel.
pub(crate) fn scaler_ratio(src: u32, dst: u32) -> Fixed31_32 {
    Fixed31_32::from_fraction(i64::from(src), i64::from(dst.max(1)))
}

/// Optimal filter taps for one direction.
///
/// Identity uses a single tap, upscales use four, and downscales widen the kernel with the ratio,
/// even-aligned and bounded to `[4, max_taps]`.
pub(crate) fn optimal_taps(src: u32, dst: u32, max_taps: u32) -> u32 {
    if src == dst {
        return 1;
    }
    if src < dst {
        return 4.min(max_taps);
    }
    let ratio = scaler_ratio(src, dst);
    let taps = (2 * ratio.ceil()) as u32;
    let taps = taps.clamp(4, max_taps.max(4));
    (taps + 1) & !1
}

/// Chroma taps derived from the luma taps of a 4:2:0 surface.
pub(crate) fn chroma_taps(luma_taps: u32) -> u32 {
    if luma_taps <= 2 {
        luma_taps
    } else {
        (luma_taps / 2).max(2).next_multiple_of(2)
    }
}

/// Widest destination slice one segment may cover.
pub(crate) fn effective_segment_width(max_viewport_width: u32, line_buffer: u32, v_taps: u32) -> u32 {
    max_viewport_width.min(line_buffer / v_taps.max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
