//! Color-pipeline values: input CSC with procamp, gamut remap, transfer-function selectors,
//! HDR multiplier and the 3D LUT.

use crate::foundation::error::{VpeError, VpeResult};
use crate::foundation::fixpt::Fixed31_32;
use crate::model::job::HdrMetadata;
use crate::model::stream::{ColorAdjust, ToneMapParams};
use crate::model::surface::{ColorEncoding, ColorPrimaries, ColorRange, ColorSpace, TransferFunction};

/// Affine 3x4 matrix; rows are outputs, the last column is the offset.
type Mat34 = [[f64; 4]; 3];

const IDENTITY: Mat34 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
];

/// Six coefficient registers, two s2.13 values each, row-major.
pub(crate) type CscRegs = [u32; 6];

pub(crate) const LUT_3D_EDGE: usize = 17;
pub(crate) const LUT_3D_ENTRIES: usize = LUT_3D_EDGE * LUT_3D_EDGE * LUT_3D_EDGE;
pub(crate) const SHAPER_ENTRIES: usize = 33;

const PQ_PEAK_NITS: i64 = 10_000;
const SDR_WHITE_NITS: i64 = 80;

fn luma_weights(p: ColorPrimaries) -> (f64, f64) {
    match p {
        ColorPrimaries::Bt601 => (0.299, 0.114),
        ColorPrimaries::Bt709 => (0.2126, 0.0722),
        ColorPrimaries::Bt2020 => (0.2627, 0.0593),
    }
}

/// `a` after `b`.
fn compose(a: &Mat34, b: &Mat34) -> Mat34 {
    let mut out = [[0.0; 4]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = (0..3).map(|k| a[i][k] * b[k][j]).sum::<f64>();
        }
        row[3] += a[i][3];
    }
    out
}

/// Full-range YCbCr (channel order Cr, Y, Cb) to RGB.
fn ycbcr_to_rgb(p: ColorPrimaries) -> Mat34 {
    let (kr, kb) = luma_weights(p);
    let kg = 1.0 - kr - kb;
    let cr_r = 2.0 * (1.0 - kr);
    let cb_b = 2.0 * (1.0 - kb);
    let cb_g = -2.0 * kb * (1.0 - kb) / kg;
    let cr_g = -2.0 * kr * (1.0 - kr) / kg;
    [
        [cr_r, 1.0, 0.0, -0.5 * cr_r],
        [cr_g, 1.0, cb_g, -0.5 * (cr_g + cb_g)],
        [0.0, 1.0, cb_b, -0.5 * cb_b],
    ]
}

/// RGB to full-range YCbCr (channel order Cr, Y, Cb).
fn rgb_to_ycbcr(p: ColorPrimaries) -> Mat34 {
    let (kr, kb) = luma_weights(p);
    let kg = 1.0 - kr - kb;
    let sr = 2.0 * (1.0 - kr);
    let sb = 2.0 * (1.0 - kb);
    [
        [0.5, -kg / sr, -kb / sr, 0.5],
        [kr, kg, kb, 0.0],
        [-kr / sb, -kg / sb, 0.5, 0.5],
    ]
}

/// Limited to full range expansion in the stored channel order.
fn expand_range(encoding: ColorEncoding, range: ColorRange) -> Mat34 {
    if range == ColorRange::Full {
        return IDENTITY;
    }
    let ys = 255.0 / 219.0;
    let yo = -16.0 / 255.0 * ys;
    match encoding {
        ColorEncoding::Rgb => [
            [ys, 0.0, 0.0, yo],
            [0.0, ys, 0.0, yo],
            [0.0, 0.0, ys, yo],
        ],
        ColorEncoding::YCbCr => {
            let cs = 255.0 / 224.0;
            let co = 0.5 - 128.0 / 255.0 * cs;
            [
                [cs, 0.0, 0.0, co],
                [0.0, ys, 0.0, yo],
                [0.0, 0.0, cs, co],
            ]
        }
    }
}

/// Brightness, contrast, hue and saturation in full-range YCbCr.
fn procamp(adj: &ColorAdjust) -> Mat34 {
    let s = f64::from(adj.saturation);
    let (sin, cos) = f64::from(adj.hue).to_radians().sin_cos();
    let c = f64::from(adj.contrast);
    [
        [s * cos, 0.0, s * sin, 0.5 - 0.5 * s * (cos + sin)],
        [0.0, c, 0.0, f64::from(adj.brightness)],
        [-s * sin, 0.0, s * cos, 0.5 - 0.5 * s * (cos - sin)],
    ]
}

fn pack(m: &Mat34) -> CscRegs {
    let c = |v: f64| Fixed31_32::from_f64(v).s2d13();
    let mut regs = [0u32; 6];
    for (i, row) in m.iter().enumerate() {
        regs[2 * i] = c(row[0]) | (c(row[1]) << 16);
        regs[2 * i + 1] = c(row[2]) | (c(row[3]) << 16);
    }
    regs
}

/// Input CSC converting the stored values to full-range RGB with `adj` applied; `None` when
/// the stage can be bypassed.
pub(crate) fn input_csc(cs: &ColorSpace, adj: &ColorAdjust) -> Option<CscRegs> {
    let expand = expand_range(cs.encoding, cs.range);
    let m = match cs.encoding {
        ColorEncoding::YCbCr => {
            let yuv = if adj.is_identity() {
                expand
            } else {
                compose(&procamp(adj), &expand)
            };
            compose(&ycbcr_to_rgb(cs.primaries), &yuv)
        }
        ColorEncoding::Rgb => {
            if adj.is_identity() && cs.range == ColorRange::Full {
                return None;
            }
            if adj.is_identity() {
                expand
            } else {
                let to_yuv = compose(&rgb_to_ycbcr(cs.primaries), &expand);
                let adjusted = compose(&procamp(adj), &to_yuv);
                compose(&ycbcr_to_rgb(cs.primaries), &adjusted)
            }
        }
    };
    Some(pack(&m))
}

/// Linear-light primaries conversion; BT.601 shares BT.709's primaries here.
pub(crate) fn gamut_remap(src: ColorPrimaries, dst: ColorPrimaries) -> Option<CscRegs> {
    let wide = |p| p == ColorPrimaries::Bt2020;
    let m: Mat34 = match (wide(src), wide(dst)) {
        (false, true) => [
            [0.6274, 0.3293, 0.0433, 0.0],
            [0.0691, 0.9195, 0.0114, 0.0],
            [0.0164, 0.0880, 0.8956, 0.0],
        ],
        (true, false) => [
            [1.6605, -0.5876, -0.0728, 0.0],
            [-0.1246, 1.1329, -0.0083, 0.0],
            [-0.0182, -0.1006, 1.1187, 0.0],
        ],
        _ => return None,
    };
    Some(pack(&m))
}

/// Degamma / regamma ROM selector; 0 bypasses.
pub(crate) fn tf_select(tf: TransferFunction) -> u32 {
    match tf {
        TransferFunction::Linear => 0,
        TransferFunction::Srgb => 1,
        TransferFunction::Bt709 => 2,
        TransferFunction::Pq => 3,
    }
}

/// Linear-light gain between input and output transfer functions, unsigned 16.16.
pub(crate) fn hdr_multiplier(
    src: TransferFunction,
    dst: TransferFunction,
    hdr: Option<&HdrMetadata>,
) -> u32 {
    let gain = match (src == TransferFunction::Pq, dst == TransferFunction::Pq) {
        (true, false) => {
            let peak = hdr
                .map(|m| if m.max_content != 0 { m.max_content } else { m.max_mastering })
                .filter(|&nits| nits != 0)
                .map_or(PQ_PEAK_NITS, i64::from);
            Fixed31_32::from_fraction(PQ_PEAK_NITS, peak)
        }
        (false, true) => Fixed31_32::from_fraction(SDR_WHITE_NITS, PQ_PEAK_NITS),
        _ => Fixed31_32::ONE,
    };
    (gain.raw() >> 16).clamp(0, i64::from(u32::MAX)) as u32
}

/// Shaper ramp feeding the 3D LUT, unsigned 16-bit per entry.
pub(crate) fn shaper_lut() -> [u32; SHAPER_ENTRIES] {
    let last = (SHAPER_ENTRIES - 1) as u32;
    std::array::from_fn(|i| i as u32 * 0xFFFF / last)
}

/// 17x17x17 table packed for the data port: `r | g << 16`, then `b`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Lut3d {
    pub uid: u64,
    pub packed: Vec<u32>,
}

impl Lut3d {
    pub(crate) fn build(params: &ToneMapParams) -> VpeResult<Self> {
        let mut packed = Vec::new();
        packed
            .try_reserve_exact(2 * LUT_3D_ENTRIES)
            .map_err(|_| VpeError::NoMemory)?;
        match params.lut.as_deref() {
            Some(table) => {
                if table.len() != 3 * LUT_3D_ENTRIES {
                    return Err(VpeError::BadToneMapParams);
                }
                for rgb in table.chunks_exact(3) {
                    packed.push(u32::from(rgb[0] & 0xFFF) | (u32::from(rgb[1] & 0xFFF) << 16));
                    packed.push(u32::from(rgb[2] & 0xFFF));
                }
            }
            None => {
                let step = |i: usize| (i as u32 * 4095) / (LUT_3D_EDGE as u32 - 1);
                for i in 0..LUT_3D_ENTRIES {
                    let r = i % LUT_3D_EDGE;
                    let g = (i / LUT_3D_EDGE) % LUT_3D_EDGE;
                    let b = i / (LUT_3D_EDGE * LUT_3D_EDGE);
                    packed.push(step(r) | (step(g) << 16));
                    packed.push(step(b));
                }
            }
        }
        Ok(Self {
            uid: params.uid,
            packed,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hw/color.rs"]
mod tests;
