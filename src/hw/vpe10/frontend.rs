//! Fetch, format conversion, color management, scaler and blender programming.

use crate::foundation::core::{Color, Rect};
use crate::foundation::error::VpeResult;
use crate::foundation::fixpt::Fixed31_32;
use crate::hw::color::shaper_lut;
use crate::hw::filter::FilterKind;
use crate::hw::regs::*;
use crate::hw::vpe10::{format_code, swaps_red_blue};
use crate::model::surface::{ColorRange, FormatClass};
use crate::plan::command::{CmdInput, CmdType};
use crate::plan::stream_ctx::StreamContext;
use crate::writer::config::ConfigWriter;

/// Expands 2-bit alpha to 0x00, 0x55, 0xAA, 0xFF.
const ALPHA_2BIT_EXPANSION: u32 = 0xFFAA_5500;

const DSCL_MODE_BYPASS: u32 = 0;
const DSCL_MODE_RGB: u32 = 1;
const DSCL_MODE_YUV420: u32 = 2;

/// Registers that stay the same for every command of a stream.
pub(crate) fn program_stream_shared(cw: &mut ConfigWriter<'_, '_>, ctx: &StreamContext) -> VpeResult<()> {
    let stream = &ctx.stream;
    let surf = &stream.surface;
    let fmt = format_code(surf.format);

    cw.write(
        VPCDC_FE0_SURFACE_CONFIG,
        fmt | (surf.swizzle.code() << 8)
            | (stream.rotation.code() << 16)
            | (u32::from(stream.horizontal_mirror) << 18)
            | (u32::from(stream.vertical_mirror) << 19),
    )?;
    cw.write(VPCDC_FE0_CROSSBAR_CONFIG, u32::from(swaps_red_blue(surf.format)))?;
    cw.write(VPCNVC_SURFACE_PIXEL_FORMAT, fmt)?;
    let expansion = u32::from(surf.cs.range == ColorRange::Limited);
    let force_opaque = u32::from(!surf.format.has_alpha());
    cw.write(
        VPCNVC_FORMAT_CONTROL,
        u32::from(ctx.per_pixel_alpha) | (expansion << 4) | (force_opaque << 8),
    )?;
    if surf.format.class() == FormatClass::Rgb10 {
        cw.write(VPCNVC_ALPHA_2BIT_LUT, ALPHA_2BIT_EXPANSION)?;
    }
    cw.write(
        VPCNVC_PRE_DEALPHA,
        u32::from(ctx.per_pixel_alpha && stream.blend.pre_multiplied_alpha),
    )?;

    let key = &stream.keying;
    if key.enable_luma_key {
        cw.write(VPCNVC_COLOR_KEYER_CONTROL, 1 | (1 << 4))?;
        let lo = Color::unorm(key.lower_luma_bound, 16);
        let hi = Color::unorm(key.upper_luma_bound, 16);
        cw.write(VPCNVC_COLOR_KEYER_GREEN, lo | (hi << 16))?;
    } else {
        cw.write(VPCNVC_COLOR_KEYER_CONTROL, 0)?;
    }

    match &ctx.color.in_csc {
        Some(regs) => {
            cw.write(VPCNVC_PRE_CSC_MODE, 1)?;
            cw.write_seq(VPCNVC_PRE_CSC_C11_C12, regs)?;
        }
        None => cw.write(VPCNVC_PRE_CSC_MODE, 0)?,
    }

    let gamut_bypass = u32::from(ctx.color.gamut.is_none());
    let lut_bypass = u32::from(ctx.lut.is_none());
    cw.write(VPCM_CONTROL, gamut_bypass | (lut_bypass << 1))?;
    cw.write(VPCM_DGAM_CONTROL, ctx.color.degamma)?;
    match &ctx.color.gamut {
        Some(regs) => {
            cw.write(VPCM_GAMUT_REMAP_CONTROL, 1)?;
            cw.write_seq(VPCM_GAMUT_REMAP_C11_C12, regs)?;
        }
        None => cw.write(VPCM_GAMUT_REMAP_CONTROL, 0)?,
    }
    cw.write(VPCM_HDR_MULT_COEF, ctx.color.hdr_mult)?;

    match &ctx.lut {
        Some(lut) => {
            cw.write(VPCM_SHAPER_CONTROL, 1)?;
            cw.write(VPCM_SHAPER_LUT_INDEX, 0)?;
            cw.write_port(VPCM_SHAPER_LUT_DATA, &shaper_lut())?;
            cw.write(VPCM_3DLUT_MODE, 1)?;
            cw.write(VPCM_3DLUT_READ_WRITE_CONTROL, 0)?;
            cw.write(VPCM_3DLUT_INDEX, 0)?;
            cw.write_port(VPCM_3DLUT_DATA, &lut.packed)?;
        }
        None => {
            cw.write(VPCM_SHAPER_CONTROL, 0)?;
            cw.write(VPCM_3DLUT_MODE, 0)?;
        }
    }
    Ok(())
}

/// Registers that depend on the stream and the command type: scaler setup and blending.
pub(crate) fn program_stream_op(
    cw: &mut ConfigWriter<'_, '_>,
    ctx: &StreamContext,
    cmd_type: CmdType,
    pipe: u8,
) -> VpeResult<()> {
    let yuv = ctx.stream.surface.format.is_yuv420();
    let scaling = cmd_type == CmdType::Compositing
        && ctx.segments.iter().next().is_some_and(|s| !s.scaler.is_bypass());
    let taps = if scaling { ctx.taps } else { Default::default() };
    let mode = match (scaling, yuv) {
        (false, _) => DSCL_MODE_BYPASS,
        (true, false) => DSCL_MODE_RGB,
        (true, true) => DSCL_MODE_YUV420,
    };
    let field = |t: u32| t.max(1) - 1;
    cw.write(VPDSCL_MODE, mode)?;
    cw.write(
        VPDSCL_TAP_CONTROL,
        field(taps.v_taps)
            | (field(taps.h_taps) << 4)
            | (field(taps.v_taps_c) << 8)
            | (field(taps.h_taps_c) << 12),
    )?;
    cw.write_seq(VPDSCL_CONTROL, &[1, 0, 0])?;
    cw.write(VPLB_DATA_FORMAT, u32::from(ctx.per_pixel_alpha) << 4)?;
    cw.write(VPLB_MEMORY_CTRL, 1)?;

    if scaling {
        for kind in [
            FilterKind::HorzLuma,
            FilterKind::VertLuma,
            FilterKind::HorzChroma,
            FilterKind::VertChroma,
        ] {
            let chroma = matches!(kind, FilterKind::HorzChroma | FilterKind::VertChroma);
            let table = ctx.filters.table(kind);
            if table.is_empty() || (chroma && !yuv) {
                continue;
            }
            cw.write(VPDSCL_COEF_RAM_TAP_SELECT, (kind as u32) << 16)?;
            cw.write_port(VPDSCL_COEF_RAM_TAP_DATA, table)?;
        }
    }

    let (top, control) = if cmd_type == CmdType::Compositing {
        (u32::from(pipe), mpcc_control(ctx))
    } else {
        (MPCC_SEL_DISCONNECTED, 0)
    };
    cw.write_seq(VPMPCC_TOP_SEL, &[top, MPCC_SEL_DISCONNECTED, 0, control])?;
    Ok(())
}

fn mpcc_control(ctx: &StreamContext) -> u32 {
    let blend = &ctx.stream.blend;
    let mode = match (ctx.per_pixel_alpha, blend.global_alpha) {
        (false, false) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (true, true) => 3,
    };
    let alpha = if blend.global_alpha {
        Color::unorm(blend.global_alpha_value, 8)
    } else {
        0xFF
    };
    mode | (u32::from(blend.pre_multiplied_alpha) << 4) | (alpha << 16)
}

/// Registers specific to one command: viewports, scaler phases and output placement.
pub(crate) fn program_segment(cw: &mut ConfigWriter<'_, '_>, input: &CmdInput, out_vp: Rect) -> VpeResult<()> {
    let sc = &input.scaler;
    cw.write_seq(
        VPCDC_FE0_VIEWPORT_START_CONFIG,
        &[
            xy(sc.src_vp),
            wh(sc.src_vp),
            xy(sc.src_vp_c),
            wh(sc.src_vp_c),
        ],
    )?;
    cw.write_seq(
        VPDSCL_HORZ_FILTER_SCALE_RATIO,
        &[
            ratio(sc.ratios.horz),
            init(sc.inits.horz),
            ratio(sc.ratios.horz_c),
            init(sc.inits.horz_c),
            ratio(sc.ratios.vert),
            init(sc.inits.vert),
            ratio(sc.ratios.vert_c),
            init(sc.inits.vert_c),
        ],
    )?;

    let rec = sc.recout;
    let left = (i64::from(rec.x) - i64::from(out_vp.x)).max(0) as u32;
    let top = (i64::from(rec.y) - i64::from(out_vp.y)).max(0) as u32;
    let right = (out_vp.right() - i64::from(rec.x) - i64::from(rec.width)).max(0) as u32;
    let bottom = (out_vp.bottom() - i64::from(rec.y) - i64::from(rec.height)).max(0) as u32;
    cw.write_seq(
        VPDSCL_EXT_OVERSCAN_LEFT_RIGHT,
        &[
            (left << 16) | right,
            (top << 16) | bottom,
            out_vp.width,
            out_vp.height,
            left | (top << 16),
            rec.width | (rec.height << 16),
            out_vp.width | (out_vp.height << 16),
        ],
    )?;
    Ok(())
}

fn xy(r: Rect) -> u32 {
    (r.x as u32 & 0xFFFF) | ((r.y as u32 & 0xFFFF) << 16)
}

fn wh(r: Rect) -> u32 {
    (r.width & 0xFFFF) | ((r.height & 0xFFFF) << 16)
}

fn ratio(r: Fixed31_32) -> u32 {
    r.u3d19() << 5
}

fn init(v: Fixed31_32) -> u32 {
    (v.frac().u0d19() << 5) | (((v.floor() as u32) & 0xF) << 24)
}

#[cfg(test)]
#[path = "../../../tests/unit/hw/vpe10/frontend.rs"]
mod tests;
