//! Blender output, formatter and output pipe programming.

use crate::foundation::core::{Color, Rect};
use crate::foundation::error::VpeResult;
use crate::hw::color::tf_select;
use crate::hw::regs::*;
use crate::hw::vpe10::{format_code, swaps_red_blue};
use crate::model::job::AlphaMode;
use crate::model::surface::{ColorRange, FormatClass};
use crate::plan::stream_ctx::OutputContext;
use crate::writer::config::ConfigWriter;

/// 12-bit clamp window for limited-range output: 16..235 scaled by 16.
const LIMITED_CLAMP: u32 = (16 << 4) | ((235 << 4) << 16);
const FULL_CLAMP: u32 = 0xFFF << 16;

/// Registers shared by every command writing the same destination.
pub(crate) fn program_output_shared(
    cw: &mut ConfigWriter<'_, '_>,
    out: &OutputContext,
    bg: Color,
) -> VpeResult<()> {
    let surf = &out.surface;
    cw.write_seq(
        VPCDC_BE0_P2B_CONFIG,
        &[
            format_code(surf.format)
                | (surf.swizzle.code() << 8)
                | (u32::from(swaps_red_blue(surf.format)) << 16),
            0,
        ],
    )?;
    cw.write_seq(
        VPMPCC_BG_R_CR,
        &[
            Color::unorm(bg.r, 12),
            Color::unorm(bg.g, 12),
            Color::unorm(bg.b, 12),
        ],
    )?;
    cw.write(VPMPC_OUT0_MUX, 0)?;

    let class = surf.format.class();
    let limited = surf.cs.range == ColorRange::Limited;
    let (denorm, bit_depth) = match class {
        FormatClass::Rgb8 | FormatClass::Yuv8 => (1, 1),
        FormatClass::Rgb10 | FormatClass::Yuv10 => (2, 1 | (1 << 4)),
        FormatClass::RgbFp16 => (0, 0),
    };
    let clamp = if limited { LIMITED_CLAMP } else { FULL_CLAMP };
    cw.write_seq(VPMPC_OUT0_DENORM_CONTROL, &[denorm, clamp, clamp])?;
    cw.write_seq(VPMPCC_OGAM_CONTROL, &[tf_select(surf.cs.tf), 0])?;

    cw.write_seq(VPFMT_CONTROL, &[0, bit_depth, 0])?;
    if limited {
        cw.write_seq(VPFMT_CLAMP_COMPONENT_R, &[clamp, clamp, clamp, 1])?;
    } else {
        cw.write(VPFMT_CLAMP_CNTL, 0)?;
    }

    let alpha = match out.alpha_mode {
        AlphaMode::Opaque => 0xFF << 8,
        AlphaMode::BgColor => 1 | (Color::unorm(bg.a, 8) << 8),
    };
    cw.write(VPOPP_PIPE_CONTROL, alpha)?;
    Ok(())
}

/// Output size of one command.
pub(crate) fn program_command(cw: &mut ConfigWriter<'_, '_>, out_vp: Rect) -> VpeResult<()> {
    cw.write(
        VPOPP_PIPE_OUTPUT_SIZE,
        (out_vp.width.max(1) - 1) | ((out_vp.height.max(1) - 1) << 16),
    )
}

#[cfg(test)]
#[path = "../../../tests/unit/hw/vpe10/backend.rs"]
mod tests;
