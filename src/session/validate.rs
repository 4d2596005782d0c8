//! Job checks that need no planning. Geometry-dependent checks (ratios, taps, segment
//! layout, overlap) run in the planner.

use crate::foundation::core::Rect;
use crate::foundation::error::{VpeError, VpeResult};
use crate::hw::caps::Capabilities;
use crate::hw::color::LUT_3D_ENTRIES;
use crate::model::job::{BuildParam, Collaboration, HdrMetadata};
use crate::model::stream::{BlendInfo, ColorAdjust, KeyingParams, Rotation, Stream, ToneMapParams};
use crate::model::surface::{ColorEncoding, PlaneAddress, Surface, SwizzleMode};

/// Which side of the engine a surface is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Input,
    Output,
}

pub(crate) fn validate(param: &BuildParam, caps: &Capabilities) -> VpeResult<()> {
    let n = param.streams.len();
    if n == 0 || n > caps.max_input_streams as usize {
        return Err(VpeError::NumStreamNotSupported);
    }
    check_surface(&param.dst_surface, caps, Side::Output)?;
    let extent = param.dst_surface.plane_extent(0);
    check_rect(param.target_rect, extent, caps.min_viewport_size)?;
    for stream in &param.streams {
        check_stream(stream, caps)?;
    }
    if !param.bg_color.is_normalized() {
        return Err(VpeError::BgColorOutOfRange);
    }
    if let Some(hdr) = &param.hdr_metadata {
        check_hdr(hdr)?;
    }
    if let Some(collab) = &param.collaboration {
        check_collaboration(collab, caps)?;
    }
    Ok(())
}

fn check_stream(stream: &Stream, caps: &Capabilities) -> VpeResult<()> {
    let surf = &stream.surface;
    check_surface(surf, caps, Side::Input)?;
    if stream.rotation != Rotation::R0 && !caps.rotation {
        return Err(VpeError::RotationNotSupported);
    }
    if (stream.horizontal_mirror && !caps.h_mirror) || (stream.vertical_mirror && !caps.v_mirror) {
        return Err(VpeError::MirrorNotSupported);
    }
    check_rect(
        stream.scaling.src_rect,
        surf.plane_extent(0),
        caps.min_viewport_size,
    )?;
    let dst = stream.scaling.dst_rect;
    if dst.width < caps.min_viewport_size || dst.height < caps.min_viewport_size {
        return Err(VpeError::ViewportSizeNotSupported);
    }
    check_blend(&stream.blend)?;
    check_adjust(&stream.color_adj)?;
    check_keying(&stream.keying, caps)?;
    check_tone_map(&stream.tone_map, caps)
}

fn check_surface(surf: &Surface, caps: &Capabilities, side: Side) -> VpeResult<()> {
    let format = surf.format;
    let formats = match side {
        Side::Input => caps.input_formats,
        Side::Output => caps.output_formats,
    };
    if !formats.contains(&format) {
        return Err(VpeError::PixelFormatNotSupported);
    }
    if !caps.swizzle_modes.contains(&surf.swizzle) {
        return Err(VpeError::SwizzleNotSupported);
    }
    match side {
        Side::Input if surf.dcc.enable && !caps.input_dcc => {
            return Err(VpeError::InputDccNotSupported);
        }
        Side::Output if surf.dcc.enable && !caps.output_dcc => {
            return Err(VpeError::OutputDccNotSupported);
        }
        _ => {}
    }

    let two_plane = matches!(surf.address, PlaneAddress::VideoProgressive { .. });
    if two_plane != format.is_yuv420() {
        return Err(VpeError::PlaneAddrNotSupported);
    }
    let align = u64::from(caps.address_alignment.max(1));
    for plane in 0..format.num_planes() {
        let addr = surf
            .plane_address(plane)
            .ok_or(VpeError::PlaneAddrNotSupported)?;
        if addr % align != 0 {
            return Err(VpeError::PlaneAddrNotSupported);
        }
        let pitch = surf.plane_pitch(plane);
        if pitch < surf.plane_extent(plane).width {
            return Err(VpeError::PitchAlignmentNotSupported);
        }
        let pitch_bytes = pitch * format.bytes_per_element(plane);
        if surf.swizzle == SwizzleMode::Linear && pitch_bytes % caps.pitch_alignment.max(1) != 0 {
            return Err(VpeError::PitchAlignmentNotSupported);
        }
    }

    let yuv_encoded = surf.cs.encoding == ColorEncoding::YCbCr;
    if yuv_encoded != format.is_yuv420() {
        return Err(VpeError::ColorSpaceValueNotSupported);
    }
    Ok(())
}

/// `rect` lies inside `bounds` and is at least `min` on each edge.
fn check_rect(rect: Rect, bounds: Rect, min: u32) -> VpeResult<()> {
    if rect.width < min || rect.height < min || !bounds.contains_rect(rect) {
        return Err(VpeError::ViewportSizeNotSupported);
    }
    Ok(())
}

fn check_blend(blend: &BlendInfo) -> VpeResult<()> {
    if blend.global_alpha && !(0.0..=1.0).contains(&blend.global_alpha_value) {
        return Err(VpeError::AlphaBlendingNotSupported);
    }
    Ok(())
}

fn check_adjust(adj: &ColorAdjust) -> VpeResult<()> {
    let ok = (-1.0..=1.0).contains(&adj.brightness)
        && (0.0..=2.0).contains(&adj.contrast)
        && (-180.0..=180.0).contains(&adj.hue)
        && (0.0..=2.0).contains(&adj.saturation);
    if ok {
        Ok(())
    } else {
        Err(VpeError::AdjustmentNotSupported)
    }
}

fn check_keying(key: &KeyingParams, caps: &Capabilities) -> VpeResult<()> {
    if !key.enable_luma_key {
        return Ok(());
    }
    let unit = 0.0..=1.0;
    if !caps.luma_keying
        || !unit.contains(&key.lower_luma_bound)
        || !unit.contains(&key.upper_luma_bound)
        || key.lower_luma_bound > key.upper_luma_bound
    {
        return Err(VpeError::LumaKeyingNotSupported);
    }
    Ok(())
}

fn check_tone_map(tm: &ToneMapParams, caps: &Capabilities) -> VpeResult<()> {
    if tm.enable_3dlut && tm.uid == 0 {
        return Err(VpeError::BadToneMapParams);
    }
    if tm.enable_3dlut && !caps.lut_3d {
        return Err(VpeError::ToneMapNotSupported);
    }
    if tm.lut.as_ref().is_some_and(|lut| lut.len() != 3 * LUT_3D_ENTRIES) {
        return Err(VpeError::BadToneMapParams);
    }
    Ok(())
}

fn check_hdr(hdr: &HdrMetadata) -> VpeResult<()> {
    // min is in 0.0001 nit units
    let min_nits_x10k = u64::from(hdr.min_mastering);
    let max_nits_x10k = u64::from(hdr.max_mastering) * 10_000;
    if hdr.max_mastering == 0 || min_nits_x10k >= max_nits_x10k {
        return Err(VpeError::BadHdrMetadata);
    }
    Ok(())
}

fn check_collaboration(collab: &Collaboration, caps: &Capabilities) -> VpeResult<()> {
    if !caps.collaboration || collab.num_instances == 0 || collab.num_instances > caps.max_collab_instances
    {
        return Err(VpeError::CollaborationNotSupported);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/validate.rs"]
mod tests;
