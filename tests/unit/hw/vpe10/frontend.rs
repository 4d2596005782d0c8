use super::*;
use crate::hw::caps::Capabilities;
use crate::model::stream::{Stream, ToneMapParams};
use crate::model::surface::{ColorSpace, PixelFormat, Surface};
use crate::plan::segment::plan_stream;
use crate::writer::buffer::{BufDesc, BufRegion};
use crate::writer::config::ShareClass;
use crate::test_decode::{RegState, replay_blocks};

fn planned(format: PixelFormat, src: Rect, dst: Rect) -> StreamContext {
    let surface = if format.is_yuv420() {
        Surface::video(format, 0x10_0000, 0x20_0000, 1920, 1080)
    } else {
        Surface::graphics(format, 0x10_0000, 1920, 1080)
    };
    let stream = Stream::new(surface, src, dst);
    let mut ctx = StreamContext::new(0, &stream, &ColorSpace::default(), None, None).unwrap();
    plan_stream(&mut ctx, &Capabilities::vpe11(), dst, 1).unwrap();
    ctx
}

fn run(f: impl FnOnce(&mut ConfigWriter<'_, '_>)) -> RegState {
    let mut mem = vec![0u8; 1 << 20];
    let mut desc = BufDesc {
        gpu_va: 0,
        cpu: &mut mem,
        tmz: false,
    };
    let mut region = BufRegion::new(&mut desc);
    let mut cw = ConfigWriter::new(&mut region);
    cw.begin(ShareClass::Unshared, 0);
    f(&mut cw);
    cw.finish();
    drop(cw);
    let used = region.used() as usize;
    drop(region);
    replay_blocks(&mem, used)
}

#[test]
fn video_stream_enables_csc_and_range_expansion() {
    let r = Rect::new(0, 0, 1920, 1080);
    let ctx = planned(PixelFormat::Nv12, r, r);
    let RegState { regs, ports } = run(|cw| program_stream_shared(cw, &ctx).unwrap());
    assert_eq!(regs[&VPCNVC_SURFACE_PIXEL_FORMAT], 65);
    assert_eq!(regs[&VPCNVC_PRE_CSC_MODE], 1);
    assert_eq!(regs[&VPCNVC_FORMAT_CONTROL] & (1 << 4), 1 << 4);
    assert!(regs.contains_key(&(VPCNVC_PRE_CSC_C11_C12 + 20)));
    assert_eq!(regs[&VPCM_3DLUT_MODE], 0);
    assert!(ports.is_empty());
}

#[test]
fn tone_mapping_uploads_shaper_and_cube() {
    let r = Rect::new(0, 0, 1920, 1080);
    let mut ctx = planned(PixelFormat::Argb8888, r, r);
    ctx.stream.tone_map = ToneMapParams {
        uid: 1,
        enable_3dlut: true,
        lut: None,
    };
    ctx.lut = Some(crate::hw::color::Lut3d::build(&ctx.stream.tone_map).unwrap());
    let RegState { regs, ports } = run(|cw| program_stream_shared(cw, &ctx).unwrap());
    assert_eq!(regs[&VPCM_3DLUT_MODE], 1);
    assert_eq!(ports[&VPCM_3DLUT_DATA], 2 * 17 * 17 * 17);
    assert_eq!(ports[&VPCM_SHAPER_LUT_DATA], 33);
    assert_eq!(regs[&VPCM_CONTROL] & 2, 0);
}

#[test]
fn scaling_compositing_loads_coefficients() {
    let ctx = planned(
        PixelFormat::Argb8888,
        Rect::new(0, 0, 960, 540),
        Rect::new(0, 0, 1920, 1080),
    );
    let RegState { regs, ports } = run(|cw| program_stream_op(cw, &ctx, CmdType::Compositing, 0).unwrap());
    assert_eq!(regs[&VPDSCL_MODE], DSCL_MODE_RGB);
    assert_eq!(regs[&VPDSCL_TAP_CONTROL], 3 | (3 << 4));
    // two luma tables of 33 phases, two taps per dword
    assert_eq!(ports[&VPDSCL_COEF_RAM_TAP_DATA], 2 * 33 * 2);
    assert_eq!(regs[&VPMPCC_TOP_SEL], 0);
    assert_eq!(regs[&VPMPCC_CONTROL] >> 16, 0xFF);
}

#[test]
fn background_leaves_the_scaler_in_bypass() {
    let ctx = planned(
        PixelFormat::Argb8888,
        Rect::new(0, 0, 960, 540),
        Rect::new(0, 0, 1920, 1080),
    );
    let RegState { regs, ports } = run(|cw| program_stream_op(cw, &ctx, CmdType::Background, 0).unwrap());
    assert_eq!(regs[&VPDSCL_MODE], DSCL_MODE_BYPASS);
    assert!(ports.is_empty());
    assert_eq!(regs[&VPMPCC_TOP_SEL], MPCC_SEL_DISCONNECTED);
}

#[test]
fn segment_registers_place_the_recout_inside_the_viewport() {
    let ctx = planned(
        PixelFormat::Argb8888,
        Rect::new(0, 0, 960, 540),
        Rect::new(0, 0, 1920, 1080),
    );
    let seg = ctx.segments.iter().next().unwrap();
    let input = CmdInput {
        stream_idx: 0,
        scaler: seg.scaler,
    };
    let out = Rect::new(0, 0, seg.scaler.recout.width + 40, 1080);
    let RegState { regs, .. } = run(|cw| program_segment(cw, &input, out).unwrap());
    assert_eq!(regs[&VPDSCL_EXT_OVERSCAN_LEFT_RIGHT], 40);
    assert_eq!(regs[&VPDSCL_RECOUT_SIZE], seg.scaler.recout.width | (1080 << 16));
    // 0.5 in u3.19, shifted into place
    assert_eq!(regs[&VPDSCL_HORZ_FILTER_SCALE_RATIO], (1 << 18) << 5);
}
