use super::*;
use crate::foundation::core::Rect;
use crate::model::job::Collaboration;
use crate::model::stream::Stream;
use crate::model::surface::{PixelFormat, Surface};
use crate::plan::command::CmdType;

fn upscale_job() -> BuildParam {
    let stream = Stream::new(
        Surface::graphics(PixelFormat::Argb8888, 0x10_0000, 1920, 1080),
        Rect::new(0, 0, 1920, 1080),
        Rect::new(0, 0, 3840, 2160),
    );
    BuildParam::new(
        vec![stream],
        Surface::graphics(PixelFormat::Argb8888, 0x100_0000, 3840, 2160),
        Rect::new(0, 0, 3840, 2160),
    )
}

fn build(vpe: &mut Vpe, param: &BuildParam, sizes: BufferSizes) -> VpeResult<BufferSizes> {
    let mut cmd = vec![0u8; sizes.cmd_buf_size as usize];
    let mut emb = vec![0u8; sizes.emb_buf_size as usize];
    let mut bufs = Buffers {
        cmd: BufDesc {
            gpu_va: 0x1000,
            cpu: &mut cmd,
            tmz: false,
        },
        emb: BufDesc {
            gpu_va: 0x10_0000,
            cpu: &mut emb,
            tmz: false,
        },
    };
    vpe.build_commands(param, &mut bufs)
}

#[test]
fn check_then_build_fits_the_reported_sizes() {
    let mut vpe = Vpe::new(InitParams::default());
    let param = upscale_job();
    let required = vpe.check_support(&param).unwrap();
    assert_eq!(vpe.commands().len(), 4);
    let used = build(&mut vpe, &param, required).unwrap();
    assert_eq!(used.cmd_buf_size, required.cmd_buf_size);
    assert!(used.emb_buf_size <= required.emb_buf_size);
}

#[test]
fn build_requires_the_checked_job() {
    let mut vpe = Vpe::new(InitParams::default());
    let param = upscale_job();
    assert_eq!(
        build(&mut vpe, &param, BufferSizes::default()),
        Err(VpeError::ParamCheckError)
    );
    let required = vpe.check_support(&param).unwrap();
    let mut other = param.clone();
    other.bg_color.r = 0.5;
    assert_eq!(
        build(&mut vpe, &other, required),
        Err(VpeError::ParamCheckError)
    );
}

#[test]
fn nan_in_an_unused_field_still_matches_the_checked_job() {
    let mut vpe = Vpe::new(InitParams::default());
    let mut param = upscale_job();
    param.streams[0].blend.global_alpha_value = f32::NAN;
    param.streams[0].keying.lower_luma_bound = f32::NAN;
    let required = vpe.check_support(&param).unwrap();
    assert_eq!(vpe.check_support(&param.clone()), Ok(required));
    let used = build(&mut vpe, &param.clone(), required).unwrap();
    assert_eq!(used.cmd_buf_size, required.cmd_buf_size);
}

#[test]
fn signed_zero_is_a_different_job() {
    let mut vpe = Vpe::new(InitParams::default());
    let param = upscale_job();
    let required = vpe.check_support(&param).unwrap();
    let mut other = param.clone();
    other.streams[0].color_adj.brightness = -0.0;
    assert_eq!(
        build(&mut vpe, &other, required),
        Err(VpeError::ParamCheckError)
    );
    assert!(build(&mut vpe, &param, required).is_ok());
}

#[test]
fn failed_check_forgets_the_previous_job() {
    let mut vpe = Vpe::new(InitParams::default());
    let param = upscale_job();
    vpe.check_support(&param).unwrap();
    let mut bad = param.clone();
    bad.streams.clear();
    assert_eq!(vpe.check_support(&bad), Err(VpeError::NumStreamNotSupported));
    assert!(vpe.commands().is_empty());
    assert_eq!(
        build(&mut vpe, &param, BufferSizes::default()),
        Err(VpeError::ParamCheckError)
    );
}

#[test]
fn empty_buffers_return_required_sizes() {
    let mut vpe = Vpe::new(InitParams::default());
    let param = upscale_job();
    let required = vpe.check_support(&param).unwrap();
    assert_eq!(
        build(&mut vpe, &param, BufferSizes::default()),
        Ok(required)
    );
}

#[test]
fn undersized_or_misaligned_buffers_are_rejected() {
    let mut vpe = Vpe::new(InitParams::default());
    let param = upscale_job();
    let required = vpe.check_support(&param).unwrap();
    let short = BufferSizes {
        cmd_buf_size: required.cmd_buf_size - 1,
        ..required
    };
    assert_eq!(
        build(&mut vpe, &param, short),
        Err(VpeError::InvalidBufferSize)
    );

    let mut cmd = vec![0u8; required.cmd_buf_size as usize];
    let mut emb = vec![0u8; required.emb_buf_size as usize];
    let mut bufs = Buffers {
        cmd: BufDesc {
            gpu_va: 0x1002,
            cpu: &mut cmd,
            tmz: false,
        },
        emb: BufDesc {
            gpu_va: 0x10_0000,
            cpu: &mut emb,
            tmz: false,
        },
    };
    assert_eq!(
        vpe.build_commands(&param, &mut bufs),
        Err(VpeError::BufferAlignment)
    );
}

#[test]
fn visual_confirm_appends_bars() {
    let mut vpe = Vpe::new(InitParams {
        debug: DebugOptions {
            visual_confirm: true,
            ..DebugOptions::default()
        },
        ..InitParams::default()
    });
    let param = upscale_job();
    let required = vpe.check_support(&param).unwrap();
    let cmds = vpe.commands();
    // each 3840-wide bar is cut into four 960-wide pieces
    assert_eq!(cmds.len(), 12);
    assert_eq!(cmds[4].cmd_type, CmdType::BackgroundVisualConfirmInput);
    assert_eq!(cmds[11].cmd_type, CmdType::BackgroundVisualConfirmOutput);
    assert_eq!(cmds[11].dst_viewport, Rect::new(2880, 2156, 960, 4));
    build(&mut vpe, &param, required).unwrap();
}

#[test]
fn collaboration_is_rejected_on_vpe10() {
    let mut vpe = Vpe::new(InitParams {
        ip_level: IpLevel::Vpe10,
        ..InitParams::default()
    });
    let mut param = upscale_job();
    param.collaboration = Some(Collaboration { num_instances: 2 });
    assert_eq!(
        vpe.check_support(&param),
        Err(VpeError::CollaborationNotSupported)
    );
}

#[test]
fn tone_map_table_survives_a_new_job() {
    let mut vpe = Vpe::new(InitParams::default());
    let mut param = upscale_job();
    param.streams[0].tone_map.uid = 9;
    param.streams[0].tone_map.enable_3dlut = true;
    vpe.check_support(&param).unwrap();
    param.bg_color.g = 0.25;
    vpe.check_support(&param).unwrap();
    assert_eq!(vpe.streams[0].lut.as_ref().map(|l| l.uid), Some(9));
}

#[test]
fn command_summaries_report_tone_mapping() {
    let mut vpe = Vpe::new(InitParams::default());
    let mut param = upscale_job();
    vpe.check_support(&param).unwrap();
    assert!(vpe.commands().iter().all(|c| !c.tm_enabled));

    param.streams[0].tone_map.uid = 3;
    param.streams[0].tone_map.enable_3dlut = true;
    vpe.check_support(&param).unwrap();
    let cmds = vpe.commands();
    assert_eq!(cmds.len(), 4);
    assert!(cmds.iter().all(|c| c.tm_enabled));
}

#[test]
#[should_panic(expected = "check_support failed")]
fn assert_on_error_panics() {
    let mut vpe = Vpe::new(InitParams {
        debug: DebugOptions {
            assert_on_error: true,
            ..DebugOptions::default()
        },
        ..InitParams::default()
    });
    let mut param = upscale_job();
    param.streams.clear();
    let _ = vpe.check_support(&param);
}

#[test]
fn init_params_deserialize_with_defaults() {
    let p: InitParams = serde_json::from_str(r#"{ "ip_level": "1.0" }"#).unwrap();
    assert_eq!(p.ip_level, IpLevel::Vpe10);
    assert_eq!(p.debug, DebugOptions::default());
    assert_eq!(p.collab_sync_seed, 0);
}

#[test]
fn capabilities_follow_the_ip_level() {
    let v10 = Vpe::new(InitParams {
        ip_level: IpLevel::Vpe10,
        ..InitParams::default()
    });
    assert_eq!(v10.ip_level(), IpLevel::Vpe10);
    assert!(!v10.capabilities().collaboration);

    let v11 = Vpe::new(InitParams::default());
    assert_eq!(v11.ip_level(), IpLevel::Vpe11);
    assert_eq!(v11.capabilities().max_collab_instances, 2);
}
