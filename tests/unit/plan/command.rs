use super::*;
use crate::hw::caps::Capabilities;
use crate::model::job::BuildParam;
use crate::model::stream::Stream;
use crate::model::surface::{ColorSpace, PixelFormat, Surface};
use crate::plan::segment::{plan_gaps, plan_stream};

fn plan(streams: &[(Rect, Rect)], target: Rect, vc: bool, collab: bool) -> CommandList {
    let caps = Capabilities::vpe11();
    let dst = Surface::graphics(PixelFormat::Argb8888, 0x100_0000, 3840, 2160);
    let src_surface = Surface::graphics(PixelFormat::Nv12, 0x10_0000, 1920, 1080);
    let list: Vec<Stream> = streams
        .iter()
        .map(|(s, d)| Stream::new(src_surface.clone(), *s, *d))
        .collect();
    let param = BuildParam::new(list, dst, target);
    let mut ctxs = Vec::new();
    for (i, s) in param.streams.iter().enumerate() {
        let mut ctx = StreamContext::new(i as u16, s, &ColorSpace::default(), None, None).unwrap();
        plan_stream(&mut ctx, &caps, target, if collab { 2 } else { 1 }).unwrap();
        ctxs.push(ctx);
    }
    let gaps = plan_gaps(&ctxs, target, caps.max_viewport_width).unwrap();
    let output = OutputContext::new(&param);
    build_command_list(&ctxs, &output, &gaps, 2, 1024, vc, collab).unwrap()
}

#[test]
fn full_coverage_has_no_background() {
    let full = Rect::new(0, 0, 3840, 2160);
    let cmds = plan(&[(Rect::new(0, 0, 1920, 1080), full)], full, false, false);
    assert_eq!(cmds.len(), 4);
    assert!(cmds.iter().all(|c| c.cmd_type == CmdType::Compositing));
    let cds: Vec<u16> = cmds.iter().map(|c| c.cd).collect();
    assert_eq!(cds, vec![3, 2, 1, 0]);
    assert!(cmds.iter().all(|c| c.dst_viewport.height == 2160));
    assert!(cmds.iter().all(|c| !c.insert_end_csync));
}

#[test]
fn background_commands_come_first() {
    let target = Rect::new(0, 0, 3840, 1080);
    let cmds = plan(
        &[(Rect::new(0, 0, 960, 540), Rect::new(0, 0, 960, 540))],
        target,
        false,
        false,
    );
    let kinds: Vec<CmdType> = cmds.iter().map(|c| c.cmd_type).collect();
    assert_eq!(
        kinds,
        vec![
            CmdType::Background,
            CmdType::Background,
            CmdType::Background,
            CmdType::Compositing
        ]
    );
    let comp = cmds.last().unwrap();
    // 64 columns of the trailing gap are absorbed, the other 2816 split in three
    assert_eq!(comp.dst_viewport, Rect::new(0, 0, 1024, 1080));
    assert_eq!(comp.inputs[0].scaler.recout, Rect::new(0, 0, 960, 540));
    let bg = &cmds.as_slice()[0];
    assert_eq!(bg.cd, 0);
    assert_eq!(bg.inputs[0].stream_idx, 0);
    assert_eq!(bg.inputs[0].scaler.src_vp.width, 2);
    assert!(bg.inputs[0].scaler.recout.is_empty());
    let covered: u32 = cmds.iter().map(|c| c.dst_viewport.width).sum();
    assert_eq!(covered, 3840);
}

#[test]
fn visual_confirm_adds_bars_at_the_bottom() {
    let full = Rect::new(0, 0, 1920, 1080);
    let cmds = plan(&[(full, full)], full, true, false);
    let bars: Vec<&CommandInfo> = cmds.iter().filter(|c| c.cmd_type.is_visual_confirm()).collect();
    // one input bar and one output bar, each split at the viewport limit
    assert_eq!(bars.len(), 4);
    assert!(bars.iter().all(|b| b.dst_viewport.y == 1076 && b.dst_viewport.height == 4));
    assert_eq!(bars[0].vc_color, Some(visual_confirm_color(FormatClass::Yuv8)));
    assert_eq!(bars[3].vc_color, Some(visual_confirm_color(FormatClass::Rgb8)));
}

#[test]
fn collaboration_flags_the_end_of_each_run_but_the_last() {
    let target = Rect::new(0, 0, 3840, 1080);
    let cmds = plan(
        &[
            (Rect::new(0, 0, 960, 540), Rect::new(0, 0, 1500, 1080)),
            (Rect::new(0, 0, 960, 540), Rect::new(2000, 0, 1840, 1080)),
        ],
        target,
        false,
        true,
    );
    let flags: Vec<(CmdType, bool)> = cmds.iter().map(|c| (c.cmd_type, c.insert_end_csync)).collect();
    assert_eq!(
        flags,
        vec![
            (CmdType::Background, true),
            (CmdType::Compositing, false),
            (CmdType::Compositing, true),
            (CmdType::Compositing, false),
            (CmdType::Compositing, false),
        ]
    );
}
