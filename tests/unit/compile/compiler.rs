use super::*;
use crate::foundation::core::Rect;
use crate::hw::{IpLevel, Resource};
use crate::model::job::BuildParam;
use crate::model::stream::Stream;
use crate::model::surface::{ColorSpace, PixelFormat};
use crate::plan::command::{CmdType, build_command_list};
use crate::plan::segment::{plan_gaps, plan_stream};
use crate::test_decode::{Record, records};
use crate::writer::buffer::BufDesc;

struct Job {
    streams: Vec<StreamContext>,
    output: OutputContext,
    commands: CommandList,
}

fn job(hw: &dyn HwGeneration, src: Rect, dst: Rect, target: Rect) -> Job {
    let caps = hw.caps();
    let stream = Stream::new(
        Surface::graphics(PixelFormat::Argb8888, 0x10_0000, 1920, 1080),
        src,
        dst,
    );
    let param = BuildParam::new(
        vec![stream.clone()],
        Surface::graphics(PixelFormat::Argb8888, 0x80_0000, 3840, 2160),
        target,
    );
    let mut ctx = StreamContext::new(0, &stream, &ColorSpace::default(), None, None).unwrap();
    plan_stream(&mut ctx, caps, target, 1).unwrap();
    let streams = vec![ctx];
    let gaps = plan_gaps(&streams, target, caps.max_viewport_width).unwrap();
    let output = OutputContext::new(&param);
    let commands = build_command_list(
        &streams,
        &output,
        &gaps,
        caps.min_viewport_size,
        caps.max_viewport_width,
        false,
        false,
    )
    .unwrap();
    Job {
        streams,
        output,
        commands,
    }
}

fn build(hw: &dyn HwGeneration, j: &mut Job, opts: CompileOptions) -> (Vec<u8>, usize, usize) {
    let mut cmd_mem = vec![0u8; 1 << 16];
    let mut emb_mem = vec![0u8; 1 << 20];
    let mut cmd_desc = BufDesc {
        gpu_va: 0x1000,
        cpu: &mut cmd_mem,
        tmz: false,
    };
    let mut emb_desc = BufDesc {
        gpu_va: 0x10_0000,
        cpu: &mut emb_mem,
        tmz: false,
    };
    let mut cmd = BufRegion::new(&mut cmd_desc);
    let mut emb = BufRegion::new(&mut emb_desc);
    let mut index = 7;
    compile(
        hw,
        CompileJob {
            streams: &mut j.streams,
            output: &mut j.output,
            commands: &j.commands,
        },
        &mut cmd,
        &mut emb,
        opts,
        &mut index,
    )
    .unwrap();
    let (cmd_used, emb_used) = (cmd.used() as usize, emb.used() as usize);
    drop(cmd);
    (cmd_mem, cmd_used, emb_used)
}

fn vpe_descs(recs: &[Record]) -> Vec<&crate::test_decode::VpeDesc> {
    recs.iter()
        .filter_map(|r| match r {
            Record::Vpe(d) => Some(d),
            _ => None,
        })
        .collect()
}

#[test]
fn one_descriptor_per_command_in_list_order() {
    let res = Resource::new(IpLevel::Vpe11);
    let full = Rect::new(0, 0, 3840, 2160);
    let mut j = job(res.hw(), Rect::new(0, 0, 1920, 1080), full, full);
    let opts = CompileOptions {
        reuse: true,
        collaboration: false,
    };
    let (mem, used, _) = build(res.hw(), &mut j, opts);
    let recs = records(&mem, used);
    let descs = vpe_descs(&recs);
    assert_eq!(descs.len(), 4);
    let cds: Vec<u32> = descs.iter().map(|d| d.cd).collect();
    assert_eq!(cds, [3, 2, 1, 0]);
    assert!(descs.iter().all(|d| d.plane_addr >= 0x10_0000));
}

#[test]
fn later_commands_reference_shared_blocks() {
    let res = Resource::new(IpLevel::Vpe11);
    let full = Rect::new(0, 0, 3840, 2160);
    let mut j = job(res.hw(), Rect::new(0, 0, 1920, 1080), full, full);
    let opts = CompileOptions {
        reuse: true,
        collaboration: false,
    };
    let (mem, used, emb_used) = build(res.hw(), &mut j, opts);
    let recs = records(&mem, used);
    let descs = vpe_descs(&recs);
    assert!(descs[0].configs.iter().all(|(_, reuse)| !reuse));
    assert!(descs[1].configs.iter().any(|(_, reuse)| *reuse));
    let reused: Vec<u64> = descs[1]
        .configs
        .iter()
        .filter(|(_, r)| *r)
        .map(|(a, _)| *a)
        .collect();
    assert!(reused.iter().all(|a| descs[0].configs.iter().any(|(b, _)| a == b)));

    let mut j = job(res.hw(), Rect::new(0, 0, 1920, 1080), full, full);
    let opts = CompileOptions {
        reuse: false,
        collaboration: false,
    };
    let (_, used_plain, emb_plain) = build(res.hw(), &mut j, opts);
    assert_eq!(used, used_plain);
    assert!(emb_used < emb_plain);
}

#[test]
fn collaboration_brackets_the_job_with_syncs() {
    let res = Resource::new(IpLevel::Vpe11);
    let full = Rect::new(0, 0, 3840, 2160);
    let mut j = job(res.hw(), Rect::new(0, 0, 1920, 1080), full, full);
    let opts = CompileOptions {
        reuse: true,
        collaboration: true,
    };
    let (mem, used, _) = build(res.hw(), &mut j, opts);
    let recs = records(&mem, used);
    assert_eq!(recs.first(), Some(&Record::Sync(7)));
    assert_eq!(recs.last(), Some(&Record::Sync(8)));
}

#[test]
fn background_gap_becomes_its_own_descriptor() {
    let res = Resource::new(IpLevel::Vpe10);
    let target = Rect::new(0, 0, 3840, 2160);
    let mut j = job(
        res.hw(),
        Rect::new(0, 0, 1920, 1080),
        Rect::new(1920, 0, 1920, 2160),
        target,
    );
    assert!(j.commands.iter().any(|c| c.cmd_type == CmdType::Background));
    let opts = CompileOptions {
        reuse: true,
        collaboration: false,
    };
    let (mem, used, _) = build(res.hw(), &mut j, opts);
    let recs = records(&mem, used);
    assert_eq!(vpe_descs(&recs).len(), j.commands.len());
}
