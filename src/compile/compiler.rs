//! Turns the command list into VPE descriptors and embedded payloads.

use crate::foundation::error::{VpeError, VpeResult};
use crate::hw::{BackendArgs, BackendPart, FrontendArgs, FrontendPart, HwGeneration};
use crate::model::surface::Surface;
use crate::plan::command::{CommandInfo, CommandList};
use crate::plan::stream_ctx::{ConfigKind, OutputContext, StreamContext};
use crate::writer::buffer::BufRegion;
use crate::writer::config::{ConfigBlocks, ConfigWriter, ShareClass};
use crate::writer::desc::VpeDescWriter;
use crate::writer::plane::{PlaneDescWriter, PlaneEntry};

use super::pipe::PipeTable;

/// Knobs for one compilation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CompileOptions {
    /// Reference earlier identical config blocks instead of rewriting them.
    pub reuse: bool,
    /// Bracket the job with collaboration sync descriptors.
    pub collaboration: bool,
}

/// Mutable per-job state the compiler walks.
pub(crate) struct CompileJob<'a> {
    pub streams: &'a mut [StreamContext],
    pub output: &'a mut OutputContext,
    pub commands: &'a CommandList,
}

/// Compile every command of `job` into `cmd` (descriptors) and `emb` (payloads).
///
/// `sync_index` is the next collaboration sync index and is advanced per sync emitted.
pub(crate) fn compile(
    hw: &dyn HwGeneration,
    job: CompileJob<'_>,
    cmd: &mut BufRegion<'_>,
    emb: &mut BufRegion<'_>,
    opts: CompileOptions,
    sync_index: &mut u32,
) -> VpeResult<()> {
    let CompileJob {
        streams,
        output,
        commands,
    } = job;
    for ctx in streams.iter_mut() {
        ctx.configs.clear();
    }
    output.configs.clear();

    let list = commands.as_slice();
    if list.is_empty() {
        return Ok(());
    }
    let emb_tmz = emb.tmz();
    let mut pipes = PipeTable::new(hw.caps().num_pipes);
    let mut cw = ConfigWriter::new(emb);

    if opts.collaboration {
        fit_sync_range(list, sync_index);
        sync(hw, cmd, sync_index)?;
    }
    for (i, info) in list.iter().enumerate() {
        let remaining = &list[i..];
        pipes.reclaim(|s| {
            remaining
                .iter()
                .any(|c| c.inputs.iter().any(|inp| inp.stream_idx == s))
        });
        compile_command(
            hw,
            streams,
            output,
            &mut pipes,
            &mut cw,
            cmd,
            info,
            opts.reuse,
            emb_tmz,
        )?;
        if opts.collaboration && info.insert_end_csync {
            sync(hw, cmd, sync_index)?;
        }
    }
    if opts.collaboration {
        sync(hw, cmd, sync_index)?;
    }
    Ok(())
}

/// Restart the sync index at 0 when this build's syncs would run past `u32::MAX`, so indices
/// increase strictly within one build.
fn fit_sync_range(list: &[CommandInfo], sync_index: &mut u32) {
    // leading and trailing syncs plus one per epoch boundary
    let syncs = 2 + list.iter().filter(|c| c.insert_end_csync).count() as u64;
    if u64::from(*sync_index) + syncs > u64::from(u32::MAX) + 1 {
        tracing::debug!(seed = *sync_index, syncs, "sync index restarted");
        *sync_index = 0;
    }
}

fn sync(hw: &dyn HwGeneration, cmd: &mut BufRegion<'_>, index: &mut u32) -> VpeResult<()> {
    hw.write_collab_sync(cmd, *index)?;
    *index = index.wrapping_add(1);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn compile_command(
    hw: &dyn HwGeneration,
    streams: &mut [StreamContext],
    output: &mut OutputContext,
    pipes: &mut PipeTable,
    cw: &mut ConfigWriter<'_, '_>,
    cmd: &mut BufRegion<'_>,
    info: &CommandInfo,
    reuse: bool,
    emb_tmz: bool,
) -> VpeResult<()> {
    let mut desc = VpeDescWriter::init(cmd, hw.chunk_desc_field(info.cd))?;
    let plane_addr = write_plane_desc(cw.region(), info, streams, &output.surface)?;
    desc.add_plane_desc(cmd, plane_addr, emb_tmz)?;

    for input in &info.inputs {
        let idx = usize::from(input.stream_idx);
        let grant = pipes.find_owner_or_reuse(input.stream_idx);
        let pipe = grant.pipe;
        if let Some(ctx) = grant
            .evicted
            .and_then(|e| streams.get_mut(usize::from(e)))
        {
            ctx.configs.clear_pipe(pipe);
        }
        let ctx = streams.get_mut(idx).ok_or(VpeError::Error)?;
        if !grant.owned {
            ctx.configs.clear_pipe(pipe);
        }
        let ctx = &*ctx;
        let can_reuse = reuse && grant.owned;
        tracing::trace!(stream = input.stream_idx, pipe, reuse = can_reuse, "input bound");
        let op_kind = ConfigKind::StreamOp(info.cmd_type);
        let args = FrontendArgs {
            ctx,
            input,
            cmd_type: info.cmd_type,
            out_vp: info.dst_viewport,
            pipe,
        };
        let mut out = RefSink {
            cw: &mut *cw,
            cmd: &mut *cmd,
            desc: &mut desc,
            tmz: emb_tmz,
        };
        let shared = out.emit(
            ctx.configs
                .get(pipe, ConfigKind::StreamShared)
                .filter(|_| can_reuse),
            ShareClass::StreamShared,
            pipe,
            |cw| hw.program_frontend(cw, &args, FrontendPart::StreamShared),
        )?;
        let op = out.emit(
            ctx.configs.get(pipe, op_kind).filter(|_| can_reuse),
            ShareClass::StreamOpShared,
            pipe,
            |cw| hw.program_frontend(cw, &args, FrontendPart::StreamOpShared),
        )?;
        out.emit(None, ShareClass::Unshared, pipe, |cw| {
            hw.program_frontend(cw, &args, FrontendPart::Segment)
        })?;

        if reuse {
            let configs = &mut streams[idx].configs;
            if let Some(blocks) = shared {
                configs.insert(pipe, ConfigKind::StreamShared, blocks)?;
            }
            if let Some(blocks) = op {
                configs.insert(pipe, op_kind, blocks)?;
            }
        }
    }

    let visual_confirm = info.cmd_type.is_visual_confirm();
    let record_output = reuse && !visual_confirm;
    let fresh = {
        let out_ctx = &*output;
        let args = BackendArgs {
            output: out_ctx,
            bg_color: info.vc_color.unwrap_or(out_ctx.bg_color),
            out_vp: info.dst_viewport,
        };
        let mut out = RefSink {
            cw: &mut *cw,
            cmd: &mut *cmd,
            desc: &mut desc,
            tmz: emb_tmz,
        };
        let class = if visual_confirm {
            ShareClass::Unshared
        } else {
            ShareClass::OutputShared
        };
        let fresh = out.emit(
            out_ctx
                .configs
                .get(0, ConfigKind::OutputShared)
                .filter(|_| record_output),
            class,
            0,
            |cw| hw.program_backend(cw, &args, BackendPart::OutputShared),
        )?;
        out.emit(None, ShareClass::Unshared, 0, |cw| {
            hw.program_backend(cw, &args, BackendPart::Command)
        })?;
        fresh
    };
    if let Some(blocks) = fresh.filter(|_| record_output) {
        output.configs.insert(0, ConfigKind::OutputShared, blocks)?;
    }
    tracing::trace!(
        cd = info.cd,
        cmd_type = ?info.cmd_type,
        configs = desc.num_config_desc(),
        "compiled command"
    );
    desc.complete(cmd)
}

/// Destination for config references of the command being built.
struct RefSink<'s, 'r, 'b, 'c> {
    cw: &'s mut ConfigWriter<'r, 'b>,
    cmd: &'s mut BufRegion<'c>,
    desc: &'s mut VpeDescWriter,
    tmz: bool,
}

impl<'r, 'b> RefSink<'_, 'r, 'b, '_> {
    /// Reference `cached` with the reuse bit, or program fresh blocks and reference those.
    ///
    /// Returns the fresh blocks so the caller can record them.
    fn emit(
        &mut self,
        cached: Option<&ConfigBlocks>,
        class: ShareClass,
        pipe: u8,
        program: impl FnOnce(&mut ConfigWriter<'r, 'b>) -> VpeResult<()>,
    ) -> VpeResult<Option<ConfigBlocks>> {
        if let Some(blocks) = cached {
            for b in blocks {
                self.desc
                    .add_config_desc(&mut *self.cmd, b.addr, true, self.tmz)?;
            }
            return Ok(None);
        }
        self.cw.begin(class, pipe);
        program(&mut *self.cw)?;
        let blocks = self.cw.finish();
        for b in &blocks {
            self.desc
                .add_config_desc(&mut *self.cmd, b.addr, false, self.tmz)?;
        }
        Ok(Some(blocks))
    }
}

fn write_plane_desc(
    region: &mut BufRegion<'_>,
    info: &CommandInfo,
    streams: &[StreamContext],
    dst: &Surface,
) -> VpeResult<u64> {
    let input = info.inputs.first().ok_or(VpeError::Error)?;
    let ctx = streams
        .get(usize::from(input.stream_idx))
        .ok_or(VpeError::Error)?;
    let stream = &ctx.stream;
    let surf = &stream.surface;
    let num_src = surf.format.num_planes();

    let mut w = PlaneDescWriter::init(region, num_src, 1)?;
    for plane in 0..num_src {
        let viewport = if plane == 0 {
            input.scaler.src_vp
        } else {
            input.scaler.src_vp_c
        };
        w.add_source(
            region,
            &PlaneEntry {
                addr: surf
                    .plane_address(plane)
                    .ok_or(VpeError::PlaneAddrNotSupported)?,
                tmz: surf.tmz,
                swizzle: surf.swizzle.code(),
                rotation: stream.rotation.code(),
                h_mirror: stream.horizontal_mirror,
                v_mirror: stream.vertical_mirror,
                bytes_per_element: surf.format.bytes_per_element(plane),
                pitch: surf.plane_pitch(plane),
                viewport,
            },
        )?;
    }
    w.add_destination(
        region,
        &PlaneEntry {
            addr: dst
                .plane_address(0)
                .ok_or(VpeError::PlaneAddrNotSupported)?,
            tmz: dst.tmz,
            swizzle: dst.swizzle.code(),
            rotation: 0,
            h_mirror: false,
            v_mirror: false,
            bytes_per_element: dst.format.bytes_per_element(0),
            pitch: dst.plane_pitch(0),
            viewport: info.dst_viewport,
        },
    )?;
    w.complete()
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
