//! The engine instance and its public entry points.

use crate::compile::compiler::{CompileJob, CompileOptions, compile};
use crate::compile::estimate::estimate;
use crate::foundation::error::{VpeError, VpeResult};
use crate::hw::caps::Capabilities;
use crate::hw::color::Lut3d;
use crate::hw::{IpLevel, Resource};
use crate::model::job::BuildParam;
use crate::plan::command::{CommandList, CommandSummary, build_command_list};
use crate::plan::segment::{plan_gaps, plan_stream};
use crate::plan::stream_ctx::{OutputContext, StreamContext};
use crate::writer::buffer::{BufDesc, BufRegion, BufferSizes, Buffers};

use super::validate::validate;

/// Development switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Always rewrite shared config blocks instead of referencing earlier ones.
    pub disable_reuse_bit: bool,
    /// Append colored bars marking input and output pixel formats.
    pub visual_confirm: bool,
    /// Panic on the first failing entry point.
    pub assert_on_error: bool,
}

/// Parameters fixed for the lifetime of an instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InitParams {
    /// Hardware generation to target.
    pub ip_level: IpLevel,
    pub debug: DebugOptions,
    /// First collaboration sync index.
    pub collab_sync_seed: u32,
}

/// The job accepted by the last successful `check_support`.
#[derive(Debug)]
struct Checked {
    param: BuildParam,
    output: OutputContext,
    commands: CommandList,
    required: BufferSizes,
}

/// One engine instance.
///
/// Jobs go through two phases: [`Vpe::check_support`] validates and plans a job and reports
/// the buffer sizes it needs, then [`Vpe::build_commands`] compiles the identical job into
/// caller memory. An instance is single threaded; use one per thread.
#[derive(Debug)]
pub struct Vpe {
    resource: Resource,
    debug: DebugOptions,
    /// Persist across jobs so tone-map tables survive parameter changes.
    streams: Vec<StreamContext>,
    checked: Option<Checked>,
    sync_index: u32,
}

impl Vpe {
    pub fn new(params: InitParams) -> Self {
        tracing::debug!(ip_level = ?params.ip_level, "creating instance");
        Self {
            resource: Resource::new(params.ip_level),
            debug: params.debug,
            streams: Vec::new(),
            checked: None,
            sync_index: params.collab_sync_seed,
        }
    }

    pub fn ip_level(&self) -> IpLevel {
        self.resource.level()
    }

    pub fn capabilities(&self) -> &Capabilities {
        self.resource.hw().caps()
    }

    /// Validate and plan `param`, returning the buffer sizes `build_commands` needs.
    ///
    /// A failed check clears any previously accepted job.
    #[tracing::instrument(skip_all, fields(streams = param.streams.len()))]
    pub fn check_support(&mut self, param: &BuildParam) -> VpeResult<BufferSizes> {
        let result = self.check_inner(param);
        self.report("check_support", result)
    }

    /// Compile the job last accepted by `check_support` into `bufs`.
    ///
    /// With either CPU slice empty nothing is written and the required sizes are returned.
    /// Otherwise the bytes actually used are returned.
    #[tracing::instrument(skip_all, fields(streams = param.streams.len()))]
    pub fn build_commands(
        &mut self,
        param: &BuildParam,
        bufs: &mut Buffers<'_>,
    ) -> VpeResult<BufferSizes> {
        let result = self.build_inner(param, bufs);
        self.report("build_commands", result)
    }

    /// Fill the start of `buf` with `num_dwords` no-op commands.
    pub fn build_noops(&self, buf: &mut BufDesc<'_>, num_dwords: u64) -> VpeResult<()> {
        let mut region = BufRegion::new(buf);
        let result = self.resource.hw().build_noops(&mut region, num_dwords);
        self.report("build_noops", result)
    }

    /// Summary of the planned command list of the accepted job.
    pub fn commands(&self) -> Vec<CommandSummary> {
        self.checked
            .as_ref()
            .map(|c| c.commands.iter().map(CommandSummary::from).collect())
            .unwrap_or_default()
    }

    fn check_inner(&mut self, param: &BuildParam) -> VpeResult<BufferSizes> {
        if let Some(checked) = self.checked.as_ref().filter(|c| c.param == *param) {
            return Ok(checked.required);
        }
        self.checked = None;
        let hw = self.resource.hw();
        let caps = hw.caps();
        validate(param, caps)?;

        let mut luts: Vec<Option<Lut3d>> = std::mem::take(&mut self.streams)
            .into_iter()
            .map(|ctx| ctx.lut)
            .collect();
        let mut streams = Vec::new();
        streams
            .try_reserve_exact(param.streams.len())
            .map_err(|_| VpeError::NoMemory)?;
        let collab_instances = param.collab_instances();
        for (i, stream) in param.streams.iter().enumerate() {
            let cached = luts.get_mut(i).and_then(Option::take);
            let idx = u16::try_from(i).map_err(|_| VpeError::NumStreamNotSupported)?;
            let mut ctx = StreamContext::new(
                idx,
                stream,
                &param.dst_surface.cs,
                param.hdr_metadata.as_ref(),
                cached,
            )?;
            plan_stream(&mut ctx, caps, param.target_rect, collab_instances)?;
            streams.push(ctx);
        }

        let gaps = plan_gaps(&streams, param.target_rect, caps.max_viewport_width)?;
        let mut output = OutputContext::new(param);
        let collaboration = param.collaboration.is_some();
        let commands = build_command_list(
            &streams,
            &output,
            &gaps,
            caps.min_viewport_size,
            caps.max_viewport_width,
            self.debug.visual_confirm,
            collaboration,
        )?;
        let required = estimate(
            hw,
            CompileJob {
                streams: &mut streams,
                output: &mut output,
                commands: &commands,
            },
            collaboration,
            self.sync_index,
        )?;
        tracing::debug!(
            commands = commands.len(),
            cmd_buf = required.cmd_buf_size,
            emb_buf = required.emb_buf_size,
            "job accepted"
        );

        self.streams = streams;
        self.checked = Some(Checked {
            param: param.clone(),
            output,
            commands,
            required,
        });
        Ok(required)
    }

    fn build_inner(&mut self, param: &BuildParam, bufs: &mut Buffers<'_>) -> VpeResult<BufferSizes> {
        let checked = match self.checked.as_mut() {
            Some(c) if c.param == *param => c,
            _ => return Err(VpeError::ParamCheckError),
        };
        if bufs.cmd.cpu.is_empty() || bufs.emb.cpu.is_empty() {
            return Ok(checked.required);
        }
        if (bufs.cmd.cpu.len() as u64) < checked.required.cmd_buf_size
            || (bufs.emb.cpu.len() as u64) < checked.required.emb_buf_size
        {
            return Err(VpeError::InvalidBufferSize);
        }
        // the low two bits of every address carry the tmz and reuse flags
        if bufs.cmd.gpu_va & 3 != 0 || bufs.emb.gpu_va & 3 != 0 {
            return Err(VpeError::BufferAlignment);
        }

        let mut cmd = BufRegion::new(&mut bufs.cmd);
        let mut emb = BufRegion::new(&mut bufs.emb);
        compile(
            self.resource.hw(),
            CompileJob {
                streams: &mut self.streams,
                output: &mut checked.output,
                commands: &checked.commands,
            },
            &mut cmd,
            &mut emb,
            CompileOptions {
                reuse: !self.debug.disable_reuse_bit,
                collaboration: param.collaboration.is_some(),
            },
            &mut self.sync_index,
        )?;
        let used = BufferSizes {
            cmd_buf_size: cmd.used(),
            emb_buf_size: emb.used(),
        };
        tracing::debug!(
            cmd_buf = used.cmd_buf_size,
            emb_buf = used.emb_buf_size,
            "commands built"
        );
        Ok(used)
    }

    fn report<T>(&self, op: &'static str, result: VpeResult<T>) -> VpeResult<T> {
        if let Err(err) = &result {
            tracing::warn!(op, error = %err, "entry point failed");
            if self.debug.assert_on_error {
                panic!("{op} failed: {err}");
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/instance.rs"]
mod tests;
