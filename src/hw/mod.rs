//! Hardware generations: capability tables and register programming.

pub mod caps;
pub(crate) mod color;
pub(crate) mod filter;
pub(crate) mod regs;
pub(crate) mod vpe10;
pub(crate) mod vpe11;

use crate::foundation::core::{Color, Rect};
use crate::foundation::error::VpeResult;
use crate::hw::caps::Capabilities;
use crate::plan::command::{CmdInput, CmdType};
use crate::plan::stream_ctx::{OutputContext, StreamContext};
use crate::writer::buffer::BufRegion;
use crate::writer::cmd::write_noops;
use crate::writer::config::ConfigWriter;

/// IP version of the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum IpLevel {
    #[serde(rename = "1.0")]
    Vpe10,
    #[default]
    #[serde(rename = "1.1")]
    Vpe11,
}

/// Frontend register groups, one per reuse class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrontendPart {
    StreamShared,
    StreamOpShared,
    Segment,
}

/// Backend register groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BackendPart {
    OutputShared,
    Command,
}

pub(crate) struct FrontendArgs<'a> {
    pub ctx: &'a StreamContext,
    pub input: &'a CmdInput,
    pub cmd_type: CmdType,
    pub out_vp: Rect,
    pub pipe: u8,
}

pub(crate) struct BackendArgs<'a> {
    pub output: &'a OutputContext,
    pub bg_color: Color,
    pub out_vp: Rect,
}

/// Generation-specific behavior. The provided methods are the 1.0 behavior later generations
/// inherit.
pub(crate) trait HwGeneration {
    fn caps(&self) -> &Capabilities;

    /// Chunk id placed into the VPE descriptor header.
    fn chunk_desc_field(&self, cd: u16) -> u32 {
        let bits = self.caps().chunk_desc_bits;
        (u32::from(cd) & ((1 << bits) - 1)) << 16
    }

    fn program_frontend(
        &self,
        cw: &mut ConfigWriter<'_, '_>,
        args: &FrontendArgs<'_>,
        part: FrontendPart,
    ) -> VpeResult<()> {
        match part {
            FrontendPart::StreamShared => vpe10::frontend::program_stream_shared(cw, args.ctx),
            FrontendPart::StreamOpShared => {
                vpe10::frontend::program_stream_op(cw, args.ctx, args.cmd_type, args.pipe)
            }
            FrontendPart::Segment => vpe10::frontend::program_segment(cw, args.input, args.out_vp),
        }
    }

    fn program_backend(
        &self,
        cw: &mut ConfigWriter<'_, '_>,
        args: &BackendArgs<'_>,
        part: BackendPart,
    ) -> VpeResult<()> {
        match part {
            BackendPart::OutputShared => {
                vpe10::backend::program_output_shared(cw, args.output, args.bg_color)
            }
            BackendPart::Command => vpe10::backend::program_command(cw, args.out_vp),
        }
    }

    fn write_collab_sync(&self, region: &mut BufRegion<'_>, index: u32) -> VpeResult<()>;

    fn build_noops(&self, region: &mut BufRegion<'_>, num_dwords: u64) -> VpeResult<()> {
        write_noops(region, num_dwords)
    }
}

/// The closed set of supported generations.
#[derive(Debug)]
pub(crate) enum Resource {
    Vpe10(vpe10::Vpe10),
    Vpe11(vpe11::Vpe11),
}

impl Resource {
    pub(crate) fn new(level: IpLevel) -> Self {
        match level {
            IpLevel::Vpe10 => Self::Vpe10(vpe10::Vpe10::new()),
            IpLevel::Vpe11 => Self::Vpe11(vpe11::Vpe11::new()),
        }
    }

    pub(crate) fn hw(&self) -> &dyn HwGeneration {
        match self {
            Self::Vpe10(hw) => hw,
            Self::Vpe11(hw) => hw,
        }
    }

    pub(crate) fn level(&self) -> IpLevel {
        match self {
            Self::Vpe10(_) => IpLevel::Vpe10,
            Self::Vpe11(_) => IpLevel::Vpe11,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hw/mod.rs"]
mod tests;
