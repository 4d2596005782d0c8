//! Linearizes segments and background gaps into the ordered command list.

use smallvec::{SmallVec, smallvec};

use crate::foundation::core::{Color, Rect};
use crate::foundation::error::VpeResult;
use crate::foundation::math::ceil_div_signed;
use crate::foundation::vector::{IdxVec, define_idx};
use crate::model::surface::FormatClass;
use crate::plan::segment::GapPlan;
use crate::plan::stream_ctx::{OutputContext, ScalerData, StreamContext};

/// Rows covered by a visual-confirm bar.
const VISUAL_CONFIRM_ROWS: u32 = 4;

/// Kind of hardware operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum CmdType {
    /// Scale and blend one stream segment over the background.
    Compositing,
    /// Fill target columns no stream covers.
    Background,
    /// Debug bar marking an input's pixel format.
    BackgroundVisualConfirmInput,
    /// Debug bar marking the output's pixel format.
    BackgroundVisualConfirmOutput,
}

impl CmdType {
    pub(crate) fn is_visual_confirm(self) -> bool {
        matches!(
            self,
            Self::BackgroundVisualConfirmInput | Self::BackgroundVisualConfirmOutput
        )
    }
}

/// One input of a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CmdInput {
    pub stream_idx: u16,
    pub scaler: ScalerData,
}

/// One hardware-level operation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CommandInfo {
    pub cmd_type: CmdType,
    /// Chunk-descriptor id.
    pub cd: u16,
    pub inputs: SmallVec<[CmdInput; 1]>,
    /// Destination area written, in target coordinates.
    pub dst_viewport: Rect,
    pub tm_enabled: bool,
    /// Close a collaboration epoch after this command.
    pub insert_end_csync: bool,
    /// Background override for visual-confirm bars.
    pub vc_color: Option<Color>,
}

define_idx! {
    pub(crate) struct CmdIdx;
}

pub(crate) type CommandList = IdxVec<CmdIdx, CommandInfo>;

/// Public view of one planned command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CommandSummary {
    pub cmd_type: CmdType,
    /// Chunk-descriptor id.
    pub cd: u16,
    /// Contributing stream; background commands read stream 0 as a dummy input.
    pub stream: u16,
    /// Destination area written.
    pub dst_viewport: Rect,
    /// The contributing stream goes through the 3D LUT.
    pub tm_enabled: bool,
}

impl From<&CommandInfo> for CommandSummary {
    fn from(cmd: &CommandInfo) -> Self {
        Self {
            cmd_type: cmd.cmd_type,
            cd: cmd.cd,
            stream: cmd.inputs.first().map_or(0, |i| i.stream_idx),
            dst_viewport: cmd.dst_viewport,
            tm_enabled: cmd.tm_enabled,
        }
    }
}

/// Bar color identifying a pixel-format class.
pub(crate) fn visual_confirm_color(class: FormatClass) -> Color {
    match class {
        FormatClass::Rgb8 => Color::new(1.0, 0.0, 0.0, 1.0),
        FormatClass::Rgb10 => Color::new(1.0, 0.5, 0.0, 1.0),
        FormatClass::RgbFp16 => Color::new(1.0, 0.0, 1.0, 1.0),
        FormatClass::Yuv8 => Color::new(0.0, 1.0, 0.0, 1.0),
        FormatClass::Yuv10 => Color::new(0.0, 0.0, 1.0, 1.0),
    }
}

/// Build the command list: background fills, then every stream's segments in descending
/// chunk id, then the optional visual-confirm bars.
pub(crate) fn build_command_list(
    streams: &[StreamContext],
    output: &OutputContext,
    gaps: &GapPlan,
    min_viewport: u32,
    max_viewport: u32,
    visual_confirm: bool,
    collaboration: bool,
) -> VpeResult<CommandList> {
    let mut cmds = CommandList::new();
    let target = output.target;
    let Some(dummy_src) = streams.first() else {
        return Ok(cmds);
    };
    let dummy = |at: Rect| {
        let vp = Rect::new(dummy_src.src.x, dummy_src.src.y, min_viewport, min_viewport);
        CmdInput {
            stream_idx: 0,
            scaler: ScalerData::dummy(vp, dummy_src.stream.surface.format.is_yuv420(), at),
        }
    };
    let mut runs_end: SmallVec<[usize; 8]> = SmallVec::new();

    for gap in &gaps.background {
        cmds.push(CommandInfo {
            cmd_type: CmdType::Background,
            cd: 0,
            inputs: smallvec![dummy(*gap)],
            dst_viewport: *gap,
            tm_enabled: dummy_src.tm_enabled(),
            insert_end_csync: false,
            vc_color: None,
        })?;
    }
    runs_end.push(cmds.len());

    for (i, ctx) in streams.iter().enumerate() {
        // segments are stored in descending chunk id
        for (seg_idx, seg) in ctx.segments.iter_enumerated() {
            let mut x0 = i64::from(seg.scaler.recout.x);
            let mut x1 = seg.scaler.recout.right();
            if let Some(a) = gaps.left.filter(|a| a.stream == i && a.seg == seg_idx) {
                x0 -= i64::from(a.width);
            }
            if let Some(a) = gaps.right.filter(|a| a.stream == i && a.seg == seg_idx) {
                x1 += i64::from(a.width);
            }
            cmds.push(CommandInfo {
                cmd_type: CmdType::Compositing,
                cd: seg.cd,
                inputs: smallvec![CmdInput {
                    stream_idx: ctx.stream_idx,
                    scaler: seg.scaler,
                }],
                dst_viewport: target.with_columns(x0, x1),
                tm_enabled: ctx.tm_enabled(),
                insert_end_csync: false,
                vc_color: None,
            })?;
        }
        runs_end.push(cmds.len());
    }

    if visual_confirm {
        let rows = VISUAL_CONFIRM_ROWS.min(target.height);
        let band = |x0: i64, x1: i64| {
            Rect::new(0, (target.bottom() - i64::from(rows)) as i32, 0, rows).with_columns(x0, x1)
        };
        for ctx in streams {
            let color = visual_confirm_color(ctx.stream.surface.format.class());
            push_bars(
                &mut cmds,
                CmdType::BackgroundVisualConfirmInput,
                band(i64::from(ctx.dst.x), ctx.dst.right()),
                max_viewport,
                color,
                &dummy,
            )?;
        }
        let color = visual_confirm_color(output.surface.format.class());
        push_bars(
            &mut cmds,
            CmdType::BackgroundVisualConfirmOutput,
            band(i64::from(target.x), target.right()),
            max_viewport,
            color,
            &dummy,
        )?;
        runs_end.push(cmds.len());
    }

    if collaboration {
        let total = cmds.len();
        for end in runs_end.into_iter().filter(|&e| e > 0 && e < total) {
            if let Some(cmd) = cmds.as_mut_slice().get_mut(end - 1) {
                cmd.insert_end_csync = true;
            }
        }
    }
    Ok(cmds)
}

fn push_bars(
    cmds: &mut CommandList,
    cmd_type: CmdType,
    bar: Rect,
    max_viewport: u32,
    color: Color,
    dummy: &dyn Fn(Rect) -> CmdInput,
) -> VpeResult<()> {
    let len = i64::from(bar.width);
    if len == 0 || bar.height == 0 {
        return Ok(());
    }
    let pieces = ceil_div_signed(len, i64::from(max_viewport.max(1)));
    for p in 0..pieces {
        let piece = bar.with_columns(
            i64::from(bar.x) + len * p / pieces,
            i64::from(bar.x) + len * (p + 1) / pieces,
        );
        cmds.push(CommandInfo {
            cmd_type,
            cd: 0,
            inputs: smallvec![dummy(piece)],
            dst_viewport: piece,
            tm_enabled: false,
            insert_end_csync: false,
            vc_color: Some(color),
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/plan/command.rs"]
mod tests;
