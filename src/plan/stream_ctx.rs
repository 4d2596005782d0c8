use crate::foundation::core::{Color, Rect};
use crate::foundation::error::VpeResult;
use crate::foundation::fixpt::Fixed31_32;
use crate::foundation::vector::{IdxVec, define_idx};
use crate::hw::color::{self, CscRegs, Lut3d};
use crate::hw::filter::ScalerFilters;
use crate::model::job::{AlphaMode, BuildParam, HdrMetadata};
use crate::model::stream::{ScalingTaps, Stream};
use crate::model::surface::{ColorSpace, Surface};
use crate::plan::command::CmdType;
use crate::writer::config::ConfigBlocks;

define_idx! {
    /// Position of a segment within its stream.
    pub(crate) struct SegIdx;
}

/// Horizontal and vertical values for luma and chroma.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PerDirection {
    pub horz: Fixed31_32,
    pub vert: Fixed31_32,
    pub horz_c: Fixed31_32,
    pub vert_c: Fixed31_32,
}

/// Everything the scaler needs for one command input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScalerData {
    /// Luma (or RGB) source viewport.
    pub src_vp: Rect,
    /// Chroma source viewport; equal to `src_vp` for RGB.
    pub src_vp_c: Rect,
    /// Destination pixels this input produces, in target coordinates.
    pub recout: Rect,
    /// Source pixels per destination pixel.
    pub ratios: PerDirection,
    /// Filter phase of the first output pixel relative to the viewport start.
    pub inits: PerDirection,
    pub taps: ScalingTaps,
}

impl ScalerData {
    /// Input that reads a minimal viewport and produces nothing; background commands use it.
    pub(crate) fn dummy(src_vp: Rect, chroma: bool, at: Rect) -> Self {
        let src_vp_c = if chroma {
            Rect::new(src_vp.x / 2, src_vp.y / 2, src_vp.width.div_ceil(2), src_vp.height.div_ceil(2))
        } else {
            src_vp
        };
        let one = PerDirection {
            horz: Fixed31_32::ONE,
            vert: Fixed31_32::ONE,
            horz_c: Fixed31_32::ONE,
            vert_c: Fixed31_32::ONE,
        };
        Self {
            src_vp,
            src_vp_c,
            recout: Rect::new(at.x, at.y, 0, 0),
            ratios: one,
            inits: one,
            taps: ScalingTaps {
                v_taps: 1,
                h_taps: 1,
                v_taps_c: 1,
                h_taps_c: 1,
            },
        }
    }

    /// Scaler runs in bypass: unity ratios and single taps.
    pub(crate) fn is_bypass(&self) -> bool {
        let t = self.taps;
        t.h_taps == 1 && t.v_taps == 1 && t.h_taps_c <= 1 && t.v_taps_c <= 1
            && self.ratios.horz == Fixed31_32::ONE
            && self.ratios.vert == Fixed31_32::ONE
    }
}

/// One width-bounded slice of a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SegmentContext {
    /// Chunk-descriptor id; counts down from `num_segments - 1`.
    pub cd: u16,
    pub scaler: ScalerData,
}

/// Which cache a recorded block belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ConfigKind {
    StreamShared,
    StreamOp(CmdType),
    OutputShared,
}

define_idx! {
    /// Slot of a record within a [`ConfigCache`].
    pub(crate) struct ConfigIdx;
}

/// Previously written blocks that can be referenced again; `None` once the pipe was dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ConfigRecord {
    pub pipe: u8,
    pub kind: ConfigKind,
    pub blocks: Option<ConfigBlocks>,
}

/// Recorded config blocks keyed by `(pipe, kind)`.
///
/// Slots are appended once per key and emptied rather than removed, so a key keeps its slot
/// until the whole cache is cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ConfigCache {
    records: IdxVec<ConfigIdx, ConfigRecord>,
}

impl ConfigCache {
    fn slot(&self, pipe: u8, kind: ConfigKind) -> Option<ConfigIdx> {
        self.records
            .iter_enumerated()
            .find(|(_, r)| r.pipe == pipe && r.kind == kind)
            .map(|(i, _)| i)
    }

    pub(crate) fn get(&self, pipe: u8, kind: ConfigKind) -> Option<&ConfigBlocks> {
        self.slot(pipe, kind)
            .and_then(|i| self.records[i].blocks.as_ref())
    }

    pub(crate) fn insert(&mut self, pipe: u8, kind: ConfigKind, blocks: ConfigBlocks) -> VpeResult<()> {
        match self.slot(pipe, kind) {
            Some(i) => self.records[i].blocks = Some(blocks),
            None => {
                self.records.push(ConfigRecord {
                    pipe,
                    kind,
                    blocks: Some(blocks),
                })?;
            }
        }
        Ok(())
    }

    /// Forget every record of `pipe`.
    pub(crate) fn clear_pipe(&mut self, pipe: u8) {
        for r in self.records.as_mut_slice().iter_mut().filter(|r| r.pipe == pipe) {
            r.blocks = None;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }

    /// Live records.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.records.iter().filter(|r| r.blocks.is_some()).count()
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> usize {
        self.records.len()
    }
}

/// Color-pipeline state derived once per stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ColorState {
    pub in_csc: Option<CscRegs>,
    pub gamut: Option<CscRegs>,
    pub degamma: u32,
    pub hdr_mult: u32,
}

/// Derived state for one input stream.
#[derive(Clone, Debug)]
pub(crate) struct StreamContext {
    pub stream_idx: u16,
    pub stream: Stream,
    /// Blend with the stream's own alpha channel.
    pub per_pixel_alpha: bool,
    /// Destination rectangle clipped to the target.
    pub dst: Rect,
    /// Source rectangle cropped in proportion to `dst`.
    pub src: Rect,
    /// Resolved taps.
    pub taps: ScalingTaps,
    pub color: ColorState,
    pub lut: Option<Lut3d>,
    pub filters: ScalerFilters,
    pub segments: IdxVec<SegIdx, SegmentContext>,
    pub configs: ConfigCache,
}

impl StreamContext {
    /// Derive the color state; geometry and segments are filled by the planner.
    ///
    /// `cached_lut` is reused when its UID matches the stream's tone-map UID.
    pub(crate) fn new(
        stream_idx: u16,
        stream: &Stream,
        dst_cs: &ColorSpace,
        hdr: Option<&HdrMetadata>,
        cached_lut: Option<Lut3d>,
    ) -> VpeResult<Self> {
        let cs = &stream.surface.cs;
        let color = ColorState {
            in_csc: color::input_csc(cs, &stream.color_adj),
            gamut: color::gamut_remap(cs.primaries, dst_cs.primaries),
            degamma: color::tf_select(cs.tf),
            hdr_mult: color::hdr_multiplier(cs.tf, dst_cs.tf, hdr),
        };
        let lut = if stream.tm_enabled() {
            match cached_lut {
                Some(lut) if lut.uid == stream.tone_map.uid => Some(lut),
                _ => Some(Lut3d::build(&stream.tone_map)?),
            }
        } else {
            None
        };
        let per_pixel_alpha = stream.blend.blending && stream.surface.format.has_alpha();
        Ok(Self {
            stream_idx,
            stream: stream.clone(),
            per_pixel_alpha,
            dst: stream.scaling.dst_rect,
            src: stream.scaling.src_rect,
            taps: stream.scaling.taps,
            color,
            lut,
            filters: ScalerFilters::default(),
            segments: IdxVec::new(),
            configs: ConfigCache::default(),
        })
    }

    pub(crate) fn tm_enabled(&self) -> bool {
        self.lut.is_some()
    }
}

/// Destination-side state shared by every command of a job.
#[derive(Clone, Debug)]
pub(crate) struct OutputContext {
    pub surface: Surface,
    pub target: Rect,
    pub bg_color: Color,
    pub alpha_mode: AlphaMode,
    pub configs: ConfigCache,
}

impl OutputContext {
    pub(crate) fn new(param: &BuildParam) -> Self {
        Self {
            surface: param.dst_surface.clone(),
            target: param.target_rect,
            bg_color: param.bg_color,
            alpha_mode: param.alpha_mode,
            configs: ConfigCache::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/stream_ctx.rs"]
mod tests;
