//! Splits each stream into width-bounded segments and finds the background gaps between them.

use smallvec::SmallVec;

use crate::foundation::core::Rect;
use crate::foundation::error::{VpeError, VpeResult};
use crate::foundation::fixpt::Fixed31_32;
use crate::foundation::math::{
    ceil_div, ceil_div_signed, chroma_taps, effective_segment_width, optimal_taps, ratio_1000,
    round_up_to_multiple, scaler_ratio,
};
use crate::foundation::vector::Idx;
use crate::hw::caps::Capabilities;
use crate::hw::filter::ScalerFilters;
use crate::model::stream::{ScalingTaps, Stream};
use crate::plan::stream_ctx::{PerDirection, ScalerData, SegIdx, SegmentContext, StreamContext};

/// Clip, validate and segment one stream against `target`.
pub(crate) fn plan_stream(
    ctx: &mut StreamContext,
    caps: &Capabilities,
    target: Rect,
    collab_instances: u32,
) -> VpeResult<()> {
    let dst = ctx
        .stream
        .scaling
        .dst_rect
        .intersect(target)
        .ok_or(VpeError::ViewportSizeNotSupported)?;
    let src = crop_source(&ctx.stream, dst);
    let min = caps.min_viewport_size;
    if src.width < min || src.height < min || dst.width < min || dst.height < min {
        return Err(VpeError::ViewportSizeNotSupported);
    }
    check_ratio(src.width, dst.width, caps)?;
    check_ratio(src.height, dst.height, caps)?;

    let taps = resolve_taps(&ctx.stream, src, dst, caps)?;
    let filters = ScalerFilters::new(
        taps.h_taps,
        taps.v_taps,
        taps.h_taps_c,
        taps.v_taps_c,
        ctx.stream.scaling.filter.as_ref(),
    )?;

    let n = num_segments(src, dst, &taps, caps, collab_instances)?;
    let yuv = ctx.stream.surface.format.is_yuv420();
    let mirror = ctx.stream.horizontal_mirror;

    let ratios = PerDirection {
        horz: scaler_ratio(src.width, dst.width),
        vert: scaler_ratio(src.height, dst.height),
        horz_c: scaler_ratio(src.width, dst.width).div_int(if yuv { 2 } else { 1 }),
        vert_c: scaler_ratio(src.height, dst.height).div_int(if yuv { 2 } else { 1 }),
    };
    // chroma extent of the cropped source
    let (cx0, cx1, cy0, cy1) = if yuv {
        (
            i64::from(src.x) / 2,
            ceil_div_signed(src.right(), 2).max(i64::from(src.x) / 2 + 1),
            i64::from(src.y) / 2,
            ceil_div_signed(src.bottom(), 2).max(i64::from(src.y) / 2 + 1),
        )
    } else {
        (i64::from(src.x), src.right(), i64::from(src.y), src.bottom())
    };
    let v_init = first_phase(ratios.vert, taps.v_taps);
    let v_init_c = first_phase(ratios.vert_c, taps.v_taps_c);

    ctx.segments.clear();
    ctx.segments.reserve(n as usize)?;
    let w = i64::from(dst.width);
    let n64 = i64::from(n);
    for s in 0..n64 {
        let d0 = w * s / n64;
        let d1 = w * (s + 1) / n64;
        let slot = if mirror { n64 - 1 - s } else { s };
        let col0 = i64::from(dst.x) + w * slot / n64;
        let col1 = i64::from(dst.x) + w * (slot + 1) / n64;

        let luma = slice_viewport(i64::from(src.x), src.right(), ratios.horz, d0, d1, taps.h_taps);
        let chroma = slice_viewport(cx0, cx1, ratios.horz_c, d0, d1, taps.h_taps_c);
        let src_vp = Rect::new(luma.x0 as i32, src.y, (luma.x1 - luma.x0) as u32, src.height);
        let src_vp_c = Rect::new(
            chroma.x0 as i32,
            cy0 as i32,
            (chroma.x1 - chroma.x0) as u32,
            (cy1 - cy0) as u32,
        );
        if src_vp.width > caps.max_viewport_width {
            return Err(VpeError::SegmentWidthError);
        }
        ctx.segments.push(SegmentContext {
            cd: (n64 - 1 - s) as u16,
            scaler: ScalerData {
                src_vp,
                src_vp_c,
                recout: dst.with_columns(col0, col1),
                ratios,
                inits: PerDirection {
                    horz: luma.init,
                    vert: v_init,
                    horz_c: chroma.init,
                    vert_c: v_init_c,
                },
                taps,
            },
        })?;
    }

    tracing::debug!(
        stream = ctx.stream_idx,
        segments = n,
        h_taps = taps.h_taps,
        v_taps = taps.v_taps,
        "stream planned"
    );
    ctx.dst = dst;
    ctx.src = src;
    ctx.taps = taps;
    ctx.filters = filters;
    Ok(())
}

/// Source rectangle matching the clipped destination, honoring mirroring.
fn crop_source(stream: &Stream, clipped: Rect) -> Rect {
    let src = stream.scaling.src_rect;
    let dst = stream.scaling.dst_rect;
    let (x0, x1) = crop_axis(
        i64::from(src.x),
        i64::from(src.width),
        i64::from(clipped.x) - i64::from(dst.x),
        clipped.right() - i64::from(dst.x),
        i64::from(dst.width),
        stream.horizontal_mirror,
    );
    let (y0, y1) = crop_axis(
        i64::from(src.y),
        i64::from(src.height),
        i64::from(clipped.y) - i64::from(dst.y),
        clipped.bottom() - i64::from(dst.y),
        i64::from(dst.height),
        stream.vertical_mirror,
    );
    Rect::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32)
}

/// Source range `[s0, s1)` for the destination range `[lo, hi)` relative to the destination
/// origin.
fn crop_axis(src0: i64, src_len: i64, lo: i64, hi: i64, dst_len: i64, mirror: bool) -> (i64, i64) {
    let (lo, hi) = if mirror { (dst_len - hi, dst_len - lo) } else { (lo, hi) };
    let s0 = src0 + lo * src_len / dst_len;
    let s1 = src0 + ceil_div_signed(hi * src_len, dst_len);
    (s0, s1.max(s0 + 1))
}

fn check_ratio(src: u32, dst: u32, caps: &Capabilities) -> VpeResult<()> {
    let r = ratio_1000(dst, src);
    if r > u64::from(caps.max_upscale_factor) || r < u64::from(caps.max_downscale_factor) {
        return Err(VpeError::ScalingRatioNotSupported);
    }
    Ok(())
}

/// Requested taps where given, the external filter's next, the optimal value otherwise.
fn resolve_taps(stream: &Stream, src: Rect, dst: Rect, caps: &Capabilities) -> VpeResult<ScalingTaps> {
    let req = stream.scaling.taps;
    let ext = stream.scaling.filter.as_ref();
    let pick = |req: u32, ext: Option<u32>, s: u32, d: u32| {
        if req != 0 {
            req
        } else if let Some(t) = ext {
            t
        } else {
            optimal_taps(s, d, caps.max_taps)
        }
    };
    let h_taps = pick(req.h_taps, ext.map(|f| f.h_taps), src.width, dst.width);
    let v_taps = pick(req.v_taps, ext.map(|f| f.v_taps), src.height, dst.height);
    let (h_taps_c, v_taps_c) = if stream.surface.format.is_yuv420() {
        (
            if req.h_taps_c != 0 { req.h_taps_c } else { chroma_taps(h_taps) },
            if req.v_taps_c != 0 { req.v_taps_c } else { chroma_taps(v_taps) },
        )
    } else {
        (1, 1)
    };
    let taps = ScalingTaps {
        v_taps,
        h_taps,
        v_taps_c,
        h_taps_c,
    };
    let valid = |t: u32| t == 1 || (t % 2 == 0 && t <= caps.max_taps);
    if ![h_taps, v_taps, h_taps_c, v_taps_c].into_iter().all(valid) {
        return Err(VpeError::NotSupported);
    }
    Ok(taps)
}

/// Segments needed so every destination slice fits the line buffer and every source
/// viewport fits the hardware viewport, rounded up to the collaboration instance count.
fn num_segments(
    src: Rect,
    dst: Rect,
    taps: &ScalingTaps,
    caps: &Capabilities,
    collab_instances: u32,
) -> VpeResult<u32> {
    let dst_budget = effective_segment_width(caps.max_viewport_width, caps.line_buffer_size, taps.v_taps);
    let src_budget = caps.max_viewport_width.saturating_sub(taps.h_taps + 1);
    if dst_budget == 0 || src_budget == 0 {
        return Err(VpeError::SegmentWidthError);
    }
    let n = ceil_div(u64::from(dst.width), u64::from(dst_budget))
        .max(ceil_div(u64::from(src.width), u64::from(src_budget)));
    let n = round_up_to_multiple(n, u64::from(collab_instances.max(1)));
    if n > u64::from(caps.max_segments()) || u64::from(dst.width) / n < u64::from(caps.min_viewport_size) {
        return Err(VpeError::SegmentWidthError);
    }
    Ok(n as u32)
}

/// Filter phase of the first output pixel for a viewport starting at the slice start.
fn first_phase(ratio: Fixed31_32, taps: u32) -> Fixed31_32 {
    (ratio + Fixed31_32::from_int(i64::from(taps) + 1)).div_int(2)
}

struct Slice {
    x0: i64,
    x1: i64,
    init: Fixed31_32,
}

/// Source columns feeding destination columns `[d0, d1)`, with filter context, clamped to
/// `[s0, s1)`.
fn slice_viewport(s0: i64, s1: i64, ratio: Fixed31_32, d0: i64, d1: i64, taps: u32) -> Slice {
    let half = i64::from(taps / 2);
    let center = (ratio - Fixed31_32::ONE).div_int(2);
    let start = Fixed31_32::from_int(s0) + ratio.mul_int(d0);
    let first = start + center;
    let last = Fixed31_32::from_int(s0) + ratio.mul_int(d1 - 1) + center;
    let x0 = (first.floor() - (half - 1).max(0)).clamp(s0, s1 - 1);
    let x1 = (last.floor() + 1 + half).clamp(x0 + 1, s1);
    Slice {
        x0,
        x1,
        init: first_phase(ratio, taps) + (start - Fixed31_32::from_int(x0)),
    }
}

/// Segment that may absorb part of a background gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Absorb {
    pub stream: usize,
    pub seg: SegIdx,
    /// Columns added to the segment's output viewport.
    pub width: u32,
}

/// Background coverage of the target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct GapPlan {
    /// Leading gap folded into the leftmost segment.
    pub left: Option<Absorb>,
    /// Trailing gap folded into the rightmost segment.
    pub right: Option<Absorb>,
    /// Remaining gaps, each at most `max_viewport_width` wide, full target height.
    pub background: SmallVec<[Rect; 4]>,
}

/// Column ranges of the target no stream covers.
///
/// Streams must not share columns; every compositing command owns full-height columns.
pub(crate) fn plan_gaps(streams: &[StreamContext], target: Rect, max_vp: u32) -> VpeResult<GapPlan> {
    let mut cols: SmallVec<[(i64, i64, usize); 4]> = streams
        .iter()
        .enumerate()
        .map(|(i, s)| (i64::from(s.dst.x), s.dst.right(), i))
        .collect();
    cols.sort_unstable();
    for pair in cols.windows(2) {
        if pair[1].0 < pair[0].1 {
            return Err(VpeError::StreamsOverlap);
        }
    }
    let mut plan = GapPlan::default();
    let (Some(&first), Some(&last)) = (cols.first(), cols.last()) else {
        split_gap(&mut plan.background, target, i64::from(target.x), target.right(), max_vp);
        return Ok(plan);
    };

    // leading
    let lead = first.0 - i64::from(target.x);
    let mut lead_rest = lead;
    if lead > 0 {
        let (seg, width) = edge_segment(&streams[first.2], true);
        let take = lead.min(i64::from(max_vp.saturating_sub(width)));
        if take > 0 {
            plan.left = Some(Absorb {
                stream: first.2,
                seg,
                width: take as u32,
            });
        }
        lead_rest = lead - take;
    }
    split_gap(&mut plan.background, target, i64::from(target.x), i64::from(target.x) + lead_rest, max_vp);

    for pair in cols.windows(2) {
        split_gap(&mut plan.background, target, pair[0].1, pair[1].0, max_vp);
    }

    // trailing
    let trail = target.right() - last.1;
    let mut trail_rest = trail;
    if trail > 0 {
        let (seg, width) = edge_segment(&streams[last.2], false);
        let mut budget = i64::from(max_vp.saturating_sub(width));
        if let Some(l) = plan.left.filter(|l| l.stream == last.2 && l.seg == seg) {
            budget -= i64::from(l.width);
        }
        let take = trail.min(budget.max(0));
        if take > 0 {
            plan.right = Some(Absorb {
                stream: last.2,
                seg,
                width: take as u32,
            });
        }
        trail_rest = trail - take;
    }
    split_gap(&mut plan.background, target, target.right() - trail_rest, target.right(), max_vp);
    Ok(plan)
}

/// Leftmost or rightmost segment of a stream and its width.
fn edge_segment(ctx: &StreamContext, leftmost: bool) -> (SegIdx, u32) {
    let pick = ctx.segments.iter_enumerated().min_by_key(|(_, s)| {
        let x = i64::from(s.scaler.recout.x);
        if leftmost { x } else { -x }
    });
    pick.map_or((SegIdx::new(0), 0), |(i, s)| (i, s.scaler.recout.width))
}

/// Append `[x0, x1)` as even pieces no wider than `max_vp`.
fn split_gap(out: &mut SmallVec<[Rect; 4]>, target: Rect, x0: i64, x1: i64, max_vp: u32) {
    let len = x1 - x0;
    if len <= 0 {
        return;
    }
    let pieces = ceil_div_signed(len, i64::from(max_vp.max(1)));
    for p in 0..pieces {
        let a = x0 + len * p / pieces;
        let b = x0 + len * (p + 1) / pieces;
        out.push(target.with_columns(a, b));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/segment.rs"]
mod tests;
