//! Polyphase scaler coefficients.

use crate::foundation::error::{VpeError, VpeResult};
use crate::model::stream::FilterCoeffs;

/// Phases per filter period.
pub(crate) const NUM_PHASES: u32 = 64;
/// Phases stored in coefficient RAM; the other half is the mirror image.
pub(crate) const STORED_PHASES: usize = NUM_PHASES as usize / 2 + 1;

const UNITY: i32 = 1 << 12;

/// Coefficient RAM selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FilterKind {
    HorzLuma = 0,
    VertLuma = 1,
    HorzChroma = 2,
    VertChroma = 3,
}

/// Tent filter of `taps` taps, `STORED_PHASES * taps` signed 1.12 values, phase-major.
pub(crate) fn default_coeffs(taps: u32) -> Vec<u16> {
    let taps = taps.max(1) as usize;
    let half = (taps as f64 / 2.0).max(1.0);
    let mut out = Vec::with_capacity(STORED_PHASES * taps);
    for phase in 0..STORED_PHASES {
        let frac = phase as f64 / f64::from(NUM_PHASES);
        let weights: Vec<f64> = (0..taps)
            .map(|t| {
                let d = t as f64 - (taps as f64 / 2.0 - 1.0).max(0.0) - frac;
                (1.0 - d.abs() / half).max(0.0)
            })
            .collect();
        let sum: f64 = weights.iter().sum();
        let mut q: Vec<i32> = weights
            .iter()
            .map(|w| (w / sum * f64::from(UNITY)).round() as i32)
            .collect();
        // Keep each phase at exactly unity gain.
        let err = UNITY - q.iter().sum::<i32>();
        if let Some(peak) = (0..taps).max_by(|&a, &b| weights[a].total_cmp(&weights[b])) {
            q[peak] += err;
        }
        out.extend(q.into_iter().map(|c| c as u16));
    }
    out
}

/// Coefficients as written to the RAM data port: two taps per dword, phase-major.
pub(crate) fn pack_coeffs(coeffs: &[u16], taps: u32) -> Vec<u32> {
    let taps = taps.max(1) as usize;
    let mut out = Vec::with_capacity(STORED_PHASES * taps.div_ceil(2));
    for phase in coeffs.chunks(taps).take(STORED_PHASES) {
        for pair in phase.chunks(2) {
            let lo = u32::from(pair[0]);
            let hi = pair.get(1).copied().map_or(0, u32::from);
            out.push(lo | (hi << 16));
        }
    }
    out
}

/// Packed coefficient tables for every direction a stream scales in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScalerFilters {
    pub horz: Vec<u32>,
    pub vert: Vec<u32>,
    pub horz_c: Vec<u32>,
    pub vert_c: Vec<u32>,
}

impl ScalerFilters {
    /// Tables for the given taps; `external` replaces the luma tables when present.
    pub(crate) fn new(
        h_taps: u32,
        v_taps: u32,
        h_taps_c: u32,
        v_taps_c: u32,
        external: Option<&FilterCoeffs>,
    ) -> VpeResult<Self> {
        let table = |taps: u32| {
            if taps > 1 {
                pack_coeffs(&default_coeffs(taps), taps)
            } else {
                Vec::new()
            }
        };
        let (horz, vert) = match external {
            Some(f) => {
                if f.h_taps != h_taps
                    || f.v_taps != v_taps
                    || f.nb_phases != NUM_PHASES
                    || f.horiz.len() != (NUM_PHASES * h_taps) as usize
                    || f.vert.len() != (NUM_PHASES * v_taps) as usize
                {
                    return Err(VpeError::ScalingTapsMismatch);
                }
                (pack_coeffs(&f.horiz, h_taps), pack_coeffs(&f.vert, v_taps))
            }
            None => (table(h_taps), table(v_taps)),
        };
        Ok(Self {
            horz,
            vert,
            horz_c: table(h_taps_c),
            vert_c: table(v_taps_c),
        })
    }

    pub(crate) fn table(&self, kind: FilterKind) -> &[u32] {
        match kind {
            FilterKind::HorzLuma => &self.horz,
            FilterKind::VertLuma => &self.vert,
            FilterKind::HorzChroma => &self.horz_c,
            FilterKind::VertChroma => &self.vert_c,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hw/filter.rs"]
mod tests;
