use crate::foundation::core::Rect;
use crate::model::surface::Surface;

/// Filter taps per direction. Zero requests the hardware's optimal value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScalingTaps {
    /// Vertical luma taps.
    pub v_taps: u32,
    /// Horizontal luma taps.
    pub h_taps: u32,
    /// Vertical chroma taps.
    pub v_taps_c: u32,
    /// Horizontal chroma taps.
    pub h_taps_c: u32,
}

impl ScalingTaps {
    /// Return `true` when every direction is left to the hardware.
    pub fn is_auto(&self) -> bool {
        *self == Self::default()
    }
}

/// Caller-supplied polyphase filter.
///
/// Each table holds `nb_phases * taps` signed 1.12 coefficients, phase-major.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterCoeffs {
    /// Horizontal taps the tables were built for.
    pub h_taps: u32,
    /// Vertical taps the tables were built for.
    pub v_taps: u32,
    /// Number of phases per table.
    pub nb_phases: u32,
    /// Horizontal coefficients.
    pub horiz: Vec<u16>,
    /// Vertical coefficients.
    pub vert: Vec<u16>,
}

/// Source crop, destination placement and filter selection.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScalingInfo {
    /// Region of the source surface to read.
    pub src_rect: Rect,
    /// Region of the destination surface to write.
    pub dst_rect: Rect,
    /// Requested taps.
    #[serde(default)]
    pub taps: ScalingTaps,
    /// Optional external polyphase filter.
    #[serde(default)]
    pub filter: Option<FilterCoeffs>,
}

/// How a stream blends onto the background.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BlendInfo {
    /// Use the stream's per-pixel alpha.
    pub blending: bool,
    /// Source color is already multiplied by alpha.
    pub pre_multiplied_alpha: bool,
    /// Apply `global_alpha_value` on top.
    pub global_alpha: bool,
    /// Plane-wide alpha in `[0, 1]`.
    pub global_alpha_value: f32,
}

impl PartialEq for BlendInfo {
    fn eq(&self, other: &Self) -> bool {
        (self.blending, self.pre_multiplied_alpha, self.global_alpha)
            == (other.blending, other.pre_multiplied_alpha, other.global_alpha)
            && self.global_alpha_value.to_bits() == other.global_alpha_value.to_bits()
    }
}

impl Eq for BlendInfo {}

impl Default for BlendInfo {
    fn default() -> Self {
        Self {
            blending: false,
            pre_multiplied_alpha: false,
            global_alpha: false,
            global_alpha_value: 1.0,
        }
    }
}

/// Procamp-style color adjustment.
///
/// Equality compares bit patterns, like every float in a job.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorAdjust {
    /// Offset added to luma, `[-1, 1]`.
    pub brightness: f32,
    /// Luma gain, `[0, 2]`.
    pub contrast: f32,
    /// Chroma rotation in degrees, `[-180, 180]`.
    pub hue: f32,
    /// Chroma gain, `[0, 2]`.
    pub saturation: f32,
}

impl Default for ColorAdjust {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            hue: 0.0,
            saturation: 1.0,
        }
    }
}

impl ColorAdjust {
    /// Return `true` when applying the adjustment is a no-op.
    pub fn is_identity(&self) -> bool {
        self.brightness == 0.0 && self.contrast == 1.0 && self.hue == 0.0 && self.saturation == 1.0
    }

    fn bits(&self) -> [u32; 4] {
        [self.brightness, self.contrast, self.hue, self.saturation].map(f32::to_bits)
    }
}

impl PartialEq for ColorAdjust {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for ColorAdjust {}

/// Tone-mapping request. The 3D LUT content is identified by `uid`; a UID of 0 means no tone
/// mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToneMapParams {
    /// Identity of the LUT content; equal UIDs promise equal tables.
    pub uid: u64,
    /// Route the stream through the 3D LUT.
    pub enable_3dlut: bool,
    /// Optional 17x17x17 RGB table (12-bit values, red-fastest). Identity when absent.
    pub lut: Option<Vec<u16>>,
}

/// Luma keyer.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct KeyingParams {
    /// Key out pixels whose luma lies within the bounds.
    pub enable_luma_key: bool,
    /// Lower bound in `[0, 1]`.
    pub lower_luma_bound: f32,
    /// Upper bound in `[0, 1]`.
    pub upper_luma_bound: f32,
}

impl PartialEq for KeyingParams {
    fn eq(&self, other: &Self) -> bool {
        self.enable_luma_key == other.enable_luma_key
            && self.lower_luma_bound.to_bits() == other.lower_luma_bound.to_bits()
            && self.upper_luma_bound.to_bits() == other.upper_luma_bound.to_bits()
    }
}

impl Eq for KeyingParams {}

impl Default for KeyingParams {
    fn default() -> Self {
        Self {
            enable_luma_key: false,
            lower_luma_bound: 0.0,
            upper_luma_bound: 1.0,
        }
    }
}

/// Clockwise rotation applied while reading the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Hardware encoding.
    pub fn code(self) -> u32 {
        match self {
            Self::R0 => 0,
            Self::R90 => 1,
            Self::R180 => 2,
            Self::R270 => 3,
        }
    }
}

/// One input of a job.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Stream {
    /// Source surface.
    pub surface: Surface,
    /// Crop, placement and filter.
    pub scaling: ScalingInfo,
    /// Blending.
    #[serde(default)]
    pub blend: BlendInfo,
    /// Procamp.
    #[serde(default)]
    pub color_adj: ColorAdjust,
    /// Tone mapping.
    #[serde(default)]
    pub tone_map: ToneMapParams,
    /// Luma keying.
    #[serde(default)]
    pub keying: KeyingParams,
    /// Rotation.
    #[serde(default)]
    pub rotation: Rotation,
    /// Mirror left-right.
    #[serde(default)]
    pub horizontal_mirror: bool,
    /// Mirror top-bottom.
    #[serde(default)]
    pub vertical_mirror: bool,
}

impl Stream {
    /// Stream reading `src_rect` of `surface` into `dst_rect` with every option at its default.
    pub fn new(surface: Surface, src_rect: Rect, dst_rect: Rect) -> Self {
        Self {
            surface,
            scaling: ScalingInfo {
                src_rect,
                dst_rect,
                taps: ScalingTaps::default(),
                filter: None,
            },
            blend: BlendInfo::default(),
            color_adj: ColorAdjust::default(),
            tone_map: ToneMapParams::default(),
            keying: KeyingParams::default(),
            rotation: Rotation::R0,
            horizontal_mirror: false,
            vertical_mirror: false,
        }
    }

    /// Tone mapping is active: a non-zero UID routed through the 3D LUT.
    pub fn tm_enabled(&self) -> bool {
        self.tone_map.uid != 0 && self.tone_map.enable_3dlut
    }
}
