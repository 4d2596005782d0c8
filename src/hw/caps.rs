use crate::model::surface::{PixelFormat, SwizzleMode};

/// What one hardware generation can do. Pure data; one table per generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub max_input_streams: u32,
    pub num_pipes: u32,
    /// Widest source or destination viewport one pipe handles.
    pub max_viewport_width: u32,
    /// Smallest viewport edge.
    pub min_viewport_size: u32,
    /// Line buffer size in pixels; bounds segment width by vertical taps.
    pub line_buffer_size: u32,
    /// Largest `dst / src` in thousandths.
    pub max_upscale_factor: u32,
    /// Smallest `dst / src` in thousandths.
    pub max_downscale_factor: u32,
    pub max_taps: u32,
    /// Linear pitch alignment in bytes.
    pub pitch_alignment: u32,
    /// Plane base alignment in bytes.
    pub address_alignment: u32,
    /// Width of the chunk-descriptor field of the VPE descriptor.
    pub chunk_desc_bits: u32,
    pub collaboration: bool,
    pub max_collab_instances: u32,
    pub rotation: bool,
    pub h_mirror: bool,
    pub v_mirror: bool,
    pub input_dcc: bool,
    pub output_dcc: bool,
    pub luma_keying: bool,
    pub lut_3d: bool,
    /// Edge of the 3D LUT cube.
    pub lut_3d_size: u32,
    pub input_formats: &'static [PixelFormat],
    pub output_formats: &'static [PixelFormat],
    pub swizzle_modes: &'static [SwizzleMode],
}

const INPUT_FORMATS: &[PixelFormat] = &[
    PixelFormat::Argb8888,
    PixelFormat::Abgr8888,
    PixelFormat::Xrgb8888,
    PixelFormat::Xbgr8888,
    PixelFormat::Argb2101010,
    PixelFormat::Abgr2101010,
    PixelFormat::Nv12,
    PixelFormat::Nv21,
    PixelFormat::P010,
];

const OUTPUT_FORMATS: &[PixelFormat] = &[
    PixelFormat::Argb8888,
    PixelFormat::Abgr8888,
    PixelFormat::Xrgb8888,
    PixelFormat::Xbgr8888,
    PixelFormat::Argb2101010,
    PixelFormat::Abgr2101010,
    PixelFormat::Argb16161616F,
];

const SWIZZLE_MODES: &[SwizzleMode] = &[
    SwizzleMode::Linear,
    SwizzleMode::Sw4kbS,
    SwizzleMode::Sw4kbD,
    SwizzleMode::Sw64kbS,
    SwizzleMode::Sw64kbD,
    SwizzleMode::Sw64kbSX,
    SwizzleMode::Sw64kbDX,
];

impl Capabilities {
    pub fn vpe10() -> Self {
        Self {
            max_input_streams: 4,
            num_pipes: 1,
            max_viewport_width: 1024,
            min_viewport_size: 2,
            line_buffer_size: 6144,
            max_upscale_factor: 64000,
            max_downscale_factor: 250,
            max_taps: 8,
            pitch_alignment: 256,
            address_alignment: 256,
            chunk_desc_bits: 4,
            collaboration: false,
            max_collab_instances: 1,
            rotation: false,
            h_mirror: true,
            v_mirror: true,
            input_dcc: false,
            output_dcc: false,
            luma_keying: true,
            lut_3d: true,
            lut_3d_size: 17,
            input_formats: INPUT_FORMATS,
            output_formats: OUTPUT_FORMATS,
            swizzle_modes: SWIZZLE_MODES,
        }
    }

    pub fn vpe11() -> Self {
        Self {
            chunk_desc_bits: 5,
            collaboration: true,
            max_collab_instances: 2,
            ..Self::vpe10()
        }
    }

    /// Largest chunk id the descriptor can encode, plus one.
    pub fn max_segments(&self) -> u32 {
        1 << self.chunk_desc_bits
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hw/caps.rs"]
mod tests;
