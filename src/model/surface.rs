use crate::foundation::core::Rect;

/// Surface pixel formats understood by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// 8-bit BGRA in memory, alpha used.
    Argb8888,
    /// 8-bit RGBA in memory, alpha used.
    Abgr8888,
    /// 8-bit BGRX in memory, alpha ignored.
    Xrgb8888,
    /// 8-bit RGBX in memory, alpha ignored.
    Xbgr8888,
    /// 10-bit color, 2-bit alpha.
    Argb2101010,
    /// 10-bit color, 2-bit alpha, swapped red/blue.
    Abgr2101010,
    /// Half-float RGBA.
    Argb16161616F,
    /// 8-bit 4:2:0, interleaved CbCr plane.
    Nv12,
    /// 8-bit 4:2:0, interleaved CrCb plane.
    Nv21,
    /// 10-bit (MSB aligned in 16) 4:2:0.
    P010,
}

/// Coarse grouping used for visual confirmation colors and bit-depth programming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatClass {
    Rgb8,
    Rgb10,
    RgbFp16,
    Yuv8,
    Yuv10,
}

impl PixelFormat {
    /// Return `true` for 4:2:0 two-plane video formats.
    pub fn is_yuv420(self) -> bool {
        matches!(self, Self::Nv12 | Self::Nv21 | Self::P010)
    }

    /// Return `true` for single-plane RGB formats.
    pub fn is_rgb(self) -> bool {
        !self.is_yuv420()
    }

    /// Return `true` when the format carries a usable alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::Argb8888
                | Self::Abgr8888
                | Self::Argb2101010
                | Self::Abgr2101010
                | Self::Argb16161616F
        )
    }

    /// Number of memory planes.
    pub fn num_planes(self) -> usize {
        if self.is_yuv420() { 2 } else { 1 }
    }

    /// Bytes per addressable element of `plane`.
    pub fn bytes_per_element(self, plane: usize) -> u32 {
        match (self, plane) {
            (Self::Argb16161616F, _) => 8,
            (Self::Nv12 | Self::Nv21, 0) => 1,
            (Self::Nv12 | Self::Nv21, _) => 2,
            (Self::P010, 0) => 2,
            (Self::P010, _) => 4,
            _ => 4,
        }
    }

    /// Grouping by channel depth and encoding.
    pub fn class(self) -> FormatClass {
        match self {
            Self::Argb8888 | Self::Abgr8888 | Self::Xrgb8888 | Self::Xbgr8888 => FormatClass::Rgb8,
            Self::Argb2101010 | Self::Abgr2101010 => FormatClass::Rgb10,
            Self::Argb16161616F => FormatClass::RgbFp16,
            Self::Nv12 | Self::Nv21 => FormatClass::Yuv8,
            Self::P010 => FormatClass::Yuv10,
        }
    }
}

/// Memory tiling mode, numbered like the address library's swizzle enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SwizzleMode {
    Linear,
    Sw256bS,
    Sw4kbZ,
    Sw4kbS,
    Sw4kbD,
    Sw64kbZ,
    Sw64kbS,
    Sw64kbD,
    Sw64kbZX,
    Sw64kbSX,
    Sw64kbDX,
}

impl SwizzleMode {
    /// Hardware encoding.
    pub fn code(self) -> u32 {
        match self {
            Self::Linear => 0,
            Self::Sw256bS => 1,
            Self::Sw4kbZ => 4,
            Self::Sw4kbS => 5,
            Self::Sw4kbD => 6,
            Self::Sw64kbZ => 8,
            Self::Sw64kbS => 9,
            Self::Sw64kbD => 10,
            Self::Sw64kbZX => 24,
            Self::Sw64kbSX => 25,
            Self::Sw64kbDX => 26,
        }
    }
}

/// Base addresses of a surface's planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlaneAddress {
    /// Single-plane surface.
    Graphics {
        /// Plane base.
        addr: u64,
    },
    /// Two-plane progressive video surface.
    VideoProgressive {
        /// Luma plane base.
        luma: u64,
        /// Chroma plane base.
        chroma: u64,
    },
}

/// Surface geometry per plane. Pitches are in elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlaneSize {
    /// Luma (or only) plane extent.
    pub surface_size: Rect,
    /// Luma (or only) plane pitch.
    pub surface_pitch: u32,
    /// Chroma plane extent; unused for RGB.
    #[serde(default)]
    pub chroma_size: Rect,
    /// Chroma plane pitch; unused for RGB.
    #[serde(default)]
    pub chroma_pitch: u32,
}

/// Delta color compression state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DccParams {
    /// Surface is compressed.
    pub enable: bool,
}

/// Pixel value encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColorEncoding {
    #[default]
    Rgb,
    YCbCr,
}

/// Quantization range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColorRange {
    #[default]
    Full,
    Limited,
}

/// Color primaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColorPrimaries {
    Bt601,
    #[default]
    Bt709,
    Bt2020,
}

/// Transfer function of the stored values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransferFunction {
    #[default]
    Srgb,
    Bt709,
    Linear,
    Pq,
}

/// Full color-space description of a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorSpace {
    /// RGB or YCbCr.
    pub encoding: ColorEncoding,
    /// Full or limited range.
    pub range: ColorRange,
    /// Primaries.
    pub primaries: ColorPrimaries,
    /// Transfer function.
    pub tf: TransferFunction,
}

impl ColorSpace {
    /// BT.709 limited-range YCbCr, the common video default.
    pub fn bt709_limited_ycbcr() -> Self {
        Self {
            encoding: ColorEncoding::YCbCr,
            range: ColorRange::Limited,
            primaries: ColorPrimaries::Bt709,
            tf: TransferFunction::Bt709,
        }
    }
}

/// A memory surface read by a stream or written as the destination.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Surface {
    /// Plane base addresses.
    pub address: PlaneAddress,
    /// Surface lives in trusted memory.
    #[serde(default)]
    pub tmz: bool,
    /// Tiling mode.
    pub swizzle: SwizzleMode,
    /// Per-plane geometry.
    pub plane_size: PlaneSize,
    /// Compression state.
    #[serde(default)]
    pub dcc: DccParams,
    /// Pixel format.
    pub format: PixelFormat,
    /// Color space of the stored values.
    #[serde(default)]
    pub cs: ColorSpace,
}

impl Surface {
    /// Linear single-plane RGB surface of `width x height` with a tightly aligned pitch.
    pub fn graphics(format: PixelFormat, addr: u64, width: u32, height: u32) -> Self {
        let bpe = format.bytes_per_element(0);
        let pitch = aligned_pitch(width, bpe);
        Self {
            address: PlaneAddress::Graphics { addr },
            tmz: false,
            swizzle: SwizzleMode::Linear,
            plane_size: PlaneSize {
                surface_size: Rect::new(0, 0, width, height),
                surface_pitch: pitch,
                chroma_size: Rect::default(),
                chroma_pitch: 0,
            },
            dcc: DccParams::default(),
            format,
            cs: ColorSpace::default(),
        }
    }

    /// Linear two-plane 4:2:0 surface of `width x height`.
    pub fn video(format: PixelFormat, luma: u64, chroma: u64, width: u32, height: u32) -> Self {
        let cw = width.div_ceil(2);
        let ch = height.div_ceil(2);
        Self {
            address: PlaneAddress::VideoProgressive { luma, chroma },
            tmz: false,
            swizzle: SwizzleMode::Linear,
            plane_size: PlaneSize {
                surface_size: Rect::new(0, 0, width, height),
                surface_pitch: aligned_pitch(width, format.bytes_per_element(0)),
                chroma_size: Rect::new(0, 0, cw, ch),
                chroma_pitch: aligned_pitch(cw, format.bytes_per_element(1)),
            },
            dcc: DccParams::default(),
            format,
            cs: ColorSpace::bt709_limited_ycbcr(),
        }
    }

    /// Base address of `plane`; plane 1 of a graphics surface is `None`.
    pub fn plane_address(&self, plane: usize) -> Option<u64> {
        match (self.address, plane) {
            (PlaneAddress::Graphics { addr }, 0) => Some(addr),
            (PlaneAddress::VideoProgressive { luma, .. }, 0) => Some(luma),
            (PlaneAddress::VideoProgressive { chroma, .. }, 1) => Some(chroma),
            _ => None,
        }
    }

    /// Pitch of `plane` in elements.
    pub fn plane_pitch(&self, plane: usize) -> u32 {
        if plane == 0 {
            self.plane_size.surface_pitch
        } else {
            self.plane_size.chroma_pitch
        }
    }

    /// Extent of `plane`.
    pub fn plane_extent(&self, plane: usize) -> Rect {
        if plane == 0 {
            self.plane_size.surface_size
        } else {
            self.plane_size.chroma_size
        }
    }
}

/// Smallest pitch (in elements) `>= width` whose byte size is a multiple of 256.
fn aligned_pitch(width: u32, bpe: u32) -> u32 {
    let align = (256 / bpe).max(1);
    width.div_ceil(align) * align
}
