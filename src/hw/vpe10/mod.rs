pub(crate) mod backend;
pub(crate) mod frontend;

use crate::foundation::error::{VpeError, VpeResult};
use crate::hw::HwGeneration;
use crate::hw::caps::Capabilities;
use crate::model::surface::PixelFormat;
use crate::writer::buffer::BufRegion;

/// VPE 1.0.
#[derive(Debug)]
pub(crate) struct Vpe10 {
    caps: Capabilities,
}

impl Vpe10 {
    pub(crate) fn new() -> Self {
        Self {
            caps: Capabilities::vpe10(),
        }
    }
}

impl HwGeneration for Vpe10 {
    fn caps(&self) -> &Capabilities {
        &self.caps
    }

    fn write_collab_sync(&self, _region: &mut BufRegion<'_>, _index: u32) -> VpeResult<()> {
        Err(VpeError::CollaborationNotSupported)
    }
}

/// Surface pixel format encoding shared by the fetch and output units.
pub(crate) fn format_code(format: PixelFormat) -> u32 {
    match format {
        PixelFormat::Argb8888 => 8,
        PixelFormat::Abgr8888 => 9,
        PixelFormat::Xrgb8888 => 10,
        PixelFormat::Xbgr8888 => 11,
        PixelFormat::Argb2101010 => 12,
        PixelFormat::Abgr2101010 => 13,
        PixelFormat::Argb16161616F => 26,
        PixelFormat::Nv21 => 64,
        PixelFormat::Nv12 => 65,
        PixelFormat::P010 => 66,
    }
}

/// Crossbar swapping the first and third color channels.
pub(crate) fn swaps_red_blue(format: PixelFormat) -> bool {
    matches!(
        format,
        PixelFormat::Abgr8888 | PixelFormat::Xbgr8888 | PixelFormat::Abgr2101010 | PixelFormat::Nv21
    )
}
