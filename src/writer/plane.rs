use crate::foundation::core::Rect;
use crate::foundation::error::{VpeError, VpeResult};
use crate::writer::buffer::BufRegion;
use crate::writer::cmd::{OP_PLANE_CFG, cmd_header};

/// One plane as the engine addresses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlaneEntry {
    pub addr: u64,
    pub tmz: bool,
    pub swizzle: u32,
    pub rotation: u32,
    pub h_mirror: bool,
    pub v_mirror: bool,
    /// Bytes per element: 1, 2, 4 or 8.
    pub bytes_per_element: u32,
    /// Pitch in elements.
    pub pitch: u32,
    pub viewport: Rect,
}

impl PlaneEntry {
    fn mode_dword(&self) -> VpeResult<u32> {
        let elem = match self.bytes_per_element {
            1 => 0,
            2 => 1,
            4 => 2,
            8 => 3,
            _ => return Err(VpeError::PixelFormatNotSupported),
        };
        Ok(u32::from(self.tmz)
            | ((self.swizzle & 0x1F) << 3)
            | ((self.rotation & 0x3) << 8)
            | (u32::from(self.h_mirror) << 10)
            | (u32::from(self.v_mirror) << 11)
            | (elem << 16))
    }
}

/// Writes one plane descriptor into the embedded buffer: all source planes, then all
/// destination planes.
#[derive(Debug)]
pub(crate) struct PlaneDescWriter {
    addr: u64,
    num_src: usize,
    num_dst: usize,
    src_added: usize,
    dst_added: usize,
}

impl PlaneDescWriter {
    pub(crate) fn init(region: &mut BufRegion<'_>, num_src: usize, num_dst: usize) -> VpeResult<Self> {
        if !(1..=2).contains(&num_src) || !(1..=2).contains(&num_dst) {
            return Err(VpeError::Error);
        }
        let addr = region.gpu_va();
        let header = cmd_header(OP_PLANE_CFG, 0)
            | (((num_src - 1) as u32) << 16)
            | (((num_dst - 1) as u32) << 18);
        region.write_dword(header)?;
        Ok(Self {
            addr,
            num_src,
            num_dst,
            src_added: 0,
            dst_added: 0,
        })
    }

    pub(crate) fn add_source(&mut self, region: &mut BufRegion<'_>, plane: &PlaneEntry) -> VpeResult<()> {
        if self.src_added == self.num_src || self.dst_added != 0 {
            return Err(VpeError::Error);
        }
        write_plane(region, plane)?;
        self.src_added += 1;
        Ok(())
    }

    pub(crate) fn add_destination(&mut self, region: &mut BufRegion<'_>, plane: &PlaneEntry) -> VpeResult<()> {
        if self.src_added != self.num_src || self.dst_added == self.num_dst {
            return Err(VpeError::Error);
        }
        write_plane(region, plane)?;
        self.dst_added += 1;
        Ok(())
    }

    /// GPU address of the finished descriptor.
    pub(crate) fn complete(self) -> VpeResult<u64> {
        if self.src_added != self.num_src || self.dst_added != self.num_dst {
            return Err(VpeError::Error);
        }
        Ok(self.addr)
    }
}

fn write_plane(region: &mut BufRegion<'_>, plane: &PlaneEntry) -> VpeResult<()> {
    let vp = plane.viewport;
    if vp.x < 0 || vp.y < 0 || vp.is_empty() || plane.pitch == 0 {
        return Err(VpeError::ViewportSizeNotSupported);
    }
    region.write_dwords(&[
        plane.mode_dword()?,
        (plane.addr & 0xFFFF_FFFF) as u32,
        (plane.addr >> 32) as u32,
        plane.pitch - 1,
        (vp.x as u32 & 0xFFFF) | ((vp.y as u32 & 0xFFFF) << 16),
        ((vp.width - 1) & 0xFFFF) | (((vp.height - 1) & 0xFFFF) << 16),
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/writer/plane.rs"]
mod tests;
