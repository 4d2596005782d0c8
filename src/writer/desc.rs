use crate::foundation::error::{VpeError, VpeResult};
use crate::writer::buffer::BufRegion;
use crate::writer::cmd::{OP_VPE_DESC, cmd_header};

/// Config references one VPE descriptor can carry.
pub(crate) const MAX_CONFIG_DESC: u32 = 256;

const TMZ_BIT: u32 = 1 << 0;
const REUSE_BIT: u32 = 1 << 1;

/// Writes one top-level VPE descriptor into the command buffer.
///
/// The header is written by [`VpeDescWriter::init`] with the chunk-descriptor field already
/// encoded; the config count is patched in by [`VpeDescWriter::complete`].
#[derive(Debug)]
pub(crate) struct VpeDescWriter {
    header_offset: u64,
    header: u32,
    num_config_desc: u32,
    plane_desc_added: bool,
}

impl VpeDescWriter {
    /// Start a descriptor; `cd_field` is the chunk id already shifted into place.
    pub(crate) fn init(region: &mut BufRegion<'_>, cd_field: u32) -> VpeResult<Self> {
        let header = cmd_header(OP_VPE_DESC, 0) | cd_field;
        let header_offset = region.write_dword(header)?;
        Ok(Self {
            header_offset,
            header,
            num_config_desc: 0,
            plane_desc_added: false,
        })
    }

    pub(crate) fn add_plane_desc(
        &mut self,
        region: &mut BufRegion<'_>,
        addr: u64,
        tmz: bool,
    ) -> VpeResult<()> {
        if self.plane_desc_added || self.num_config_desc != 0 {
            return Err(VpeError::Error);
        }
        check_alignment(addr)?;
        region.write_dwords(&[lo(addr) | u32::from(tmz), hi(addr)])?;
        self.plane_desc_added = true;
        Ok(())
    }

    pub(crate) fn add_config_desc(
        &mut self,
        region: &mut BufRegion<'_>,
        addr: u64,
        reuse: bool,
        tmz: bool,
    ) -> VpeResult<()> {
        if !self.plane_desc_added {
            return Err(VpeError::Error);
        }
        if self.num_config_desc >= MAX_CONFIG_DESC {
            return Err(VpeError::CmdOverflowError);
        }
        check_alignment(addr)?;
        let mut flags = 0;
        if reuse {
            flags |= REUSE_BIT;
        }
        if tmz {
            flags |= TMZ_BIT;
        }
        region.write_dwords(&[lo(addr) | flags, hi(addr)])?;
        self.num_config_desc += 1;
        Ok(())
    }

    pub(crate) fn num_config_desc(&self) -> u32 {
        self.num_config_desc
    }

    /// Patch the config count into the header.
    pub(crate) fn complete(self, region: &mut BufRegion<'_>) -> VpeResult<()> {
        if !self.plane_desc_added || self.num_config_desc == 0 {
            return Err(VpeError::Error);
        }
        let header = self.header | ((self.num_config_desc - 1) << 24);
        region.patch_dword(self.header_offset, header);
        Ok(())
    }
}

fn check_alignment(addr: u64) -> VpeResult<()> {
    if addr & 0x3 != 0 {
        return Err(VpeError::BufferAlignment);
    }
    Ok(())
}

fn lo(addr: u64) -> u32 {
    (addr & 0xFFFF_FFFF) as u32
}

fn hi(addr: u64) -> u32 {
    (addr >> 32) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/writer/desc.rs"]
mod tests;
