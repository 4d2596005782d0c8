//! Command opcodes and the fixed-size commands that carry no payload.

use crate::foundation::error::{VpeError, VpeResult};
use crate::writer::buffer::BufRegion;

pub(crate) const OP_NOP: u8 = 0x0;
pub(crate) const OP_VPE_DESC: u8 = 0x1;
pub(crate) const OP_PLANE_CFG: u8 = 0x2;
pub(crate) const OP_VPEP_CFG: u8 = 0x3;
pub(crate) const OP_COLLAB_SYNC: u8 = 0xC;

/// Sub-opcode of a direct register-configuration block.
pub(crate) const SUBOP_VPEP_CFG_DIRECT: u8 = 0x0;

/// `opcode[7:0] | sub_opcode[15:8]`.
pub(crate) const fn cmd_header(opcode: u8, sub_opcode: u8) -> u32 {
    (opcode as u32) | ((sub_opcode as u32) << 8)
}

/// Fill `num_dwords` dwords with NOP headers.
pub(crate) fn write_noops(region: &mut BufRegion<'_>, num_dwords: u64) -> VpeResult<()> {
    if region.remaining() < num_dwords.saturating_mul(4) {
        return Err(VpeError::BufferOverflow);
    }
    let nop = cmd_header(OP_NOP, 0);
    for _ in 0..num_dwords {
        region.write_dword(nop)?;
    }
    Ok(())
}

/// Barrier shared by all collaborating instances; `index` identifies the epoch.
pub(crate) fn write_collab_sync(region: &mut BufRegion<'_>, index: u32) -> VpeResult<()> {
    region.write_dwords(&[cmd_header(OP_COLLAB_SYNC, 0), index])
}

#[cfg(test)]
#[path = "../../tests/unit/writer/cmd.rs"]
mod tests;
