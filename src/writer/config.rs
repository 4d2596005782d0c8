use smallvec::SmallVec;

use crate::foundation::error::VpeResult;
use crate::writer::buffer::BufRegion;
use crate::writer::cmd::{OP_VPEP_CFG, SUBOP_VPEP_CFG_DIRECT, cmd_header};

/// Values one packet can carry.
pub(crate) const MAX_PACKET_VALUES: usize = 4096;
/// Payload dwords one config block can carry.
pub(crate) const MAX_BLOCK_PAYLOAD: u32 = 0x4000;

const PORT_BIT: u32 = 1 << 0;

/// Which cache a block is eligible for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ShareClass {
    /// Identical for every command of one stream.
    StreamShared,
    /// Identical for every command of one stream and command type.
    StreamOpShared,
    /// Identical for every command of the job.
    OutputShared,
    /// Specific to one command.
    Unshared,
}

/// A finished block of register writes in the embedded buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ConfigBlock {
    pub addr: u64,
    pub class: ShareClass,
    pub pipe: u8,
}

pub(crate) type ConfigBlocks = SmallVec<[ConfigBlock; 4]>;

#[derive(Debug)]
struct OpenBlock {
    header_offset: u64,
    addr: u64,
    payload: u32,
}

/// Serializes register writes into direct config blocks.
///
/// Blocks open lazily on the first write after [`ConfigWriter::begin`] and split
/// transparently when the payload limit is reached. [`ConfigWriter::finish`] closes the open
/// block and hands back every block written since `begin`.
#[derive(Debug)]
pub(crate) struct ConfigWriter<'r, 'b> {
    emb: &'r mut BufRegion<'b>,
    class: ShareClass,
    pipe: u8,
    open: Option<OpenBlock>,
    done: ConfigBlocks,
}

impl<'r, 'b> ConfigWriter<'r, 'b> {
    pub(crate) fn new(emb: &'r mut BufRegion<'b>) -> Self {
        Self {
            emb,
            class: ShareClass::Unshared,
            pipe: 0,
            open: None,
            done: SmallVec::new(),
        }
    }

    /// Tag subsequent writes. Any block still open is closed first.
    pub(crate) fn begin(&mut self, class: ShareClass, pipe: u8) {
        self.close();
        self.done.clear();
        self.class = class;
        self.pipe = pipe;
    }

    /// Embedded region underneath, for writing other records between blocks.
    pub(crate) fn region(&mut self) -> &mut BufRegion<'b> {
        self.close();
        &mut *self.emb
    }

    /// One register.
    pub(crate) fn write(&mut self, reg: u32, value: u32) -> VpeResult<()> {
        self.packet(reg, false, &[value])
    }

    /// Consecutive registers starting at `reg`.
    pub(crate) fn write_seq(&mut self, reg: u32, values: &[u32]) -> VpeResult<()> {
        self.packet(reg, false, values)
    }

    /// Repeated writes to the data port `reg`.
    pub(crate) fn write_port(&mut self, reg: u32, values: &[u32]) -> VpeResult<()> {
        self.packet(reg, true, values)
    }

    /// Close the open block and return every block of the current class.
    pub(crate) fn finish(&mut self) -> ConfigBlocks {
        self.close();
        std::mem::take(&mut self.done)
    }

    fn packet(&mut self, reg: u32, port: bool, values: &[u32]) -> VpeResult<()> {
        let mut reg = reg;
        for chunk in values.chunks(MAX_PACKET_VALUES) {
            let need = 1 + chunk.len() as u32;
            if self
                .open
                .as_ref()
                .is_some_and(|b| b.payload + need > MAX_BLOCK_PAYLOAD)
            {
                self.close();
            }
            if self.open.is_none() {
                let addr = self.emb.gpu_va();
                let header_offset = self.emb.write_dword(0)?;
                self.open = Some(OpenBlock {
                    header_offset,
                    addr,
                    payload: 0,
                });
            }
            let mut header = (reg & 0x000F_FFFC) | (((chunk.len() - 1) as u32) << 20);
            if port {
                header |= PORT_BIT;
            }
            self.emb.write_dword(header)?;
            self.emb.write_dwords(chunk)?;
            if let Some(b) = self.open.as_mut() {
                b.payload += need;
            }
            if !port {
                reg += 4 * chunk.len() as u32;
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        let Some(b) = self.open.take() else {
            return;
        };
        let header = cmd_header(OP_VPEP_CFG, SUBOP_VPEP_CFG_DIRECT) | ((b.payload - 1) << 16);
        self.emb.patch_dword(b.header_offset, header);
        self.done.push(ConfigBlock {
            addr: b.addr,
            class: self.class,
            pipe: self.pipe,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/writer/config.rs"]
mod tests;
