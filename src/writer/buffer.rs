use crate::foundation::error::{VpeError, VpeResult};

/// One caller-owned memory region: the address the engine sees and the CPU mapping the compiler
/// writes through.
#[derive(Debug)]
pub struct BufDesc<'a> {
    /// GPU virtual address of `cpu[0]`.
    pub gpu_va: u64,
    /// CPU mapping. An empty slice asks `build_commands` for the required sizes only.
    pub cpu: &'a mut [u8],
    /// Region lives in trusted memory.
    pub tmz: bool,
}

/// Command buffer (descriptors) and embedded buffer (plane and config payloads).
#[derive(Debug)]
pub struct Buffers<'a> {
    /// Receives VPE descriptors and sync descriptors.
    pub cmd: BufDesc<'a>,
    /// Receives plane descriptors and register-configuration blocks.
    pub emb: BufDesc<'a>,
}

/// Byte counts for the two buffers, either required or used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BufferSizes {
    /// Command buffer bytes.
    pub cmd_buf_size: u64,
    /// Embedded buffer bytes.
    pub emb_buf_size: u64,
}

/// Write cursor over one region.
///
/// Tracks the triple (gpu address, cpu memory, remaining size) and consumes it monotonically. A
/// counting region has no memory behind it and unbounded capacity; it is used to size a build
/// without writing.
#[derive(Debug)]
pub(crate) struct BufRegion<'a> {
    base_gpu_va: u64,
    mem: Option<&'a mut [u8]>,
    capacity: u64,
    used: u64,
    tmz: bool,
}

impl<'a> BufRegion<'a> {
    pub(crate) fn new(desc: &'a mut BufDesc<'_>) -> Self {
        let capacity = desc.cpu.len() as u64;
        Self {
            base_gpu_va: desc.gpu_va,
            mem: Some(&mut *desc.cpu),
            capacity,
            used: 0,
            tmz: desc.tmz,
        }
    }

    pub(crate) fn counting(base_gpu_va: u64) -> Self {
        Self {
            base_gpu_va,
            mem: None,
            capacity: u64::MAX,
            used: 0,
            tmz: false,
        }
    }

    /// GPU address of the next byte to be written.
    pub(crate) fn gpu_va(&self) -> u64 {
        self.base_gpu_va + self.used
    }

    pub(crate) fn used(&self) -> u64 {
        self.used
    }

    pub(crate) fn remaining(&self) -> u64 {
        self.capacity - self.used
    }

    pub(crate) fn tmz(&self) -> bool {
        self.tmz
    }

    /// Append one little-endian dword, returning its offset.
    pub(crate) fn write_dword(&mut self, v: u32) -> VpeResult<u64> {
        if self.remaining() < 4 {
            return Err(VpeError::BufferOverflow);
        }
        let off = self.used;
        if let Some(mem) = self.mem.as_deref_mut() {
            let at = off as usize;
            mem[at..at + 4].copy_from_slice(&v.to_le_bytes());
        }
        self.used += 4;
        Ok(off)
    }

    pub(crate) fn write_dwords(&mut self, vs: &[u32]) -> VpeResult<()> {
        if self.remaining() < 4 * vs.len() as u64 {
            return Err(VpeError::BufferOverflow);
        }
        for &v in vs {
            self.write_dword(v)?;
        }
        Ok(())
    }

    /// Overwrite a dword already written at `offset`.
    pub(crate) fn patch_dword(&mut self, offset: u64, v: u32) {
        debug_assert!(offset + 4 <= self.used);
        if let Some(mem) = self.mem.as_deref_mut() {
            let at = offset as usize;
            mem[at..at + 4].copy_from_slice(&v.to_le_bytes());
        }
    }

    /// Dword previously written at `offset`; `None` for counting regions.
    #[cfg(test)]
    pub(crate) fn read_dword(&self, offset: u64) -> Option<u32> {
        let mem = self.mem.as_deref()?;
        if offset + 4 > self.used {
            return None;
        }
        let at = offset as usize;
        let bytes: [u8; 4] = mem[at..at + 4].try_into().ok()?;
        Some(u32::from_le_bytes(bytes))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/writer/buffer.rs"]
mod tests;
