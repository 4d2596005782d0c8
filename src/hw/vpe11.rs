use crate::foundation::error::VpeResult;
use crate::hw::HwGeneration;
use crate::hw::caps::Capabilities;
use crate::writer::buffer::BufRegion;
use crate::writer::cmd::write_collab_sync;

/// VPE 1.1: the 1.0 pipeline plus a wider chunk id and collaboration sync.
#[derive(Debug)]
pub(crate) struct Vpe11 {
    caps: Capabilities,
}

impl Vpe11 {
    pub(crate) fn new() -> Self {
        Self {
            caps: Capabilities::vpe11(),
        }
    }
}

impl HwGeneration for Vpe11 {
    fn caps(&self) -> &Capabilities {
        &self.caps
    }

    fn write_collab_sync(&self, region: &mut BufRegion<'_>, index: u32) -> VpeResult<()> {
        write_collab_sync(region, index)
    }
}
