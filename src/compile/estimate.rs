use crate::foundation::error::VpeResult;
use crate::hw::HwGeneration;
use crate::writer::buffer::{BufRegion, BufferSizes};

use super::compiler::{CompileJob, CompileOptions, compile};

/// Bytes a build of `job` needs, found by compiling into counting regions with reuse off.
///
/// Reuse only ever shrinks the embedded buffer and leaves the command buffer unchanged, so the
/// result bounds every real build of the same command list. `sync_seed` is copied; the real
/// sync counter is left alone.
pub(crate) fn estimate(
    hw: &dyn HwGeneration,
    job: CompileJob<'_>,
    collaboration: bool,
    sync_seed: u32,
) -> VpeResult<BufferSizes> {
    let mut cmd = BufRegion::counting(0);
    let mut emb = BufRegion::counting(0);
    let mut index = sync_seed;
    compile(
        hw,
        job,
        &mut cmd,
        &mut emb,
        CompileOptions {
            reuse: false,
            collaboration,
        },
        &mut index,
    )?;
    Ok(BufferSizes {
        cmd_buf_size: cmd.used(),
        emb_buf_size: emb.used(),
    })
}
