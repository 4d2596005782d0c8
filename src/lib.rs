#![forbid(unsafe_code)]

pub(crate) mod compile;
pub mod foundation;
pub mod hw;
pub mod model;
pub mod plan;
pub mod session;
pub mod writer;

pub use foundation::core::{Color, Rect};
pub use foundation::error::{VpeError, VpeResult};
pub use hw::IpLevel;
pub use hw::caps::Capabilities;
pub use model::job::{AlphaMode, BuildParam, Collaboration, HdrMetadata};
pub use model::stream::{
    BlendInfo, ColorAdjust, FilterCoeffs, KeyingParams, Rotation, ScalingInfo, ScalingTaps,
    Stream, ToneMapParams,
};
pub use model::surface::{
    ColorEncoding, ColorPrimaries, ColorRange, ColorSpace, DccParams, FormatClass, PixelFormat,
    PlaneAddress, PlaneSize, Surface, SwizzleMode, TransferFunction,
};
pub use plan::command::{CmdType, CommandSummary};
pub use session::instance::{DebugOptions, InitParams, Vpe};
pub use writer::buffer::{BufDesc, BufferSizes, Buffers};

#[cfg(test)]
#[path = "../tests/unit/decode.rs"]
mod test_decode;
