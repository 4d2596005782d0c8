/// Convenience result type used across the command compiler.
pub type VpeResult<T> = Result<T, VpeError>;

/// Status codes returned by every public entry point.
///
/// Capability mismatches, parameter errors, capacity errors and buffer errors share one flat
/// enumeration. Any `Err` from a build means the caller's buffers are unusable.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VpeError {
    /// Unspecified internal failure.
    #[error("generic error")]
    Error,

    /// An internal array could not be allocated.
    #[error("out of memory")]
    NoMemory,

    /// The requested feature is not available on this hardware generation.
    #[error("not supported")]
    NotSupported,

    /// Input surface compression is not supported.
    #[error("input DCC not supported")]
    InputDccNotSupported,

    /// Output surface compression is not supported.
    #[error("output DCC not supported")]
    OutputDccNotSupported,

    /// Surface swizzle mode is not supported.
    #[error("swizzle mode not supported")]
    SwizzleNotSupported,

    /// Stream count is zero or above the hardware limit.
    #[error("number of streams not supported")]
    NumStreamNotSupported,

    /// Surface pixel format is not supported in this direction.
    #[error("pixel format not supported")]
    PixelFormatNotSupported,

    /// Color space does not match the format or cannot be processed.
    #[error("color space not supported")]
    ColorSpaceValueNotSupported,

    /// Scaling ratio is outside the supported up/down-scale range.
    #[error("scaling ratio not supported")]
    ScalingRatioNotSupported,

    /// Requested taps are unsupported or disagree with the supplied polyphase coefficients.
    #[error("scaling taps mismatch")]
    ScalingTapsMismatch,

    /// Surface pitch is misaligned or smaller than its width.
    #[error("pitch alignment not supported")]
    PitchAlignmentNotSupported,

    /// Rotation is not supported.
    #[error("rotation not supported")]
    RotationNotSupported,

    /// Mirroring in the requested direction is not supported.
    #[error("mirror not supported")]
    MirrorNotSupported,

    /// Blending parameters are out of range.
    #[error("alpha blending not supported")]
    AlphaBlendingNotSupported,

    /// A source, destination or target rectangle is too small or out of bounds.
    #[error("viewport size not supported")]
    ViewportSizeNotSupported,

    /// Two streams cover the same destination columns.
    #[error("stream destinations overlap")]
    StreamsOverlap,

    /// Luma keying bounds are invalid.
    #[error("luma keying not supported")]
    LumaKeyingNotSupported,

    /// Plane address is misaligned.
    #[error("plane address not supported")]
    PlaneAddrNotSupported,

    /// Color adjustment values are out of range.
    #[error("color adjustment not supported")]
    AdjustmentNotSupported,

    /// Collaboration mode requested where unavailable or with a bad instance count.
    #[error("collaboration mode not supported")]
    CollaborationNotSupported,

    /// A command needs more config descriptors than its header can count.
    #[error("command overflow")]
    CmdOverflowError,

    /// The segment layout cannot be expressed by the hardware.
    #[error("segment width error")]
    SegmentWidthError,

    /// `build_commands` received a job that differs from the last validated one.
    #[error("parameter check error")]
    ParamCheckError,

    /// Tone mapping requested on a pipe without a 3D LUT.
    #[error("tone map not supported")]
    ToneMapNotSupported,

    /// Tone-map parameters are inconsistent.
    #[error("bad tone map params")]
    BadToneMapParams,

    /// HDR metadata is inconsistent.
    #[error("bad HDR metadata")]
    BadHdrMetadata,

    /// Background color component outside `[0, 1]`.
    #[error("background color out of range")]
    BgColorOutOfRange,

    /// A write ran past the end of a buffer region.
    #[error("buffer overflow")]
    BufferOverflow,

    /// Buffer GPU address cannot carry the reuse/tmz flag bits.
    #[error("buffer alignment")]
    BufferAlignment,

    /// Caller-provided buffer is smaller than the required size.
    #[error("invalid buffer size")]
    InvalidBufferSize,
}

impl VpeError {
    /// Capability errors are detected entirely inside `check_support`.
    pub fn is_capability_error(self) -> bool {
        matches!(
            self,
            Self::NotSupported
                | Self::InputDccNotSupported
                | Self::OutputDccNotSupported
                | Self::SwizzleNotSupported
                | Self::NumStreamNotSupported
                | Self::PixelFormatNotSupported
                | Self::ColorSpaceValueNotSupported
                | Self::ScalingRatioNotSupported
                | Self::PitchAlignmentNotSupported
                | Self::RotationNotSupported
                | Self::MirrorNotSupported
                | Self::LumaKeyingNotSupported
                | Self::CollaborationNotSupported
                | Self::ToneMapNotSupported
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
