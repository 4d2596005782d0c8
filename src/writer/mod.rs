//! Binary encoders for the command buffer and the embedded buffer.

pub mod buffer;
pub(crate) mod cmd;
pub(crate) mod config;
pub(crate) mod desc;
pub(crate) mod plane;
