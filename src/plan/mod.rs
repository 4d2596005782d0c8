//! Turns a job into per-stream segments and an ordered command list.

pub mod command;
pub(crate) mod segment;
pub(crate) mod stream_ctx;
