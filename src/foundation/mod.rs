pub mod core;
pub mod error;
pub mod fixpt;
pub(crate) mod math;
pub mod vector;
