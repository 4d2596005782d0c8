pub mod job;
pub mod stream;
pub mod surface;
