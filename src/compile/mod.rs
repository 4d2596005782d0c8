pub(crate) mod compiler;
pub(crate) mod estimate;
pub(crate) mod pipe;
