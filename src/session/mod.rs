pub mod instance;
pub(crate) mod validate;
