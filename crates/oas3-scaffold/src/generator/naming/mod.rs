pub mod constants;
pub mod identifiers;
pub mod operations;

pub(crate) use constants::DEFAULT_TAG;
