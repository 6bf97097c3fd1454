pub(crate) mod common;
pub mod report;
pub mod rfm;
