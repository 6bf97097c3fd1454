//! Customer segmentation and descriptive reporting over e-commerce order
//! exports.
//!
//! [`rfm`] and [`reports`] are pure functions over typed records. The
//! [`commands`] layer loads CSV or JSON exports and wraps results in the
//! versioned envelope consumed by the `storelens` CLI.

pub mod commands;
pub mod contracts;
pub mod dataset;
pub mod error;
mod import;
pub mod reports;
pub mod rfm;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
