//! Recency/Frequency/Monetary customer segmentation.
//!
//! The pipeline is aggregate -> rank -> normalize -> score -> segment and is
//! recomputed from scratch on every call.

pub mod aggregate;
pub mod engine;
pub mod policy;
pub mod rank;
pub mod types;

pub use engine::{compute_rfm, compute_rfm_with_policy, count_segments};
pub use policy::{RFM_POLICY_V1, RFM_POLICY_VERSION, RfmPolicy};
pub use types::{CustomerRfm, CustomerSegment, RfmReport, SegmentCount};
