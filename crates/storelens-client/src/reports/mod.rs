//! Descriptive aggregates shown next to the segmentation.
//!
//! Every report is a pure function of its input slice. Groups are kept in
//! ordered maps and sorted metric-descending then label-ascending, so equal
//! input always produces byte-identical output.

pub mod customers;
pub mod geolocation;
pub mod orders;
pub mod payments;
pub mod reviews;
mod tally;
pub mod types;

pub use customers::{customers_by_city, customers_by_state};
pub use geolocation::zip_codes_by_city;
pub use orders::{category_volumes, monthly_orders, order_status_distribution};
pub use payments::payment_methods;
pub use reviews::review_scores_by_category;
pub use types::{CategoryReviewScore, CategoryVolumes, LabelCount, PaymentMethodSummary, Tally};
