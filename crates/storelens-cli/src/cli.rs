use clap::{Parser, Subcommand};

pub fn parse_positive_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err("value must be a whole number of at least 1".to_string()),
    }
}

/// Extended help shown after `storelens rfm --help`.
/// Documents accepted input and how scores map to segments.
pub const RFM_AFTER_HELP: &str = "\
Input:
  <path> is a local file path. Use `-` to read stdin.
  Example: cat orders.csv | storelens rfm -

  Accepted formats:
    CSV  - one header row; extra columns are ignored
    JSON - one top-level array of order-line objects

  Required fields (one row per order line):
    customer_unique_id         stable customer identity
    order_id                   orders are counted once per id
    order_purchase_timestamp   YYYY-MM-DD HH:MM:SS, ISO `T` form, or YYYY-MM-DD
    price                      number >= 0
    quantity                   number >= 0

  Optional fields used by `storelens report`:
    customer_id, customer_city, customer_state, order_status, product_id,
    product_category (or product_category_name_english), review_score (1-5)

Scoring:
  recency    days from the last purchase day to the latest day in the file
  frequency  distinct orders
  monetary   sum of price * quantity

  Each metric is ranked (ties share the average rank) and scaled to 0-100.
  score = (0.15 * recency + 0.28 * frequency + 0.57 * monetary) * 0.05

  Segments:
    score > 3     Top Customers
    score > 2.5   High Value Customers
    score > 2     Mid Value Customers
    score > 1     Low Value Customers
    otherwise     Lost Customers
";

/// Extended help shown after `storelens report --help`.
pub const REPORT_AFTER_HELP: &str = "\
Inputs:
  cities, states, reviews, status, categories, monthly read the order export
  (see `storelens rfm --help` for its fields); price and quantity may be
  left out.
  payments reads a payment export: order_id, payment_type, payment_value.
  zip-codes reads a geolocation export: geolocation_zip_code_prefix,
  geolocation_city, geolocation_state.

  Rows missing the attribute a report groups by are skipped and counted.
";

#[derive(Debug, Parser)]
#[command(
    name = "storelens",
    version,
    about = "customer segmentation and sales reports for e-commerce order exports",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score customers by recency, frequency and monetary value
    #[command(after_long_help = RFM_AFTER_HELP)]
    Rfm {
        /// Order export path, or `-` for stdin
        path: String,
        /// Customers listed per top-N view (default 5)
        #[arg(long, value_parser = parse_positive_count)]
        top: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Descriptive sales and customer reports
    #[command(arg_required_else_help = true, after_long_help = REPORT_AFTER_HELP)]
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReportCommand {
    /// Unique customers per city
    Cities {
        path: String,
        /// Cities shown (default 10)
        #[arg(long, value_parser = parse_positive_count)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Unique customers per state
    States {
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// Average payment value and usage per payment type
    Payments {
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// Average review score per product category
    Reviews {
        path: String,
        /// Categories shown (default 10)
        #[arg(long, value_parser = parse_positive_count)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Order lines per order status
    Status {
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// Most and least sold product categories
    Categories {
        path: String,
        /// Categories shown in each list (default 5)
        #[arg(long, value_parser = parse_positive_count)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Distinct orders per purchase month
    Monthly {
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// Zip code rows per city within one state
    ZipCodes {
        path: String,
        /// Two-letter state code, e.g. SP
        #[arg(long)]
        state: String,
        #[arg(long)]
        json: bool,
    },
}

impl ReportCommand {
    pub fn json(&self) -> bool {
        match self {
            Self::Cities { json, .. }
            | Self::States { json, .. }
            | Self::Payments { json, .. }
            | Self::Reviews { json, .. }
            | Self::Status { json, .. }
            | Self::Categories { json, .. }
            | Self::Monthly { json, .. }
            | Self::ZipCodes { json, .. } => *json,
        }
    }
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
