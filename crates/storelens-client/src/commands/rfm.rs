use crate::ClientResult;
use crate::commands::common::{require_positive, source_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CustomerRfmRow, RfmData, SegmentCountRow, TopCustomers};
use crate::import::load_orders;
use crate::rfm::{CustomerRfm, RfmReport, compute_rfm};

pub const DEFAULT_TOP: usize = 5;

const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug)]
pub struct RfmRunOptions {
    pub path: String,
    pub top: usize,
    pub stdin_override: Option<String>,
}

pub fn run(path: &str, top: Option<usize>) -> ClientResult<SuccessEnvelope> {
    run_with_options(RfmRunOptions {
        path: path.to_string(),
        top: top.unwrap_or(DEFAULT_TOP),
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: RfmRunOptions) -> ClientResult<SuccessEnvelope> {
    require_positive("--top", options.top, "rfm")?;
    let (source, lines) = load_orders(&options.path, options.stdin_override)?;
    let report = compute_rfm(&lines)?;

    let data = RfmData {
        source: source_summary(&source),
        reference_date: report.reference_date.format("%Y-%m-%d").to_string(),
        policy_version: report.policy_version.to_string(),
        customer_count: report.customers.len(),
        segments: segment_rows(&report),
        top: top_customers(&report, options.top),
        customers: report.customers.iter().map(customer_row).collect(),
    };

    success("rfm", data)
}

fn segment_rows(report: &RfmReport) -> Vec<SegmentCountRow> {
    report
        .segment_counts
        .iter()
        .map(|count| SegmentCountRow {
            segment: count.segment.label().to_string(),
            key: count.segment.as_key().to_string(),
            customers: count.customers,
        })
        .collect()
}

fn top_customers(report: &RfmReport, limit: usize) -> TopCustomers {
    let rows = |customers: Vec<&CustomerRfm>| {
        customers
            .into_iter()
            .map(customer_row)
            .collect::<Vec<CustomerRfmRow>>()
    };

    TopCustomers {
        limit,
        by_recency: rows(report.top_by_recency(limit)),
        by_frequency: rows(report.top_by_frequency(limit)),
        by_monetary: rows(report.top_by_monetary(limit)),
        by_score: rows(report.top_by_score(limit)),
    }
}

fn customer_row(customer: &CustomerRfm) -> CustomerRfmRow {
    CustomerRfmRow {
        customer_unique_id: customer.customer_unique_id.clone(),
        last_purchase_at: customer
            .last_purchase_at
            .format(TIMESTAMP_OUTPUT_FORMAT)
            .to_string(),
        recency: customer.recency,
        frequency: customer.frequency,
        monetary: customer.monetary,
        r_rank: customer.r_rank,
        f_rank: customer.f_rank,
        m_rank: customer.m_rank,
        r_rank_norm: customer.r_rank_norm,
        f_rank_norm: customer.f_rank_norm,
        m_rank_norm: customer.m_rank_norm,
        rfm_score: customer.rfm_score,
        customer_segment: customer.segment.label().to_string(),
    }
}
