use tracing::{debug, info};

use crate::dataset::OrderLine;
use crate::rfm::aggregate::{aggregate_customers, recency_days, reference_date};
use crate::rfm::policy::{RFM_POLICY_V1, RfmPolicy};
use crate::rfm::rank::{RankOrder, average_ranks, percentile_normalize};
use crate::rfm::types::{CustomerRfm, CustomerSegment, RfmReport, SegmentCount};
use crate::{ClientError, ClientResult};

pub fn compute_rfm(lines: &[OrderLine]) -> ClientResult<RfmReport> {
    compute_rfm_with_policy(lines, RFM_POLICY_V1)
}

/// Scores every customer in `lines` under `policy`.
///
/// Stages run strictly in order: aggregation, ranking, normalization,
/// scoring, segmentation. The three rank passes are independent of each
/// other.
pub fn compute_rfm_with_policy(lines: &[OrderLine], policy: RfmPolicy) -> ClientResult<RfmReport> {
    check_input_contract(lines)?;
    let Some(reference) = reference_date(lines) else {
        return Err(ClientError::empty_dataset("order"));
    };

    let aggregates = aggregate_customers(lines);
    debug!(
        order_lines = lines.len(),
        customers = aggregates.len(),
        %reference,
        "aggregated order lines per customer"
    );

    let recency = aggregates
        .iter()
        .map(|customer| recency_days(reference, customer.last_purchase_at))
        .collect::<Vec<i64>>();
    let recency_values = recency.iter().map(|days| *days as f64).collect::<Vec<f64>>();
    let frequency_values = aggregates
        .iter()
        .map(|customer| customer.frequency as f64)
        .collect::<Vec<f64>>();
    let monetary_values = aggregates
        .iter()
        .map(|customer| customer.monetary)
        .collect::<Vec<f64>>();

    let r_ranks = average_ranks(&recency_values, RankOrder::Descending);
    let f_ranks = average_ranks(&frequency_values, RankOrder::Ascending);
    let m_ranks = average_ranks(&monetary_values, RankOrder::Ascending);

    let r_norms = percentile_normalize(&r_ranks);
    let f_norms = percentile_normalize(&f_ranks);
    let m_norms = percentile_normalize(&m_ranks);

    let customers = aggregates
        .into_iter()
        .enumerate()
        .map(|(index, aggregate)| {
            let rfm_score = policy.score(r_norms[index], f_norms[index], m_norms[index]);
            CustomerRfm {
                customer_unique_id: aggregate.customer_unique_id,
                last_purchase_at: aggregate.last_purchase_at,
                recency: recency[index],
                frequency: aggregate.frequency,
                monetary: aggregate.monetary,
                r_rank: r_ranks[index],
                f_rank: f_ranks[index],
                m_rank: m_ranks[index],
                r_rank_norm: r_norms[index],
                f_rank_norm: f_norms[index],
                m_rank_norm: m_norms[index],
                rfm_score,
                segment: policy.classify(rfm_score),
            }
        })
        .collect::<Vec<CustomerRfm>>();

    let segment_counts = count_segments(&customers);
    info!(
        customers = customers.len(),
        %reference,
        policy = policy.version,
        top = segment_counts[0].customers,
        lost = segment_counts[4].customers,
        "rfm segmentation complete"
    );

    Ok(RfmReport {
        reference_date: reference,
        policy_version: policy.version,
        customers,
        segment_counts,
    })
}

/// Counts per segment in display order; absent segments report zero.
pub fn count_segments(customers: &[CustomerRfm]) -> Vec<SegmentCount> {
    CustomerSegment::DISPLAY_ORDER
        .iter()
        .map(|segment| SegmentCount {
            segment: *segment,
            customers: customers
                .iter()
                .filter(|customer| customer.segment == *segment)
                .count(),
        })
        .collect()
}

// Typed records can still carry blank identifiers or negative amounts when
// built by hand; refuse them instead of scoring garbage.
fn check_input_contract(lines: &[OrderLine]) -> ClientResult<()> {
    if lines.is_empty() {
        return Err(ClientError::empty_dataset("order"));
    }

    for (index, line) in lines.iter().enumerate() {
        let position = index + 1;
        if line.customer_unique_id.trim().is_empty() {
            return Err(ClientError::missing_field(
                "customer_unique_id",
                &format!("order line {position} has an empty customer identifier."),
            ));
        }
        if line.order_id.trim().is_empty() {
            return Err(ClientError::missing_field(
                "order_id",
                &format!("order line {position} has an empty order identifier."),
            ));
        }
        check_amount("price", line.price, position)?;
        check_amount("quantity", line.quantity, position)?;
    }

    Ok(())
}

fn check_amount(field: &str, value: f64, position: usize) -> ClientResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ClientError::invalid_value(
            field,
            &format!("order line {position} has {value}; expected a finite number >= 0."),
        ));
    }
    Ok(())
}
