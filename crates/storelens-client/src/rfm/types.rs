use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerSegment {
    Top,
    HighValue,
    MidValue,
    LowValue,
    Lost,
}

impl CustomerSegment {
    /// Fixed display order, independent of how many customers land in each.
    pub const DISPLAY_ORDER: [Self; 5] = [
        Self::Top,
        Self::HighValue,
        Self::MidValue,
        Self::LowValue,
        Self::Lost,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Top => "Top Customers",
            Self::HighValue => "High Value Customers",
            Self::MidValue => "Mid Value Customers",
            Self::LowValue => "Low Value Customers",
            Self::Lost => "Lost Customers",
        }
    }

    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::HighValue => "high_value",
            Self::MidValue => "mid_value",
            Self::LowValue => "low_value",
            Self::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRfm {
    pub customer_unique_id: String,
    pub last_purchase_at: NaiveDateTime,
    pub recency: i64,
    pub frequency: usize,
    pub monetary: f64,
    pub r_rank: f64,
    pub f_rank: f64,
    pub m_rank: f64,
    pub r_rank_norm: f64,
    pub f_rank_norm: f64,
    pub m_rank_norm: f64,
    pub rfm_score: f64,
    pub segment: CustomerSegment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentCount {
    pub segment: CustomerSegment,
    pub customers: usize,
}

#[derive(Debug, Clone)]
pub struct RfmReport {
    pub reference_date: NaiveDate,
    pub policy_version: &'static str,
    pub customers: Vec<CustomerRfm>,
    pub segment_counts: Vec<SegmentCount>,
}

impl RfmReport {
    pub fn customer(&self, customer_unique_id: &str) -> Option<&CustomerRfm> {
        self.customers
            .iter()
            .find(|customer| customer.customer_unique_id == customer_unique_id)
    }

    pub fn segment_count(&self, segment: CustomerSegment) -> usize {
        self.segment_counts
            .iter()
            .find(|count| count.segment == segment)
            .map_or(0, |count| count.customers)
    }

    /// Most recent buyers first.
    pub fn top_by_recency(&self, limit: usize) -> Vec<&CustomerRfm> {
        self.top_by(limit, |left, right| left.recency.cmp(&right.recency))
    }

    pub fn top_by_frequency(&self, limit: usize) -> Vec<&CustomerRfm> {
        self.top_by(limit, |left, right| right.frequency.cmp(&left.frequency))
    }

    pub fn top_by_monetary(&self, limit: usize) -> Vec<&CustomerRfm> {
        self.top_by(limit, |left, right| right.monetary.total_cmp(&left.monetary))
    }

    pub fn top_by_score(&self, limit: usize) -> Vec<&CustomerRfm> {
        self.top_by(limit, |left, right| right.rfm_score.total_cmp(&left.rfm_score))
    }

    fn top_by<F>(&self, limit: usize, compare: F) -> Vec<&CustomerRfm>
    where
        F: Fn(&CustomerRfm, &CustomerRfm) -> Ordering,
    {
        let mut ordered = self.customers.iter().collect::<Vec<&CustomerRfm>>();
        ordered.sort_by(|left, right| {
            compare(left, right).then_with(|| left.customer_unique_id.cmp(&right.customer_unique_id))
        });
        ordered.truncate(limit);
        ordered
    }
}
