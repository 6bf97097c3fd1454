use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    pub expected: Option<String>,
    pub received: Option<String>,
}

/// Where a dataset came from and how it was read.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub source_kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,
    pub format: String,
    pub rows_read: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RfmData {
    pub source: SourceSummary,
    pub reference_date: String,
    pub policy_version: String,
    pub customer_count: usize,
    pub segments: Vec<SegmentCountRow>,
    pub top: TopCustomers,
    pub customers: Vec<CustomerRfmRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentCountRow {
    pub segment: String,
    pub key: String,
    pub customers: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopCustomers {
    pub limit: usize,
    pub by_recency: Vec<CustomerRfmRow>,
    pub by_frequency: Vec<CustomerRfmRow>,
    pub by_monetary: Vec<CustomerRfmRow>,
    pub by_score: Vec<CustomerRfmRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerRfmRow {
    pub customer_unique_id: String,
    pub last_purchase_at: String,
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
    pub customer_segment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub report: String,
    pub title: String,
    pub source: SourceSummary,
    pub skipped_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub result: ReportRows,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportRows {
    Counts {
        rows: Vec<CountRow>,
    },
    PaymentMethods {
        rows: Vec<PaymentMethodRow>,
    },
    ReviewScores {
        rows: Vec<ReviewScoreRow>,
    },
    CategoryVolumes {
        most_sold: Vec<CountRow>,
        least_sold: Vec<CountRow>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct CountRow {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodRow {
    pub payment_type: String,
    pub average_value: f64,
    pub transactions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewScoreRow {
    pub category: String,
    pub average_score: f64,
    pub reviews: usize,
}
