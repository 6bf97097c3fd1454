#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Rows of one aggregate plus how many input rows lacked the grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<T> {
    pub rows: Vec<T>,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethodSummary {
    pub payment_type: String,
    pub average_value: f64,
    pub transactions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReviewScore {
    pub category: String,
    pub average_score: f64,
    pub reviews: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryVolumes {
    pub most_sold: Vec<LabelCount>,
    pub least_sold: Vec<LabelCount>,
    pub skipped_rows: usize,
}
