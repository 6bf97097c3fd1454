use crate::rfm::types::CustomerSegment;

/// Scoring policy identifier, emitted with every RFM result so a change in
/// weights or thresholds is visible in diffs of the output.
pub const RFM_POLICY_VERSION: &str = "rfm/v1";

/// v1 RFM scoring policy.
///
/// Notes:
/// - Monetary dominates the blend, frequency is second, recency is last.
///   Changing the order of influence changes every expected fixture.
/// - `score_scale` compresses the 0..=100 percentile blend into 0..=5; the
///   segment ladder thresholds are expressed on that compressed scale.
#[derive(Debug, Clone, Copy)]
pub struct RfmPolicy {
    pub version: &'static str,
    pub recency_weight: f64,
    pub frequency_weight: f64,
    pub monetary_weight: f64,
    pub score_scale: f64,
    pub score_decimals: u32,
    /// Evaluated top-down, first strict `score > threshold` match wins.
    pub segment_ladder: [(f64, CustomerSegment); 4],
    pub fallback_segment: CustomerSegment,
}

impl RfmPolicy {
    pub fn blend(self, r_rank_norm: f64, f_rank_norm: f64, m_rank_norm: f64) -> f64 {
        ((self.recency_weight * r_rank_norm)
            + (self.frequency_weight * f_rank_norm)
            + (self.monetary_weight * m_rank_norm))
            * self.score_scale
    }

    pub fn score(self, r_rank_norm: f64, f_rank_norm: f64, m_rank_norm: f64) -> f64 {
        round_half_even(
            self.blend(r_rank_norm, f_rank_norm, m_rank_norm),
            self.score_decimals,
        )
    }

    pub fn classify(self, score: f64) -> CustomerSegment {
        for (threshold, segment) in self.segment_ladder {
            if score > threshold {
                return segment;
            }
        }
        self.fallback_segment
    }
}

pub const RFM_POLICY_V1: RfmPolicy = RfmPolicy {
    version: RFM_POLICY_VERSION,
    recency_weight: 0.15,
    frequency_weight: 0.28,
    monetary_weight: 0.57,
    score_scale: 0.05,
    score_decimals: 2,
    segment_ladder: [
        (3.0, CustomerSegment::Top),
        (2.5, CustomerSegment::HighValue),
        (2.0, CustomerSegment::MidValue),
        (1.0, CustomerSegment::LowValue),
    ],
    fallback_segment: CustomerSegment::Lost,
};

/// Rounds the way dataframe libraries do: scale, round half to even, unscale.
pub(crate) fn round_half_even(value: f64, decimals: u32) -> f64 {
    let exponent = i32::try_from(decimals).unwrap_or(2);
    let factor = 10_f64.powi(exponent);
    (value * factor).round_ties_even() / factor
}
