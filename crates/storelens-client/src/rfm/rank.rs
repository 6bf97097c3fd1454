#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Smallest value gets rank 1.
    Ascending,
    /// Largest value gets rank 1.
    Descending,
}

/// Average ranks (1-based) in input order.
///
/// Indices are stable-sorted by value, then every contiguous run of equal
/// values receives the mean of the positions it spans, so a tie at
/// positions 5 and 6 yields 5.5 for both.
pub fn average_ranks(values: &[f64], order: RankOrder) -> Vec<f64> {
    let mut indices = (0..values.len()).collect::<Vec<usize>>();
    indices.sort_by(|left, right| {
        let ordering = values[*left].total_cmp(&values[*right]);
        match order {
            RankOrder::Ascending => ordering,
            RankOrder::Descending => ordering.reverse(),
        }
    });

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0usize;
    while start < indices.len() {
        let run_value = values[indices[start]];
        let mut end = start + 1;
        while end < indices.len() && values[indices[end]] == run_value {
            end += 1;
        }

        let average = (start + 1 + end) as f64 / 2.0;
        for index in &indices[start..end] {
            ranks[*index] = average;
        }
        start = end;
    }

    ranks
}

/// Rescales ranks to percentiles of the largest rank present.
pub fn percentile_normalize(ranks: &[f64]) -> Vec<f64> {
    let max_rank = ranks.iter().copied().fold(0.0_f64, f64::max);
    if max_rank <= 0.0 {
        return vec![0.0; ranks.len()];
    }
    ranks.iter().map(|rank| rank / max_rank * 100.0).collect()
}
