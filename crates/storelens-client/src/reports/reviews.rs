use std::collections::BTreeMap;

use crate::dataset::OrderLine;
use crate::reports::tally::present;
use crate::reports::types::{CategoryReviewScore, Tally};
use crate::rfm::policy::round_half_even;

/// Mean review score per product category, best rated first.
///
/// Lines without a category or without a score are skipped.
pub fn review_scores_by_category(
    lines: &[OrderLine],
    limit: Option<usize>,
) -> Tally<CategoryReviewScore> {
    let mut skipped_rows = 0usize;
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for line in lines {
        match (present(line.product_category.as_ref()), line.review_score) {
            (Some(category), Some(score)) => groups.entry(category).or_default().push(score),
            _ => skipped_rows += 1,
        }
    }

    let mut rows = groups
        .into_iter()
        .map(|(category, mut scores)| {
            scores.sort_by(|left, right| left.total_cmp(right));
            let total = scores.iter().sum::<f64>();
            CategoryReviewScore {
                category: category.to_string(),
                average_score: round_half_even(total / scores.len() as f64, 4),
                reviews: scores.len(),
            }
        })
        .collect::<Vec<CategoryReviewScore>>();
    rows.sort_by(|left, right| {
        right
            .average_score
            .total_cmp(&left.average_score)
            .then_with(|| left.category.cmp(&right.category))
    });
    if let Some(value) = limit {
        rows.truncate(value);
    }

    Tally { rows, skipped_rows }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::review_scores_by_category;
    use crate::dataset::OrderLine;

    fn reviewed(category: Option<&str>, score: Option<f64>) -> OrderLine {
        let mut line = OrderLine::new("u1", "o1", NaiveDateTime::default(), 1.0, 1.0);
        line.product_category = category.map(str::to_string);
        line.review_score = score;
        line
    }

    #[test]
    fn averages_scores_and_orders_best_first() {
        let lines = vec![
            reviewed(Some("cds_dvds_musicals"), Some(5.0)),
            reviewed(Some("cds_dvds_musicals"), Some(4.0)),
            reviewed(Some("cds_dvds_musicals"), Some(5.0)),
            reviewed(Some("office_furniture"), Some(3.0)),
            reviewed(Some("books_technical"), Some(4.5)),
            reviewed(Some("books_technical"), None),
            reviewed(None, Some(1.0)),
        ];

        let tally = review_scores_by_category(&lines, None);
        assert_eq!(tally.skipped_rows, 2);
        assert_eq!(tally.rows[0].category, "cds_dvds_musicals");
        assert_eq!(tally.rows[0].average_score, 4.6667);
        assert_eq!(tally.rows[0].reviews, 3);
        assert_eq!(tally.rows[1].category, "books_technical");
        assert_eq!(tally.rows[2].category, "office_furniture");

        let limited = review_scores_by_category(&lines, Some(1));
        assert_eq!(limited.rows.len(), 1);
    }
}
