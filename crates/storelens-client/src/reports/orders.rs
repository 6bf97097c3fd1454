use std::collections::{BTreeMap, BTreeSet};

use crate::dataset::OrderLine;
use crate::reports::tally::{count_rows, present};
use crate::reports::types::{CategoryVolumes, LabelCount, Tally};

/// Order lines per `order_status`.
pub fn order_status_distribution(lines: &[OrderLine]) -> Tally<LabelCount> {
    let statuses = lines
        .iter()
        .filter_map(|line| present(line.order_status.as_ref()))
        .collect::<Vec<&str>>();
    let skipped_rows = lines.len() - statuses.len();
    Tally {
        rows: count_rows(statuses),
        skipped_rows,
    }
}

/// Products sold per category: the `limit` best sellers and the `limit`
/// weakest, both listed largest first.
pub fn category_volumes(lines: &[OrderLine], limit: usize) -> CategoryVolumes {
    let mut skipped_rows = 0usize;
    let mut categories = Vec::with_capacity(lines.len());
    for line in lines {
        let category = present(line.product_category.as_ref());
        let product = present(line.product_id.as_ref());
        match (category, product) {
            (Some(value), Some(_)) => categories.push(value),
            _ => skipped_rows += 1,
        }
    }

    let ranked = count_rows(categories);
    let most_sold = ranked.iter().take(limit).cloned().collect();
    let least_sold = ranked[ranked.len().saturating_sub(limit)..].to_vec();
    CategoryVolumes {
        most_sold,
        least_sold,
        skipped_rows,
    }
}

/// Distinct orders per purchase month (`YYYY-MM`), oldest month first.
pub fn monthly_orders(lines: &[OrderLine]) -> Tally<LabelCount> {
    let mut months: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for line in lines {
        let month = line.order_purchase_timestamp.format("%Y-%m").to_string();
        months
            .entry(month)
            .or_default()
            .insert(line.order_id.as_str());
    }

    Tally {
        rows: months
            .into_iter()
            .map(|(label, orders)| LabelCount {
                label,
                count: orders.len(),
            })
            .collect(),
        skipped_rows: 0,
    }
}
