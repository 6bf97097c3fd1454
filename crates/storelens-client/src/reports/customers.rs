use crate::dataset::OrderLine;
use crate::reports::tally::{count_distinct, present, truncate_to};
use crate::reports::types::{LabelCount, Tally};

/// Unique customers per city, largest first.
///
/// Cities are keyed on the per-order `customer_id` when the export carries
/// it, falling back to `customer_unique_id`.
pub fn customers_by_city(lines: &[OrderLine], limit: Option<usize>) -> Tally<LabelCount> {
    let mut skipped_rows = 0usize;
    let mut pairs = Vec::with_capacity(lines.len());
    for line in lines {
        let Some(city) = present(line.customer_city.as_ref()) else {
            skipped_rows += 1;
            continue;
        };
        let customer = present(line.customer_id.as_ref()).unwrap_or(&line.customer_unique_id);
        pairs.push((city, customer));
    }

    let mut rows = count_distinct(pairs);
    truncate_to(&mut rows, limit);
    Tally { rows, skipped_rows }
}

/// Unique customers per state, every state.
pub fn customers_by_state(lines: &[OrderLine]) -> Tally<LabelCount> {
    let mut skipped_rows = 0usize;
    let mut pairs = Vec::with_capacity(lines.len());
    for line in lines {
        match present(line.customer_state.as_ref()) {
            Some(state) => pairs.push((state, line.customer_unique_id.as_str())),
            None => skipped_rows += 1,
        }
    }

    Tally {
        rows: count_distinct(pairs),
        skipped_rows,
    }
}
