use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::dataset::OrderLine;

/// Raw per-customer triple before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerAggregate {
    pub customer_unique_id: String,
    pub last_purchase_at: NaiveDateTime,
    pub frequency: usize,
    pub monetary: f64,
}

#[derive(Debug)]
struct Accumulator<'a> {
    last_purchase_at: NaiveDateTime,
    order_ids: BTreeSet<&'a str>,
    line_totals: Vec<f64>,
}

/// Latest purchase day across the whole dataset, not per customer.
pub fn reference_date(lines: &[OrderLine]) -> Option<NaiveDate> {
    lines
        .iter()
        .map(|line| line.order_purchase_timestamp)
        .max()
        .map(|timestamp| timestamp.date())
}

/// Whole days between the reference day and the customer's last purchase
/// day. Both sides are truncated to the day first.
pub fn recency_days(reference_date: NaiveDate, last_purchase_at: NaiveDateTime) -> i64 {
    (reference_date - last_purchase_at.date()).num_days()
}

/// Groups order lines by customer, ordered by `customer_unique_id`.
pub fn aggregate_customers(lines: &[OrderLine]) -> Vec<CustomerAggregate> {
    let mut groups: BTreeMap<&str, Accumulator<'_>> = BTreeMap::new();
    for line in lines {
        let entry = groups
            .entry(line.customer_unique_id.as_str())
            .or_insert_with(|| Accumulator {
                last_purchase_at: line.order_purchase_timestamp,
                order_ids: BTreeSet::new(),
                line_totals: Vec::new(),
            });
        entry.last_purchase_at = entry.last_purchase_at.max(line.order_purchase_timestamp);
        entry.order_ids.insert(line.order_id.as_str());
        entry.line_totals.push(line.line_total());
    }

    groups
        .into_iter()
        .map(|(customer_unique_id, mut accumulator)| CustomerAggregate {
            customer_unique_id: customer_unique_id.to_string(),
            last_purchase_at: accumulator.last_purchase_at,
            frequency: accumulator.order_ids.len(),
            monetary: canonical_sum(&mut accumulator.line_totals),
        })
        .collect()
}

// Summing in sorted order keeps the float result independent of row order,
// which keeps monetary ties (and therefore ranks) stable under permutation.
fn canonical_sum(values: &mut [f64]) -> f64 {
    values.sort_by(|left, right| left.total_cmp(right));
    values.iter().sum()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{aggregate_customers, recency_days, reference_date};
    use crate::dataset::OrderLine;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap_or_default()
    }

    fn line(customer: &str, order: &str, timestamp: &str, price: f64, quantity: f64) -> OrderLine {
        OrderLine::new(customer, order, at(timestamp), price, quantity)
    }

    #[test]
    fn reference_date_is_the_global_max_truncated_to_the_day() {
        let lines = vec![
            line("a", "o1", "2018-08-01 09:00:00", 1.0, 1.0),
            line("b", "o2", "2018-08-29 15:00:37", 1.0, 1.0),
            line("c", "o3", "2018-03-10 23:59:59", 1.0, 1.0),
        ];
        assert_eq!(reference_date(&lines), NaiveDate::from_ymd_opt(2018, 8, 29));
        assert_eq!(reference_date(&[]), None);
    }

    #[test]
    fn same_day_purchase_has_zero_recency_regardless_of_time() {
        let reference = NaiveDate::from_ymd_opt(2018, 8, 29);
        assert!(reference.is_some());
        if let Some(day) = reference {
            assert_eq!(recency_days(day, at("2018-08-29 00:00:01")), 0);
            assert_eq!(recency_days(day, at("2018-08-28 23:59:59")), 1);
            assert_eq!(recency_days(day, at("2017-08-29 12:00:00")), 365);
        }
    }

    #[test]
    fn frequency_counts_distinct_orders_not_lines() {
        let lines = vec![
            line("a", "o1", "2018-01-01 10:00:00", 10.0, 1.0),
            line("a", "o1", "2018-01-01 10:00:00", 5.0, 2.0),
            line("a", "o2", "2018-02-01 10:00:00", 1.5, 4.0),
            line("b", "o3", "2018-01-15 10:00:00", 20.0, 1.0),
        ];
        let customers = aggregate_customers(&lines);
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].customer_unique_id, "a");
        assert_eq!(customers[0].frequency, 2);
        assert_eq!(customers[0].monetary, 26.0);
        assert_eq!(customers[0].last_purchase_at, at("2018-02-01 10:00:00"));
        assert_eq!(customers[1].customer_unique_id, "b");
        assert_eq!(customers[1].frequency, 1);
        assert_eq!(customers[1].monetary, 20.0);
    }

    #[test]
    fn monetary_sum_does_not_depend_on_row_order() {
        let amounts = [0.1, 0.2, 0.3, 1e16, -0.0, 7.77];
        let forward = amounts
            .iter()
            .enumerate()
            .map(|(index, price)| {
                line("a", &format!("o{index}"), "2018-01-01 00:00:00", *price, 1.0)
            })
            .collect::<Vec<OrderLine>>();
        let mut backward = forward.clone();
        backward.reverse();

        let left = aggregate_customers(&forward);
        let right = aggregate_customers(&backward);
        assert_eq!(left[0].monetary.to_bits(), right[0].monetary.to_bits());
    }
}
