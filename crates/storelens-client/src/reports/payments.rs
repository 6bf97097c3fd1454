use std::collections::BTreeMap;

use crate::dataset::PaymentRecord;
use crate::reports::types::{PaymentMethodSummary, Tally};
use crate::rfm::policy::round_half_even;

/// Average payment value and usage count per payment type, most used first.
pub fn payment_methods(payments: &[PaymentRecord]) -> Tally<PaymentMethodSummary> {
    let mut skipped_rows = 0usize;
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for payment in payments {
        let payment_type = payment.payment_type.trim();
        if payment_type.is_empty() {
            skipped_rows += 1;
            continue;
        }
        groups
            .entry(payment_type)
            .or_default()
            .push(payment.payment_value);
    }

    let mut rows = groups
        .into_iter()
        .map(|(payment_type, mut values)| {
            values.sort_by(|left, right| left.total_cmp(right));
            let total = values.iter().sum::<f64>();
            PaymentMethodSummary {
                payment_type: payment_type.to_string(),
                average_value: round_half_even(total / values.len() as f64, 2),
                transactions: values.len(),
            }
        })
        .collect::<Vec<PaymentMethodSummary>>();
    rows.sort_by(|left, right| {
        right
            .transactions
            .cmp(&left.transactions)
            .then_with(|| left.payment_type.cmp(&right.payment_type))
    });

    Tally { rows, skipped_rows }
}
