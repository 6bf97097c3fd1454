use std::collections::{BTreeMap, BTreeSet};

use crate::reports::types::LabelCount;

/// Trimmed, non-empty view of an optional attribute.
pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed)
}

/// Row count per label.
pub(crate) fn count_rows<'a, I>(labels: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    into_sorted_rows(counts)
}

/// Distinct member count per label, e.g. unique customers per city.
pub(crate) fn count_distinct<'a, I>(pairs: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut members: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (label, member) in pairs {
        members.entry(label).or_default().insert(member);
    }
    into_sorted_rows(
        members
            .into_iter()
            .map(|(label, set)| (label, set.len()))
            .collect(),
    )
}

pub(crate) fn truncate_to(rows: &mut Vec<LabelCount>, limit: Option<usize>) {
    if let Some(value) = limit {
        rows.truncate(value);
    }
}

fn into_sorted_rows(counts: BTreeMap<&str, usize>) -> Vec<LabelCount> {
    let mut rows = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect::<Vec<LabelCount>>();
    rows.sort_by(|left, right| {
        right
            .count
            .cmp(&left.count)
            .then_with(|| left.label.cmp(&right.label))
    });
    rows
}
