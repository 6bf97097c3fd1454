use crate::dataset::GeolocationRecord;
use crate::reports::tally::count_rows;
use crate::reports::types::{LabelCount, Tally};

/// ZIP-code rows per city inside one state. State matching ignores case.
pub fn zip_codes_by_city(records: &[GeolocationRecord], state: &str) -> Tally<LabelCount> {
    let wanted = state.trim();
    let mut skipped_rows = 0usize;
    let mut cities = Vec::new();
    for record in records {
        if !record.state.trim().eq_ignore_ascii_case(wanted) {
            continue;
        }
        let city = record.city.trim();
        if city.is_empty() {
            skipped_rows += 1;
            continue;
        }
        cities.push(city);
    }

    Tally {
        rows: count_rows(cities),
        skipped_rows,
    }
}
