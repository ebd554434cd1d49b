use crate::criteria::FilterCriteria;
use crate::models::{LocalizedText, VehicleRecord};
use std::collections::BTreeSet;

/// Apply criteria to a list of records, returning only those that match
/// Catalog order is preserved
pub fn apply_filters<'a>(
    records: &'a [VehicleRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a VehicleRecord> {
    records
        .iter()
        .filter(|record| matches_filters(record, criteria))
        .collect()
}

/// Check if a record matches the given criteria
/// AND logic between dimensions, OR logic within a dimension
pub fn matches_filters(record: &VehicleRecord, criteria: &FilterCriteria) -> bool {
    // Price window is inclusive on both ends
    if !criteria.price_range.contains(record.cash_price) {
        return false;
    }

    // Model selection (brand checkboxes expand into model ids)
    if !criteria.selected_model_ids.is_empty() && !criteria.selected_model_ids.contains(&record.id)
    {
        return false;
    }

    // Single year, compared as text
    if let Some(year) = &criteria.year {
        if record.year_text() != Some(year.as_str()) {
            return false;
        }
    }

    matches_any(&criteria.fuel_types, &record.specs.fuel_type)
        && matches_any(&criteria.transmissions, &record.specs.transmission)
        && matches_any(&criteria.seats, &record.specs.seats)
}

/// An empty selection imposes no constraint
fn matches_any(selected: &BTreeSet<String>, value: &LocalizedText) -> bool {
    selected.is_empty() || selected.contains(&value.key())
}
