use crate::criteria::{is_brand_selected, FacetDimension, FilterCriteria};
use crate::facets::FacetSet;
use crate::range::{PriceRange, RangeSelector};
use crate::state::{Change, FilterStateManager};
use serde::Serialize;

/// One removable active-filter chip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFacet {
    pub id: String,
    pub dimension: FacetDimension,
    pub label: String,
}

/// Tokens for every active restriction in applied criteria
///
/// Order: price, brands (facet order, one token per brand), year, fuel
/// types, transmissions, seats. Ids missing from the facet set keep their
/// id as label.
pub fn selected_facets(
    applied: &FilterCriteria,
    facets: &FacetSet,
    range: &RangeSelector,
) -> Vec<SelectedFacet> {
    let mut tokens = Vec::new();

    if !range.is_full(&applied.price_range) {
        tokens.push(SelectedFacet {
            id: "price".to_string(),
            dimension: FacetDimension::Price,
            label: format_price_range(&applied.price_range),
        });
    }

    tokens.extend(brand_tokens(applied, facets));

    if let Some(year) = &applied.year {
        tokens.push(token(facets, FacetDimension::Year, year));
    }

    for (dimension, values) in [
        (FacetDimension::FuelType, &applied.fuel_types),
        (FacetDimension::Transmission, &applied.transmissions),
        (FacetDimension::Seats, &applied.seats),
    ] {
        tokens.extend(values.iter().map(|id| token(facets, dimension, id)));
    }

    tokens
}

fn token(facets: &FacetSet, dimension: FacetDimension, id: &str) -> SelectedFacet {
    SelectedFacet {
        id: id.to_string(),
        dimension,
        label: facets.label(dimension, id).unwrap_or(id).to_string(),
    }
}

/// Group selected model ids by owning brand
/// A fully selected brand reads as its name, a partial one lists its models
fn brand_tokens(applied: &FilterCriteria, facets: &FacetSet) -> Vec<SelectedFacet> {
    facets
        .brands
        .iter()
        .filter_map(|brand| {
            let chosen: Vec<&str> = facets
                .models_of(&brand.id)
                .iter()
                .filter(|m| applied.selected_model_ids.contains(&m.id))
                .map(|m| m.name.as_str())
                .collect();
            if chosen.is_empty() {
                return None;
            }

            let label = if is_brand_selected(applied, facets, &brand.id) {
                brand.label.clone()
            } else {
                format!("{}: {}", brand.label, chosen.join(", "))
            };
            Some(SelectedFacet {
                id: brand.id.clone(),
                dimension: FacetDimension::Brand,
                label,
            })
        })
        .collect()
}

/// Remove the restriction a token stands for
pub fn remove_one(
    manager: &mut FilterStateManager,
    token: &SelectedFacet,
    facets: &FacetSet,
    range: &RangeSelector,
) -> Change {
    manager.remove_facet(token.dimension, &token.id, Some(facets), range)
}

/// "40,000 - 100,000"
pub fn format_price_range(range: &PriceRange) -> String {
    format!("{} - {}", format_amount(range.low), format_amount(range.high))
}

/// Whole-unit amount with thousands separators
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::facets::extract_facets;
    use crate::models::Locale;
    use serde_json::json;

    fn range() -> RangeSelector {
        RangeSelector::new(40_000.0, 250_000.0, 10_000.0)
    }

    fn facets() -> FacetSet {
        let store = CatalogStore::from_raw(vec![
            json!({"id": "toyota-a", "brand": "Toyota", "model": "Camry", "year": 2023,
                   "cashPrice": 50000, "specs": {"fuelType": "Petrol", "seats": "5 Seats"}}),
            json!({"id": "toyota-b", "brand": "Toyota", "model": "Corolla", "year": 2021,
                   "cashPrice": 90000, "specs": {"fuelType": "Diesel"}}),
            json!({"id": "honda-c", "brand": "Honda", "model": "Civic", "year": 2023,
                   "cashPrice": 200000, "specs": {"fuelType": "Petrol"}}),
        ]);
        extract_facets(store.records(), &Locale::default())
    }

    #[test]
    fn test_no_tokens_for_defaults() {
        let criteria = FilterCriteria::defaults(&range());
        assert!(selected_facets(&criteria, &facets(), &range()).is_empty());
    }

    #[test]
    fn test_tokens_in_order_with_brand_grouping() {
        let f = facets();
        let mut c = FilterCriteria::defaults(&range());
        c.price_range = PriceRange::new(40_000.0, 100_000.0);
        c.selected_model_ids.extend(["toyota-a".to_string(), "toyota-b".to_string(), "honda-c".to_string()]);
        c.year = Some("2023".into());
        c.fuel_types.insert("petrol".into());
        c.seats.insert("5-seats".into());

        let tokens = selected_facets(&c, &f, &range());
        let summary: Vec<(FacetDimension, &str, &str)> = tokens
            .iter()
            .map(|t| (t.dimension, t.id.as_str(), t.label.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (FacetDimension::Price, "price", "40,000 - 100,000"),
                (FacetDimension::Brand, "toyota", "Toyota"),
                (FacetDimension::Brand, "honda", "Honda"),
                (FacetDimension::Year, "2023", "2023"),
                (FacetDimension::FuelType, "petrol", "Petrol"),
                (FacetDimension::Seats, "5-seats", "5 Seats"),
            ]
        );
    }

    #[test]
    fn test_partial_brand_lists_models() {
        let f = facets();
        let mut c = FilterCriteria::defaults(&range());
        c.selected_model_ids.insert("toyota-b".into());
        let tokens = selected_facets(&c, &f, &range());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].label, "Toyota: Corolla");
    }

    #[test]
    fn test_remove_one_round_trips_through_manager() {
        let f = facets();
        let mut manager = FilterStateManager::new(FilterCriteria::defaults(&range()));
        for id in ["toyota-a", "toyota-b", "honda-c"] {
            manager.on_facet_toggle(FacetDimension::Model, id, true, Some(&f));
        }
        manager.on_facet_toggle(FacetDimension::FuelType, "petrol", true, Some(&f));

        let tokens = selected_facets(manager.applied(), &f, &range());
        let toyota = tokens.iter().find(|t| t.id == "toyota").unwrap();
        assert_eq!(remove_one(&mut manager, toyota, &f, &range()), Change::Applied);

        let remaining: Vec<String> = selected_facets(manager.applied(), &f, &range())
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(remaining, vec!["honda", "petrol"]);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1_000.0), "1,000");
        assert_eq!(format_amount(250_000.4), "250,000");
        assert_eq!(format_amount(-1_234_567.0), "-1,234,567");
    }
}
