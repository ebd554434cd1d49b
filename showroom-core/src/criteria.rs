use crate::facets::FacetSet;
use crate::range::{PriceRange, RangeSelector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// An independently filterable dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacetDimension {
    Price,
    /// Pseudo-dimension over `selected_model_ids`, grouped by owning brand
    Brand,
    Model,
    Year,
    FuelType,
    Transmission,
    Seats,
}

impl FacetDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetDimension::Price => "price",
            FacetDimension::Brand => "brand",
            FacetDimension::Model => "model",
            FacetDimension::Year => "year",
            FacetDimension::FuelType => "fuel-type",
            FacetDimension::Transmission => "transmission",
            FacetDimension::Seats => "seats",
        }
    }
}

impl fmt::Display for FacetDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(FacetDimension::Price),
            "brand" => Ok(FacetDimension::Brand),
            "model" => Ok(FacetDimension::Model),
            "year" => Ok(FacetDimension::Year),
            "fuel" | "fuel-type" | "fuel_type" => Ok(FacetDimension::FuelType),
            "transmission" => Ok(FacetDimension::Transmission),
            "seats" => Ok(FacetDimension::Seats),
            other => Err(format!("unknown facet dimension '{}'", other)),
        }
    }
}

/// Filter selections; all sets hold stable facet ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub price_range: PriceRange,
    pub selected_model_ids: BTreeSet<String>,
    pub year: Option<String>,
    pub fuel_types: BTreeSet<String>,
    pub transmissions: BTreeSet<String>,
    pub seats: BTreeSet<String>,
}

impl FilterCriteria {
    /// Documented defaults: full price domain, empty sets, no year
    pub fn defaults(range: &RangeSelector) -> Self {
        Self {
            price_range: range.full(),
            selected_model_ids: BTreeSet::new(),
            year: None,
            fuel_types: BTreeSet::new(),
            transmissions: BTreeSet::new(),
            seats: BTreeSet::new(),
        }
    }

    /// Mutable set for a multi-valued dimension
    pub fn values_mut(&mut self, dimension: FacetDimension) -> Option<&mut BTreeSet<String>> {
        match dimension {
            FacetDimension::Model => Some(&mut self.selected_model_ids),
            FacetDimension::FuelType => Some(&mut self.fuel_types),
            FacetDimension::Transmission => Some(&mut self.transmissions),
            FacetDimension::Seats => Some(&mut self.seats),
            FacetDimension::Price | FacetDimension::Brand | FacetDimension::Year => None,
        }
    }

    /// Whether any restriction narrower than the defaults is active
    pub fn is_restricted(&self, range: &RangeSelector) -> bool {
        !range.is_full(&self.price_range)
            || !self.selected_model_ids.is_empty()
            || self.year.is_some()
            || !self.fuel_types.is_empty()
            || !self.transmissions.is_empty()
            || !self.seats.is_empty()
    }

    /// Drop ids that no longer exist in the facet set
    /// Returns true when anything was removed
    pub fn prune_unknown(&mut self, facets: &FacetSet) -> bool {
        let before = self.clone();
        self.selected_model_ids
            .retain(|id| facets.contains(FacetDimension::Model, id));
        self.fuel_types
            .retain(|id| facets.contains(FacetDimension::FuelType, id));
        self.transmissions
            .retain(|id| facets.contains(FacetDimension::Transmission, id));
        self.seats.retain(|id| facets.contains(FacetDimension::Seats, id));
        if let Some(year) = &self.year {
            if !facets.contains(FacetDimension::Year, year) {
                self.year = None;
            }
        }
        *self != before
    }
}

/// A brand reads as selected iff every one of its model ids is selected
/// Derived on demand, never stored
pub fn is_brand_selected(criteria: &FilterCriteria, facets: &FacetSet, brand_id: &str) -> bool {
    let models = facets.models_of(brand_id);
    !models.is_empty()
        && models
            .iter()
            .all(|m| criteria.selected_model_ids.contains(&m.id))
}

/// Some but not all of a brand's models are selected
pub fn is_brand_partially_selected(
    criteria: &FilterCriteria,
    facets: &FacetSet,
    brand_id: &str,
) -> bool {
    let models = facets.models_of(brand_id);
    let selected = models
        .iter()
        .filter(|m| criteria.selected_model_ids.contains(&m.id))
        .count();
    selected > 0 && selected < models.len()
}

/// Add every model id of a brand not yet present
pub fn select_brand(criteria: &mut FilterCriteria, facets: &FacetSet, brand_id: &str) {
    for model in facets.models_of(brand_id) {
        criteria.selected_model_ids.insert(model.id.clone());
    }
}

/// Remove exactly that brand's model ids; returns how many were removed
pub fn deselect_brand(criteria: &mut FilterCriteria, facets: &FacetSet, brand_id: &str) -> usize {
    facets
        .models_of(brand_id)
        .iter()
        .filter(|m| criteria.selected_model_ids.remove(&m.id))
        .count()
}
