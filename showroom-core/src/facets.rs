use crate::catalog::CatalogStore;
use crate::criteria::FacetDimension;
use crate::models::{LocalizedText, Locale, VehicleRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// One selectable facet value: stable id plus localized label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub id: String,
    pub label: String,
}

/// A model entry under its owning brand; the id is the record id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub id: String,
    pub name: String,
}

/// Facet values available in a catalog
/// Every value is traceable to at least one record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetSet {
    pub brands: Vec<FacetOption>,
    pub models_by_brand: BTreeMap<String, Vec<ModelOption>>,
    pub years: Vec<String>,
    pub fuel_types: Vec<FacetOption>,
    pub transmissions: Vec<FacetOption>,
    pub seat_options: Vec<FacetOption>,
}

impl FacetSet {
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
            && self.years.is_empty()
            && self.fuel_types.is_empty()
            && self.transmissions.is_empty()
            && self.seat_options.is_empty()
    }

    /// Model options belonging to a brand, empty for an unknown brand
    pub fn models_of(&self, brand_id: &str) -> &[ModelOption] {
        self.models_by_brand
            .get(brand_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Owning brand of a model id
    pub fn brand_of(&self, model_id: &str) -> Option<&str> {
        self.models_by_brand
            .iter()
            .find(|(_, models)| models.iter().any(|m| m.id == model_id))
            .map(|(brand, _)| brand.as_str())
    }

    pub fn model(&self, model_id: &str) -> Option<&ModelOption> {
        self.models_by_brand
            .values()
            .flat_map(|models| models.iter())
            .find(|m| m.id == model_id)
    }

    pub fn brand(&self, brand_id: &str) -> Option<&FacetOption> {
        self.brands.iter().find(|b| b.id == brand_id)
    }

    fn options(&self, dimension: FacetDimension) -> Option<&[FacetOption]> {
        match dimension {
            FacetDimension::Brand => Some(self.brands.as_slice()),
            FacetDimension::FuelType => Some(self.fuel_types.as_slice()),
            FacetDimension::Transmission => Some(self.transmissions.as_slice()),
            FacetDimension::Seats => Some(self.seat_options.as_slice()),
            FacetDimension::Model | FacetDimension::Year | FacetDimension::Price => None,
        }
    }

    /// Whether a value id exists for a dimension
    /// Price has no discrete values and always reports true
    pub fn contains(&self, dimension: FacetDimension, value_id: &str) -> bool {
        match dimension {
            FacetDimension::Model => self.model(value_id).is_some(),
            FacetDimension::Year => self.years.iter().any(|y| y == value_id),
            FacetDimension::Price => true,
            _ => self
                .options(dimension)
                .is_some_and(|opts| opts.iter().any(|o| o.id == value_id)),
        }
    }

    /// Display label for a value id, if the value exists
    pub fn label(&self, dimension: FacetDimension, value_id: &str) -> Option<&str> {
        match dimension {
            FacetDimension::Model => self.model(value_id).map(|m| m.name.as_str()),
            FacetDimension::Year => self.years.iter().find(|y| *y == value_id).map(String::as_str),
            FacetDimension::Price => None,
            _ => self
                .options(dimension)?
                .iter()
                .find(|o| o.id == value_id)
                .map(|o| o.label.as_str()),
        }
    }
}

/// Unique brands in first-occurrence order
pub fn extract_brands(records: &[VehicleRecord], locale: &Locale) -> Vec<FacetOption> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.brand.as_ref())
        .filter(|b| !b.id.is_empty() && seen.insert(b.id.clone()))
        .map(|b| FacetOption {
            id: b.id.clone(),
            label: label_or_id(&b.name, &b.id, locale),
        })
        .collect()
}

/// Models grouped under their owning brand, in catalog order
pub fn models_by_brand(
    records: &[VehicleRecord],
    locale: &Locale,
) -> BTreeMap<String, Vec<ModelOption>> {
    let mut grouped: BTreeMap<String, Vec<ModelOption>> = BTreeMap::new();
    for record in records {
        if let Some(brand_id) = record.brand_id().filter(|id| !id.is_empty()) {
            grouped
                .entry(brand_id.to_string())
                .or_default()
                .push(ModelOption {
                    id: record.id.clone(),
                    name: record.model_label(locale),
                });
        }
    }
    grouped
}

/// Unique non-empty years, newest first
/// Unparsable years sort after numeric ones
pub fn extract_years(records: &[VehicleRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut years: Vec<String> = records
        .iter()
        .filter_map(|r| r.year_text())
        .filter(|y| seen.insert(y.to_string()))
        .map(str::to_string)
        .collect();

    years.sort_by(|a, b| {
        let a_num = a.parse::<i64>().ok();
        let b_num = b.parse::<i64>().ok();
        match (a_num, b_num) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    });
    years
}

pub fn extract_fuel_types(records: &[VehicleRecord], locale: &Locale) -> Vec<FacetOption> {
    unique_options(records.iter().map(|r| &r.specs.fuel_type), locale)
}

pub fn extract_transmissions(records: &[VehicleRecord], locale: &Locale) -> Vec<FacetOption> {
    unique_options(records.iter().map(|r| &r.specs.transmission), locale)
}

pub fn extract_seats(records: &[VehicleRecord], locale: &Locale) -> Vec<FacetOption> {
    unique_options(records.iter().map(|r| &r.specs.seats), locale)
}

fn unique_options<'a>(
    values: impl Iterator<Item = &'a LocalizedText>,
    locale: &Locale,
) -> Vec<FacetOption> {
    let mut seen = HashSet::new();
    values
        .filter_map(|text| {
            let id = text.key();
            if id.is_empty() || !seen.insert(id.clone()) {
                return None;
            }
            let label = label_or_id(text, &id, locale);
            Some(FacetOption { id, label })
        })
        .collect()
}

fn label_or_id(text: &LocalizedText, id: &str, locale: &Locale) -> String {
    let label = text.resolve(locale);
    if label.is_empty() {
        id.to_string()
    } else {
        label.to_string()
    }
}

/// Derive every facet from the catalog for one display locale
pub fn extract_facets(records: &[VehicleRecord], locale: &Locale) -> FacetSet {
    FacetSet {
        brands: extract_brands(records, locale),
        models_by_brand: models_by_brand(records, locale),
        years: extract_years(records),
        fuel_types: extract_fuel_types(records, locale),
        transmissions: extract_transmissions(records, locale),
        seat_options: extract_seats(records, locale),
    }
}

/// Memoizes the facet set by catalog identity and locale
#[derive(Debug, Default)]
pub struct FacetCache {
    entry: Option<CachedFacets>,
}

#[derive(Debug)]
struct CachedFacets {
    catalog: CatalogStore,
    locale: Locale,
    facets: Arc<FacetSet>,
}

impl FacetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Facets for the catalog, recomputed only when the catalog handle or locale changes
    pub fn get(&mut self, catalog: &CatalogStore, locale: &Locale) -> Arc<FacetSet> {
        if let Some(cached) = &self.entry {
            if cached.catalog.same_catalog(catalog) && cached.locale == *locale {
                return Arc::clone(&cached.facets);
            }
        }

        tracing::debug!(records = catalog.len(), %locale, "extracting facets");
        let facets = Arc::new(extract_facets(catalog.records(), locale));
        self.entry = Some(CachedFacets {
            catalog: catalog.clone(),
            locale: locale.clone(),
            facets: Arc::clone(&facets),
        });
        facets
    }
}
