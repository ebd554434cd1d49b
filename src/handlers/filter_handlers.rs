use showroom_core::*;

use crate::state::AppState;
use crate::ui::{set_status, StatusLevel};

/// Filter selections collected from the command line
#[derive(Debug, Default, Clone)]
pub struct Selections {
    pub brands: Vec<String>,
    pub models: Vec<String>,
    pub year: Option<String>,
    pub fuel_types: Vec<String>,
    pub transmissions: Vec<String>,
    pub seats: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl Selections {
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
            && self.models.is_empty()
            && self.year.is_none()
            && self.fuel_types.is_empty()
            && self.transmissions.is_empty()
            && self.seats.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// (dimension, facet id) pairs in the order they are toggled
    fn toggles(&self) -> Vec<(FacetDimension, String)> {
        let keyed = |dimension: FacetDimension, values: &[String]| {
            values
                .iter()
                .map(move |v| (dimension, facet_key(v)))
                .collect::<Vec<_>>()
        };

        let mut toggles = keyed(FacetDimension::Brand, &self.brands);
        toggles.extend(
            self.models
                .iter()
                .map(|m| (FacetDimension::Model, m.trim().to_string())),
        );
        if let Some(year) = &self.year {
            toggles.push((FacetDimension::Year, year.trim().to_string()));
        }
        toggles.extend(keyed(FacetDimension::FuelType, &self.fuel_types));
        toggles.extend(keyed(FacetDimension::Transmission, &self.transmissions));
        toggles.extend(keyed(FacetDimension::Seats, &self.seats));
        toggles
    }
}

/// Feed selections into the engine as discrete toggle and price events
/// In compact presentation the edits land in the draft and are committed at the end
pub fn apply_selections(state: &AppState, selections: &Selections) {
    if selections.is_empty() {
        return;
    }

    let mut engine = state.engine.borrow_mut();

    for (dimension, value) in selections.toggles() {
        let known = engine
            .facets()
            .is_some_and(|facets| facets.contains(dimension, &value));
        if !known {
            set_status(
                format!("No {} matches '{}'; ignored", dimension, value),
                StatusLevel::Warning,
            );
            continue;
        }
        engine.on_facet_toggle(dimension, &value, true);
    }

    if selections.min_price.is_some() || selections.max_price.is_some() {
        let current = engine.filter_state().draft.price_range;
        let requested = PriceRange::new(
            selections.min_price.unwrap_or(current.low),
            selections.max_price.unwrap_or(current.high),
        );
        engine.on_price_range_change(requested);

        let stored = if state.is_compact() {
            engine.filter_state().draft.price_range
        } else {
            engine.filter_state().applied.price_range
        };
        if stored != requested {
            set_status(
                format!("Price range adjusted to {}", format_price_range(&stored)),
                StatusLevel::Info,
            );
        }
    }

    if state.is_compact() {
        if let Some(count) = engine.draft_match_count() {
            set_status(
                format!("Draft ready: {} vehicles would match", count),
                StatusLevel::Info,
            );
        }
        engine.commit_draft();
        set_status("Draft filters applied", StatusLevel::Success);
    }
}

/// Parse "dimension=id" removal requests
pub fn parse_removals(removals: &[String]) -> Vec<(FacetDimension, String)> {
    removals
        .iter()
        .filter_map(|raw| {
            let Some((dimension, value)) = raw.split_once('=') else {
                set_status(
                    format!("Invalid removal '{}'. Expected 'dimension=id'", raw),
                    StatusLevel::Warning,
                );
                return None;
            };
            match dimension.parse::<FacetDimension>() {
                Ok(dimension) => Some((dimension, value.trim().to_string())),
                Err(e) => {
                    set_status(e, StatusLevel::Warning);
                    None
                }
            }
        })
        .collect()
}

/// Remove active tokens, matching on dimension and id
pub fn remove_tokens(state: &AppState, removals: &[(FacetDimension, String)]) {
    let mut engine = state.engine.borrow_mut();

    for (dimension, value) in removals {
        let wanted = match dimension {
            FacetDimension::Model | FacetDimension::Year | FacetDimension::Price => value.clone(),
            _ => facet_key(value),
        };
        let token = engine
            .tokens()
            .into_iter()
            .find(|t| t.dimension == *dimension && (t.id == wanted || *dimension == FacetDimension::Price));

        match token {
            Some(token) => {
                engine.remove_token(&token);
                set_status(format!("Removed filter: {}", token.label), StatusLevel::Info);
            }
            None => {
                // model ids are not tokens of their own; fall back to direct removal
                if engine.remove_facet(*dimension, &wanted) == Change::None {
                    set_status(
                        format!("No active {} filter '{}'", dimension, value),
                        StatusLevel::Warning,
                    );
                }
            }
        }
    }
}

/// Apply sort and page requests; sort first since it resets the page
pub fn apply_sort_and_page(state: &AppState, sort: Option<SortOption>, page: Option<usize>) {
    let mut engine = state.engine.borrow_mut();
    if let Some(sort) = sort {
        engine.on_sort_change(sort);
    }
    if let Some(page) = page {
        engine.on_page_change(page);
        let landed = engine.page().page_index;
        if landed != page {
            set_status(format!("Page {} is out of range; showing page {}", page, landed), StatusLevel::Info);
        }
    }
}
