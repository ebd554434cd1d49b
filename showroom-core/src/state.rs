//! Applied and draft filter criteria.
//!
//! The spacious presentation edits `applied` directly. The compact
//! presentation batches edits in `draft` and publishes them with
//! [`FilterStateManager::commit_draft`]. Outside draft mode the draft mirrors
//! the applied criteria.

use crate::criteria::{deselect_brand, is_brand_selected, select_brand, FacetDimension, FilterCriteria};
use crate::error::EngineIssue;
use crate::facets::FacetSet;
use crate::range::{PriceRange, RangeSelector};
use serde::Serialize;

/// Snapshot of both criteria buffers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub applied: FilterCriteria,
    pub draft: FilterCriteria,
    pub is_draft_mode: bool,
}

/// Which buffer an event changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The event was a no-op
    None,
    /// Only the draft buffer changed; results are unaffected
    Draft,
    /// Applied criteria changed; results must be recomputed from page 1
    Applied,
}

impl Change {
    pub fn touches_applied(&self) -> bool {
        matches!(self, Change::Applied)
    }
}

#[derive(Debug, Clone)]
pub struct FilterStateManager {
    state: FilterState,
}

impl FilterStateManager {
    pub fn new(defaults: FilterCriteria) -> Self {
        Self {
            state: FilterState {
                applied: defaults.clone(),
                draft: defaults,
                is_draft_mode: false,
            },
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn applied(&self) -> &FilterCriteria {
        &self.state.applied
    }

    pub fn draft(&self) -> &FilterCriteria {
        &self.state.draft
    }

    pub fn is_draft_mode(&self) -> bool {
        self.state.is_draft_mode
    }

    /// Criteria the user is currently editing
    pub fn active(&self) -> &FilterCriteria {
        if self.state.is_draft_mode {
            &self.state.draft
        } else {
            &self.state.applied
        }
    }

    fn active_mut(&mut self) -> (&mut FilterCriteria, Change) {
        if self.state.is_draft_mode {
            (&mut self.state.draft, Change::Draft)
        } else {
            (&mut self.state.applied, Change::Applied)
        }
    }

    /// Keep the draft mirroring applied outside draft mode
    fn sync_draft(&mut self) {
        if !self.state.is_draft_mode {
            self.state.draft = self.state.applied.clone();
        }
    }

    /// Enter draft mode, seeding the draft from applied
    pub fn enter_draft_mode(&mut self) {
        self.state.draft = self.state.applied.clone();
        self.state.is_draft_mode = true;
        tracing::debug!("entered draft mode");
    }

    /// Leave draft mode; uncommitted draft edits are dropped
    pub fn leave_draft_mode(&mut self) {
        self.state.is_draft_mode = false;
        self.sync_draft();
        tracing::debug!("left draft mode");
    }

    /// Toggle one facet value in the active buffer
    ///
    /// `facets` is `None` while the catalog is still loading; values are then
    /// accepted unchecked and reconciled once the catalog resolves.
    pub fn on_facet_toggle(
        &mut self,
        dimension: FacetDimension,
        value: &str,
        checked: bool,
        facets: Option<&FacetSet>,
    ) -> Change {
        if let Some(facets) = facets {
            if dimension == FacetDimension::Price || !facets.contains(dimension, value) {
                let issue = EngineIssue::UnknownFacetValue {
                    dimension: dimension.to_string(),
                    value: value.to_string(),
                };
                tracing::debug!(%issue, "ignoring facet toggle");
                return Change::None;
            }
        } else if dimension == FacetDimension::Price || dimension == FacetDimension::Brand {
            // price has no discrete values; brand expansion needs the catalog
            return Change::None;
        }

        let (criteria, change) = self.active_mut();
        let before = criteria.clone();

        match dimension {
            FacetDimension::Brand => {
                if let Some(facets) = facets {
                    if checked {
                        select_brand(criteria, facets, value);
                    } else {
                        deselect_brand(criteria, facets, value);
                    }
                }
            }
            FacetDimension::Year => {
                let already = criteria.year.as_deref() == Some(value);
                if already {
                    criteria.year = None;
                } else if checked {
                    criteria.year = Some(value.to_string());
                }
            }
            _ => {
                if let Some(values) = criteria.values_mut(dimension) {
                    if checked {
                        values.insert(value.to_string());
                    } else {
                        values.remove(value);
                    }
                }
            }
        }

        if *criteria == before {
            return Change::None;
        }
        self.sync_draft();
        tracing::debug!(%dimension, value, checked, "facet toggled");
        change
    }

    /// Store a new price range in the active buffer after validation
    pub fn on_price_range_change(&mut self, new_range: PriceRange, range: &RangeSelector) -> Change {
        let corrected = range.set_range(new_range.low, new_range.high);
        let (criteria, change) = self.active_mut();
        if criteria.price_range == corrected {
            return Change::None;
        }
        criteria.price_range = corrected;
        self.sync_draft();
        change
    }

    /// Store a price range requested before the price domain is known
    ///
    /// The range is kept as requested and validated by [`Self::reconcile`]
    /// once the catalog resolves.
    pub fn on_pending_price_range(&mut self, new_range: PriceRange) -> Change {
        let (criteria, change) = self.active_mut();
        if criteria.price_range == new_range {
            return Change::None;
        }
        criteria.price_range = new_range;
        self.sync_draft();
        tracing::debug!(low = new_range.low, high = new_range.high, "price range held until catalog loads");
        change
    }

    /// Replace applied with a full snapshot of the draft
    pub fn commit_draft(&mut self) -> Change {
        if !self.state.is_draft_mode {
            return Change::None;
        }
        let snapshot = self.state.draft.clone();
        let changed = snapshot != self.state.applied;
        self.state.applied = snapshot;
        tracing::debug!(changed, "draft committed");
        if changed {
            Change::Applied
        } else {
            Change::None
        }
    }

    /// Reseed the draft from applied, dropping uncommitted edits
    pub fn discard_draft(&mut self) -> Change {
        if self.state.draft == self.state.applied {
            return Change::None;
        }
        self.state.draft = self.state.applied.clone();
        tracing::debug!("draft discarded");
        Change::Draft
    }

    /// Reset both buffers to the defaults
    pub fn reset_all(&mut self, defaults: FilterCriteria) -> Change {
        let changed = self.state.applied != defaults;
        self.state.applied = defaults.clone();
        self.state.draft = defaults;
        tracing::debug!("filters reset");
        if changed {
            Change::Applied
        } else {
            Change::Draft
        }
    }

    /// Remove one value from applied criteria
    ///
    /// Removing a brand removes every model id owned by it. Removing price
    /// restores the full domain. In draft mode the same value is removed from
    /// the draft too, so a later commit cannot bring it back.
    pub fn remove_facet(
        &mut self,
        dimension: FacetDimension,
        value_id: &str,
        facets: Option<&FacetSet>,
        range: &RangeSelector,
    ) -> Change {
        let applied_changed =
            remove_value(&mut self.state.applied, dimension, value_id, facets, range);
        let draft_changed = if self.state.is_draft_mode {
            remove_value(&mut self.state.draft, dimension, value_id, facets, range)
        } else {
            self.sync_draft();
            false
        };

        if applied_changed {
            tracing::debug!(%dimension, value_id, "facet removed");
            Change::Applied
        } else if draft_changed {
            Change::Draft
        } else {
            Change::None
        }
    }

    /// Reconcile both buffers with a newly resolved catalog
    ///
    /// Unknown ids are pruned. A price range equal to the previous full domain
    /// widens to the new one; any other range is re-clamped.
    pub fn reconcile(
        &mut self,
        facets: &FacetSet,
        previous: &RangeSelector,
        current: &RangeSelector,
    ) -> Change {
        let before = self.state.applied.clone();
        for criteria in [&mut self.state.applied, &mut self.state.draft] {
            criteria.prune_unknown(facets);
            criteria.price_range = if previous.is_full(&criteria.price_range) {
                current.full()
            } else {
                current.normalize(criteria.price_range)
            };
        }
        self.sync_draft();
        if self.state.applied != before {
            Change::Applied
        } else {
            Change::None
        }
    }

    /// Whether a brand reads as fully selected in the active buffer
    pub fn is_brand_selected(&self, facets: &FacetSet, brand_id: &str) -> bool {
        is_brand_selected(self.active(), facets, brand_id)
    }
}

/// Remove one value from a criteria set; returns whether anything changed
fn remove_value(
    criteria: &mut FilterCriteria,
    dimension: FacetDimension,
    value_id: &str,
    facets: Option<&FacetSet>,
    range: &RangeSelector,
) -> bool {
    let before = criteria.clone();

    match dimension {
        FacetDimension::Price => criteria.price_range = range.full(),
        FacetDimension::Brand => {
            if let Some(facets) = facets {
                deselect_brand(criteria, facets, value_id);
            }
        }
        FacetDimension::Year => {
            if criteria.year.as_deref() == Some(value_id) {
                criteria.year = None;
            }
        }
        _ => {
            if let Some(values) = criteria.values_mut(dimension) {
                values.remove(value_id);
            }
        }
    }

    *criteria != before
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
            json!({"id": "toyota-a", "brand": "Toyota", "year": 2023, "cashPrice": 50000,
                   "specs": {"fuelType": "Petrol"}}),
            json!({"id": "toyota-b", "brand": "Toyota", "year": 2021, "cashPrice": 90000,
                   "specs": {"fuelType": "Diesel"}}),
            json!({"id": "honda-c", "brand": "Honda", "year": 2023, "cashPrice": 200000,
                   "specs": {"fuelType": "Petrol"}}),
        ]);
        extract_facets(store.records(), &Locale::default())
    }

    fn manager() -> FilterStateManager {
        FilterStateManager::new(FilterCriteria::defaults(&range()))
    }

    #[test]
    fn test_spacious_toggle_edits_applied() {
        let f = facets();
        let mut m = manager();
        let change = m.on_facet_toggle(FacetDimension::FuelType, "petrol", true, Some(&f));
        assert_eq!(change, Change::Applied);
        assert!(m.applied().fuel_types.contains("petrol"));
        assert_eq!(m.draft(), m.applied());
    }

    #[test]
    fn test_compact_toggle_edits_draft_only() {
        let f = facets();
        let mut m = manager();
        m.enter_draft_mode();
        let change = m.on_facet_toggle(FacetDimension::FuelType, "diesel", true, Some(&f));
        assert_eq!(change, Change::Draft);
        assert!(m.applied().fuel_types.is_empty());
        assert!(m.draft().fuel_types.contains("diesel"));
    }

    #[test]
    fn test_commit_replaces_applied_with_snapshot() {
        let f = facets();
        let mut m = manager();
        m.enter_draft_mode();
        m.on_facet_toggle(FacetDimension::Brand, "toyota", true, Some(&f));
        m.on_facet_toggle(FacetDimension::Year, "2023", true, Some(&f));
        m.on_price_range_change(PriceRange::new(50_000.0, 100_000.0), &range());
        let snapshot = m.draft().clone();

        assert_eq!(m.commit_draft(), Change::Applied);
        assert_eq!(m.applied(), &snapshot);
        assert!(m.is_draft_mode());
    }

    #[test]
    fn test_discard_reseeds_draft() {
        let f = facets();
        let mut m = manager();
        m.on_facet_toggle(FacetDimension::Seats, "unknown", true, Some(&f));
        m.on_facet_toggle(FacetDimension::FuelType, "petrol", true, Some(&f));
        m.enter_draft_mode();
        m.on_facet_toggle(FacetDimension::FuelType, "petrol", false, Some(&f));
        assert_eq!(m.discard_draft(), Change::Draft);
        assert_eq!(m.draft(), m.applied());
        assert!(m.draft().fuel_types.contains("petrol"));
    }

    #[test]
    fn test_leaving_draft_mode_restores_mirror() {
        let f = facets();
        let mut m = manager();
        m.enter_draft_mode();
        m.on_facet_toggle(FacetDimension::FuelType, "petrol", true, Some(&f));
        m.leave_draft_mode();
        assert!(!m.is_draft_mode());
        assert_eq!(m.draft(), m.applied());
        assert!(m.applied().fuel_types.is_empty());
    }

    #[test]
    fn test_year_is_single_valued_toggle() {
        let f = facets();
        let mut m = manager();
        m.on_facet_toggle(FacetDimension::Year, "2023", true, Some(&f));
        m.on_facet_toggle(FacetDimension::Year, "2021", true, Some(&f));
        assert_eq!(m.applied().year.as_deref(), Some("2021"));
        m.on_facet_toggle(FacetDimension::Year, "2021", true, Some(&f));
        assert_eq!(m.applied().year, None);
        assert_eq!(
            m.on_facet_toggle(FacetDimension::Year, "2023", false, Some(&f)),
            Change::None
        );
    }

    #[test]
    fn test_unknown_value_is_noop() {
        let f = facets();
        let mut m = manager();
        let before = m.state().clone();
        assert_eq!(
            m.on_facet_toggle(FacetDimension::FuelType, "electric", true, Some(&f)),
            Change::None
        );
        assert_eq!(
            m.on_facet_toggle(FacetDimension::Brand, "kia", true, Some(&f)),
            Change::None
        );
        assert_eq!(m.state(), &before);
    }

    #[test]
    fn test_brand_checkbox_semantics() {
        let f = facets();
        let mut m = manager();
        m.on_facet_toggle(FacetDimension::Model, "toyota-a", true, Some(&f));
        assert!(!m.is_brand_selected(&f, "toyota"));
        m.on_facet_toggle(FacetDimension::Brand, "toyota", true, Some(&f));
        assert!(m.is_brand_selected(&f, "toyota"));
        m.on_facet_toggle(FacetDimension::Model, "honda-c", true, Some(&f));
        m.on_facet_toggle(FacetDimension::Brand, "toyota", false, Some(&f));
        assert_eq!(
            m.applied().selected_model_ids.iter().collect::<Vec<_>>(),
            vec!["honda-c"]
        );
    }

    #[test]
    fn test_price_change_is_validated() {
        let mut m = manager();
        m.on_price_range_change(PriceRange::new(120_000.0, 100_000.0), &range());
        assert_eq!(m.applied().price_range, PriceRange::new(90_000.0, 100_000.0));
    }

    #[test]
    fn test_remove_brand_removes_owned_models() {
        let f = facets();
        let mut m = manager();
        for id in ["toyota-a", "toyota-b", "honda-c"] {
            m.on_facet_toggle(FacetDimension::Model, id, true, Some(&f));
        }
        assert_eq!(
            m.remove_facet(FacetDimension::Brand, "toyota", Some(&f), &range()),
            Change::Applied
        );
        assert_eq!(
            m.applied().selected_model_ids.iter().collect::<Vec<_>>(),
            vec!["honda-c"]
        );
    }

    #[test]
    fn test_remove_price_restores_full_domain() {
        let mut m = manager();
        m.on_price_range_change(PriceRange::new(60_000.0, 100_000.0), &range());
        m.remove_facet(FacetDimension::Price, "price", None, &range());
        assert_eq!(m.applied().price_range, range().full());
    }

    #[test]
    fn test_reset_all_restores_defaults() {
        let f = facets();
        let mut m = manager();
        m.on_facet_toggle(FacetDimension::FuelType, "petrol", true, Some(&f));
        m.enter_draft_mode();
        m.on_facet_toggle(FacetDimension::Year, "2023", true, Some(&f));
        let defaults = FilterCriteria::defaults(&range());
        assert_eq!(m.reset_all(defaults.clone()), Change::Applied);
        assert_eq!(m.applied(), &defaults);
        assert_eq!(m.draft(), &defaults);
    }

    #[test]
    fn test_loading_accepts_values_then_reconciles() {
        let loading_range = RangeSelector::new(0.0, 10_000.0, 10_000.0);
        let mut m = FilterStateManager::new(FilterCriteria::defaults(&loading_range));
        m.on_facet_toggle(FacetDimension::FuelType, "petrol", true, None);
        m.on_facet_toggle(FacetDimension::FuelType, "hydrogen", true, None);
        assert_eq!(
            m.on_facet_toggle(FacetDimension::Brand, "toyota", true, None),
            Change::None
        );

        m.reconcile(&facets(), &loading_range, &range());
        assert_eq!(
            m.applied().fuel_types.iter().collect::<Vec<_>>(),
            vec!["petrol"]
        );
        assert_eq!(m.applied().price_range, range().full());
        assert_eq!(m.draft(), m.applied());
    }

    #[test]
    fn test_remove_in_draft_mode_survives_commit() {
        let f = facets();
        let mut m = manager();
        m.enter_draft_mode();
        m.on_facet_toggle(FacetDimension::FuelType, "petrol", true, Some(&f));
        m.commit_draft();

        assert_eq!(
            m.remove_facet(FacetDimension::FuelType, "petrol", Some(&f), &range()),
            Change::Applied
        );
        assert!(m.applied().fuel_types.is_empty());
        assert!(m.draft().fuel_types.is_empty());

        m.on_facet_toggle(FacetDimension::Year, "2023", true, Some(&f));
        m.commit_draft();
        assert!(m.applied().fuel_types.is_empty());
        assert_eq!(m.applied().year.as_deref(), Some("2023"));
    }

    #[test]
    fn test_remove_in_draft_mode_keeps_other_draft_edits() {
        let f = facets();
        let mut m = manager();
        m.on_facet_toggle(FacetDimension::FuelType, "petrol", true, Some(&f));
        m.enter_draft_mode();
        m.on_facet_toggle(FacetDimension::FuelType, "diesel", true, Some(&f));

        m.remove_facet(FacetDimension::FuelType, "petrol", Some(&f), &range());
        assert_eq!(m.draft().fuel_types.iter().collect::<Vec<_>>(), vec!["diesel"]);
        assert!(m.applied().fuel_types.is_empty());
    }

    #[test]
    fn test_pending_price_is_normalized_on_reconcile() {
        let loading_range = RangeSelector::new(0.0, 10_000.0, 10_000.0);
        let mut m = FilterStateManager::new(FilterCriteria::defaults(&loading_range));
        m.on_pending_price_range(PriceRange::new(60_000.0, 100_000.0));
        assert_eq!(m.applied().price_range, PriceRange::new(60_000.0, 100_000.0));

        m.reconcile(&facets(), &loading_range, &range());
        assert_eq!(m.applied().price_range, PriceRange::new(60_000.0, 100_000.0));

        let mut m = FilterStateManager::new(FilterCriteria::defaults(&loading_range));
        m.on_pending_price_range(PriceRange::new(120_000.0, 100_000.0));
        m.reconcile(&facets(), &loading_range, &range());
        assert_eq!(m.applied().price_range, PriceRange::new(90_000.0, 100_000.0));
    }
}
