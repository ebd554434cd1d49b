//! Inventory browsing engine.
//!
//! [`InventoryEngine`] owns everything the rendering layer reads and every
//! event it emits: catalog load state, facets, the filter state manager, the
//! sort option and the page. It holds no presentation of its own.
//!
//! # Loading
//!
//! The catalog resolves asynchronously through [`load_into`]. Until then the
//! engine reports [`LoadState::Loading`], accepts filter events into state and
//! produces no results. A load that finishes after the engine was dropped or
//! torn down, or after a newer load started, is discarded.

use crate::catalog::{CatalogProvider, CatalogStore};
use crate::config::EngineConfig;
use crate::criteria::{FacetDimension, FilterCriteria};
use crate::error::{CatalogError, ConfigError};
use crate::facets::{FacetCache, FacetSet};
use crate::filtering::apply_filters;
use crate::models::{Locale, VehicleRecord};
use crate::pagination::{clamp_page_index, paginate, total_pages, PageState};
use crate::range::{PriceRange, RangeSelector};
use crate::sorting::{sort_records, SortOption};
use crate::state::{Change, FilterState, FilterStateManager};
use crate::summary::{remove_one, selected_facets, SelectedFacet};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Weak;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Layout the rendering layer is currently using
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Edits are batched in a draft and applied on commit
    Compact,
    /// Edits apply immediately
    Spacious,
}

/// One step-sized move of a price bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceNudge {
    LowUp,
    LowDown,
    HighUp,
    HighDown,
}

/// Proof that a load was started; only the latest ticket can install a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied { records: usize, skipped: usize },
    Failed(String),
    /// A newer load was started after this one
    Stale,
    /// The engine was torn down before the load resolved
    TornDown,
}

/// The visible slice of results
#[derive(Debug, Clone)]
pub struct ResultPage<'a> {
    pub records: Vec<&'a VehicleRecord>,
    pub total_matches: usize,
    pub page_index: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub sort: SortOption,
    pub tokens: Vec<SelectedFacet>,
}

#[derive(Debug, Clone)]
pub enum ResultsView<'a> {
    Loading,
    Failed(&'a str),
    Ready(ResultPage<'a>),
}

#[derive(Debug)]
pub struct InventoryEngine {
    config: EngineConfig,
    locale: Locale,
    load_state: LoadState,
    catalog: Option<CatalogStore>,
    facet_cache: FacetCache,
    facets: Option<Arc<FacetSet>>,
    range: RangeSelector,
    filters: FilterStateManager,
    sort: SortOption,
    page: PageState,
    generation: u64,
    torn_down: bool,
}

impl InventoryEngine {
    /// Engine waiting for its catalog
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let range = placeholder_domain(&config);
        Ok(Self {
            locale: config.default_locale.clone(),
            load_state: LoadState::Loading,
            catalog: None,
            facet_cache: FacetCache::new(),
            facets: None,
            filters: FilterStateManager::new(FilterCriteria::defaults(&range)),
            range,
            sort: SortOption::default(),
            page: PageState::new(config.page_size),
            generation: 0,
            torn_down: false,
            config,
        })
    }

    /// Engine over a catalog that is already available
    pub fn with_catalog(config: EngineConfig, catalog: CatalogStore) -> Result<Self, ConfigError> {
        let mut engine = Self::new(config)?;
        engine.install_catalog(catalog);
        Ok(engine)
    }

    // ---- loading -------------------------------------------------------

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_ready(&self) -> bool {
        self.load_state == LoadState::Ready
    }

    /// Start a load; any earlier ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        if self.catalog.is_none() {
            self.load_state = LoadState::Loading;
        }
        tracing::debug!(generation = self.generation, "catalog load started");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply a resolved load if it is still wanted
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Value>, CatalogError>,
    ) -> LoadOutcome {
        if self.torn_down {
            tracing::debug!("catalog resolved after teardown; discarding");
            return LoadOutcome::TornDown;
        }
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale catalog load; discarding"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(raw) => {
                let store = CatalogStore::from_raw(raw);
                let outcome = LoadOutcome::Applied {
                    records: store.len(),
                    skipped: store.report().skipped.len(),
                };
                self.install_catalog(store);
                outcome
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "catalog load failed");
                if self.catalog.is_none() {
                    self.load_state = LoadState::Failed(message.clone());
                }
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Mark the consuming context as gone; pending loads will be discarded
    pub fn teardown(&mut self) {
        self.torn_down = true;
        tracing::debug!("engine torn down");
    }

    fn install_catalog(&mut self, store: CatalogStore) {
        let previous = self.range;
        self.range = catalog_domain(&self.config, &store);
        let facets = self.facet_cache.get(&store, &self.locale);

        self.filters.reconcile(&facets, &previous, &self.range);
        self.page.reset();

        if !store.report().is_clean() {
            tracing::warn!(
                skipped = store.report().skipped.len(),
                "catalog contains malformed entries"
            );
        }
        tracing::info!(
            records = store.len(),
            skipped = store.report().skipped.len(),
            domain_min = self.range.domain_min(),
            domain_max = self.range.domain_max(),
            "catalog ready"
        );
        self.facets = Some(facets);
        self.catalog = Some(store);
        self.load_state = LoadState::Ready;
    }

    // ---- queries -------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn catalog(&self) -> Option<&CatalogStore> {
        self.catalog.as_ref()
    }

    /// Facets of the loaded catalog in the current locale
    pub fn facets(&self) -> Option<&FacetSet> {
        self.facets.as_deref()
    }

    pub fn filter_state(&self) -> &FilterState {
        self.filters.state()
    }

    pub fn price_domain(&self) -> &RangeSelector {
        &self.range
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    /// Brand checkbox state for the buffer being edited
    pub fn is_brand_selected(&self, brand_id: &str) -> bool {
        self.facets()
            .is_some_and(|facets| self.filters.is_brand_selected(facets, brand_id))
    }

    /// Whether applied criteria narrow the catalog at all; drives a reset affordance
    pub fn has_active_filters(&self) -> bool {
        self.filters.applied().is_restricted(&self.range)
    }

    /// Active-filter tokens for applied criteria
    pub fn tokens(&self) -> Vec<SelectedFacet> {
        match self.facets() {
            Some(facets) => selected_facets(self.filters.applied(), facets, &self.range),
            None => Vec::new(),
        }
    }

    /// How many records the draft would show if committed
    pub fn draft_match_count(&self) -> Option<usize> {
        let catalog = self.catalog.as_ref()?;
        Some(apply_filters(catalog.records(), self.filters.draft()).len())
    }

    fn matches(&self) -> Option<Vec<&VehicleRecord>> {
        let catalog = self.catalog.as_ref()?;
        let mut matches = apply_filters(catalog.records(), self.filters.applied());
        sort_records(&mut matches, self.sort);
        Some(matches)
    }

    /// Filtered, sorted and paginated results for applied criteria
    pub fn results(&self) -> ResultsView<'_> {
        match &self.load_state {
            LoadState::Loading => return ResultsView::Loading,
            LoadState::Failed(message) => return ResultsView::Failed(message),
            LoadState::Ready => {}
        }
        let Some(matches) = self.matches() else {
            return ResultsView::Loading;
        };

        let page_size = self.page.page_size;
        let page_index = clamp_page_index(self.page.page_index, matches.len(), page_size);
        ResultsView::Ready(ResultPage {
            records: paginate(&matches, page_index, page_size).to_vec(),
            total_matches: matches.len(),
            page_index,
            total_pages: total_pages(matches.len(), page_size),
            page_size,
            sort: self.sort,
            tokens: self.tokens(),
        })
    }

    // ---- events --------------------------------------------------------

    fn settle(&mut self, change: Change) -> Change {
        if change.touches_applied() {
            self.page.reset();
        }
        change
    }

    pub fn set_presentation(&mut self, presentation: Presentation) {
        match presentation {
            Presentation::Compact if !self.filters.is_draft_mode() => self.filters.enter_draft_mode(),
            Presentation::Spacious if self.filters.is_draft_mode() => self.filters.leave_draft_mode(),
            _ => {}
        }
    }

    pub fn on_facet_toggle(&mut self, dimension: FacetDimension, value: &str, checked: bool) -> Change {
        let change = self
            .filters
            .on_facet_toggle(dimension, value, checked, self.facets.as_deref());
        self.settle(change)
    }

    /// Store a price range; before the catalog resolves it is held as requested
    pub fn on_price_range_change(&mut self, new_range: PriceRange) -> Change {
        let change = if self.catalog.is_some() {
            self.filters.on_price_range_change(new_range, &self.range)
        } else {
            self.filters.on_pending_price_range(new_range)
        };
        self.settle(change)
    }

    /// Step one price bound of the buffer being edited
    /// No-op until the catalog has fixed the price domain
    pub fn on_price_nudge(&mut self, nudge: PriceNudge) -> Change {
        if self.catalog.is_none() {
            return Change::None;
        }
        let current = self.filters.active().price_range;
        let moved = match nudge {
            PriceNudge::LowUp => self.range.increment_low(current),
            PriceNudge::LowDown => self.range.decrement_low(current),
            PriceNudge::HighUp => self.range.increment_high(current),
            PriceNudge::HighDown => self.range.decrement_high(current),
        };
        self.on_price_range_change(moved)
    }

    pub fn commit_draft(&mut self) -> Change {
        let change = self.filters.commit_draft();
        // commit always lands on the first page
        self.page.reset();
        change
    }

    pub fn discard_draft(&mut self) -> Change {
        self.filters.discard_draft()
    }

    pub fn reset_all(&mut self) -> Change {
        let change = self.filters.reset_all(FilterCriteria::defaults(&self.range));
        self.page.reset();
        change
    }

    pub fn remove_facet(&mut self, dimension: FacetDimension, value_id: &str) -> Change {
        let change =
            self.filters
                .remove_facet(dimension, value_id, self.facets.as_deref(), &self.range);
        self.settle(change)
    }

    pub fn remove_token(&mut self, token: &SelectedFacet) -> Change {
        let Some(facets) = self.facets.clone() else {
            return Change::None;
        };
        let change = remove_one(&mut self.filters, token, &facets, &self.range);
        self.settle(change)
    }

    pub fn on_sort_change(&mut self, sort: SortOption) {
        if self.sort != sort {
            self.sort = sort;
            self.page.reset();
            tracing::debug!(%sort, "sort changed");
        }
    }

    /// Move to a page, clamped into the available range once results exist
    pub fn on_page_change(&mut self, page_index: usize) {
        self.page.page_index = match self.matches() {
            Some(matches) => clamp_page_index(page_index, matches.len(), self.page.page_size),
            None => page_index.max(1),
        };
    }

    /// Switch display language; facet ids and criteria are unaffected
    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale == locale {
            return;
        }
        self.locale = locale;
        if let Some(catalog) = &self.catalog {
            self.facets = Some(self.facet_cache.get(catalog, &self.locale));
        }
        tracing::debug!(locale = %self.locale, "locale changed");
    }
}

/// Price domain used before any catalog is known
fn placeholder_domain(config: &EngineConfig) -> RangeSelector {
    let floor = config.price_floor.unwrap_or(0.0);
    let ceiling = config.price_ceiling.unwrap_or(floor + config.price_step);
    RangeSelector::new(floor, ceiling, config.price_step)
}

/// Catalog price bounds rounded outward to the step, with configured overrides
fn catalog_domain(config: &EngineConfig, store: &CatalogStore) -> RangeSelector {
    match store.price_bounds() {
        Some((lowest, highest)) => {
            let covering = RangeSelector::covering(lowest, highest, config.price_step);
            RangeSelector::new(
                config.price_floor.unwrap_or(covering.domain_min()),
                config.price_ceiling.unwrap_or(covering.domain_max()),
                config.price_step,
            )
        }
        None => placeholder_domain(config),
    }
}

/// Load the catalog into a shared engine
///
/// The engine is held weakly across the await so that dropping it, or calling
/// [`InventoryEngine::teardown`], discards the result instead of applying it.
pub async fn load_into<P: CatalogProvider>(
    engine: Weak<RefCell<InventoryEngine>>,
    provider: &P,
) -> LoadOutcome {
    let Some(shared) = engine.upgrade() else {
        return LoadOutcome::TornDown;
    };
    let ticket = shared.borrow_mut().begin_load();
    drop(shared);

    let result = provider.load_catalog().await;

    let Some(shared) = engine.upgrade() else {
        tracing::debug!("engine dropped before catalog resolved; discarding");
        return LoadOutcome::TornDown;
    };
    let outcome = shared.borrow_mut().finish_load(ticket, result);
    outcome
}
