// Public modules
pub mod catalog;
pub mod config;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod facets;
pub mod filtering;
pub mod io;
pub mod models;
pub mod normalize;
pub mod pagination;
pub mod range;
pub mod schema_validation;
pub mod sorting;
pub mod state;
pub mod summary;

// Re-export commonly used types for convenience
pub use catalog::{CatalogProvider, CatalogStore, FileCatalogProvider, StaticCatalogProvider};
pub use config::EngineConfig;
pub use criteria::{
    deselect_brand, is_brand_partially_selected, is_brand_selected, select_brand, FacetDimension,
    FilterCriteria,
};
pub use engine::{
    load_into, InventoryEngine, LoadOutcome, LoadState, LoadTicket, Presentation, PriceNudge,
    ResultPage, ResultsView,
};
pub use error::{CatalogError, ConfigError, EngineIssue};
pub use facets::{extract_facets, FacetCache, FacetOption, FacetSet, ModelOption};
pub use filtering::{apply_filters, matches_filters};
pub use io::CatalogReport;
pub use models::{Brand, LocalizedText, Locale, VehicleRecord, VehicleSpecs};
pub use normalize::{facet_key, normalize_text};
pub use pagination::{clamp_page_index, paginate, total_pages, PageState};
pub use range::{PriceRange, RangeSelector};
pub use sorting::{sort_records, SortOption};
pub use state::{Change, FilterState, FilterStateManager};
pub use summary::{format_amount, format_price_range, remove_one, selected_facets, SelectedFacet};
