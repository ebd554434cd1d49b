//! Error types for the inventory engine.
//!
//! Only catalog loading and configuration can fail outright. Everything a user
//! event can get wrong is absorbed by the engine and reported as an
//! [`EngineIssue`] through `tracing`, so the rendering layer always receives a
//! valid filter state.

use thiserror::Error;

/// Failure to obtain or parse the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading the catalog source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog source is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog JSON parsed, but its top level is not an array of records.
    #[error("Catalog must be a JSON array of vehicle records")]
    NotAnArray,

    /// The catalog provider reported a failure of its own.
    #[error("Catalog provider error: {0}")]
    Provider(String),
}

/// Invalid engine configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("page_size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    #[error("price_step must be a positive number, got {0}")]
    InvalidPriceStep(f64),

    #[error("price_floor {floor} must be below price_ceiling {ceiling}")]
    InvertedPriceBounds { floor: f64, ceiling: f64 },
}

/// Conditions the engine corrects or ignores instead of raising.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineIssue {
    /// A catalog entry missing a required field; excluded from facets and filtering.
    #[error("malformed record #{index} ({id}): {reason}")]
    MalformedRecord {
        index: usize,
        id: String,
        reason: String,
    },

    /// A non-numeric or inverted range; corrected by the range selector.
    #[error("invalid price range [{low}, {high}] corrected to [{corrected_low}, {corrected_high}]")]
    InvalidRange {
        low: f64,
        high: f64,
        corrected_low: f64,
        corrected_high: f64,
    },

    /// A facet value outside the current facet set; the event is a no-op.
    #[error("unknown {dimension} value '{value}'")]
    UnknownFacetValue { dimension: String, value: String },
}
