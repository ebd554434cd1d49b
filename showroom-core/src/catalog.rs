use crate::error::CatalogError;
use crate::io::{load_raw_catalog, parse_records, CatalogReport};
use crate::models::VehicleRecord;
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// Source of the session catalog
///
/// Resolves once with the raw entries; validation happens in the engine so
/// every provider gets the same malformed-record handling.
pub trait CatalogProvider {
    fn load_catalog(&self) -> impl Future<Output = Result<Vec<Value>, CatalogError>>;
}

/// Provider backed by entries already in memory
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogProvider {
    entries: Vec<Value>,
}

impl StaticCatalogProvider {
    pub fn new(entries: Vec<Value>) -> Self {
        Self { entries }
    }
}

impl CatalogProvider for StaticCatalogProvider {
    async fn load_catalog(&self) -> Result<Vec<Value>, CatalogError> {
        Ok(self.entries.clone())
    }
}

/// Provider reading a JSON array from disk
#[derive(Debug, Clone)]
pub struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CatalogProvider for FileCatalogProvider {
    async fn load_catalog(&self) -> Result<Vec<Value>, CatalogError> {
        load_raw_catalog(&self.path)
    }
}

/// Immutable, explicitly owned catalog handle
///
/// Clones share the same records and compare equal by [`CatalogStore::same_catalog`].
#[derive(Debug, Clone)]
pub struct CatalogStore {
    records: Arc<[VehicleRecord]>,
    report: CatalogReport,
}

impl CatalogStore {
    pub fn new(records: Vec<VehicleRecord>) -> Self {
        Self {
            records: records.into(),
            report: CatalogReport::default(),
        }
    }

    /// Validate raw entries, keeping a report of what was skipped
    pub fn from_raw(raw: Vec<Value>) -> Self {
        let (records, report) = parse_records(raw);
        Self {
            records: records.into(),
            report,
        }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn report(&self) -> &CatalogReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether both handles refer to the same loaded catalog
    pub fn same_catalog(&self, other: &CatalogStore) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// Lowest and highest cash price, or None for an empty catalog
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.records.iter().fold(None, |bounds, record| {
            let price = record.cash_price;
            Some(match bounds {
                None => (price, price),
                Some((lo, hi)) => (lo.min(price), hi.max(price)),
            })
        })
    }
}
