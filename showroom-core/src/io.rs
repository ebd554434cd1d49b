use crate::error::{CatalogError, EngineIssue};
use crate::models::VehicleRecord;
use crate::schema_validation::{record_validator, validate_record};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Records that were skipped while building a catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogReport {
    pub skipped: Vec<EngineIssue>,
}

impl CatalogReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Read raw catalog entries from a JSON file
pub fn load_raw_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Value>, CatalogError> {
    let contents = fs::read_to_string(path)?;
    read_raw_catalog(&contents)
}

/// Split a JSON document into raw catalog entries without validating them
pub fn read_raw_catalog(json: &str) -> Result<Vec<Value>, CatalogError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(entries) => Ok(entries),
        _ => Err(CatalogError::NotAnArray),
    }
}

/// Turn raw entries into records
/// Malformed entries and duplicate ids are skipped and reported, never fatal
pub fn parse_records(raw: Vec<Value>) -> (Vec<VehicleRecord>, CatalogReport) {
    let mut report = CatalogReport::default();
    let mut records = Vec::with_capacity(raw.len());
    let mut seen_ids = HashSet::new();

    let validator = match record_validator() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::error!(error = %e, "record schema failed to compile; relying on deserialization only");
            None
        }
    };

    for (index, entry) in raw.into_iter().enumerate() {
        let id = entry_id(&entry);

        let checked = match &validator {
            Some(v) => validate_record(v, &entry),
            None => Ok(()),
        };

        let parsed = checked.and_then(|_| {
            serde_json::from_value::<VehicleRecord>(entry).map_err(|e| e.to_string())
        });

        let outcome = parsed.and_then(|record| {
            if !record.cash_price.is_finite() {
                Err("cashPrice must be finite".to_string())
            } else if !seen_ids.insert(record.id.clone()) {
                Err(format!("duplicate id '{}'", record.id))
            } else {
                Ok(record)
            }
        });

        match outcome {
            Ok(record) => records.push(record),
            Err(reason) => {
                let issue = EngineIssue::MalformedRecord { index, id, reason };
                tracing::warn!(%issue, "skipping catalog entry");
                report.skipped.push(issue);
            }
        }
    }

    (records, report)
}

fn entry_id(entry: &Value) -> String {
    match entry.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "<missing>".to_string(),
    }
}
