use crate::models::VehicleRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Result ordering chosen by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::Relevance,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Newest => "newest",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown sort option '{}' (expected one of: relevance, price-asc, price-desc, newest)",
                    s
                )
            })
    }
}

/// Sort records in place; stable, so ties keep their input order
pub fn sort_records(records: &mut [&VehicleRecord], option: SortOption) {
    match option {
        SortOption::Relevance => {}
        SortOption::PriceAsc => records.sort_by(|a, b| compare_price(a, b)),
        SortOption::PriceDesc => records.sort_by(|a, b| compare_price(b, a)),
        SortOption::Newest => records.sort_by(|a, b| b.year_number().cmp(&a.year_number())),
    }
}

fn compare_price(a: &VehicleRecord, b: &VehicleRecord) -> Ordering {
    a.cash_price.total_cmp(&b.cash_price)
}
