pub mod formatting;
pub mod status;

pub use formatting::{format_facet_set, format_results};
pub use status::{set_status, show_error, StatusLevel};
