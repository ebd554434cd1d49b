pub mod file_ops;

pub use file_ops::{apply_overrides, load_config};
