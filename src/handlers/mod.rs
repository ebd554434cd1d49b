pub mod filter_handlers;

pub use filter_handlers::{
    apply_selections, apply_sort_and_page, parse_removals, remove_tokens, Selections,
};
