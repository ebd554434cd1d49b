use clap::Parser;
use colored::Colorize;
use showroom_core::*;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod errors;
mod handlers;
mod operations;
mod state;
mod ui;

use errors::{map_catalog_load_error, map_config_error};
use handlers::{apply_selections, apply_sort_and_page, parse_removals, remove_tokens, Selections};
use operations::{apply_overrides, load_config};
use state::AppState;
use ui::{format_facet_set, format_results, set_status, show_error, StatusLevel};

/// Vehicle showroom browser - filter, sort and page through a vehicle catalog
///
/// Examples:
///   # First page of the whole catalog
///   showroom cars.json
///
///   # Two brands, petrol only, cheapest first
///   showroom cars.json --brand Toyota --brand Honda --fuel petrol --sort price-asc
///
///   # Price window and a specific year, second page of 6
///   showroom cars.json --min-price 40000 --max-price 100000 --year 2023 --page 2 --page-size 6
///
///   # Batch the edits in a draft and commit them at once
///   showroom cars.json --compact --brand Nissan --seats 7
#[derive(Parser, Debug)]
#[command(name = "showroom")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - Values within one dimension are combined with OR\n  \
    - Different dimensions are combined with AND\n  \
    - Selecting a brand selects every one of its models\n  \
    - Only one year can be selected at a time\n\n\
Sort Options:\n  \
    - relevance, price-asc, price-desc, newest\n\n\
Removing Filters:\n  \
    - --remove brand=toyota, --remove fuel=petrol, --remove price=any")]
struct Cli {
    /// Path to the vehicle catalog JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Engine settings TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Filter by brand (repeatable, OR logic)
    #[arg(short, long = "brand", value_name = "NAME")]
    brands: Vec<String>,

    /// Filter by model record id (repeatable, OR logic)
    #[arg(short, long = "model", value_name = "ID")]
    models: Vec<String>,

    /// Filter by model year
    #[arg(short, long, value_name = "YEAR")]
    year: Option<String>,

    /// Filter by fuel type (repeatable, OR logic)
    #[arg(short, long = "fuel", value_name = "TYPE")]
    fuel_types: Vec<String>,

    /// Filter by transmission (repeatable, OR logic)
    #[arg(short, long = "transmission", value_name = "TYPE")]
    transmissions: Vec<String>,

    /// Filter by seat count (repeatable, OR logic)
    #[arg(long = "seats", value_name = "COUNT")]
    seats: Vec<String>,

    /// Lower price bound
    #[arg(long, value_name = "AMOUNT")]
    min_price: Option<f64>,

    /// Upper price bound
    #[arg(long, value_name = "AMOUNT")]
    max_price: Option<f64>,

    /// Sort order
    #[arg(short, long, value_name = "ORDER")]
    sort: Option<SortOption>,

    /// Page to show, starting at 1
    #[arg(short, long, value_name = "N")]
    page: Option<usize>,

    /// Vehicles per page
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Display language for labels
    #[arg(short, long, value_name = "TAG")]
    locale: Option<String>,

    /// Route edits through the draft buffer and commit them at the end
    #[arg(long)]
    compact: bool,

    /// Remove an active filter after applying (format: dimension=id)
    #[arg(short, long = "remove", value_name = "DIM=ID")]
    removals: Vec<String>,

    /// Print the facet set with current selections
    #[arg(long)]
    facets: bool,
}

impl Cli {
    fn selections(&self) -> Selections {
        Selections {
            brands: self.brands.clone(),
            models: self.models.clone(),
            year: self.year.clone(),
            fuel_types: self.fuel_types.clone(),
            transmissions: self.transmissions.clone(),
            seats: self.seats.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showroom=info,showroom_core=info".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(cli.config.as_deref())
        .and_then(|config| apply_overrides(config, cli.page_size, cli.locale.as_deref()));
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            let (title, message, details) = map_config_error(&e, cli.config.as_deref());
            show_error(title, message, details);
            process::exit(1);
        }
    };

    let mut state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            show_error("Configuration Error", "The engine configuration is invalid.", e);
            process::exit(1);
        }
    };
    if cli.compact {
        state.set_presentation(Presentation::Compact);
    }

    match state.load_from_file(cli.file.clone()) {
        LoadOutcome::Applied { records, skipped } => {
            tracing::info!(records, skipped, "{}", state.get_catalog_title());
            if skipped > 0 {
                set_status(
                    format!("{} malformed records were skipped", skipped),
                    StatusLevel::Warning,
                );
            }
        }
        LoadOutcome::Failed(message) => {
            let (title, message, details) = map_catalog_load_error(&message, &cli.file);
            show_error(title, message, details);
            process::exit(1);
        }
        outcome @ (LoadOutcome::Stale | LoadOutcome::TornDown) => {
            show_error("Error Loading Catalog", "The catalog load was discarded.", format!("{:?}", outcome));
            process::exit(1);
        }
    }

    apply_selections(&state, &cli.selections());
    remove_tokens(&state, &parse_removals(&cli.removals));
    apply_sort_and_page(&state, cli.sort, cli.page);

    print_state(&state, cli.facets);
}

fn print_state(state: &AppState, show_facets: bool) {
    let engine = state.engine.borrow();

    println!("{}\n", state.get_catalog_title().bold());

    if show_facets {
        if let Some(facets) = engine.facets() {
            let text = format_facet_set(facets, &engine.filter_state().applied, engine.price_domain());
            println!("{}", text);
        }
    }

    match engine.results() {
        ResultsView::Ready(page) => {
            print!("{}", format_results(&page, engine.locale()));
            if page.total_matches == 0 && engine.has_active_filters() {
                set_status(
                    "No vehicles match; drop a filter with --remove or run without filters",
                    StatusLevel::Info,
                );
            }
        }
        ResultsView::Loading => println!("{}", "_Loading..._".dimmed()),
        ResultsView::Failed(message) => set_status(message, StatusLevel::Error),
    }
}
