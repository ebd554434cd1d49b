use showroom_core::*;

/// Format a single vehicle as a Markdown section
pub fn format_record(record: &VehicleRecord, locale: &Locale) -> String {
    let mut lines = vec![format!("### {}\n", record.display_name(locale))];

    lines.push(format!("- **Price:** {}", format_amount(record.cash_price)));
    if let Some(year) = record.year_text() {
        lines.push(format!("- **Year:** {}", year));
    }

    // only specs the record actually carries
    let specs = [
        ("Fuel", &record.specs.fuel_type),
        ("Transmission", &record.specs.transmission),
        ("Seats", &record.specs.seats),
    ];
    for (name, value) in specs {
        let text = value.resolve(locale);
        if !text.is_empty() {
            lines.push(format!("- **{}:** {}", name, text));
        }
    }

    lines.push(format!("- **Id:** {}", record.id));
    lines.join("\n")
}

/// Format active-filter tokens as a bullet list
pub fn format_tokens(tokens: &[SelectedFacet]) -> String {
    tokens
        .iter()
        .map(|token| format!("- **{}:** {}", dimension_title(token.dimension), token.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one page of results with its header
pub fn format_results(page: &ResultPage<'_>, locale: &Locale) -> String {
    let mut out = String::from("# Results\n\n");

    if !page.tokens.is_empty() {
        out.push_str("## Active Filters\n\n");
        out.push_str(&format_tokens(&page.tokens));
        out.push_str("\n\n");
    }

    out.push_str(&format!("**Sorted by:** {}\n\n", page.sort));
    out.push_str(&format!(
        "**Matching Vehicles:** {} (page {} of {})\n\n",
        page.total_matches, page.page_index, page.total_pages
    ));

    if page.records.is_empty() {
        out.push_str("_No vehicles match the selected filters._\n");
    } else {
        for record in &page.records {
            out.push_str(&format_record(record, locale));
            out.push_str("\n\n");
        }
    }
    out
}

/// Format the facet set, marking what the applied criteria select
pub fn format_facet_set(facets: &FacetSet, criteria: &FilterCriteria, range: &RangeSelector) -> String {
    let mut out = String::from("# Facets\n\n");

    out.push_str(&format!(
        "## Price\n\n{} (step {}), selected {}\n\n",
        format_price_range(&range.full()),
        format_amount(range.step()),
        format_price_range(&criteria.price_range)
    ));

    out.push_str("## Brands\n\n");
    for brand in &facets.brands {
        let mark = if is_brand_selected(criteria, facets, &brand.id) {
            "[x]"
        } else if is_brand_partially_selected(criteria, facets, &brand.id) {
            "[-]"
        } else {
            "[ ]"
        };
        out.push_str(&format!("- {} {} `{}`\n", mark, brand.label, brand.id));
        for model in facets.models_of(&brand.id) {
            let mark = checkbox(criteria.selected_model_ids.contains(&model.id));
            out.push_str(&format!("  - {} {} `{}`\n", mark, model.name, model.id));
        }
    }
    out.push('\n');

    out.push_str("## Year\n\n");
    for year in &facets.years {
        let mark = checkbox(criteria.year.as_deref() == Some(year.as_str()));
        out.push_str(&format!("- {} {}\n", mark, year));
    }
    out.push('\n');

    let sections = [
        ("Fuel Type", &facets.fuel_types, &criteria.fuel_types),
        ("Transmission", &facets.transmissions, &criteria.transmissions),
        ("Seats", &facets.seat_options, &criteria.seats),
    ];
    for (title, options, selected) in sections {
        out.push_str(&format!("## {}\n\n", title));
        for option in options {
            let mark = checkbox(selected.contains(&option.id));
            out.push_str(&format!("- {} {} `{}`\n", mark, option.label, option.id));
        }
        out.push('\n');
    }

    out
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn dimension_title(dimension: FacetDimension) -> &'static str {
    match dimension {
        FacetDimension::Price => "Price",
        FacetDimension::Brand => "Brand",
        FacetDimension::Model => "Model",
        FacetDimension::Year => "Year",
        FacetDimension::FuelType => "Fuel",
        FacetDimension::Transmission => "Transmission",
        FacetDimension::Seats => "Seats",
    }
}
