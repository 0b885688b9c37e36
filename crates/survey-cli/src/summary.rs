use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use survey_model::BlendedMetric;

use crate::types::{BlendResult, CategoriesResult, MapResult};

pub fn print_map_summary(result: &MapResult) {
    println!("Kind: {}", result.kind);
    println!("Already mapped: {}", result.already_mapped);

    if !result.suggestions.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Label"),
            header_cell("Vendor"),
            header_cell("Seen"),
            header_cell("Candidate"),
            header_cell("Confidence"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 4, CellAlignment::Right);
        for entry in &result.suggestions {
            if entry.suggestions.is_empty() {
                table.add_row(vec![
                    Cell::new(&entry.label.name),
                    Cell::new(&entry.label.vendor),
                    Cell::new(entry.label.occurrence_count),
                    dim_cell("(no match)"),
                    dim_cell("-"),
                ]);
                continue;
            }
            for (rank, suggestion) in entry.suggestions.iter().enumerate() {
                let (label, vendor, seen) = if rank == 0 {
                    (
                        Cell::new(&entry.label.name),
                        Cell::new(&entry.label.vendor),
                        Cell::new(entry.label.occurrence_count),
                    )
                } else {
                    (dim_cell(""), dim_cell(""), dim_cell(""))
                };
                table.add_row(vec![
                    label,
                    vendor,
                    seen,
                    Cell::new(&suggestion.standardized_name),
                    confidence_cell(suggestion.confidence),
                ]);
            }
        }
        println!("{table}");
    }

    if !result.applied.is_empty() || !result.unmatched.is_empty() || !result.failures.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Label"),
            header_cell("Vendor"),
            header_cell("Category"),
            header_cell("Confidence"),
            header_cell("Status"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 3, CellAlignment::Right);
        align_column(&mut table, 4, CellAlignment::Center);
        for applied in &result.applied {
            table.add_row(vec![
                Cell::new(&applied.label.name),
                Cell::new(&applied.label.vendor),
                Cell::new(&applied.standardized_name),
                confidence_cell(applied.confidence),
                Cell::new("applied")
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ]);
        }
        for unmatched in &result.unmatched {
            table.add_row(vec![
                Cell::new(&unmatched.name),
                Cell::new(&unmatched.vendor),
                dim_cell("-"),
                dim_cell("-"),
                Cell::new("unmatched").fg(Color::Yellow),
            ]);
        }
        for failure in &result.failures {
            table.add_row(vec![
                Cell::new(&failure.label.name),
                Cell::new(&failure.label.vendor),
                Cell::new(&failure.standardized_name),
                dim_cell("-"),
                Cell::new("failed")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
            ]);
        }
        println!("{table}");
        println!(
            "Applied {}, unmatched {}, failed {}",
            result.applied.len(),
            result.unmatched.len(),
            result.failures.len()
        );
        if !result.failures.is_empty() {
            eprintln!("Failures:");
            for failure in &result.failures {
                eprintln!("- {}: {}", failure.label.name, failure.reason);
            }
        }
    } else if result.suggestions.is_empty() {
        println!("Nothing to map: every observed label is already confirmed.");
    }
}

pub fn print_blend_summary(blend: &BlendResult) {
    let result = &blend.result;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("P25"),
        header_cell("P50"),
        header_cell("P75"),
        header_cell("P90"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(metric_row("TCC", &result.tcc, true));
    table.add_row(metric_row("wRVU", &result.wrvu, false));
    table.add_row(metric_row("CF", &result.cf, true));
    println!("{table}");

    println!("Method: {}", result.method);
    println!("Rows blended: {}", blend.row_count);
    println!("Specialties: {}", result.specialties.join(", "));
    println!("Total records: {}", result.total_records);
    println!("Confidence: {:.2}", result.confidence);
    if blend.degraded {
        eprintln!(
            "note: no usable weight signal for the {} method; equal weights were used",
            result.method
        );
    }
}

pub fn print_blend_json(blend: &BlendResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&blend.result)?;
    println!("{json}");
    if blend.degraded {
        eprintln!(
            "note: no usable weight signal for the {} method; equal weights were used",
            blend.result.method
        );
    }
    Ok(())
}

pub fn print_categories_summary(result: &CategoriesResult) {
    if result.listings.is_empty() {
        println!("No confirmed mappings stored yet.");
        return;
    }
    for listing in &result.listings {
        println!(
            "{} ({} categories, {} source labels) - {}",
            listing.entry.kind,
            listing.entry.category_count,
            listing.entry.source_label_count,
            listing.entry.file_path.display()
        );
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Category"),
            header_cell("Labels"),
            header_cell("Vendors"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for category in &listing.categories {
            let mut vendors: Vec<&str> = category
                .source_labels
                .iter()
                .map(|s| s.vendor.as_str())
                .collect();
            vendors.sort_unstable();
            vendors.dedup();
            table.add_row(vec![
                Cell::new(&category.standardized_name)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(category.source_labels.len()),
                Cell::new(vendors.join(", ")),
            ]);
        }
        println!("{table}");
    }
}

fn metric_row(name: &str, metric: &BlendedMetric, currency: bool) -> Vec<Cell> {
    vec![
        Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold),
        value_cell(metric.p25, currency),
        value_cell(metric.p50, currency),
        value_cell(metric.p75, currency),
        value_cell(metric.p90, currency),
    ]
}

fn value_cell(value: f64, currency: bool) -> Cell {
    if value == 0.0 {
        return dim_cell("-");
    }
    if currency {
        Cell::new(format!("${}", group_thousands(value)))
    } else {
        Cell::new(group_thousands(value))
    }
}

/// Formats a 2-decimal value with thousands separators.
fn group_thousands(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let mut grouped = String::new();
    let digits: Vec<char> = whole.chars().collect();
    for (position, digit) in digits.iter().enumerate() {
        if position > 0 && (digits.len() - position).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(*digit);
    }
    format!("{grouped}.{fraction}")
}

fn confidence_cell(confidence: f64) -> Cell {
    let text = format!("{confidence:.2}");
    if confidence >= 0.8 {
        Cell::new(text).fg(Color::Green)
    } else if confidence >= 0.5 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text).fg(Color::Red)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(335_529.13), "335,529.13");
        assert_eq!(group_thousands(60.0), "60.00");
        assert_eq!(group_thousands(1_000_000.0), "1,000,000.00");
    }
}
