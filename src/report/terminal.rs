use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{LicenseRecord, LicenseSource};

/// Print the run summary to stdout; with `verbose`, also a table of every record.
pub fn render(records: &[LicenseRecord], output: &Path, verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let files = records
        .iter()
        .filter(|r| matches!(r.source, LicenseSource::LicenseFile(_)))
        .count();
    let declared = records
        .iter()
        .filter(|r| matches!(r.source, LicenseSource::Manifest(_)))
        .count();
    let overrides = records
        .iter()
        .filter(|r| r.source == LicenseSource::Override)
        .count();

    println!(
        "  {} {} dependencies ({} license files, {} declared, {} overrides)",
        "→".cyan(),
        records.len(),
        files,
        declared,
        overrides
    );

    if verbose && !records.is_empty() {
        println!("{}", render_table(records));
    }

    println!("  {} Wrote {}", "✓".green(), output.display().to_string().bold());
}

fn render_table(records: &[LicenseRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Lines").add_attribute(Attribute::Bold),
        ]);

    for record in records {
        let source_color = match record.source {
            LicenseSource::LicenseFile(_) => Color::Green,
            LicenseSource::Manifest(_) => Color::Yellow,
            LicenseSource::Override => Color::Magenta,
        };

        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(record.source.to_string()).fg(source_color),
            Cell::new(record.text.lines().count()).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
