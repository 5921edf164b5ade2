use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{FullReport, ReportRecord, VersionStatus};

/// Render a colored terminal report.
pub fn render(report: &FullReport, verbose: bool, quiet: bool) -> Result<()> {
    let total = report.records().count();
    let sync_count = count(report, VersionStatus::InSync);
    let drift_count = count(report, VersionStatus::Drift);
    let unknown_count = count(report, VersionStatus::Unknown);

    if quiet {
        println!(
            "Total: {}  In sync: {}  Drift: {}  Unknown: {}",
            total,
            sync_count.to_string().green(),
            drift_count.to_string().red(),
            unknown_count.to_string().yellow(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "kit-deps-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Edges checked   : {:>4}", total));
    println!(
        " │  {:<48} │",
        format!("{}  In sync       : {:>4}", "✓".green(), sync_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Drift         : {:>4}", "✗".red(), drift_count)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Unknown       : {:>4}", "?".yellow(), unknown_count)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    for ecosystem in &report.ecosystems {
        let shown: Vec<&ReportRecord> = ecosystem
            .records
            .iter()
            .filter(|r| verbose || r.status() != VersionStatus::InSync)
            .collect();

        if shown.is_empty() {
            println!(
                " {} {} all dependents in sync\n",
                "[OK]".green().bold(),
                ecosystem.ecosystem
            );
            continue;
        }

        println!(" {} {}\n", "[KIT]".cyan().bold(), ecosystem.ecosystem);
        println!("{}\n", render_table(&shown));
    }

    Ok(())
}

fn render_table(records: &[&ReportRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Project").add_attribute(Attribute::Bold),
            Cell::new("Dependency").add_attribute(Attribute::Bold),
            Cell::new("Expected").add_attribute(Attribute::Bold),
            Cell::new("Is").add_attribute(Attribute::Bold),
            Cell::new("Current").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for record in records {
        let (status_str, status_color) = match record.status() {
            VersionStatus::InSync => ("✓ in sync", Color::Green),
            VersionStatus::Drift => ("✗ drift", Color::Red),
            VersionStatus::Unknown => ("? unknown", Color::Yellow),
        };

        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(&record.dependency),
            Cell::new(record.expected.as_deref().unwrap_or("-")),
            Cell::new(record.is.as_deref().unwrap_or("-")),
            Cell::new(record.current.as_deref().unwrap_or("-")),
            Cell::new(status_str)
                .fg(status_color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    table
}

fn count(report: &FullReport, status: VersionStatus) -> usize {
    report
        .records()
        .filter(|r| r.status() == status)
        .count()
}
