use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Assessment, PolicyVerdict, SafetyLevel};

/// Render a colored terminal report.
pub fn render(assessments: &[Assessment], source: &str, verbose: bool, quiet: bool) -> Result<()> {
    let total = assessments.len();
    let pass_count = count(assessments, &PolicyVerdict::Pass);
    let warn_count = count(assessments, &PolicyVerdict::Warn);
    let error_count = count(assessments, &PolicyVerdict::Error);

    if quiet {
        println!(
            "Total: {}  Pass: {}  Warn: {}  Error: {}",
            total,
            pass_count.to_string().green(),
            warn_count.to_string().yellow(),
            error_count.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "ingredient-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Analyzing: {}\n", source);

    let pass_names = summarize_names(assessments, &PolicyVerdict::Pass);
    let warn_names = summarize_names(assessments, &PolicyVerdict::Warn);
    let error_names = summarize_names(assessments, &PolicyVerdict::Error);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total ingredients  : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Pass            : {:>4}  {}", "✓".green(), pass_count, pass_names)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Warn            : {:>4}  {}", "⚠".yellow(), warn_count, warn_names)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Error           : {:>4}  {}", "✗".red(), error_count, error_names)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if error_count > 0 {
        println!(" {} Ingredients requiring attention:\n", "[ERROR]".red().bold());
        render_table(assessments, &PolicyVerdict::Error);
        println!();
    }

    if warn_count > 0 {
        println!(" {} Ingredients with warnings:\n", "[WARN]".yellow().bold());
        render_table(assessments, &PolicyVerdict::Warn);
        println!();
    }

    if verbose && pass_count > 0 {
        println!(" {} All passing ingredients:\n", "[PASS]".green().bold());
        render_table(assessments, &PolicyVerdict::Pass);
        println!();
    }

    Ok(())
}

fn count(assessments: &[Assessment], verdict: &PolicyVerdict) -> usize {
    assessments.iter().filter(|a| &a.verdict == verdict).count()
}

fn render_table(assessments: &[Assessment], verdict_filter: &PolicyVerdict) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Function").add_attribute(Attribute::Bold),
            Cell::new("EWG").add_attribute(Attribute::Bold),
            Cell::new("Safety").add_attribute(Attribute::Bold),
            Cell::new("Reason for concern").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
        ]);

    for a in assessments.iter().filter(|a| &a.verdict == verdict_filter) {
        let (verdict_str, verdict_color) = match a.verdict {
            PolicyVerdict::Pass => ("✓ pass", Color::Green),
            PolicyVerdict::Warn => ("⚠ warn", Color::Yellow),
            PolicyVerdict::Error => ("✗ error", Color::Red),
        };

        let level_color = match a.ingredient.safety_level {
            SafetyLevel::Low => Color::Green,
            SafetyLevel::Moderate => Color::Yellow,
            SafetyLevel::High => Color::Red,
        };

        let reason = if a.ingredient.reason_for_concern.is_empty() {
            "—"
        } else {
            a.ingredient.reason_for_concern.as_str()
        };

        table.add_row(vec![
            Cell::new(&a.ingredient.name),
            Cell::new(&a.ingredient.function),
            Cell::new(a.ingredient.ewg_score).set_alignment(CellAlignment::Right),
            Cell::new(a.ingredient.safety_level.to_string()).fg(level_color),
            Cell::new(reason),
            Cell::new(verdict_str)
                .fg(verdict_color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

fn summarize_names(assessments: &[Assessment], verdict: &PolicyVerdict) -> String {
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for a in assessments.iter().filter(|a| &a.verdict == verdict) {
        *counts.entry(a.ingredient.name.clone()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(name, cnt)| {
            if *cnt > 1 {
                format!("{} ({})", name, cnt)
            } else {
                name.clone()
            }
        })
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
