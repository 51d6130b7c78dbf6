//! `ingredient-checkr` — analyze product ingredient labels and enforce policy.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load verdict policy ([`config::load_config`]).
//! 3. Acquire the raw label text ([`input`]).
//! 4. Analyze it against the reference table ([`ingredient::analyzer`]).
//! 5. Apply policy verdicts ([`config::apply_policy`]).
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0` (clean) or `1` (at least one [`models::PolicyVerdict::Error`]).

mod cli;
mod config;
mod ingredient;
mod input;
mod models;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, ReportFormat};
use config::{apply_policy, load_config};
use ingredient::analyzer::analyze_ingredients;
use models::{Assessment, PolicyVerdict};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&working_dir, cli.config.as_deref())?;

    let source = source_label(&cli);
    let text = input::read_input(&cli)?;

    let records = analyze_ingredients(&text);

    if records.is_empty() {
        eprintln!("No ingredients found in {}", source);
        std::process::exit(1);
    }

    if !cli.quiet {
        eprintln!("  {} {} ingredients", "→".cyan(), records.len());
    }

    let assessments: Vec<Assessment> = records
        .into_iter()
        .map(|ingredient| {
            let verdict = apply_policy(&config, &ingredient);
            Assessment { ingredient, verdict }
        })
        .collect();

    // Resolve effective report format: --pdf implies PDF format
    let report_format = match &cli.pdf {
        Some(_) => ReportFormat::Pdf,
        None => cli.report.clone(),
    };
    let pdf_path = cli
        .pdf
        .clone()
        .unwrap_or_else(|| PathBuf::from("ingredient-report.pdf"));

    match report_format {
        ReportFormat::Terminal => {
            report::terminal::render(&assessments, &source, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&assessments)?);
        }
        ReportFormat::Pdf => {
            report::pdf::render(&assessments, &source, &pdf_path)?;
        }
    }

    // Exit code: 1 if any error verdict found
    let has_errors = assessments
        .iter()
        .any(|a| a.verdict == PolicyVerdict::Error);

    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}

fn source_label(cli: &Cli) -> String {
    if cli.ingredients.is_some() {
        "command line".to_string()
    } else if let Some(path) = &cli.file {
        path.display().to_string()
    } else {
        "stdin".to_string()
    }
}
