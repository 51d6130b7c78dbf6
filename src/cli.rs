use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ingredient-checkr",
    about = "Analyze product ingredient labels and flag ingredients of concern",
    version
)]
pub struct Cli {
    /// Ingredient list to analyze; reads stdin when omitted and --file is not set
    pub ingredients: Option<String>,

    /// Read the ingredient list from a file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Policy config file [default: ./.ingredient-checkr/config.toml, fallback ~/.config/ingredient-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// PDF output path; use without value to default to ingredient-report.pdf
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "ingredient-report.pdf")]
    pub pdf: Option<PathBuf>,

    /// Show all ingredients (not just warnings/errors)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Pdf,
}
