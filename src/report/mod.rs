//! Report renderers for analyzed ingredient lists.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects
//!   `--verbose` / `--quiet`.
//! - [`pdf`] — multi-page PDF with cover (stat cards + EWG score
//!   distribution), safety-level summary, and a full ingredient table.

pub mod pdf;
pub mod terminal;
