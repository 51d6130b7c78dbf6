//! Ingredient list analysis against the built-in safety reference table.
//!
//! - [`database`] — static reference table mapping canonical ingredient names
//!   to [`SafetyRecord`](crate::models::SafetyRecord)s, plus the fallback
//!   record returned for unrecognized ingredients.
//! - [`analyzer`] — entry point that tokenizes raw label text and resolves
//!   each ingredient to a fully populated record.

pub mod analyzer;
pub mod database;
