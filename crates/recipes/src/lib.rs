//! Recipes and the cook-session orchestrator.
//!
//! A recipe is a list of ingredient lines with quantities in specific units.
//! Cooking scales the lines to the requested servings, checks or deducts
//! pantry stock per line, and reports a per-ingredient summary. Shortfalls are
//! reported, never raised: cooking proceeds and under-deducts.

pub mod cook;
pub mod recipe;

pub use cook::{cook, preview, CookOutcome, CookSummary, LineAvailability};
pub use recipe::{Recipe, RecipeLine};
