//! Measurement-unit catalog and direct unit conversion.
//!
//! This crate contains the per-owner unit catalog, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod unit;

pub use unit::{Conversion, MeasurementUnit, UnitCatalog};
