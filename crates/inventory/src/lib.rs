//! Pantry inventory and the deduction engine.
//!
//! This crate contains business rules for on-hand ingredient stock,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). Every operation receives a full inventory snapshot and returns a
//! new one; the surrounding application must serialize writes per owner.

pub mod deduction;
pub mod record;

pub use deduction::{
    check_availability, deduct, sum_in_unit, Availability, DeductedLine, DeductionRequest,
    DeductionResult, QUANTITY_EPSILON,
};
pub use record::InventoryRecord;
