//! Inventory aggregation, availability checks, and stock deduction.
//!
//! All operations are pure over the snapshots they receive. Conversion misses
//! (unknown unit, missing edge) are expected and silently skipped; nothing in
//! this module errors for them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use larder_catalog::UnitCatalog;
use larder_core::{IngredientId, OwnerId, UnitId, ValueObject};

use crate::record::InventoryRecord;

/// Quantities at or below this threshold are treated as exhausted and the
/// record is dropped, so floating-point residue never accumulates as
/// near-empty entries.
pub const QUANTITY_EPSILON: f64 = 1e-3;

/// A request to consume stock, expressed in the unit the recipe calls for.
/// Transient — never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionRequest {
    pub owner_id: OwnerId,
    pub ingredient_id: IngredientId,
    pub unit_id: UnitId,
    pub quantity: f64,
}

/// One draw against a single record, in that record's own unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductedLine {
    pub unit_id: UnitId,
    pub quantity: f64,
}

impl ValueObject for DeductedLine {}

/// Outcome of a deduction: the full updated inventory snapshot plus the lines
/// that were drawn. A shortfall is not signalled here; callers compare the
/// requested quantity against the deducted total to detect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionResult {
    pub inventory: Vec<InventoryRecord>,
    pub deducted: Vec<DeductedLine>,
}

/// Availability of an ingredient, expressed in the required unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub sufficient: bool,
    pub available: f64,
}

/// Total stock of `ingredient_id` expressed in `target_unit`.
///
/// Records whose unit cannot be converted to `target_unit` are skipped, not
/// errored: stock held in incompatible units counts as practically absent.
/// Owner scoping happens upstream; this routine sums whatever it is given.
pub fn sum_in_unit(
    ingredient_id: IngredientId,
    target_unit: UnitId,
    inventory: &[InventoryRecord],
    catalog: &UnitCatalog,
) -> f64 {
    inventory
        .iter()
        .filter(|r| r.ingredient_id() == ingredient_id)
        .filter_map(|r| catalog.convert(r.unit_id(), target_unit, r.quantity()))
        .sum()
}

/// Compare required stock against what is on hand, in the required unit.
/// Exact equality counts as sufficient.
pub fn check_availability(
    ingredient_id: IngredientId,
    required_unit: UnitId,
    required_quantity: f64,
    inventory: &[InventoryRecord],
    catalog: &UnitCatalog,
) -> Availability {
    let available = sum_in_unit(ingredient_id, required_unit, inventory, catalog);
    Availability {
        sufficient: available >= required_quantity,
        available,
    }
}

enum Outcome {
    Keep(f64),
    Remove,
}

/// Consume stock to satisfy `request`, greedily and in a single pass.
///
/// Candidate records (owner and ingredient both match) are processed with
/// records already in the required unit first; the partition is the only
/// ordering contract, within-group order follows the input. Each candidate is
/// drawn down by at most the outstanding remainder converted into its unit;
/// records reduced to [`QUANTITY_EPSILON`] or below are removed. Candidates
/// whose unit has no edge from the required unit are left untouched.
///
/// Progress against the remainder is only counted when the draw can be
/// converted *back* into the required unit. With an asymmetric conversion
/// graph the remainder therefore stays put after a successful draw, and later
/// candidates are drawn on for the same shortfall. Skipped records are never
/// revisited.
pub fn deduct(
    request: &DeductionRequest,
    inventory: &[InventoryRecord],
    catalog: &UnitCatalog,
) -> DeductionResult {
    if request.quantity <= 0.0 {
        return DeductionResult {
            inventory: inventory.to_vec(),
            deducted: Vec::new(),
        };
    }

    let mut candidates: Vec<usize> = inventory
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.owner_id() == request.owner_id && r.ingredient_id() == request.ingredient_id
        })
        .map(|(i, _)| i)
        .collect();
    // Stable partition: exact-unit matches first, input order otherwise.
    candidates.sort_by_key(|&i| inventory[i].unit_id() != request.unit_id);

    let mut outcomes: HashMap<usize, Outcome> = HashMap::new();
    let mut deducted = Vec::new();
    let mut remaining = request.quantity;

    for &i in &candidates {
        if remaining <= 0.0 {
            break;
        }
        let record = &inventory[i];
        let Some(needed) = catalog.convert(request.unit_id, record.unit_id(), remaining) else {
            continue;
        };
        let take = record.quantity().min(needed);
        let left = record.quantity() - take;
        let outcome = if left > QUANTITY_EPSILON {
            Outcome::Keep(left)
        } else {
            Outcome::Remove
        };
        outcomes.insert(i, outcome);
        deducted.push(DeductedLine {
            unit_id: record.unit_id(),
            quantity: take,
        });
        if let Some(progress) = catalog.convert(record.unit_id(), request.unit_id, take) {
            remaining -= progress;
        }
    }

    let inventory = inventory
        .iter()
        .enumerate()
        .filter_map(|(i, r)| match outcomes.get(&i) {
            None => Some(r.clone()),
            Some(Outcome::Keep(q)) => Some(r.with_quantity(*q)),
            Some(Outcome::Remove) => None,
        })
        .collect();

    DeductionResult { inventory, deducted }
}
