//! Cook-session orchestration: per-line availability preview and the actual
//! deduction run on cook completion.

use serde::{Deserialize, Serialize};

use larder_catalog::UnitCatalog;
use larder_core::IngredientId;
use larder_inventory::{
    check_availability, deduct, Availability, DeductedLine, DeductionRequest, InventoryRecord,
};

use crate::recipe::Recipe;

/// Availability of one scaled recipe line, for UI feedback before cooking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAvailability {
    pub ingredient_id: IngredientId,
    pub required: f64,
    pub availability: Availability,
}

/// Per-ingredient result of a cook run.
///
/// `deducted_in_required_unit` only counts draws that convert back into the
/// required unit, so `shortfall` is the gap the pantry could not (verifiably)
/// cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookSummary {
    pub ingredient_id: IngredientId,
    pub required: f64,
    pub deducted_in_required_unit: f64,
    pub shortfall: f64,
    pub lines: Vec<DeductedLine>,
}

impl CookSummary {
    pub fn fully_satisfied(&self) -> bool {
        self.shortfall <= 0.0
    }
}

/// Outcome of cooking a recipe: the inventory after all deductions plus one
/// summary per recipe line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookOutcome {
    pub inventory: Vec<InventoryRecord>,
    pub ingredients: Vec<CookSummary>,
}

/// Check every scaled line of `recipe` against a shared inventory snapshot.
///
/// Read-only; lines do not see each other's demand. An insufficient line is a
/// normal outcome for display, not a failure.
pub fn preview(
    recipe: &Recipe,
    servings: f64,
    inventory: &[InventoryRecord],
    catalog: &UnitCatalog,
) -> Vec<LineAvailability> {
    recipe
        .scaled_lines(servings)
        .into_iter()
        .map(|line| LineAvailability {
            ingredient_id: line.ingredient_id,
            required: line.quantity,
            availability: check_availability(
                line.ingredient_id,
                line.unit_id,
                line.quantity,
                inventory,
                catalog,
            ),
        })
        .collect()
}

/// Deduct every scaled line of `recipe` from `inventory`, threading the
/// updated snapshot into each subsequent line so repeated ingredients see
/// earlier draws. Proceeds through shortfalls and under-deducts silently; the
/// summaries carry what was actually taken.
pub fn cook(
    recipe: &Recipe,
    servings: f64,
    inventory: &[InventoryRecord],
    catalog: &UnitCatalog,
) -> CookOutcome {
    let mut inventory = inventory.to_vec();
    let mut ingredients = Vec::new();

    for line in recipe.scaled_lines(servings) {
        let request = DeductionRequest {
            owner_id: recipe.owner_id(),
            ingredient_id: line.ingredient_id,
            unit_id: line.unit_id,
            quantity: line.quantity,
        };
        let result = deduct(&request, &inventory, catalog);

        let deducted_in_required_unit: f64 = result
            .deducted
            .iter()
            .filter_map(|d| catalog.convert(d.unit_id, line.unit_id, d.quantity))
            .sum();
        let shortfall = (line.quantity - deducted_in_required_unit).max(0.0);
        if shortfall > 0.0 {
            tracing::debug!(
                ingredient = %line.ingredient_id,
                required = line.quantity,
                deducted = deducted_in_required_unit,
                "pantry short on ingredient, under-deducting"
            );
        }

        ingredients.push(CookSummary {
            ingredient_id: line.ingredient_id,
            required: line.quantity,
            deducted_in_required_unit,
            shortfall,
            lines: result.deducted,
        });
        inventory = result.inventory;
    }

    CookOutcome {
        inventory,
        ingredients,
    }
}
