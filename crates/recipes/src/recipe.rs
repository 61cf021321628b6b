use serde::{Deserialize, Serialize};

use larder_core::{DomainError, IngredientId, OwnerId, RecipeId, UnitId};

/// One ingredient line of a recipe: how much of what, in which unit, for the
/// recipe's base number of servings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub ingredient_id: IngredientId,
    pub unit_id: UnitId,
    pub quantity: f64,
}

/// A recipe owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    owner_id: OwnerId,
    name: String,
    /// Number of servings the line quantities describe.
    servings: f64,
    lines: Vec<RecipeLine>,
}

impl Recipe {
    pub fn new(
        id: RecipeId,
        owner_id: OwnerId,
        name: impl Into<String>,
        servings: f64,
        lines: Vec<RecipeLine>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("recipe name cannot be empty"));
        }
        if !(servings > 0.0) || !servings.is_finite() {
            return Err(DomainError::validation("servings must be positive"));
        }
        if lines.iter().any(|l| !l.quantity.is_finite() || l.quantity <= 0.0) {
            return Err(DomainError::validation(
                "line quantities must be positive finite numbers",
            ));
        }
        Ok(Self {
            id,
            owner_id,
            name,
            servings,
            lines,
        })
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn servings(&self) -> f64 {
        self.servings
    }

    pub fn lines(&self) -> &[RecipeLine] {
        &self.lines
    }

    /// Lines with quantities scaled linearly from the base servings to
    /// `servings`.
    pub fn scaled_lines(&self, servings: f64) -> Vec<RecipeLine> {
        let factor = servings / self.servings;
        self.lines
            .iter()
            .map(|l| RecipeLine {
                ingredient_id: l.ingredient_id,
                unit_id: l.unit_id,
                quantity: l.quantity * factor,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn line(qty: f64) -> RecipeLine {
        RecipeLine {
            ingredient_id: IngredientId::from_uuid(Uuid::from_u128(1)),
            unit_id: UnitId::from_uuid(Uuid::from_u128(2)),
            quantity: qty,
        }
    }

    fn recipe(servings: f64, lines: Vec<RecipeLine>) -> Result<Recipe, DomainError> {
        Recipe::new(
            RecipeId::from_uuid(Uuid::from_u128(0xEC)),
            OwnerId::from_uuid(Uuid::from_u128(0xA)),
            "pancakes",
            servings,
            lines,
        )
    }

    #[test]
    fn scaling_is_linear() {
        let recipe = recipe(2.0, vec![line(1.5), line(4.0)]).unwrap();
        let scaled = recipe.scaled_lines(5.0);
        assert!((scaled[0].quantity - 3.75).abs() < 1e-9);
        assert!((scaled[1].quantity - 10.0).abs() < 1e-9);
    }

    #[test]
    fn scaling_to_base_servings_is_identity() {
        let recipe = recipe(4.0, vec![line(2.0)]).unwrap();
        let scaled = recipe.scaled_lines(4.0);
        assert_eq!(scaled[0].quantity, 2.0);
    }

    #[test]
    fn rejects_empty_name() {
        let err = Recipe::new(
            RecipeId::from_uuid(Uuid::from_u128(0xEC)),
            OwnerId::from_uuid(Uuid::from_u128(0xA)),
            "  ",
            2.0,
            vec![],
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn rejects_non_positive_servings() {
        assert!(recipe(0.0, vec![]).is_err());
        assert!(recipe(-2.0, vec![]).is_err());
    }

    #[test]
    fn rejects_non_positive_line_quantity() {
        assert!(recipe(2.0, vec![line(0.0)]).is_err());
    }
}
