use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use larder_core::{DomainError, IngredientId, OwnerId, UnitId};

/// One batch of an ingredient on hand, in a single unit.
///
/// Multiple records may share (owner, ingredient) with different units — the
/// normal "same ingredient stored in different units" case. Records are
/// created when stock is added, drawn down by deduction, and dropped entirely
/// once their quantity falls to the near-zero cleanup threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    owner_id: OwnerId,
    ingredient_id: IngredientId,
    unit_id: UnitId,
    quantity: f64,
    added_at: DateTime<Utc>,
}

impl InventoryRecord {
    pub fn new(
        owner_id: OwnerId,
        ingredient_id: IngredientId,
        unit_id: UnitId,
        quantity: f64,
        added_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(DomainError::validation(
                "quantity must be a non-negative finite number",
            ));
        }
        Ok(Self {
            owner_id,
            ingredient_id,
            unit_id,
            quantity,
            added_at,
        })
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub fn ingredient_id(&self) -> IngredientId {
        self.ingredient_id
    }

    pub fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Same batch with a reduced quantity; `added_at` is preserved.
    pub(crate) fn with_quantity(&self, quantity: f64) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn rejects_negative_quantity() {
        let err = InventoryRecord::new(
            OwnerId::from_uuid(Uuid::from_u128(1)),
            IngredientId::from_uuid(Uuid::from_u128(2)),
            UnitId::from_uuid(Uuid::from_u128(3)),
            -1.0,
            Utc::now(),
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn rejects_non_finite_quantity() {
        assert!(InventoryRecord::new(
            OwnerId::from_uuid(Uuid::from_u128(1)),
            IngredientId::from_uuid(Uuid::from_u128(2)),
            UnitId::from_uuid(Uuid::from_u128(3)),
            f64::NAN,
            Utc::now(),
        )
        .is_err());
    }
}
