use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use larder_core::{DomainError, OwnerId, UnitId, ValueObject};

/// A recorded factor from one unit straight to another.
///
/// Semantics: `quantity_in_target = quantity_in_source * factor`. Edges are
/// directed and carry no symmetry or transitivity guarantees — a `cup -> tbsp`
/// edge says nothing about `tbsp -> cup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub target: UnitId,
    pub factor: f64,
}

impl ValueObject for Conversion {}

/// A measurement unit in an owner's catalog, with its outgoing conversion edges.
///
/// A unit with no conversions (e.g. "piece") is incompatible with every other
/// unit; it still converts to itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementUnit {
    id: UnitId,
    owner_id: OwnerId,
    name: String,
    conversions: Vec<Conversion>,
}

impl MeasurementUnit {
    pub fn new(
        id: UnitId,
        owner_id: OwnerId,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("unit name cannot be empty"));
        }
        Ok(Self {
            id,
            owner_id,
            name,
            conversions: Vec::new(),
        })
    }

    /// Record a direct conversion edge from this unit to `target`.
    ///
    /// Rejects non-positive factors and duplicate targets; the engine's lookup
    /// assumes at most one edge per target.
    pub fn with_conversion(mut self, target: UnitId, factor: f64) -> Result<Self, DomainError> {
        if !(factor > 0.0) || !factor.is_finite() {
            return Err(DomainError::validation(
                "conversion factor must be positive and finite",
            ));
        }
        if target == self.id {
            return Err(DomainError::validation(
                "conversion target cannot be the unit itself",
            ));
        }
        if self.conversions.iter().any(|c| c.target == target) {
            return Err(DomainError::conflict("duplicate conversion target"));
        }
        self.conversions.push(Conversion { target, factor });
        Ok(self)
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn conversions(&self) -> &[Conversion] {
        &self.conversions
    }

    /// Factor of the direct edge to `target`, if one is recorded.
    fn factor_to(&self, target: UnitId) -> Option<f64> {
        self.conversions
            .iter()
            .find(|c| c.target == target)
            .map(|c| c.factor)
    }
}

/// Read-only snapshot of an owner's measurement units, keyed by id.
///
/// Callers receive one per call; the catalog never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitCatalog {
    units: HashMap<UnitId, MeasurementUnit>,
}

impl UnitCatalog {
    pub fn new(units: impl IntoIterator<Item = MeasurementUnit>) -> Self {
        Self {
            units: units.into_iter().map(|u| (u.id(), u)).collect(),
        }
    }

    pub fn get(&self, id: UnitId) -> Option<&MeasurementUnit> {
        self.units.get(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Convert `quantity` from `source` to `target` using a single direct edge.
    ///
    /// Returns `None` when the source unit is unknown or no direct edge to
    /// `target` exists. No multi-hop search is performed even when a chained
    /// path exists; that is a deliberate contract, not a shortcut.
    pub fn convert(&self, source: UnitId, target: UnitId, quantity: f64) -> Option<f64> {
        // Identity needs no catalog entry at all.
        if source == target {
            return Some(quantity);
        }
        let unit = self.units.get(&source)?;
        let factor = unit.factor_to(target)?;
        Some(quantity * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn uid(n: u128) -> UnitId {
        UnitId::from_uuid(Uuid::from_u128(n))
    }

    fn owner() -> OwnerId {
        OwnerId::from_uuid(Uuid::from_u128(0xA))
    }

    fn catalog_cup_tbsp() -> UnitCatalog {
        // cup -> tbsp at 16, no reverse edge.
        let cup = MeasurementUnit::new(uid(1), owner(), "cup")
            .unwrap()
            .with_conversion(uid(2), 16.0)
            .unwrap();
        let tbsp = MeasurementUnit::new(uid(2), owner(), "tbsp").unwrap();
        UnitCatalog::new([cup, tbsp])
    }

    #[test]
    fn identity_conversion_needs_no_edges() {
        let catalog = catalog_cup_tbsp();
        assert_eq!(catalog.convert(uid(2), uid(2), 3.25), Some(3.25));
        // Identity also holds for units the catalog has never seen.
        assert_eq!(catalog.convert(uid(99), uid(99), 1.5), Some(1.5));
    }

    #[test]
    fn direct_factor_is_applied() {
        let catalog = catalog_cup_tbsp();
        assert_eq!(catalog.convert(uid(1), uid(2), 0.5), Some(8.0));
    }

    #[test]
    fn unknown_source_unit_is_not_convertible() {
        let catalog = catalog_cup_tbsp();
        assert_eq!(catalog.convert(uid(99), uid(2), 1.0), None);
    }

    #[test]
    fn missing_edge_is_not_convertible() {
        let catalog = catalog_cup_tbsp();
        // tbsp has no edge back to cup.
        assert_eq!(catalog.convert(uid(2), uid(1), 16.0), None);
    }

    #[test]
    fn no_transitive_search() {
        // cup -> tbsp -> tsp exists as a chain, but cup -> tsp has no edge.
        let cup = MeasurementUnit::new(uid(1), owner(), "cup")
            .unwrap()
            .with_conversion(uid(2), 16.0)
            .unwrap();
        let tbsp = MeasurementUnit::new(uid(2), owner(), "tbsp")
            .unwrap()
            .with_conversion(uid(3), 3.0)
            .unwrap();
        let tsp = MeasurementUnit::new(uid(3), owner(), "tsp").unwrap();
        let catalog = UnitCatalog::new([cup, tbsp, tsp]);

        assert_eq!(catalog.convert(uid(1), uid(3), 1.0), None);
    }

    #[test]
    fn rejects_empty_name() {
        let err = MeasurementUnit::new(uid(1), owner(), "   ").unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn rejects_non_positive_factor() {
        let unit = MeasurementUnit::new(uid(1), owner(), "cup").unwrap();
        let err = unit.with_conversion(uid(2), 0.0).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn rejects_duplicate_conversion_target() {
        let unit = MeasurementUnit::new(uid(1), owner(), "cup")
            .unwrap()
            .with_conversion(uid(2), 16.0)
            .unwrap();
        let err = unit.with_conversion(uid(2), 15.0).unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("expected Conflict error"),
        }
    }

    #[test]
    fn rejects_self_conversion() {
        let unit = MeasurementUnit::new(uid(1), owner(), "cup").unwrap();
        assert!(unit.with_conversion(uid(1), 1.0).is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: identity conversion returns the quantity unchanged for
            /// any unit, with or without catalog entries.
            #[test]
            fn identity_is_exact(q in -1.0e9_f64..1.0e9, n in 0u128..1000) {
                let catalog = catalog_cup_tbsp();
                prop_assert_eq!(catalog.convert(uid(n), uid(n), q), Some(q));
            }

            /// Property: a direct edge multiplies by exactly the stored factor.
            #[test]
            fn direct_edge_applies_factor(q in 0.0_f64..1.0e6, f in 1.0e-6_f64..1.0e6) {
                let a = MeasurementUnit::new(uid(1), owner(), "a")
                    .unwrap()
                    .with_conversion(uid(2), f)
                    .unwrap();
                let catalog = UnitCatalog::new([a]);
                prop_assert_eq!(catalog.convert(uid(1), uid(2), q), Some(q * f));
            }
        }
    }
}
