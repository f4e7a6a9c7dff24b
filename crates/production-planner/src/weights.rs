//! Flavor-biased base weights for production candidates.

use strategy_core::Personality;
use strategy_types::{FlavorType, FlavorVector};

use crate::buildable::Buildable;

/// Base weight computation shared by every buildable kind.
pub struct ProductionWeights;

impl ProductionWeights {
    /// Combined preference on one axis: personality plus active strategies,
    /// never below zero.
    pub fn leader_flavor(personality: &Personality, strategy_flavors: &FlavorVector, flavor_type: FlavorType) -> i32 {
        (personality.value(flavor_type) + strategy_flavors.value(flavor_type)).max(0)
    }

    /// Combined preference on every axis, negative axes raised to zero.
    pub fn leader_flavors(personality: &Personality, strategy_flavors: &FlavorVector) -> FlavorVector {
        let mut combined = *personality.flavors();
        combined += strategy_flavors;
        combined.clamped_non_negative()
    }

    /// Sum over axes of the item's flavor times the leader's combined flavor.
    pub fn base_weight(item: &Buildable, personality: &Personality, strategy_flavors: &FlavorVector) -> f64 {
        item.flavors.dot(&Self::leader_flavors(personality, strategy_flavors)) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildable::{BuildableKind, UnitTask};
    use strategy_types::Flavor;

    fn personality() -> Personality {
        Personality::new(
            [
                Flavor::new(FlavorType::Expansion, 6),
                Flavor::new(FlavorType::Growth, 4),
                Flavor::new(FlavorType::Offense, 5),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn test_base_weight_from_personality() {
        let settler = Buildable::unit("settler", UnitTask::Settle, 8)
            .with_flavor(FlavorType::Expansion, 9)
            .with_flavor(FlavorType::Growth, 2);
        let weight = ProductionWeights::base_weight(&settler, &personality(), &FlavorVector::new());
        assert_eq!(weight, 9.0 * 6.0 + 2.0 * 4.0);
    }

    #[test]
    fn test_strategy_flavors_shift_weight() {
        let settler = Buildable::unit("settler", UnitTask::Settle, 8).with_flavor(FlavorType::Expansion, 2);
        let mut strategies = FlavorVector::new();
        strategies.add(FlavorType::Expansion, 75);
        let weight = ProductionWeights::base_weight(&settler, &personality(), &strategies);
        assert_eq!(weight, 2.0 * 81.0);
    }

    #[test]
    fn test_negative_leader_flavor_clamped() {
        let warrior = Buildable::unit("warrior", UnitTask::Attack, 4).with_flavor(FlavorType::Offense, 3);
        let mut strategies = FlavorVector::new();
        strategies.add(FlavorType::Offense, -50);
        assert_eq!(ProductionWeights::base_weight(&warrior, &personality(), &strategies), 0.0);
    }

    #[test]
    fn test_leader_flavors_match_single_axis() {
        let mut strategies = FlavorVector::new();
        strategies.add(FlavorType::Offense, -50);
        strategies.add(FlavorType::Expansion, 10);
        let combined = ProductionWeights::leader_flavors(&personality(), &strategies);
        for axis in FlavorType::ALL {
            assert_eq!(
                combined.value(axis),
                ProductionWeights::leader_flavor(&personality(), &strategies, axis)
            );
        }
        assert_eq!(combined.value(FlavorType::Expansion), 16);
    }

    #[test]
    fn test_no_flavors_no_weight() {
        let item = Buildable::new("palace", BuildableKind::Building, 1);
        assert_eq!(ProductionWeights::base_weight(&item, &personality(), &FlavorVector::new()), 0.0);
    }
}
