//! Personality and Threshold Modifiers
//!
//! An actor's personality is a standing flavor vector. Predicates scale their
//! thresholds by it through [`weight_threshold_modifier`].

use serde::{Deserialize, Serialize};
use strategy_types::{Flavor, FlavorType, FlavorVector};

use crate::actor::StrategyActor;
use crate::config::PersonalityConfig;
use crate::rng::RandomSource;

/// Dot product of the actor's personality and a strategy's own flavors,
/// saturated to the `i32` range.
pub fn weight_threshold_modifier<A: StrategyActor + ?Sized>(
    actor: &A,
    strategy_flavors: &FlavorVector,
) -> i32 {
    let preferences: FlavorVector = strategy_flavors
        .non_zero()
        .map(|flavor| Flavor::new(flavor.flavor_type, actor.personal_preference(flavor.flavor_type)))
        .collect();
    let product = preferences.dot(strategy_flavors);
    i32::try_from(product).unwrap_or(if product < 0 { i32::MIN } else { i32::MAX })
}

/// Standing preferences of one actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Personality {
    flavors: FlavorVector,
}

impl Personality {
    pub fn new(flavors: FlavorVector) -> Self {
        Self { flavors }
    }

    /// Seeds a personality from `base`, moving every set axis by a uniform
    /// offset in `[-plus_minus, plus_minus]` and clamping to `[minimum, maximum]`.
    ///
    /// Axes that are zero in `base` stay zero. `plus_minus <= 0` draws nothing.
    /// Inverted bounds resolve to `maximum`.
    pub fn jittered<R: RandomSource + ?Sized>(
        base: &FlavorVector,
        plus_minus: i32,
        minimum: i32,
        maximum: i32,
        rng: &mut R,
    ) -> Self {
        let plus_minus = i64::from(plus_minus);
        let span = u32::try_from(plus_minus * 2 + 1).unwrap_or(u32::MAX);
        let mut flavors = FlavorVector::new();
        for flavor in base.non_zero() {
            let offset = if plus_minus > 0 {
                i64::from(rng.next_int(span)) - plus_minus
            } else {
                0
            };
            let value = (i64::from(flavor.value) + offset)
                .max(i64::from(minimum))
                .min(i64::from(maximum));
            // Bounded by `maximum`, so the narrowing is lossless
            flavors.set(flavor.flavor_type, value as i32);
        }
        Self { flavors }
    }

    /// [`jittered`](Self::jittered) with the configured bounds.
    pub fn from_config<R: RandomSource + ?Sized>(
        base: &FlavorVector,
        config: &PersonalityConfig,
        rng: &mut R,
    ) -> Self {
        Self::jittered(base, config.plus_minus, config.minimum, config.maximum, rng)
    }

    pub fn value(&self, flavor_type: FlavorType) -> i32 {
        self.flavors.value(flavor_type)
    }

    pub fn flavors(&self) -> &FlavorVector {
        &self.flavors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedDraws;
    use strategy_types::{Flavor, TechOrCivicRef};

    struct Fixed(Personality);

    impl StrategyActor for Fixed {
        fn is_minor_actor(&self) -> bool {
            false
        }

        fn has_tech_or_civic(&self, _reference: &TechOrCivicRef) -> bool {
            false
        }

        fn personal_preference(&self, flavor: FlavorType) -> i32 {
            self.0.value(flavor)
        }
    }

    fn base() -> FlavorVector {
        [
            Flavor::new(FlavorType::Offense, 5),
            Flavor::new(FlavorType::Expansion, 8),
            Flavor::new(FlavorType::Gold, 1),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_modifier_is_dot_product() {
        let actor = Fixed(Personality::new(base()));
        let strategy: FlavorVector = [
            Flavor::new(FlavorType::Offense, 15),
            Flavor::new(FlavorType::Expansion, -2),
            Flavor::new(FlavorType::Wonder, -10),
        ]
        .into_iter()
        .collect();
        assert_eq!(weight_threshold_modifier(&actor, &strategy), 75 - 16);
    }

    #[test]
    fn test_modifier_saturates() {
        let actor = Fixed(Personality::new(
            [Flavor::new(FlavorType::Offense, i32::MAX), Flavor::new(FlavorType::Gold, i32::MIN)]
                .into_iter()
                .collect(),
        ));
        let strategy: FlavorVector = [Flavor::new(FlavorType::Offense, i32::MAX)].into_iter().collect();
        assert_eq!(weight_threshold_modifier(&actor, &strategy), i32::MAX);
        let strategy: FlavorVector = [Flavor::new(FlavorType::Gold, i32::MAX)].into_iter().collect();
        assert_eq!(weight_threshold_modifier(&actor, &strategy), i32::MIN);
    }

    #[test]
    fn test_modifier_zero_for_empty_flavors() {
        let actor = Fixed(Personality::new(base()));
        assert_eq!(weight_threshold_modifier(&actor, &FlavorVector::new()), 0);
    }

    #[test]
    fn test_jitter_disabled() {
        let mut draws = ScriptedDraws::new(vec![4]);
        let personality = Personality::jittered(&base(), 0, 0, 20, &mut draws);
        assert_eq!(personality.flavors(), &base());
        assert_eq!(draws.consumed(), 0);
    }

    #[test]
    fn test_jitter_extreme_arguments_do_not_overflow() {
        let mut draws = ScriptedDraws::new(vec![0, u32::MAX - 1]);
        let personality = Personality::jittered(&base(), i32::MAX, 10, 5, &mut draws);
        assert_eq!(personality.value(FlavorType::Offense), 5);
        assert_eq!(personality.value(FlavorType::Gold), 5);

        // Draws continue at offense = u32::MAX - 1, gold = 0
        let wide = Personality::jittered(&base(), i32::MAX, i32::MIN, i32::MAX, &mut draws);
        assert_eq!(draws.consumed(), 6);
        assert_eq!(wide.value(FlavorType::Offense), i32::MAX);
        assert_eq!(wide.value(FlavorType::Gold), i32::MIN + 2);
    }

    #[test]
    fn test_jitter_offsets_and_clamps() {
        // Axes are visited offense, gold, expansion; draws 4, 0, 2 over a
        // span of 5 give offsets +2, -2, 0
        let mut draws = ScriptedDraws::new(vec![4, 0, 2]);
        let personality = Personality::jittered(&base(), 2, 2, 7, &mut draws);
        assert_eq!(personality.value(FlavorType::Offense), 7);
        assert_eq!(personality.value(FlavorType::Gold), 2);
        assert_eq!(personality.value(FlavorType::Expansion), 7);
        assert_eq!(personality.value(FlavorType::Science), 0);
        assert_eq!(draws.consumed(), 3);
    }
}
