//! Production Time Discount
//!
//! Slow builds are penalised smoothly: the divisor is
//! `turns ^ (BASE_EXPONENT + EXPONENT_PER_TURN * turns)`.

use crate::choice::WeightedChoiceSet;

/// Exponent applied at zero turns.
pub const BASE_EXPONENT: f64 = 0.15;

/// Growth of the exponent per turn to complete.
pub const EXPONENT_PER_TURN: f64 = 0.004;

/// Discounts `raw_weight` by the estimated turns to complete, clamped to at
/// least one turn. One turn leaves the weight unchanged.
pub fn production_time_discount(raw_weight: f64, turns_to_complete: i32) -> f64 {
    let turns = f64::from(turns_to_complete.max(1));
    raw_weight / turns.powf(BASE_EXPONENT + EXPONENT_PER_TURN * turns)
}

/// Applies [`production_time_discount`] to every candidate of the set.
pub fn reweight_by_turns<K, F>(choices: &WeightedChoiceSet<K>, turns_to_complete: F) -> WeightedChoiceSet<K>
where
    K: Ord + Clone,
    F: Fn(&K) -> i32,
{
    choices
        .iter()
        .map(|(key, weight)| {
            let discounted = production_time_discount(weight, turns_to_complete(key));
            (key.clone(), discounted)
        })
        .collect()
}
