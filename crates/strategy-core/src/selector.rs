//! Production Selector
//!
//! Picks one candidate from a weighted set: drop non-positive weights, keep
//! the top three, lay them over 100 slots and draw one slot.

use tracing::debug;

use crate::choice::{SlotDistribution, WeightedChoiceSet};
use crate::rng::RandomSource;

/// Candidates kept before building the distribution.
pub const TOP_CHOICES: usize = 3;

/// Resolution of the sampling distribution.
pub const DISTRIBUTION_SLOTS: u32 = 100;

/// Weighted stochastic selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductionSelector {
    top_choices: usize,
    slots: u32,
}

impl Default for ProductionSelector {
    fn default() -> Self {
        Self {
            top_choices: TOP_CHOICES,
            slots: DISTRIBUTION_SLOTS,
        }
    }
}

impl ProductionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distribution the selector samples from, `None` when nothing is
    /// selectable.
    pub fn distribution<K: Ord + Clone>(&self, choices: &WeightedChoiceSet<K>) -> Option<SlotDistribution<K>> {
        choices
            .positive()
            .top(self.top_choices)
            .distribution(self.slots)
    }

    /// Draws one candidate.
    ///
    /// An empty set, or one without positive weights, returns `None` without
    /// consuming a draw.
    pub fn choose<K, R>(&self, choices: &WeightedChoiceSet<K>, rng: &mut R) -> Option<K>
    where
        K: Ord + Clone,
        R: RandomSource + ?Sized,
    {
        let Some(distribution) = self.distribution(choices) else {
            debug!(candidates = choices.len(), "no selectable candidate");
            return None;
        };
        let slot = rng.next_int(self.slots);
        distribution.owner(slot).cloned()
    }

    /// Candidate owning `slot`, without drawing.
    pub fn choose_from<K: Ord + Clone>(&self, choices: &WeightedChoiceSet<K>, slot: u32) -> Option<K> {
        self.distribution(choices)?.owner(slot).cloned()
    }
}
