//! Weighted Choice Sets
//!
//! Accumulates weights per candidate and turns them into a fixed-resolution
//! slot distribution for sampling.

use std::collections::BTreeMap;

/// Candidate identity mapped to an accumulated weight.
///
/// Weights may go negative while being built; only positive candidates are
/// ever placed in a distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedChoiceSet<K: Ord> {
    weights: BTreeMap<K, f64>,
}

impl<K: Ord> Default for WeightedChoiceSet<K> {
    fn default() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> WeightedChoiceSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to the candidate, inserting it at zero first if needed.
    pub fn add_weight(&mut self, key: K, weight: f64) {
        *self.weights.entry(key).or_insert(0.0) += weight;
    }

    /// Overwrites the candidate's weight.
    pub fn set_weight(&mut self, key: K, weight: f64) {
        self.weights.insert(key, weight);
    }

    /// Weight of `key`, zero when absent.
    pub fn weight(&self, key: &K) -> f64 {
        self.weights.get(key).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.weights.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<f64> {
        self.weights.remove(key)
    }

    /// Sum of all weights, negative ones included.
    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.weights.iter().map(|(key, weight)| (key, *weight))
    }

    /// Candidates sorted by descending weight, ties by ascending key.
    pub fn ranked(&self) -> Vec<(&K, f64)> {
        let mut ranked: Vec<(&K, f64)> = self.iter().collect();
        // Stable sort keeps the ascending key order among equal weights
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Only the candidates with a positive weight.
    pub fn positive(&self) -> Self {
        self.iter()
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(key, weight)| (key.clone(), weight))
            .collect()
    }

    /// Keeps the `k` heaviest candidates.
    pub fn top(&self, k: usize) -> Self {
        self.ranked()
            .into_iter()
            .take(k)
            .map(|(key, weight)| (key.clone(), weight))
            .collect()
    }

    /// Heaviest candidate with a positive weight.
    pub fn best(&self) -> Option<&K> {
        self.ranked()
            .into_iter()
            .next()
            .filter(|(_, weight)| *weight > 0.0)
            .map(|(key, _)| key)
    }

    /// Spreads `slots` over the positive candidates.
    ///
    /// Each candidate gets a contiguous block of `round(slots * w / total)`
    /// slots, heaviest first. Whatever rounding leaves over or takes too much
    /// is settled on the heaviest candidate, which keeps at least one slot.
    /// Returns `None` when no candidate has a positive weight.
    pub fn distribution(&self, slots: u32) -> Option<SlotDistribution<K>> {
        let ranked: Vec<(&K, f64)> = self
            .ranked()
            .into_iter()
            .filter(|(_, weight)| *weight > 0.0)
            .collect();
        let total: f64 = ranked.iter().map(|(_, weight)| weight).sum();
        if ranked.is_empty() || slots == 0 || total <= 0.0 {
            return None;
        }

        let mut counts: Vec<i64> = ranked
            .iter()
            .map(|(_, weight)| (f64::from(slots) * weight / total).round() as i64)
            .collect();
        let assigned: i64 = counts.iter().sum();
        counts[0] += i64::from(slots) - assigned;

        if counts[0] < 1 {
            let mut excess = 1 - counts[0];
            counts[0] = 1;
            for count in counts.iter_mut().skip(1).rev() {
                let taken = excess.min(*count);
                *count -= taken;
                excess -= taken;
                if excess == 0 {
                    break;
                }
            }
        }

        let mut blocks = Vec::with_capacity(ranked.len());
        let mut start = 0u32;
        for ((key, _), count) in ranked.into_iter().zip(counts) {
            if count <= 0 {
                continue;
            }
            let len = count as u32;
            blocks.push(SlotBlock {
                key: key.clone(),
                start,
                len,
            });
            start += len;
        }

        Some(SlotDistribution { blocks, slots })
    }
}

impl<K: Ord> FromIterator<(K, f64)> for WeightedChoiceSet<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut weights = BTreeMap::new();
        for (key, weight) in iter {
            *weights.entry(key).or_insert(0.0) += weight;
        }
        Self { weights }
    }
}

/// Contiguous run of slots owned by one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBlock<K> {
    pub key: K,
    pub start: u32,
    pub len: u32,
}

impl<K> SlotBlock<K> {
    /// One past the last slot of the block.
    pub fn end(&self) -> u32 {
        self.start + self.len
    }

    pub fn contains(&self, slot: u32) -> bool {
        slot >= self.start && slot < self.end()
    }
}

/// Fixed-resolution distribution laid out as contiguous blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDistribution<K> {
    blocks: Vec<SlotBlock<K>>,
    slots: u32,
}

impl<K> SlotDistribution<K> {
    /// Candidate owning `slot`, `None` past the end.
    pub fn owner(&self, slot: u32) -> Option<&K> {
        self.blocks
            .iter()
            .find(|block| block.contains(slot))
            .map(|block| &block.key)
    }

    pub fn blocks(&self) -> &[SlotBlock<K>] {
        &self.blocks
    }

    pub fn slots(&self) -> u32 {
        self.slots
    }

    /// Number of slots handed out; always equals `slots()`.
    pub fn assigned(&self) -> u32 {
        self.blocks.iter().map(|block| block.len).sum()
    }
}
