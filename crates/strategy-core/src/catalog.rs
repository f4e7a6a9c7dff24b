//! Strategy Catalog
//!
//! Immutable per-strategy configuration, built once and shared read-only by
//! every registry of the same layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use strategy_types::{
    Eligibility, Flavor, FlavorType, FlavorVector, TechOrCivicRef, Turn, NO_RECHECK,
};

use crate::actor::{StrategyActor, StrategyId};
use crate::error::{CatalogError, StrategyError};
use crate::modifier::weight_threshold_modifier;

/// Static configuration of one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyCatalogEntry {
    /// Human readable label
    pub label: String,
    /// Which actors may run the strategy
    pub eligibility: Eligibility,
    /// Required before the strategy can start
    pub prerequisite: Option<TechOrCivicRef>,
    /// Forces the strategy inactive once the actor has it
    pub obsoleted_by: Option<TechOrCivicRef>,
    /// No checks happen before this turn
    pub not_before_turn: Turn,
    /// Turns between re-checks once adopted; `<= 0` never re-checks
    pub recheck_interval_turns: i32,
    /// Turns an adopted strategy is kept before it may be abandoned
    pub minimum_adoption_turns: i32,
    /// Never abandoned once adopted
    pub permanent: bool,
    /// Contributed to the actor's aggregate while adopted
    pub flavors: FlavorVector,
    /// Base threshold read by the strategy's predicate
    pub weight_threshold: i32,
    /// Personality axes that shift `weight_threshold`
    pub flavor_threshold_modifiers: FlavorVector,
}

impl Default for StrategyCatalogEntry {
    fn default() -> Self {
        Self {
            label: String::new(),
            eligibility: Eligibility::Any,
            prerequisite: None,
            obsoleted_by: None,
            not_before_turn: 0,
            recheck_interval_turns: 1,
            minimum_adoption_turns: 1,
            permanent: false,
            flavors: FlavorVector::new(),
            weight_threshold: 0,
            flavor_threshold_modifiers: FlavorVector::new(),
        }
    }
}

impl StrategyCatalogEntry {
    pub fn builder(label: impl Into<String>) -> StrategyCatalogEntryBuilder {
        StrategyCatalogEntryBuilder::new(label)
    }

    /// Checks the interval invariant.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.permanent && self.recheck_interval_turns < 0 && self.minimum_adoption_turns < 0 {
            return Err(CatalogError::InvalidInterval {
                label: self.label.clone(),
                recheck: self.recheck_interval_turns,
                minimum: self.minimum_adoption_turns,
            });
        }
        Ok(())
    }

    /// `weight_threshold` shifted by the actor's personality along
    /// `flavor_threshold_modifiers`.
    pub fn effective_weight_threshold<A: StrategyActor + ?Sized>(&self, actor: &A) -> i32 {
        self.weight_threshold
            .saturating_add(weight_threshold_modifier(actor, &self.flavor_threshold_modifiers))
    }
}

/// Builder for [`StrategyCatalogEntry`].
///
/// Starts from the common defaults: checked from turn 0, re-checked every
/// turn, kept at least one turn, open to every actor.
#[derive(Debug, Clone)]
pub struct StrategyCatalogEntryBuilder {
    entry: StrategyCatalogEntry,
    minor_actor_eligible: bool,
    major_actor_only: bool,
    minor_actor_only: bool,
}

impl StrategyCatalogEntryBuilder {
    fn new(label: impl Into<String>) -> Self {
        Self {
            entry: StrategyCatalogEntry {
                label: label.into(),
                ..StrategyCatalogEntry::default()
            },
            minor_actor_eligible: true,
            major_actor_only: false,
            minor_actor_only: false,
        }
    }

    pub fn minor_actor_eligible(mut self, eligible: bool) -> Self {
        self.minor_actor_eligible = eligible;
        self
    }

    pub fn major_actor_only(mut self, only: bool) -> Self {
        self.major_actor_only = only;
        self
    }

    pub fn minor_actor_only(mut self, only: bool) -> Self {
        self.minor_actor_only = only;
        self
    }

    /// Shorthand for a strategy minor actors never run.
    pub fn major_only(self) -> Self {
        self.minor_actor_eligible(false).major_actor_only(true)
    }

    pub fn prerequisite(mut self, reference: TechOrCivicRef) -> Self {
        self.entry.prerequisite = Some(reference);
        self
    }

    pub fn obsoleted_by(mut self, reference: TechOrCivicRef) -> Self {
        self.entry.obsoleted_by = Some(reference);
        self
    }

    pub fn not_before_turn(mut self, turn: Turn) -> Self {
        self.entry.not_before_turn = turn;
        self
    }

    pub fn recheck_interval(mut self, turns: i32) -> Self {
        self.entry.recheck_interval_turns = turns;
        self
    }

    pub fn minimum_adoption(mut self, turns: i32) -> Self {
        self.entry.minimum_adoption_turns = turns;
        self
    }

    /// Adopted once, kept forever, never re-checked.
    pub fn permanent(mut self) -> Self {
        self.entry.permanent = true;
        self.entry.recheck_interval_turns = NO_RECHECK;
        self.entry.minimum_adoption_turns = NO_RECHECK;
        self
    }

    pub fn flavor(mut self, flavor_type: FlavorType, value: i32) -> Self {
        self.entry.flavors += Flavor::new(flavor_type, value);
        self
    }

    pub fn weight_threshold(mut self, threshold: i32) -> Self {
        self.entry.weight_threshold = threshold;
        self
    }

    pub fn threshold_modifier(mut self, flavor_type: FlavorType, value: i32) -> Self {
        self.entry.flavor_threshold_modifiers += Flavor::new(flavor_type, value);
        self
    }

    pub fn build(mut self) -> Result<StrategyCatalogEntry, CatalogError> {
        self.entry.eligibility = Eligibility::from_flags(
            self.minor_actor_eligible,
            self.major_actor_only,
            self.minor_actor_only,
        )
        .ok_or_else(|| CatalogError::ConflictingEligibility(self.entry.label.clone()))?;
        self.entry.validate()?;
        Ok(self.entry)
    }
}

/// Read-only map from strategy identity to its catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyCatalog<S: StrategyId> {
    entries: BTreeMap<S, StrategyCatalogEntry>,
}

impl<S: StrategyId> StrategyCatalog<S> {
    pub fn builder() -> StrategyCatalogBuilder<S> {
        StrategyCatalogBuilder {
            entries: BTreeMap::new(),
            error: None,
        }
    }

    pub fn get(&self, id: S) -> Option<&StrategyCatalogEntry> {
        self.entries.get(&id)
    }

    /// Like [`get`](Self::get) but a missing entry is an error.
    pub fn entry(&self, id: S) -> Result<&StrategyCatalogEntry, StrategyError> {
        self.entries
            .get(&id)
            .ok_or_else(|| StrategyError::MissingCatalogEntry(id.to_string()))
    }

    pub fn contains(&self, id: S) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = S> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, &StrategyCatalogEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Parses a catalog from TOML, one table per strategy keyed by its name.
    ///
    /// An entry without a label takes the strategy name.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, StrategyCatalogEntry> = toml::from_str(content)?;
        let mut builder = Self::builder();
        for (key, mut entry) in raw {
            let id = S::from_name(&key).ok_or_else(|| CatalogError::UnknownStrategy(key.clone()))?;
            if entry.label.is_empty() {
                entry.label = key;
            }
            entry.validate()?;
            builder = builder.entry(id, entry);
        }
        builder.build()
    }

    /// Loads a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Collects catalog entries; the first duplicate is reported by `build()`.
#[derive(Debug)]
pub struct StrategyCatalogBuilder<S: StrategyId> {
    entries: BTreeMap<S, StrategyCatalogEntry>,
    error: Option<CatalogError>,
}

impl<S: StrategyId> StrategyCatalogBuilder<S> {
    pub fn entry(mut self, id: S, entry: StrategyCatalogEntry) -> Self {
        if self.entries.contains_key(&id) {
            self.error.get_or_insert(CatalogError::Duplicate(id.to_string()));
        } else {
            self.entries.insert(id, entry);
        }
        self
    }

    pub fn build(self) -> Result<StrategyCatalog<S>, CatalogError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(StrategyCatalog {
                entries: self.entries,
            }),
        }
    }
}
