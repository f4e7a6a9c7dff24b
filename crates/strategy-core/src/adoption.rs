//! Strategy Adoption State Machine
//!
//! Per-strategy adoption record and the turn-gated transition rules.
//!
//! Evaluation is split in two so the predicate is only called when a
//! transition could actually happen:
//! 1. [`StrategyAdoptionState::pending`] decides whether the strategy wants to
//!    start or end this turn (eligibility, turn floor, re-check interval,
//!    minimum duration).
//! 2. [`Pending::decide`] maps the predicate result to a [`Transition`].

use serde::{Deserialize, Serialize};
use strategy_types::{is_periodic, Turn, NEVER};

use crate::actor::{EligibilityFlag, StrategyActor};
use crate::catalog::StrategyCatalogEntry;

/// Adoption record of one strategy for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAdoptionState {
    pub adopted: bool,
    pub turn_adopted: Turn,
}

impl Default for StrategyAdoptionState {
    fn default() -> Self {
        Self {
            adopted: false,
            turn_adopted: NEVER,
        }
    }
}

/// Actor-dependent conditions resolved for one strategy and turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionInputs {
    /// The actor may run the strategy at all
    pub eligible: bool,
    /// The prerequisite is met (or there is none)
    pub prerequisite_met: bool,
    /// The obsolescence condition is met
    pub obsolete: bool,
    pub turn: Turn,
}

impl TransitionInputs {
    pub fn resolve<A: StrategyActor + ?Sized>(entry: &StrategyCatalogEntry, actor: &A, turn: Turn) -> Self {
        let is_minor = actor.is_eligibility_flag_set(EligibilityFlag::MinorActor);
        Self {
            eligible: entry.eligibility.permits(is_minor),
            prerequisite_met: entry
                .prerequisite
                .as_ref()
                .map_or(true, |reference| actor.has_tech_or_civic(reference)),
            obsolete: entry
                .obsoleted_by
                .as_ref()
                .map_or(false, |reference| actor.has_tech_or_civic(reference)),
            turn,
        }
    }
}

/// What a strategy wants to do this turn, before its predicate is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pending {
    pub wants_to_start: bool,
    pub wants_to_end: bool,
}

impl Pending {
    /// Nothing to evaluate this turn.
    pub fn is_idle(&self) -> bool {
        !self.wants_to_start && !self.wants_to_end
    }

    /// Applies the transition table to the predicate result.
    pub fn decide(self, predicate_result: bool) -> Transition {
        match (self.wants_to_start, self.wants_to_end, predicate_result) {
            (true, false, true) => Transition::Adopt,
            (false, true, false) => Transition::Abandon,
            _ => Transition::Unchanged,
        }
    }
}

/// Outcome of evaluating one strategy for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Adopt,
    Abandon,
    Unchanged,
}

impl StrategyAdoptionState {
    pub fn is_adopted(&self) -> bool {
        self.adopted
    }

    /// Turns since adoption, `None` when not adopted.
    pub fn turns_adopted(&self, turn: Turn) -> Option<i32> {
        if self.adopted {
            strategy_types::turns_since(turn, self.turn_adopted)
        } else {
            None
        }
    }

    /// Decides whether the strategy wants to start or end this turn.
    pub fn pending(&self, entry: &StrategyCatalogEntry, inputs: &TransitionInputs) -> Pending {
        // Ineligible actors never touch the strategy
        if !inputs.eligible {
            return Pending::default();
        }

        let wants_to_start =
            !self.adopted && inputs.prerequisite_met && inputs.turn >= entry.not_before_turn;

        let mut wants_to_end = false;
        if let Some(elapsed) = self.turns_adopted(inputs.turn).filter(|_| !entry.permanent) {
            wants_to_end = if is_periodic(entry.recheck_interval_turns) {
                elapsed.rem_euclid(entry.recheck_interval_turns) == 0
            } else {
                // Never re-checked; only obsolescence can end it
                inputs.obsolete
            };

            if wants_to_end
                && entry.minimum_adoption_turns > 0
                && elapsed < entry.minimum_adoption_turns
            {
                wants_to_end = false;
            }
        }

        Pending {
            wants_to_start,
            wants_to_end,
        }
    }

    pub fn apply(&mut self, transition: Transition, turn: Turn) {
        match transition {
            Transition::Adopt => self.adopt(turn),
            Transition::Abandon => self.abandon(),
            Transition::Unchanged => {}
        }
    }

    pub fn adopt(&mut self, turn: Turn) {
        self.adopted = true;
        self.turn_adopted = turn;
    }

    pub fn abandon(&mut self) {
        self.adopted = false;
        self.turn_adopted = NEVER;
    }
}
