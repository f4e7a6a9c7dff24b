//! Turn Loop
//!
//! Runs every participant's turn once, in order. A participant whose turn
//! fails is logged and skipped; the others still run.

use tracing::{info, warn};

use crate::error::StrategyError;

/// Anything that takes part in a simulated turn.
pub trait TurnParticipant<W> {
    fn id(&self) -> &str;

    fn take_turn(&mut self, world: &W) -> Result<(), StrategyError>;
}

/// A participant whose turn was aborted.
#[derive(Debug)]
pub struct ActorFailure {
    pub actor: String,
    pub error: StrategyError,
}

/// Outcome of one processed turn.
#[derive(Debug, Default)]
pub struct TurnSummary {
    /// Participants whose turn completed
    pub completed: usize,
    /// Participants whose turn was aborted
    pub failed: Vec<ActorFailure>,
}

impl TurnSummary {
    pub fn all_completed(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives participants through successive turns.
#[derive(Debug, Default)]
pub struct TurnLoop {
    turns_processed: u64,
}

impl TurnLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns_processed(&self) -> u64 {
        self.turns_processed
    }

    /// Processes one turn for every participant.
    pub fn process<W, P>(&mut self, participants: &mut [P], world: &W) -> TurnSummary
    where
        P: TurnParticipant<W>,
    {
        let mut summary = TurnSummary::default();
        for participant in participants.iter_mut() {
            match participant.take_turn(world) {
                Ok(()) => summary.completed += 1,
                Err(error) => {
                    warn!(actor = participant.id(), error = %error, "actor turn aborted");
                    summary.failed.push(ActorFailure {
                        actor: participant.id().to_string(),
                        error,
                    });
                }
            }
        }
        self.turns_processed += 1;
        if !summary.all_completed() {
            info!(
                turn = self.turns_processed,
                failed = summary.failed.len(),
                "turn finished with failures"
            );
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        name: String,
        turns: u32,
        fail_on: Option<u32>,
    }

    impl Counter {
        fn new(name: &str, fail_on: Option<u32>) -> Self {
            Self {
                name: name.to_string(),
                turns: 0,
                fail_on,
            }
        }
    }

    impl TurnParticipant<u32> for Counter {
        fn id(&self) -> &str {
            &self.name
        }

        fn take_turn(&mut self, world: &u32) -> Result<(), StrategyError> {
            if self.fail_on == Some(*world) {
                return Err(StrategyError::UnknownStrategy("missing".into()));
            }
            self.turns += 1;
            Ok(())
        }
    }

    #[test]
    fn test_every_participant_runs_once() {
        let mut participants = vec![Counter::new("rome", None), Counter::new("greece", None)];
        let mut turn_loop = TurnLoop::new();
        let summary = turn_loop.process(&mut participants, &1);
        assert_eq!(summary.completed, 2);
        assert!(summary.all_completed());
        assert!(participants.iter().all(|p| p.turns == 1));
        assert_eq!(turn_loop.turns_processed(), 1);
    }

    #[test]
    fn test_failure_is_isolated() {
        let mut participants = vec![
            Counter::new("rome", Some(2)),
            Counter::new("greece", None),
        ];
        let mut turn_loop = TurnLoop::new();
        turn_loop.process(&mut participants, &1);
        let summary = turn_loop.process(&mut participants, &2);

        assert_eq!(summary.completed, 1);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].actor, "rome");
        assert_eq!(participants[0].turns, 1);
        assert_eq!(participants[1].turns, 2);
    }
}
