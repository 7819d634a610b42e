use thiserror::Error;

use crate::error::Failure;
use crate::i18n::Language;
use crate::model::{Hint, HintSource, RoundGeneration, RoundId, SessionStats};

use super::Applied;
use super::round::RoundController;

/// Request to the hint generator for the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintTicket {
    pub generation: RoundGeneration,
    pub round_id: RoundId,
    pub language: Language,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HintRejected {
    #[error("no round is open for a hint")]
    NoActiveRound,
    #[error("a hint request is already in flight")]
    RequestInFlight,
    #[error("a hint is already shown for this round")]
    AlreadyShown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum HintState {
    #[default]
    Empty,
    Requesting(RoundGeneration),
    Ready(Hint),
}

/// Hint state attached to the current round. Never changes the round's status.
#[derive(Debug, Clone, Default)]
pub struct HintController {
    state: HintState,
}

impl HintController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget any hint or request. Called whenever a new round starts.
    pub fn reset(&mut self) {
        self.state = HintState::Empty;
    }

    /// The hint for `generation`, if one has arrived.
    #[must_use]
    pub fn hint(&self, generation: RoundGeneration) -> Option<&Hint> {
        match &self.state {
            HintState::Ready(hint) if hint.generation() == generation => Some(hint),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_requesting(&self, generation: RoundGeneration) -> bool {
        matches!(self.state, HintState::Requesting(pending) if pending == generation)
    }

    /// Ask for a hint for the round `rounds` has open, in `language`.
    ///
    /// # Errors
    ///
    /// Returns `HintRejected` when there is no open round, a request is already
    /// outstanding, or this round already shows a hint.
    pub fn request_hint(
        &mut self,
        rounds: &RoundController,
        language: Language,
    ) -> Result<HintTicket, HintRejected> {
        let generation = rounds.generation();
        let round_id = rounds
            .open_round()
            .map(|round| round.id().clone())
            .ok_or(HintRejected::NoActiveRound)?;

        match &self.state {
            HintState::Requesting(pending) if *pending == generation => {
                return Err(HintRejected::RequestInFlight);
            }
            HintState::Ready(hint) if hint.generation() == generation => {
                return Err(HintRejected::AlreadyShown);
            }
            _ => {}
        }

        self.state = HintState::Requesting(generation);
        Ok(HintTicket {
            generation,
            round_id,
            language,
        })
    }

    /// Store the generator's answer, or the "unavailable" text when it failed.
    ///
    /// Responses for a round other than `current` are dropped.
    pub fn hint_completed(
        &mut self,
        ticket: &HintTicket,
        current: RoundGeneration,
        result: Result<String, Failure>,
        stats: &mut SessionStats,
    ) -> Applied<HintSource> {
        let awaiting =
            matches!(self.state, HintState::Requesting(pending) if pending == ticket.generation);
        if ticket.generation != current || !awaiting {
            return Applied::Stale;
        }

        let hint = match result {
            Ok(text) => {
                stats.record_hint();
                Hint::generated(ticket.generation, ticket.round_id.clone(), text)
            }
            Err(_) => {
                Hint::unavailable(ticket.generation, ticket.round_id.clone(), ticket.language)
            }
        };
        let source = hint.source();
        self.state = HintState::Ready(hint);
        Applied::Current(source)
    }
}
