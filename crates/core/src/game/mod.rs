mod hint;
mod round;
mod snapshot;

pub use hint::{HintController, HintRejected, HintTicket};
pub use round::{
    AUTO_ADVANCE_DELAY, AdvanceTicket, GuessRejected, Resolution, RoundController, RoundNotice,
    RoundTicket, VerifyTicket,
};
pub use snapshot::GameSnapshot;

use std::time::Duration;

use crate::error::Failure;
use crate::i18n::{Language, LanguageSelector};
use crate::model::{HintSource, Round, RoundStatus, SessionStats, Verdict};

/// Result of feeding a collaborator response back into the game.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied<T> {
    /// The response belonged to the current round and was applied.
    Current(T),
    /// The response belonged to a superseded round and was ignored.
    Stale,
}

impl<T> Applied<T> {
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Applied::Stale)
    }

    #[must_use]
    pub fn current(self) -> Option<T> {
        match self {
            Applied::Current(value) => Some(value),
            Applied::Stale => None,
        }
    }
}

//
// ─── GAME ──────────────────────────────────────────────────────────────────────
//

/// One player's game: round lifecycle, hint state, counters and language.
///
/// All mutation happens through these methods, one event at a time. Hint state
/// is reset every time a new round starts, whichever path started it.
#[derive(Debug, Clone)]
pub struct Game {
    rounds: RoundController,
    hints: HintController,
    stats: SessionStats,
    language: LanguageSelector,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Game {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self::with_advance_delay(language, AUTO_ADVANCE_DELAY)
    }

    #[must_use]
    pub fn with_advance_delay(language: Language, advance_delay: Duration) -> Self {
        Self {
            rounds: RoundController::new(advance_delay),
            hints: HintController::new(),
            stats: SessionStats::new(),
            language: LanguageSelector::new(language),
        }
    }

    #[must_use]
    pub fn rounds(&self) -> &RoundController {
        &self.rounds
    }

    #[must_use]
    pub fn hints(&self) -> &HintController {
        &self.hints
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn language(&self) -> &LanguageSelector {
        &self.language
    }

    pub fn start_new_round(&mut self) -> RoundTicket {
        let ticket = self.rounds.start_new_round();
        self.hints.reset();
        ticket
    }

    pub fn skip(&mut self) -> RoundTicket {
        let ticket = self.rounds.skip();
        self.hints.reset();
        ticket
    }

    pub fn round_loaded(
        &mut self,
        ticket: RoundTicket,
        result: Result<Round, Failure>,
    ) -> Applied<RoundStatus> {
        self.rounds.round_loaded(ticket, result)
    }

    /// # Errors
    ///
    /// See [`RoundController::submit_guess`].
    pub fn submit_guess(&mut self, raw: &str) -> Result<VerifyTicket, GuessRejected> {
        self.rounds.submit_guess(raw)
    }

    pub fn guess_verified(
        &mut self,
        ticket: &VerifyTicket,
        result: Result<Verdict, Failure>,
    ) -> Applied<Resolution> {
        self.rounds
            .verification_completed(ticket, result, &mut self.stats)
    }

    /// # Errors
    ///
    /// See [`HintController::request_hint`].
    pub fn request_hint(&mut self) -> Result<HintTicket, HintRejected> {
        self.hints
            .request_hint(&self.rounds, self.language.language())
    }

    pub fn hint_ready(
        &mut self,
        ticket: &HintTicket,
        result: Result<String, Failure>,
    ) -> Applied<HintSource> {
        self.hints
            .hint_completed(ticket, self.rounds.generation(), result, &mut self.stats)
    }

    pub fn advance_due(&mut self, ticket: AdvanceTicket) -> Applied<RoundTicket> {
        let applied = self.rounds.advance_due(ticket);
        if !applied.is_stale() {
            self.hints.reset();
        }
        applied
    }

    /// Drop a pending auto-advance, e.g. on teardown.
    pub fn cancel_advance(&mut self) -> bool {
        self.rounds.cancel_advance()
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language.toggle()
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageRef, RoundId};

    const CHEEKS: &str = "This creature stores electricity in its cheeks.";

    fn round(id: u64, image: &str) -> Round {
        Round::new(RoundId::numeric(id), ImageRef::new(image).unwrap()).unwrap()
    }

    fn loaded(game: &mut Game, id: u64) {
        let ticket = game.start_new_round();
        let _ = game.round_loaded(ticket, Ok(round(id, "pikachu.png")));
    }

    #[test]
    fn new_round_clears_previous_hint() {
        let mut game = Game::default();
        loaded(&mut game, 25);

        let ticket = game.request_hint().unwrap();
        assert_eq!(ticket.round_id, RoundId::numeric(25));
        let _ = game.hint_ready(&ticket, Ok(CHEEKS.into()));
        assert_eq!(game.snapshot().hint.as_deref(), Some(CHEEKS));

        game.start_new_round();
        assert_eq!(game.snapshot().hint, None);
        loaded(&mut game, 26);
        assert_eq!(game.snapshot().hint, None);
    }

    #[test]
    fn auto_advance_clears_hint() {
        let mut game = Game::default();
        loaded(&mut game, 25);
        let hint = game.request_hint().unwrap();
        let _ = game.hint_ready(&hint, Ok(CHEEKS.into()));

        let verify = game.submit_guess("pikachu").unwrap();
        let Applied::Current(Resolution::Correct(advance)) =
            game.guess_verified(&verify, Ok(Verdict::correct("Pikachu")))
        else {
            panic!("expected a correct resolution");
        };
        assert_eq!(game.snapshot().hint.as_deref(), Some(CHEEKS));

        assert!(game.advance_due(advance).current().is_some());
        assert_eq!(game.snapshot().hint, None);
        assert_eq!(game.snapshot().status, RoundStatus::Loading);
    }

    #[test]
    fn hint_request_uses_active_language() {
        let mut game = Game::default();
        loaded(&mut game, 25);
        game.toggle_language();

        let ticket = game.request_hint().unwrap();
        assert_eq!(ticket.language, Language::Chinese);
    }

    #[test]
    fn language_switch_leaves_game_state_alone() {
        let mut game = Game::default();
        loaded(&mut game, 25);
        let verify = game.submit_guess("charmander").unwrap();
        let _ = game.guess_verified(&verify, Ok(Verdict::wrong()));

        let before = game.snapshot();
        game.toggle_language();
        let after = game.snapshot();

        assert_eq!(before.status, after.status);
        assert_eq!(before.generation, after.generation);
        assert_eq!((before.score, before.attempts), (after.score, after.attempts));
        assert_eq!(after.language, Language::Chinese);
        assert_eq!(after.message.as_deref(), Some("错误！再试一次或跳过。"));
    }

    #[test]
    fn score_never_exceeds_attempts() {
        let mut game = Game::default();
        let verdicts = [
            Ok(Verdict::correct("Pikachu")),
            Ok(Verdict::wrong()),
            Err(Failure::VerificationTransportFailure("reset".into())),
            Ok(Verdict::wrong()),
            Ok(Verdict::correct("Pikachu")),
        ];

        let mut completed = 0;
        for (id, verdict) in (25..).zip(verdicts) {
            loaded(&mut game, id);
            let counts = verdict.is_ok();
            let ticket = game.submit_guess("pikachu").unwrap();
            let _ = game.guess_verified(&ticket, verdict);
            if counts {
                completed += 1;
            }
            let stats = game.stats();
            assert!(stats.score() <= stats.attempts());
            assert_eq!(stats.attempts(), completed);
        }
        assert_eq!(game.stats().score(), 2);
        assert_eq!(game.snapshot().success_percent, 50);
    }
}
