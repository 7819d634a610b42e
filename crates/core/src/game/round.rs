use std::time::Duration;

use thiserror::Error;

use crate::error::Failure;
use crate::i18n::{self, Language, MessageKey};
use crate::model::{Guess, Round, RoundGeneration, RoundId, RoundStatus, SessionStats, Verdict};

use super::Applied;

/// Pause between a correct guess and the next round, so the reveal stays on screen.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(2500);

//
// ─── TICKETS ───────────────────────────────────────────────────────────────────
//

/// Request to fetch a fresh round from the quiz provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTicket {
    pub generation: RoundGeneration,
}

/// Request to have the oracle judge a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyTicket {
    pub generation: RoundGeneration,
    pub round_id: RoundId,
    pub guess: Guess,
}

/// Deferred advance to the next round after a correct guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    pub generation: RoundGeneration,
    pub delay: Duration,
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Why a guess was not sent to the oracle.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuessRejected {
    #[error("guess is empty")]
    Empty,
    #[error("no round is accepting guesses")]
    NoActiveRound,
    #[error("a guess is already being verified")]
    VerificationInFlight,
}

/// What a completed verification did to the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Score and attempts went up; the next round is due after `AdvanceTicket::delay`.
    Correct(AdvanceTicket),
    /// Attempts went up; the round stays open.
    Wrong,
    /// Nothing was counted; the player may resubmit.
    TransportFailed(Failure),
}

/// Player-facing message attached to the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundNotice {
    Correct { name: Option<String> },
    Wrong,
    LoadFailed,
    VerifyFailed,
}

impl RoundNotice {
    #[must_use]
    pub fn render(&self, language: Language) -> String {
        match self {
            RoundNotice::Correct { name: Some(name) } => {
                format!("{} {name}!", i18n::text(language, MessageKey::Correct))
            }
            RoundNotice::Correct { name: None } => {
                i18n::text(language, MessageKey::CorrectUnnamed).to_string()
            }
            RoundNotice::Wrong => i18n::text(language, MessageKey::Wrong).to_string(),
            RoundNotice::LoadFailed => i18n::text(language, MessageKey::ErrorLoading).to_string(),
            RoundNotice::VerifyFailed => {
                i18n::text(language, MessageKey::ErrorChecking).to_string()
            }
        }
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Lifecycle of the current round: fetch, guess, resolve, advance.
#[derive(Debug, Clone)]
pub struct RoundController {
    generation: RoundGeneration,
    status: RoundStatus,
    round: Option<Round>,
    verifying: bool,
    notice: Option<RoundNotice>,
    advance_pending: bool,
    advance_delay: Duration,
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new(AUTO_ADVANCE_DELAY)
    }
}

impl RoundController {
    #[must_use]
    pub fn new(advance_delay: Duration) -> Self {
        Self {
            generation: RoundGeneration::NONE,
            status: RoundStatus::Idle,
            round: None,
            verifying: false,
            notice: None,
            advance_pending: false,
            advance_delay,
        }
    }

    #[must_use]
    pub fn generation(&self) -> RoundGeneration {
        self.generation
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// The round on screen, if the provider has delivered one for this generation.
    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// The round when it can take a guess or a hint request.
    #[must_use]
    pub fn open_round(&self) -> Option<&Round> {
        if self.status.accepts_guesses() {
            self.round.as_ref()
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_verifying(&self) -> bool {
        self.verifying
    }

    #[must_use]
    pub fn notice(&self) -> Option<&RoundNotice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn advance_pending(&self) -> bool {
        self.advance_pending
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    /// Supersede whatever round is current and ask for a new one.
    ///
    /// The status flips to `Loading` before the request goes out. Any pending
    /// auto-advance and in-flight verification stop counting.
    pub fn start_new_round(&mut self) -> RoundTicket {
        self.generation = self.generation.next();
        self.status = RoundStatus::Loading;
        self.round = None;
        self.verifying = false;
        self.notice = None;
        self.advance_pending = false;
        RoundTicket {
            generation: self.generation,
        }
    }

    /// Give up on the current round. Allowed from any status.
    pub fn skip(&mut self) -> RoundTicket {
        self.start_new_round()
    }

    /// Apply the quiz provider's response.
    pub fn round_loaded(
        &mut self,
        ticket: RoundTicket,
        result: Result<Round, Failure>,
    ) -> Applied<RoundStatus> {
        if ticket.generation != self.generation || self.status != RoundStatus::Loading {
            return Applied::Stale;
        }

        match result {
            Ok(round) => {
                self.round = Some(round);
                self.status = RoundStatus::Active;
            }
            Err(_) => {
                self.status = RoundStatus::LoadError;
                self.notice = Some(RoundNotice::LoadFailed);
            }
        }
        Applied::Current(self.status)
    }

    /// Validate a guess and hand back the oracle request for it.
    ///
    /// # Errors
    ///
    /// Returns `GuessRejected` when the guess is blank, no round is open, or a
    /// verification for this round is still outstanding. Nothing changes then.
    pub fn submit_guess(&mut self, raw: &str) -> Result<VerifyTicket, GuessRejected> {
        let guess = Guess::new(raw).map_err(|_| GuessRejected::Empty)?;
        let round_id = self
            .open_round()
            .map(|round| round.id().clone())
            .ok_or(GuessRejected::NoActiveRound)?;
        if self.verifying {
            return Err(GuessRejected::VerificationInFlight);
        }

        self.verifying = true;
        self.status = RoundStatus::Active;
        self.notice = None;
        Ok(VerifyTicket {
            generation: self.generation,
            round_id,
            guess,
        })
    }

    /// Apply the oracle's response. Counters move only for a completed verification.
    pub fn verification_completed(
        &mut self,
        ticket: &VerifyTicket,
        result: Result<Verdict, Failure>,
        stats: &mut SessionStats,
    ) -> Applied<Resolution> {
        if ticket.generation != self.generation || !self.verifying {
            return Applied::Stale;
        }
        self.verifying = false;

        let resolution = match result {
            Ok(verdict) if verdict.correct => {
                stats.record_success();
                self.status = RoundStatus::ResolvedCorrect;
                self.notice = Some(RoundNotice::Correct {
                    name: verdict.correct_name,
                });
                self.advance_pending = true;
                Resolution::Correct(AdvanceTicket {
                    generation: self.generation,
                    delay: self.advance_delay,
                })
            }
            Ok(_) => {
                stats.record_attempt();
                self.status = RoundStatus::ResolvedWrong;
                self.notice = Some(RoundNotice::Wrong);
                Resolution::Wrong
            }
            Err(failure) => {
                self.notice = Some(RoundNotice::VerifyFailed);
                Resolution::TransportFailed(failure)
            }
        };
        Applied::Current(resolution)
    }

    /// Fire the scheduled advance if it still belongs to the current round.
    pub fn advance_due(&mut self, ticket: AdvanceTicket) -> Applied<RoundTicket> {
        if ticket.generation != self.generation
            || !self.advance_pending
            || self.status != RoundStatus::ResolvedCorrect
        {
            return Applied::Stale;
        }
        Applied::Current(self.start_new_round())
    }

    /// Drop a pending auto-advance. Returns whether one was pending.
    pub fn cancel_advance(&mut self) -> bool {
        std::mem::replace(&mut self.advance_pending, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageRef;

    fn pikachu() -> Round {
        Round::new(RoundId::text("25"), ImageRef::new("pikachu.png").unwrap()).unwrap()
    }

    fn active() -> RoundController {
        let mut rounds = RoundController::default();
        let ticket = rounds.start_new_round();
        assert_eq!(
            rounds.round_loaded(ticket, Ok(pikachu())),
            Applied::Current(RoundStatus::Active)
        );
        rounds
    }

    #[test]
    fn start_sets_loading_before_response() {
        let mut rounds = RoundController::default();
        assert_eq!(rounds.status(), RoundStatus::Idle);

        let ticket = rounds.start_new_round();
        assert_eq!(rounds.status(), RoundStatus::Loading);
        assert_eq!(ticket.generation, RoundGeneration::new(1));
        assert!(rounds.round().is_none());
    }

    #[test]
    fn correct_guess_scores_and_schedules_advance() {
        let mut rounds = active();
        let mut stats = SessionStats::new();

        let ticket = rounds.submit_guess(" pikachu ").unwrap();
        assert_eq!(ticket.guess.as_str(), "pikachu");
        assert_eq!(ticket.round_id, RoundId::text("25"));
        assert!(rounds.is_verifying());

        let applied =
            rounds.verification_completed(&ticket, Ok(Verdict::correct("Pikachu")), &mut stats);
        let Applied::Current(Resolution::Correct(advance)) = applied else {
            panic!("expected a correct resolution, got {applied:?}");
        };
        assert_eq!(advance.delay, AUTO_ADVANCE_DELAY);
        assert_eq!(advance.generation, rounds.generation());
        assert_eq!(rounds.status(), RoundStatus::ResolvedCorrect);
        assert_eq!((stats.score(), stats.attempts()), (1, 1));
        assert!(
            rounds
                .notice()
                .unwrap()
                .render(Language::English)
                .contains("Pikachu")
        );
    }

    #[test]
    fn wrong_guess_keeps_round_open() {
        let mut rounds = active();
        let mut stats = SessionStats::new();

        let ticket = rounds.submit_guess("charmander").unwrap();
        let applied = rounds.verification_completed(&ticket, Ok(Verdict::wrong()), &mut stats);
        assert_eq!(applied, Applied::Current(Resolution::Wrong));
        assert_eq!(rounds.status(), RoundStatus::ResolvedWrong);
        assert_eq!((stats.score(), stats.attempts()), (0, 1));
        assert!(!rounds.advance_pending());

        let retry = rounds.submit_guess("pikachu").unwrap();
        assert_eq!(rounds.status(), RoundStatus::Active);
        assert_eq!(retry.generation, ticket.generation);
    }

    #[test]
    fn blank_guess_is_rejected_without_side_effects() {
        let mut rounds = active();
        assert_eq!(rounds.submit_guess("   "), Err(GuessRejected::Empty));
        assert!(!rounds.is_verifying());
        assert_eq!(rounds.status(), RoundStatus::Active);
    }

    #[test]
    fn guesses_need_an_open_round() {
        let mut rounds = RoundController::default();
        assert_eq!(rounds.submit_guess("pikachu"), Err(GuessRejected::NoActiveRound));

        rounds.start_new_round();
        assert_eq!(rounds.submit_guess("pikachu"), Err(GuessRejected::NoActiveRound));
    }

    #[test]
    fn one_verification_at_a_time() {
        let mut rounds = active();
        rounds.submit_guess("pikachu").unwrap();
        assert_eq!(
            rounds.submit_guess("raichu"),
            Err(GuessRejected::VerificationInFlight)
        );
    }

    #[test]
    fn transport_failure_counts_nothing() {
        let mut rounds = active();
        let mut stats = SessionStats::new();

        let ticket = rounds.submit_guess("pikachu").unwrap();
        let applied = rounds.verification_completed(
            &ticket,
            Err(Failure::VerificationTransportFailure("timeout".into())),
            &mut stats,
        );
        assert!(matches!(
            applied,
            Applied::Current(Resolution::TransportFailed(_))
        ));
        assert_eq!(stats.attempts(), 0);
        assert_eq!(rounds.status(), RoundStatus::Active);
        assert_eq!(rounds.notice(), Some(&RoundNotice::VerifyFailed));
        assert!(rounds.submit_guess("pikachu").is_ok());
    }

    #[test]
    fn late_verification_for_superseded_round_is_discarded() {
        let mut rounds = active();
        let mut stats = SessionStats::new();

        let stale = rounds.submit_guess("pikachu").unwrap();
        let next = rounds.skip();
        let _ = rounds.round_loaded(next, Ok(pikachu()));

        let applied =
            rounds.verification_completed(&stale, Ok(Verdict::correct("Pikachu")), &mut stats);
        assert_eq!(applied, Applied::Stale);
        assert_eq!((stats.score(), stats.attempts()), (0, 0));
        assert_eq!(rounds.status(), RoundStatus::Active);
    }

    #[test]
    fn load_failure_is_a_distinct_recoverable_status() {
        let mut rounds = RoundController::default();
        let ticket = rounds.start_new_round();
        let applied = rounds.round_loaded(ticket, Err(Failure::LoadFailure("502".into())));
        assert_eq!(applied, Applied::Current(RoundStatus::LoadError));
        assert_eq!(rounds.submit_guess("pikachu"), Err(GuessRejected::NoActiveRound));

        let retry = rounds.skip();
        assert_eq!(rounds.status(), RoundStatus::Loading);
        assert!(retry.generation > ticket.generation);
    }

    #[test]
    fn late_round_response_is_discarded() {
        let mut rounds = RoundController::default();
        let first = rounds.start_new_round();
        let second = rounds.skip();

        assert_eq!(rounds.round_loaded(first, Ok(pikachu())), Applied::Stale);
        assert_eq!(rounds.status(), RoundStatus::Loading);
        assert_eq!(
            rounds.round_loaded(second, Ok(pikachu())),
            Applied::Current(RoundStatus::Active)
        );
    }

    #[test]
    fn skip_during_reveal_cancels_advance() {
        let mut rounds = active();
        let mut stats = SessionStats::new();
        let ticket = rounds.submit_guess("pikachu").unwrap();
        let Applied::Current(Resolution::Correct(advance)) =
            rounds.verification_completed(&ticket, Ok(Verdict::correct("Pikachu")), &mut stats)
        else {
            panic!("expected a correct resolution");
        };

        let skipped = rounds.skip();
        assert!(!rounds.advance_pending());
        assert_eq!(rounds.advance_due(advance), Applied::Stale);
        assert_eq!(rounds.generation(), skipped.generation);
    }

    #[test]
    fn advance_fires_once() {
        let mut rounds = active();
        let mut stats = SessionStats::new();
        let ticket = rounds.submit_guess("pikachu").unwrap();
        let Applied::Current(Resolution::Correct(advance)) =
            rounds.verification_completed(&ticket, Ok(Verdict::correct("Pikachu")), &mut stats)
        else {
            panic!("expected a correct resolution");
        };

        let Applied::Current(next) = rounds.advance_due(advance) else {
            panic!("advance should apply");
        };
        assert_eq!(next.generation, advance.generation.next());
        assert_eq!(rounds.status(), RoundStatus::Loading);
        assert_eq!(rounds.advance_due(advance), Applied::Stale);
    }

    #[test]
    fn cancelled_advance_does_not_fire() {
        let mut rounds = active();
        let mut stats = SessionStats::new();
        let ticket = rounds.submit_guess("pikachu").unwrap();
        let Applied::Current(Resolution::Correct(advance)) =
            rounds.verification_completed(&ticket, Ok(Verdict::correct("Pikachu")), &mut stats)
        else {
            panic!("expected a correct resolution");
        };

        assert!(rounds.cancel_advance());
        assert!(!rounds.cancel_advance());
        assert_eq!(rounds.advance_due(advance), Applied::Stale);
        assert_eq!(rounds.status(), RoundStatus::ResolvedCorrect);
    }

    #[test]
    fn correct_without_name_uses_plain_message() {
        let notice = RoundNotice::Correct { name: None };
        assert_eq!(notice.render(Language::English), "Correct!");
        assert_eq!(notice.render(Language::Chinese), "正确！");
        let named = RoundNotice::Correct {
            name: Some("Pikachu (皮卡丘)".into()),
        };
        assert_eq!(named.render(Language::English), "Correct! It was Pikachu (皮卡丘)!");
    }
}
