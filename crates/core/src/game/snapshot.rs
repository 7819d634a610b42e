use crate::i18n::Language;
use crate::model::{ImageRef, RoundGeneration, RoundId, RoundStatus};

use super::Game;

/// Everything the presentation layer needs to draw the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub generation: RoundGeneration,
    pub status: RoundStatus,
    pub round_id: Option<RoundId>,
    pub image_ref: Option<ImageRef>,
    /// The silhouette stays dark until the round is guessed correctly.
    pub image_obscured: bool,
    /// Round message rendered in the active language.
    pub message: Option<String>,
    pub hint: Option<String>,
    pub hint_pending: bool,
    pub verifying: bool,
    pub score: u32,
    pub attempts: u32,
    pub hints_used: u32,
    pub success_percent: u32,
    pub language: Language,
}

impl GameSnapshot {
    pub(crate) fn capture(game: &Game) -> Self {
        let rounds = game.rounds();
        let generation = rounds.generation();
        let language = game.language().language();
        let round = rounds.round();
        let stats = game.stats();

        Self {
            generation,
            status: rounds.status(),
            round_id: round.map(|round| round.id().clone()),
            image_ref: round.map(|round| round.image_ref().clone()),
            image_obscured: rounds.status() != RoundStatus::ResolvedCorrect,
            message: rounds.notice().map(|notice| notice.render(language)),
            hint: game
                .hints()
                .hint(generation)
                .map(|hint| hint.text().to_string()),
            hint_pending: game.hints().is_requesting(generation),
            verifying: rounds.is_verifying(),
            score: stats.score(),
            attempts: stats.attempts(),
            hints_used: stats.hints_used(),
            success_percent: stats.success_percent(),
            language,
        }
    }

    /// True while the player is waiting on the quiz provider.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == RoundStatus::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Applied, Resolution};
    use crate::model::{Round, Verdict};

    #[test]
    fn reveal_uncovers_image() {
        let mut game = Game::default();
        assert_eq!(game.snapshot().status, RoundStatus::Idle);

        let ticket = game.start_new_round();
        assert!(game.snapshot().is_loading());

        let image = ImageRef::new("pikachu.png").unwrap();
        let round = Round::new(RoundId::text("25"), image).unwrap();
        let _ = game.round_loaded(ticket, Ok(round));
        let active = game.snapshot();
        assert!(active.image_obscured);
        assert_eq!(active.image_ref.unwrap().as_str(), "pikachu.png");

        let verify = game.submit_guess("pikachu").unwrap();
        assert!(game.snapshot().verifying);
        let applied = game.guess_verified(&verify, Ok(Verdict::correct("Pikachu")));
        assert!(matches!(applied, Applied::Current(Resolution::Correct(_))));

        let revealed = game.snapshot();
        assert!(!revealed.image_obscured);
        assert!(!revealed.verifying);
        assert_eq!(revealed.message.as_deref(), Some("Correct! It was Pikachu!"));
        assert_eq!((revealed.score, revealed.attempts), (1, 1));
        assert_eq!(revealed.success_percent, 100);
    }
}
