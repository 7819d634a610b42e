use std::sync::Arc;

use async_trait::async_trait;
use guess_core::{Guess, Language, Round, RoundId, Verdict};

use crate::error::ClientError;
use crate::http::HttpGameApi;

/// Hands out new rounds.
#[async_trait]
pub trait QuizProvider: Send + Sync {
    /// Fetch a fresh round.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the provider cannot be reached or sends a malformed round.
    async fn new_round(&self) -> Result<Round, ClientError>;
}

/// Judges guesses against a round id.
#[async_trait]
pub trait AnswerOracle: Send + Sync {
    /// Check `guess` for the round `round_id`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if no verdict could be obtained.
    async fn verify(&self, round_id: &RoundId, guess: &Guess) -> Result<Verdict, ClientError>;
}

/// Produces natural-language clues.
#[async_trait]
pub trait HintGenerator: Send + Sync {
    /// Produce a clue for `round_id` written in `language`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the generator fails or returns nothing usable.
    async fn hint(&self, round_id: &RoundId, language: Language) -> Result<String, ClientError>;
}

/// The three collaborators a game session talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub quiz: Arc<dyn QuizProvider + Send + Sync>,
    pub oracle: Arc<dyn AnswerOracle + Send + Sync>,
    pub hints: Arc<dyn HintGenerator + Send + Sync>,
}

impl Collaborators {
    #[must_use]
    pub fn new(
        quiz: Arc<dyn QuizProvider + Send + Sync>,
        oracle: Arc<dyn AnswerOracle + Send + Sync>,
        hints: Arc<dyn HintGenerator + Send + Sync>,
    ) -> Self {
        Self {
            quiz,
            oracle,
            hints,
        }
    }

    /// All three roles served by one HTTP backend.
    #[must_use]
    pub fn from_api(api: &Arc<HttpGameApi>) -> Self {
        Self {
            quiz: Arc::clone(api) as Arc<dyn QuizProvider + Send + Sync>,
            oracle: Arc::clone(api) as Arc<dyn AnswerOracle + Send + Sync>,
            hints: Arc::clone(api) as Arc<dyn HintGenerator + Send + Sync>,
        }
    }
}
