use thiserror::Error;

/// Collaborator failures as seen by the game.
///
/// None of these are fatal: each one resolves to a concrete status or message
/// the player can act on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Failure {
    /// The quiz provider could not hand out a new round.
    #[error("failed to load a new round: {0}")]
    LoadFailure(String),
    /// The guess could not be checked; the attempt is not counted.
    #[error("could not verify guess: {0}")]
    VerificationTransportFailure(String),
    /// The hint generator failed; a fixed message is shown instead.
    #[error("hint unavailable: {0}")]
    HintUnavailable(String),
}

impl Failure {
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Failure::LoadFailure(reason)
            | Failure::VerificationTransportFailure(reason)
            | Failure::HintUnavailable(reason) => reason,
        }
    }
}
