use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::RoundId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Reasons a provider payload cannot become a `Round`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("round id is empty")]
    EmptyId,
    #[error("image reference is empty")]
    EmptyImageRef,
}

//
// ─── ROUND ────────────────────────────────────────────────────────────────────
//

/// Reference to the image shown (obscured) for a round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// # Errors
    ///
    /// Returns `RoundError::EmptyImageRef` for blank references.
    pub fn new(raw: impl Into<String>) -> Result<Self, RoundError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RoundError::EmptyImageRef);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One "guess this creature" instance as handed out by the quiz provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    id: RoundId,
    image_ref: ImageRef,
}

impl Round {
    /// # Errors
    ///
    /// Returns `RoundError::EmptyId` if the provider sent a blank id.
    pub fn new(id: RoundId, image_ref: ImageRef) -> Result<Self, RoundError> {
        if id.is_blank() {
            return Err(RoundError::EmptyId);
        }
        Ok(Self { id, image_ref })
    }

    #[must_use]
    pub fn id(&self) -> &RoundId {
        &self.id
    }

    #[must_use]
    pub fn image_ref(&self) -> &ImageRef {
        &self.image_ref
    }
}

//
// ─── STATUS ───────────────────────────────────────────────────────────────────
//

/// Lifecycle of the current round.
///
/// `Idle` -> `Loading` -> `Active` -> `ResolvedCorrect` | `ResolvedWrong`.
/// A failed fetch lands in `LoadError`, which only a new round request leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundStatus {
    /// No round has been requested yet.
    Idle,
    /// Waiting on the quiz provider.
    Loading,
    /// Round is on screen and accepts guesses.
    Active,
    /// The oracle accepted a guess; the next round follows after a delay.
    ResolvedCorrect,
    /// The last guess was wrong; the round still accepts guesses.
    ResolvedWrong,
    /// The quiz provider failed. Recover with a new round or a skip.
    LoadError,
}

impl RoundStatus {
    /// Whether a round is on screen and can take a guess or a hint request.
    #[must_use]
    pub fn accepts_guesses(self) -> bool {
        matches!(self, RoundStatus::Active | RoundStatus::ResolvedWrong)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RoundStatus::Idle => "idle",
            RoundStatus::Loading => "loading",
            RoundStatus::Active => "active",
            RoundStatus::ResolvedCorrect => "resolved_correct",
            RoundStatus::ResolvedWrong => "resolved_wrong",
            RoundStatus::LoadError => "load_error",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── VERDICT ──────────────────────────────────────────────────────────────────
//

/// The oracle's judgement of a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    /// Canonical name, revealed when the guess matched.
    pub correct_name: Option<String>,
}

impl Verdict {
    #[must_use]
    pub fn correct(name: impl Into<String>) -> Self {
        Self {
            correct: true,
            correct_name: Some(name.into()),
        }
    }

    #[must_use]
    pub fn wrong() -> Self {
        Self {
            correct: false,
            correct_name: None,
        }
    }
}
