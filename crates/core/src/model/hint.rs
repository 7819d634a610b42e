use crate::i18n::{self, Language, MessageKey};
use crate::model::ids::{RoundGeneration, RoundId};

/// Where a hint's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintSource {
    Generated,
    /// The generator failed and the fixed "unavailable" text stands in.
    Unavailable,
}

/// Hint text scoped to exactly one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    generation: RoundGeneration,
    round_id: RoundId,
    text: String,
    source: HintSource,
}

impl Hint {
    #[must_use]
    pub fn generated(
        generation: RoundGeneration,
        round_id: RoundId,
        text: impl Into<String>,
    ) -> Self {
        Self {
            generation,
            round_id,
            text: text.into(),
            source: HintSource::Generated,
        }
    }

    /// Stand-in hint in `language` for when the generator failed.
    #[must_use]
    pub fn unavailable(generation: RoundGeneration, round_id: RoundId, language: Language) -> Self {
        Self {
            generation,
            round_id,
            text: i18n::text(language, MessageKey::HintUnavailable).to_string(),
            source: HintSource::Unavailable,
        }
    }

    #[must_use]
    pub fn generation(&self) -> RoundGeneration {
        self.generation
    }

    #[must_use]
    pub fn round_id(&self) -> &RoundId {
        &self.round_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn source(&self) -> HintSource {
        self.source
    }
}
