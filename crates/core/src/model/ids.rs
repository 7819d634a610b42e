use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier issued by the quiz provider for a single round.
///
/// The provider's JSON shape is kept (numeric ids stay numeric) so the id can be
/// echoed back to the oracle and hint generator exactly as it was received.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoundId {
    Numeric(u64),
    Text(String),
}

impl RoundId {
    #[must_use]
    pub fn numeric(id: u64) -> Self {
        Self::Numeric(id)
    }

    #[must_use]
    pub fn text(id: impl Into<String>) -> Self {
        Self::Text(id.into())
    }

    /// True for text ids that carry nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            RoundId::Numeric(_) => false,
            RoundId::Text(text) => text.trim().is_empty(),
        }
    }
}

impl From<u64> for RoundId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for RoundId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl fmt::Debug for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundId({self})")
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundId::Numeric(id) => write!(f, "{id}"),
            RoundId::Text(id) => f.write_str(id),
        }
    }
}

/// Monotonic counter bumped every time a new round is requested.
///
/// Responses carry the generation they were issued under; anything that does
/// not match the current generation belongs to a superseded round.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RoundGeneration(u64);

impl RoundGeneration {
    /// Generation before any round has been requested.
    pub const NONE: RoundGeneration = RoundGeneration(0);

    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Debug for RoundGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoundGeneration({})", self.0)
    }
}

impl fmt::Display for RoundGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
