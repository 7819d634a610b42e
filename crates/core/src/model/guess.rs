use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuessError {
    #[error("guess is empty")]
    Empty,
}

/// A trimmed, non-empty answer typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess(String);

impl Guess {
    /// Trim the raw input and reject it when nothing is left.
    ///
    /// # Errors
    ///
    /// Returns `GuessError::Empty` for empty or whitespace-only input.
    pub fn new(raw: &str) -> Result<Self, GuessError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GuessError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_input() {
        assert_eq!(Guess::new("  pikachu \n").unwrap().as_str(), "pikachu");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Guess::new(""), Err(GuessError::Empty));
        assert_eq!(Guess::new(" \t "), Err(GuessError::Empty));
    }
}
