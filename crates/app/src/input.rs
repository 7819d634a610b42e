/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Guess(String),
    Skip,
    Hint,
    ToggleLanguage,
    Help,
    Quit,
    Blank,
}

impl Input {
    /// Slash commands drive the game; anything else is a guess.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Blank;
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "/skip" | "/s" => Self::Skip,
            "/hint" | "/h" => Self::Hint,
            "/lang" | "/l" => Self::ToggleLanguage,
            "/help" | "/?" => Self::Help,
            "/quit" | "/q" | "/exit" => Self::Quit,
            _ => Self::Guess(trimmed.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(Input::parse("/SKIP"), Input::Skip);
        assert_eq!(Input::parse(" /hint "), Input::Hint);
        assert_eq!(Input::parse("/l"), Input::ToggleLanguage);
        assert_eq!(Input::parse("/q"), Input::Quit);
    }

    #[test]
    fn anything_else_is_a_guess() {
        assert_eq!(Input::parse("  Pikachu "), Input::Guess("Pikachu".into()));
        assert_eq!(Input::parse("/pikachu"), Input::Guess("/pikachu".into()));
        assert_eq!(Input::parse("皮卡丘"), Input::Guess("皮卡丘".into()));
    }

    #[test]
    fn whitespace_is_blank() {
        assert_eq!(Input::parse("   \t"), Input::Blank);
    }
}
