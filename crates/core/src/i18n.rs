use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── LANGUAGE ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LanguageError {
    #[error("unsupported language tag: {0}")]
    UnsupportedTag(String),
}

/// Display language. The tag is also sent along with hint requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Chinese];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    /// The language that follows this one in `Language::ALL`, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|language| *language == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|language| language.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| LanguageError::UnsupportedTag(tag.to_string()))
    }
}

//
// ─── MESSAGE KEYS ──────────────────────────────────────────────────────────────
//

/// Keys into the per-language string bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Title,
    Score,
    Attempts,
    InputPlaceholder,
    Submit,
    Checking,
    Skip,
    HintPanel,
    GetHint,
    GettingHint,
    HintFooter,
    GameStats,
    SuccessRate,
    HintsUsed,
    Loading,
    Correct,
    CorrectUnnamed,
    Wrong,
    ErrorLoading,
    ErrorChecking,
    HintUnavailable,
    ToggleLanguage,
}

impl MessageKey {
    pub const ALL: [MessageKey; 22] = [
        MessageKey::Title,
        MessageKey::Score,
        MessageKey::Attempts,
        MessageKey::InputPlaceholder,
        MessageKey::Submit,
        MessageKey::Checking,
        MessageKey::Skip,
        MessageKey::HintPanel,
        MessageKey::GetHint,
        MessageKey::GettingHint,
        MessageKey::HintFooter,
        MessageKey::GameStats,
        MessageKey::SuccessRate,
        MessageKey::HintsUsed,
        MessageKey::Loading,
        MessageKey::Correct,
        MessageKey::CorrectUnnamed,
        MessageKey::Wrong,
        MessageKey::ErrorLoading,
        MessageKey::ErrorChecking,
        MessageKey::HintUnavailable,
        MessageKey::ToggleLanguage,
    ];
}

//
// ─── BUNDLES ───────────────────────────────────────────────────────────────────
//

/// Look up `key` in the bundle for `language`.
///
/// Bundles are exhaustive matches, so a key missing from any language fails to
/// compile.
#[must_use]
pub fn text(language: Language, key: MessageKey) -> &'static str {
    match language {
        Language::English => english(key),
        Language::Chinese => chinese(key),
    }
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "Who's That Pokémon?",
        MessageKey::Score => "Score",
        MessageKey::Attempts => "Attempts",
        MessageKey::InputPlaceholder => "Enter Pokemon name...",
        MessageKey::Submit => "Submit Guess",
        MessageKey::Checking => "Checking...",
        MessageKey::Skip => "Skip",
        MessageKey::HintPanel => "AI Assistant",
        MessageKey::GetHint => "Get AI Hint",
        MessageKey::GettingHint => "Getting AI Hint...",
        MessageKey::HintFooter => "AI-powered hint",
        MessageKey::GameStats => "Game Stats",
        MessageKey::SuccessRate => "Success Rate",
        MessageKey::HintsUsed => "Hints Used",
        MessageKey::Loading => "Loading Pokemon...",
        MessageKey::Correct => "Correct! It was",
        MessageKey::CorrectUnnamed => "Correct!",
        MessageKey::Wrong => "Wrong! Try again or skip to next.",
        MessageKey::ErrorLoading => "Error loading Pokemon.",
        MessageKey::ErrorChecking => "Error checking answer. Please try again.",
        MessageKey::HintUnavailable => "AI hint currently unavailable.",
        MessageKey::ToggleLanguage => "中文",
    }
}

fn chinese(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "猜猜这是哪只宝可梦？",
        MessageKey::Score => "得分",
        MessageKey::Attempts => "尝试次数",
        MessageKey::InputPlaceholder => "输入宝可梦名字...",
        MessageKey::Submit => "提交答案",
        MessageKey::Checking => "检查中...",
        MessageKey::Skip => "跳过",
        MessageKey::HintPanel => "AI 助手",
        MessageKey::GetHint => "获取 AI 提示",
        MessageKey::GettingHint => "获取 AI 提示中...",
        MessageKey::HintFooter => "AI 提供的提示",
        MessageKey::GameStats => "游戏统计",
        MessageKey::SuccessRate => "成功率",
        MessageKey::HintsUsed => "已使用提示",
        MessageKey::Loading => "加载宝可梦中...",
        MessageKey::Correct => "正确！它是",
        MessageKey::CorrectUnnamed => "正确！",
        MessageKey::Wrong => "错误！再试一次或跳过。",
        MessageKey::ErrorLoading => "加载宝可梦出错。",
        MessageKey::ErrorChecking => "检查答案出错。请重试。",
        MessageKey::HintUnavailable => "AI 提示暂时不可用。",
        MessageKey::ToggleLanguage => "EN",
    }
}

//
// ─── SELECTOR ──────────────────────────────────────────────────────────────────
//

/// Holds the active language. Switching never touches round, hint or score state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageSelector {
    language: Language,
}

impl LanguageSelector {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.language.tag()
    }

    /// Flip to the other language and return it.
    pub fn toggle(&mut self) -> Language {
        self.language = self.language.next();
        self.language
    }

    pub fn set(&mut self, language: Language) {
        self.language = language;
    }

    #[must_use]
    pub fn lookup(&self, key: MessageKey) -> &'static str {
        text(self.language, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_text_in_every_bundle() {
        for language in Language::ALL {
            for key in MessageKey::ALL {
                assert!(
                    !text(language, key).trim().is_empty(),
                    "{key:?} is blank for {language}"
                );
            }
        }
    }

    #[test]
    fn bundles_are_distinct_translations() {
        let differing = MessageKey::ALL
            .iter()
            .filter(|key| text(Language::English, **key) != text(Language::Chinese, **key))
            .count();
        assert_eq!(differing, MessageKey::ALL.len());
    }

    #[test]
    fn toggle_flips_between_two_languages() {
        let mut selector = LanguageSelector::default();
        assert_eq!(selector.tag(), "en");
        assert_eq!(selector.toggle(), Language::Chinese);
        assert_eq!(selector.lookup(MessageKey::Skip), "跳过");
        assert_eq!(selector.toggle(), Language::English);
        assert_eq!(selector.lookup(MessageKey::Skip), "Skip");
    }

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!("ZH".parse::<Language>().unwrap(), Language::Chinese);
        assert_eq!(" en ".parse::<Language>().unwrap(), Language::English);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(LanguageError::UnsupportedTag(tag)) if tag == "fr"
        ));
    }

    #[test]
    fn language_serializes_as_tag() {
        let json = serde_json::to_string(&Language::Chinese).unwrap();
        assert_eq!(json, "\"zh\"");
    }
}
