use std::fmt::Write as _;

use guess_core::game::GameSnapshot;
use guess_core::i18n::{self, MessageKey};
use guess_core::{Language, RoundStatus};

/// Draw one frame of the game as plain text.
#[must_use]
pub fn frame(snapshot: &GameSnapshot) -> String {
    let language = snapshot.language;
    let t = |key| i18n::text(language, key);
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", t(MessageKey::Title));
    let _ = writeln!(
        out,
        "{}: {}  {}: {}  {}: {}%  {}: {}",
        t(MessageKey::Score),
        snapshot.score,
        t(MessageKey::Attempts),
        snapshot.attempts,
        t(MessageKey::SuccessRate),
        snapshot.success_percent,
        t(MessageKey::HintsUsed),
        snapshot.hints_used,
    );

    match (&snapshot.status, &snapshot.image_ref) {
        (RoundStatus::Loading, _) => {
            let _ = writeln!(out, "{}", t(MessageKey::Loading));
        }
        (_, Some(image)) => {
            let shade = if snapshot.image_obscured { "silhouette" } else { "revealed" };
            let _ = writeln!(out, "[{shade}] {image}");
        }
        _ => {}
    }

    if snapshot.verifying {
        let _ = writeln!(out, "{}", t(MessageKey::Checking));
    }
    if let Some(message) = &snapshot.message {
        let _ = writeln!(out, "> {message}");
    }

    if snapshot.hint_pending {
        let _ = writeln!(out, "{}: {}", t(MessageKey::HintPanel), t(MessageKey::GettingHint));
    } else if let Some(hint) = &snapshot.hint {
        let _ = writeln!(out, "{}: {hint}", t(MessageKey::HintPanel));
        let _ = writeln!(out, "   ({})", t(MessageKey::HintFooter));
    }

    let _ = write!(out, "{}", controls(language));
    out
}

/// Command reminder in the active language.
#[must_use]
pub fn controls(language: Language) -> String {
    let t = |key| i18n::text(language, key);
    format!(
        "[{}] /skip  [{}] /hint  [{}] /lang  /quit\n{} ",
        t(MessageKey::Skip),
        t(MessageKey::GetHint),
        t(MessageKey::ToggleLanguage),
        t(MessageKey::InputPlaceholder),
    )
}
