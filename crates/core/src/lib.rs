#![forbid(unsafe_code)]

//! Round/session state machine for the silhouette guessing game.
//!
//! Nothing in this crate performs IO. Operations that need a collaborator hand
//! back a ticket describing the request; the caller performs it and feeds the
//! response back through the matching `*_completed`/`*_loaded` operation.

pub mod error;
pub mod game;
pub mod i18n;
pub mod model;

pub use error::Failure;
pub use i18n::{Language, LanguageError, LanguageSelector, MessageKey};
pub use model::{
    Guess, GuessError, Hint, HintSource, ImageRef, Round, RoundError, RoundGeneration, RoundId,
    RoundStatus, SessionStats, Verdict,
};
