mod guess;
mod hint;
mod ids;
mod round;
mod stats;

pub use guess::{Guess, GuessError};
pub use hint::{Hint, HintSource};
pub use ids::{RoundGeneration, RoundId};
pub use round::{ImageRef, Round, RoundError, RoundStatus, Verdict};
pub use stats::SessionStats;
