#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod http;
pub mod providers;
pub mod session;

pub use config::{GameConfig, ServiceConfig};
pub use error::{ClientError, ConfigError, SessionClosed};
pub use http::HttpGameApi;
pub use providers::{AnswerOracle, Collaborators, HintGenerator, QuizProvider};
pub use session::{GameHandle, GameSession};
