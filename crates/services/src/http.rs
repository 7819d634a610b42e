//! HTTP client for the quiz, oracle and hint endpoints.
//!
//! All three roles are served under one base URL:
//! - `GET  {base}/pokemon/quiz` -> `{"id", "imageUrl"}`
//! - `POST {base}/pokemon/check` with `{"id", "userAnswer"}` -> `{"correct", "correctName"}`
//! - `GET  {base}/pokemon/ai-hint/{id}?language={tag}` -> `{"hint"}`
//! - `GET  {base}/pokemon/health` -> `{"status"}`

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use guess_core::{Guess, ImageRef, Language, Round, RoundId, Verdict};

use crate::config::ServiceConfig;
use crate::error::ClientError;
use crate::providers::{AnswerOracle, HintGenerator, QuizProvider};

const USER_AGENT: &str = concat!("guess-services/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct HttpGameApi {
    client: Client,
    base_url: Url,
}

impl HttpGameApi {
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Probe the backend's health endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the backend is unreachable or reports anything but `ok`.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = self.endpoint(&["pokemon", "health"])?;
        let body: HealthResponse = read_json(self.client.get(url).send().await?).await?;
        if body.status.eq_ignore_ascii_case("ok") {
            Ok(())
        } else {
            Err(ClientError::Unhealthy(body.status))
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl QuizProvider for HttpGameApi {
    async fn new_round(&self) -> Result<Round, ClientError> {
        let url = self.endpoint(&["pokemon", "quiz"])?;
        let body: QuizResponse = read_json(self.client.get(url).send().await?).await?;
        Ok(Round::new(body.id, ImageRef::new(body.image_url)?)?)
    }
}

#[async_trait]
impl AnswerOracle for HttpGameApi {
    async fn verify(&self, round_id: &RoundId, guess: &Guess) -> Result<Verdict, ClientError> {
        let url = self.endpoint(&["pokemon", "check"])?;
        let payload = CheckRequest {
            id: round_id,
            user_answer: guess.as_str(),
        };
        let body: CheckResponse =
            read_json(self.client.post(url).json(&payload).send().await?).await?;
        Ok(Verdict {
            correct: body.correct,
            correct_name: body.correct_name,
        })
    }
}

#[async_trait]
impl HintGenerator for HttpGameApi {
    async fn hint(&self, round_id: &RoundId, language: Language) -> Result<String, ClientError> {
        let id = round_id.to_string();
        let mut url = self.endpoint(&["pokemon", "ai-hint", id.as_str()])?;
        url.query_pairs_mut().append_pair("language", language.tag());

        let body: HintResponse = read_json(self.client.get(url).send().await?).await?;
        let hint = body.hint.trim();
        if hint.is_empty() {
            return Err(ClientError::EmptyHint);
        }
        Ok(hint.to_string())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::HttpStatus(response.status()));
    }
    Ok(response.json().await?)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizResponse {
    id: RoundId,
    image_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckRequest<'a> {
    id: &'a RoundId,
    user_answer: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckResponse {
    correct: bool,
    #[serde(default)]
    correct_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HintResponse {
    hint: String,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}
