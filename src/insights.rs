//! AI coaching insights.
//!
//! The provider is Gemini's `generateContent` REST endpoint. The dashboard
//! only ever sees an [`InsightState`]: a request moves it to `Pending`, the
//! spawned call settles it to `Ready` or `Failed`.

use crate::config::InsightConfig;
use crate::models::{Goal, Habit};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("API key not found: set API_KEY or GEMINI_API_KEY")]
    MissingCredential,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("provider error: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InsightState {
    #[default]
    Idle,
    Pending,
    Ready {
        text: String,
    },
    Failed {
        message: String,
    },
}

impl InsightState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn settle(result: Result<String, InsightError>) -> Self {
        match result {
            Ok(text) => Self::Ready { text },
            Err(err) => Self::Failed {
                message: format!("Could not generate insights: {err}"),
            },
        }
    }

    /// Non-blank lines of a ready result, as the panel lists them.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Ready { text } => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

pub fn goals_summary(goals: &[Goal]) -> String {
    goals
        .iter()
        .map(|g| {
            format!(
                "- Goal: {} (Category: {}, Due: {}, Status: {})",
                g.title,
                g.category,
                g.due_date.format("%Y-%m-%d"),
                g.status.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn habits_summary(habits: &[Habit]) -> String {
    habits
        .iter()
        .map(|h| format!("- Habit: {} (Frequency: {})", h.name, h.frequency.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_prompt(goals: &[Goal], habits: &[Habit]) -> String {
    format!(
        "You are a productivity and wellbeing coach. Review the user's goals and habits below \
and give 3 actionable insights to help them succeed.\n\
Be concise, encouraging and direct. Point out synergies, possible conflicts, or small adjustments.\n\
Format the answer as a list of 3 items, each starting with a bullet.\n\n\
**Current goals:**\n{}\n\n\
**Current habits:**\n{}\n\n\
**Your analysis and insights:**\n",
        goals_summary(goals),
        habits_summary(habits)
    )
}

#[derive(Debug, Clone)]
pub struct InsightClient {
    http: Client,
    config: InsightConfig,
}

impl InsightClient {
    pub fn new(config: InsightConfig) -> Result<Self, InsightError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    pub fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub async fn generate_insights(
        &self,
        goals: &[Goal],
        habits: &[Habit],
    ) -> Result<String, InsightError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(InsightError::MissingCredential)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(goals, habits) }] }]
        });

        debug!(model = %self.config.model, "requesting insights");
        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let payload = resp.text().await?;

        if !status.is_success() {
            let message = format!("HTTP {}: {}", status.as_u16(), provider_message(&payload));
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(InsightError::Auth(message));
            }
            return Err(InsightError::Provider(message));
        }

        let parsed: GenerateResponse = serde_json::from_str(&payload)
            .map_err(|err| InsightError::Provider(format!("malformed response: {err}")))?;
        parsed
            .text()
            .ok_or_else(|| InsightError::Provider("response contained no text".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

fn provider_message(payload: &str) -> String {
    serde_json::from_str::<serde_json::Value>(payload)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| payload.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
    }

    fn client_for(server: &mockito::Server, api_key: Option<&str>) -> InsightClient {
        InsightClient::new(InsightConfig {
            api_key: api_key.map(str::to_string),
            model: "test-model".into(),
            endpoint: server.url(),
        })
        .unwrap()
    }

    const PATH: &str = "/v1beta/models/test-model:generateContent";

    #[test]
    fn prompt_lists_goals_and_habits() {
        let prompt = build_prompt(&seed::goals(today()), &seed::habits(today()));
        assert!(prompt.contains("- Goal: Run a 5k (Category: Health & fitness, Due: 2026-05-01, Status: To do)"));
        assert!(prompt.contains("- Habit: Go to the gym (Frequency: Weekly)"));
        assert!(prompt.contains("3 actionable insights"));
    }

    #[test]
    fn settle_maps_outcomes() {
        let ready = InsightState::settle(Ok("- one\n\n- two\n".into()));
        assert_eq!(ready.lines(), vec!["- one", "- two"]);

        let failed = InsightState::settle(Err(InsightError::MissingCredential));
        assert_eq!(
            failed,
            InsightState::Failed {
                message: "Could not generate insights: API key not found: set API_KEY or GEMINI_API_KEY".into()
            }
        );
        assert!(failed.lines().is_empty());
        assert!(!failed.is_pending());
        assert!(InsightState::Pending.is_pending());
    }

    #[test]
    fn state_serializes_with_status_tag() {
        let json = serde_json::to_value(InsightState::Ready { text: "ok".into() }).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ready", "text": "ok" }));
        let json = serde_json::to_value(InsightState::Idle).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "idle" }));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", PATH).expect(0).create_async().await;

        let client = client_for(&server, None);
        assert!(!client.has_credential());
        let err = client.generate_insights(&[], &[]).await.unwrap_err();
        assert!(matches!(err, InsightError::MissingCredential));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn returns_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"- Sleep more\n"},{"text":"- Run less"}]}}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server, Some("secret"));
        let text = client
            .generate_insights(&seed::goals(today()), &seed::habits(today()))
            .await
            .unwrap();
        assert_eq!(text, "- Sleep more\n- Run less");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_key_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(403)
            .with_body(r#"{"error":{"code":403,"message":"API key not valid"}}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("wrong"));
        let err = client.generate_insights(&[], &[]).await.unwrap_err();
        match err {
            InsightError::Auth(message) => assert_eq!(message, "HTTP 403: API key not valid"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_candidates_are_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("secret"));
        let err = client.generate_insights(&[], &[]).await.unwrap_err();
        assert!(matches!(err, InsightError::Provider(_)));
    }

    #[tokio::test]
    async fn server_failure_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(500)
            .with_body("upstream down")
            .create_async()
            .await;

        let client = client_for(&server, Some("secret"));
        let err = client.generate_insights(&[], &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "provider error: HTTP 500: upstream down");
    }
}
