//! Typed client for the remote interview service.
//!
//! The service owns all natural-language work (question generation, answer
//! evaluation, scoring); this client owns nothing but transport.  Three
//! operations, each a single request/response cycle with no retry — failure
//! handling is delegated to the orchestrator.
//!
//! [`InterviewApi`] is the async trait the orchestrator depends on;
//! [`HttpInterviewClient`] is the production implementation.  All connection
//! details come from [`ServerConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::client::resume::ResumeDocument;
use crate::config::ServerConfig;

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to the interview service.
///
/// The orchestrator treats every variant identically (one user-visible
/// status turn); the distinction exists for logging only.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failure or non-success HTTP status.
    #[error("request failed: {0}")]
    Transport(String),

    /// The request did not complete within the configured timeout.
    #[error("interview service timed out")]
    Timeout,

    /// The response body could not be parsed as expected JSON.
    #[error("failed to parse service response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// Response of the resume intake endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Server-assigned stored file name.
    pub filename: String,
    /// The initial interview question generated from the resume.
    pub question: String,
    /// Human-readable upload confirmation.
    pub message: String,
}

/// Response of the answer evaluation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationResponse {
    /// Structured feedback on the submitted answer.
    pub feedback: String,
    /// Next question, when the service generated one.  Absence (or an empty
    /// string) is a valid outcome, not an error.
    #[serde(default)]
    pub follow_up_question: Option<String>,
}

impl EvaluationResponse {
    /// The follow-up question with empty / whitespace-only values
    /// normalised away.
    pub fn follow_up(&self) -> Option<&str> {
        self.follow_up_question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// Response of the session termination endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StopResponse {
    /// Closing message (includes the candidate's average score).
    pub message: String,
}

// ---------------------------------------------------------------------------
// InterviewApi trait
// ---------------------------------------------------------------------------

/// Async interface to the remote interview service.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn InterviewApi>`).
#[async_trait]
pub trait InterviewApi: Send + Sync {
    /// Upload a resume; the service replies with the first question.
    async fn submit_resume(&self, document: &ResumeDocument) -> Result<UploadResponse, ApiError>;

    /// Submit `answer` to `question` for evaluation.
    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<EvaluationResponse, ApiError>;

    /// End the interview and fetch the closing message.
    async fn end_interview(&self) -> Result<StopResponse, ApiError>;
}

// Compile-time assertion: Box<dyn InterviewApi> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn InterviewApi>) {}
};

// ---------------------------------------------------------------------------
// HttpInterviewClient
// ---------------------------------------------------------------------------

/// Production [`InterviewApi`] implementation over HTTP.
///
/// Endpoints, relative to the configured base URL:
///
/// | Operation         | Route               | Body                          |
/// |-------------------|---------------------|-------------------------------|
/// | `submit_resume`   | `POST /upload`          | multipart, field `file`   |
/// | `evaluate_answer` | `POST /evaluate-answer` | JSON `{question, answer}` |
/// | `end_interview`   | `POST /stop`            | empty                     |
pub struct HttpInterviewClient {
    client: reqwest::Client,
    config: ServerConfig,
}

impl HttpInterviewClient {
    /// Build a client from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &ServerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl InterviewApi for HttpInterviewClient {
    async fn submit_resume(&self, document: &ResumeDocument) -> Result<UploadResponse, ApiError> {
        let part = reqwest::multipart::Part::bytes(document.bytes().to_vec())
            .file_name(document.file_name().to_owned())
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<EvaluationResponse, ApiError> {
        let body = serde_json::json!({
            "question": question,
            "answer":   answer,
        });

        let response = self
            .client
            .post(self.url("/evaluate-answer"))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn end_interview(&self) -> Result<StopResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/stop"))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(base_url: &str) -> ServerConfig {
        ServerConfig {
            base_url: base_url.into(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _client = HttpInterviewClient::from_config(&make_config("http://localhost:5000"));
    }

    #[test]
    fn url_joins_routes() {
        let client = HttpInterviewClient::from_config(&make_config("http://localhost:5000"));
        assert_eq!(client.url("/upload"), "http://localhost:5000/upload");
        assert_eq!(client.url("/stop"), "http://localhost:5000/stop");
    }

    #[test]
    fn url_tolerates_trailing_slash_in_base() {
        let client = HttpInterviewClient::from_config(&make_config("http://localhost:5000/"));
        assert_eq!(
            client.url("/evaluate-answer"),
            "http://localhost:5000/evaluate-answer"
        );
    }

    /// Verify that `HttpInterviewClient` is object-safe (usable as
    /// `dyn InterviewApi`).
    #[test]
    fn client_is_object_safe() {
        let client: Box<dyn InterviewApi> =
            Box::new(HttpInterviewClient::from_config(&make_config(
                "http://localhost:5000",
            )));
        drop(client);
    }

    // ---- DTO deserialization ---

    #[test]
    fn upload_response_parses() {
        let json = r#"{"filename":"ab12_r.pdf","question":"Tell me about yourself","message":"Resume uploaded and processed successfully."}"#;
        let parsed: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.filename, "ab12_r.pdf");
        assert_eq!(parsed.question, "Tell me about yourself");
    }

    #[test]
    fn evaluation_response_parses_with_follow_up() {
        let json = r#"{"feedback":"Good","follow_up_question":"Which projects?"}"#;
        let parsed: EvaluationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.feedback, "Good");
        assert_eq!(parsed.follow_up(), Some("Which projects?"));
    }

    #[test]
    fn evaluation_response_parses_without_follow_up() {
        let json = r#"{"feedback":"Good"}"#;
        let parsed: EvaluationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.follow_up(), None);
    }

    /// An empty or whitespace-only follow-up counts as absent.
    #[test]
    fn blank_follow_up_is_normalised_to_none() {
        let json = r#"{"feedback":"Good","follow_up_question":"  "}"#;
        let parsed: EvaluationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.follow_up(), None);

        let json = r#"{"feedback":"Good","follow_up_question":""}"#;
        let parsed: EvaluationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.follow_up(), None);
    }

    #[test]
    fn follow_up_is_trimmed() {
        let json = r#"{"feedback":"Good","follow_up_question":"  Which projects?  "}"#;
        let parsed: EvaluationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.follow_up(), Some("Which projects?"));
    }

    #[test]
    fn stop_response_parses() {
        let json = r#"{"message":"The interview has ended. The average score of the candidate is 72.50."}"#;
        let parsed: StopResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.message.contains("average score"));
    }
}
