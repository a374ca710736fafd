//! HTTP client for the Google Apps Script web app
//!
//! Posts the form as JSON and interprets the `{"result": ...}` envelope the
//! script answers with. Every failure collapses into a [`TransportError`].

use super::traits::SubmissionClient;
use crate::state::FeedbackPayload;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Value of `result` in a successful envelope
const SUCCESS_MARKER: &str = "success";

const UNPARSEABLE_ERROR_DETAIL: &str = "Failed to parse error response";
const MISSING_ERROR_DETAIL: &str = "Unknown error";
const REJECTED_FALLBACK: &str = "An unknown error occurred during submission.";

/// Why a submission did not go through
#[derive(Debug, Error)]
pub enum TransportError {
    /// Non-2xx HTTP status
    #[error("Server responded with {status}: {detail}")]
    Status { status: u16, detail: String },
    /// 2xx whose envelope did not report success
    #[error("{0}")]
    Rejected(String),
    /// 2xx whose body was not a JSON envelope
    #[error("invalid response body: {0}")]
    InvalidBody(#[source] reqwest::Error),
    /// DNS, connect, TLS or other transport failure
    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

/// Response envelope written by the spreadsheet script
#[derive(Debug, Default, Deserialize)]
struct ResultEnvelope {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ResultEnvelope {
    fn is_success(&self) -> bool {
        self.result.as_deref() == Some(SUCCESS_MARKER)
    }

    /// Server-supplied error text, ignoring blank values
    fn error_message(self) -> Option<String> {
        self.error.filter(|e| !e.trim().is_empty())
    }
}

/// Client for the spreadsheet endpoint
#[derive(Debug, Clone, Default)]
pub struct SheetsClient {
    client: Client,
}

impl SheetsClient {
    /// Create a client with the transport's default redirect and timeout behaviour
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn post(&self, endpoint: &str, payload: &FeedbackPayload) -> Result<(), TransportError> {
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "feedback endpoint responded");

        if !status.is_success() {
            let detail = match response.json::<ResultEnvelope>().await {
                Ok(envelope) => envelope
                    .error_message()
                    .unwrap_or_else(|| MISSING_ERROR_DETAIL.to_string()),
                Err(_) => UNPARSEABLE_ERROR_DETAIL.to_string(),
            };
            return Err(TransportError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let envelope: ResultEnvelope = response
            .json()
            .await
            .map_err(TransportError::InvalidBody)?;
        if !envelope.is_success() {
            return Err(TransportError::Rejected(
                envelope
                    .error_message()
                    .unwrap_or_else(|| REJECTED_FALLBACK.to_string()),
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl SubmissionClient for SheetsClient {
    async fn submit(
        &self,
        endpoint: &str,
        payload: &FeedbackPayload,
    ) -> Result<(), TransportError> {
        let result = self.post(endpoint, payload).await;
        if let Err(err) = &result {
            tracing::error!(error = %err, "Error submitting feedback to spreadsheet");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Score;
    use axum::{
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
        Json, Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/exec")
    }

    /// Server that records requests and answers with a fixed status and body
    async fn spawn_recording(status: StatusCode, body: Value) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let router = Router::new().route(
            "/exec",
            post(move |headers: HeaderMap, Json(payload): Json<Value>| {
                let recorder = recorder.clone();
                let body = body.clone();
                async move {
                    let content_type = headers
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    recorder.lock().unwrap().push((content_type, payload));
                    (status, Json(body))
                }
            }),
        );
        (spawn_server(router).await, seen)
    }

    async fn spawn_raw(status: StatusCode, body: &'static str) -> String {
        let router = Router::new().route(
            "/exec",
            post(move || async move { (status, body).into_response() }),
        );
        spawn_server(router).await
    }

    fn payload() -> FeedbackPayload {
        FeedbackPayload {
            score: Score::new(10).unwrap(),
            reason: String::new(),
            feedback: "Great!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_envelope_resolves() {
        let (url, seen) = spawn_recording(StatusCode::OK, json!({"result": "success"})).await;
        SheetsClient::new().submit(&url, &payload()).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_deref(), Some("application/json"));
        assert_eq!(
            seen[0].1,
            json!({"score": 10, "reason": "", "feedback": "Great!"})
        );
    }

    #[tokio::test]
    async fn test_error_envelope_is_rejected_with_server_message() {
        let (url, _) =
            spawn_recording(StatusCode::OK, json!({"result": "error", "error": "X"})).await;
        let err = SheetsClient::new().submit(&url, &payload()).await.unwrap_err();
        assert!(matches!(&err, TransportError::Rejected(msg) if msg == "X"));
    }

    #[tokio::test]
    async fn test_missing_marker_uses_fallback() {
        let (url, _) = spawn_recording(StatusCode::OK, json!({})).await;
        let err = SheetsClient::new().submit(&url, &payload()).await.unwrap_err();
        assert_eq!(err.to_string(), REJECTED_FALLBACK);
    }

    #[tokio::test]
    async fn test_non_2xx_names_status_and_detail() {
        let (url, _) = spawn_recording(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"result": "error", "error": "Sheet locked"}),
        )
        .await;
        let err = SheetsClient::new().submit(&url, &payload()).await.unwrap_err();
        assert_eq!(err.to_string(), "Server responded with 500: Sheet locked");
    }

    #[tokio::test]
    async fn test_non_2xx_without_error_field() {
        let (url, _) = spawn_recording(StatusCode::FORBIDDEN, json!({"result": "error"})).await;
        let err = SheetsClient::new().submit(&url, &payload()).await.unwrap_err();
        assert_eq!(err.to_string(), "Server responded with 403: Unknown error");
    }

    #[tokio::test]
    async fn test_non_2xx_with_unparseable_body() {
        let url = spawn_raw(StatusCode::BAD_GATEWAY, "upstream down").await;
        let err = SheetsClient::new().submit(&url, &payload()).await.unwrap_err();
        assert!(matches!(
            &err,
            TransportError::Status { status: 502, detail } if detail == UNPARSEABLE_ERROR_DETAIL
        ));
    }

    #[tokio::test]
    async fn test_2xx_with_html_body_is_invalid() {
        let url = spawn_raw(StatusCode::OK, "<html>sign in</html>").await;
        let err = SheetsClient::new().submit(&url, &payload()).await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let url = format!("http://{addr}/exec");
        let err = SheetsClient::new().submit(&url, &payload()).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[test]
    fn test_envelope_blank_error_is_ignored() {
        let envelope: ResultEnvelope =
            serde_json::from_str(r#"{"result": "error", "error": "  "}"#).unwrap();
        assert!(!envelope.is_success());
        assert!(envelope.error_message().is_none());
    }
}
