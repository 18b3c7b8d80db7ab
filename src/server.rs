//! HTTP surface: `POST /generate-quiz` and `GET /health`.

use crate::error::{QuizError, Result};
use crate::quiz::{Difficulty, QuizGenerator, QuizQuestion, INVALID_VIDEO_ID};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

pub const DEFAULT_NUM_QUESTIONS: usize = 10;

/// A validated `/generate-quiz` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub video_id: String,
    pub num_questions: usize,
    pub difficulty: Difficulty,
}

/// Why a request body was refused before generation started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRejection {
    pub message: String,
    /// Set when the rejection is about a supplied video id, which is then
    /// echoed as the `transcripts` key.
    pub video_key: Option<String>,
}

impl RequestRejection {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            video_key: None,
        }
    }
}

impl QuizRequest {
    /// Validate a JSON request body.
    pub fn from_json(body: &Map<String, Value>) -> std::result::Result<Self, RequestRejection> {
        let video_id = match body.get("videoId") {
            None => return Err(RequestRejection::new("Video ID is required")),
            Some(v) if is_blank(v) => return Err(RequestRejection::new("Video ID is required")),
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => None,
        };

        let num_questions = match body.get("numQuestions") {
            None => DEFAULT_NUM_QUESTIONS,
            Some(v) => v
                .as_u64()
                .filter(|n| *n > 0)
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    RequestRejection::new("Number of questions must be a positive integer")
                })?,
        };

        let difficulty = match body.get("difficulty") {
            None => Difficulty::default(),
            Some(Value::String(s)) => s.parse().map_err(RequestRejection::new)?,
            Some(_) => {
                return Err(RequestRejection::new(
                    "Invalid difficulty. Must be one of: easy, medium, hard",
                ))
            }
        };

        let video_id = match video_id {
            Some(id) => id,
            None => {
                let key = body.get("videoId").map(Value::to_string);
                return Err(RequestRejection {
                    message: INVALID_VIDEO_ID.to_string(),
                    video_key: key,
                });
            }
        };

        Ok(Self {
            video_id,
            num_questions,
            difficulty,
        })
    }
}

/// Null, `""`, `0`, `false` and empty containers count as a missing id.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Response body shared by every outcome of `/generate-quiz`.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub quizzes: Vec<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub transcripts: BTreeMap<String, Option<String>>,
    pub transcript_source: Option<String>,
}

impl QuizResponse {
    fn rejected(error: impl Into<String>) -> Self {
        Self {
            quizzes: Vec::new(),
            error: Some(error.into()),
            transcripts: BTreeMap::new(),
            transcript_source: None,
        }
    }

    fn server_error(detail: impl std::fmt::Display) -> Self {
        Self::rejected(format!("Server error: {}", detail))
    }
}

pub fn router(generator: Arc<QuizGenerator>) -> Router {
    Router::new()
        .route("/generate-quiz", post(generate_quiz))
        .route("/health", get(health))
        .with_state(generator)
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate_quiz(State(generator): State<Arc<QuizGenerator>>, body: Bytes) -> Response {
    let (status, response) = handle_generate(&generator, &body).await;
    (status, Json(response)).into_response()
}

async fn handle_generate(generator: &QuizGenerator, body: &[u8]) -> (StatusCode, QuizResponse) {
    let json = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                QuizResponse::server_error("request body must be a JSON object"),
            )
        }
        Err(e) => {
            warn!("Unreadable request body: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, QuizResponse::server_error(e));
        }
    };

    let request = match QuizRequest::from_json(&json) {
        Ok(request) => request,
        Err(rejection) => {
            debug!("Rejected request: {}", rejection.message);
            let transcripts = rejection
                .video_key
                .map(|key| BTreeMap::from([(key, None)]))
                .unwrap_or_default();
            return (
                StatusCode::BAD_REQUEST,
                QuizResponse {
                    transcripts,
                    ..QuizResponse::rejected(rejection.message)
                },
            );
        }
    };

    let outcome = match generator
        .generate(&request.video_id, request.num_questions, request.difficulty)
        .await
    {
        Ok(outcome) => outcome,
        Err(QuizError::InvalidInput(message)) => {
            let transcripts = BTreeMap::from([(request.video_id, None)]);
            return (
                StatusCode::BAD_REQUEST,
                QuizResponse {
                    transcripts,
                    ..QuizResponse::rejected(message)
                },
            );
        }
        Err(e) => {
            error!("Quiz generation crashed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, QuizResponse::server_error(e));
        }
    };

    let status = if outcome.error.is_some() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    let response = QuizResponse {
        quizzes: outcome.quizzes,
        error: outcome.error,
        transcripts: BTreeMap::from([(request.video_id, outcome.transcript)]),
        transcript_source: outcome.transcript_source,
    };

    (status, response)
}

/// Serve until Ctrl-C.
pub async fn serve(addr: &str, generator: QuizGenerator) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(generator)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(QuizError::Io)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> std::result::Result<QuizRequest, RequestRejection> {
        match value {
            Value::Object(map) => QuizRequest::from_json(&map),
            _ => unreachable!(),
        }
    }

    fn rejection(value: Value) -> String {
        request(value).unwrap_err().message
    }

    #[test]
    fn test_defaults() {
        let req = request(json!({"videoId": "dQw4w9WgXcQ"})).unwrap();
        assert_eq!(req.num_questions, 10);
        assert_eq!(req.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_full_request() {
        let req =
            request(json!({"videoId": "dQw4w9WgXcQ", "numQuestions": 5, "difficulty": "HARD"}))
                .unwrap();
        assert_eq!(req.num_questions, 5);
        assert_eq!(req.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_missing_video_id() {
        for body in [
            json!({}),
            json!({"videoId": ""}),
            json!({"videoId": null}),
            json!({"videoId": 0}),
            json!({"videoId": false}),
        ] {
            let err = request(body).unwrap_err();
            assert_eq!(err.message, "Video ID is required");
            assert!(err.video_key.is_none());
        }
    }

    #[test]
    fn test_non_string_video_id_keeps_key() {
        let err = request(json!({"videoId": 12345678901u64})).unwrap_err();
        assert_eq!(err.message, INVALID_VIDEO_ID);
        assert_eq!(err.video_key.as_deref(), Some("12345678901"));

        // Field checks still run first.
        let err = request(json!({"videoId": 42, "numQuestions": 0})).unwrap_err();
        assert_eq!(err.message, "Number of questions must be a positive integer");
        assert!(err.video_key.is_none());
    }

    #[test]
    fn test_bad_num_questions() {
        let expected = "Number of questions must be a positive integer";
        for n in [json!(0), json!(-3), json!(2.5), json!("5"), json!(null)] {
            let err = rejection(json!({"videoId": "dQw4w9WgXcQ", "numQuestions": n}));
            assert_eq!(err, expected);
        }
    }

    #[test]
    fn test_bad_difficulty() {
        let expected = "Invalid difficulty. Must be one of: easy, medium, hard";
        let err = rejection(json!({"videoId": "dQw4w9WgXcQ", "difficulty": "brutal"}));
        assert_eq!(err, expected);
        let err = rejection(json!({"videoId": "dQw4w9WgXcQ", "difficulty": 3}));
        assert_eq!(err, expected);
    }

    #[test]
    fn test_rejected_response_shape() {
        let json = serde_json::to_value(QuizResponse::rejected("nope")).unwrap();
        assert_eq!(
            json,
            json!({"quizzes": [], "error": "nope", "transcripts": {}, "transcript_source": null})
        );
    }

    #[test]
    fn test_success_response_omits_error() {
        let response = QuizResponse {
            quizzes: Vec::new(),
            error: None,
            transcripts: BTreeMap::from([("abc".to_string(), Some("text".to_string()))]),
            transcript_source: Some("English transcript".to_string()),
        };
        let json = serde_json::to_value(response).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["transcripts"]["abc"], "text");
    }
}
