//! Assistant client — sends résumé text plus a user question to a remote
//! chat-completions endpoint (OpenRouter by default) and returns the reply.
//!
//! One request per question. No retry, no caching, transport-default timeouts.
//! The API key is passed in per call; this module never reads secrets.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

pub mod prompts;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Ошибка от API: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed API response: {0}")]
    Malformed(String),
}

/// What the caller gets back. A failure is never mistaken for an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssistantAnswer {
    Answered { answer: String },
    Failed { message: String },
}

impl From<Result<String, AssistantError>> for AssistantAnswer {
    fn from(result: Result<String, AssistantError>) -> Self {
        match result {
            Ok(answer) => AssistantAnswer::Answered { answer },
            Err(e) => AssistantAnswer::Failed {
                message: e.to_string(),
            },
        }
    }
}

/// Question-answering seam carried in `AppState` as `Arc<dyn Assistant>`.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn ask(
        &self,
        resume_text: &str,
        question: &str,
        api_key: &str,
    ) -> Result<String, AssistantError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// reqwest-backed chat-completions client.
#[derive(Clone)]
pub struct AssistantClient {
    client: Client,
    api_url: String,
    model: String,
    referer: String,
    title: String,
}

impl AssistantClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_url: config.assistant_api_url.clone(),
            model: config.assistant_model.clone(),
            referer: config.assistant_referer.clone(),
            title: config.assistant_title.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Assistant for AssistantClient {
    async fn ask(
        &self,
        resume_text: &str,
        question: &str,
        api_key: &str,
    ) -> Result<String, AssistantError> {
        let prompt = prompts::build_resume_prompt(resume_text, question);
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            // an unreadable body must not hide the status code
            let body = response.text().await.unwrap_or_default();
            warn!("Assistant API returned {status}");
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AssistantError::Malformed(e.to_string()))?;

        let answer = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AssistantError::Malformed("no choices[0].message.content".to_string()))?;

        info!("Assistant answered ({} chars)", answer.chars().count());
        debug!("Assistant model: {}", self.model);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode as AxumStatus, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves `app` on an ephemeral local port and returns its completions URL.
    async fn spawn_fake_api(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/v1/chat/completions")
    }

    fn client_for(url: String) -> AssistantClient {
        AssistantClient::new(&Config {
            assistant_api_url: url,
            ..Config::default()
        })
    }

    fn header(headers: &HeaderMap, name: &str) -> String {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    async fn echo_request(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let echoed = json!({
            "authorization": header(&headers, "authorization"),
            "content_type": header(&headers, "content-type"),
            "referer": header(&headers, "http-referer"),
            "title": header(&headers, "x-title"),
            "model": body["model"],
            "role": body["messages"][0]["role"],
            "content": body["messages"][0]["content"],
            "message_count": body["messages"].as_array().map(|m| m.len()),
        });
        Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": echoed.to_string() } }]
        }))
    }

    #[tokio::test]
    async fn test_request_shape_and_headers() {
        let url = spawn_fake_api(Router::new().route(
            "/api/v1/chat/completions",
            post(echo_request),
        ))
        .await;
        let client = client_for(url);

        let answer = client
            .ask("Опыт продаж", "Подходит?", "sk-test")
            .await
            .unwrap();
        let echoed: Value = serde_json::from_str(&answer).unwrap();

        assert_eq!(echoed["authorization"], "Bearer sk-test");
        assert_eq!(echoed["content_type"], "application/json");
        assert_eq!(echoed["referer"], "https://your-app-name.streamlit.app");
        assert_eq!(echoed["title"], "Resume Scoring App");
        assert_eq!(echoed["model"], "openai/gpt-4");
        assert_eq!(echoed["role"], "user");
        assert_eq!(echoed["message_count"], 1);
        assert_eq!(
            echoed["content"],
            "Вот текст резюме:\nОпыт продаж\n\nВопрос: Подходит?"
        );
    }

    #[tokio::test]
    async fn test_first_choice_returned_verbatim() {
        let app = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async {
                Json(json!({
                    "choices": [
                        { "message": { "role": "assistant", "content": "  Да, подходит.\n" } },
                        { "message": { "role": "assistant", "content": "second" } }
                    ]
                }))
            }),
        );
        let client = client_for(spawn_fake_api(app).await);
        let answer = client.ask("text", "q", "key").await.unwrap();
        assert_eq!(answer, "  Да, подходит.\n");
    }

    #[tokio::test]
    async fn test_rate_limit_becomes_failed_answer() {
        let app = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async { (AxumStatus::TOO_MANY_REQUESTS, r#"{"error":"slow down"}"#) }),
        );
        let client = client_for(spawn_fake_api(app).await);

        let result = client.ask("text", "q", "key").await;
        match &result {
            Err(AssistantError::Api { status, body }) => {
                assert_eq!(*status, 429);
                assert_eq!(body, r#"{"error":"slow down"}"#);
            }
            other => panic!("expected Api error, got {other:?}"),
        }

        let answer = AssistantAnswer::from(result);
        match answer {
            AssistantAnswer::Failed { message } => {
                assert!(message.contains("429"));
                assert!(message.contains(r#"{"error":"slow down"}"#));
            }
            AssistantAnswer::Answered { .. } => panic!("failure reported as answer"),
        }
    }

    #[tokio::test]
    async fn test_truncated_error_body_keeps_status() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Drain the whole request so closing the socket is a clean EOF.
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }

            // Promise 100 bytes, send 7, hang up.
            socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\n\r\npartial",
                )
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = client_for(format!("http://{addr}/api/v1/chat/completions"));
        match client.ask("text", "q", "key").await {
            Err(AssistantError::Api { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected Api error with status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_choices_is_malformed() {
        let app = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let client = client_for(spawn_fake_api(app).await);
        let result = client.ask("text", "q", "key").await;
        assert!(matches!(result, Err(AssistantError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{addr}/api/v1/chat/completions"));
        let result = client.ask("text", "q", "key").await;
        assert!(matches!(result, Err(AssistantError::Http(_))));
    }

    #[test]
    fn test_answer_serialization_is_tagged() {
        let answered = AssistantAnswer::Answered {
            answer: "ok".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&answered).unwrap(),
            json!({ "status": "answered", "answer": "ok" })
        );
    }
}
