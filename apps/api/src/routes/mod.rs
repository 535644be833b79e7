pub mod health;
pub mod page;
pub mod resumes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(page::serve_upload_page))
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/score", post(resumes::handle_score))
        .route("/api/v1/resumes/ask", post(resumes::handle_ask))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::assistant::AssistantClient;
    use crate::config::{Config, EnvSecrets};
    use crate::scoring::{KeywordScorer, RuleSet};

    fn test_state() -> AppState {
        let config = Config::default();
        AppState {
            assistant: Arc::new(AssistantClient::new(&config)),
            scorer: Arc::new(KeywordScorer::new(RuleSet::telephonist())),
            secrets: Arc::new(EnvSecrets),
            config,
        }
    }

    async fn get_body(uri: &str) -> (StatusCode, String) {
        let response = build_router(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_body("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn test_upload_page_served() {
        let (status, body) = get_body("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Оценка резюме для вакансии телефониста"));
        assert!(body.contains("/api/v1/resumes/score"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, _) = get_body("/api/v1/render/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
