//! Axum route handlers for résumé scoring and questions.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::AssistantAnswer;
use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, PREVIEW_CHARS};
use crate::scoring::Verdict;
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    /// Full extracted text. The client sends it back with questions.
    pub text: String,
    pub preview: String,
    pub preview_truncated: bool,
    pub score: i32,
    pub verdict: Verdict,
    pub verdict_message: &'static str,
    pub report: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub resume_text: String,
    pub question: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/score
///
/// Multipart upload with a single PDF in the `file` field.
pub async fn handle_score(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::Validation(
                "Only one file may be uploaded".to_string(),
            ));
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if !is_pdf(field.content_type(), &filename) {
            return Err(AppError::Validation(
                "Only PDF files are accepted".to_string(),
            ));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some(bytes.to_vec());
    }

    let pdf_bytes =
        upload.ok_or_else(|| AppError::Validation("file field is required".to_string()))?;
    let upload_len = pdf_bytes.len();

    let text = extract_text_blocking(pdf_bytes).await?;
    let result = state.scorer.score(text.as_str());
    let verdict = result.verdict();
    if result.is_auto_rejected() {
        info!("Upload auto-rejected by employer rule");
    }

    info!(
        "Scored upload: {} bytes, {} page(s), score {} ({:?})",
        upload_len,
        text.page_count(),
        result.score,
        verdict
    );

    let (preview, preview_truncated) = text.preview(PREVIEW_CHARS);
    let preview = preview.to_string();

    Ok(Json(ScoreResponse {
        text: text.into_string(),
        preview,
        preview_truncated,
        score: result.score,
        verdict,
        verdict_message: verdict.message(),
        report: result.report,
    }))
}

/// POST /api/v1/resumes/ask
///
/// Blank questions are refused before the key is looked up. Assistant
/// failures come back as a normal `failed` payload with status 200.
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AssistantAnswer>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    let api_key = state.secrets.api_key()?;

    let answer: AssistantAnswer = state
        .assistant
        .ask(&request.resume_text, &request.question, &api_key)
        .await
        .into();

    Ok(Json(answer))
}

fn is_pdf(content_type: Option<&str>, filename: &str) -> bool {
    content_type.is_some_and(|ct| ct.eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        || filename.to_lowercase().ends_with(".pdf")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
