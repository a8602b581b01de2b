//! JSON HTTP API for the legal assistant.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/ask` | Answer a legal question grounded in the knowledge base |
//! | `GET`  | `/lookup` | Substring lookup by article or topic |
//! | `POST` | `/summarize/pdf` | Summarize a PDF (raw bytes body) |
//! | `POST` | `/summarize/video` | Summarize a video by its transcript |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "question must not be empty" } }
//! ```
//!
//! Codes: `bad_request` (400), `not_found` (404), `upstream_error` (502).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted; the API is consumed
//! by browser front ends on other origins.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::format::{context_from_matches, format_natural, NOTHING_FOUND};
use crate::lemma::Lemmatizer;
use crate::llm::LlmClient;
use crate::lookup::{find_by_article, find_by_topic};
use crate::matcher::relevant_entries;
use crate::models::{Category, Dataset, KnowledgeEntry};
use crate::summarize::{summarize_pdf, summarize_video, DocumentSummary, SummarizeError};
use crate::transcript::{TranscriptError, TranscriptFetcher};

/// Shared application state, injected into every handler. The dataset is
/// read-only after startup, so concurrent requests need no locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dataset: Arc<Dataset>,
    pub llm: Arc<LlmClient>,
    pub lemmatizer: Arc<dyn Lemmatizer>,
    pub transcripts: Arc<dyn TranscriptFetcher>,
}

/// Start the HTTP server on the configured bind address. Runs until the
/// process is terminated.
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let bind_addr = state.config.server.bind.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ask", post(handle_ask))
        .route("/lookup", get(handle_lookup))
        .route("/summarize/pdf", post(handle_summarize_pdf))
        .route("/summarize/video", post(handle_summarize_video))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    tracing::info!(addr = %bind_addr, "legal assistant API listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

#[derive(Debug)]
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn upstream_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_GATEWAY,
        code: "upstream_error".to_string(),
        message: message.into(),
    }
}

/// Map summarization failures onto the HTTP error contract: bad input
/// stays a client error, upstream outages become 502, and a video
/// without transcripts is a 404.
fn classify_summarize_error(err: SummarizeError) -> AppError {
    let message = err.to_string();
    match err {
        SummarizeError::Extract(_) => bad_request(message),
        SummarizeError::Transcript(TranscriptError::InvalidUrl) => bad_request(message),
        SummarizeError::Transcript(_) | SummarizeError::Llm(_) => upstream_error(message),
        SummarizeError::NoTranscript => not_found(message),
    }
}

/// Category query/body values default to `consulta` when absent.
fn parse_category(raw: Option<&str>) -> Result<Category, AppError> {
    match raw {
        None => Ok(Category::Consulta),
        Some(s) => s
            .parse::<Category>()
            .map_err(|e| bad_request(e.to_string())),
    }
}

/// A question must carry content after trimming.
fn validate_question(raw: &str) -> Result<&str, AppError> {
    let question = raw.trim();
    if question.is_empty() {
        return Err(bad_request("question must not be empty"));
    }
    Ok(question)
}

#[derive(Debug)]
enum LookupFilter<'a> {
    Article(&'a str),
    Topic(&'a str),
}

/// At least one of `article`/`topic` is required; `article` wins when
/// both are given.
fn lookup_filter(params: &LookupParams) -> Result<LookupFilter<'_>, AppError> {
    match (&params.article, &params.topic) {
        (Some(article), _) => Ok(LookupFilter::Article(article)),
        (None, Some(topic)) => Ok(LookupFilter::Topic(topic)),
        (None, None) => Err(bad_request("provide at least 'article' or 'topic'")),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /ask ============

#[derive(Deserialize)]
struct AskRequest {
    question: String,
    category: Option<String>,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
    /// Entries that shared lemmas with the question, rendered for humans.
    matches: String,
}

/// Answer a natural-language legal question. The question is matched
/// against the category's knowledge base; matched entries (or, failing
/// that, the whole category) become the prompt context.
async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question = validate_question(&request.question)?;
    let category = parse_category(request.category.as_deref())?;
    let entries = state.dataset.entries(category);

    let results = relevant_entries(state.lemmatizer.as_ref(), question, entries);
    let matches = format_natural(&results);

    let context = context_from_matches(&results, entries);
    let answer = state
        .llm
        .answer(question, &context)
        .await
        .map_err(|e| upstream_error(e.to_string()))?;

    Ok(Json(AskResponse { answer, matches }))
}

// ============ GET /lookup ============

#[derive(Deserialize)]
struct LookupParams {
    article: Option<String>,
    topic: Option<String>,
    category: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum LookupResponse {
    Hits(Vec<KnowledgeEntry>),
    Message { message: String },
}

/// Substring lookup by article identifier or topic. Exactly the loaded
/// entries, in dataset order; no matching beyond `contains`.
async fn handle_lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<LookupResponse>, AppError> {
    let category = parse_category(params.category.as_deref())?;

    let hits: Vec<KnowledgeEntry> = match lookup_filter(&params)? {
        LookupFilter::Article(article) => find_by_article(&state.dataset, article, category)
            .into_iter()
            .cloned()
            .collect(),
        LookupFilter::Topic(topic) => find_by_topic(&state.dataset, topic, category)
            .into_iter()
            .cloned()
            .collect(),
    };

    if hits.is_empty() {
        return Ok(Json(LookupResponse::Message {
            message: NOTHING_FOUND.to_string(),
        }));
    }
    Ok(Json(LookupResponse::Hits(hits)))
}

// ============ POST /summarize/pdf ============

/// Summarize an uploaded PDF. The request body is the raw PDF bytes.
async fn handle_summarize_pdf(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DocumentSummary>, AppError> {
    if body.is_empty() {
        return Err(bad_request("request body must contain a PDF"));
    }

    let summary = summarize_pdf(&state.llm, &body)
        .await
        .map_err(classify_summarize_error)?;
    Ok(Json(summary))
}

// ============ POST /summarize/video ============

#[derive(Deserialize)]
struct VideoRequest {
    url: String,
}

/// Summarize a video through its transcript, trying the configured
/// languages in preference order.
async fn handle_summarize_video(
    State(state): State<AppState>,
    Json(request): Json<VideoRequest>,
) -> Result<Json<DocumentSummary>, AppError> {
    let summary = summarize_video(
        &state.llm,
        state.transcripts.as_ref(),
        &request.url,
        &state.config.transcript.languages,
    )
    .await
    .map_err(classify_summarize_error)?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_category_defaults_to_consulta() {
        assert_eq!(parse_category(None).unwrap(), Category::Consulta);
    }

    #[test]
    fn invalid_category_is_a_client_error() {
        let err = parse_category(Some("penal")).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "bad_request");
    }

    #[test]
    fn alias_category_is_accepted() {
        assert_eq!(
            parse_category(Some("situacao")).unwrap(),
            Category::AnaliseSituacao
        );
    }

    #[test]
    fn empty_or_whitespace_question_is_a_client_error() {
        for raw in ["", "   ", "\n\t"] {
            let err = validate_question(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "question = {raw:?}");
            assert_eq!(err.code, "bad_request");
        }
        assert_eq!(validate_question("  Tenho direito?  ").unwrap(), "Tenho direito?");
    }

    #[test]
    fn lookup_requires_article_or_topic() {
        let neither = LookupParams {
            article: None,
            topic: None,
            category: None,
        };
        let err = lookup_filter(&neither).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "bad_request");

        let both = LookupParams {
            article: Some("5".to_string()),
            topic: Some("trabalho".to_string()),
            category: None,
        };
        assert!(matches!(lookup_filter(&both).unwrap(), LookupFilter::Article("5")));
    }

    #[tokio::test]
    async fn client_errors_render_the_error_contract() {
        let response = bad_request("question must not be empty").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "bad_request");
        assert_eq!(body["error"]["message"], "question must not be empty");
    }
}
