//! HTTP server implementation using axum

use crate::error::{Error, Result};
use crate::pdf::{
    default_font_search_paths, render_worksheet, FontCache, FontLocator, FontStatus,
    GeneratedDocument,
};
use crate::worksheet::{prepare_pairs, HideMode, PairShuffler, RenderRequest, ThreadRngShuffler};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Local;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// Port used when `PORT` is unset or unparsable
pub const DEFAULT_PORT: u16 = 5000;

/// File name of every generated download
pub const DOWNLOAD_FILE_NAME: &str = "vocab_test.pdf";

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Runtime configuration for the worksheet server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind (default: all interfaces)
    pub host: String,
    /// TCP port (default: 5000, overridden by `PORT`)
    pub port: u16,
    /// Candidate font files in priority order
    pub font_search_paths: Vec<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            font_search_paths: default_font_search_paths(),
        }
    }
}

impl ServerConfig {
    /// Defaults plus the `PORT` environment variable
    pub fn from_env() -> Self {
        Self {
            port: parse_port(std::env::var("PORT").ok().as_deref()),
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    match value.map(str::trim) {
        None | Some("") => DEFAULT_PORT,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = raw, default = DEFAULT_PORT, "invalid PORT; using default");
            DEFAULT_PORT
        }),
    }
}

// ============================================================================
// Form input
// ============================================================================

/// Decoded `/generate` submission before cleaning
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorksheetForm {
    pub front: Vec<String>,
    pub back: Vec<String>,
    pub hide_mode: HideMode,
    pub display_name: Option<String>,
}

impl WorksheetForm {
    /// Collect repeated urlencoded fields in submission order.
    ///
    /// Front terms arrive as `english[]` (or `front[]`), back terms as
    /// `korean[]` (or `back[]`); the name comes from `student_name` or
    /// `display_name`.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        let mut hide_mode = None;

        for (key, value) in fields {
            match key.as_str() {
                "english[]" | "front[]" | "front" => form.front.push(value),
                "korean[]" | "back[]" | "back" => form.back.push(value),
                "hide_mode" => hide_mode = Some(value),
                "student_name" | "display_name" => form.display_name = Some(value),
                other => tracing::debug!(field = other, "ignoring unknown form field"),
            }
        }

        form.hide_mode = HideMode::from_form_value(hide_mode.as_deref());
        form
    }
}

// ============================================================================
// Application state
// ============================================================================

/// State shared by all requests; the parsed font face is reused across them
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    fonts: Arc<FontCache>,
    shuffler: Arc<dyn PairShuffler>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_shuffler(config, Arc::new(ThreadRngShuffler))
    }

    /// State with a specific row-order source
    pub fn with_shuffler(config: ServerConfig, shuffler: Arc<dyn PairShuffler>) -> Self {
        let fonts = FontLocator::new(config.font_search_paths.clone());
        Self {
            config: Arc::new(config),
            fonts: Arc::new(FontCache::new(fonts)),
            shuffler,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn font_status(&self) -> FontStatus {
        self.fonts.status()
    }

    /// Clean, shuffle and render one submission
    pub async fn generate(&self, form: WorksheetForm) -> Result<GeneratedDocument> {
        let pairs = prepare_pairs(&form.front, &form.back, self.shuffler.as_ref());
        let request = RenderRequest::new(
            pairs,
            form.hide_mode,
            form.display_name,
            Local::now().date_naive(),
        );

        let fonts = Arc::clone(&self.fonts);
        tokio::task::spawn_blocking(move || render_worksheet(&request, &*fonts.load()?)).await?
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / — the word-list form
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /generate — worksheet PDF as a download
pub async fn generate(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let form = WorksheetForm::from_fields(fields);

    match state.generate(form).await {
        Ok(document) => pdf_attachment(document.bytes),
        Err(e) => {
            tracing::error!(error = %e, "generate failed");
            error_response(&e)
        }
    }
}

/// GET /health — font availability without generating anything
pub async fn health(State(state): State<AppState>) -> Json<FontStatus> {
    Json(state.font_status())
}

fn pdf_attachment(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
            ),
        ],
        bytes,
    )
        .into_response()
}

fn error_response(e: &Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.client_message() })),
    )
        .into_response()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .with_state(state)
}

/// Run the server with configuration from the environment
pub async fn run_server() -> anyhow::Result<()> {
    run_server_with_config(ServerConfig::from_env()).await
}

/// Run the server with full configuration
pub async fn run_server_with_config(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(config);
    let addr = state.config().bind_addr();

    let status = state.font_status();
    match &status.path {
        Some(path) => tracing::info!(path = %path, "Korean font available"),
        None => tracing::warn!(
            error = status.error.as_deref().unwrap_or_default(),
            "Korean font missing; /generate will fail until one is installed"
        ),
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Vocabulary worksheet server ready");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
