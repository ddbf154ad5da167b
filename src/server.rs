//! HTTP server.
//!
//! Exposes the Plant Bot and the dataset list views as a JSON API. All
//! handlers share one immutable [`App`]; nothing is written after startup.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check with version and index totals |
//! | `POST` | `/api/plantbot` | Answer a question: `{question, focus?}` → `{answer, source}` |
//! | `GET`  | `/api/datasets` | Load status of the six CSV files |
//! | `GET`  | `/api/datasets/{kind}?q=` | Search-filtered list view of one dataset |
//! | `GET`  | `/api/plants` | Merged plant records |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "Please include a question." } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the API can back a
//! browser front end served from elsewhere.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::App;
use crate::config::Config;
use crate::datasets::{get_dataset_statuses, get_plant_summaries, DatasetStatus, PlantSummary};
use crate::models::{Answer, DatasetKind};
use crate::summary::Focus;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    app: App,
}

/// Loads the datasets named in `config` and serves the API on `[server].bind`.
///
/// Runs until the process is terminated. Returns an error if the
/// configuration cannot be turned into an [`App`] or binding fails.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let app = App::load(config)?;
    serve(&config.server.bind, app).await
}

/// Serves an already constructed [`App`] on `bind_addr`.
pub async fn serve(bind_addr: &str, app: App) -> anyhow::Result<()> {
    let router = router(app);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(bind = %bind_addr, "mpmdb server listening on http://{}", bind_addr);
    axum::serve(listener, router).await?;

    Ok(())
}

/// Builds the route table with CORS and request tracing.
pub fn router(app: App) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/plantbot", post(handle_plantbot))
        .route("/api/datasets", get(handle_list_datasets))
        .route("/api/datasets/{kind}", get(handle_dataset_page))
        .route("/api/plants", get(handle_list_plants))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { app })
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

/// Internal error type that converts into an Axum HTTP response.
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

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    plants: usize,
    aliases: usize,
    loaded_at: DateTime<Utc>,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let knowledge = state.app.knowledge();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        plants: knowledge.len(),
        aliases: knowledge.alias_count(),
        loaded_at: state.app.catalogue.datasets().loaded_at(),
    })
}

// ============ POST /api/plantbot ============

/// Handler for `POST /api/plantbot`.
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// that malformed input gets the API's own error body. A `focus` that is not
/// a string, is blank, or names no known focus is ignored.
async fn handle_plantbot(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Answer>, AppError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| bad_request("Invalid payload."))?;
    let payload = payload
        .as_object()
        .ok_or_else(|| bad_request("Invalid payload."))?;

    let question = payload
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if question.is_empty() {
        return Err(bad_request("Please include a question."));
    }

    let focus = payload
        .get("focus")
        .and_then(Value::as_str)
        .and_then(Focus::parse);

    Ok(Json(state.app.bot.generate_answer(question, focus).await))
}

// ============ GET /api/datasets ============

#[derive(Serialize)]
struct DatasetListResponse {
    datasets: Vec<DatasetStatus>,
}

async fn handle_list_datasets(State(state): State<AppState>) -> Json<DatasetListResponse> {
    Json(DatasetListResponse {
        datasets: get_dataset_statuses(state.app.catalogue.datasets()),
    })
}

// ============ GET /api/datasets/{kind} ============

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default)]
    q: String,
}

async fn handle_dataset_page(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let kind: DatasetKind = kind.parse().map_err(|e: anyhow::Error| not_found(e.to_string()))?;
    let page = state.app.catalogue.search(kind, &query.q);
    Ok(Json(&page).into_response())
}

// ============ GET /api/plants ============

#[derive(Serialize)]
struct PlantListResponse {
    plants: Vec<PlantSummary>,
}

async fn handle_list_plants(State(state): State<AppState>) -> Json<PlantListResponse> {
    Json(PlantListResponse {
        plants: get_plant_summaries(state.app.knowledge()),
    })
}
