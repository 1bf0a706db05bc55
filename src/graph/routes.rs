use super::assets::INDEX_HTML;
use super::data::GraphNode;
use super::mermaid::{self, MermaidOptions};
use super::session::Session;
use crate::analysis::{Collection, Detail, collection_detail, node_detail, plugin_detail};
use crate::config::GraphSettings;
use crate::diff::{diff_documents, format_unified};
use crate::model::{PluginReference, PluginScope};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

const PLACEHOLDER_GRAPH: &str = "graph TD\n    A[Upload a file to see the graph]\n";

/// Server state. Holds at most one loaded document at a time.
pub struct AppState {
    pub settings: GraphSettings,
    pub session: RwLock<Option<Session>>,
}

impl AppState {
    pub fn new(settings: GraphSettings, session: Option<Session>) -> Arc<Self> {
        Arc::new(Self {
            settings,
            session: RwLock::new(session),
        })
    }
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn no_document() -> Self {
        Self::new(StatusCode::NOT_FOUND, "No document loaded")
    }

    fn internal(err: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/graph", get(graph_handler))
        .route("/api/node/{id}", get(node_handler))
        .route("/api/entities/{kind}", get(entities_handler))
        .route("/api/plugin", get(plugin_handler))
        .route("/api/document", post(document_handler))
        .route("/api/diff", post(diff_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the viewer on localhost and block until the server stops.
pub async fn serve(
    state: Arc<AppState>,
    port: u16,
    open_browser: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(state);

    let addr = format!("127.0.0.1:{}", port);
    let url = format!("http://{}", addr);

    crate::style::status(&format!("Viewer running at {}", crate::style::url(&url)));
    crate::style::hint("Press Ctrl+C to stop");

    if open_browser {
        if let Err(e) = open::that(&url) {
            crate::style::warning(&format!("Could not open browser: {}", e));
        }
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let theme = serde_json::to_string(&state.settings.theme).unwrap_or_else(|_| "\"neutral\"".to_string());
    Html(INDEX_HTML.replace("__THEME__", &theme))
}

async fn summary_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or_else(ApiError::no_document)?;
    Ok(Json(json!({ "source": session.source, "summary": session.summary })).into_response())
}

async fn graph_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let guard = state.session.read().await;
    let text = match guard.as_ref() {
        Some(session) => {
            let link = |node: &GraphNode| format!("#node/{}", node.id);
            let options = MermaidOptions {
                direction: state.settings.direction,
                on_click: Some(&link),
            };
            mermaid::render(&session.graph, &options)
        }
        None => PLACEHOLDER_GRAPH.to_string(),
    };
    Json(json!({ "mermaid": text }))
}

async fn node_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or_else(ApiError::no_document)?;
    let detail = node_detail(&session.graph, &id).map_err(ApiError::internal)?;
    Ok(detail_response(detail))
}

async fn entities_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> Result<Response, ApiError> {
    let collection = Collection::parse(&kind).ok_or_else(|| {
        ApiError::new(StatusCode::BAD_REQUEST, format!("Unknown collection: {}", kind))
    })?;
    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or_else(ApiError::no_document)?;
    let detail = collection_detail(&session.document, collection).map_err(ApiError::internal)?;
    Ok(detail_response(detail))
}

#[derive(Debug, Deserialize)]
struct PluginQuery {
    name: String,
    scope: Option<String>,
    scope_name: Option<String>,
}

async fn plugin_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PluginQuery>,
) -> Result<Response, ApiError> {
    let kind = query.scope.as_deref().unwrap_or("global");
    let scope = PluginScope::from_parts(kind, query.scope_name.as_deref()).ok_or_else(|| {
        ApiError::new(StatusCode::BAD_REQUEST, format!("Invalid plugin scope: {}", kind))
    })?;
    let reference = PluginReference::new(query.name, scope);

    let guard = state.session.read().await;
    let session = guard.as_ref().ok_or_else(ApiError::no_document)?;
    let detail = plugin_detail(&session.document, &reference).map_err(ApiError::internal)?;
    Ok(detail_response(detail))
}

#[derive(Debug, Deserialize)]
struct DocumentQuery {
    name: Option<String>,
}

/// Replace the loaded document. A body that fails to parse clears the
/// session, so no stale results remain visible.
async fn document_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DocumentQuery>,
    body: String,
) -> Result<Response, ApiError> {
    let source = query.name.unwrap_or_else(|| "upload.yaml".to_string());
    let mut guard = state.session.write().await;

    match Session::load(source, &body) {
        Ok(session) => {
            let response = Json(json!({ "source": session.source, "summary": session.summary }));
            *guard = Some(session);
            Ok(response.into_response())
        }
        Err(e) => {
            *guard = None;
            Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                format!("Failed to parse YAML file: {}", e),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
struct DiffRequest {
    old_name: String,
    old: String,
    new_name: String,
    new: String,
}

async fn diff_handler(Json(request): Json<DiffRequest>) -> Result<Response, ApiError> {
    let diff = diff_documents(&request.old_name, &request.old, &request.new_name, &request.new)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?;
    let unified = format_unified(&diff);
    Ok(Json(json!({ "diff": diff, "unified": unified })).into_response())
}

fn detail_response(detail: Detail) -> Response {
    let status = if detail.is_found() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(detail)).into_response()
}
