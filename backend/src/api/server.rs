//! HTTP server for the numgroup API.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | POST   | `/api/generate`   | JSON `{ text, m }` → grouped text    |
//! | POST   | `/api/upload`     | Multipart `file` + `m` → grouped text|
//! | GET    | `/api/logs`       | SSE stream for real-time logs        |

use axum::{
    extract::{multipart::Multipart, rejection::JsonRejection, DefaultBodyLimit},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use super::logs::{log_info, LOG_BROADCASTER};
use super::types::{error_response, GenerateRequest, GenerateResponse, RawGroupSize};
use crate::config::Settings;
use crate::error::{InputError, PipelineError, ServerError, ServerResult};
use crate::transform::pipeline::{generate_bytes, generate_text};

/// Error half of every handler result
type ApiError = (StatusCode, Json<Value>);

/// Build the application router.
pub fn router(settings: &Settings) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/generate", post(generate))
        .route("/api/upload", post(upload))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(settings.max_input_bytes))
        .layer(cors)
}

/// Start the HTTP server
pub async fn start_server(settings: Settings) -> ServerResult<()> {
    let app = router(&settings);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    eprintln!("🚀 numgroup server running on http://localhost:{}", settings.port);
    eprintln!("   POST /api/generate - JSON {{ text, m }}");
    eprintln!("   POST /api/upload   - Upload text file");
    eprintln!("   GET  /api/logs     - SSE log stream");
    eprintln!("   GET  /health       - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// HTTP status for an error.
///
/// Bad input from the caller is 422 (413 when oversized); anything else is
/// the server's fault.
pub fn status_for(err: &ServerError) -> StatusCode {
    match err {
        ServerError::Pipeline(PipelineError::Input(InputError::TooLarge { .. })) => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        ServerError::Pipeline(e) if e.is_rejection() => StatusCode::UNPROCESSABLE_ENTITY,
        ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServerError::Pipeline(_) | ServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: impl Into<ServerError>) -> ApiError {
    let err = err.into();
    (status_for(&err), Json(error_response(&err.to_string())))
}

/// Reject a body that could not be read or parsed.
///
/// A body cut off by the size limit without a `Content-Length` header only
/// fails here, while the extractor buffers it.
fn reject_body(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        reject(ServerError::PayloadTooLarge(message))
    } else {
        reject(ServerError::BadRequest(message))
    }
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "numgroup",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate": "POST /api/generate",
            "upload": "POST /api/upload",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // lagged receivers skip the missed entries
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Generate from a JSON body
async fn generate(
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| reject_body(e.status(), e.body_text()))?;
    let m = request.m.resolve().map_err(|e| reject(PipelineError::from(e)))?;

    log_info(format!("📄 Generate request ({} bytes, M = {})", request.text.len(), m));
    let result = generate_text(&request.text, m).map_err(reject)?;

    Ok(Json(GenerateResponse::from(result)))
}

/// Generate from an uploaded file
async fn upload(mut multipart: Multipart) -> Result<Json<GenerateResponse>, ApiError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut group_size: Option<String> = None;
    let mut encoding: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject_body(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| reject_body(e.status(), e.body_text()))?;
                file_data = Some(bytes.to_vec());
            }
            "m" | "encoding" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| reject_body(e.status(), e.body_text()))?;
                if name == "m" {
                    group_size = Some(text);
                } else if !text.trim().is_empty() {
                    encoding = Some(text.trim().to_string());
                }
            }
            _ => {}
        }
    }

    let bytes = file_data.ok_or_else(|| reject(ServerError::BadRequest("No file provided".into())))?;
    let m = RawGroupSize::Text(group_size.unwrap_or_default())
        .resolve()
        .map_err(|e| reject(PipelineError::from(e)))?;

    log_info(format!(
        "📄 Upload: {} ({} bytes, M = {})",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len(),
        m
    ));

    let result = generate_bytes(&bytes, m, encoding.as_deref()).map_err(reject)?;

    Ok(Json(GenerateResponse::from(result)))
}
