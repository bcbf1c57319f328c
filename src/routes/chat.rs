use actix_web::error::{self, ResponseError};
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

use crate::core::{replies, Dispatcher};
use crate::models::{ChatRequest, HealthResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// JSON error body for unreadable payloads
#[derive(Debug, Error, Serialize)]
#[error("{error}: {message}")]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
///
/// The chat endpoint extracts its body optionally, so this only surfaces in
/// logs there: an unreadable body is treated as an empty one.
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Ignoring unreadable JSON body on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query string errors
///
/// Same treatment as bodies: a query that fails to decode (e.g. a repeated
/// key) is logged and the request continues without it.
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Ignoring undecodable query string on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// Configure chat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["/sila", "/chat"])
            .route(web::post().to(chat))
            .route(web::get().to(chat)),
    );
}

/// Liveness endpoint
///
/// GET /
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(replies::LIVENESS)
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Chat endpoint
///
/// POST|GET /api/sila (alias /api/chat)
///
/// Fields may come from the JSON body, the query string or both; body
/// fields win. Always answers 200:
/// ```json
/// { "reply": "string" }
/// ```
async fn chat(
    state: web::Data<AppState>,
    query: Option<web::Query<ChatRequest>>,
    body: Option<web::Json<ChatRequest>>,
) -> impl Responder {
    let from_body = body.map(web::Json::into_inner).unwrap_or_default();
    let from_query = query.map(web::Query::into_inner).unwrap_or_default();
    let request = from_body.or(from_query);

    let span = tracing::info_span!("chat", request_id = %uuid::Uuid::new_v4());
    let reply = state.dispatcher.handle(&request).instrument(span).await;

    HttpResponse::Ok().json(reply)
}
