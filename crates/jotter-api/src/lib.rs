//! # jotter-api
//!
//! HTTP API for the jotter notes service.
//!
//! Requests flow handler → [`services::NoteService`] → [`jotter_core::NoteRepository`].
//! The binary wires the Postgres repository; tests wire
//! [`jotter_db::MemoryNoteRepository`] or a fake through
//! [`AppState::from_repository`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod telemetry;

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::handlers::{fallback, health::health_check, notes};
use crate::services::{DefaultNoteService, NoteService};
use jotter_core::{defaults, HealthCheck, NoteRepository};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteService>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteService>, health: Arc<dyn HealthCheck>) -> Self {
        Self { notes, health }
    }

    /// State serving notes from `repo` through the default service.
    pub fn from_repository<R>(repo: Arc<R>) -> Self
    where
        R: NoteRepository + HealthCheck + 'static,
    {
        let notes = Arc::new(DefaultNoteService::new(repo.clone()));
        Self::new(notes, repo)
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Convert configured origins to header values, skipping any that are not
/// valid header text.
fn cors_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(
                    subsystem = "api",
                    component = "cors",
                    origin = %origin,
                    "Ignoring invalid CORS origin"
                );
                None
            }
        })
        .collect()
}

/// Render a handler panic as the 500 envelope.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(
        subsystem = "api",
        component = "router",
        panic = detail,
        "Handler panicked"
    );
    ApiError::Internal.into_response()
}

/// Replace the body-limit layer's plain-text 413 with the envelope.
async fn envelope_oversized_body(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
        warn!(
            subsystem = "api",
            component = "router",
            "Rejected oversized request body"
        );
        return ApiError::PayloadTooLarge.into_response();
    }
    response
}

/// Build the full application router with middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest(defaults::API_PREFIX, api)
        .fallback(fallback)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins(&config.allowed_origins)))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(std::time::Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(middleware::map_response(envelope_oversized_body))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_origins_skips_invalid() {
        let origins = vec![
            "http://localhost:8080".to_string(),
            "bad\norigin".to_string(),
            "https://notes.example.com".to_string(),
        ];
        let values = cors_origins(&origins);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], "http://localhost:8080");
        assert_eq!(values[1], "https://notes.example.com");
    }

    #[test]
    fn test_request_ids_are_uuid_v7() {
        let mut make = MakeRequestUuidV7;
        let request = axum::http::Request::new(());
        let id = make.make_request_id(&request).unwrap();
        let parsed = Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }
}
