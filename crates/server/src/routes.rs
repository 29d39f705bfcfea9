use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Message};
use service::drawing::{DrawingService, SeaOrmDrawingRepository};

use crate::openapi;

pub mod drawings;

pub type Drawings = DrawingService<SeaOrmDrawingRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub drawings: Arc<Drawings>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = SeaOrmDrawingRepository::new(db);
        Self { drawings: Arc::new(DrawingService::new(Arc::new(repo))) }
    }
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Service is running", body = crate::openapi::MessageDoc)))]
pub async fn root() -> Json<Message> {
    Json(Message::new("Drawing App API is running"))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .route("/drawings", get(drawings::list).post(drawings::create))
        .route(
            "/drawings/:id",
            get(drawings::get).put(drawings::update).delete(drawings::delete),
        )
        // preview images are arbitrary base64 payloads with no size cap
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
