use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: String }

#[derive(ToSchema)]
pub struct DrawingDoc {
    pub id: String,
    pub name: String,
    /// Encoded image payload, stored as given.
    pub preview_image: String,
    /// Arbitrary nested JSON object.
    #[schema(value_type = Object)]
    pub canvas_state: serde_json::Value,
    /// RFC 3339 timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp.
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct CreateDrawingDoc {
    pub name: String,
    pub preview_image: String,
    #[schema(value_type = Object)]
    pub canvas_state: serde_json::Value,
}

/// At least one field must be present.
#[derive(ToSchema)]
pub struct UpdateDrawingDoc {
    pub name: Option<String>,
    pub preview_image: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub canvas_state: Option<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::drawings::list,
        crate::routes::drawings::create,
        crate::routes::drawings::get,
        crate::routes::drawings::update,
        crate::routes::drawings::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ErrorDoc,
            DrawingDoc,
            CreateDrawingDoc,
            UpdateDrawingDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "drawings", description = "Saved canvases"),
    ),
    info(title = "Drawing App API", version = "1.0.0")
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
