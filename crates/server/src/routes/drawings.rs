use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use common::types::Message;
use service::drawing::{Drawing, DrawingPatch, NewDrawing};

use crate::{errors::ApiError, routes::ServerState};

#[utoipa::path(
    get, path = "/drawings", tag = "drawings",
    responses(
        (status = 200, description = "All drawings, most recently updated first", body = [crate::openapi::DrawingDoc]),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Drawing>>, ApiError> {
    let all = state
        .drawings
        .list()
        .await
        .map_err(|e| ApiError::from_service(e, "get drawings"))?;
    Ok(Json(all))
}

#[utoipa::path(
    post, path = "/drawings", tag = "drawings",
    request_body = crate::openapi::CreateDrawingDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::DrawingDoc),
        (status = 400, description = "Malformed Body", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<NewDrawing>, JsonRejection>,
) -> Result<Json<Drawing>, ApiError> {
    let Json(input) = body?;
    let created = state
        .drawings
        .create(input)
        .await
        .map_err(|e| ApiError::from_service(e, "create drawing"))?;
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/drawings/{id}", tag = "drawings",
    params(("id" = String, Path, description = "Drawing ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::DrawingDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Get Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Drawing>, ApiError> {
    let found = state
        .drawings
        .get(&id)
        .await
        .map_err(|e| ApiError::from_service(e, "get drawing"))?;
    Ok(Json(found))
}

#[utoipa::path(
    put, path = "/drawings/{id}", tag = "drawings",
    params(("id" = String, Path, description = "Drawing ID")),
    request_body = crate::openapi::UpdateDrawingDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::DrawingDoc),
        (status = 400, description = "No fields to update or malformed body", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Update Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<DrawingPatch>, JsonRejection>,
) -> Result<Json<Drawing>, ApiError> {
    let Json(patch) = body?;
    let updated = state
        .drawings
        .update(&id, patch)
        .await
        .map_err(|e| ApiError::from_service(e, "update drawing"))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/drawings/{id}", tag = "drawings",
    params(("id" = String, Path, description = "Drawing ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Delete Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    state
        .drawings
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_service(e, "delete drawing"))?;
    Ok(Json(Message::new("Drawing deleted successfully")))
}
