use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use models::db::{connect_with_config, initialize, DatabaseConfig};
use server::routes::{self, ServerState};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

async fn build_app() -> anyhow::Result<Router> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let db = connect_with_config(&cfg).await?;
    initialize(&db).await?;
    Ok(routes::build_router(ServerState::new(db), cors()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body)?).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

fn sample(name: &str) -> Value {
    json!({
        "name": name,
        "preview_image": "data:image/png;base64,iVBORw0KGgo=",
        "canvas_state": {
            "shapes": [
                {"type": "circle", "r": 5},
                {"type": "line", "points": [[0, 0], [1, 1]]}
            ]
        }
    })
}

async fn create(app: &Router, name: &str) -> anyhow::Result<Value> {
    let (status, body) = send(app, Method::POST, "/drawings", Some(sample(name))).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body)
}

#[tokio::test]
async fn root_reports_running() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, Method::GET, "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Drawing App API is running"}));

    let (status, body) = send(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn create_then_get_returns_same_record() -> anyhow::Result<()> {
    let app = build_app().await?;
    let created = create(&app, "house").await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["canvas_state"], sample("house")["canvas_state"]);
    assert_eq!(created["created_at"], created["updated_at"]);

    let (status, fetched) = send(&app, Method::GET, &format!("/drawings/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn large_preview_image_round_trips() -> anyhow::Result<()> {
    let app = build_app().await?;
    let mut body = sample("poster");
    body["preview_image"] = json!(format!("data:image/png;base64,{}", "A".repeat(3 * 1024 * 1024)));

    let (status, created) = send(&app, Method::POST, "/drawings", Some(body.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["preview_image"], body["preview_image"]);

    let uri = format!("/drawings/{}", created["id"].as_str().unwrap_or_default());
    let (status, fetched) = send(&app, Method::GET, &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let bigger = json!(format!("data:image/png;base64,{}", "B".repeat(4 * 1024 * 1024)));
    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"preview_image": bigger}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["preview_image"], bigger);
    Ok(())
}

#[tokio::test]
async fn create_with_missing_field_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, Method::POST, "/drawings", Some(json!({"name": "x", "preview_image": "y"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Request");

    let (status, _) = send(&app, Method::GET, "/drawings", None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn create_without_json_content_type_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/drawings")
        .body(Body::from(serde_json::to_vec(&sample("x"))?))?;
    let resp = app.oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn list_orders_by_recent_update() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, Method::GET, "/drawings", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let mut ids = Vec::new();
    for name in ["a", "b", "c"] {
        ids.push(create(&app, name).await?["id"].clone());
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (_, body) = send(&app, Method::GET, "/drawings", None).await?;
    let listed: Vec<Value> = body.as_array().cloned().unwrap_or_default().into_iter().map(|d| d["id"].clone()).collect();
    assert_eq!(listed, vec![ids[2].clone(), ids[1].clone(), ids[0].clone()]);

    let uri = format!("/drawings/{}", ids[0].as_str().unwrap_or_default());
    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"name": "a2"}))).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/drawings", None).await?;
    let listed: Vec<Value> = body.as_array().cloned().unwrap_or_default().into_iter().map(|d| d["id"].clone()).collect();
    assert_eq!(listed, vec![ids[0].clone(), ids[2].clone(), ids[1].clone()]);
    Ok(())
}

#[tokio::test]
async fn partial_update_only_touches_given_fields() -> anyhow::Result<()> {
    let app = build_app().await?;
    let created = create(&app, "house").await?;
    let uri = format!("/drawings/{}", created["id"].as_str().unwrap_or_default());
    tokio::time::sleep(Duration::from_millis(5)).await;

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"name": "X"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "X");
    assert_eq!(updated["preview_image"], created["preview_image"]);
    assert_eq!(updated["canvas_state"], created["canvas_state"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);

    let (status, updated) = send(&app, Method::PUT, &uri, Some(json!({"preview_image": "", "canvas_state": {}}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["preview_image"], "");
    assert_eq!(updated["canvas_state"], json!({}));
    assert_eq!(updated["name"], "X");
    Ok(())
}

#[tokio::test]
async fn empty_update_is_rejected() -> anyhow::Result<()> {
    let app = build_app().await?;
    let created = create(&app, "house").await?;
    let uri = format!("/drawings/{}", created["id"].as_str().unwrap_or_default());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "No fields to update");

    let (_, fetched) = send(&app, Method::GET, &uri, None).await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_not_found() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, Method::GET, "/drawings/does-not-exist", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Drawing not found");

    let (status, _) = send(&app, Method::PUT, "/drawings/does-not-exist", Some(json!({"name": "x"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // existence is checked before emptiness
    let (status, _) = send(&app, Method::PUT, "/drawings/does-not-exist", Some(json!({}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/drawings/does-not-exist", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_then_delete_again() -> anyhow::Result<()> {
    let app = build_app().await?;
    let created = create(&app, "house").await?;
    let uri = format!("/drawings/{}", created["id"].as_str().unwrap_or_default());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Drawing deleted successfully"}));

    let (status, _) = send(&app, Method::GET, &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/drawings", None).await?;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn cors_allows_any_origin() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/drawings")
        .header(header::ORIGIN, "http://localhost:19006")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).and_then(|v| v.to_str().ok()),
        Some("http://localhost:19006")
    );
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/drawings/{id}"].is_object());
    Ok(())
}
