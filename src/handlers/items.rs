use crate::error::{ApiError, ErrorResponse};
use crate::models::{DeleteItemQuery, DeleteResponse, Item, LibraryKind, MapLayer};
use crate::routes;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

fn parse_kind(kind: &str) -> Result<LibraryKind, ApiError> {
    LibraryKind::parse(kind).ok_or_else(|| ApiError::UnknownKind(kind.to_string()))
}

/// Relay a backend response: status, content type and body unchanged
async fn passthrough(resp: reqwest::Response) -> Result<Response, ApiError> {
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    let bytes = resp.bytes().await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/json")),
    );
    Ok((status, headers, Body::from(bytes)).into_response())
}

/// GET /api/library/{kind} handler - List a library collection
///
/// Forwards to the backend's list endpoint for the collection and relays
/// whatever it answers.
#[utoipa::path(
    get,
    path = routes::API_LIBRARY_KIND,
    params(
        ("kind" = String, Path, description = "Library collection: assets, maps or tilesets")
    ),
    responses(
        (status = 200, description = "Collection as returned by the library backend", body = serde_json::Value),
        (status = 400, description = "Unknown collection", body = ErrorResponse),
        (status = 502, description = "Library backend unreachable", body = ErrorResponse)
    ),
    tag = "library"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Response, ApiError> {
    let kind = parse_kind(&kind)?;

    let response = state.api.fetch_items(kind.list_path()).await?;
    tracing::info!("Listed {} from {}", kind.as_str(), kind.list_path());

    passthrough(response).await
}

/// DELETE /api/library/{kind}?url= handler - Remove one item
#[utoipa::path(
    delete,
    path = routes::API_LIBRARY_KIND,
    params(
        ("kind" = String, Path, description = "Library collection: assets, maps or tilesets"),
        DeleteItemQuery
    ),
    responses(
        (status = 200, description = "Item deleted", body = DeleteResponse),
        (status = 400, description = "Unknown collection or missing url", body = ErrorResponse),
        (status = 502, description = "Library backend unreachable", body = ErrorResponse)
    ),
    tag = "library"
)]
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<DeleteItemQuery>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let kind = parse_kind(&kind)?;
    let item = Item::new(query.url);

    let response = state.api.delete_item(kind.delete_path(), &item).await?;

    tracing::info!("Deleted {} item {}", kind.as_str(), item.url);
    Ok((
        StatusCode::OK,
        Json(DeleteResponse {
            deleted: item.url,
            backend_status: response.status().as_u16(),
        }),
    ))
}

/// DELETE /api/library/maps/layers?url=&layer= handler - Remove one map layer
#[utoipa::path(
    delete,
    path = routes::API_MAP_LAYERS,
    params(MapLayer),
    responses(
        (status = 200, description = "Layer deleted", body = DeleteResponse),
        (status = 400, description = "Missing url or layer", body = ErrorResponse),
        (status = 502, description = "Library backend unreachable", body = ErrorResponse)
    ),
    tag = "library"
)]
pub async fn delete_layer_handler(
    State(state): State<AppState>,
    Query(layer): Query<MapLayer>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let response = state.api.delete_map_layer(&layer).await?;

    tracing::info!("Deleted layer {} from map {}", layer.layer, layer.url);
    Ok((
        StatusCode::OK,
        Json(DeleteResponse {
            deleted: layer.layer,
            backend_status: response.status().as_u16(),
        }),
    ))
}
