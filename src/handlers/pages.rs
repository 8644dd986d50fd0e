use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{items_from_json, LibraryKind};
use crate::router::RouteError;
use crate::state::AppState;
use crate::views::{self, Listing};
use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};

/// Fallback handler - render the page the route table resolves `uri` to
///
/// Redirect routes answer 307 to the final path so the address bar shows
/// where the navigation landed. Unmatched paths get a 404 page, except under
/// `/api/` where the 404 is a JSON error like the rest of the API. Pages only
/// answer GET and HEAD.
pub async fn page_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();

    if path == "/api" || path.starts_with("/api/") {
        return ApiError::UnknownEndpoint(path.to_string()).into_response();
    }

    if method != Method::GET && method != Method::HEAD {
        tracing::debug!("Rejecting {} on page {}", method, path);
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET, HEAD")],
        )
            .into_response();
    }

    let resolution = match state.routes.resolve(path) {
        Ok(resolution) => resolution,
        Err(RouteError::NotFound(_)) => {
            tracing::debug!("No page route for {}", path);
            return (StatusCode::NOT_FOUND, Html(views::not_found(path))).into_response();
        }
        Err(e @ RouteError::RedirectLoop(_)) => {
            tracing::error!("Page routing failed: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    if resolution.redirected {
        return Redirect::temporary(&resolution.path).into_response();
    }

    tracing::debug!(
        "Rendering {} ({:?})",
        resolution.path,
        resolution.name.unwrap_or("unnamed")
    );
    let listing = match resolution.views.last().copied().and_then(views::library_kind) {
        Some(kind) => Some(load_listing(&state.api, kind).await),
        None => None,
    };

    Html(views::render(&resolution.views, &resolution.path, listing.as_ref())).into_response()
}

async fn load_listing(api: &ApiClient, kind: LibraryKind) -> Listing {
    let items = match api.fetch_items(kind.list_path()).await {
        Ok(response) => response
            .json::<serde_json::Value>()
            .await
            .map(items_from_json)
            .map_err(|e| format!("Unexpected response from library backend: {}", e)),
        Err(e) => Err(ApiError::from(e).message()),
    };

    if let Ok(items) = &items {
        tracing::debug!("Loaded {} {} for page", items.len(), kind.as_str());
    }
    Listing { kind, items }
}

#[cfg(test)]
mod tests {
    use crate::api::tests::spawn_backend;
    use crate::app::build_router;
    use crate::app::tests::test_state;
    use crate::error::ErrorResponse;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    async fn get(app: axum::Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_library_redirects_to_assets() {
        let (base, log) = spawn_backend(StatusCode::OK, "[]").await;
        let app = build_router(test_state(&base));

        let response = get(app, "/library").await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/library/assets"
        );
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_assets_page_lists_backend_items() {
        let (base, log) = spawn_backend(
            StatusCode::OK,
            r#"[{"url":"s3://bucket/tree.glb","name":"Tree"}]"#,
        )
        .await;
        let app = build_router(test_state(&base));

        let response = get(app, "/library/assets").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Tree"));
        assert!(html.contains("s3://bucket/tree.glb"));

        let seen = log.lock().unwrap().clone();
        assert_eq!(seen[0].uri, "/assets-manager/list");
    }

    #[tokio::test]
    async fn test_page_survives_backend_error() {
        let (base, _log) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR, "{}").await;
        let app = build_router(test_state(&base));

        let response = get(app, "/library/maps").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Could not load Maps"));
        assert!(html.contains("500"));
    }

    #[tokio::test]
    async fn test_static_pages_skip_backend() {
        let (base, log) = spawn_backend(StatusCode::OK, "[]").await;
        let app = build_router(test_state(&base));

        for uri in ["/", "/doc", "/library/demo"] {
            let response = get(app.clone(), uri).await;
            assert_eq!(response.status(), StatusCode::OK, "status for {uri}");
        }
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pages_reject_non_get_methods() {
        let (base, log) = spawn_backend(StatusCode::OK, "[]").await;
        let app = build_router(test_state(&base));

        for method in ["POST", "PUT", "DELETE"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/library/assets")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "status for {method}"
            );
            assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET, HEAD");
        }
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_head_on_page_is_allowed() {
        let (base, _log) = spawn_backend(StatusCode::OK, "[]").await;
        let app = build_router(test_state(&base));

        let response = app
            .oneshot(
                Request::builder()
                    .method("HEAD")
                    .uri("/doc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_404() {
        let (base, log) = spawn_backend(StatusCode::OK, "{}").await;
        let app = build_router(test_state(&base));

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/library/assets/x")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("/api/library/assets/x"));
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_page_is_404() {
        let (base, _log) = spawn_backend(StatusCode::OK, "[]").await;
        let app = build_router(test_state(&base));

        let response = get(app, "/pointclouds").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Page not found"));
    }
}
