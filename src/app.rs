use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{
    delete_item_handler, delete_layer_handler, health_handler, list_handler, page_handler,
};
use crate::routes;
use crate::state::AppState;

/// Assemble the HTTP surface: JSON API, OpenAPI docs, and the page fallback
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(health_handler))
        .route(routes::API_MAP_LAYERS, delete(delete_layer_handler))
        .route(
            routes::API_LIBRARY_KIND,
            get(list_handler).delete(delete_item_handler),
        )
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
