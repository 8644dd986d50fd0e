use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::DeleteResponse;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "library-console API",
        version = "0.1.0",
        description = "Browse and prune 3D assets, maps and tilesets held by the library backend"
    ),
    paths(
        handlers::health::health_handler,
        handlers::items::list_handler,
        handlers::items::delete_item_handler,
        handlers::items::delete_layer_handler
    ),
    components(
        schemas(
            DeleteResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "library", description = "Library collection operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_library_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/library/{kind}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/library/maps/layers"));
    }
}
