// Route path constants - single source of truth for page and API paths

use crate::router::{Redirect, Route, RouteTable, RouteTableError, View};

pub const HOME: &str = "/";
pub const DOC: &str = "/doc";
pub const LIBRARY: &str = "/library";
pub const LIBRARY_ASSETS: &str = "/library/assets";
pub const LIBRARY_MAPS: &str = "/library/maps";
pub const LIBRARY_TILESETS: &str = "/library/tilesets";
pub const LIBRARY_DEMO: &str = "/library/demo";

pub const HEALTH: &str = "/health";
pub const API_LIBRARY_KIND: &str = "/api/library/{kind}";
pub const API_MAP_LAYERS: &str = "/api/library/maps/layers";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI: &str = "/swagger-ui";

/// The page table: a home page, the API docs, and the library layout
/// nesting one page per resource kind plus the demo globe.
pub fn app_routes() -> Result<RouteTable, RouteTableError> {
    RouteTable::new(vec![
        Route::view(HOME, "home", View::Home),
        Route::view(DOC, "doc", View::Doc),
        Route::view(LIBRARY, "library", View::LibraryLayout).children(vec![
            Route::redirect("", Redirect::Name("library-assets")),
            Route::view("assets", "library-assets", View::AssetLibrary),
            Route::view("maps", "library-maps", View::MapLibrary),
            Route::view("tilesets", "library-tilesets", View::TilesetLibrary),
            Route::view("demo", "library-demo", View::Demo),
        ]),
    ])
}
