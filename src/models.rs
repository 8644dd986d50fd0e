use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A library resource, identified by its backend URL
///
/// Anything else the backend returns alongside `url` is kept in `extra`
/// so the views can show it without this crate knowing its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Item {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: Map::new(),
        }
    }

    /// Human-readable label: `name`, then `title`, falling back to the URL
    pub fn label(&self) -> &str {
        ["name", "title"]
            .iter()
            .find_map(|key| self.extra.get(*key).and_then(JsonValue::as_str))
            .unwrap_or(self.url.as_str())
    }

    /// Layer names carried by a map item, if the backend lists any
    pub fn layers(&self) -> Vec<&str> {
        self.extra
            .get("layers")
            .and_then(JsonValue::as_array)
            .map(|layers| layers.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default()
    }
}

/// A named layer inside a map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MapLayer {
    /// URL of the map holding the layer
    pub url: String,
    /// Layer identifier within the map
    pub layer: String,
}

/// Query parameters for item deletion
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteItemQuery {
    /// URL of the item to delete
    pub url: String,
}

/// Response type for successful deletions
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub deleted: String,
    pub backend_status: u16,
}

/// Resource collections the library backend manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryKind {
    Assets,
    Maps,
    Tilesets,
}

impl LibraryKind {
    pub const ALL: [LibraryKind; 3] = [LibraryKind::Assets, LibraryKind::Maps, LibraryKind::Tilesets];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "assets" => Some(LibraryKind::Assets),
            "maps" => Some(LibraryKind::Maps),
            "tilesets" => Some(LibraryKind::Tilesets),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LibraryKind::Assets => "assets",
            LibraryKind::Maps => "maps",
            LibraryKind::Tilesets => "tilesets",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LibraryKind::Assets => "3D Assets",
            LibraryKind::Maps => "Maps",
            LibraryKind::Tilesets => "3D Tilesets",
        }
    }

    /// Backend path listing this collection
    pub fn list_path(self) -> &'static str {
        match self {
            LibraryKind::Assets => "/assets-manager/list",
            LibraryKind::Maps => "/maps-manager/list",
            LibraryKind::Tilesets => "/tilesets-manager/list",
        }
    }

    /// Backend path that deletes one item of this collection (`?url=` appended)
    pub fn delete_path(self) -> &'static str {
        match self {
            LibraryKind::Assets => "/assets-manager/delete",
            LibraryKind::Maps => "/maps-manager/delete",
            LibraryKind::Tilesets => "/tilesets-manager/delete",
        }
    }
}

/// Pull the item list out of a backend collection response
///
/// Accepts a bare array or an object wrapping one under `items` or `data`.
/// Entries without a string `url` are skipped.
pub fn items_from_json(body: JsonValue) -> Vec<Item> {
    let entries = match body {
        JsonValue::Array(entries) => entries,
        JsonValue::Object(mut obj) => match obj.remove("items").or_else(|| obj.remove("data")) {
            Some(JsonValue::Array(entries)) => entries,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<Item>(entry).ok())
        .collect()
}
