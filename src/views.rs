//! Server-rendered pages
//!
//! Markup is assembled from `format!` fragments and styled with the Tailwind
//! browser build. The demo page pulls CesiumJS from its CDN.

use crate::api::encode_component;
use crate::models::{Item, LibraryKind};
use crate::router::View;
use crate::routes;

const CESIUM_VERSION: &str = "1.119";

/// Items fetched for a library page, or the reason they could not be
pub struct Listing {
    pub kind: LibraryKind,
    pub items: Result<Vec<Item>, String>,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Library collection shown by a view, if any
pub fn library_kind(view: View) -> Option<LibraryKind> {
    match view {
        View::AssetLibrary => Some(LibraryKind::Assets),
        View::MapLibrary => Some(LibraryKind::Maps),
        View::TilesetLibrary => Some(LibraryKind::Tilesets),
        _ => None,
    }
}

/// Render a resolved view chain into a full HTML document
///
/// Views are nested inner-to-outer: the leaf renders first and each
/// enclosing layout wraps it.
pub fn render(views: &[View], current_path: &str, listing: Option<&Listing>) -> String {
    let mut content = String::new();
    for view in views.iter().rev() {
        content = match view {
            View::Home => home(),
            View::Doc => doc(),
            View::Demo => demo(),
            View::LibraryLayout => library_layout(current_path, &content),
            View::AssetLibrary | View::MapLibrary | View::TilesetLibrary => match listing {
                Some(listing) => library_list(listing),
                None => String::new(),
            },
        };
    }

    let title = match views.last() {
        Some(View::Home) | None => "Library",
        Some(View::Doc) => "API documentation",
        Some(View::Demo) => "Demo",
        Some(View::LibraryLayout) => "Library",
        Some(View::AssetLibrary) => LibraryKind::Assets.title(),
        Some(View::MapLibrary) => LibraryKind::Maps.title(),
        Some(View::TilesetLibrary) => LibraryKind::Tilesets.title(),
    };
    let head_extra = if views.contains(&View::Demo) {
        cesium_head()
    } else {
        String::new()
    };

    shell(title, &head_extra, current_path, &content)
}

pub fn not_found(path: &str) -> String {
    let body = format!(
        r#"<section class="py-24 text-center">
  <h1 class="text-3xl font-semibold">Page not found</h1>
  <p class="mt-2 text-slate-400">Nothing lives at <code>{}</code>.</p>
  <a class="mt-6 inline-block text-sky-400 hover:underline" href="{}">Back home</a>
</section>"#,
        escape_html(path),
        routes::HOME
    );
    shell("Not found", "", path, &body)
}

fn shell(title: &str, head_extra: &str, current_path: &str, body: &str) -> String {
    let nav = [
        (routes::HOME, "Home"),
        (routes::LIBRARY, "Library"),
        (routes::DOC, "API"),
    ]
    .iter()
    .map(|(href, label)| nav_link(href, label, is_active(current_path, href)))
    .collect::<Vec<_>>()
    .join("\n      ");

    format!(
        r#"<!doctype html>
<html lang="en" class="h-full dark">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  <script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4"></script>
  <style type="text/tailwindcss">
    @custom-variant dark (&:where(.dark, .dark *));
  </style>
  {head_extra}
</head>
<body class="h-full bg-slate-950 text-slate-100">
  <header class="border-b border-slate-800">
    <nav class="mx-auto flex max-w-6xl items-center gap-6 px-6 py-4">
      <span class="font-semibold tracking-wide">Library Console</span>
      {nav}
    </nav>
  </header>
  <main class="mx-auto max-w-6xl px-6 py-8">
{body}
  </main>
  <script>
    document.addEventListener("click", async (event) => {{
      const button = event.target.closest("[data-delete]");
      if (!button) return;
      if (!confirm(button.dataset.confirm || "Delete this item?")) return;
      const response = await fetch(button.dataset.delete, {{ method: "DELETE" }});
      if (response.ok) {{
        window.location.reload();
      }} else {{
        const body = await response.json().catch(() => ({{}}));
        alert(body.error || `Delete failed (${{response.status}})`);
      }}
    }});
  </script>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn is_active(current_path: &str, href: &str) -> bool {
    if href == routes::HOME {
        current_path == routes::HOME
    } else {
        current_path == href || current_path.starts_with(&format!("{href}/"))
    }
}

fn nav_link(href: &str, label: &str, active: bool) -> String {
    let class = if active {
        "text-sky-400"
    } else {
        "text-slate-400 hover:text-slate-100"
    };
    format!(r#"<a class="{class}" href="{href}">{label}</a>"#)
}

fn home() -> String {
    let cards = LibraryKind::ALL
        .iter()
        .map(|kind| {
            format!(
                r#"<a href="{}/{}" class="rounded-lg border border-slate-800 p-6 hover:border-sky-500">
      <h2 class="text-lg font-semibold">{}</h2>
      <p class="mt-1 text-sm text-slate-400">Browse and remove {}.</p>
    </a>"#,
                routes::LIBRARY,
                kind.as_str(),
                kind.title(),
                kind.as_str()
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ");

    format!(
        r#"<section>
  <h1 class="text-3xl font-semibold">Library</h1>
  <p class="mt-2 text-slate-400">3D assets, maps and tilesets served by the library backend.</p>
  <div class="mt-8 grid gap-4 sm:grid-cols-3">
    {cards}
  </div>
</section>"#
    )
}

fn doc() -> String {
    format!(
        r#"<section class="h-[80vh]">
  <h1 class="mb-4 text-2xl font-semibold">API documentation</h1>
  <iframe class="h-full w-full rounded-lg bg-white" src="{}/"></iframe>
</section>"#,
        routes::SWAGGER_UI
    )
}

fn library_layout(current_path: &str, inner: &str) -> String {
    let tabs = [
        (routes::LIBRARY_ASSETS, LibraryKind::Assets.title()),
        (routes::LIBRARY_MAPS, LibraryKind::Maps.title()),
        (routes::LIBRARY_TILESETS, LibraryKind::Tilesets.title()),
        (routes::LIBRARY_DEMO, "Demo"),
    ]
    .iter()
    .map(|(href, label)| {
        let class = if current_path == *href {
            "border-sky-400 text-sky-400"
        } else {
            "border-transparent text-slate-400 hover:text-slate-100"
        };
        format!(r#"<a class="border-b-2 px-1 pb-2 {class}" href="{href}">{label}</a>"#)
    })
    .collect::<Vec<_>>()
    .join("\n    ");

    format!(
        r#"<div class="mb-6 flex gap-6 border-b border-slate-800">
    {tabs}
</div>
{inner}"#
    )
}

fn library_list(listing: &Listing) -> String {
    let kind = listing.kind;
    let items = match &listing.items {
        Ok(items) => items,
        Err(message) => {
            return format!(
                r#"<div class="rounded-lg border border-rose-700 bg-rose-950 p-4 text-rose-200">
  Could not load {}: {}
</div>"#,
                kind.title(),
                escape_html(message)
            );
        }
    };

    if items.is_empty() {
        return format!(
            r#"<p class="text-slate-400">No {} in the library yet.</p>"#,
            kind.as_str()
        );
    }

    let rows = items
        .iter()
        .map(|item| item_row(kind, item))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<table class="w-full text-left text-sm">
  <thead class="text-slate-400">
    <tr><th class="py-2">Name</th><th class="py-2">URL</th><th></th></tr>
  </thead>
  <tbody class="divide-y divide-slate-800">
{rows}
  </tbody>
</table>"#
    )
}

fn item_row(kind: LibraryKind, item: &Item) -> String {
    let delete_endpoint = format!("/api/library/{}?url={}", kind.as_str(), encode_component(&item.url));

    let layers = if kind == LibraryKind::Maps {
        item.layers()
            .into_iter()
            .map(|layer| {
                let endpoint = format!(
                    "{}?url={}&layer={}",
                    routes::API_MAP_LAYERS,
                    encode_component(&item.url),
                    encode_component(layer)
                );
                format!(
                    r#"<button class="mr-2 rounded bg-slate-800 px-2 py-0.5 text-xs hover:bg-rose-800" data-delete="{}" data-confirm="Delete layer {}?">{} &times;</button>"#,
                    escape_html(&endpoint),
                    escape_html(layer),
                    escape_html(layer)
                )
            })
            .collect::<Vec<_>>()
            .join("")
    } else {
        String::new()
    };

    format!(
        r#"    <tr>
      <td class="py-2 pr-4">{label}<div class="mt-1">{layers}</div></td>
      <td class="py-2 pr-4 font-mono text-xs text-slate-400">{url}</td>
      <td class="py-2 text-right"><button class="rounded bg-rose-700 px-3 py-1 hover:bg-rose-600" data-delete="{endpoint}">Delete</button></td>
    </tr>"#,
        label = escape_html(item.label()),
        url = escape_html(&item.url),
        endpoint = escape_html(&delete_endpoint),
    )
}

fn cesium_head() -> String {
    format!(
        r#"<script src="https://cesium.com/downloads/cesiumjs/releases/{v}/Build/Cesium/Cesium.js"></script>
  <link href="https://cesium.com/downloads/cesiumjs/releases/{v}/Build/Cesium/Widgets/widgets.css" rel="stylesheet" />"#,
        v = CESIUM_VERSION
    )
}

fn demo() -> String {
    r#"<section>
  <div id="cesiumContainer" class="h-[70vh] w-full overflow-hidden rounded-lg"></div>
  <script>
    window.addEventListener("DOMContentLoaded", () => {
      new Cesium.Viewer("cesiumContainer", {
        baseLayerPicker: false,
        geocoder: false,
        timeline: false,
        animation: false,
      });
    });
  </script>
</section>"#
        .to_string()
}
