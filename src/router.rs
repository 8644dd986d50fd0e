//! Declarative page routing
//!
//! A [`RouteTable`] is an ordered list of [`Route`] records with optional
//! nested children. Tables are validated once when built and never change
//! afterwards. Resolution walks the table in declaration order, follows
//! redirects, and yields the chain of views to render (outer layout first).

use std::collections::HashSet;
use std::fmt;

/// Page components a route can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Doc,
    LibraryLayout,
    AssetLibrary,
    MapLibrary,
    TilesetLibrary,
    Demo,
}

/// Where a redirect route sends the navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Absolute path, e.g. `/library/assets`
    Path(&'static str),
    /// Name of another route in the same table
    Name(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub view: Option<View>,
    pub redirect: Option<Redirect>,
    pub children: Vec<Route>,
}

impl Route {
    pub fn view(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            name: Some(name),
            view: Some(view),
            redirect: None,
            children: Vec::new(),
        }
    }

    pub fn redirect(path: &'static str, target: Redirect) -> Self {
        Self {
            path,
            name: None,
            view: None,
            redirect: Some(target),
            children: Vec::new(),
        }
    }

    pub fn children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    DuplicateName(String),
    InvalidPath(String),
    /// Route has neither a view nor a redirect
    MissingTarget(String),
    /// Route has both a view and a redirect
    ConflictingTarget(String),
    UnknownRedirect(String),
}

impl fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTableError::DuplicateName(name) => write!(f, "duplicate route name: {name}"),
            RouteTableError::InvalidPath(path) => write!(f, "invalid route path: '{path}'"),
            RouteTableError::MissingTarget(path) => {
                write!(f, "route '{path}' has neither a view nor a redirect")
            }
            RouteTableError::ConflictingTarget(path) => {
                write!(f, "route '{path}' has both a view and a redirect")
            }
            RouteTableError::UnknownRedirect(name) => {
                write!(f, "redirect targets unknown route name: {name}")
            }
        }
    }
}

impl std::error::Error for RouteTableError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    NotFound(String),
    RedirectLoop(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NotFound(path) => write!(f, "no route matches '{path}'"),
            RouteError::RedirectLoop(path) => write!(f, "too many redirects resolving '{path}'"),
        }
    }
}

impl std::error::Error for RouteError {}

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Full path after following redirects
    pub path: String,
    /// Route name of the matched leaf, if it has one
    pub name: Option<&'static str>,
    /// Views to render, outer layout first
    pub views: Vec<View>,
    /// True when at least one redirect was followed
    pub redirected: bool,
}

/// One flattened table entry
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    pub full_path: String,
    pub route: &'a Route,
    /// Views of the enclosing layouts, outer first
    pub parents: Vec<View>,
    /// True when the route has children and only matches through them
    pub has_children: bool,
}

const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        let table = Self { routes };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), RouteTableError> {
        let mut names = HashSet::new();
        validate_level(&self.routes, true, &mut names)?;

        for entry in self.entries() {
            if let Some(Redirect::Name(target)) = &entry.route.redirect {
                if !names.contains(target) {
                    return Err(RouteTableError::UnknownRedirect(target.to_string()));
                }
            }
        }
        Ok(())
    }

    /// Flatten the table into `(full path, route)` entries, in declaration order
    pub fn entries(&self) -> Vec<Entry<'_>> {
        let mut out = Vec::new();
        flatten(&self.routes, "", &[], &mut out);
        out
    }

    /// Full path of the route called `name`
    pub fn path_for(&self, name: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|entry| entry.route.name == Some(name))
            .map(|entry| entry.full_path)
    }

    /// Resolve a navigation target into the views to render
    pub fn resolve(&self, path: &str) -> Result<Resolution, RouteError> {
        let entries = self.entries();
        let mut current = normalize(path);
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            // A parent with children matches only through a child, which lets
            // the empty child path stand in for the parent.
            let entry = entries
                .iter()
                .find(|entry| !entry.has_children && entry.full_path == current)
                .ok_or_else(|| RouteError::NotFound(current.clone()))?;

            match (&entry.route.redirect, entry.route.view) {
                (Some(target), _) => {
                    let next = match target {
                        Redirect::Path(p) => normalize(p),
                        Redirect::Name(name) => self
                            .path_for(name)
                            .ok_or_else(|| RouteError::NotFound(name.to_string()))?,
                    };
                    tracing::debug!("Route '{}' redirects to '{}'", current, next);
                    current = next;
                    redirected = true;
                }
                (None, Some(view)) => {
                    let mut views = entry.parents.clone();
                    views.push(view);
                    return Ok(Resolution {
                        path: current,
                        name: entry.route.name,
                        views,
                        redirected,
                    });
                }
                (None, None) => return Err(RouteError::NotFound(current)),
            }
        }

        Err(RouteError::RedirectLoop(normalize(path)))
    }
}

fn validate_level<'a>(
    routes: &'a [Route],
    top_level: bool,
    names: &mut HashSet<&'a str>,
) -> Result<(), RouteTableError> {
    for route in routes {
        if !is_well_formed(route.path, top_level) {
            return Err(RouteTableError::InvalidPath(route.path.to_string()));
        }

        match (route.view.is_some(), route.redirect.is_some()) {
            (true, true) => return Err(RouteTableError::ConflictingTarget(route.path.to_string())),
            (false, false) => return Err(RouteTableError::MissingTarget(route.path.to_string())),
            _ => {}
        }

        if let Some(name) = route.name {
            if !names.insert(name) {
                return Err(RouteTableError::DuplicateName(name.to_string()));
            }
        }

        validate_level(&route.children, false, names)?;
    }
    Ok(())
}

fn is_well_formed(path: &str, top_level: bool) -> bool {
    if path.contains("//") || path.contains(['?', '#', ' ']) {
        return false;
    }
    if top_level {
        path.starts_with('/')
    } else {
        !path.starts_with('/') && !path.ends_with('/')
    }
}

fn join(parent: &str, child: &str) -> String {
    match (parent, child) {
        (p, "") => p.to_string(),
        ("/", c) => format!("/{c}"),
        (p, c) => format!("{p}/{c}"),
    }
}

fn flatten<'a>(routes: &'a [Route], prefix: &str, parents: &[View], out: &mut Vec<Entry<'a>>) {
    for route in routes {
        let full_path = if prefix.is_empty() {
            normalize(route.path)
        } else {
            join(prefix, route.path)
        };

        out.push(Entry {
            full_path: full_path.clone(),
            route,
            parents: parents.to_vec(),
            has_children: !route.children.is_empty(),
        });

        if !route.children.is_empty() {
            let mut nested = parents.to_vec();
            nested.extend(route.view);
            flatten(&route.children, &full_path, &nested, out);
        }
    }
}

/// Strip query, fragment and any trailing slash (except on the root)
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
