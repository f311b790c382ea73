//! Client-side routing: path to view resolution and the title hook.
//!
//! Routes are matched in declaration order; the catch-all entry at the end
//! of [`console_routes`] turns every unmatched path into the not-found view.
//! The router does no access control.

mod pattern;
mod table;
mod views;

pub use pattern::{RoutePattern, normalize};
pub use table::{Layout, RouteRecord, ViewId, console_routes};
pub use views::LazyViews;

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::Serialize;

use crate::navigation::Navigator;

pub const APP_NAME: &str = "医院管理系统";

const MAX_REDIRECTS: usize = 8;

/// `"<title> - 医院管理系统"`, or the bare application name for untitled routes.
pub fn document_title(title: Option<&str>) -> String {
    match title {
        Some(t) if !t.is_empty() => format!("{t} - {APP_NAME}"),
        _ => APP_NAME.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    /// Normalized path that was matched, after following redirects.
    pub path: String,
    /// `path` plus the query string and fragment of the request.
    pub full_path: String,
    pub name: Option<&'static str>,
    pub view: ViewId,
    pub layout: Option<Layout>,
    pub params: BTreeMap<String, String>,
    pub title: Option<&'static str>,
    pub redirected_from: Option<String>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn document_title(&self) -> String {
        document_title(self.title)
    }

    pub fn is_not_found(&self) -> bool {
        self.view == ViewId::NotFound
    }
}

type Hook = Box<dyn Fn(&ResolvedRoute) + Send + Sync>;

struct CompiledRoute {
    record: RouteRecord,
    pattern: RoutePattern,
}

pub struct Router {
    routes: Vec<CompiledRoute>,
    current: RwLock<Option<ResolvedRoute>>,
    title: RwLock<String>,
    history: RwLock<Vec<String>>,
    hooks: RwLock<Vec<Hook>>,
}

impl Router {
    pub fn new(records: Vec<RouteRecord>) -> Self {
        let routes = records
            .into_iter()
            .map(|record| CompiledRoute {
                pattern: RoutePattern::parse(record.path),
                record,
            })
            .collect();
        Self {
            routes,
            current: RwLock::new(None),
            title: RwLock::new(APP_NAME.to_string()),
            history: RwLock::new(Vec::new()),
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Router over the hospital console's route table.
    pub fn console() -> Self {
        Self::new(console_routes())
    }

    pub fn records(&self) -> impl Iterator<Item = &RouteRecord> {
        self.routes.iter().map(|r| &r.record)
    }

    /// Resolve without navigating. `None` only when the table has no
    /// catch-all and nothing matched, or redirects loop.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let requested = normalize(path);
        let mut target = requested.clone();

        for _ in 0..MAX_REDIRECTS {
            let (route, params) = self
                .routes
                .iter()
                .find_map(|r| r.pattern.matches(&target).map(|p| (r, p)))?;

            if let Some(to) = route.record.redirect {
                target = normalize(to);
                continue;
            }

            let view = route.record.view?;
            let redirected_from = (target != requested).then(|| requested.clone());
            let full_path = match path.find(['?', '#']) {
                Some(idx) if target == requested => format!("{target}{}", &path[idx..]),
                _ => target.clone(),
            };
            return Some(ResolvedRoute {
                path: target,
                full_path,
                name: route.record.name,
                view,
                layout: route.record.layout,
                params,
                title: route.record.title,
                redirected_from,
            });
        }

        tracing::warn!(path = %requested, "redirect limit reached");
        None
    }

    /// Navigate to `path`: resolve it, update the current location and the
    /// document title, then run registered hooks.
    pub fn push(&self, path: &str) -> Option<ResolvedRoute> {
        let resolved = self.resolve(path)?;
        let title = resolved.document_title();
        tracing::debug!(path = %resolved.path, view = %resolved.view, title = %title, "navigated");

        if let Ok(mut guard) = self.title.write() {
            *guard = title;
        }
        if let Ok(mut guard) = self.history.write() {
            guard.push(resolved.path.clone());
        }
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(resolved.clone());
        }
        if let Ok(hooks) = self.hooks.read() {
            for hook in hooks.iter() {
                hook(&resolved);
            }
        }
        Some(resolved)
    }

    /// Register a hook run after every successful navigation.
    pub fn after_each(&self, hook: impl Fn(&ResolvedRoute) + Send + Sync + 'static) {
        if let Ok(mut hooks) = self.hooks.write() {
            hooks.push(Box::new(hook));
        }
    }

    pub fn current(&self) -> Option<ResolvedRoute> {
        self.current.read().ok().and_then(|g| g.clone())
    }

    pub fn document_title(&self) -> String {
        self.title
            .read()
            .map(|t| t.clone())
            .unwrap_or_else(|_| APP_NAME.to_string())
    }

    pub fn history(&self) -> Vec<String> {
        self.history.read().map(|h| h.clone()).unwrap_or_default()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::console()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("current", &self.current().map(|r| r.path))
            .finish()
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        if self.push(path).is_none() {
            tracing::warn!(path, "no route matched");
        }
    }
}
