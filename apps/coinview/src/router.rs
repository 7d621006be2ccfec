//! Path → view resolution.
//!
//! Mirrors the browser routes: `/` (also reachable as `/home`), `/favorites`,
//! and a catch-all that redirects anything else to `/`. Matching ignores case,
//! the query string, the fragment and trailing slashes.

const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Favorites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    View(View),
    Redirect(&'static str),
}

#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub path: &'static str,
    pub alias: Option<&'static str>,
    pub name: &'static str,
    target: Target,
}

impl RouteRecord {
    pub fn view(path: &'static str, name: &'static str, view: View) -> Self {
        Self {
            path,
            alias: None,
            name,
            target: Target::View(view),
        }
    }

    pub fn redirect(path: &'static str, name: &'static str, to: &'static str) -> Self {
        Self {
            path,
            alias: None,
            name,
            target: Target::Redirect(to),
        }
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    // `/:param(.*)` matches every path
    fn is_catch_all(&self) -> bool {
        self.path.starts_with("/:") && self.path.ends_with("(.*)")
    }

    fn matches(&self, path: &str) -> bool {
        self.is_catch_all()
            || self.path.eq_ignore_ascii_case(path)
            || self.alias.is_some_and(|alias| alias.eq_ignore_ascii_case(path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub view: View,
    pub name: &'static str,
    /// Path of the record that finally matched.
    pub path: &'static str,
    /// Set when at least one redirect was followed.
    pub redirected_from: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<RouteRecord>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(vec![
            RouteRecord::view("/", "Home", View::Home).alias("/home"),
            RouteRecord::view("/favorites", "Favorites", View::Favorites),
            RouteRecord::redirect("/:noPage(.*)", "noPage", "/"),
        ])
    }
}

impl Router {
    /// Records are tried in order, so a catch-all goes last.
    pub fn new(routes: Vec<RouteRecord>) -> Self {
        Self { routes }
    }

    /// Table of the single-page variant: everything lands on home.
    pub fn home_only() -> Self {
        Self::new(vec![
            RouteRecord::view("/", "Home", View::Home).alias("/home"),
            RouteRecord::redirect("/:noPage(.*)", "noPage", "/"),
        ])
    }

    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// `None` when no record matches or redirects loop.
    pub fn resolve(&self, raw: &str) -> Option<Resolved> {
        let requested = normalize(raw);
        let mut current = requested.clone();

        for _ in 0..=MAX_REDIRECTS {
            let record = self.routes.iter().find(|r| r.matches(&current))?;
            match record.target {
                Target::View(view) => {
                    let redirected_from = (current != requested).then_some(requested);
                    return Some(Resolved {
                        view,
                        name: record.name,
                        path: record.path,
                        redirected_from,
                    });
                }
                Target::Redirect(to) => {
                    tracing::debug!(from = %current, to, route = record.name, "redirect");
                    current = normalize(to);
                }
            }
        }

        tracing::warn!(path = %requested, "too many redirects");
        None
    }
}

fn normalize(raw: &str) -> String {
    let path = raw.split(['?', '#']).next().unwrap_or_default().trim();
    let path = path.trim_end_matches('/');

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
