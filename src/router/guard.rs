//! Navigation guard.
//!
//! A finite decision evaluated once per navigation attempt:
//!
//! | requires auth | signed in | target is home/signin/signup | decision |
//! |---|---|---|---|
//! | yes | no | — | redirect to sign-in, keeping the target as `redirect` |
//! | no | yes | yes | redirect to the dashboard |
//! | otherwise | | | proceed |
//!
//! The guard only decides; it never changes the session. Paths missing from
//! the route table neither require auth nor count as auth pages, so they
//! always proceed.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use url::form_urlencoded;

use super::routes::{RouteName, resolve};
use crate::net::query::Query;

/// The route a navigation is heading to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTarget {
    pub name: Option<RouteName>,
    /// Path plus query string and fragment, preserved for the post-sign-in redirect.
    pub full_path: String,
    pub requires_auth: bool,
}

impl RouteTarget {
    /// Resolve `full_path` against the route table.
    #[must_use]
    pub fn from_path(full_path: &str) -> Self {
        let matched = resolve(full_path);
        Self {
            name: matched.as_ref().map(|m| m.route.name),
            full_path: full_path.to_owned(),
            requires_auth: matched.is_some_and(|m| m.route.requires_auth),
        }
    }
}

/// Outcome of one guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectToSignIn { redirect: String },
    RedirectToDashboard,
}

impl GuardDecision {
    /// Location to navigate to, or `None` to let the navigation through.
    #[must_use]
    pub fn redirect_location(&self) -> Option<String> {
        match self {
            Self::Proceed => None,
            Self::RedirectToSignIn { redirect } => {
                Some(Query::new().with("redirect", redirect).endpoint(RouteName::SignIn.path()))
            }
            Self::RedirectToDashboard => Some(RouteName::Dashboard.path().to_owned()),
        }
    }
}

#[must_use]
pub fn decide(target: &RouteTarget, authenticated: bool) -> GuardDecision {
    if target.requires_auth && !authenticated {
        return GuardDecision::RedirectToSignIn { redirect: target.full_path.clone() };
    }
    if !target.requires_auth && authenticated && target.name.is_some_and(RouteName::is_auth_page) {
        return GuardDecision::RedirectToDashboard;
    }
    GuardDecision::Proceed
}

/// Join a router pathname, search string and fragment into a full path.
/// `search` and `hash` may or may not carry their leading `?` / `#`.
#[must_use]
pub fn full_path(pathname: &str, search: &str, hash: &str) -> String {
    let search = search.strip_prefix('?').unwrap_or(search);
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    let mut path = pathname.to_owned();
    if !search.is_empty() {
        path.push('?');
        path.push_str(search);
    }
    if !hash.is_empty() {
        path.push('#');
        path.push_str(hash);
    }
    path
}

/// Where to go after signing in, read from the `redirect` query parameter.
///
/// Only same-site absolute paths are honoured; anything else falls back to
/// the dashboard.
#[must_use]
pub fn redirect_target(search: &str) -> String {
    let search = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(search.as_bytes())
        .find(|(k, _)| k == "redirect")
        .map(|(_, v)| v.into_owned())
        .filter(|v| v.starts_with('/') && !v.starts_with("//") && !v.contains('\\'))
        .unwrap_or_else(|| RouteName::Dashboard.path().to_owned())
}
