//! Session transitions and the route-guard effect.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sign-in/sign-out flows call the transition helpers so the session signal
//! and the persisted flag never disagree; the app root installs the guard
//! once inside its `<Router>`.
//!
//! The guard runs as an effect, after the router has committed the new
//! location. A protected view may render for one tick before the redirect
//! lands; views must not treat having rendered as proof of a session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::net::types::User;
use crate::router::guard::{RouteTarget, decide, full_path};
use crate::state::auth::AuthState;
use crate::util::storage;

/// Move the session to authenticated and persist the flag.
///
/// The guard re-runs on this transition and, while still on an auth page,
/// sends the user to the dashboard. Sign-in views that honour the
/// `redirect` parameter must call `navigate(&redirect_target(..), ..)` in
/// the same tick as this call, before the effect runs, or the preserved
/// destination is lost.
pub fn complete_sign_in(auth: RwSignal<AuthState>, user: User) {
    storage::write_auth_flag(true);
    auth.update(|state| state.sign_in(user));
}

/// Move the session to anonymous and clear the flag.
pub fn sign_out(auth: RwSignal<AuthState>) {
    storage::write_auth_flag(false);
    auth.update(AuthState::sign_out);
}

/// Where the guard sends a navigation to `pathname`/`search`/`hash` under
/// `state`, or `None` to let it through.
#[must_use]
pub fn guard_redirect(pathname: &str, search: &str, hash: &str, state: &AuthState) -> Option<String> {
    let path = full_path(pathname, search, hash);
    decide(&RouteTarget::from_path(&path), state.is_authenticated()).redirect_location()
}

/// Evaluate the navigation guard on every location change and on every
/// session transition, replacing the history entry when it redirects.
pub fn install_route_guard<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let pathname = location.pathname.get();
        let to = auth.with(|state| guard_redirect(&pathname, &location.search.get(), &location.hash.get(), state));
        if let Some(to) = to {
            leptos::logging::log!("route guard: {pathname} -> {to}");
            navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
