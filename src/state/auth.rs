//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read by the route guard on every navigation and written by the sign-in
//! and sign-out flows through `util::auth`, which also persist the flag
//! that lets a reload start in the right state.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::types::User;
use crate::util::storage;

/// Where the session is in its lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    /// Signed in. `user` is `None` when the session was restored from the
    /// persisted flag and the profile has not been fetched yet.
    Authenticated { user: Option<User> },
}

/// Authentication state shared through Leptos context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Session,
}

impl AuthState {
    /// Seed the session from the persisted flag.
    #[must_use]
    pub fn from_flag(authenticated: bool) -> Self {
        let session = if authenticated {
            Session::Authenticated { user: None }
        } else {
            Session::Anonymous
        };
        Self { session }
    }

    /// Seed the session from browser storage (anonymous outside the browser).
    #[must_use]
    pub fn restore() -> Self {
        Self::from_flag(storage::read_auth_flag())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, Session::Authenticated { .. })
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match &self.session {
            Session::Authenticated { user } => user.as_ref(),
            Session::Anonymous => None,
        }
    }

    /// Anonymous or authenticated → authenticated as `user`.
    pub fn sign_in(&mut self, user: User) {
        self.session = Session::Authenticated { user: Some(user) };
    }

    /// Any state → anonymous.
    pub fn sign_out(&mut self) {
        self.session = Session::Anonymous;
    }
}

/// Restore the session and provide it to child components.
pub fn provide_auth() -> RwSignal<AuthState> {
    let auth = RwSignal::new(AuthState::restore());
    provide_context(auth);
    auth
}

/// The session provided by [`provide_auth`].
///
/// # Panics
///
/// Panics if called outside a component tree where [`provide_auth`] ran.
pub fn use_auth() -> RwSignal<AuthState> {
    expect_context::<RwSignal<AuthState>>()
}
