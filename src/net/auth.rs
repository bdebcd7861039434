//! Sign-in and sign-up against the `/users` resource.
//!
//! The backend has no credential endpoint, so sign-in resolves the user by
//! email and does not verify the password. This stands in for a real
//! authentication endpoint and must not be treated as access control.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::client::{ApiClient, created_at_now};
use super::error::ApiError;
use super::query::Query;
use super::transport::Transport;
use super::types::{NewUser, Stamped, User};

const USERS: &str = "/users";

pub struct AuthApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Resolve the user registered under `email`.
    ///
    /// The backend is asked to filter by email, and the result is matched
    /// exactly here as well, so a backend that ignores the filter and returns
    /// the whole collection still yields the right user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no user has this email, or any
    /// request error from the lookup.
    pub async fn login(&self, email: &str, _password: &str) -> Result<User, ApiError> {
        let endpoint = Query::new().with("email", email).endpoint(USERS);
        let users: Vec<User> = self.client.get(&endpoint).await?;
        find_by_email(users, email).ok_or_else(|| {
            let err = ApiError::NotFound(format!("user with email {email}"));
            leptos::logging::warn!("login failed: {err}");
            err
        })
    }

    /// Create a user, stamping `createdAt`.
    ///
    /// # Errors
    ///
    /// Returns any request error from the create call.
    pub async fn register(&self, user: &NewUser) -> Result<User, ApiError> {
        self.client.post(USERS, &Stamped::new(user, created_at_now())).await
    }
}

fn find_by_email(users: Vec<User>, email: &str) -> Option<User> {
    users.into_iter().find(|u| u.email == email)
}
