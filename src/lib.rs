//! # finance-client
//!
//! Leptos client library for the personal-finance web app.
//!
//! This crate contains the REST client and typed resource facades used by
//! the views, the client-side session store, and the route table with its
//! navigation guard. Pages and layout components live in the UI layer that
//! consumes this crate.

pub mod config;
pub mod net;
pub mod router;
pub mod state;
pub mod util;
