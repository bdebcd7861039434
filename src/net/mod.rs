//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` owns the base HTTP operations, `transport` abstracts the wire
//! (reqwest natively, `gloo-net` in the browser), `types` defines the shared
//! wire schema, and the remaining modules are per-resource facades.

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod client;
pub mod error;
pub mod query;
pub mod transactions;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
