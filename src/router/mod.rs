//! Client route table and the navigation guard evaluated before each route
//! change.

pub mod guard;
pub mod routes;
