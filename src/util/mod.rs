//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from state and
//! routing logic to improve reuse and testability.

pub mod auth;
pub mod storage;
