//! Persisted authentication flag.
//!
//! The flag lives in `localStorage` under [`AUTH_FLAG_KEY`]; the value
//! `"true"` means signed in and anything else, including absence, means
//! signed out. Outside the browser reads return `false` and writes are
//! no-ops.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

pub const AUTH_FLAG_KEY: &str = "isAuthenticated";

/// Interpret a raw stored value.
#[must_use]
pub fn parse_auth_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read the persisted flag.
pub fn read_auth_flag() -> bool {
    #[cfg(feature = "hydrate")]
    {
        let stored = local_storage().and_then(|s| s.get_item(AUTH_FLAG_KEY).ok().flatten());
        parse_auth_flag(stored.as_deref())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Persist the flag. Signing out removes the key rather than storing `"false"`.
pub fn write_auth_flag(authenticated: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            let result = if authenticated {
                storage.set_item(AUTH_FLAG_KEY, "true")
            } else {
                storage.remove_item(AUTH_FLAG_KEY)
            };
            if result.is_err() {
                leptos::logging::warn!("failed to persist auth flag");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = authenticated;
    }
}
