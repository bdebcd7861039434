//! Route table for the finance client.
//!
//! DESIGN
//! ======
//! Each protected route declares `requires_auth` itself; nothing is
//! inherited from a parent layout route.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Named client routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    SignIn,
    SignUp,
    ResetPassword,
    PasswordResetConfirm,
    Dashboard,
    Transactions,
    AddTransaction,
    EditTransaction,
    Reports,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::SignIn => "signin",
            Self::SignUp => "signup",
            Self::ResetPassword => "reset-password",
            Self::PasswordResetConfirm => "password-reset-confirm",
            Self::Dashboard => "dashboard",
            Self::Transactions => "transactions",
            Self::AddTransaction => "add-transaction",
            Self::EditTransaction => "edit-transaction",
            Self::Reports => "reports",
        }
    }

    /// Pages a signed-in user is bounced away from.
    #[must_use]
    pub fn is_auth_page(self) -> bool {
        matches!(self, Self::Home | Self::SignIn | Self::SignUp)
    }

    #[must_use]
    pub fn path(self) -> &'static str {
        route(self).path
    }
}

/// One entry of the route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub name: RouteName,
    /// Path pattern; `:name` segments bind a parameter.
    pub path: &'static str,
    pub requires_auth: bool,
}

/// One entry per [`RouteName`], in declaration order.
pub const ROUTES: &[RouteDef] = &[
    RouteDef { name: RouteName::Home, path: "/", requires_auth: false },
    RouteDef { name: RouteName::SignIn, path: "/signin", requires_auth: false },
    RouteDef { name: RouteName::SignUp, path: "/signup", requires_auth: false },
    RouteDef { name: RouteName::ResetPassword, path: "/reset-password", requires_auth: false },
    RouteDef { name: RouteName::PasswordResetConfirm, path: "/password-reset-confirm", requires_auth: false },
    RouteDef { name: RouteName::Dashboard, path: "/dashboard", requires_auth: true },
    RouteDef { name: RouteName::Transactions, path: "/transactions", requires_auth: true },
    RouteDef { name: RouteName::AddTransaction, path: "/transactions/add", requires_auth: true },
    RouteDef { name: RouteName::EditTransaction, path: "/transactions/edit/:id", requires_auth: true },
    RouteDef { name: RouteName::Reports, path: "/reports", requires_auth: true },
];

/// Table entry for `name`. [`ROUTES`] is ordered like [`RouteName`].
#[must_use]
pub fn route(name: RouteName) -> &'static RouteDef {
    &ROUTES[name as usize]
}

/// A resolved path with its bound parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static RouteDef,
    pub params: Vec<(&'static str, String)>,
}

impl RouteMatch {
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }
}

/// Match a location against the table. Query string, fragment and a
/// trailing slash are ignored.
#[must_use]
pub fn resolve(location: &str) -> Option<RouteMatch> {
    let path = location.split(['?', '#']).next().unwrap_or_default();
    let segments = split_segments(path);
    ROUTES.iter().find_map(|route| {
        let pattern = split_segments(route.path);
        if pattern.len() != segments.len() {
            return None;
        }
        let mut params = Vec::new();
        for (want, got) in pattern.iter().zip(&segments) {
            if let Some(key) = want.strip_prefix(':') {
                if got.is_empty() {
                    return None;
                }
                params.push((key, (*got).to_owned()));
            } else if want != got {
                return None;
            }
        }
        Some(RouteMatch { route, params })
    })
}

fn split_segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}
