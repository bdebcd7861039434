use super::*;
use crate::router::guard::redirect_target;
use crate::state::auth::{Session, provide_auth, use_auth};

fn make_user() -> User {
    User {
        id: 1,
        username: "ada".to_owned(),
        email: "ada@example.com".to_owned(),
        name: "Ada".to_owned(),
        created_at: "2024-01-01T00:00:00Z".to_owned(),
    }
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn sign_in_then_sign_out_updates_signal() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(AuthState::default());

        complete_sign_in(auth, make_user());
        assert!(auth.with_untracked(AuthState::is_authenticated));
        assert_eq!(auth.with_untracked(|s| s.user().map(|u| u.id)), Some(1));

        sign_out(auth);
        assert_eq!(auth.get_untracked().session, Session::Anonymous);
    });
}

#[test]
#[cfg(not(feature = "hydrate"))]
fn transitions_leave_flag_inert_outside_browser() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(AuthState::default());
        complete_sign_in(auth, make_user());
        assert!(!storage::read_auth_flag());
        sign_out(auth);
        assert!(!storage::read_auth_flag());
    });
}

#[test]
#[cfg(not(feature = "hydrate"))]
fn provided_session_is_shared_through_context() {
    let owner = Owner::new();
    owner.with(|| {
        let provided = provide_auth();
        assert!(!provided.with_untracked(AuthState::is_authenticated));

        complete_sign_in(use_auth(), make_user());
        assert!(provided.with_untracked(AuthState::is_authenticated));
    });
}

// =============================================================
// guard_redirect
// =============================================================

#[test]
fn sign_out_on_protected_page_redirects_to_signin() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(AuthState::default());
        complete_sign_in(auth, make_user());
        assert_eq!(auth.with_untracked(|s| guard_redirect("/reports", "", "", s)), None);

        sign_out(auth);
        assert_eq!(
            auth.with_untracked(|s| guard_redirect("/reports", "", "", s)).as_deref(),
            Some("/signin?redirect=%2Freports")
        );
    });
}

#[test]
fn signed_in_user_on_signin_goes_to_dashboard() {
    let state = AuthState::from_flag(true);
    assert_eq!(guard_redirect("/signin", "?redirect=%2Freports", "", &state).as_deref(), Some("/dashboard"));
}

#[test]
fn anonymous_user_on_signin_proceeds() {
    assert_eq!(guard_redirect("/signin", "", "", &AuthState::default()), None);
}

#[test]
fn preserved_destination_keeps_query_and_fragment() {
    let to = guard_redirect("/transactions/edit/7", "?tab=notes", "#amount", &AuthState::default()).unwrap();
    let search = to.split_once('?').map(|(_, q)| q).unwrap();
    assert_eq!(redirect_target(search), "/transactions/edit/7?tab=notes#amount");
}

#[test]
fn sign_in_view_must_navigate_before_guard_reruns() {
    let owner = Owner::new();
    owner.with(|| {
        let auth = RwSignal::new(AuthState::default());
        let search = "?redirect=%2Freports";
        assert_eq!(auth.with_untracked(|s| guard_redirect("/signin", search, "", s)), None);

        // The view reads its destination before the session flips...
        let destination = redirect_target(search);
        complete_sign_in(auth, make_user());
        assert_eq!(destination, "/reports");

        // ...because the re-run guard, still on /signin, would pick /dashboard.
        assert_eq!(
            auth.with_untracked(|s| guard_redirect("/signin", search, "", s)).as_deref(),
            Some("/dashboard")
        );
        assert_eq!(auth.with_untracked(|s| guard_redirect("/reports", "", "", s)), None);
    });
}
