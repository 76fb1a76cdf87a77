use eventpro_client::{
    guard::{RouteDecision, evaluate, has_access},
    models::{Role, User},
    session::SessionSnapshot,
};

fn user_with_role(role: Role) -> User {
    User {
        id: 7,
        name: "Jamie Rivera".to_string(),
        email: "jamie@example.com".to_string(),
        role,
    }
}

fn snapshot(user: Option<User>, loading: bool) -> SessionSnapshot {
    SessionSnapshot { user, loading }
}

// --- Role hierarchy ---

#[test]
fn test_role_order_is_subscriber_organizer_admin() {
    assert!(Role::Subscriber < Role::Organizer);
    assert!(Role::Organizer < Role::Admin);
}

#[test]
fn test_access_matrix_is_exhaustive() {
    let roles = [Role::Subscriber, Role::Organizer, Role::Admin];

    // hasAccess(R, Q) holds iff R is at or above Q in the hierarchy, or Q
    // is unspecified.
    for held in roles {
        assert!(has_access(held, None), "{held} should pass an open view");
        for required in roles {
            assert_eq!(
                has_access(held, Some(required)),
                held >= required,
                "held={held} required={required}"
            );
        }
    }
}

#[test]
fn test_admin_satisfies_every_requirement() {
    assert!(Role::Admin.satisfies(Role::Subscriber));
    assert!(Role::Admin.satisfies(Role::Organizer));
    assert!(Role::Admin.satisfies(Role::Admin));
}

#[test]
fn test_subscriber_satisfies_only_subscriber() {
    assert!(Role::Subscriber.satisfies(Role::Subscriber));
    assert!(!Role::Subscriber.satisfies(Role::Organizer));
    assert!(!Role::Subscriber.satisfies(Role::Admin));
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Organizer).unwrap(), "\"organizer\"");
    let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
    assert_eq!(parsed, Role::Admin);
}

// --- Guard decisions ---

#[test]
fn test_guard_shows_placeholder_while_loading() {
    // Even an admin-only view waits for the startup check instead of
    // redirecting.
    let decision = evaluate(&snapshot(None, true), Some(Role::Admin), "/admin");
    assert_eq!(decision, RouteDecision::Pending);
}

#[test]
fn test_guard_redirects_visitor_to_login_with_origin() {
    let decision = evaluate(&snapshot(None, false), Some(Role::Admin), "/admin");
    assert_eq!(
        decision,
        RouteDecision::RedirectToLogin {
            from: "/admin".to_string()
        }
    );
}

#[test]
fn test_guard_redirects_underprivileged_to_dashboard_not_login() {
    let subscriber = snapshot(Some(user_with_role(Role::Subscriber)), false);
    let decision = evaluate(&subscriber, Some(Role::Organizer), "/events/new");
    assert_eq!(decision, RouteDecision::RedirectToDashboard);
}

#[test]
fn test_guard_allows_sufficient_role() {
    let organizer = snapshot(Some(user_with_role(Role::Organizer)), false);
    assert_eq!(
        evaluate(&organizer, Some(Role::Organizer), "/events/new"),
        RouteDecision::Allow
    );
    assert_eq!(
        evaluate(&organizer, Some(Role::Subscriber), "/profile"),
        RouteDecision::Allow
    );
}

#[test]
fn test_guard_allows_any_user_when_no_role_required() {
    let subscriber = snapshot(Some(user_with_role(Role::Subscriber)), false);
    assert_eq!(evaluate(&subscriber, None, "/profile"), RouteDecision::Allow);
}

// --- Derived session booleans ---

#[test]
fn test_snapshot_booleans_for_visitor() {
    let visitor = snapshot(None, false);
    assert!(!visitor.is_authenticated());
    assert!(!visitor.is_admin());
    assert!(!visitor.is_organizer());
    assert!(!visitor.is_subscriber());
}

#[test]
fn test_snapshot_booleans_for_organizer() {
    let organizer = snapshot(Some(user_with_role(Role::Organizer)), false);
    assert!(organizer.is_authenticated());
    assert!(!organizer.is_admin());
    assert!(organizer.is_organizer());
    assert!(organizer.is_subscriber());
}

#[test]
fn test_snapshot_booleans_for_admin() {
    let admin = snapshot(Some(user_with_role(Role::Admin)), false);
    assert!(admin.is_admin());
    assert!(admin.is_organizer());
    assert!(admin.is_subscriber());
}
