//! Policy documents loaded from disk.

use abac_test_utils::{assert_err, assert_ok, blog, comment, policy_file, user};
use auth_abac::{
    lending, predicates, Action, ConfigError, Decision, InvalidPairPolicy, PolicyDocument,
    PolicyLoader, Resource,
};
use pretty_assertions::assert_eq;

const LENDING_SUBSET: &str = r#"
admin_roles: [super, admin, subAdmin]
roles:
  user:
    comments:
      create: true
      view: { when: comment_not_blocked }
    blogs:
      delete: { when: own_completed_blog }
  manager:
    orgs:
      delete: true
  driver:
    payments:
      create: true
"#;

#[test]
fn test_document_reproduces_required_decisions() {
    let (_dir, path) = policy_file(LENDING_SUBSET);
    let loader = PolicyLoader::new(&path);
    let authz = assert_ok!(loader.load_authorizer(&predicates::catalog(), InvalidPairPolicy::Deny));
    let subject = user("u1", &["user"]).blocked_by("u2");

    assert_eq!(
        authz.has_permission(Some(&subject), Resource::Comments, Action::Create, None),
        Decision::Granted
    );
    let blocked_comment = comment("u2");
    assert_eq!(
        authz.has_permission(
            Some(&subject),
            Resource::Comments,
            Action::View,
            Some(&blocked_comment)
        ),
        Decision::Denied
    );
    let draft = blog("u1", false);
    assert_eq!(
        authz.has_permission(Some(&subject), Resource::Blogs, Action::Delete, Some(&draft)),
        Decision::Denied
    );
    assert_eq!(
        authz.has_permission(Some(&user("m1", &["manager"])), Resource::Orgs, Action::Delete, None),
        Decision::Granted
    );
    let driver = user("d1", &["driver"]);
    assert_eq!(
        authz.has_permission(Some(&driver), Resource::Invoices, Action::View, None),
        Decision::Denied
    );
    assert_eq!(authz.is_admin(Some(&user("a1", &["subAdmin"]))), Decision::Granted);
}

#[test]
fn test_illegal_action_is_reported_precisely() {
    let (_dir, path) = policy_file("roles:\n  manager:\n    dashboard:\n      delete: true\n");
    let err = assert_err!(PolicyLoader::new(&path).load(&predicates::catalog()));

    assert_eq!(
        err.to_string(),
        "policy violates the resource schema: manager: action 'delete' is not defined for resource 'dashboard'"
    );
}

#[test]
fn test_unknown_predicate_is_reported_precisely() {
    let (_dir, path) = policy_file("roles:\n  user:\n    loans:\n      view: { when: own_yacht }\n");
    let err = assert_err!(PolicyLoader::new(&path).load(&predicates::catalog()));

    assert!(matches!(err, ConfigError::UnknownPredicate { ref name, .. } if name == "own_yacht"));
    assert_eq!(err.to_string(), "user/loans/view: unknown predicate 'own_yacht'");
}

#[test]
fn test_unknown_role_is_a_parse_error() {
    let (_dir, path) = policy_file("roles:\n  janitor:\n    blogs:\n      view: true\n");
    let err = assert_err!(PolicyLoader::new(&path).load(&predicates::catalog()));
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("janitor"));
}

#[test]
fn test_builtin_policy_round_trips_through_disk() {
    let dir = abac_test_utils::temp_dir();
    let loader = PolicyLoader::new(dir.path().join("lending.yaml"));
    let matrix = lending::matrix().unwrap();

    assert_ok!(loader.save(&PolicyDocument::from_matrix(&matrix, &lending::registry())));
    let authz =
        assert_ok!(loader.load_authorizer(&predicates::catalog(), InvalidPairPolicy::Panic));

    assert_eq!(authz.matrix().len(), matrix.len());
    for entry in matrix.entries() {
        assert_eq!(
            authz.matrix().grant(entry.role, entry.resource, entry.action),
            Some(entry.grant)
        );
    }
}
