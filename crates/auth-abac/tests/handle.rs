//! Replacing the authorizer while readers are active.

use abac_test_utils::{policy_file, user};
use auth_abac::{
    lending, predicates, Action, AuthorizerHandle, Decision, InvalidPairPolicy, PolicyLoader,
    Resource,
};
use std::sync::atomic::{AtomicBool, Ordering};

#[test]
fn test_readers_see_either_policy_never_a_mix() {
    let handle = AuthorizerHandle::new(lending::authorizer().unwrap());
    let (_dir, path) = policy_file("roles:\n  driver:\n    invoices:\n      view: true\n");
    let replacement = PolicyLoader::new(&path)
        .load_authorizer(&predicates::catalog(), InvalidPairPolicy::Deny)
        .unwrap();
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let driver = user("d1", &["driver"]);
                while !done.load(Ordering::Acquire) {
                    let authz = handle.current();
                    let invoices =
                        authz.has_permission(Some(&driver), Resource::Invoices, Action::View, None);
                    let payments = authz.has_permission(
                        Some(&driver),
                        Resource::Payments,
                        Action::Create,
                        None,
                    );
                    // Lending grants payments only; the replacement grants invoices only.
                    assert_ne!(invoices, payments);
                }
            });
        }

        handle.replace(replacement);
        done.store(true, Ordering::Release);
    });

    let driver = user("d1", &["driver"]);
    assert_eq!(
        handle
            .current()
            .has_permission(Some(&driver), Resource::Invoices, Action::View, None),
        Decision::Granted
    );
}
