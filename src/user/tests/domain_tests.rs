//! Unit tests for user domain types and identity context.

use crate::user::domain::{AuthContext, Caller, IdentityError, Role, User, UserId};
use rstest::rstest;

#[rstest]
#[case("regular", Role::Regular)]
#[case("admin", Role::Admin)]
#[case(" Admin ", Role::Admin)]
#[case("REGULAR", Role::Regular)]
fn role_parses_known_values(#[case] input: &str, #[case] expected: Role) {
    assert_eq!(Role::try_from(input), Ok(expected));
}

#[rstest]
#[case("")]
#[case("root")]
#[case("superuser")]
fn role_rejects_unknown_values(#[case] input: &str) {
    assert!(Role::try_from(input).is_err());
}

#[test]
fn role_round_trips_through_storage_string() {
    for role in [Role::Regular, Role::Admin] {
        assert_eq!(Role::try_from(role.as_str()), Ok(role));
    }
}

#[test]
fn anonymous_context_rejects_resolution() {
    let context = AuthContext::anonymous();
    assert_eq!(context.caller(), Err(IdentityError::Unauthorized));
}

#[test]
fn authenticated_context_resolves_caller() {
    let caller = Caller::new(UserId::new(), Role::Regular);
    let context = AuthContext::authenticated(caller);
    assert_eq!(context.caller(), Ok(&caller));
}

#[test]
fn caller_derives_from_user_record() {
    let user = User::new(UserId::new(), "alice", "alice@example.com", Role::Admin);
    let caller = Caller::from(&user);
    assert_eq!(caller.id(), user.id());
    assert!(caller.is_admin());
}
