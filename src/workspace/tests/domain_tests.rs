//! Domain validation tests for users and workspaces.

use crate::workspace::domain::{
    EmailAddress, PermissionLevel, User, UserId, Workspace, WorkspaceDomainError,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("  Ada@Example.COM ", "ada@example.com")]
#[case("bob@localhost", "bob@localhost")]
fn email_addresses_are_trimmed_and_lowercased(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("email should be valid");
    assert_eq!(email.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("@example.com")]
#[case("ada@")]
#[case("a b@example.com")]
#[case("a@b@c")]
fn malformed_email_addresses_are_rejected(#[case] raw: &str) {
    assert_eq!(
        EmailAddress::new(raw),
        Err(WorkspaceDomainError::InvalidEmail(raw.to_owned()))
    );
}

#[rstest]
fn user_name_must_not_be_blank() {
    let email = EmailAddress::new("ada@example.com").expect("email should be valid");
    let result = User::new(email, "   ", &DefaultClock);
    assert_eq!(result, Err(WorkspaceDomainError::EmptyUserName));
}

#[rstest]
fn user_summary_carries_public_fields() {
    let email = EmailAddress::new("ada@example.com").expect("email should be valid");
    let user = User::new(email, " Ada ", &DefaultClock)
        .expect("user should be valid")
        .with_avatar("https://example.com/ada.png");

    let summary = user.summary();

    assert_eq!(summary.id, user.id());
    assert_eq!(summary.name, "Ada");
    assert_eq!(summary.email, "ada@example.com");
    assert_eq!(summary.avatar.as_deref(), Some("https://example.com/ada.png"));
}

#[rstest]
fn new_workspace_lists_owner_as_member() {
    let owner = UserId::new();
    let workspace = Workspace::new("My Workspace", owner, &DefaultClock)
        .expect("workspace should be valid")
        .with_description("   ");

    assert_eq!(workspace.owner_id(), owner);
    assert_eq!(workspace.description(), None);
    let [member] = workspace.members() else {
        panic!("expected exactly one member");
    };
    assert_eq!(member.user_id, owner);
    assert_eq!(member.permission_level, PermissionLevel::Owner);
}

#[rstest]
fn rename_rejects_blank_name_and_keeps_old_one() {
    let mut workspace =
        Workspace::new("Original", UserId::new(), &DefaultClock)
            .expect("workspace should be valid");

    let result = workspace.rename("  ", &DefaultClock);

    assert_eq!(result, Err(WorkspaceDomainError::EmptyWorkspaceName));
    assert_eq!(workspace.name(), "Original");
}
