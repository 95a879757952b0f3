//! Tests for user value objects.

use super::*;
use rstest::rstest;

#[rstest]
#[case("Foo@Bar.COM")]
#[case("foo@bar.com")]
#[case("MiXeD.Case+Tag@Example.org")]
fn email_normalisation_is_idempotent(#[case] raw: &str) {
    let once = EmailAddress::new(raw);
    let twice = EmailAddress::new(once.as_ref());
    assert_eq!(once, twice);
}

#[rstest]
fn emails_differing_only_in_case_are_equal() {
    assert_eq!(
        EmailAddress::new("Foo@Bar.COM"),
        EmailAddress::new("foo@bar.com")
    );
}

#[rstest]
#[case("")]
#[case("   ")]
fn parse_rejects_blank_email(#[case] raw: &str) {
    assert_eq!(
        EmailAddress::parse(raw),
        Err(UserValidationError::EmptyEmailAddress)
    );
}

#[rstest]
fn email_deserialises_normalised() {
    let email: EmailAddress = serde_json::from_str("\"Alice@Example.com\"").expect("email");
    assert_eq!(email.as_ref(), "alice@example.com");
}

#[rstest]
fn display_name_is_trimmed() {
    let name = DisplayName::new("  Alice ").expect("valid name");
    assert_eq!(name.as_ref(), "Alice");
}

#[rstest]
#[case("")]
#[case("\t \n")]
fn display_name_rejects_blank(#[case] raw: &str) {
    assert_eq!(
        DisplayName::new(raw),
        Err(UserValidationError::EmptyDisplayName)
    );
}

#[rstest]
fn user_map_serialises_with_string_keys() {
    let mut users = UserMap::new();
    users.insert(
        UserId::new(7),
        UserSummary {
            display_name: "Alice".to_owned(),
        },
    );
    let value = serde_json::to_value(&users).expect("serialise users");
    assert_eq!(value, serde_json::json!({ "7": { "displayName": "Alice" } }));
}
