//! Tests for the domain user model.

use super::*;
use rstest::rstest;
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
#[case(VALID_ID)]
#[case("3FA85F64-5717-4562-B3FC-2C963F66AFA6")]
#[case("3fa85f6457174562b3fc2c963f66afa6")]
#[case("{3fa85f64-5717-4562-b3fc-2c963f66afa6}")]
fn user_id_canonicalises_accepted_spellings(#[case] raw: &str) {
    let id = UserId::new(raw).expect("valid id");
    assert_eq!(id.as_ref(), VALID_ID);
    assert_eq!(id, UserId::new(VALID_ID).expect("valid id"));
    assert_eq!(String::from(id), VALID_ID);
}

#[rstest]
fn user_id_deserialises_to_canonical_text() {
    let id: UserId =
        serde_json::from_value(json!("3FA85F64-5717-4562-B3FC-2C963F66AFA6")).expect("valid id");
    assert_eq!(id.to_string(), VALID_ID);
}

#[rstest]
#[case("   ", UserValidationError::EmptyDisplayName)]
#[case("ab", UserValidationError::DisplayNameTooShort { min: DISPLAY_NAME_MIN })]
#[case(&"a".repeat(DISPLAY_NAME_MAX + 1), UserValidationError::DisplayNameTooLong { max: DISPLAY_NAME_MAX })]
#[case("bad$char", UserValidationError::DisplayNameInvalidCharacters)]
fn display_name_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(DisplayName::new(raw), Err(expected));
}

#[rstest]
#[case("Ada Lovelace")]
#[case("grace_hopper")]
#[case("abc")]
fn display_name_accepts_valid_input(#[case] raw: &str) {
    let name = DisplayName::new(raw).expect("valid display name");
    assert_eq!(name.as_ref(), raw);
}

#[rstest]
fn user_serialises_with_camel_case_fields() {
    let user = User::try_from_strings(VALID_ID, "Ada Lovelace").expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value, json!({ "id": VALID_ID, "displayName": "Ada Lovelace" }));
}

#[rstest]
fn user_deserialises_snake_case_alias() {
    let user: User = serde_json::from_value(json!({ "id": VALID_ID, "display_name": "Ada Lovelace" }))
        .expect("alias accepted");
    assert_eq!(user.display_name().as_ref(), "Ada Lovelace");
}

#[rstest]
fn user_deserialisation_enforces_invariants() {
    let result = serde_json::from_value::<User>(json!({ "id": "nope", "displayName": "Ada" }));
    assert!(result.is_err());
}

#[rstest]
#[case(UserValidationError::InvalidId, "id")]
#[case(UserValidationError::DisplayNameInvalidCharacters, "displayName")]
fn validation_errors_name_their_field(#[case] error: UserValidationError, #[case] field: &str) {
    assert_eq!(error.field(), field);
}

#[rstest]
fn draft_validates_display_name() {
    let draft = UserDraft {
        display_name: "x".to_owned(),
    };
    assert!(matches!(
        draft.validate(),
        Err(UserValidationError::DisplayNameTooShort { .. })
    ));
}
