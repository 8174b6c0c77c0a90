use infinity_api::contract::{
    AuthErrorCode, AuthFailure, Failure, ForgotPasswordResponse, RefreshTokenCode, ResendResponse,
    SignInError, SignInField, SignInInvalidCode, SignInRefusedCode, SignInResponse, SignUpError,
    SignUpField, SignUpInvalidCode,
};
use infinity_api::types::{CommentsPage, Gender, PostsPage, ReactionKind};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_news_feed() {
    let json = load_fixture("news_feed.json");
    let page: PostsPage = serde_json::from_str(&json).unwrap();
    assert_eq!(page.posts.len(), 2);
    assert_eq!(page.metadata.pagination.total, 1000);
    assert!(page.metadata.pagination.has_more);

    let post = &page.posts[0];
    assert_eq!(post.user.display_name(), "Ada Lovelace");
    assert_eq!(post.user.middle_name.as_deref(), Some("King"));
    assert_eq!(post.user.gender, Gender::Female);
    assert_eq!(post.total_reactions(), 16);
    assert_eq!(post.reaction_counts.get(&ReactionKind::Love), Some(&3));
    assert_eq!(
        post.current_user_reaction.as_ref().map(|r| r.kind),
        Some(ReactionKind::Love)
    );

    let quiet = &page.posts[1];
    assert_eq!(quiet.total_reactions(), 0);
    assert!(quiet.current_user_reaction.is_none());
    assert!(quiet.user.avatar.is_none());
}

#[test]
fn deserialize_replies_with_items_key() {
    let json = load_fixture("replies.json");
    let page: CommentsPage = serde_json::from_str(&json).unwrap();
    assert_eq!(page.comments.len(), 1);
    assert!(page.comments[0].is_reply());
    assert!(page.comments[0].post_id.is_none());
    assert!(!page.metadata.pagination.has_more);

    // Re-encoded under the canonical key.
    let value = serde_json::to_value(&page).unwrap();
    assert!(value.get("comments").is_some());
    assert!(value.get("items").is_none());
}

#[test]
fn deserialize_sign_in_response() {
    let json = load_fixture("sign_in.json");
    let resp: SignInResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.tokens.access_token, "access-abc");
    assert_eq!(resp.tokens.refresh_token, "refresh-def");
    assert_eq!(resp.user.username, "ada");
    assert_eq!(resp.user.bio.as_deref(), Some("First programmer."));
}

#[test]
fn deserialize_field_failure() {
    let json = r#"{
        "errorCode": "auth/wrong-password",
        "message": "Sign-in failed",
        "errors": { "password": "Password is incorrect" }
    }"#;
    let failure: SignInError = serde_json::from_str(json).unwrap();
    match &failure {
        AuthFailure::Invalid(f) => {
            assert_eq!(f.error_code, SignInInvalidCode::WrongPassword);
            assert_eq!(f.errors.get(&SignInField::Password), Some("Password is incorrect"));
            assert!(!f.errors.contains(&SignInField::Email));
        }
        other => panic!("expected field failure, got {:?}", other),
    }
    assert_eq!(failure.to_string(), "Sign-in failed (auth/wrong-password)");
}

#[test]
fn deserialize_message_failure() {
    let json = r#"{"errorCode": "auth/user-disabled", "message": "Account disabled"}"#;
    let failure: SignInError = serde_json::from_str(json).unwrap();
    assert_eq!(
        failure,
        AuthFailure::refused(SignInRefusedCode::UserDisabled, "Account disabled")
    );
    assert!(failure.field_errors().is_none());
}

#[test]
fn field_failure_message_defaults_to_empty() {
    let json = r#"{"errorCode": "auth/terms-not-accepted", "errors": {"acceptTerms": "Required"}}"#;
    let failure: SignUpError = serde_json::from_str(json).unwrap();
    let AuthFailure::Invalid(f) = failure else {
        panic!("expected field failure");
    };
    assert_eq!(f.error_code, SignUpInvalidCode::TermsNotAccepted);
    assert_eq!(f.message, "");
    assert_eq!(f.errors.get(&SignUpField::AcceptTerms), Some("Required"));
}

#[test]
fn reject_code_outside_operation() {
    // Known code, but sign-in never answers with it.
    let json = r#"{"errorCode": "auth/email-already-in-use", "message": "taken"}"#;
    assert!(serde_json::from_str::<SignInError>(json).is_err());

    let json = r#"{"errorCode": "auth/token-expired", "message": "expired"}"#;
    assert!(serde_json::from_str::<Failure<RefreshTokenCode>>(json).is_ok());
    let json = r#"{"errorCode": "auth/token-missing", "message": "missing"}"#;
    assert!(serde_json::from_str::<Failure<RefreshTokenCode>>(json).is_err());
}

#[test]
fn reject_unknown_code() {
    let json = r#"{"errorCode": "auth/made-up", "message": "?"}"#;
    assert!(serde_json::from_str::<SignInError>(json).is_err());
    assert!(serde_json::from_str::<AuthErrorCode>("\"auth/made-up\"").is_err());
}

#[test]
fn reject_input_code_without_field_map() {
    let missing = r#"{"errorCode": "auth/validation-error", "message": "bad"}"#;
    assert!(serde_json::from_str::<SignInError>(missing).is_err());

    let empty = r#"{"errorCode": "auth/validation-error", "message": "bad", "errors": {}}"#;
    assert!(serde_json::from_str::<SignInError>(empty).is_err());
}

#[test]
fn reject_unknown_field_key() {
    let json = r#"{
        "errorCode": "auth/validation-error",
        "message": "bad",
        "errors": { "nickname": "Not a sign-in field" }
    }"#;
    assert!(serde_json::from_str::<SignInError>(json).is_err());
}

#[test]
fn deserialize_resend_and_reset_token() {
    let json = r#"{"message": "Code sent", "retryAfter": 1714564860000}"#;
    let resp: ResendResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.retry_after.instant().timestamp_millis(), 1_714_564_860_000);

    let json = r#"{"message": "Code accepted", "token": "reset-123"}"#;
    let resp: ForgotPasswordResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.token, "reset-123");
}
