use infinity_api::contract::{
    AuthErrorCode, AuthFailure, OperationError, RefreshTokenCode, RefreshTokenRequest,
    SendEmailVerificationRequest, SignInField, SignInInvalidCode, SignInRefusedCode,
    SignInRequest, SignOutCode, SignOutRequest,
};
use infinity_api::types::{CreateCommentRequest, UpdateCommentRequest};
use infinity_api::{ApiError, Client, Error, PageQuery, Query, ResourceId};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn sign_in_request() -> SignInRequest {
    SignInRequest {
        email: "ada@infinity.net".into(),
        password: "correct horse".into(),
    }
}

#[tokio::test]
async fn sign_in_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .and(header("No-Auth", "true"))
        .and(body_json(json!({
            "email": "ada@infinity.net",
            "password": "correct horse"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("sign_in.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = client.sign_in(&sign_in_request()).await.unwrap();
    assert_eq!(resp.tokens.access_token, "access-abc");
    assert_eq!(resp.user.email, "ada@infinity.net");
}

#[tokio::test]
async fn sign_in_rejected_with_field_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorCode": "auth/wrong-password",
            "message": "Sign-in failed",
            "errors": { "password": "Password is incorrect" }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.sign_in(&sign_in_request()).await.unwrap_err();
    let failure = err.rejection().expect("contract failure");
    assert_eq!(failure.code(), AuthErrorCode::WrongPassword);
    match failure {
        AuthFailure::Invalid(f) => {
            assert_eq!(f.error_code, SignInInvalidCode::WrongPassword);
            assert_eq!(f.errors.len(), 1);
            assert_eq!(f.errors.get(&SignInField::Password), Some("Password is incorrect"));
        }
        other => panic!("expected field failure, got {:?}", other),
    }
}

#[tokio::test]
async fn sign_in_rejected_message_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "errorCode": "auth/too-many-requests",
            "message": "Slow down"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.sign_in(&sign_in_request()).await.unwrap_err();
    match err {
        ApiError::Rejected(AuthFailure::Refused(f)) => {
            assert_eq!(f.error_code, SignInRefusedCode::TooManyRequests);
            assert_eq!(f.message, "Slow down");
        }
        other => panic!("expected refusal, got {:?}", other),
    }
}

#[tokio::test]
async fn code_not_allowed_for_operation_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signout"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorCode": "auth/user-not-found",
            "message": "No such user"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let req = SignOutRequest {
        refresh_token: "refresh-def".into(),
        access_token: None,
    };
    let err = client.sign_out(&req).await.unwrap_err();
    match err {
        ApiError::Unexpected {
            status,
            error_code,
            message,
        } => {
            assert_eq!(status, 404);
            assert_eq!(error_code.as_deref(), Some("auth/user-not-found"));
            assert_eq!(message.as_deref(), Some("No such user"));
        }
        other => panic!("expected unexpected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn sign_out_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signout"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorCode": "auth/token-revoked",
            "message": "Already signed out"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let req = SignOutRequest {
        refresh_token: "refresh-def".into(),
        access_token: Some("access-abc".into()),
    };
    let err = client.sign_out(&req).await.unwrap_err();
    let failure = err.rejection().unwrap();
    assert_eq!(failure.error_code, SignOutCode::TokenRevoked);
    assert_eq!(failure.to_string(), "Already signed out (auth/token-revoked)");
}

#[tokio::test]
async fn validation_code_without_errors_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/send-email-verification"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorCode": "auth/validation-error",
            "message": "Bad input",
            "errors": {}
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let req = SendEmailVerificationRequest {
        email: "ada@infinity.net".into(),
    };
    let err = client.send_email_verification(&req).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Unexpected { status: 400, ref error_code, .. }
            if error_code.as_deref() == Some("auth/validation-error")
    ));
}

#[tokio::test]
async fn non_json_failure_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let req = RefreshTokenRequest {
        refresh_token: "refresh-def".into(),
    };
    let err = client.refresh_token(&req).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Unexpected {
            status: 502,
            error_code: None,
            message: None
        }
    ));
}

#[tokio::test]
async fn refresh_token_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorCode": "auth/token-blacklisted",
            "message": "Token blacklisted"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let req = RefreshTokenRequest {
        refresh_token: "refresh-def".into(),
    };
    let err = client.refresh_token(&req).await.unwrap_err();
    assert_eq!(
        err.rejection().map(|f| f.error_code),
        Some(RefreshTokenCode::TokenBlacklisted)
    );
}

#[tokio::test]
async fn malformed_success_body_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.sign_in(&sign_in_request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(Error::RequestFailed)));
}

#[tokio::test]
async fn get_news_feed_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/news-feed"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "2"))
        .and(header("authorization", "Bearer access-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("news_feed.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).with_access_token("access-abc");
    let query = PageQuery::default().with_limit(2);
    let page = client.get_news_feed(&query).await.unwrap();
    assert_eq!(page.posts.len(), 2);

    let next = query.next_page(&page.metadata.pagination).unwrap();
    assert_eq!(next.offset(), 2);
    assert_eq!(next.limit(), 2);
}

#[tokio::test]
async fn get_replies_uses_comment_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/comments/6fa459ea-ee8a-3ca4-894e-db77e160355e/replies"))
        .and(query_param("offset", "20"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("replies.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let id = ResourceId::parse("6fa459ea-ee8a-3ca4-894e-db77e160355e").unwrap();
    let query = PageQuery::default().with_offset(20);
    let page = client.get_replies_by_comment_id(&id, &query).await.unwrap();
    assert_eq!(page.comments.len(), 1);
    assert!(query.next_page(&page.metadata.pagination).is_none());
}

#[tokio::test]
async fn get_comments_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/p1/comments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let id = ResourceId::parse("p1").unwrap();
    let err = client
        .get_comments_by_post_id(&id, &PageQuery::default())
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_and_update_comment() {
    let mock_server = MockServer::start().await;
    let comment = json!({
        "id": "e4eaaaf2-d142-11e1-b3e4-080027620cdd",
        "postId": "3f2b6c1e-8d4a-4b7e-9a51-2c6d8e0f1a23",
        "user": {
            "id": "9b1deb4d-3b7d-4bad-9bdd-2b0d7b3dcb6d",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "username": "ada",
            "email": "ada@infinity.net",
            "mobileNumber": "555-0101",
            "birthdate": "1815-12-10",
            "gender": "female",
            "acceptTerms": true
        },
        "content": "Hello",
        "repliesCount": 0,
        "createdAt": "2024-04-03T08:00:00Z",
        "updatedAt": "2024-04-03T08:00:00Z"
    });

    Mock::given(method("POST"))
        .and(path("/posts/3f2b6c1e-8d4a-4b7e-9a51-2c6d8e0f1a23/comments"))
        .and(body_json(json!({ "content": "Hello" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment.clone()))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/comments/e4eaaaf2-d142-11e1-b3e4-080027620cdd"))
        .and(body_json(json!({ "content": "Hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let post_id = ResourceId::parse("3f2b6c1e-8d4a-4b7e-9a51-2c6d8e0f1a23").unwrap();
    let created = client
        .create_comment(
            &post_id,
            &CreateCommentRequest {
                content: "Hello".into(),
            },
        )
        .await
        .unwrap();
    assert!(!created.is_reply());

    let updated = client
        .update_comment(
            &ResourceId::from(created.id),
            &UpdateCommentRequest {
                content: "Hello".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let client = Client::with_base_url("http://127.0.0.1:1");
    let err = client.sign_in(&sign_in_request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(Error::RequestFailed)));
}
