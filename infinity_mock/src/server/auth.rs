//! Auth endpoints. Every answer is either the operation's success body or
//! one of its declared failures, sent with the status for its category.
//! A body that does not decode is one of those failures too.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use infinity_api::contract::{
    AuthErrorCode, AuthFailure, ErrorCategory, Failure, FieldErrors, ForgotPassword,
    ForgotPasswordInvalidCode, ForgotPasswordRequest, ForgotPasswordResponse, MessageResponse,
    Operation, OperationError, RefreshToken, RefreshTokenCode, RefreshTokenRequest,
    RefreshTokenResponse, RequestField, ResendResponse, ResetPassword, ResetPasswordInvalidCode,
    ResetPasswordRefusedCode, ResetPasswordRequest, RetryAfter, SendEmailVerification,
    SendEmailVerificationInvalidCode, SendEmailVerificationRefusedCode,
    SendEmailVerificationRequest, SendForgotPassword, SendForgotPasswordInvalidCode,
    SendForgotPasswordRefusedCode, SendForgotPasswordRequest, SignIn, SignInInvalidCode,
    SignInRequest, SignInResponse, SignOut, SignOutCode, SignOutRequest, SignUp,
    SignUpInvalidCode, SignUpRequest, Tokens, VerifyEmailByCode, VerifyEmailByCodeInvalidCode,
    VerifyEmailByCodeRequest, VerifyEmailByToken, VerifyEmailByTokenInvalidCode,
    VerifyEmailByTokenRefusedCode, VerifyEmailByTokenRequest,
};
use uuid::Uuid;

use super::AppState;
use crate::validation::{self, is_well_formed_token, INVALID_INPUT_MESSAGE};

/// Handler result: both arms are complete responses.
type Answer = Result<Response, Response>;

/// HTTP status for a failure carrying `code`.
pub fn status_for(code: AuthErrorCode) -> StatusCode {
    match code.category() {
        ErrorCategory::Validation | ErrorCategory::Verification => StatusCode::BAD_REQUEST,
        ErrorCategory::Authentication | ErrorCategory::Token => StatusCode::UNAUTHORIZED,
        ErrorCategory::RateLimiting => StatusCode::TOO_MANY_REQUESTS,
        ErrorCategory::User => match code {
            AuthErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            AuthErrorCode::UserDisabled => StatusCode::FORBIDDEN,
            _ => StatusCode::CONFLICT,
        },
    }
}

fn reject<O: Operation>(failure: O::Error) -> Response {
    let status = status_for(failure.code());
    tracing::debug!("{} rejected ({}): {}", O::NAME, status.as_u16(), failure);
    (status, Json(failure)).into_response()
}

fn message(text: impl Into<String>) -> Response {
    Json(MessageResponse {
        message: text.into(),
    })
    .into_response()
}

fn issue_token(kind: &str) -> String {
    format!("{}-{}", kind, Uuid::new_v4().simple())
}

/// Starts the resend window for `email` under `operation`, or returns the
/// refusal message while one is running.
fn start_cooldown(state: &AppState, operation: &str, email: &str) -> Result<RetryAfter, String> {
    let now = Utc::now();
    let key = format!("{}:{}", operation, email.trim().to_lowercase());
    state.cooldowns.try_start(&key, now).map_err(|running| {
        let secs = running.remaining(now).as_secs().max(1);
        format!(
            "Please wait {} seconds before requesting another code",
            secs
        )
    })
}

/// The field a body-decoding error names, with serde's reason.
fn offending_field<F: RequestField>(rejection: &JsonRejection) -> Option<(F, String)> {
    let JsonRejection::JsonDataError(err) = rejection else {
        return None;
    };
    let text = err.body_text();
    let (_, detail) = text.split_once(": ")?;
    F::ALL.iter().find_map(|field| {
        detail
            .strip_prefix(field.name())
            .and_then(|rest| rest.strip_prefix(": "))
            .map(|reason| (*field, reason.to_string()))
    })
}

/// The `validation-error` failure for a body that did not decode. Names the
/// field serde complained about, or every field when none was named.
fn unreadable<V, F: RequestField, C>(code: V, rejection: &JsonRejection) -> AuthFailure<V, F, C> {
    tracing::debug!("Unreadable request body: {}", rejection.body_text());
    let errors = match offending_field::<F>(rejection) {
        Some((field, reason)) => FieldErrors::single(field, reason),
        None => FieldErrors::every(&rejection.body_text()),
    };
    AuthFailure::invalid(code, INVALID_INPUT_MESSAGE, errors)
}

/// Unwraps a decoded body or answers with the failure built by `on_error`.
fn decode<O: Operation, T>(
    body: Result<Json<T>, JsonRejection>,
    on_error: impl FnOnce(&JsonRejection) -> O::Error,
) -> Result<T, Response> {
    body.map(|Json(req)| req)
        .map_err(|rejection| reject::<O>(on_error(&rejection)))
}

pub async fn sign_in(
    State(state): State<AppState>,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Answer {
    let req = decode::<SignIn, _>(body, |r| unreadable(SignInInvalidCode::ValidationError, r))?;
    validation::sign_in(&req).map_err(reject::<SignIn>)?;
    let user = state.dataset.account(&req.email);
    tracing::debug!("Signed in {}", user.email);
    Ok(Json(SignInResponse {
        tokens: Tokens {
            access_token: issue_token("access"),
            refresh_token: issue_token("refresh"),
        },
        user,
    })
    .into_response())
}

pub async fn sign_up(body: Result<Json<SignUpRequest>, JsonRejection>) -> Answer {
    let req = decode::<SignUp, _>(body, |r| unreadable(SignUpInvalidCode::ValidationError, r))?;
    validation::sign_up(&req).map_err(reject::<SignUp>)?;
    Ok(message(format!(
        "Account created. A verification code was sent to {}",
        req.email.trim()
    )))
}

pub async fn sign_out(body: Result<Json<SignOutRequest>, JsonRejection>) -> Answer {
    let req = decode::<SignOut, _>(body, |r| {
        Failure::new(SignOutCode::TokenInvalid, r.body_text())
    })?;
    let access_ok = req
        .access_token
        .as_deref()
        .map_or(true, is_well_formed_token);
    if !is_well_formed_token(&req.refresh_token) || !access_ok {
        return Err(reject::<SignOut>(Failure::new(
            SignOutCode::TokenInvalid,
            "Token is missing or malformed",
        )));
    }
    Ok(message("Signed out"))
}

pub async fn refresh_token(body: Result<Json<RefreshTokenRequest>, JsonRejection>) -> Answer {
    let req = decode::<RefreshToken, _>(body, |r| {
        Failure::new(RefreshTokenCode::InvalidToken, r.body_text())
    })?;
    if !is_well_formed_token(&req.refresh_token) {
        return Err(reject::<RefreshToken>(Failure::new(
            RefreshTokenCode::InvalidToken,
            "Refresh token is missing or malformed",
        )));
    }
    Ok(Json(RefreshTokenResponse {
        access_token: issue_token("access"),
    })
    .into_response())
}

pub async fn send_email_verification(
    State(state): State<AppState>,
    body: Result<Json<SendEmailVerificationRequest>, JsonRejection>,
) -> Answer {
    let req = decode::<SendEmailVerification, _>(body, |r| {
        unreadable(SendEmailVerificationInvalidCode::ValidationError, r)
    })?;
    validation::send_email_verification(&req).map_err(reject::<SendEmailVerification>)?;
    let retry_after =
        start_cooldown(&state, SendEmailVerification::NAME, &req.email).map_err(|msg| {
            reject::<SendEmailVerification>(AuthFailure::refused(
                SendEmailVerificationRefusedCode::TooManyRequests,
                msg,
            ))
        })?;
    Ok(Json(ResendResponse {
        message: format!("Verification code sent to {}", req.email.trim()),
        retry_after,
    })
    .into_response())
}

pub async fn verify_email_by_code(
    body: Result<Json<VerifyEmailByCodeRequest>, JsonRejection>,
) -> Answer {
    let req = decode::<VerifyEmailByCode, _>(body, |r| {
        unreadable(VerifyEmailByCodeInvalidCode::ValidationError, r)
    })?;
    validation::verify_email_by_code(&req).map_err(reject::<VerifyEmailByCode>)?;
    Ok(message("Email verified"))
}

pub async fn verify_email_by_token(
    body: Result<Json<VerifyEmailByTokenRequest>, JsonRejection>,
) -> Answer {
    let req = decode::<VerifyEmailByToken, _>(body, |r| {
        unreadable(VerifyEmailByTokenInvalidCode::ValidationError, r)
    })?;
    validation::verify_email_by_token(&req).map_err(reject::<VerifyEmailByToken>)?;
    if !is_well_formed_token(&req.token) {
        return Err(reject::<VerifyEmailByToken>(AuthFailure::refused(
            VerifyEmailByTokenRefusedCode::TokenInvalid,
            "Verification link is malformed",
        )));
    }
    Ok(message("Email verified"))
}

pub async fn send_forgot_password(
    State(state): State<AppState>,
    body: Result<Json<SendForgotPasswordRequest>, JsonRejection>,
) -> Answer {
    let req = decode::<SendForgotPassword, _>(body, |r| {
        unreadable(SendForgotPasswordInvalidCode::ValidationError, r)
    })?;
    validation::send_forgot_password(&req).map_err(reject::<SendForgotPassword>)?;
    let retry_after =
        start_cooldown(&state, SendForgotPassword::NAME, &req.email).map_err(|msg| {
            reject::<SendForgotPassword>(AuthFailure::refused(
                SendForgotPasswordRefusedCode::TooManyRequests,
                msg,
            ))
        })?;
    Ok(Json(ResendResponse {
        message: format!("Password reset code sent to {}", req.email.trim()),
        retry_after,
    })
    .into_response())
}

pub async fn forgot_password(body: Result<Json<ForgotPasswordRequest>, JsonRejection>) -> Answer {
    let req = decode::<ForgotPassword, _>(body, |r| {
        unreadable(ForgotPasswordInvalidCode::ValidationError, r)
    })?;
    validation::forgot_password(&req).map_err(reject::<ForgotPassword>)?;
    Ok(Json(ForgotPasswordResponse {
        message: "Code accepted".to_string(),
        token: issue_token("reset"),
    })
    .into_response())
}

pub async fn reset_password(body: Result<Json<ResetPasswordRequest>, JsonRejection>) -> Answer {
    let req = decode::<ResetPassword, _>(body, |r| {
        unreadable(ResetPasswordInvalidCode::ValidationError, r)
    })?;
    validation::reset_password(&req).map_err(reject::<ResetPassword>)?;
    if !is_well_formed_token(&req.token) {
        return Err(reject::<ResetPassword>(AuthFailure::refused(
            ResetPasswordRefusedCode::TokenInvalid,
            "Reset token is malformed",
        )));
    }
    Ok(message("Password updated"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_per_category() {
        assert_eq!(status_for(AuthErrorCode::ValidationError), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(AuthErrorCode::CodeInvalid), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(AuthErrorCode::WrongPassword), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(AuthErrorCode::TokenRevoked), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(AuthErrorCode::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(AuthErrorCode::UserDisabled), StatusCode::FORBIDDEN);
        assert_eq!(status_for(AuthErrorCode::EmailAlreadyInUse), StatusCode::CONFLICT);
        assert_eq!(status_for(AuthErrorCode::UserAlreadyVerified), StatusCode::CONFLICT);
        assert_eq!(
            status_for(AuthErrorCode::TooManyRequests),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_for(AuthErrorCode::RateLimitExceeded),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn every_code_maps_to_a_client_error() {
        for code in AuthErrorCode::ALL {
            assert!(status_for(*code).is_client_error(), "{}", code);
        }
    }

    #[test]
    fn issued_tokens_are_well_formed() {
        let token = issue_token("access");
        assert!(token.starts_with("access-"));
        assert!(is_well_formed_token(&token));
        assert_ne!(token, issue_token("access"));
    }
}
