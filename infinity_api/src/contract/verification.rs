//! Email verification: requesting a code and confirming by code or link token.

use serde::{Deserialize, Serialize};

use super::{
    code_subset, request_fields, AuthErrorCode, AuthFailure, MessageResponse, Operation,
    ResendResponse,
};

/// `POST /auth/send-email-verification`
pub struct SendEmailVerification;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SendEmailVerificationRequest {
    pub email: String,
}

request_fields! {
    pub enum SendEmailVerificationField {
        Email => "email",
    }
}

code_subset! {
    pub enum SendEmailVerificationInvalidCode {
        ValidationError,
        InvalidEmail,
    }
}

code_subset! {
    pub enum SendEmailVerificationRefusedCode {
        UserNotFound,
        UserAlreadyVerified,
        TooManyRequests,
        RateLimitExceeded,
    }
}

pub type SendEmailVerificationError = AuthFailure<
    SendEmailVerificationInvalidCode,
    SendEmailVerificationField,
    SendEmailVerificationRefusedCode,
>;

impl Operation for SendEmailVerification {
    const NAME: &'static str = "send-email-verification";
    const PATH: &'static str = "/auth/send-email-verification";
    const ALLOWED_CODES: &'static [AuthErrorCode] = &[
        AuthErrorCode::ValidationError,
        AuthErrorCode::InvalidEmail,
        AuthErrorCode::UserNotFound,
        AuthErrorCode::UserAlreadyVerified,
        AuthErrorCode::TooManyRequests,
        AuthErrorCode::RateLimitExceeded,
    ];

    type Request = SendEmailVerificationRequest;
    type Response = ResendResponse;
    type Error = SendEmailVerificationError;
}

/// `POST /auth/verify-email-by-code`
pub struct VerifyEmailByCode;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyEmailByCodeRequest {
    pub email: String,
    pub code: String,
}

request_fields! {
    pub enum VerifyEmailByCodeField {
        Email => "email",
        Code => "code",
    }
}

code_subset! {
    pub enum VerifyEmailByCodeInvalidCode {
        ValidationError,
        InvalidEmail,
        CodeInvalid,
    }
}

code_subset! {
    pub enum VerifyEmailByCodeRefusedCode {
        UserNotFound,
        TooManyRequests,
        RateLimitExceeded,
    }
}

pub type VerifyEmailByCodeError = AuthFailure<
    VerifyEmailByCodeInvalidCode,
    VerifyEmailByCodeField,
    VerifyEmailByCodeRefusedCode,
>;

impl Operation for VerifyEmailByCode {
    const NAME: &'static str = "verify-email-by-code";
    const PATH: &'static str = "/auth/verify-email-by-code";
    const ALLOWED_CODES: &'static [AuthErrorCode] = &[
        AuthErrorCode::ValidationError,
        AuthErrorCode::InvalidEmail,
        AuthErrorCode::CodeInvalid,
        AuthErrorCode::UserNotFound,
        AuthErrorCode::TooManyRequests,
        AuthErrorCode::RateLimitExceeded,
    ];

    type Request = VerifyEmailByCodeRequest;
    type Response = MessageResponse;
    type Error = VerifyEmailByCodeError;
}

/// `POST /auth/verify-email-by-token`
pub struct VerifyEmailByToken;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyEmailByTokenRequest {
    pub token: String,
}

request_fields! {
    pub enum VerifyEmailByTokenField {
        Token => "token",
    }
}

code_subset! {
    pub enum VerifyEmailByTokenInvalidCode {
        ValidationError,
    }
}

code_subset! {
    pub enum VerifyEmailByTokenRefusedCode {
        TokenInvalid,
        TokenExpired,
        TokenRevoked,
    }
}

pub type VerifyEmailByTokenError = AuthFailure<
    VerifyEmailByTokenInvalidCode,
    VerifyEmailByTokenField,
    VerifyEmailByTokenRefusedCode,
>;

impl Operation for VerifyEmailByToken {
    const NAME: &'static str = "verify-email-by-token";
    const PATH: &'static str = "/auth/verify-email-by-token";
    const ALLOWED_CODES: &'static [AuthErrorCode] = &[
        AuthErrorCode::ValidationError,
        AuthErrorCode::TokenInvalid,
        AuthErrorCode::TokenExpired,
        AuthErrorCode::TokenRevoked,
    ];

    type Request = VerifyEmailByTokenRequest;
    type Response = MessageResponse;
    type Error = VerifyEmailByTokenError;
}
