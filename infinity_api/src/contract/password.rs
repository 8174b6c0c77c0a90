//! Password recovery: request a code, trade it for a reset token, set a new password.

use serde::{Deserialize, Serialize};

use super::{
    code_subset, request_fields, AuthErrorCode, AuthFailure, MessageResponse, Operation,
    ResendResponse,
};

/// `POST /auth/send-forgot-password`
pub struct SendForgotPassword;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SendForgotPasswordRequest {
    pub email: String,
}

request_fields! {
    pub enum SendForgotPasswordField {
        Email => "email",
    }
}

code_subset! {
    pub enum SendForgotPasswordInvalidCode {
        ValidationError,
        InvalidEmail,
    }
}

code_subset! {
    pub enum SendForgotPasswordRefusedCode {
        UserNotFound,
        TooManyRequests,
        RateLimitExceeded,
    }
}

pub type SendForgotPasswordError = AuthFailure<
    SendForgotPasswordInvalidCode,
    SendForgotPasswordField,
    SendForgotPasswordRefusedCode,
>;

impl Operation for SendForgotPassword {
    const NAME: &'static str = "send-forgot-password";
    const PATH: &'static str = "/auth/send-forgot-password";
    const ALLOWED_CODES: &'static [AuthErrorCode] = &[
        AuthErrorCode::ValidationError,
        AuthErrorCode::InvalidEmail,
        AuthErrorCode::UserNotFound,
        AuthErrorCode::TooManyRequests,
        AuthErrorCode::RateLimitExceeded,
    ];

    type Request = SendForgotPasswordRequest;
    type Response = ResendResponse;
    type Error = SendForgotPasswordError;
}

/// `POST /auth/forgot-password`
pub struct ForgotPassword;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ForgotPasswordRequest {
    pub email: String,
    pub code: String,
}

/// Carries the token that authorises the following reset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ForgotPasswordResponse {
    pub message: String,
    pub token: String,
}

request_fields! {
    pub enum ForgotPasswordField {
        Email => "email",
        Code => "code",
    }
}

code_subset! {
    pub enum ForgotPasswordInvalidCode {
        ValidationError,
        InvalidEmail,
        CodeInvalid,
    }
}

code_subset! {
    pub enum ForgotPasswordRefusedCode {
        UserNotFound,
        TooManyRequests,
        RateLimitExceeded,
    }
}

pub type ForgotPasswordError =
    AuthFailure<ForgotPasswordInvalidCode, ForgotPasswordField, ForgotPasswordRefusedCode>;

impl Operation for ForgotPassword {
    const NAME: &'static str = "forgot-password";
    const PATH: &'static str = "/auth/forgot-password";
    const ALLOWED_CODES: &'static [AuthErrorCode] = &[
        AuthErrorCode::ValidationError,
        AuthErrorCode::InvalidEmail,
        AuthErrorCode::CodeInvalid,
        AuthErrorCode::UserNotFound,
        AuthErrorCode::TooManyRequests,
        AuthErrorCode::RateLimitExceeded,
    ];

    type Request = ForgotPasswordRequest;
    type Response = ForgotPasswordResponse;
    type Error = ForgotPasswordError;
}

/// `POST /auth/reset-password`
pub struct ResetPassword;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
    pub password_confirmation: String,
}

request_fields! {
    pub enum ResetPasswordField {
        Token => "token",
        Password => "password",
        PasswordConfirmation => "passwordConfirmation",
    }
}

code_subset! {
    pub enum ResetPasswordInvalidCode {
        ValidationError,
    }
}

code_subset! {
    pub enum ResetPasswordRefusedCode {
        TokenInvalid,
        TokenExpired,
        TokenRevoked,
    }
}

pub type ResetPasswordError =
    AuthFailure<ResetPasswordInvalidCode, ResetPasswordField, ResetPasswordRefusedCode>;

impl Operation for ResetPassword {
    const NAME: &'static str = "reset-password";
    const PATH: &'static str = "/auth/reset-password";
    const ALLOWED_CODES: &'static [AuthErrorCode] = &[
        AuthErrorCode::ValidationError,
        AuthErrorCode::TokenInvalid,
        AuthErrorCode::TokenExpired,
        AuthErrorCode::TokenRevoked,
    ];

    type Request = ResetPasswordRequest;
    type Response = MessageResponse;
    type Error = ResetPasswordError;
}
