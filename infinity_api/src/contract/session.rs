//! Sign in, sign up, sign out, and access token refresh.

use serde::{Deserialize, Serialize};

use crate::types::User;

use super::{
    code_subset, request_fields, AuthErrorCode, AuthFailure, Failure, MessageResponse, Operation,
};

/// `POST /auth/signin`
pub struct SignIn;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SignInResponse {
    pub tokens: Tokens,
    pub user: User,
}

request_fields! {
    pub enum SignInField {
        Email => "email",
        Password => "password",
    }
}

code_subset! {
    pub enum SignInInvalidCode {
        ValidationError,
        InvalidEmail,
        WrongPassword,
        ExpiredPassword,
    }
}

code_subset! {
    pub enum SignInRefusedCode {
        UserDisabled,
        UserNotFound,
        TooManyRequests,
        TwoFactorRequired,
        TokenInvalid,
    }
}

pub type SignInError = AuthFailure<SignInInvalidCode, SignInField, SignInRefusedCode>;

impl Operation for SignIn {
    const NAME: &'static str = "sign-in";
    const PATH: &'static str = "/auth/signin";
    const ALLOWED_CODES: &'static [AuthErrorCode] = &[
        AuthErrorCode::ValidationError,
        AuthErrorCode::InvalidEmail,
        AuthErrorCode::WrongPassword,
        AuthErrorCode::ExpiredPassword,
        AuthErrorCode::UserDisabled,
        AuthErrorCode::UserNotFound,
        AuthErrorCode::TooManyRequests,
        AuthErrorCode::TwoFactorRequired,
        AuthErrorCode::TokenInvalid,
    ];

    type Request = SignInRequest;
    type Response = SignInResponse;
    type Error = SignInError;
}

/// `POST /auth/signup`
pub struct SignUp;

/// Registration form. `birthdate` is an ISO-8601 date string and `gender`
/// one of `male`, `female`, `other`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub mobile_number: String,
    pub birthdate: String,
    pub gender: String,
    pub accept_terms: bool,
}

request_fields! {
    pub enum SignUpField {
        FirstName => "firstName",
        LastName => "lastName",
        MiddleName => "middleName",
        Username => "username",
        Email => "email",
        Password => "password",
        PasswordConfirmation => "passwordConfirmation",
        MobileNumber => "mobileNumber",
        Birthdate => "birthdate",
        Gender => "gender",
        AcceptTerms => "acceptTerms",
    }
}

code_subset! {
    pub enum SignUpInvalidCode {
        ValidationError,
        EmailAlreadyInUse,
        WeakPassword,
        InvalidEmail,
        PasswordMismatch,
        TermsNotAccepted,
    }
}

code_subset! {
    pub enum SignUpRefusedCode {
        RateLimitExceeded,
    }
}

pub type SignUpError = AuthFailure<SignUpInvalidCode, SignUpField, SignUpRefusedCode>;

impl Operation for SignUp {
    const NAME: &'static str = "sign-up";
    const PATH: &'static str = "/auth/signup";
    const ALLOWED_CODES: &'static [AuthErrorCode] = &[
        AuthErrorCode::ValidationError,
        AuthErrorCode::EmailAlreadyInUse,
        AuthErrorCode::WeakPassword,
        AuthErrorCode::InvalidEmail,
        AuthErrorCode::PasswordMismatch,
        AuthErrorCode::TermsNotAccepted,
        AuthErrorCode::RateLimitExceeded,
    ];

    type Request = SignUpRequest;
    type Response = MessageResponse;
    type Error = SignUpError;
}

/// `POST /auth/signout`
pub struct SignOut;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SignOutRequest {
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

code_subset! {
    pub enum SignOutCode {
        TokenInvalid,
        TokenRevoked,
    }
}

impl Operation for SignOut {
    const NAME: &'static str = "sign-out";
    const PATH: &'static str = "/auth/signout";
    const ALLOWED_CODES: &'static [AuthErrorCode] =
        &[AuthErrorCode::TokenInvalid, AuthErrorCode::TokenRevoked];

    type Request = SignOutRequest;
    type Response = MessageResponse;
    type Error = Failure<SignOutCode>;
}

/// `POST /auth/refresh`
pub struct RefreshToken;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

code_subset! {
    pub enum RefreshTokenCode {
        TokenExpired,
        InvalidToken,
        TokenRevoked,
        UserNotFound,
        TokenBlacklisted,
        InvalidSignature,
        RateLimitExceeded,
    }
}

impl Operation for RefreshToken {
    const NAME: &'static str = "refresh-token";
    const PATH: &'static str = "/auth/refresh";
    const ALLOWED_CODES: &'static [AuthErrorCode] = &[
        AuthErrorCode::TokenExpired,
        AuthErrorCode::InvalidToken,
        AuthErrorCode::TokenRevoked,
        AuthErrorCode::UserNotFound,
        AuthErrorCode::TokenBlacklisted,
        AuthErrorCode::InvalidSignature,
        AuthErrorCode::RateLimitExceeded,
    ];

    type Request = RefreshTokenRequest;
    type Response = RefreshTokenResponse;
    type Error = Failure<RefreshTokenCode>;
}
