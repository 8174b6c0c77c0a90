//! The global error code set and the per-operation subsets drawn from it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every error code the auth API can send. Wire values are `auth/`-prefixed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AuthErrorCode {
    // Validation
    #[serde(rename = "auth/validation-error")]
    ValidationError,
    #[serde(rename = "auth/invalid-email")]
    InvalidEmail,
    #[serde(rename = "auth/weak-password")]
    WeakPassword,
    #[serde(rename = "auth/password-mismatch")]
    PasswordMismatch,
    #[serde(rename = "auth/terms-not-accepted")]
    TermsNotAccepted,

    // Authentication
    #[serde(rename = "auth/wrong-password")]
    WrongPassword,
    #[serde(rename = "auth/expired-password")]
    ExpiredPassword,
    #[serde(rename = "auth/two-factor-required")]
    TwoFactorRequired,

    // Token
    #[serde(rename = "auth/token-missing")]
    TokenMissing,
    #[serde(rename = "auth/token-invalid")]
    TokenInvalid,
    #[serde(rename = "auth/token-expired")]
    TokenExpired,
    #[serde(rename = "auth/invalid-token")]
    InvalidToken,
    #[serde(rename = "auth/token-revoked")]
    TokenRevoked,
    #[serde(rename = "auth/token-blacklisted")]
    TokenBlacklisted,
    #[serde(rename = "auth/invalid-signature")]
    InvalidSignature,

    // Verification
    #[serde(rename = "auth/code-invalid")]
    CodeInvalid,

    // User state
    #[serde(rename = "auth/user-disabled")]
    UserDisabled,
    #[serde(rename = "auth/user-not-found")]
    UserNotFound,
    #[serde(rename = "auth/email-already-in-use")]
    EmailAlreadyInUse,
    #[serde(rename = "auth/user-already-verified")]
    UserAlreadyVerified,

    // Rate limiting
    #[serde(rename = "auth/too-many-requests")]
    TooManyRequests,
    #[serde(rename = "auth/rate-limit-exceeded")]
    RateLimitExceeded,
}

/// Documentation grouping for error codes. Nothing enforces it structurally.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    Validation,
    Authentication,
    Token,
    Verification,
    User,
    RateLimiting,
}

impl AuthErrorCode {
    /// All codes, in declaration order.
    pub const ALL: &'static [AuthErrorCode] = &[
        AuthErrorCode::ValidationError,
        AuthErrorCode::InvalidEmail,
        AuthErrorCode::WeakPassword,
        AuthErrorCode::PasswordMismatch,
        AuthErrorCode::TermsNotAccepted,
        AuthErrorCode::WrongPassword,
        AuthErrorCode::ExpiredPassword,
        AuthErrorCode::TwoFactorRequired,
        AuthErrorCode::TokenMissing,
        AuthErrorCode::TokenInvalid,
        AuthErrorCode::TokenExpired,
        AuthErrorCode::InvalidToken,
        AuthErrorCode::TokenRevoked,
        AuthErrorCode::TokenBlacklisted,
        AuthErrorCode::InvalidSignature,
        AuthErrorCode::CodeInvalid,
        AuthErrorCode::UserDisabled,
        AuthErrorCode::UserNotFound,
        AuthErrorCode::EmailAlreadyInUse,
        AuthErrorCode::UserAlreadyVerified,
        AuthErrorCode::TooManyRequests,
        AuthErrorCode::RateLimitExceeded,
    ];

    /// The wire value, e.g. `auth/wrong-password`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorCode::ValidationError => "auth/validation-error",
            AuthErrorCode::InvalidEmail => "auth/invalid-email",
            AuthErrorCode::WeakPassword => "auth/weak-password",
            AuthErrorCode::PasswordMismatch => "auth/password-mismatch",
            AuthErrorCode::TermsNotAccepted => "auth/terms-not-accepted",
            AuthErrorCode::WrongPassword => "auth/wrong-password",
            AuthErrorCode::ExpiredPassword => "auth/expired-password",
            AuthErrorCode::TwoFactorRequired => "auth/two-factor-required",
            AuthErrorCode::TokenMissing => "auth/token-missing",
            AuthErrorCode::TokenInvalid => "auth/token-invalid",
            AuthErrorCode::TokenExpired => "auth/token-expired",
            AuthErrorCode::InvalidToken => "auth/invalid-token",
            AuthErrorCode::TokenRevoked => "auth/token-revoked",
            AuthErrorCode::TokenBlacklisted => "auth/token-blacklisted",
            AuthErrorCode::InvalidSignature => "auth/invalid-signature",
            AuthErrorCode::CodeInvalid => "auth/code-invalid",
            AuthErrorCode::UserDisabled => "auth/user-disabled",
            AuthErrorCode::UserNotFound => "auth/user-not-found",
            AuthErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthErrorCode::UserAlreadyVerified => "auth/user-already-verified",
            AuthErrorCode::TooManyRequests => "auth/too-many-requests",
            AuthErrorCode::RateLimitExceeded => "auth/rate-limit-exceeded",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AuthErrorCode::ValidationError
            | AuthErrorCode::InvalidEmail
            | AuthErrorCode::WeakPassword
            | AuthErrorCode::PasswordMismatch
            | AuthErrorCode::TermsNotAccepted => ErrorCategory::Validation,
            AuthErrorCode::WrongPassword
            | AuthErrorCode::ExpiredPassword
            | AuthErrorCode::TwoFactorRequired => ErrorCategory::Authentication,
            AuthErrorCode::TokenMissing
            | AuthErrorCode::TokenInvalid
            | AuthErrorCode::TokenExpired
            | AuthErrorCode::InvalidToken
            | AuthErrorCode::TokenRevoked
            | AuthErrorCode::TokenBlacklisted
            | AuthErrorCode::InvalidSignature => ErrorCategory::Token,
            AuthErrorCode::CodeInvalid => ErrorCategory::Verification,
            AuthErrorCode::UserDisabled
            | AuthErrorCode::UserNotFound
            | AuthErrorCode::EmailAlreadyInUse
            | AuthErrorCode::UserAlreadyVerified => ErrorCategory::User,
            AuthErrorCode::TooManyRequests | AuthErrorCode::RateLimitExceeded => {
                ErrorCategory::RateLimiting
            }
        }
    }
}

impl std::fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthErrorCode::ALL
            .iter()
            .find(|code| code.as_str() == s)
            .copied()
            .ok_or(())
    }
}

/// A known code arrived for an operation that does not allow it.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("error code {0} is not allowed for this operation")]
pub struct CodeNotAllowed(pub AuthErrorCode);

/// Declares a closed subset of [`AuthErrorCode`].
///
/// Variant names must match `AuthErrorCode` variants. The generated enum
/// (de)serializes through `AuthErrorCode`, so a code outside the subset fails
/// to decode instead of being silently accepted.
macro_rules! code_subset {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[serde(
            try_from = "crate::contract::AuthErrorCode",
            into = "crate::contract::AuthErrorCode"
        )]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl From<$name> for crate::contract::AuthErrorCode {
            fn from(code: $name) -> Self {
                match code {
                    $($name::$variant => crate::contract::AuthErrorCode::$variant),+
                }
            }
        }

        impl TryFrom<crate::contract::AuthErrorCode> for $name {
            type Error = crate::contract::CodeNotAllowed;

            #[allow(unreachable_patterns)]
            fn try_from(code: crate::contract::AuthErrorCode) -> Result<Self, Self::Error> {
                match code {
                    $(crate::contract::AuthErrorCode::$variant => Ok($name::$variant),)+
                    other => Err(crate::contract::CodeNotAllowed(other)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", crate::contract::AuthErrorCode::from(*self))
            }
        }
    };
}
pub(crate) use code_subset;
