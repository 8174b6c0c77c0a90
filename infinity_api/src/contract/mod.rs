//! Typed contract for the auth API.
//!
//! Each operation is a marker type implementing [`Operation`], which ties
//! together its endpoint, request body, success body, and the closed set of
//! failures the server may answer with. Failures are split the same way the
//! server splits them: [`FieldFailure`] carries a per-field error map and is
//! only used for input problems, [`Failure`] carries a message and nothing
//! else. Callers therefore cannot reach for a field map on a failure that
//! never has one.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

mod codes;
pub(crate) use self::codes::code_subset;
pub use self::codes::{AuthErrorCode, CodeNotAllowed, ErrorCategory};

mod session;
pub use self::session::{
    RefreshToken, RefreshTokenCode, RefreshTokenRequest, RefreshTokenResponse, SignIn,
    SignInError, SignInField, SignInInvalidCode, SignInRefusedCode, SignInRequest,
    SignInResponse, SignOut, SignOutCode, SignOutRequest, SignUp, SignUpError, SignUpField,
    SignUpInvalidCode, SignUpRefusedCode, SignUpRequest, Tokens,
};

mod verification;
pub use self::verification::{
    SendEmailVerification, SendEmailVerificationError, SendEmailVerificationField,
    SendEmailVerificationInvalidCode, SendEmailVerificationRefusedCode,
    SendEmailVerificationRequest, VerifyEmailByCode, VerifyEmailByCodeError,
    VerifyEmailByCodeField, VerifyEmailByCodeInvalidCode, VerifyEmailByCodeRefusedCode,
    VerifyEmailByCodeRequest, VerifyEmailByToken, VerifyEmailByTokenError,
    VerifyEmailByTokenField, VerifyEmailByTokenInvalidCode, VerifyEmailByTokenRefusedCode,
    VerifyEmailByTokenRequest,
};

mod password;
pub use self::password::{
    ForgotPassword, ForgotPasswordError, ForgotPasswordField, ForgotPasswordInvalidCode,
    ForgotPasswordRefusedCode, ForgotPasswordRequest, ForgotPasswordResponse, ResetPassword,
    ResetPasswordError, ResetPasswordField, ResetPasswordInvalidCode, ResetPasswordRefusedCode,
    ResetPasswordRequest, SendForgotPassword, SendForgotPasswordError, SendForgotPasswordField,
    SendForgotPasswordInvalidCode, SendForgotPasswordRefusedCode, SendForgotPasswordRequest,
};

/// One API action: where it is sent and every shape that can come back.
pub trait Operation {
    /// Stable identifier, e.g. `sign-in`.
    const NAME: &'static str;
    /// Endpoint path, relative to the API base URL.
    const PATH: &'static str;
    /// Every code the server may answer with, as declared by the API.
    const ALLOWED_CODES: &'static [AuthErrorCode];

    type Request: Serialize + DeserializeOwned + fmt::Debug;
    type Response: Serialize + DeserializeOwned + fmt::Debug;
    type Error: OperationError;
}

/// A failure body belonging to one operation.
pub trait OperationError: Serialize + DeserializeOwned + fmt::Debug + fmt::Display {
    /// The code the server sent.
    fn code(&self) -> AuthErrorCode;
    /// The human-readable message (may be empty).
    fn message(&self) -> &str;
    /// `(field name, message)` pairs; empty for message-only failures.
    fn field_messages(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }
}

/// Names of the fields of one request type, used as field-error map keys.
pub trait RequestField: Copy + Ord + Serialize + DeserializeOwned + fmt::Debug + 'static {
    const ALL: &'static [Self];
    /// The wire name of the field.
    fn name(&self) -> &'static str;
}

/// Declares a request's field-name enum. Each variant is paired with its wire name.
macro_rules! request_fields {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd,
            Ord, Hash
        )]
        $vis enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl crate::contract::RequestField for $name {
            const ALL: &'static [$name] = &[$($name::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", crate::contract::RequestField::name(self))
            }
        }
    };
}
pub(crate) use request_fields;

/// Per-field error messages. Never empty once decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord>(BTreeMap<F, String>);

impl<F: Ord> FieldErrors<F> {
    /// Builds a map with a single entry.
    pub fn single(field: F, message: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(field, message.into());
        Self(map)
    }

    /// Returns `None` when `map` is empty.
    pub fn from_map(map: BTreeMap<F, String>) -> Option<Self> {
        if map.is_empty() {
            None
        } else {
            Some(Self(map))
        }
    }

    pub fn get(&self, field: &F) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &F) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a decoded map; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&F, &str)> {
        self.0.iter().map(|(field, msg)| (field, msg.as_str()))
    }
}

impl<F: RequestField> FieldErrors<F> {
    /// The same message for every field of the request. Never empty, since
    /// `request_fields!` declares at least one field.
    pub fn every(message: &str) -> Self {
        Self(F::ALL.iter().map(|f| (*f, message.to_string())).collect())
    }
}

impl<F: Ord + Serialize> Serialize for FieldErrors<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, F: Ord + Deserialize<'de>> Deserialize<'de> for FieldErrors<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<F, String>::deserialize(deserializer)?;
        FieldErrors::from_map(map)
            .ok_or_else(|| serde::de::Error::custom("field error map must not be empty"))
    }
}

/// A failure caused by the request's input, with messages per field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldFailure<C, F: Ord> {
    pub error_code: C,
    #[serde(default)]
    pub message: String,
    pub errors: FieldErrors<F>,
}

/// A failure that carries only a message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Failure<C> {
    pub error_code: C,
    pub message: String,
}

/// Failure body for operations that have both an input-error group and a
/// message-only group.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AuthFailure<V, F: Ord, C> {
    /// The input was rejected; see the field map.
    Invalid(FieldFailure<V, F>),
    /// The input was well formed but the server refused the request.
    Refused(Failure<C>),
}

impl<C: Copy + Into<AuthErrorCode>> fmt::Display for Failure<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_failure(f, self.error_code.into(), &self.message)
    }
}

impl<C: Copy + Into<AuthErrorCode>, F: Ord> fmt::Display for FieldFailure<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_failure(f, self.error_code.into(), &self.message)
    }
}

impl<V, F, C> fmt::Display for AuthFailure<V, F, C>
where
    V: Copy + Into<AuthErrorCode>,
    F: Ord,
    C: Copy + Into<AuthErrorCode>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(failure) => failure.fmt(f),
            Self::Refused(failure) => failure.fmt(f),
        }
    }
}

fn write_failure(f: &mut fmt::Formatter<'_>, code: AuthErrorCode, message: &str) -> fmt::Result {
    if message.is_empty() {
        write!(f, "{}", code)
    } else {
        write!(f, "{} ({})", message, code)
    }
}

impl<C> OperationError for Failure<C>
where
    C: Copy + Into<AuthErrorCode> + Serialize + DeserializeOwned + fmt::Debug,
{
    fn code(&self) -> AuthErrorCode {
        self.error_code.into()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

impl<V, F, C> OperationError for AuthFailure<V, F, C>
where
    V: Copy + Into<AuthErrorCode> + Serialize + DeserializeOwned + fmt::Debug,
    F: RequestField,
    C: Copy + Into<AuthErrorCode> + Serialize + DeserializeOwned + fmt::Debug,
{
    fn code(&self) -> AuthErrorCode {
        match self {
            Self::Invalid(failure) => failure.error_code.into(),
            Self::Refused(failure) => failure.error_code.into(),
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Invalid(failure) => &failure.message,
            Self::Refused(failure) => &failure.message,
        }
    }

    fn field_messages(&self) -> Vec<(&'static str, &str)> {
        self.field_errors()
            .map(|errors| errors.iter().map(|(f, msg)| (f.name(), msg)).collect())
            .unwrap_or_default()
    }
}

impl<V, F: Ord, C> AuthFailure<V, F, C> {
    /// Shorthand for an input failure.
    pub fn invalid(error_code: V, message: impl Into<String>, errors: FieldErrors<F>) -> Self {
        Self::Invalid(FieldFailure {
            error_code,
            message: message.into(),
            errors,
        })
    }

    /// Shorthand for a message-only failure.
    pub fn refused(error_code: C, message: impl Into<String>) -> Self {
        Self::Refused(Failure {
            error_code,
            message: message.into(),
        })
    }

    /// The field map, when the failure has one.
    pub fn field_errors(&self) -> Option<&FieldErrors<F>> {
        match self {
            Self::Invalid(failure) => Some(&failure.errors),
            Self::Refused(_) => None,
        }
    }
}

impl<C> Failure<C> {
    pub fn new(error_code: C, message: impl Into<String>) -> Self {
        Self {
            error_code,
            message: message.into(),
        }
    }
}

/// Plain acknowledgement body shared by several operations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Absolute instant before which a resend will be refused.
///
/// Sent as Unix epoch milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RetryAfter(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>);

impl RetryAfter {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// `now + cooldown`, truncated to whole milliseconds as on the wire.
    pub fn after(now: DateTime<Utc>, cooldown: Duration) -> Self {
        let cooldown = chrono::Duration::from_std(cooldown).unwrap_or(chrono::Duration::zero());
        let millis = (now + cooldown).timestamp_millis();
        Self(DateTime::from_timestamp_millis(millis).unwrap_or(now))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Time left until a retry is allowed, or zero once it has passed.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.0 - now).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Success body for the resend operations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResendResponse {
    pub message: String,
    pub retry_after: RetryAfter,
}
