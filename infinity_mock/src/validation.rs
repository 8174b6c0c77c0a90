//! Input checks for the mock auth endpoints.
//!
//! Field validators return the cleaned value or a message suitable for a
//! field-error map. The per-operation functions combine them into the
//! operation's input failure, naming only the offending fields. Missing
//! fields are checked before formats, and the first problem found decides
//! the failure's code.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use infinity_api::contract::{
    AuthFailure, FieldErrors, ForgotPasswordError, ForgotPasswordField, ForgotPasswordInvalidCode,
    ForgotPasswordRequest, ResetPasswordError, ResetPasswordField, ResetPasswordInvalidCode,
    ResetPasswordRequest, SendEmailVerificationError, SendEmailVerificationField,
    SendEmailVerificationInvalidCode, SendEmailVerificationRequest, SendForgotPasswordError,
    SendForgotPasswordField, SendForgotPasswordInvalidCode, SendForgotPasswordRequest,
    SignInError, SignInField, SignInInvalidCode, SignInRequest, SignUpError, SignUpField,
    SignUpInvalidCode, SignUpRequest, VerifyEmailByCodeError, VerifyEmailByCodeField,
    VerifyEmailByCodeInvalidCode, VerifyEmailByCodeRequest, VerifyEmailByTokenError,
    VerifyEmailByTokenField, VerifyEmailByTokenInvalidCode, VerifyEmailByTokenRequest,
};
use infinity_api::types::Gender;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const VERIFICATION_CODE_LENGTH: usize = 6;
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Message attached to every input failure.
pub const INVALID_INPUT_MESSAGE: &str = "Please correct the highlighted fields";

/// Validate an email address: one `@`, a non-empty local part, and a dotted
/// domain, with no whitespace.
pub fn validate_email(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(format!(
            "Email must be at most {} characters",
            MAX_EMAIL_LENGTH
        ));
    }
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains("..")
                && !trimmed.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(trimmed.to_string())
    } else {
        Err(format!("'{}' is not a valid email address", trimmed))
    }
}

/// Validate a new password's length, counted in characters.
pub fn validate_password(input: &str) -> Result<(), String> {
    if input.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}

/// Validate a verification code: exactly six ASCII digits.
pub fn validate_code(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.len() == VERIFICATION_CODE_LENGTH && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Ok(trimmed.to_string())
    } else {
        Err(format!(
            "Code must be exactly {} digits",
            VERIFICATION_CODE_LENGTH
        ))
    }
}

/// Validate a birthdate: `YYYY-MM-DD` or an RFC 3339 timestamp, not in the future.
pub fn validate_birthdate(input: &str) -> Result<NaiveDate, String> {
    let trimmed = input.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .ok_or_else(|| {
            format!(
                "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 1990-06-01)",
                trimmed
            )
        })?;
    if date > Utc::now().date_naive() {
        return Err("Birthdate cannot be in the future".to_string());
    }
    Ok(date)
}

/// Validate a gender string, case-insensitively.
pub fn validate_gender(input: &str) -> Result<Gender, String> {
    input
        .trim()
        .to_lowercase()
        .parse::<Gender>()
        .map_err(|_| format!("unknown gender '{}'. Valid: male, female, other", input))
}

/// Whether a token looks like one this server could have issued: non-empty
/// visible ASCII.
pub fn is_well_formed_token(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_graphic())
}

/// Collects field problems for one request.
struct Checks<C, F> {
    code: Option<C>,
    errors: BTreeMap<F, String>,
}

impl<C: Copy, F: Ord> Checks<C, F> {
    fn new() -> Self {
        Self {
            code: None,
            errors: BTreeMap::new(),
        }
    }

    /// Records a problem. The first code recorded wins, and so does the
    /// first message for a field.
    fn flag(&mut self, field: F, code: C, message: impl Into<String>) {
        self.code.get_or_insert(code);
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Flags `field` when blank. Returns whether it was present.
    fn require(&mut self, field: F, value: &str, code: C, label: &str) -> bool {
        if value.trim().is_empty() {
            self.flag(field, code, format!("{} is required", label));
            false
        } else {
            true
        }
    }

    fn has(&self, field: &F) -> bool {
        self.errors.contains_key(field)
    }

    fn finish<R>(self) -> Result<(), AuthFailure<C, F, R>> {
        match (self.code, FieldErrors::from_map(self.errors)) {
            (Some(code), Some(errors)) => {
                Err(AuthFailure::invalid(code, INVALID_INPUT_MESSAGE, errors))
            }
            _ => Ok(()),
        }
    }
}

pub fn sign_in(req: &SignInRequest) -> Result<(), SignInError> {
    use SignInField as F;
    use SignInInvalidCode as C;

    let mut checks = Checks::new();
    checks.require(F::Email, &req.email, C::ValidationError, "Email");
    checks.require(F::Password, &req.password, C::ValidationError, "Password");
    if !checks.has(&F::Email) {
        if let Err(msg) = validate_email(&req.email) {
            checks.flag(F::Email, C::InvalidEmail, msg);
        }
    }
    checks.finish()
}

pub fn sign_up(req: &SignUpRequest) -> Result<(), SignUpError> {
    use SignUpField as F;
    use SignUpInvalidCode as C;

    let mut checks = Checks::new();
    let required = [
        (F::FirstName, req.first_name.as_str(), "First name"),
        (F::LastName, req.last_name.as_str(), "Last name"),
        (F::Username, req.username.as_str(), "Username"),
        (F::Email, req.email.as_str(), "Email"),
        (F::Password, req.password.as_str(), "Password"),
        (
            F::PasswordConfirmation,
            req.password_confirmation.as_str(),
            "Password confirmation",
        ),
        (F::MobileNumber, req.mobile_number.as_str(), "Mobile number"),
        (F::Birthdate, req.birthdate.as_str(), "Birthdate"),
        (F::Gender, req.gender.as_str(), "Gender"),
    ];
    for (field, value, label) in required {
        checks.require(field, value, C::ValidationError, label);
    }

    if !checks.has(&F::Email) {
        if let Err(msg) = validate_email(&req.email) {
            checks.flag(F::Email, C::InvalidEmail, msg);
        }
    }
    if !checks.has(&F::Password) {
        if let Err(msg) = validate_password(&req.password) {
            checks.flag(F::Password, C::WeakPassword, msg);
        }
    }
    if !checks.has(&F::Password)
        && !checks.has(&F::PasswordConfirmation)
        && req.password != req.password_confirmation
    {
        checks.flag(
            F::PasswordConfirmation,
            C::PasswordMismatch,
            "Passwords do not match",
        );
    }
    if !checks.has(&F::Birthdate) {
        if let Err(msg) = validate_birthdate(&req.birthdate) {
            checks.flag(F::Birthdate, C::ValidationError, msg);
        }
    }
    if !checks.has(&F::Gender) {
        if let Err(msg) = validate_gender(&req.gender) {
            checks.flag(F::Gender, C::ValidationError, msg);
        }
    }
    if !req.accept_terms {
        checks.flag(
            F::AcceptTerms,
            C::TermsNotAccepted,
            "You must accept the terms and conditions",
        );
    }
    checks.finish()
}

pub fn send_email_verification(
    req: &SendEmailVerificationRequest,
) -> Result<(), SendEmailVerificationError> {
    use SendEmailVerificationField as F;
    use SendEmailVerificationInvalidCode as C;

    let mut checks = Checks::new();
    if checks.require(F::Email, &req.email, C::ValidationError, "Email") {
        if let Err(msg) = validate_email(&req.email) {
            checks.flag(F::Email, C::InvalidEmail, msg);
        }
    }
    checks.finish()
}

pub fn verify_email_by_code(req: &VerifyEmailByCodeRequest) -> Result<(), VerifyEmailByCodeError> {
    use VerifyEmailByCodeField as F;
    use VerifyEmailByCodeInvalidCode as C;

    let mut checks = Checks::new();
    let has_email = checks.require(F::Email, &req.email, C::ValidationError, "Email");
    let has_code = checks.require(F::Code, &req.code, C::ValidationError, "Code");
    if has_email {
        if let Err(msg) = validate_email(&req.email) {
            checks.flag(F::Email, C::InvalidEmail, msg);
        }
    }
    if has_code {
        if let Err(msg) = validate_code(&req.code) {
            checks.flag(F::Code, C::CodeInvalid, msg);
        }
    }
    checks.finish()
}

pub fn verify_email_by_token(
    req: &VerifyEmailByTokenRequest,
) -> Result<(), VerifyEmailByTokenError> {
    let mut checks = Checks::new();
    checks.require(
        VerifyEmailByTokenField::Token,
        &req.token,
        VerifyEmailByTokenInvalidCode::ValidationError,
        "Token",
    );
    checks.finish()
}

pub fn send_forgot_password(req: &SendForgotPasswordRequest) -> Result<(), SendForgotPasswordError> {
    use SendForgotPasswordField as F;
    use SendForgotPasswordInvalidCode as C;

    let mut checks = Checks::new();
    if checks.require(F::Email, &req.email, C::ValidationError, "Email") {
        if let Err(msg) = validate_email(&req.email) {
            checks.flag(F::Email, C::InvalidEmail, msg);
        }
    }
    checks.finish()
}

pub fn forgot_password(req: &ForgotPasswordRequest) -> Result<(), ForgotPasswordError> {
    use ForgotPasswordField as F;
    use ForgotPasswordInvalidCode as C;

    let mut checks = Checks::new();
    let has_email = checks.require(F::Email, &req.email, C::ValidationError, "Email");
    let has_code = checks.require(F::Code, &req.code, C::ValidationError, "Code");
    if has_email {
        if let Err(msg) = validate_email(&req.email) {
            checks.flag(F::Email, C::InvalidEmail, msg);
        }
    }
    if has_code {
        if let Err(msg) = validate_code(&req.code) {
            checks.flag(F::Code, C::CodeInvalid, msg);
        }
    }
    checks.finish()
}

/// Reset-password has no dedicated codes for weak or mismatched passwords,
/// so both are reported as `validation-error`.
pub fn reset_password(req: &ResetPasswordRequest) -> Result<(), ResetPasswordError> {
    use ResetPasswordField as F;
    use ResetPasswordInvalidCode as C;

    let mut checks = Checks::new();
    checks.require(F::Token, &req.token, C::ValidationError, "Token");
    let has_password = checks.require(F::Password, &req.password, C::ValidationError, "Password");
    let has_confirmation = checks.require(
        F::PasswordConfirmation,
        &req.password_confirmation,
        C::ValidationError,
        "Password confirmation",
    );
    if has_password {
        if let Err(msg) = validate_password(&req.password) {
            checks.flag(F::Password, C::ValidationError, msg);
        }
    }
    if has_password && has_confirmation && req.password != req.password_confirmation {
        checks.flag(
            F::PasswordConfirmation,
            C::ValidationError,
            "Passwords do not match",
        );
    }
    checks.finish()
}
