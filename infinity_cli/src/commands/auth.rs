use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use infinity_api::contract::{
    ForgotPassword, ForgotPasswordRequest, MessageResponse, Operation, OperationError,
    RefreshToken, RefreshTokenRequest, ResendResponse, ResetPassword, ResetPasswordRequest,
    SendEmailVerification, SendEmailVerificationRequest, SendForgotPassword,
    SendForgotPasswordRequest, SignIn, SignInRequest, SignOut, SignOutRequest, SignUp,
    SignUpRequest, VerifyEmailByCode, VerifyEmailByCodeRequest, VerifyEmailByToken,
    VerifyEmailByTokenRequest,
};
use infinity_api::{ApiError, Client};

use crate::output::{print_field_errors, print_json, print_key_values, OutputFormat};

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Exchange credentials for a token pair
    SignIn(SignInArgs),
    /// Register a new account
    SignUp(Box<SignUpArgs>),
    /// Revoke a refresh token
    SignOut(SignOutArgs),
    /// Trade a refresh token for a new access token
    Refresh(RefreshArgs),
    /// Email a verification code
    SendEmailVerification(EmailArgs),
    /// Confirm an email with the emailed code
    VerifyEmailByCode(EmailCodeArgs),
    /// Confirm an email with the link token
    VerifyEmailByToken(TokenArgs),
    /// Email a password recovery code
    SendForgotPassword(EmailArgs),
    /// Trade a recovery code for a reset token
    ForgotPassword(EmailCodeArgs),
    /// Set a new password with a reset token
    ResetPassword(ResetPasswordArgs),
}

#[derive(Args)]
pub struct SignInArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Args)]
pub struct SignUpArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub middle_name: Option<String>,

    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    /// Defaults to --password
    #[arg(long)]
    pub password_confirmation: Option<String>,

    #[arg(long)]
    pub mobile_number: String,

    /// Date of birth as YYYY-MM-DD
    #[arg(long)]
    pub birthdate: String,

    /// male, female, or other
    #[arg(long)]
    pub gender: String,

    /// Accept the terms of service
    #[arg(long)]
    pub accept_terms: bool,
}

#[derive(Args)]
pub struct SignOutArgs {
    #[arg(long)]
    pub refresh_token: String,

    /// Access token to revoke alongside the refresh token
    #[arg(long = "revoke-access-token")]
    pub access_token: Option<String>,
}

#[derive(Args)]
pub struct RefreshArgs {
    #[arg(long)]
    pub refresh_token: String,
}

#[derive(Args)]
pub struct EmailArgs {
    #[arg(long)]
    pub email: String,
}

#[derive(Args)]
pub struct EmailCodeArgs {
    #[arg(long)]
    pub email: String,

    /// Six-digit code from the email
    #[arg(long)]
    pub code: String,
}

#[derive(Args)]
pub struct TokenArgs {
    #[arg(long)]
    pub token: String,
}

#[derive(Args)]
pub struct ResetPasswordArgs {
    /// Reset token returned by forgot-password
    #[arg(long)]
    pub token: String,

    #[arg(long)]
    pub password: String,

    /// Defaults to --password
    #[arg(long)]
    pub password_confirmation: Option<String>,
}

pub async fn run(cmd: &AuthCommand, client: &Client, format: &OutputFormat) -> Result<()> {
    match cmd {
        AuthCommand::SignIn(args) => {
            let req = SignInRequest {
                email: args.email.clone(),
                password: args.password.clone(),
            };
            finish::<SignIn>(client.sign_in(&req).await, format, |r| {
                vec![
                    ("user", format!("{} (@{})", r.user.display_name(), r.user.username)),
                    ("accessToken", r.tokens.access_token.clone()),
                    ("refreshToken", r.tokens.refresh_token.clone()),
                ]
            })
        }
        AuthCommand::SignUp(args) => {
            let req = SignUpRequest {
                first_name: args.first_name.clone(),
                last_name: args.last_name.clone(),
                middle_name: args.middle_name.clone(),
                username: args.username.clone(),
                email: args.email.clone(),
                password: args.password.clone(),
                password_confirmation: args
                    .password_confirmation
                    .clone()
                    .unwrap_or_else(|| args.password.clone()),
                mobile_number: args.mobile_number.clone(),
                birthdate: args.birthdate.clone(),
                gender: args.gender.clone(),
                accept_terms: args.accept_terms,
            };
            finish::<SignUp>(client.sign_up(&req).await, format, message_rows)
        }
        AuthCommand::SignOut(args) => {
            let req = SignOutRequest {
                refresh_token: args.refresh_token.clone(),
                access_token: args.access_token.clone(),
            };
            finish::<SignOut>(client.sign_out(&req).await, format, message_rows)
        }
        AuthCommand::Refresh(args) => {
            let req = RefreshTokenRequest {
                refresh_token: args.refresh_token.clone(),
            };
            finish::<RefreshToken>(client.refresh_token(&req).await, format, |r| {
                vec![("accessToken", r.access_token.clone())]
            })
        }
        AuthCommand::SendEmailVerification(args) => {
            let req = SendEmailVerificationRequest {
                email: args.email.clone(),
            };
            finish::<SendEmailVerification>(
                client.send_email_verification(&req).await,
                format,
                resend_rows,
            )
        }
        AuthCommand::VerifyEmailByCode(args) => {
            let req = VerifyEmailByCodeRequest {
                email: args.email.clone(),
                code: args.code.clone(),
            };
            finish::<VerifyEmailByCode>(
                client.verify_email_by_code(&req).await,
                format,
                message_rows,
            )
        }
        AuthCommand::VerifyEmailByToken(args) => {
            let req = VerifyEmailByTokenRequest {
                token: args.token.clone(),
            };
            finish::<VerifyEmailByToken>(
                client.verify_email_by_token(&req).await,
                format,
                message_rows,
            )
        }
        AuthCommand::SendForgotPassword(args) => {
            let req = SendForgotPasswordRequest {
                email: args.email.clone(),
            };
            finish::<SendForgotPassword>(
                client.send_forgot_password(&req).await,
                format,
                resend_rows,
            )
        }
        AuthCommand::ForgotPassword(args) => {
            let req = ForgotPasswordRequest {
                email: args.email.clone(),
                code: args.code.clone(),
            };
            finish::<ForgotPassword>(client.forgot_password(&req).await, format, |r| {
                vec![("message", r.message.clone()), ("token", r.token.clone())]
            })
        }
        AuthCommand::ResetPassword(args) => {
            let req = ResetPasswordRequest {
                token: args.token.clone(),
                password: args.password.clone(),
                password_confirmation: args
                    .password_confirmation
                    .clone()
                    .unwrap_or_else(|| args.password.clone()),
            };
            finish::<ResetPassword>(client.reset_password(&req).await, format, message_rows)
        }
    }
}

/// Prints the outcome of an auth call. Declared failures are printed like a
/// response and then returned as an error so the process exits non-zero.
fn finish<O: Operation>(
    result: Result<O::Response, ApiError<O::Error>>,
    format: &OutputFormat,
    rows: impl Fn(&O::Response) -> Vec<(&'static str, String)>,
) -> Result<()> {
    match result {
        Ok(resp) => {
            match format {
                OutputFormat::Table => print_key_values(&rows(&resp), false),
                OutputFormat::Markdown => print_key_values(&rows(&resp), true),
                OutputFormat::Json => print_json(&resp),
            }
            Ok(())
        }
        Err(ApiError::Rejected(failure)) => {
            let fields = failure.field_messages();
            match format {
                OutputFormat::Json => print_json(&failure),
                OutputFormat::Table if !fields.is_empty() => print_field_errors(&fields, false),
                OutputFormat::Markdown if !fields.is_empty() => print_field_errors(&fields, true),
                _ => {}
            }
            bail!("{} failed: {}", O::NAME, failure)
        }
        Err(ApiError::Unexpected {
            status,
            error_code,
            message,
        }) => bail!(
            "{} failed with an unexpected response (status {}, code {}): {}",
            O::NAME,
            status,
            error_code.as_deref().unwrap_or("none"),
            message.as_deref().unwrap_or("no message")
        ),
        Err(ApiError::Transport(e)) => Err(e.into()),
    }
}

fn message_rows(resp: &MessageResponse) -> Vec<(&'static str, String)> {
    vec![("message", resp.message.clone())]
}

fn resend_rows(resp: &ResendResponse) -> Vec<(&'static str, String)> {
    let now = Utc::now();
    vec![
        ("message", resp.message.clone()),
        (
            "retryAfter",
            format!(
                "{} (in {}s)",
                resp.retry_after.instant().to_rfc3339(),
                resp.retry_after.remaining(now).as_secs()
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;
    use infinity_api::contract::{
        FieldErrors, RetryAfter, SignInError, SignInField, SignInInvalidCode,
    };

    use super::*;

    #[test]
    fn test_resend_rows_show_remaining_seconds() {
        let resp = ResendResponse {
            message: "Sent".to_string(),
            retry_after: RetryAfter::at(Utc::now() + ChronoDuration::seconds(120)),
        };
        let rows = resend_rows(&resp);
        assert_eq!(rows[0], ("message", "Sent".to_string()));
        assert_eq!(rows[1].0, "retryAfter");
        assert!(rows[1].1.ends_with("(in 119s)") || rows[1].1.ends_with("(in 120s)"));
    }

    #[test]
    fn test_finish_ok_returns_ok() {
        let result: Result<MessageResponse, ApiError<_>> = Ok(MessageResponse {
            message: "Signed out".to_string(),
        });
        assert!(finish::<SignOut>(result, &OutputFormat::Json, message_rows).is_ok());
    }

    #[test]
    fn test_finish_rejection_is_an_error_naming_the_operation() {
        let failure: SignInError = SignInError::invalid(
            SignInInvalidCode::InvalidEmail,
            "Invalid email",
            FieldErrors::single(SignInField::Email, "Invalid email"),
        );
        let err = finish::<SignIn>(Err(ApiError::Rejected(failure)), &OutputFormat::Table, |_| {
            Vec::new()
        })
        .unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("sign-in failed: Invalid email"), "{}", text);
    }

    #[test]
    fn test_finish_unexpected_reports_status() {
        let err = finish::<SignOut>(
            Err(ApiError::Unexpected {
                status: 502,
                error_code: None,
                message: None,
            }),
            &OutputFormat::Table,
            message_rows,
        )
        .unwrap_err();
        assert!(err.to_string().contains("status 502"));
    }
}
