//! HTTP client for the Infinity API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    contract::{
        Failure, ForgotPassword, ForgotPasswordError, ForgotPasswordRequest,
        ForgotPasswordResponse, MessageResponse, Operation, RefreshToken, RefreshTokenCode,
        RefreshTokenRequest, RefreshTokenResponse, ResendResponse, ResetPassword,
        ResetPasswordError, ResetPasswordRequest, SendEmailVerification,
        SendEmailVerificationError, SendEmailVerificationRequest, SendForgotPassword,
        SendForgotPasswordError, SendForgotPasswordRequest, SignIn, SignInError, SignInRequest,
        SignInResponse, SignOut, SignOutCode, SignOutRequest, SignUp, SignUpError, SignUpRequest,
        VerifyEmailByCode, VerifyEmailByCodeError, VerifyEmailByCodeRequest, VerifyEmailByToken,
        VerifyEmailByTokenError, VerifyEmailByTokenRequest,
    },
    paths::{self, ResourceId},
    query::{PageQuery, Query},
    types::{Comment, CommentsPage, CreateCommentRequest, PostsPage, UpdateCommentRequest},
    ApiError, Error,
};

/// Base URL used by [`Client::new`]: the mock server's default address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Header telling the API gateway not to demand credentials.
const NO_AUTH_HEADER: &str = "No-Auth";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Infinity API.
///
/// Auth operations are POSTed with the `No-Auth` header. Content requests
/// carry a bearer token once one has been set with
/// [`with_access_token`](Client::with_access_token). Each request builds a
/// fresh `reqwest::Client` with a 30-second timeout.
pub struct Client {
    /// Base URL for the API. Defaults to [`DEFAULT_BASE_URL`].
    base_api_url: String,
    access_token: Option<String>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Loose view of a failure body, used when it does not match the contract.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFailure {
    error_code: Option<String>,
    message: Option<String>,
}

impl Client {
    /// Creates a new client pointing at [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
        }
    }

    /// Attaches a bearer token to content requests.
    pub fn with_access_token(mut self, token: &str) -> Self {
        self.access_token = Some(token.to_string());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(client
            .request(method, url)
            .header("accept", "application/json, text/plain, */*"))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and returns the status and full body text.
    async fn send(&self, builder: RequestBuilder) -> Result<(u16, String), Error> {
        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;
        Ok((status, body))
    }

    /// Sends a content request. Any non-2xx status is a transport error.
    async fn fetch<T, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&PageQuery>,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = self.get_url(path, query)?;
        let mut builder = self.authorize(self.request(method, url)?);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let (status, body) = self.send(builder).await?;

        if !(200..300).contains(&status) {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status,
                body: snippet,
            });
        }

        parse_body(&body)
    }

    /// Performs one contract operation.
    ///
    /// A failure body that decodes as `O::Error` comes back as
    /// [`ApiError::Rejected`]; any other non-2xx answer, including a known
    /// code the operation does not allow, comes back as
    /// [`ApiError::Unexpected`].
    pub async fn call<O: Operation>(
        &self,
        request: &O::Request,
    ) -> Result<O::Response, ApiError<O::Error>> {
        let url = self.get_url(O::PATH, None::<&PageQuery>)?;
        let builder = self
            .request(Method::POST, url)?
            .header(NO_AUTH_HEADER, "true")
            .json(request);
        tracing::debug!("{} -> {}", O::NAME, O::PATH);
        let (status, body) = self.send(builder).await?;

        if (200..300).contains(&status) {
            return Ok(parse_body(&body)?);
        }

        match serde_json::from_str::<O::Error>(&body) {
            Ok(failure) => {
                tracing::debug!("{} rejected: {}", O::NAME, failure);
                Err(ApiError::Rejected(failure))
            }
            Err(e) => {
                let raw = serde_json::from_str::<RawFailure>(&body).ok();
                tracing::warn!(
                    "{} answered outside its contract (status {}): {} | body: {}",
                    O::NAME,
                    status,
                    e,
                    truncate_body(&body)
                );
                Err(ApiError::Unexpected {
                    status,
                    error_code: raw.as_ref().and_then(|r| r.error_code.clone()),
                    message: raw.and_then(|r| r.message),
                })
            }
        }
    }

    pub async fn sign_in(
        &self,
        request: &SignInRequest,
    ) -> Result<SignInResponse, ApiError<SignInError>> {
        self.call::<SignIn>(request).await
    }

    pub async fn sign_up(
        &self,
        request: &SignUpRequest,
    ) -> Result<MessageResponse, ApiError<SignUpError>> {
        self.call::<SignUp>(request).await
    }

    pub async fn sign_out(
        &self,
        request: &SignOutRequest,
    ) -> Result<MessageResponse, ApiError<Failure<SignOutCode>>> {
        self.call::<SignOut>(request).await
    }

    pub async fn refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, ApiError<Failure<RefreshTokenCode>>> {
        self.call::<RefreshToken>(request).await
    }

    pub async fn send_email_verification(
        &self,
        request: &SendEmailVerificationRequest,
    ) -> Result<ResendResponse, ApiError<SendEmailVerificationError>> {
        self.call::<SendEmailVerification>(request).await
    }

    pub async fn verify_email_by_code(
        &self,
        request: &VerifyEmailByCodeRequest,
    ) -> Result<MessageResponse, ApiError<VerifyEmailByCodeError>> {
        self.call::<VerifyEmailByCode>(request).await
    }

    pub async fn verify_email_by_token(
        &self,
        request: &VerifyEmailByTokenRequest,
    ) -> Result<MessageResponse, ApiError<VerifyEmailByTokenError>> {
        self.call::<VerifyEmailByToken>(request).await
    }

    pub async fn send_forgot_password(
        &self,
        request: &SendForgotPasswordRequest,
    ) -> Result<ResendResponse, ApiError<SendForgotPasswordError>> {
        self.call::<SendForgotPassword>(request).await
    }

    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<ForgotPasswordResponse, ApiError<ForgotPasswordError>> {
        self.call::<ForgotPassword>(request).await
    }

    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<MessageResponse, ApiError<ResetPasswordError>> {
        self.call::<ResetPassword>(request).await
    }

    /// Fetches a page of the signed-in user's news feed.
    pub async fn get_news_feed(&self, query: &PageQuery) -> Result<PostsPage, Error> {
        self.fetch::<PostsPage, ()>(Method::GET, paths::NEWS_FEED, Some(query), None)
            .await
    }

    /// Fetches a page of posts written by one user.
    pub async fn get_user_posts(
        &self,
        user_id: &ResourceId,
        query: &PageQuery,
    ) -> Result<PostsPage, Error> {
        self.fetch::<PostsPage, ()>(Method::GET, &paths::user_posts(user_id), Some(query), None)
            .await
    }

    /// Fetches a page of top-level comments on a post.
    pub async fn get_comments_by_post_id(
        &self,
        post_id: &ResourceId,
        query: &PageQuery,
    ) -> Result<CommentsPage, Error> {
        self.fetch::<CommentsPage, ()>(
            Method::GET,
            &paths::post_comments(post_id),
            Some(query),
            None,
        )
        .await
    }

    /// Fetches a page of replies to a comment.
    pub async fn get_replies_by_comment_id(
        &self,
        comment_id: &ResourceId,
        query: &PageQuery,
    ) -> Result<CommentsPage, Error> {
        self.fetch::<CommentsPage, ()>(
            Method::GET,
            &paths::comment_replies(comment_id),
            Some(query),
            None,
        )
        .await
    }

    pub async fn create_comment(
        &self,
        post_id: &ResourceId,
        request: &CreateCommentRequest,
    ) -> Result<Comment, Error> {
        self.fetch(
            Method::POST,
            &paths::post_comments(post_id),
            None,
            Some(request),
        )
        .await
    }

    pub async fn update_comment(
        &self,
        comment_id: &ResourceId,
        request: &UpdateCommentRequest,
    ) -> Result<Comment, Error> {
        self.fetch(Method::PATCH, &paths::comment(comment_id), None, Some(request))
            .await
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::RequestFailed
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "\u{e9}".repeat(1500);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() <= 2000 + "...[truncated]".len());
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = Client::with_base_url("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        let url = client
            .get_url("/news-feed", Some(&PageQuery::default()))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/news-feed?offset=0&limit=10"
        );
    }
}
