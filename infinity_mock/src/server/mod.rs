//! HTTP front end of the mock backend.
//!
//! Serves every path the client calls. List endpoints never fail; auth
//! endpoints answer with the operation's success body or one of its
//! declared failures.

use std::future::Future;
use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use infinity_api::contract::{
    ForgotPassword, Operation, RefreshToken, ResetPassword, SendEmailVerification,
    SendForgotPassword, SignIn, SignOut, SignUp, VerifyEmailByCode, VerifyEmailByToken,
};
use infinity_api::paths::NEWS_FEED;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::MockConfig;
use crate::cooldown::Cooldowns;
use crate::dataset::Dataset;
use crate::error::MockError;

mod auth;
mod content;

pub use self::auth::status_for;

/// Shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub cooldowns: Arc<Cooldowns>,
    pub default_limit: u64,
}

impl AppState {
    pub fn new(config: &MockConfig) -> Self {
        Self {
            dataset: Arc::new(Dataset::new(config.seed, config.totals)),
            cooldowns: Arc::new(Cooldowns::new(config.resend_cooldown)),
            default_limit: config.default_limit,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(NEWS_FEED, get(content::news_feed))
        .route("/users/:user_id/posts", get(content::user_posts))
        .route(
            "/posts/:post_id/comments",
            get(content::post_comments).post(content::create_comment),
        )
        .route("/comments/:comment_id/replies", get(content::comment_replies))
        .route("/comments/:comment_id", patch(content::update_comment))
        .route(SignIn::PATH, post(auth::sign_in))
        .route(SignUp::PATH, post(auth::sign_up))
        .route(SignOut::PATH, post(auth::sign_out))
        .route(RefreshToken::PATH, post(auth::refresh_token))
        .route(
            SendEmailVerification::PATH,
            post(auth::send_email_verification),
        )
        .route(VerifyEmailByCode::PATH, post(auth::verify_email_by_code))
        .route(VerifyEmailByToken::PATH, post(auth::verify_email_by_token))
        .route(SendForgotPassword::PATH, post(auth::send_forgot_password))
        .route(ForgotPassword::PATH, post(auth::forgot_password))
        .route(ResetPassword::PATH, post(auth::reset_password))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `config.bind` and serves until Ctrl-C.
pub async fn serve(config: MockConfig) -> Result<(), MockError> {
    config.validate()?;
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| MockError::Bind {
            addr: config.bind,
            source,
        })?;
    run(listener, &config, shutdown_signal()).await
}

/// Serves on an already-bound listener until `shutdown` resolves.
pub async fn run(
    listener: TcpListener,
    config: &MockConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), MockError> {
    let addr = listener.local_addr()?;
    match config.seed {
        Some(seed) => tracing::info!("Mock server listening on http://{} (seed {})", addr, seed),
        None => tracing::info!("Mock server listening on http://{} (unseeded)", addr),
    }
    axum::serve(listener, router(AppState::new(config)).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Mock server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
