//! Feed, profile, comment and reply endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use infinity_api::types::{
    Comment, CommentsPage, CreateCommentRequest, Metadata, Post, PostsPage,
    UpdateCommentRequest,
};

use super::AppState;
use crate::dataset::uuid_for;
use crate::pagination::{Page, PageParams};

fn window(state: &AppState, params: Option<Query<PageParams>>) -> (u64, u64) {
    params
        .map(|Query(params)| params)
        .unwrap_or_default()
        .resolve(state.default_limit)
}

fn posts_page(page: Page<Post>) -> PostsPage {
    PostsPage {
        posts: page.items,
        metadata: Metadata {
            pagination: page.pagination,
        },
    }
}

fn comments_page(page: Page<Comment>) -> CommentsPage {
    CommentsPage {
        comments: page.items,
        metadata: Metadata {
            pagination: page.pagination,
        },
    }
}

pub async fn news_feed(
    State(state): State<AppState>,
    params: Option<Query<PageParams>>,
) -> Json<PostsPage> {
    let (offset, limit) = window(&state, params);
    Json(posts_page(state.dataset.news_feed(offset, limit)))
}

pub async fn user_posts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    params: Option<Query<PageParams>>,
) -> Json<PostsPage> {
    let (offset, limit) = window(&state, params);
    Json(posts_page(
        state.dataset.user_posts(uuid_for(&user_id), offset, limit),
    ))
}

pub async fn post_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    params: Option<Query<PageParams>>,
) -> Json<CommentsPage> {
    let (offset, limit) = window(&state, params);
    Json(comments_page(
        state.dataset.post_comments(uuid_for(&post_id), offset, limit),
    ))
}

pub async fn comment_replies(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    params: Option<Query<PageParams>>,
) -> Json<CommentsPage> {
    let (offset, limit) = window(&state, params);
    Json(comments_page(
        state.dataset.comment_replies(uuid_for(&comment_id), offset, limit),
    ))
}

fn empty_content() -> Response {
    (StatusCode::BAD_REQUEST, "Comment content must not be empty").into_response()
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Json(body): Json<CreateCommentRequest>,
) -> Response {
    if body.content.trim().is_empty() {
        return empty_content();
    }
    let comment = state
        .dataset
        .new_comment(uuid_for(&post_id), body.content, Utc::now());
    tracing::debug!("Created comment {} on post {}", comment.id, post_id);
    (StatusCode::CREATED, Json(comment)).into_response()
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    Json(body): Json<UpdateCommentRequest>,
) -> Response {
    if body.content.trim().is_empty() {
        return empty_content();
    }
    let comment = state
        .dataset
        .edited_comment(uuid_for(&comment_id), body.content, Utc::now());
    Json(comment).into_response()
}
