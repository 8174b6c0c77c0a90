use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use infinity_api::types::{Comment, CommentsPage, CreateCommentRequest, UpdateCommentRequest};
use infinity_api::Client;

use super::{parse_id, PageArgs};
use crate::output::{print_comments, print_json, print_page_summary, OutputFormat};

#[derive(Args)]
pub struct CommentsArgs {
    /// ID of the post
    pub post_id: String,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args)]
pub struct RepliesArgs {
    /// ID of the parent comment
    pub comment_id: String,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Subcommand)]
pub enum CommentCommand {
    /// Add a comment to a post
    Create(CreateArgs),
    /// Replace the text of a comment
    Update(UpdateArgs),
}

#[derive(Args)]
pub struct CreateArgs {
    /// ID of the post
    pub post_id: String,

    /// Comment text
    #[arg(long)]
    pub content: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// ID of the comment
    pub comment_id: String,

    /// New comment text
    #[arg(long)]
    pub content: String,
}

pub async fn run_comments(
    args: &CommentsArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let post_id = parse_id(&args.post_id)?;
    let resp = client
        .get_comments_by_post_id(&post_id, &args.page.to_query())
        .await?;
    print_page(&resp, "comments", format);
    Ok(())
}

pub async fn run_replies(args: &RepliesArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let comment_id = parse_id(&args.comment_id)?;
    let resp = client
        .get_replies_by_comment_id(&comment_id, &args.page.to_query())
        .await?;
    print_page(&resp, "replies", format);
    Ok(())
}

pub async fn run_write(cmd: &CommentCommand, client: &Client, format: &OutputFormat) -> Result<()> {
    let comment = match cmd {
        CommentCommand::Create(args) => {
            let post_id = parse_id(&args.post_id)?;
            let content = require_content(&args.content)?;
            client
                .create_comment(&post_id, &CreateCommentRequest { content })
                .await?
        }
        CommentCommand::Update(args) => {
            let comment_id = parse_id(&args.comment_id)?;
            let content = require_content(&args.content)?;
            client
                .update_comment(&comment_id, &UpdateCommentRequest { content })
                .await?
        }
    };
    print_one(&comment, format);
    Ok(())
}

fn require_content(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        bail!("Comment content must not be blank");
    }
    Ok(trimmed.to_string())
}

fn print_page(resp: &CommentsPage, noun: &str, format: &OutputFormat) {
    print_page_summary(&resp.metadata.pagination, resp.comments.len(), noun);

    match format {
        OutputFormat::Table => print_comments(&resp.comments, false),
        OutputFormat::Markdown => print_comments(&resp.comments, true),
        OutputFormat::Json => print_json(resp),
    }
}

fn print_one(comment: &Comment, format: &OutputFormat) {
    match format {
        OutputFormat::Table => print_comments(std::slice::from_ref(comment), false),
        OutputFormat::Markdown => print_comments(std::slice::from_ref(comment), true),
        OutputFormat::Json => print_json(comment),
    }
}
