use anyhow::Result;
use clap::Args;
use infinity_api::types::PostsPage;
use infinity_api::Client;

use super::{parse_id, PageArgs};
use crate::output::{print_json, print_page_summary, print_posts, OutputFormat};

#[derive(Args)]
pub struct FeedArgs {
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args)]
pub struct UserPostsArgs {
    /// ID of the author
    pub user_id: String,

    #[command(flatten)]
    pub page: PageArgs,
}

pub async fn run_feed(args: &FeedArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let resp = client.get_news_feed(&args.page.to_query()).await?;
    print_page(&resp, format);
    Ok(())
}

pub async fn run_user_posts(
    args: &UserPostsArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let user_id = parse_id(&args.user_id)?;
    let resp = client
        .get_user_posts(&user_id, &args.page.to_query())
        .await?;
    print_page(&resp, format);
    Ok(())
}

fn print_page(resp: &PostsPage, format: &OutputFormat) {
    print_page_summary(&resp.metadata.pagination, resp.posts.len(), "posts");

    match format {
        OutputFormat::Table => print_posts(&resp.posts, false),
        OutputFormat::Markdown => print_posts(&resp.posts, true),
        OutputFormat::Json => print_json(resp),
    }
}
