mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use infinity_api::{Client, DEFAULT_BASE_URL};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "infinity")]
#[command(about = "Run the Infinity mock backend and call its API")]
struct Cli {
    /// Output format: table, json, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Base URL of the API
    #[arg(long, env = "INFINITY_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Bearer token sent with content requests
    #[arg(long, env = "INFINITY_ACCESS_TOKEN", hide_env_values = true, global = true)]
    access_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the mock backend
    Serve(commands::serve::ServeArgs),
    /// List posts in the news feed
    Feed(commands::posts::FeedArgs),
    /// List posts written by one user
    UserPosts(commands::posts::UserPostsArgs),
    /// List comments on a post
    Comments(commands::comments::CommentsArgs),
    /// List replies to a comment
    Replies(commands::comments::RepliesArgs),
    /// Write or edit a comment
    #[command(subcommand)]
    Comment(commands::comments::CommentCommand),
    /// Sign-in, sign-up, verification, and password recovery
    #[command(subcommand)]
    Auth(commands::auth::AuthCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("infinity=info".parse()?)
                .add_directive("infinity_mock=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let mut client = Client::with_base_url(&cli.base_url);
    if let Some(ref token) = cli.access_token {
        client = client.with_access_token(token);
    }

    match &cli.command {
        Commands::Serve(args) => commands::serve::run(args).await?,
        Commands::Feed(args) => commands::posts::run_feed(args, &client, &format).await?,
        Commands::UserPosts(args) => {
            commands::posts::run_user_posts(args, &client, &format).await?
        }
        Commands::Comments(args) => {
            commands::comments::run_comments(args, &client, &format).await?
        }
        Commands::Replies(args) => {
            commands::comments::run_replies(args, &client, &format).await?
        }
        Commands::Comment(cmd) => commands::comments::run_write(cmd, &client, &format).await?,
        Commands::Auth(cmd) => commands::auth::run(cmd, &client, &format).await?,
    }

    Ok(())
}
