use infinity_api::types::{Comment, PaginationMetadata, Post};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

#[derive(Tabled)]
struct PostRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Posted")]
    posted: String,
    #[tabled(rename = "Reactions")]
    reactions: u64,
    #[tabled(rename = "Content")]
    content: String,
}

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Posted")]
    posted: String,
    #[tabled(rename = "Replies")]
    replies: u64,
    #[tabled(rename = "Content")]
    content: String,
}

#[derive(Tabled)]
struct KeyValueRow {
    #[tabled(rename = "Field")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct FieldErrorRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Message")]
    message: String,
}

// -- Row builders --

fn build_post_rows(posts: &[Post]) -> Vec<PostRow> {
    posts
        .iter()
        .map(|p| PostRow {
            id: p.id.to_string(),
            author: format!("{} (@{})", p.user.display_name(), p.user.username),
            posted: p.created_at.format("%Y-%m-%d %H:%M").to_string(),
            reactions: p.total_reactions(),
            content: truncate(&p.content, 60),
        })
        .collect()
}

fn build_comment_rows(comments: &[Comment]) -> Vec<CommentRow> {
    comments
        .iter()
        .map(|c| CommentRow {
            id: c.id.to_string(),
            author: format!("{} (@{})", c.user.display_name(), c.user.username),
            posted: c.created_at.format("%Y-%m-%d %H:%M").to_string(),
            replies: c.replies_count,
            content: truncate(&c.content, 60),
        })
        .collect()
}

fn build_key_value_rows(pairs: &[(&str, String)]) -> Vec<KeyValueRow> {
    pairs
        .iter()
        .map(|(k, v)| KeyValueRow {
            key: k.to_string(),
            value: v.clone(),
        })
        .collect()
}

fn build_field_error_rows(errors: &[(&str, &str)]) -> Vec<FieldErrorRow> {
    errors
        .iter()
        .map(|(field, message)| FieldErrorRow {
            field: field.to_string(),
            message: message.to_string(),
        })
        .collect()
}

// -- Table output --

fn render<T: Tabled>(rows: Vec<T>, markdown: bool) -> String {
    let mut table = Table::new(rows);
    if markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

pub fn print_posts(posts: &[Post], markdown: bool) {
    println!("{}", render(build_post_rows(posts), markdown));
}

pub fn print_comments(comments: &[Comment], markdown: bool) {
    println!("{}", render(build_comment_rows(comments), markdown));
}

pub fn print_key_values(pairs: &[(&str, String)], markdown: bool) {
    println!("{}", render(build_key_value_rows(pairs), markdown));
}

pub fn print_field_errors(errors: &[(&str, &str)], markdown: bool) {
    println!("{}", render(build_field_error_rows(errors), markdown));
}

/// Writes the "Showing X-Y of Z" line for a page to stderr.
pub fn print_page_summary(pagination: &PaginationMetadata, returned: usize, noun: &str) {
    eprintln!("{}", page_summary(pagination, returned, noun));
}

fn page_summary(pagination: &PaginationMetadata, returned: usize, noun: &str) -> String {
    if returned == 0 {
        return format!("No {} at offset {} ({} total)", noun, pagination.offset, pagination.total);
    }
    let first = pagination.offset + 1;
    let last = pagination.offset + returned as u64;
    let more = if pagination.has_more { ", more available" } else { "" };
    format!(
        "Showing {}-{} of {} {}{}",
        first, last, pagination.total, noun, more
    )
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use infinity_api::types::{CommentsPage, PostsPage};

    use super::*;

    fn load_feed_fixture() -> PostsPage {
        let json_str = include_str!("../../infinity_api/tests/fixtures/news_feed.json");
        serde_json::from_str(json_str).unwrap()
    }

    fn load_replies_fixture() -> CommentsPage {
        let json_str = include_str!("../../infinity_api/tests/fixtures/replies.json");
        serde_json::from_str(json_str).unwrap()
    }

    // -- truncate tests --

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_truncate_flattens_newlines() {
        assert_eq!(truncate("a\nb", 10), "a b");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("\u{e9}\u{e9}\u{e9}", 3), "\u{e9}\u{e9}\u{e9}");
    }

    // -- Row builder tests --

    #[test]
    fn test_build_post_rows_mapping() {
        let feed = load_feed_fixture();
        let rows = build_post_rows(&feed.posts);
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.id, "3f2b6c1e-8d4a-4b7e-9a51-2c6d8e0f1a23");
        assert_eq!(row.author, "Ada Lovelace (@ada)");
        assert_eq!(row.posted, "2024-04-01 09:30");
        assert_eq!(row.reactions, 16);
        assert_eq!(row.content, "Notes on the analytical engine.");

        assert_eq!(rows[1].reactions, 0);
    }

    #[test]
    fn test_build_comment_rows_mapping() {
        let replies = load_replies_fixture();
        let rows = build_comment_rows(&replies.comments);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].author, "Ada Lovelace (@ada)");
        assert_eq!(rows[0].replies, 0);
        assert_eq!(rows[0].content, "Agreed.");
    }

    #[test]
    fn test_build_rows_empty() {
        assert!(build_post_rows(&[]).is_empty());
        assert!(build_comment_rows(&[]).is_empty());
    }

    #[test]
    fn test_field_error_rows_keep_order() {
        let rows = build_field_error_rows(&[("email", "Invalid email"), ("password", "Too short")]);
        assert_eq!(rows[0].field, "email");
        assert_eq!(rows[1].message, "Too short");
    }

    // -- Rendering tests --

    #[test]
    fn test_markdown_table_has_header_separator() {
        let rendered = render(
            build_key_value_rows(&[("message", "Signed out".to_string())]),
            true,
        );
        let mut lines = rendered.lines();
        assert!(lines.next().unwrap().contains("Field"));
        assert!(lines.next().unwrap().starts_with("|-"));
        assert!(rendered.contains("Signed out"));
    }

    // -- Page summary tests --

    #[test]
    fn test_page_summary_first_page() {
        let feed = load_feed_fixture();
        assert_eq!(
            page_summary(&feed.metadata.pagination, feed.posts.len(), "posts"),
            "Showing 1-2 of 1000 posts, more available"
        );
    }

    #[test]
    fn test_page_summary_last_page() {
        let replies = load_replies_fixture();
        assert_eq!(
            page_summary(&replies.metadata.pagination, replies.comments.len(), "replies"),
            "Showing 21-21 of 21 replies"
        );
    }

    #[test]
    fn test_page_summary_past_the_end() {
        let pagination = PaginationMetadata {
            offset: 50,
            limit: 10,
            total: 21,
            has_more: false,
        };
        assert_eq!(
            page_summary(&pagination, 0, "comments"),
            "No comments at offset 50 (21 total)"
        );
    }
}
