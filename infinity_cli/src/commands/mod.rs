//! CLI subcommand implementations.

pub mod auth;
pub mod comments;
pub mod posts;
pub mod serve;

use anyhow::Result;
use clap::Args;
use infinity_api::{PageQuery, Query, ResourceId, DEFAULT_LIMIT};

/// Offset/limit flags shared by every list command.
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Number of items to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u64,

    /// Items per page
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u64,
}

impl PageArgs {
    pub fn to_query(&self) -> PageQuery {
        PageQuery::default()
            .with_offset(self.offset)
            .with_limit(self.limit)
    }
}

pub fn parse_id(raw: &str) -> Result<ResourceId> {
    Ok(ResourceId::parse(raw.trim())?)
}
