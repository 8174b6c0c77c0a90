use url::Url;

use crate::types::PaginationMetadata;

use super::{Query, QueryCommon};

/// Offset/limit query for the news feed, profile posts, comments, and replies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub common: QueryCommon,
}

impl Query for PageQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

impl PageQuery {
    pub fn offset(&self) -> u64 {
        self.common.offset
    }

    pub fn limit(&self) -> u64 {
        self.common.limit
    }

    /// The query for the page after the one described by `pagination`, or
    /// `None` when the server reported no more items.
    pub fn next_page(&self, pagination: &PaginationMetadata) -> Option<PageQuery> {
        if !pagination.has_more {
            return None;
        }
        let returned = pagination
            .total
            .saturating_sub(pagination.offset)
            .min(pagination.limit);
        Some((*self).with_offset(pagination.offset.saturating_add(returned)))
    }
}
