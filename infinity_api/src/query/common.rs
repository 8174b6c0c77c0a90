//! Shared query infrastructure: the [`Query`] trait and the offset/limit window.

use url::Url;

/// Page size used when a caller does not pick one.
pub const DEFAULT_LIMIT: u64 = 10;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for the offset/limit window.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets how many items to skip.
    fn with_offset(mut self, offset: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().offset = offset;
        self
    }

    /// Sets the maximum number of items to return. Zero is raised to one.
    fn with_limit(mut self, limit: u64) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = limit.max(1);
        self
    }
}

/// Offset/limit window shared by every list endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryCommon {
    /// Number of items to skip. Defaults to 0.
    pub offset: u64,
    /// Maximum items per page. Always positive; defaults to [`DEFAULT_LIMIT`].
    pub limit: u64,
}

impl Default for QueryCommon {
    fn default() -> QueryCommon {
        QueryCommon {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl QueryCommon {
    /// Appends `offset` and `limit` to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("offset", &self.offset.to_string())
            .append_pair("limit", &self.limit.to_string());
        url
    }
}
