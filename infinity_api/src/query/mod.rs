mod common;
pub use self::common::{Query, QueryCommon, DEFAULT_LIMIT};

mod page;
pub use self::page::PageQuery;
