//! Typed contract and HTTP client for the Infinity social API.
//!
//! [`contract`] defines every auth operation with its request, success body,
//! and closed set of failures. [`types`] holds the records the content
//! endpoints return, and [`paths`] builds their URLs from validated ids.

mod client;
pub mod contract;
mod errors;
pub mod paths;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::{ApiError, Error};
pub use self::paths::ResourceId;
pub use self::query::{PageQuery, Query, QueryCommon, DEFAULT_LIMIT};
