//! Mock backend for the Infinity API.
//!
//! Serves paged feeds, profiles, comments and replies over virtual
//! collections of generated records, and answers every auth operation with
//! contract bodies. The only state kept between requests is the resend
//! cooldown map.

pub mod config;
pub mod cooldown;
pub mod dataset;
pub mod error;
pub mod generators;
pub mod pagination;
pub mod server;
pub mod validation;

pub use infinity_api;

pub use config::{MockConfig, Totals};
pub use cooldown::Cooldowns;
pub use dataset::Dataset;
pub use error::MockError;
pub use generators::{CommentParent, Generator};
pub use pagination::{paginate, Page, PageParams};
pub use server::{router, run, serve, AppState};
