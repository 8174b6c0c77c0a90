//! Mock server settings, read from `INFINITY_*` environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use infinity_api::DEFAULT_LIMIT;

use crate::error::MockError;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_RESEND_COOLDOWN: Duration = Duration::from_secs(60);

/// Virtual collection sizes. Nothing is stored; these only bound pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Top-level comments on every post.
    pub comments: u64,
    /// Replies under every comment.
    pub replies: u64,
    pub feed_posts: u64,
    /// Posts on every user profile.
    pub profile_posts: u64,
}

impl Default for Totals {
    fn default() -> Self {
        Self {
            comments: 100,
            replies: 20,
            feed_posts: 1000,
            profile_posts: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    pub bind: SocketAddr,
    /// When set, every record is derived from the seed and its position, so
    /// repeated and overlapping page requests return the same data.
    pub seed: Option<u64>,
    pub totals: Totals,
    /// Page size used when a request does not carry a usable `limit`.
    pub default_limit: u64,
    pub resend_cooldown: Duration,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            seed: None,
            totals: Totals::default(),
            default_limit: DEFAULT_LIMIT,
            resend_cooldown: DEFAULT_RESEND_COOLDOWN,
        }
    }
}

impl MockConfig {
    /// Reads the configuration from the environment.
    ///
    /// Sizes fall back to their defaults when unset or unparseable. A bind
    /// address or seed that is set but malformed is an error, as is a zero
    /// default limit.
    pub fn from_env() -> Result<Self, MockError> {
        let defaults = Totals::default();
        let config = Self {
            bind: parse_bind(&env_string("INFINITY_MOCK_BIND", DEFAULT_BIND))?,
            seed: env_seed("INFINITY_MOCK_SEED")?,
            totals: Totals {
                comments: env_u64("INFINITY_TOTAL_COMMENTS", defaults.comments),
                replies: env_u64("INFINITY_TOTAL_REPLIES", defaults.replies),
                feed_posts: env_u64("INFINITY_TOTAL_FEED_POSTS", defaults.feed_posts),
                profile_posts: env_u64("INFINITY_TOTAL_PROFILE_POSTS", defaults.profile_posts),
            },
            default_limit: env_u64("INFINITY_DEFAULT_LIMIT", DEFAULT_LIMIT),
            resend_cooldown: Duration::from_secs(env_u64(
                "INFINITY_RESEND_COOLDOWN_SECS",
                DEFAULT_RESEND_COOLDOWN.as_secs(),
            )),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), MockError> {
        if self.default_limit == 0 {
            return Err(MockError::Config(
                "INFINITY_DEFAULT_LIMIT must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parses a `host:port` socket address.
pub fn parse_bind(value: &str) -> Result<SocketAddr, MockError> {
    value
        .trim()
        .parse::<SocketAddr>()
        .map_err(|e| MockError::Config(format!("bind address '{}': {}", value, e)))
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_seed(key: &str) -> Result<Option<u64>, MockError> {
    match std::env::var(key) {
        Ok(val) if !val.trim().is_empty() => val
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| MockError::Config(format!("{} '{}': {}", key, val, e))),
        _ => Ok(None),
    }
}
