//! Error types for the mock server.

use std::fmt;
use std::net::SocketAddr;

/// Errors raised while configuring or starting the mock server.
///
/// Request handling itself never fails: malformed list queries degrade to
/// defaults and auth failures are answered as contract bodies.
#[derive(Debug)]
pub enum MockError {
    /// An environment variable or flag held an unusable value.
    Config(String),
    /// The listening socket could not be opened.
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    /// The server stopped with an I/O error.
    Serve(std::io::Error),
}

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::Bind { addr, source } => write!(f, "Failed to bind {}: {}", addr, source),
            Self::Serve(e) => write!(f, "Server error: {}", e),
        }
    }
}

impl std::error::Error for MockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
            Self::Serve(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for MockError {
    fn from(e: std::io::Error) -> Self {
        Self::Serve(e)
    }
}
