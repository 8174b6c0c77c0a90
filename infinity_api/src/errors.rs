//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unexpected response).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// A resource identifier was rejected before any request was made.
    #[error("Invalid resource id {0:?}")]
    InvalidId(String),
}

/// Outcome of a contract operation that did not succeed.
///
/// `Rejected` holds one of the failures the operation declares. Anything the
/// server sends outside that set lands in `Unexpected` so callers can fall
/// back to a generic branch instead of matching on it.
#[derive(thiserror::Error, Debug)]
pub enum ApiError<E> {
    /// The server answered with a failure the operation allows.
    #[error("{0}")]
    Rejected(E),
    /// The server answered with a status or error code outside the contract.
    #[error("Unexpected error response (status {status}, code {error_code:?})")]
    Unexpected {
        status: u16,
        error_code: Option<String>,
        message: Option<String>,
    },
    /// The request never produced a decodable response.
    #[error(transparent)]
    Transport(#[from] Error),
}

impl<E> ApiError<E> {
    /// Returns the declared failure, if this is one.
    pub fn rejection(&self) -> Option<&E> {
        match self {
            Self::Rejected(e) => Some(e),
            _ => None,
        }
    }
}
