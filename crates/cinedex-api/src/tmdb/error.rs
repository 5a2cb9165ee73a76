//! TMDB API error types.

use thiserror::Error;

/// Errors returned by the TMDB client.
///
/// Callers branch on the variant rather than on the message text.
/// Only an exhausted rate-limit window is retried internally; every
/// variant here is terminal for the call that produced it.
#[derive(Debug, Error)]
#[non_exhaustive]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// The remote reported HTTP 404, or a lookup found no candidates.
    #[error("Resource not found.")]
    NotFound,

    /// The remote reported a non-2xx status other than 404.
    #[error("TMDB API error: code={code}, message={message}")]
    Remote {
        /// Remote `status_code` field.
        code: i64,
        /// Remote `status_message` field.
        message: String,
    },

    /// The response could not be reconciled with the expected shape.
    #[error("Remote service produced an unexpected response.")]
    UnexpectedResponse,

    /// The requested resource type / external source combination is not supported.
    #[error("Method/ behaviour is not implemented.")]
    Unimplemented,

    /// The configured rate-limit retry cap was reached.
    #[error("TMDB API rate limit exceeded after {attempts} cooldowns")]
    RateLimited {
        /// Number of cooldowns performed before giving up.
        attempts: u32,
    },

    /// Network or TLS failure from the HTTP transport.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response body was not valid JSON.
    #[error("failed to decode JSON response for {context}: {source}")]
    Decode {
        /// Resource path that produced the body.
        context: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The resource path would leave the API base URL (absolute URL or
    /// dot segments), or an external ID is not a usable path segment.
    #[error("invalid resource path: {resource}")]
    InvalidResource {
        /// Rejected resource path or segment.
        resource: String,
    },

    /// The resource path could not be joined onto the base URL.
    #[error("failed to build request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl TmdbError {
    /// Returns `true` for [`TmdbError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
