//! Error types for the request pipeline.
//!
//! Failures fall into two families that unwind to the caller immediately:
//! construction errors raised while building a request, and transport errors
//! raised while executing it. Payload-level failures reported by the API are
//! not errors at all; see [`crate::classify`].

use crate::request::Method;

/// The main error type for building and executing API calls.
///
/// # Examples
///
/// ```no_run
/// use vr_client::{Error, Method, Params, RestClient};
///
/// # fn example(client: &RestClient) {
/// match client.execute("https://api.example.com/lists", Method::Put, Params::None) {
///     Ok(payload) => println!("{}", payload.body),
///     Err(Error::UnsupportedMethod(method)) => eprintln!("{method} is not available"),
///     Err(e) if e.is_transport() => eprintln!("call failed: {e}"),
///     Err(e) => eprintln!("bad request: {e}"),
/// }
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No target URL was given (empty or blank string).
    #[error("Building URI with an empty URL")]
    MissingUrl,

    /// The target URL could not be parsed.
    #[error("Problem when building URI {url}: {source}")]
    InvalidUrl {
        /// The offending input
        url: String,
        /// The parser's complaint
        #[source]
        source: url::ParseError,
    },

    /// The method is recognized but has no request encoding.
    #[error("{0} requests are not supported")]
    UnsupportedMethod(Method),

    /// The parameters do not have the shape the method requires.
    #[error("{method} expects {expected}")]
    ParamsMismatch {
        /// The requested method
        method: Method,
        /// What the method accepts
        expected: &'static str,
    },

    /// A request body could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// The request did not complete within the configured timeouts.
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// A network-level error occurred (connection refused, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body could not be read to completion.
    #[error("Failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP transport could not be built.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The endpoint configuration is missing or unreadable.
    #[error("Invalid endpoint configuration: {0}")]
    Endpoint(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err)
        } else {
            Error::Network(err)
        }
    }
}

impl Error {
    /// Returns `true` for errors raised while building a request, before any I/O.
    ///
    /// ```
    /// use vr_client::{Error, Method};
    ///
    /// assert!(Error::MissingUrl.is_construction());
    /// assert!(Error::UnsupportedMethod(Method::Delete).is_construction());
    /// ```
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Error::MissingUrl
                | Error::InvalidUrl { .. }
                | Error::UnsupportedMethod(_)
                | Error::ParamsMismatch { .. }
                | Error::SerializationFailed(_)
        )
    }

    /// Returns `true` for errors raised while executing a request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Timeout(_) | Error::Network(_) | Error::Io(_) | Error::Configuration(_)
        )
    }
}

/// A specialized `Result` type for API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_disjoint() {
        let construction = [
            Error::MissingUrl,
            Error::UnsupportedMethod(Method::Put),
            Error::ParamsMismatch {
                method: Method::Get,
                expected: "query parameters",
            },
            Error::SerializationFailed("bad".to_string()),
        ];
        for err in &construction {
            assert!(err.is_construction(), "{err}");
            assert!(!err.is_transport(), "{err}");
        }

        let io = Error::from(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof"));
        assert!(io.is_transport());
        assert!(!io.is_construction());

        let config = Error::Endpoint("missing access_token".to_string());
        assert!(!config.is_transport());
        assert!(!config.is_construction());
    }

    #[test]
    fn test_invalid_url_message_names_input() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = Error::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.to_string().contains("not a url"));
    }
}
