//! Request descriptions and the method-specific request builder.
//!
//! A logical call is a `(url, method, params)` triple. [`RequestSpec::build`]
//! turns it into a fully-formed request: the access token and any query
//! parameters appended to the URI, the body attached verbatim for writes, and
//! the fixed header set from [`crate::headers`].

use crate::{headers, Error, Result};
use http::HeaderMap;
use std::fmt;
use url::Url;

/// Name of the query parameter carrying the access token.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// The HTTP verbs the API client recognizes.
///
/// Only `Get` and `Post` have request encodings. `Put` and `Delete` are
/// rejected by the builder with [`Error::UnsupportedMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read a resource. Parameters travel in the query string.
    Get,

    /// Create a resource. Parameters travel as the request body.
    Post,

    /// Recognized but never sent.
    Put,

    /// Recognized but never sent.
    Delete,
}

impl Method {
    /// Returns the canonical upper-case verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// Method-shaped request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Params {
    /// No parameters. Valid for every method.
    #[default]
    None,

    /// Ordered query parameters for a GET. Duplicates are kept.
    Query(Vec<(String, String)>),

    /// A pre-serialized body for a POST, sent without re-encoding.
    Body(String),
}

impl Params {
    /// Collects name/value pairs into [`Params::Query`], preserving order.
    ///
    /// ```
    /// use vr_client::Params;
    ///
    /// let params = Params::query([("type", "basic")]);
    /// assert_eq!(params, Params::Query(vec![("type".into(), "basic".into())]));
    /// ```
    pub fn query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Params::Query(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wraps a serialized body as [`Params::Body`].
    pub fn body(body: impl Into<String>) -> Self {
        Params::Body(body.into())
    }
}

/// A fully-assembled description of one outbound call, before execution.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// The HTTP method. Always `Get` or `Post`.
    pub method: Method,

    /// The target URI, including the access token and query parameters.
    pub url: Url,

    /// Headers to send.
    pub headers: HeaderMap,

    /// The request body, if any.
    pub body: Option<String>,
}

impl RequestSpec {
    /// Builds a request for `url` authenticated with `access_token`.
    ///
    /// # Errors
    ///
    /// * [`Error::MissingUrl`] if `url` is empty or blank.
    /// * [`Error::InvalidUrl`] if `url` is not an absolute URI.
    /// * [`Error::UnsupportedMethod`] for `Put` and `Delete`.
    /// * [`Error::ParamsMismatch`] if `params` does not fit the method.
    ///
    /// # Examples
    ///
    /// ```
    /// use vr_client::{Method, Params, RequestSpec};
    ///
    /// let spec = RequestSpec::build(
    ///     "https://api.example.com/contacts/7",
    ///     Method::Get,
    ///     Params::query([("type", "basic")]),
    ///     "secret",
    /// )?;
    /// assert_eq!(spec.url.query(), Some("access_token=secret&type=basic"));
    /// assert!(spec.body.is_none());
    /// # Ok::<(), vr_client::Error>(())
    /// ```
    pub fn build(url: &str, method: Method, params: Params, access_token: &str) -> Result<Self> {
        let mut url = parse_url(url)?;

        let (pairs, body) = match (method, params) {
            (Method::Get, Params::None) => (Vec::new(), None),
            (Method::Get, Params::Query(pairs)) => (pairs, None),
            (Method::Get, Params::Body(_)) => {
                return Err(Error::ParamsMismatch {
                    method,
                    expected: "query parameters",
                });
            }
            (Method::Post, Params::None) => (Vec::new(), None),
            (Method::Post, Params::Body(body)) => (Vec::new(), Some(body)),
            (Method::Post, Params::Query(_)) => {
                return Err(Error::ParamsMismatch {
                    method,
                    expected: "a serialized body",
                });
            }
            (Method::Put | Method::Delete, _) => return Err(Error::UnsupportedMethod(method)),
        };

        append_query(&mut url, access_token, &pairs);

        Ok(Self {
            method,
            url,
            headers: headers::request_headers(),
            body,
        })
    }

    /// Returns the target URI with the access token masked, for logging.
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| {
                if k == ACCESS_TOKEN_PARAM {
                    (k.into_owned(), "***".to_string())
                } else {
                    (k.into_owned(), v.into_owned())
                }
            })
            .collect();
        if pairs.is_empty() {
            return url.to_string();
        }
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingUrl);
    }
    Url::parse(trimmed).map_err(|source| Error::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

fn append_query(url: &mut Url, access_token: &str, pairs: &[(String, String)]) {
    let mut query = url.query_pairs_mut();
    query.append_pair(ACCESS_TOKEN_PARAM, access_token);
    for (name, value) in pairs {
        query.append_pair(name, value);
    }
}
