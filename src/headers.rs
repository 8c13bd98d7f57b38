//! The fixed header set attached to every outbound request.

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};

/// Non-standard header the API expects alongside `Content-Type`.
pub const CHARSET: &str = "charset";

/// Builds the request headers: `Accept` and `Content-Type` are both
/// `application/json` and `Charset` is `UTF-8`.
///
/// These are unconditional. Only the response side is content-negotiated.
pub fn request_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static(CHARSET),
        HeaderValue::from_static("UTF-8"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_header_set() {
        let headers = request_headers();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[CHARSET], "UTF-8");
    }
}
