//! The materialized result of a call.
//!
//! A [`Payload`] is the body text produced by the selected reader, together
//! with a little metadata about the HTTP exchange. Callers usually treat it
//! as a string and classify it with [`Payload::has_error`].

use crate::classify::{self, Verdict};
use crate::reader::ReaderKind;
use http::StatusCode;
use std::time::Duration;

/// The body of a response, read to completion, plus exchange metadata.
///
/// A non-2xx status is not an error at this layer. The body is returned as-is
/// and its meaning is left to [`classify`](crate::classify).
///
/// # Examples
///
/// ```no_run
/// use vr_client::{ContactList, RestClient};
///
/// # fn example(client: &RestClient) -> Result<(), vr_client::Error> {
/// let payload = client.create_contact_list(&ContactList::new("Test List"))?;
/// if payload.has_error() {
///     eprintln!("list creation failed: {}", payload.body);
/// } else {
///     println!("created in {:?}: {}", payload.latency, &*payload);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Payload {
    /// The response body as text.
    pub body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The declared `Content-Type`, if any.
    pub content_type: Option<String>,

    /// The reader chosen for the declared content type.
    pub reader: ReaderKind,

    /// Time from sending the request until the body was fully read.
    pub latency: Duration,
}

impl Payload {
    /// Creates a new `Payload`.
    pub fn new(
        body: String,
        status: StatusCode,
        content_type: Option<String>,
        reader: ReaderKind,
        latency: Duration,
    ) -> Self {
        Self {
            body,
            status,
            content_type,
            reader,
            latency,
        }
    }

    /// Classifies the body. See [`classify::classify`].
    pub fn verdict(&self) -> Verdict {
        classify::classify(&self.body)
    }

    /// Returns `true` if the body represents a failure.
    ///
    /// ```
    /// # use vr_client::{Payload, ReaderKind};
    /// # use http::StatusCode;
    /// # use std::time::Duration;
    /// let payload = Payload::new(
    ///     r#"{"error":"name_required"}"#.to_string(),
    ///     StatusCode::UNPROCESSABLE_ENTITY,
    ///     Some("application/json".to_string()),
    ///     ReaderKind::Json,
    ///     Duration::from_millis(12),
    /// );
    /// assert!(payload.has_error());
    /// ```
    pub fn has_error(&self) -> bool {
        classify::has_error(&self.body)
    }

    /// Consumes the payload, returning the body text.
    pub fn into_body(self) -> String {
        self.body
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.body
    }
}

impl std::ops::Deref for Payload {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.body
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(body: &str) -> Payload {
        Payload::new(
            body.to_string(),
            StatusCode::OK,
            Some("application/json".to_string()),
            ReaderKind::Json,
            Duration::from_millis(1),
        )
    }

    #[test]
    fn test_payload_derefs_to_body() {
        let p = payload(r#"{"name":"A"}"#);
        assert!(p.contains("\"A\""));
        assert_eq!(p.to_string(), r#"{"name":"A"}"#);
        assert_eq!(p.as_ref(), p.body.as_str());
        assert_eq!(p.into_body(), r#"{"name":"A"}"#);
    }

    #[test]
    fn test_payload_verdict() {
        assert!(!payload(r#"{"name":"A"}"#).has_error());
        assert_eq!(payload("{}").verdict(), Verdict::Clean);
        assert!(payload("Gateway Timeout").has_error());
    }
}
