//! Payload-level error detection.
//!
//! The API reports many failures inside an otherwise successful response:
//! an upstream gateway page, or a JSON object carrying an `error` member.
//! [`classify`] names which of these a payload is; [`has_error`] folds every
//! kind into one boolean.

use serde_json::{Deserializer, Map, Value};

/// Marker text returned by the upstream gateway when the API times out.
pub const GATEWAY_TIMEOUT_MARKER: &str = "Gateway Timeout";

/// The outcome of inspecting a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// A JSON object without an `error` member.
    Clean,

    /// The payload contains the gateway timeout marker.
    GatewayTimeout,

    /// A JSON object reporting an error. Holds the `error` member.
    ErrorField(Value),

    /// The payload is not a JSON object. Holds the parser's message.
    Malformed(String),
}

impl Verdict {
    /// Returns `true` for [`Verdict::Clean`].
    pub fn is_clean(&self) -> bool {
        matches!(self, Verdict::Clean)
    }

    /// Returns `true` for every verdict except [`Verdict::Clean`].
    pub fn is_error(&self) -> bool {
        !self.is_clean()
    }
}

/// Inspects a payload.
///
/// Checks run in order: the gateway timeout marker (case-sensitive substring),
/// then a JSON parse expecting an object, then the presence of a top-level
/// `error` member. Only the first JSON value is parsed; trailing content is
/// ignored.
///
/// # Examples
///
/// ```
/// use vr_client::classify::{classify, Verdict};
///
/// assert_eq!(classify(r#"{"name":"List A"}"#), Verdict::Clean);
/// assert_eq!(
///     classify(r#"{"error":"name_required"}"#),
///     Verdict::ErrorField("name_required".into())
/// );
/// assert_eq!(classify("<h1>504 Gateway Timeout</h1>"), Verdict::GatewayTimeout);
/// assert!(matches!(classify("{not json"), Verdict::Malformed(_)));
/// ```
pub fn classify(payload: &str) -> Verdict {
    if payload.contains(GATEWAY_TIMEOUT_MARKER) {
        return Verdict::GatewayTimeout;
    }

    // Only the first value counts; anything after it is ignored.
    let first = Deserializer::from_str(payload)
        .into_iter::<Map<String, Value>>()
        .next();

    match first {
        Some(Ok(mut root)) => match root.remove("error") {
            Some(error) => Verdict::ErrorField(error),
            None => Verdict::Clean,
        },
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Payload is not a JSON object");
            Verdict::Malformed(e.to_string())
        }
        None => {
            tracing::warn!("Payload is empty");
            Verdict::Malformed("empty payload".to_string())
        }
    }
}

/// Returns `true` if the payload represents a failure of any kind.
///
/// Never fails: an unparseable payload counts as an error.
///
/// ```
/// use vr_client::classify::has_error;
///
/// assert!(has_error(r#"{"error": "bad_request"}"#));
/// assert!(!has_error(r#"{"name": "List A", "url": "http://x/1"}"#));
/// assert!(has_error(""));
/// ```
pub fn has_error(payload: &str) -> bool {
    classify(payload).is_error()
}
