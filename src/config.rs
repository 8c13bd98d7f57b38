//! Endpoint and transport configuration.

use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Properties key holding the base API URL.
pub const BASE_API_URL_KEY: &str = "base_api_url";
/// Properties key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Environment variable read by [`Endpoint::from_env`] for the base API URL.
pub const BASE_API_URL_ENV: &str = "VR_BASE_API_URL";
/// Environment variable read by [`Endpoint::from_env`] for the access token.
pub const ACCESS_TOKEN_ENV: &str = "VR_ACCESS_TOKEN";

/// The remote service instance: a base API URL plus the access token sent
/// with every call.
///
/// Immutable once built and safe to share between threads.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
    access_token: String,
}

impl Endpoint {
    /// Creates an endpoint. A trailing `/` on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Parses `base_api_url` and `access_token` out of properties text.
    ///
    /// Follows the Java properties format. The key ends at the first
    /// unescaped `=`, `:` or whitespace, so `key=value`, `key: value` and
    /// `key value` are all accepted. Blank lines and lines starting with `#`
    /// or `!` are ignored. A trailing `\` continues the entry on the next
    /// line, and `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Endpoint`] if either key is missing or empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use vr_client::Endpoint;
    ///
    /// let endpoint = Endpoint::from_properties_str(
    ///     "# api settings\nbase_api_url=https://api.example.com/api/v1\naccess_token=abc\n",
    /// )?;
    /// assert_eq!(endpoint.base_url(), "https://api.example.com/api/v1");
    /// # Ok::<(), vr_client::Error>(())
    /// ```
    pub fn from_properties_str(text: &str) -> Result<Self> {
        let mut base_url = None;
        let mut access_token = None;

        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            match key.as_str() {
                BASE_API_URL_KEY => base_url = Some(value),
                ACCESS_TOKEN_KEY => access_token = Some(value),
                _ => {}
            }
        }

        Ok(Self::new(
            required(base_url, BASE_API_URL_KEY)?,
            required(access_token, ACCESS_TOKEN_KEY)?,
        ))
    }

    /// Reads a properties file; see [`Endpoint::from_properties_str`].
    pub fn from_properties_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Endpoint(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_properties_str(&text)
    }

    /// Reads `VR_BASE_API_URL` and `VR_ACCESS_TOKEN` from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            required(std::env::var(BASE_API_URL_ENV).ok(), BASE_API_URL_ENV)?,
            required(std::env::var(ACCESS_TOKEN_ENV).ok(), ACCESS_TOKEN_ENV)?,
        ))
    }

    /// The base API URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Joins a resource path onto the base URL.
    pub fn resource_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("access_token", &"***")
            .finish()
    }
}

/// Joins continued lines and drops comments and blank lines.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for raw in text.lines() {
        let line = raw.trim_start();
        if !continuing && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }
        let backslashes = line.chars().rev().take_while(|&c| c == '\\').count();
        if backslashes % 2 == 1 {
            current.push_str(&line[..line.len() - 1]);
            continuing = true;
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits a logical line into its unescaped key and value.
fn split_entry(line: &str) -> (String, String) {
    let mut escaped = false;
    let key_end = line
        .char_indices()
        .find(|&(_, c)| {
            let separator = !escaped && (c == '=' || c == ':' || c.is_whitespace());
            escaped = !escaped && c == '\\';
            separator
        })
        .map_or(line.len(), |(i, _)| i);

    let rest = line[key_end..].trim_start();
    let value = rest.strip_prefix(['=', ':']).unwrap_or(rest).trim_start();
    (unescape(&line[..key_end]), unescape(value))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn required(value: Option<String>, key: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Endpoint(format!("{} is not set", key))),
    }
}

/// Timeouts and connection behaviour for the HTTP transport.
///
/// Every timeout defaults to 5 seconds and stale-connection checking is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,

    /// Time allowed to receive the response once connected.
    pub read_timeout: Duration,

    /// Time allowed to obtain a connection for the request. Added to
    /// `read_timeout` to form the per-request deadline.
    pub connection_request_timeout: Duration,

    /// Never reuse idle connections, so a call cannot land on a stale one.
    pub stale_connection_check: bool,

    /// Join response lines without separators when reading JSON bodies,
    /// reproducing the wire behaviour of older clients of this API.
    pub join_body_lines: bool,
}

/// Default value of every transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            connection_request_timeout: DEFAULT_TIMEOUT,
            stale_connection_check: true,
            join_body_lines: false,
        }
    }
}

impl TransportConfig {
    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Sets the connection-acquisition timeout.
    pub fn connection_request_timeout(mut self, timeout: Duration) -> Self {
        self.connection_request_timeout = timeout;
        self
    }

    /// Enables or disables stale-connection checking.
    pub fn stale_connection_check(mut self, enabled: bool) -> Self {
        self.stale_connection_check = enabled;
        self
    }

    /// Enables or disables line joining in the JSON reader.
    pub fn join_body_lines(mut self, enabled: bool) -> Self {
        self.join_body_lines = enabled;
        self
    }

    /// The deadline for a whole request once the connection is being sought.
    pub fn request_deadline(&self) -> Duration {
        self.read_timeout + self.connection_request_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_parsing() {
        let text = "\
# VerticalResponse settings
! legacy comment

base_api_url = https://vrapi.example.com/api/v1/
access_token: tok=with=equals
unrelated=1
";
        let endpoint = Endpoint::from_properties_str(text).unwrap();
        assert_eq!(endpoint.base_url(), "https://vrapi.example.com/api/v1");
        assert_eq!(endpoint.access_token(), "tok=with=equals");
    }

    #[test]
    fn test_properties_whitespace_separator() {
        let text = "base_api_url https://vrapi.example.com/api/v1\naccess_token\tabc\n";
        let endpoint = Endpoint::from_properties_str(text).unwrap();
        assert_eq!(endpoint.base_url(), "https://vrapi.example.com/api/v1");
        assert_eq!(endpoint.access_token(), "abc");
    }

    #[test]
    fn test_properties_escapes_and_continuations() {
        let text = "\
base_api_url = https://vrapi.example.com/\\
    api/v1
access_token = a\\:b\\u0041\\\\
# access_token = ignored
";
        let endpoint = Endpoint::from_properties_str(text).unwrap();
        assert_eq!(endpoint.base_url(), "https://vrapi.example.com/api/v1");
        assert_eq!(endpoint.access_token(), "a:bA\\");
    }

    #[test]
    fn test_properties_missing_keys() {
        let err = Endpoint::from_properties_str("base_api_url=https://x\n").unwrap_err();
        assert!(matches!(err, Error::Endpoint(ref m) if m.contains("access_token")));

        let err = Endpoint::from_properties_str("base_api_url=\naccess_token=t").unwrap_err();
        assert!(matches!(err, Error::Endpoint(ref m) if m.contains("base_api_url")));
    }

    #[test]
    fn test_properties_file_not_found() {
        let err = Endpoint::from_properties_file("/nonexistent/config.properties").unwrap_err();
        assert!(matches!(err, Error::Endpoint(_)));
    }

    #[test]
    fn test_resource_url_and_redacted_debug() {
        let endpoint = Endpoint::new("https://api.example.com/api/v1/", "secret");
        assert_eq!(
            endpoint.resource_url("/lists"),
            "https://api.example.com/api/v1/lists"
        );
        assert_eq!(
            endpoint.resource_url("lists"),
            "https://api.example.com/api/v1/lists"
        );
        let debug = format!("{:?}", endpoint);
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_transport_defaults() {
        let config = TransportConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_millis(5000));
        assert_eq!(config.read_timeout, Duration::from_millis(5000));
        assert_eq!(config.connection_request_timeout, Duration::from_millis(5000));
        assert!(config.stale_connection_check);
        assert!(!config.join_body_lines);
        assert_eq!(config.request_deadline(), Duration::from_secs(10));
    }

    #[test]
    fn test_transport_setters() {
        let config = TransportConfig::default()
            .connect_timeout(Duration::from_millis(100))
            .read_timeout(Duration::from_millis(200))
            .connection_request_timeout(Duration::from_millis(50))
            .stale_connection_check(false)
            .join_body_lines(true);
        assert_eq!(config.connect_timeout, Duration::from_millis(100));
        assert_eq!(config.request_deadline(), Duration::from_millis(250));
        assert!(!config.stale_connection_check);
        assert!(config.join_body_lines);
    }
}
