//! Blocking HTTP transport with content-negotiated response reading.

use crate::config::TransportConfig;
use crate::reader::{ReadOptions, ReaderKind};
use crate::request::{Method, RequestSpec};
use crate::{Error, Payload, Result};
use http::header::CONTENT_TYPE;
use std::time::Instant;

/// Executes built requests and materializes their responses.
///
/// Calls block the current thread until the body has been read or a timeout
/// or connection fault occurs. The transport holds no per-call state and can
/// be shared between threads.
///
/// Do not create or drop a `Transport` from inside an async runtime; run it on
/// a blocking thread instead.
#[derive(Debug, Clone)]
pub struct Transport {
    http_client: reqwest::blocking::Client,
    config: TransportConfig,
}

impl Transport {
    /// Creates a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_deadline());

        if config.stale_connection_check {
            builder = builder.pool_max_idle_per_host(0);
        }

        let http_client = builder
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the configuration this transport was built with.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Sends `request` and reads the response body with the reader matching
    /// its declared content type.
    ///
    /// The response content is never interpreted: any status with a readable
    /// body is returned as a [`Payload`].
    ///
    /// # Errors
    ///
    /// * [`Error::UnsupportedMethod`] for a hand-built `Put` or `Delete` spec.
    /// * [`Error::Timeout`] / [`Error::Network`] if the exchange fails.
    /// * [`Error::Io`] if the body cannot be read to completion.
    pub fn execute(&self, request: RequestSpec) -> Result<Payload> {
        if matches!(request.method, Method::Put | Method::Delete) {
            return Err(Error::UnsupportedMethod(request.method));
        }

        let start_time = Instant::now();
        let redacted_url = request.redacted_url();

        tracing::debug!(
            method = %request.method,
            url = %redacted_url,
            has_body = request.body.is_some(),
            "Executing HTTP request"
        );

        let mut builder = self
            .http_client
            .request(request.method.into(), request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(|e| {
            let err = Error::from(e);
            tracing::warn!(
                error = %err,
                method = %request.method,
                url = %redacted_url,
                "Request failed"
            );
            err
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let reader = ReaderKind::for_content_type(content_type.as_deref());

        let options = ReadOptions {
            join_lines: self.config.join_body_lines,
        };
        let body = reader.read(response, options).map_err(|e| {
            tracing::warn!(
                error = %e,
                status = status.as_u16(),
                url = %redacted_url,
                "Failed to read response body"
            );
            Error::Io(e)
        })?;

        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or(""),
            reader = %reader,
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        Ok(Payload::new(body, status, content_type, reader, latency))
    }
}
