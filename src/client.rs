//! Client for the contact API resources.
//!
//! The [`RestClient`] type is the main entry point for making calls.
//! Use [`ClientBuilder`] to configure and create clients.

use crate::{
    classify,
    config::{Endpoint, TransportConfig},
    models::{Contact, ContactList, DetailLevel, Pagination},
    request::{Method, Params, RequestSpec},
    transport::Transport,
    Error, Payload, Result,
};
use serde::Serialize;
use std::sync::Arc;

/// A client for the contact API.
///
/// Every method blocks until the response body has been read. Results are
/// returned as [`Payload`]s, which callers classify with
/// [`RestClient::has_error`] or [`Payload::has_error`].
///
/// # Examples
///
/// ```no_run
/// use vr_client::{Contact, ContactList, Endpoint, RestClient};
///
/// # fn example() -> Result<(), vr_client::Error> {
/// let client = RestClient::builder()
///     .endpoint(Endpoint::new("https://vrapi.example.com/api/v1", "my-token"))
///     .build()?;
///
/// let created = client.create_contact_list(&ContactList::new("Newsletter"))?;
/// if client.has_error(&created) {
///     eprintln!("could not create list: {}", created);
///     return Ok(());
/// }
///
/// let list: serde_json::Value = serde_json::from_str(&created).unwrap();
/// let list_url = list["url"].as_str().unwrap();
/// let contact = Contact::new("ada@example.com").with_first_name("Ada");
/// println!("{}", client.create_contact(&contact, list_url)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    endpoint: Endpoint,
    transport: Transport,
}

impl RestClient {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.inner.endpoint
    }

    /// Runs the full pipeline for one call: builds the request for `url`,
    /// executes it and returns the materialized body.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vr_client::{Method, Params, RestClient};
    ///
    /// # fn example(client: &RestClient) -> Result<(), vr_client::Error> {
    /// let payload = client.execute(
    ///     "https://vrapi.example.com/api/v1/contacts/12",
    ///     Method::Get,
    ///     Params::query([("type", "basic")]),
    /// )?;
    /// println!("{}", payload);
    /// # Ok(())
    /// # }
    /// ```
    pub fn execute(&self, url: &str, method: Method, params: Params) -> Result<Payload> {
        let request = RequestSpec::build(url, method, params, self.inner.endpoint.access_token())?;
        self.inner.transport.execute(request)
    }

    /// Creates a contact list. POSTs `{"name": ...}` to `{base}/lists`.
    pub fn create_contact_list(&self, list: &ContactList) -> Result<Payload> {
        let url = self.inner.endpoint.resource_url("lists");
        self.post_json(&url, list)
    }

    /// Creates a contact inside the list at `list_url`.
    ///
    /// `list_url` is the fully qualified list URL returned by the API, e.g.
    /// `https://vrapi.example.com/api/v1/lists/1`.
    pub fn create_contact(&self, contact: &Contact, list_url: &str) -> Result<Payload> {
        let url = contacts_url(list_url);
        self.post_json(&url, contact)
    }

    /// Creates a contact that belongs to no list. POSTs to `{base}/contacts`.
    pub fn create_standalone_contact(&self, contact: &Contact) -> Result<Payload> {
        let url = self.inner.endpoint.resource_url("contacts");
        self.post_json(&url, contact)
    }

    /// Returns all contacts in the list at `list_url`.
    pub fn get_all_contacts(&self, list_url: &str) -> Result<Payload> {
        self.get_list_contacts(list_url, &Pagination::default())
    }

    /// Returns a window of the contacts in the list at `list_url`.
    pub fn get_list_contacts(&self, list_url: &str, pagination: &Pagination) -> Result<Payload> {
        self.execute(
            &contacts_url(list_url),
            Method::Get,
            Params::Query(pagination.to_query()),
        )
    }

    /// Returns every contact the user owns, across all lists.
    pub fn get_contacts(&self, pagination: &Pagination) -> Result<Payload> {
        let url = self.inner.endpoint.resource_url("contacts");
        self.execute(&url, Method::Get, Params::Query(pagination.to_query()))
    }

    /// Returns every attribute of the contact at `contact_url`.
    pub fn get_contact(&self, contact_url: &str) -> Result<Payload> {
        self.get_contact_with(contact_url, DetailLevel::default())
    }

    /// Returns the contact at `contact_url` at the given level of detail.
    pub fn get_contact_with(&self, contact_url: &str, detail: DetailLevel) -> Result<Payload> {
        self.execute(
            contact_url,
            Method::Get,
            Params::query([("type", detail.as_str())]),
        )
    }

    /// Returns the details of the list at `list_url`.
    pub fn get_list(&self, list_url: &str) -> Result<Payload> {
        self.execute(list_url, Method::Get, Params::None)
    }

    /// Returns the user's contact lists, optionally paginated.
    pub fn get_lists(&self, pagination: &Pagination) -> Result<Payload> {
        let url = self.inner.endpoint.resource_url("lists");
        self.execute(&url, Method::Get, Params::Query(pagination.to_query()))
    }

    /// Returns `true` if `payload` represents a failure.
    /// See [`classify::has_error`].
    pub fn has_error(&self, payload: &str) -> bool {
        classify::has_error(payload)
    }

    fn post_json<T: Serialize>(&self, url: &str, body: &T) -> Result<Payload> {
        let body =
            serde_json::to_string(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        self.execute(url, Method::Post, Params::Body(body))
    }
}

fn contacts_url(list_url: &str) -> String {
    format!("{}/contacts", list_url.trim_end_matches('/'))
}

/// Builder for configuring and creating a [`RestClient`].
///
/// # Examples
///
/// ```no_run
/// use vr_client::{ClientBuilder, Endpoint, TransportConfig};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), vr_client::Error> {
/// let client = ClientBuilder::new()
///     .endpoint(Endpoint::from_env()?)
///     .transport_config(TransportConfig::default().read_timeout(Duration::from_secs(30)))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    endpoint: Option<Endpoint>,
    transport_config: TransportConfig,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default transport settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint for all calls.
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the transport configuration.
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = config;
        self
    }

    /// Builds the configured `RestClient`.
    ///
    /// # Errors
    ///
    /// Returns an error if no endpoint was provided or the transport cannot
    /// be built.
    pub fn build(self) -> Result<RestClient> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| Error::Configuration("Endpoint is required".to_string()))?;

        tracing::debug!(base_url = %endpoint.base_url(), "Building API client");

        let transport = Transport::new(self.transport_config)?;

        Ok(RestClient {
            inner: Arc::new(ClientInner {
                endpoint,
                transport,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_url() {
        assert_eq!(
            contacts_url("https://api.example.com/lists/1"),
            "https://api.example.com/lists/1/contacts"
        );
        assert_eq!(
            contacts_url("https://api.example.com/lists/1/"),
            "https://api.example.com/lists/1/contacts"
        );
    }

    #[test]
    fn test_builder_requires_endpoint() {
        let err = ClientBuilder::new().build().err().unwrap();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_construction_errors_surface_before_io() {
        let client = RestClient::builder()
            .endpoint(Endpoint::new("http://127.0.0.1:9", "tok"))
            .build()
            .unwrap();

        assert!(matches!(
            client.execute("", Method::Get, Params::None),
            Err(Error::MissingUrl)
        ));
        assert!(matches!(
            client.execute("::not a url::", Method::Get, Params::None),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(matches!(
            client.execute("http://127.0.0.1:9/lists", Method::Put, Params::body("{}")),
            Err(Error::UnsupportedMethod(Method::Put))
        ));
        assert!(matches!(
            client.execute("http://127.0.0.1:9/lists/1", Method::Delete, Params::None),
            Err(Error::UnsupportedMethod(Method::Delete))
        ));
    }

    #[test]
    fn test_has_error_delegates_to_classifier() {
        let client = RestClient::builder()
            .endpoint(Endpoint::new("http://127.0.0.1:9", "tok"))
            .build()
            .unwrap();
        assert!(client.has_error(r#"{"error":"name_required"}"#));
        assert!(!client.has_error(r#"{"name":"Test List","url":"http://api/lists/1"}"#));
    }
}
