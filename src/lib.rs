//! # vr-client - a blocking client for the VerticalResponse contact API
//!
//! Every call goes through the same pipeline: a `(url, method, params)`
//! triple is built into a request carrying the access token and a fixed
//! header set, the request is executed with connect/read timeouts, and the
//! response body is read by a reader chosen from its declared content type.
//! The resulting [`Payload`] is plain text; whether it describes a failure is
//! decided separately by the [`classify`] module.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vr_client::{ContactList, DetailLevel, Endpoint, RestClient};
//!
//! fn main() -> Result<(), vr_client::Error> {
//!     let client = RestClient::builder()
//!         .endpoint(Endpoint::from_properties_file("config.properties")?)
//!         .build()?;
//!
//!     let created = client.create_contact_list(&ContactList::new("Test List"))?;
//!     if created.has_error() {
//!         eprintln!("Create list failed: {}", created);
//!         return Ok(());
//!     }
//!     println!("New list: {}", created);
//!
//!     let contact = client.get_contact_with(
//!         "https://vrapi.example.com/api/v1/contacts/12",
//!         DetailLevel::Basic,
//!     )?;
//!     println!("Contact: {}", contact);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Construction errors (bad URL, unsupported method) and transport errors
//! (timeouts, refused connections, unreadable bodies) are returned as
//! [`Error`]. Failures the API reports inside a response are not errors; they
//! show up when the payload is classified:
//!
//! ```no_run
//! use vr_client::classify::Verdict;
//! use vr_client::{ContactList, Error, RestClient};
//!
//! # fn example(client: &RestClient) -> Result<(), Error> {
//! match client.create_contact_list(&ContactList::new("")) {
//!     Ok(payload) => match payload.verdict() {
//!         Verdict::Clean => println!("created: {}", payload),
//!         Verdict::ErrorField(error) => eprintln!("rejected: {}", error),
//!         Verdict::GatewayTimeout => eprintln!("gateway timed out"),
//!         Verdict::Malformed(reason) => eprintln!("unreadable reply: {}", reason),
//!     },
//!     Err(e) if e.is_transport() => eprintln!("call failed: {}", e),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod classify;
mod client;
pub mod config;
mod error;
pub mod headers;
pub mod models;
pub mod reader;
pub mod request;
mod response;
mod transport;

pub use client::{ClientBuilder, RestClient};
pub use config::{Endpoint, TransportConfig};
pub use error::{Error, Result};
pub use models::{Contact, ContactList, DetailLevel, Pagination};
pub use reader::ReaderKind;
pub use request::{Method, Params, RequestSpec};
pub use response::Payload;
pub use transport::Transport;
