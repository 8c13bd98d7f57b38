//! Walks through a typical session against a live endpoint.
//!
//! This example shows how to:
//! - Create a contact list and a contact inside it
//! - List the contacts of a list
//! - Fetch a contact at each detail level
//! - Detect an error reported inside a response
//!
//! Run with:
//! `VR_BASE_API_URL=https://vrapi.verticalresponse.com/api/v1 VR_ACCESS_TOKEN=... cargo run --example contact_flow`

use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use vr_client::{Contact, ContactList, DetailLevel, Endpoint, Error, RestClient};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("vr_client=debug,contact_flow=info")
        .init();

    let client = RestClient::builder()
        .endpoint(Endpoint::from_env()?)
        .build()?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    println!("=== Create a list ===");
    let created = client.create_contact_list(&ContactList::new(format!("List - {}", stamp)))?;
    if client.has_error(&created) {
        eprintln!("Create New List - Error JSON:\n{}", created);
        return Ok(());
    }
    println!("{}\n", created);

    let list_url = json_field(&created, "url");

    println!("=== Create a contact in the list ===");
    let contact =
        Contact::new(format!("l{stamp}c1@list{stamp}.com")).with_first_name("C1");
    let created_contact = client.create_contact(&contact, &list_url)?;
    if client.has_error(&created_contact) {
        eprintln!("Create Contact in List - Error JSON:\n{}", created_contact);
        return Ok(());
    }
    println!("{}\n", created_contact);

    println!("=== Contacts in the list ===");
    let contacts = client.get_all_contacts(&list_url)?;
    println!("{}\n", contacts);

    let first_contact_url = serde_json::from_str::<Value>(&contacts)
        .ok()
        .and_then(|root| root["items"][0]["url"].as_str().map(str::to_string));

    if let Some(contact_url) = first_contact_url {
        for detail in [DetailLevel::Basic, DetailLevel::Standard, DetailLevel::All] {
            let details = client.get_contact_with(&contact_url, detail)?;
            println!("=== Contact details ({}) ===\n{}\n", detail.as_str(), details);
        }
    }

    println!("=== Create a list with invalid params ===");
    let rejected = client.create_contact_list(&ContactList::new(""))?;
    if rejected.has_error() {
        eprintln!("Error JSON:\n{}", rejected);
        eprintln!("Verdict: {:?}", rejected.verdict());
    }

    Ok(())
}

fn json_field(body: &str, field: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|root| root[field].as_str().map(str::to_string))
        .unwrap_or_default()
}
