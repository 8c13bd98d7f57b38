//! Request bodies and query options for the contact API resources.

use serde::Serialize;

/// A contact list to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactList {
    /// Display name of the list. The API rejects an empty name.
    pub name: String,
}

impl ContactList {
    /// Creates a list body with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A contact to create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// The contact's email address, which identifies it.
    pub email: String,

    /// Given name. Omitted from the body when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Family name. Omitted from the body when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Contact {
    /// Creates a contact with only an email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Sets the first name.
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Sets the last name.
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }
}

/// How many attributes a contact lookup returns, sent as the `type` query
/// parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DetailLevel {
    /// Identifying fields only.
    Basic,

    /// The commonly used profile fields.
    Standard,

    /// Every attribute, including custom fields.
    #[default]
    All,
}

impl DetailLevel {
    /// Returns the value sent as the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Basic => "basic",
            DetailLevel::Standard => "standard",
            DetailLevel::All => "all",
        }
    }
}

/// Window over a collection: skip `index` items and return at most `limit`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Number of items to skip. Left to the server when unset.
    pub index: Option<u32>,

    /// Maximum number of items to return. Left to the server when unset.
    pub limit: Option<u32>,
}

impl Pagination {
    /// Creates a window with both bounds set.
    pub fn new(index: u32, limit: u32) -> Self {
        Self {
            index: Some(index),
            limit: Some(limit),
        }
    }

    /// The query pairs for the set fields, `index` first.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(index) = self.index {
            pairs.push(("index".to_string(), index.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}
