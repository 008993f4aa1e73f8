//! Contact aggregate: a person with an optional embedded address.

use super::address::Address;
use crate::domain::ContactId;
use std::fmt;

pub const MAX_LENGTH_EMAIL_ADDRESS: usize = 100;
pub const MAX_LENGTH_FIRST_NAME: usize = 50;
pub const MAX_LENGTH_LAST_NAME: usize = 100;
pub const MAX_LENGTH_PHONE_NUMBER: usize = 30;

/// A contact stored in the `contacts` table.
///
/// `id` is `None` until the contact has been persisted; the store assigns it
/// exactly once. `version` starts at 0 and is bumped by the store on every
/// successful update, so a write carrying an older version is rejected.
#[derive(Debug, Clone)]
pub struct Contact {
    id: Option<ContactId>,
    first_name: String,
    last_name: String,
    email_address: Option<String>,
    phone_number: Option<String>,
    address: Option<Address>,
    version: i64,
}

impl Contact {
    /// Start building a new, not yet persisted contact.
    pub fn builder(first_name: impl Into<String>, last_name: impl Into<String>) -> ContactBuilder {
        ContactBuilder::new(first_name, last_name)
    }

    /// Stamp the store-assigned identity and version onto this contact.
    ///
    /// Repositories call this after insert (version 0), after load, and after a
    /// successful update.
    pub fn persisted(mut self, id: ContactId, version: i64) -> Self {
        self.id = Some(id);
        self.version = version;
        self
    }

    pub fn id(&self) -> Option<ContactId> {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email_address(&self) -> Option<&str> {
        self.email_address.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    /// The embedded address; an address without any value reads as absent.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref().filter(|address| !address.is_empty())
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// "First Last", used in feedback messages.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Replace the personal fields wholesale.
    pub fn update(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email_address: Option<String>,
        phone_number: Option<String>,
    ) {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self.email_address = email_address;
        self.phone_number = phone_number;
    }

    /// Replace the address fields, creating the address first if there is none.
    pub fn update_address(
        &mut self,
        street_address: Option<String>,
        post_code: Option<String>,
        post_office: Option<String>,
        state: Option<String>,
        country: Option<String>,
    ) {
        self.address
            .get_or_insert_with(Address::default)
            .update(street_address, post_code, post_office, state, country);
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.email_address == other.email_address
            && self.phone_number == other.phone_number
            && self.address() == other.address()
            && self.version == other.version
    }
}

impl Eq for Contact {}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map(|id| id.to_string()).unwrap_or_else(|| "<new>".to_string());
        write!(
            f,
            "Contact[id={}, firstName={}, lastName={}, emailAddress={}, phoneNumber={}, address={}, version={}]",
            id,
            self.first_name,
            self.last_name,
            self.email_address.as_deref().unwrap_or(""),
            self.phone_number.as_deref().unwrap_or(""),
            self.address().map(|a| a.to_string()).unwrap_or_default(),
            self.version
        )
    }
}

/// Fluent construction of a new [`Contact`].
#[derive(Debug)]
pub struct ContactBuilder {
    built: Contact,
}

impl ContactBuilder {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            built: Contact {
                id: None,
                first_name: first_name.into(),
                last_name: last_name.into(),
                email_address: None,
                phone_number: None,
                address: None,
                version: 0,
            },
        }
    }

    pub fn email_address(mut self, email_address: Option<String>) -> Self {
        self.built.email_address = email_address;
        self
    }

    pub fn phone_number(mut self, phone_number: Option<String>) -> Self {
        self.built.phone_number = phone_number;
        self
    }

    pub fn address(
        mut self,
        street_address: Option<String>,
        post_code: Option<String>,
        post_office: Option<String>,
        state: Option<String>,
        country: Option<String>,
    ) -> Self {
        self.built.address = Some(Address::new(
            street_address,
            post_code,
            post_office,
            state,
            country,
        ));
        self
    }

    pub fn build(self) -> Contact {
        self.built
    }
}
