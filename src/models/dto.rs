//! Boundary data-transfer objects.
//!
//! - [`ContactDto`]: add/update form object, validated before it reaches the service.
//! - [`ContactListDto`]: row shape returned by the list and search endpoints.
//! - [`SearchDto`]: search term and paging parameters.

use super::address::{
    MAX_LENGTH_COUNTRY, MAX_LENGTH_POST_CODE, MAX_LENGTH_POST_OFFICE, MAX_LENGTH_STATE,
    MAX_LENGTH_STREET_ADDRESS,
};
use super::contact::{
    Contact, MAX_LENGTH_EMAIL_ADDRESS, MAX_LENGTH_FIRST_NAME, MAX_LENGTH_LAST_NAME,
    MAX_LENGTH_PHONE_NUMBER,
};
use super::page::PageRequest;
use crate::domain::{ContactId, FieldValidator, ValidationErrors};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Form field names as submitted by HTML forms and reported in field errors.
pub mod fields {
    pub const COUNTRY: &str = "country";
    pub const EMAIL_ADDRESS: &str = "emailAddress";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const PHONE_NUMBER: &str = "phoneNumber";
    pub const POST_CODE: &str = "postCode";
    pub const POST_OFFICE: &str = "postOffice";
    pub const STATE: &str = "state";
    pub const STREET_ADDRESS: &str = "streetAddress";
}

/// Empty form inputs bind as `None` instead of failing to parse.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Form object for adding and updating contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<ContactId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email_address: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub street_address: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub post_code: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub post_office: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub country: Option<String>,
    /// Version the client read; carried through the update form.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub version: Option<i64>,
}

impl ContactDto {
    /// Check required fields, length bounds and the email format.
    ///
    /// Reports at most one error per field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut validator = FieldValidator::new();
        validator
            .required(fields::FIRST_NAME, self.first_name.as_deref(), MAX_LENGTH_FIRST_NAME)
            .required(fields::LAST_NAME, self.last_name.as_deref(), MAX_LENGTH_LAST_NAME)
            .email(fields::EMAIL_ADDRESS, self.email_address.as_deref(), MAX_LENGTH_EMAIL_ADDRESS)
            .optional(fields::PHONE_NUMBER, self.phone_number.as_deref(), MAX_LENGTH_PHONE_NUMBER)
            .optional(fields::STREET_ADDRESS, self.street_address.as_deref(), MAX_LENGTH_STREET_ADDRESS)
            .optional(fields::POST_CODE, self.post_code.as_deref(), MAX_LENGTH_POST_CODE)
            .optional(fields::POST_OFFICE, self.post_office.as_deref(), MAX_LENGTH_POST_OFFICE)
            .optional(fields::STATE, self.state.as_deref(), MAX_LENGTH_STATE)
            .optional(fields::COUNTRY, self.country.as_deref(), MAX_LENGTH_COUNTRY);
        validator.finish()
    }

    /// Build a new, unpersisted contact from the form values.
    pub fn to_contact(&self) -> Contact {
        Contact::builder(
            self.first_name.clone().unwrap_or_default(),
            self.last_name.clone().unwrap_or_default(),
        )
        .email_address(self.email_address.clone())
        .phone_number(self.phone_number.clone())
        .address(
            self.street_address.clone(),
            self.post_code.clone(),
            self.post_office.clone(),
            self.state.clone(),
            self.country.clone(),
        )
        .build()
    }

    /// Apply the form values to an existing contact.
    pub fn apply_to(&self, contact: &mut Contact) {
        contact.update(
            self.first_name.clone().unwrap_or_default(),
            self.last_name.clone().unwrap_or_default(),
            self.email_address.clone(),
            self.phone_number.clone(),
        );
        contact.update_address(
            self.street_address.clone(),
            self.post_code.clone(),
            self.post_office.clone(),
            self.state.clone(),
            self.country.clone(),
        );
    }
}

impl From<&Contact> for ContactDto {
    fn from(contact: &Contact) -> Self {
        let address = contact.address();
        Self {
            id: contact.id(),
            first_name: Some(contact.first_name().to_string()),
            last_name: Some(contact.last_name().to_string()),
            email_address: contact.email_address().map(str::to_string),
            phone_number: contact.phone_number().map(str::to_string),
            street_address: address.and_then(|a| a.street_address.clone()),
            post_code: address.and_then(|a| a.post_code.clone()),
            post_office: address.and_then(|a| a.post_office.clone()),
            state: address.and_then(|a| a.state.clone()),
            country: address.and_then(|a| a.country.clone()),
            version: contact.id().map(|_| contact.version()),
        }
    }
}

/// One row of a contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactListDto {
    pub id: Option<ContactId>,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Contact> for ContactListDto {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id(),
            first_name: contact.first_name().to_string(),
            last_name: contact.last_name().to_string(),
        }
    }
}

/// Search term and paging parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDto {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub search_term: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page_index: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page_size: Option<u32>,
}

impl SearchDto {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: Some(search_term.into()),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page_index: u32, page_size: u32) -> Self {
        self.page_index = Some(page_index);
        self.page_size = Some(page_size);
        self
    }

    /// The term to match; an absent term matches every contact.
    pub fn term(&self) -> &str {
        self.search_term.as_deref().unwrap_or("")
    }

    /// Paging applies only when both index and size are given.
    pub fn page(&self) -> Option<PageRequest> {
        match (self.page_index, self.page_size) {
            (Some(index), Some(size)) => Some(PageRequest::new(index, size)),
            _ => None,
        }
    }
}
