//! Postal address embedded in a contact.

use std::fmt;

pub const MAX_LENGTH_COUNTRY: usize = 20;
pub const MAX_LENGTH_POST_CODE: usize = 10;
pub const MAX_LENGTH_POST_OFFICE: usize = 40;
pub const MAX_LENGTH_STATE: usize = 20;
pub const MAX_LENGTH_STREET_ADDRESS: usize = 100;

/// Address value owned by a [`Contact`](super::Contact).
///
/// Has no identity of its own; it is stored in the `contacts` row of its owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street_address: Option<String>,
    pub post_code: Option<String>,
    pub post_office: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl Address {
    pub fn new(
        street_address: Option<String>,
        post_code: Option<String>,
        post_office: Option<String>,
        state: Option<String>,
        country: Option<String>,
    ) -> Self {
        Self {
            street_address,
            post_code,
            post_office,
            state,
            country,
        }
    }

    /// Overwrite all five fields.
    pub fn update(
        &mut self,
        street_address: Option<String>,
        post_code: Option<String>,
        post_office: Option<String>,
        state: Option<String>,
        country: Option<String>,
    ) {
        self.street_address = street_address;
        self.post_code = post_code;
        self.post_office = post_office;
        self.state = state;
        self.country = country;
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.street_address.is_none()
            && self.post_code.is_none()
            && self.post_office.is_none()
            && self.state.is_none()
            && self.country.is_none()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [
            &self.street_address,
            &self.post_code,
            &self.post_office,
            &self.state,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();

        write!(f, "{}", parts.join(", "))
    }
}
