//! Data models for the contact manager.
//!
//! This module contains the `Contact` aggregate with its embedded `Address`,
//! the boundary DTOs, and page requests.

pub mod address;
pub mod contact;
pub mod dto;
pub mod page;

pub use address::Address;
pub use contact::{Contact, ContactBuilder};
pub use dto::{fields, ContactDto, ContactListDto, SearchDto};
pub use page::PageRequest;
