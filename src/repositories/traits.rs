use crate::domain::ContactId;
use crate::error::ContactResult;
use crate::models::{Contact, PageRequest};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage and retrieval. All list
/// operations order by last name, then first name, ascending.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve a single contact by ID, `None` when it does not exist.
    async fn get(&self, id: ContactId) -> ContactResult<Option<Contact>>;

    /// Retrieve one page of all contacts.
    async fn list(&self, page: PageRequest) -> ContactResult<Vec<Contact>>;

    /// Contacts whose first or last name contains `search_term`, ignoring case.
    ///
    /// Without a page request every match is returned.
    async fn search_by_name(
        &self,
        search_term: &str,
        page: Option<PageRequest>,
    ) -> ContactResult<Vec<Contact>>;

    /// Total number of contacts.
    async fn count(&self) -> ContactResult<u64>;

    /// Number of contacts matched by [`search_by_name`](Self::search_by_name).
    async fn count_by_name(&self, search_term: &str) -> ContactResult<u64>;

    /// Insert a new contact; the returned copy carries the assigned id.
    async fn create(&self, contact: &Contact) -> ContactResult<Contact>;

    /// Write back an existing contact if its version is still current.
    ///
    /// Fails with `NotFound` for an unknown id and `ConcurrencyConflict` when
    /// the stored version differs from `contact.version()`. The returned copy
    /// carries the incremented version.
    async fn update(&self, contact: &Contact) -> ContactResult<Contact>;

    /// Delete a contact.
    async fn delete(&self, id: ContactId) -> ContactResult<()>;
}
