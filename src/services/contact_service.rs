//! Contact service layer.
//!
//! Translates between the boundary DTOs and the `Contact` aggregate and turns
//! missing contacts into `NotFound`. Input is validated before it gets here.

use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, ContactDto, PageRequest, SearchDto};
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Build a contact from the form and persist it.
    async fn add(&self, dto: &ContactDto) -> ContactResult<Contact>;

    /// Apply the form to the stored contact `dto.id`.
    ///
    /// The write is conditional on the version in the form (or, when the form
    /// carries none, the version read by this call).
    async fn update(&self, dto: &ContactDto) -> ContactResult<Contact>;

    /// Delete a contact, returning what was deleted.
    async fn delete_by_id(&self, id: ContactId) -> ContactResult<Contact>;

    async fn find_by_id(&self, id: ContactId) -> ContactResult<Contact>;

    /// One page of all contacts ordered by last name, then first name.
    async fn find_all_for_page(&self, page_index: u32, page_size: u32)
        -> ContactResult<Vec<Contact>>;

    /// Contacts whose first or last name contains the search term, ignoring case.
    async fn search(&self, dto: &SearchDto) -> ContactResult<Vec<Contact>>;

    /// Total number of contacts.
    async fn count(&self) -> ContactResult<u64>;

    /// Number of contacts matched by [`search`](Self::search).
    async fn count_for_search(&self, dto: &SearchDto) -> ContactResult<u64>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }

    async fn load(&self, id: ContactId) -> ContactResult<Contact> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| ContactError::not_found(id))
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn add(&self, dto: &ContactDto) -> ContactResult<Contact> {
        debug!(?dto, "Adding contact");

        let added = self.repository.create(&dto.to_contact()).await?;

        info!(contact_id = ?added.id(), "Contact added");
        Ok(added)
    }

    async fn update(&self, dto: &ContactDto) -> ContactResult<Contact> {
        debug!(?dto, "Updating contact");

        let id = dto
            .id
            .ok_or_else(|| ContactError::NotFound("contact without id".to_string()))?;
        let stored = self.load(id).await?;

        let expected_version = dto.version.unwrap_or_else(|| stored.version());
        let mut contact = stored.persisted(id, expected_version);
        dto.apply_to(&mut contact);

        let updated = self.repository.update(&contact).await?;

        info!(contact_id = %id, version = updated.version(), "Contact updated");
        Ok(updated)
    }

    async fn delete_by_id(&self, id: ContactId) -> ContactResult<Contact> {
        debug!(contact_id = %id, "Deleting contact");

        let deleted = self.load(id).await?;
        self.repository.delete(id).await?;

        info!(contact_id = %id, "Contact deleted");
        Ok(deleted)
    }

    async fn find_by_id(&self, id: ContactId) -> ContactResult<Contact> {
        debug!(contact_id = %id, "Finding contact");
        self.load(id).await
    }

    async fn find_all_for_page(
        &self,
        page_index: u32,
        page_size: u32,
    ) -> ContactResult<Vec<Contact>> {
        debug!(page_index, page_size, "Finding contacts for page");
        self.repository
            .list(PageRequest::new(page_index, page_size))
            .await
    }

    async fn search(&self, dto: &SearchDto) -> ContactResult<Vec<Contact>> {
        debug!(search_term = %dto.term(), "Searching contacts");
        self.repository.search_by_name(dto.term(), dto.page()).await
    }

    async fn count(&self) -> ContactResult<u64> {
        self.repository.count().await
    }

    async fn count_for_search(&self, dto: &SearchDto) -> ContactResult<u64> {
        debug!(search_term = %dto.term(), "Counting contacts for search");
        self.repository.count_by_name(dto.term()).await
    }
}
