//! Contact controller.
//!
//! Framework-independent request coordination: validates bound form objects,
//! calls the [`ContactService`], and decides which view to show or where to
//! redirect. The axum handlers in [`super::handlers`] only translate HTTP to
//! these calls and render the outcome.

use super::messages::MessageSource;
use crate::domain::{ContactId, ValidationErrors};
use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, ContactDto, ContactListDto, SearchDto};
use crate::services::ContactService;
use std::sync::Arc;
use tracing::debug;

pub const HOME_VIEW: &str = "index";
pub const ADD_CONTACT_VIEW: &str = "contact/add";
pub const CONTACT_VIEW: &str = "contact/view";
pub const UPDATE_CONTACT_VIEW: &str = "contact/update";
pub const SEARCH_RESULT_VIEW: &str = "contact/searchResults";

pub const REQUEST_MAPPING_VIEW_CONTACT: &str = "/contact/{id}";

pub const FEEDBACK_MESSAGE_KEY_CONTACT_ADDED: &str = "feedback.message.contact.added";
pub const FEEDBACK_MESSAGE_KEY_CONTACT_UPDATED: &str = "feedback.message.contact.updated";
pub const FEEDBACK_MESSAGE_KEY_CONTACT_DELETED: &str = "feedback.message.contact.deleted";

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Data handed to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    /// Add/update form with the errors of the last submission.
    ContactForm {
        form: ContactDto,
        errors: ValidationErrors,
    },
    Contact(Contact),
    /// Paged contact list; search result pages carry the term when one was given.
    ContactList {
        search_term: Option<String>,
        page_size: u32,
    },
}

/// A named view plus its model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub name: &'static str,
    pub model: Model,
}

impl View {
    fn new(name: &'static str, model: Model) -> Self {
        Self { name, model }
    }
}

/// Redirect after a successful write, carrying a flash feedback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub contact_id: ContactId,
    pub feedback: String,
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    View(View),
    Redirect(Redirect),
}

/// HTTP-facing coordinator for contact pages and list endpoints.
pub struct ContactController {
    service: Arc<dyn ContactService>,
    messages: Arc<dyn MessageSource>,
    default_page_size: u32,
    max_page_size: u32,
}

impl ContactController {
    pub fn new(service: Arc<dyn ContactService>, messages: Arc<dyn MessageSource>) -> Self {
        Self {
            service,
            messages,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }

    /// Override the page size used when a request names none, and its upper bound.
    pub fn with_page_sizes(mut self, default_page_size: u32, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size.max(1);
        self.default_page_size = default_page_size.clamp(1, self.max_page_size);
        self
    }

    pub fn show_home_page(&self) -> View {
        View::new(HOME_VIEW, self.contact_list(None))
    }

    pub fn show_add_contact_page(&self) -> View {
        View::new(
            ADD_CONTACT_VIEW,
            Model::ContactForm {
                form: ContactDto::default(),
                errors: ValidationErrors::new(),
            },
        )
    }

    /// Validate and add a contact; invalid input goes back to the form.
    pub async fn add_contact(&self, form: ContactDto) -> ContactResult<Outcome> {
        if let Err(errors) = form.validate() {
            debug!(fields = ?errors.fields(), "Add contact form has errors");
            return Ok(Outcome::View(View::new(
                ADD_CONTACT_VIEW,
                Model::ContactForm { form, errors },
            )));
        }

        let added = self.service.add(&form).await?;
        self.redirect_to_contact(&added, FEEDBACK_MESSAGE_KEY_CONTACT_ADDED)
            .map(Outcome::Redirect)
    }

    pub async fn show_contact_page(&self, id: ContactId) -> ContactResult<View> {
        let contact = self.service.find_by_id(id).await?;
        Ok(View::new(CONTACT_VIEW, Model::Contact(contact)))
    }

    pub async fn show_update_contact_page(&self, id: ContactId) -> ContactResult<View> {
        let contact = self.service.find_by_id(id).await?;
        Ok(View::new(
            UPDATE_CONTACT_VIEW,
            Model::ContactForm {
                form: ContactDto::from(&contact),
                errors: ValidationErrors::new(),
            },
        ))
    }

    /// Validate and update a contact; invalid input goes back to the form.
    pub async fn update_contact(&self, form: ContactDto) -> ContactResult<Outcome> {
        if let Err(errors) = form.validate() {
            debug!(fields = ?errors.fields(), "Update contact form has errors");
            return Ok(Outcome::View(View::new(
                UPDATE_CONTACT_VIEW,
                Model::ContactForm { form, errors },
            )));
        }

        let updated = self.service.update(&form).await?;
        self.redirect_to_contact(&updated, FEEDBACK_MESSAGE_KEY_CONTACT_UPDATED)
            .map(Outcome::Redirect)
    }

    /// Delete a contact and return the feedback text.
    pub async fn delete_contact(&self, id: ContactId) -> ContactResult<String> {
        let deleted = self.service.delete_by_id(id).await?;
        Ok(self
            .messages
            .message(FEEDBACK_MESSAGE_KEY_CONTACT_DELETED, &[&deleted.full_name()]))
    }

    pub fn show_search_result_page(&self, search_term: impl Into<String>) -> View {
        View::new(SEARCH_RESULT_VIEW, self.contact_list(Some(search_term.into())))
    }

    pub fn show_search_result_page_when_search_term_is_not_given(&self) -> View {
        View::new(SEARCH_RESULT_VIEW, self.contact_list(None))
    }

    /// One page of all contacts; missing paging parameters use the defaults.
    pub async fn find_contacts_for_page(
        &self,
        dto: &SearchDto,
    ) -> ContactResult<Vec<ContactListDto>> {
        let page_index = dto.page_index.unwrap_or(0);
        let page_size = self.bounded_page_size(dto.page_size.unwrap_or(self.default_page_size));

        let contacts = self.service.find_all_for_page(page_index, page_size).await?;
        Ok(to_list_dtos(&contacts))
    }

    pub async fn search(&self, dto: &SearchDto) -> ContactResult<Vec<ContactListDto>> {
        let mut bounded = dto.clone();
        bounded.page_size = dto.page_size.map(|size| self.bounded_page_size(size));

        let contacts = self.service.search(&bounded).await?;
        Ok(to_list_dtos(&contacts))
    }

    pub async fn count(&self) -> ContactResult<u64> {
        self.service.count().await
    }

    pub async fn count_for_search(&self, dto: &SearchDto) -> ContactResult<u64> {
        self.service.count_for_search(dto).await
    }

    fn contact_list(&self, search_term: Option<String>) -> Model {
        Model::ContactList {
            search_term,
            page_size: self.default_page_size,
        }
    }

    fn bounded_page_size(&self, page_size: u32) -> u32 {
        page_size.clamp(1, self.max_page_size)
    }

    fn redirect_to_contact(&self, contact: &Contact, message_key: &str) -> ContactResult<Redirect> {
        let contact_id = contact.id().ok_or_else(|| {
            ContactError::InvalidData("service returned a contact without id".to_string())
        })?;

        Ok(Redirect {
            path: REQUEST_MAPPING_VIEW_CONTACT.replace("{id}", &contact_id.to_string()),
            contact_id,
            feedback: self.messages.message(message_key, &[&contact.full_name()]),
        })
    }
}

fn to_list_dtos(contacts: &[Contact]) -> Vec<ContactListDto> {
    contacts.iter().map(ContactListDto::from).collect()
}
