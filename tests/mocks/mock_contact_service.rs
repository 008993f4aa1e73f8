use async_trait::async_trait;
use contact_manager::domain::ContactId;
use contact_manager::error::{ContactError, ContactResult};
use contact_manager::models::{Contact, ContactDto, SearchDto};
use contact_manager::services::ContactService;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// What single-contact calls answer with.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Answer {
    Contact(Contact),
    NotFound,
    Conflict,
}

/// Mock contact service for controller and route tests.
///
/// Answers with canned values and records every call with its arguments.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactService {
    answer: Arc<Mutex<Answer>>,
    contacts: Arc<Mutex<Vec<Contact>>>,
    count: Arc<Mutex<u64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    dtos: Arc<Mutex<Vec<ContactDto>>>,
    searches: Arc<Mutex<Vec<SearchDto>>>,
    pages: Arc<Mutex<Vec<(u32, u32)>>>,
}

#[allow(dead_code)]
impl MockContactService {
    /// Create a mock answering NotFound, an empty list and a zero count.
    pub fn new() -> Self {
        Self {
            answer: Arc::new(Mutex::new(Answer::NotFound)),
            contacts: Arc::new(Mutex::new(Vec::new())),
            count: Arc::new(Mutex::new(0)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            dtos: Arc::new(Mutex::new(Vec::new())),
            searches: Arc::new(Mutex::new(Vec::new())),
            pages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn answer_with(&self, answer: Answer) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn return_contacts(&self, contacts: Vec<Contact>) {
        *self.contacts.lock().unwrap() = contacts;
    }

    pub fn return_count(&self, count: u64) {
        *self.count.lock().unwrap() = count;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Total number of calls across all methods.
    pub fn total_call_count(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    /// Form objects passed to `add` and `update`, in call order.
    pub fn received_dtos(&self) -> Vec<ContactDto> {
        self.dtos.lock().unwrap().clone()
    }

    /// Search objects passed to `search` and `count_for_search`, in call order.
    pub fn received_searches(&self) -> Vec<SearchDto> {
        self.searches.lock().unwrap().clone()
    }

    /// `(page_index, page_size)` pairs passed to `find_all_for_page`.
    pub fn received_pages(&self) -> Vec<(u32, u32)> {
        self.pages.lock().unwrap().clone()
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn answer(&self, id: Option<ContactId>) -> ContactResult<Contact> {
        match self.answer.lock().unwrap().clone() {
            Answer::Contact(contact) => Ok(contact),
            Answer::NotFound => Err(ContactError::NotFound(
                id.map(|id| id.to_string()).unwrap_or_default(),
            )),
            Answer::Conflict => {
                let id = id.unwrap_or_else(|| ContactId::new(1).unwrap());
                Err(ContactError::ConcurrencyConflict {
                    id,
                    expected: 0,
                    actual: 1,
                })
            }
        }
    }
}

impl Default for MockContactService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactService for MockContactService {
    async fn add(&self, dto: &ContactDto) -> ContactResult<Contact> {
        self.track_call("add");
        self.dtos.lock().unwrap().push(dto.clone());
        self.answer(None)
    }

    async fn update(&self, dto: &ContactDto) -> ContactResult<Contact> {
        self.track_call("update");
        self.dtos.lock().unwrap().push(dto.clone());
        self.answer(dto.id)
    }

    async fn delete_by_id(&self, id: ContactId) -> ContactResult<Contact> {
        self.track_call("delete_by_id");
        self.answer(Some(id))
    }

    async fn find_by_id(&self, id: ContactId) -> ContactResult<Contact> {
        self.track_call("find_by_id");
        self.answer(Some(id))
    }

    async fn find_all_for_page(
        &self,
        page_index: u32,
        page_size: u32,
    ) -> ContactResult<Vec<Contact>> {
        self.track_call("find_all_for_page");
        self.pages.lock().unwrap().push((page_index, page_size));
        Ok(self.contacts.lock().unwrap().clone())
    }

    async fn search(&self, dto: &SearchDto) -> ContactResult<Vec<Contact>> {
        self.track_call("search");
        self.searches.lock().unwrap().push(dto.clone());
        Ok(self.contacts.lock().unwrap().clone())
    }

    async fn count(&self) -> ContactResult<u64> {
        self.track_call("count");
        Ok(*self.count.lock().unwrap())
    }

    async fn count_for_search(&self, dto: &SearchDto) -> ContactResult<u64> {
        self.track_call("count_for_search");
        self.searches.lock().unwrap().push(dto.clone());
        Ok(*self.count.lock().unwrap())
    }
}
