use async_trait::async_trait;
use contact_manager::domain::ContactId;
use contact_manager::error::{ContactError, ContactResult};
use contact_manager::models::{Contact, PageRequest};
use contact_manager::repositories::ContactRepository;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Keeps contacts in memory, assigns ids in insertion order, enforces the
/// version check on update, and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<BTreeMap<ContactId, Contact>>>,
    next_id: Arc<Mutex<i64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store an already persisted contact as-is.
    pub fn add_contact(&self, contact: Contact) {
        let id = contact.id().expect("seeded contacts must have an id");
        let mut next_id = self.next_id.lock().unwrap();
        *next_id = (*next_id).max(id.value() + 1);
        self.contacts.lock().unwrap().insert(id, contact);
    }

    /// Get the stored copy of a contact, bypassing call tracking.
    pub fn stored(&self, id: ContactId) -> Option<Contact> {
        self.contacts.lock().unwrap().get(&id).cloned()
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

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn sorted(&self) -> Vec<Contact> {
        let mut contacts: Vec<Contact> = self.contacts.lock().unwrap().values().cloned().collect();
        contacts.sort_by(|a, b| {
            (a.last_name(), a.first_name(), a.id()).cmp(&(b.last_name(), b.first_name(), b.id()))
        });
        contacts
    }

    fn matching(&self, term: &str) -> Vec<Contact> {
        let term = term.to_lowercase();
        self.sorted()
            .into_iter()
            .filter(|contact| {
                contact.first_name().to_lowercase().contains(&term)
                    || contact.last_name().to_lowercase().contains(&term)
            })
            .collect()
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn page_of(contacts: Vec<Contact>, page: PageRequest) -> Vec<Contact> {
    contacts
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn get(&self, id: ContactId) -> ContactResult<Option<Contact>> {
        self.track_call("get");
        Ok(self.stored(id))
    }

    async fn list(&self, page: PageRequest) -> ContactResult<Vec<Contact>> {
        self.track_call("list");
        Ok(page_of(self.sorted(), page))
    }

    async fn search_by_name(
        &self,
        term: &str,
        page: Option<PageRequest>,
    ) -> ContactResult<Vec<Contact>> {
        self.track_call("search_by_name");
        let matches = self.matching(term);
        Ok(match page {
            Some(page) => page_of(matches, page),
            None => matches,
        })
    }

    async fn count(&self) -> ContactResult<u64> {
        self.track_call("count");
        Ok(self.contacts.lock().unwrap().len() as u64)
    }

    async fn count_by_name(&self, term: &str) -> ContactResult<u64> {
        self.track_call("count_by_name");
        Ok(self.matching(term).len() as u64)
    }

    async fn create(&self, contact: &Contact) -> ContactResult<Contact> {
        self.track_call("create");

        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            let id = ContactId::new(*next_id).unwrap();
            *next_id += 1;
            id
        };

        let created = contact.clone().persisted(id, 0);
        self.contacts.lock().unwrap().insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, contact: &Contact) -> ContactResult<Contact> {
        self.track_call("update");

        let id = contact
            .id()
            .ok_or_else(|| ContactError::NotFound("contact without id".to_string()))?;
        let mut contacts = self.contacts.lock().unwrap();
        let stored = contacts.get(&id).ok_or_else(|| ContactError::not_found(id))?;

        if stored.version() != contact.version() {
            return Err(ContactError::ConcurrencyConflict {
                id,
                expected: contact.version(),
                actual: stored.version(),
            });
        }

        let updated = contact.clone().persisted(id, contact.version() + 1);
        contacts.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: ContactId) -> ContactResult<()> {
        self.track_call("delete");

        match self.contacts.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(ContactError::not_found(id)),
        }
    }
}
