use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, PageRequest};
use crate::repositories::queries::{self, COUNT_CONTACTS, FIND_CONTACTS};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use rusqlite::{named_params, params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT c.id, c.first_name, c.last_name, c.email_address, c.phone_number,
        c.street_address, c.post_code, c.post_office, c.state, c.country, c.version
 FROM contacts c";

const ORDER_BY_NAME: &str = " ORDER BY c.last_name ASC, c.first_name ASC, c.id ASC";

const PAGE_CLAUSE: &str = " LIMIT :limit OFFSET :offset";

/// Contact repository implementation backed by SQLite.
///
/// The connection is shared behind an async mutex; each operation holds the
/// lock for the duration of a single statement (or CAS round-trip).
pub struct SqliteContactRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteContactRepository {
    /// Create a repository over a migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self::from_shared(Arc::new(Mutex::new(conn)))
    }

    /// Create a repository over a connection shared with other components.
    pub fn from_shared(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

/// Raw column values of one `contacts` row.
struct ContactRow {
    id: i64,
    first_name: String,
    last_name: String,
    email_address: Option<String>,
    phone_number: Option<String>,
    street_address: Option<String>,
    post_code: Option<String>,
    post_office: Option<String>,
    state: Option<String>,
    country: Option<String>,
    version: i64,
}

impl ContactRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email_address: row.get("email_address")?,
            phone_number: row.get("phone_number")?,
            street_address: row.get("street_address")?,
            post_code: row.get("post_code")?,
            post_office: row.get("post_office")?,
            state: row.get("state")?,
            country: row.get("country")?,
            version: row.get("version")?,
        })
    }

    fn into_contact(self) -> ContactResult<Contact> {
        let id = ContactId::new(self.id).map_err(|e| ContactError::InvalidData(e.to_string()))?;
        let builder = Contact::builder(self.first_name, self.last_name)
            .email_address(self.email_address)
            .phone_number(self.phone_number);

        let has_address = self.street_address.is_some()
            || self.post_code.is_some()
            || self.post_office.is_some()
            || self.state.is_some()
            || self.country.is_some();

        let builder = if has_address {
            builder.address(
                self.street_address,
                self.post_code,
                self.post_office,
                self.state,
                self.country,
            )
        } else {
            builder
        };

        Ok(builder.build().persisted(id, self.version))
    }
}

fn to_contacts(rows: Vec<ContactRow>) -> ContactResult<Vec<Contact>> {
    rows.into_iter().map(ContactRow::into_contact).collect()
}

fn named_sql(name: &str) -> ContactResult<&'static str> {
    queries::named_query(name)
        .ok_or_else(|| ContactError::InvalidData(format!("Unknown named query: {}", name)))
}

fn sql_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn get(&self, id: ContactId) -> ContactResult<Option<Contact>> {
        let conn = self.conn.lock().await;
        let sql = format!("{} WHERE c.id = ?1", SELECT_COLUMNS);
        let row = conn
            .query_row(&sql, params![id.value()], ContactRow::read)
            .optional()?;

        row.map(ContactRow::into_contact).transpose()
    }

    async fn list(&self, page: PageRequest) -> ContactResult<Vec<Contact>> {
        let conn = self.conn.lock().await;
        let sql = format!("{}{}{}", SELECT_COLUMNS, ORDER_BY_NAME, PAGE_CLAUSE);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                named_params! {
                    ":limit": sql_int(page.limit()),
                    ":offset": sql_int(page.offset()),
                },
                ContactRow::read,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(
            page_index = page.page_index,
            page_size = page.page_size,
            result_count = rows.len(),
            "Listed contacts"
        );
        to_contacts(rows)
    }

    async fn search_by_name(
        &self,
        search_term: &str,
        page: Option<PageRequest>,
    ) -> ContactResult<Vec<Contact>> {
        let pattern = queries::like_pattern(search_term);
        let find_sql = named_sql(FIND_CONTACTS)?;

        let conn = self.conn.lock().await;
        let rows = match page {
            Some(page) => {
                let sql = format!("{}{}", find_sql, PAGE_CLAUSE);
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(
                        named_params! {
                            ":searchTerm": pattern,
                            ":limit": sql_int(page.limit()),
                            ":offset": sql_int(page.offset()),
                        },
                        ContactRow::read,
                    )?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(find_sql)?;
                let rows = stmt
                    .query_map(named_params! { ":searchTerm": pattern }, ContactRow::read)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };

        debug!(
            search_term = %search_term,
            result_count = rows.len(),
            "Executed {}", FIND_CONTACTS
        );
        to_contacts(rows)
    }

    async fn count(&self) -> ContactResult<u64> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(c.id) FROM contacts c", [], |row| row.get(0))?;
        Ok(sql_count(count))
    }

    async fn count_by_name(&self, search_term: &str) -> ContactResult<u64> {
        let pattern = queries::like_pattern(search_term);
        let count_sql = named_sql(COUNT_CONTACTS)?;

        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row(
            count_sql,
            named_params! { ":searchTerm": pattern },
            |row| row.get(queries::COUNT_COLUMN),
        )?;
        Ok(sql_count(count))
    }

    async fn create(&self, contact: &Contact) -> ContactResult<Contact> {
        let address = contact.address();
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO contacts (
                first_name, last_name, email_address, phone_number,
                street_address, post_code, post_office, state, country, version
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0)",
            params![
                contact.first_name(),
                contact.last_name(),
                contact.email_address(),
                contact.phone_number(),
                address.and_then(|a| a.street_address.as_deref()),
                address.and_then(|a| a.post_code.as_deref()),
                address.and_then(|a| a.post_office.as_deref()),
                address.and_then(|a| a.state.as_deref()),
                address.and_then(|a| a.country.as_deref()),
            ],
        )?;

        let id = ContactId::new(conn.last_insert_rowid())
            .map_err(|e| ContactError::InvalidData(e.to_string()))?;
        Ok(contact.clone().persisted(id, 0))
    }

    async fn update(&self, contact: &Contact) -> ContactResult<Contact> {
        let id = contact
            .id()
            .ok_or_else(|| ContactError::NotFound("contact has not been persisted".to_string()))?;
        let expected = contact.version();
        let address = contact.address();

        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "UPDATE contacts
             SET first_name = ?1,
                 last_name = ?2,
                 email_address = ?3,
                 phone_number = ?4,
                 street_address = ?5,
                 post_code = ?6,
                 post_office = ?7,
                 state = ?8,
                 country = ?9,
                 version = version + 1
             WHERE id = ?10
               AND version = ?11",
            params![
                contact.first_name(),
                contact.last_name(),
                contact.email_address(),
                contact.phone_number(),
                address.and_then(|a| a.street_address.as_deref()),
                address.and_then(|a| a.post_code.as_deref()),
                address.and_then(|a| a.post_office.as_deref()),
                address.and_then(|a| a.state.as_deref()),
                address.and_then(|a| a.country.as_deref()),
                id.value(),
                expected,
            ],
        )?;

        if changed == 0 {
            let actual: Option<i64> = conn
                .query_row(
                    "SELECT version FROM contacts WHERE id = ?1",
                    params![id.value()],
                    |row| row.get(0),
                )
                .optional()?;

            return Err(match actual {
                None => ContactError::not_found(id),
                Some(actual) => ContactError::ConcurrencyConflict {
                    id,
                    expected,
                    actual,
                },
            });
        }

        Ok(contact.clone().persisted(id, expected + 1))
    }

    async fn delete(&self, id: ContactId) -> ContactResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute("DELETE FROM contacts WHERE id = ?1", params![id.value()])?;

        if changed == 0 {
            return Err(ContactError::not_found(id));
        }

        Ok(())
    }
}
