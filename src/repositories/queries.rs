//! Named native queries over the `contacts` table.
//!
//! Queries are declared once here and looked up by name, so the repository
//! never assembles the search predicate itself.

pub const FIND_CONTACTS: &str = "Contact.findContacts";
pub const COUNT_CONTACTS: &str = "Contact.countContacts";

/// Parameter bound to the LIKE pattern in both named queries.
pub const SEARCH_TERM_PARAM: &str = ":searchTerm";

/// Column alias of the count query result.
pub const COUNT_COLUMN: &str = "contactCount";

#[derive(Debug, Clone, Copy)]
struct NamedNativeQuery {
    name: &'static str,
    sql: &'static str,
}

const NAMED_QUERIES: &[NamedNativeQuery] = &[
    NamedNativeQuery {
        name: COUNT_CONTACTS,
        sql: r"SELECT COUNT(c.id) AS contactCount FROM contacts c
               WHERE unicode_lower(c.first_name) LIKE :searchTerm ESCAPE '\'
                  OR unicode_lower(c.last_name) LIKE :searchTerm ESCAPE '\'",
    },
    NamedNativeQuery {
        name: FIND_CONTACTS,
        sql: r"SELECT c.id, c.first_name, c.last_name, c.email_address, c.phone_number,
                      c.street_address, c.post_code, c.post_office, c.state, c.country, c.version
               FROM contacts c
               WHERE unicode_lower(c.first_name) LIKE :searchTerm ESCAPE '\'
                  OR unicode_lower(c.last_name) LIKE :searchTerm ESCAPE '\'
               ORDER BY c.last_name ASC, c.first_name ASC, c.id ASC",
    },
];

/// Look up the SQL of a named query.
pub fn named_query(name: &str) -> Option<&'static str> {
    NAMED_QUERIES
        .iter()
        .find(|query| query.name == name)
        .map(|query| query.sql)
}

/// Wrap a search term as a lowercased `%term%` LIKE pattern.
///
/// `%`, `_` and the escape character itself are escaped so the term matches
/// as a literal substring. Both queries compare it against
/// `unicode_lower(column)`, so matching ignores case beyond ASCII.
pub fn like_pattern(search_term: &str) -> String {
    let mut pattern = String::with_capacity(search_term.len() + 2);
    pattern.push('%');
    for c in search_term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
