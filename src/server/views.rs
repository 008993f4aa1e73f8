//! HTML rendering for controller views.
//!
//! Pages are plain server-rendered HTML. The home and search result pages
//! load their rows from the JSON endpoints with a small inline script.

use super::controller::{
    Model, View, ADD_CONTACT_VIEW, CONTACT_VIEW, HOME_VIEW, SEARCH_RESULT_VIEW,
    UPDATE_CONTACT_VIEW,
};
use crate::domain::ValidationErrors;
use crate::models::{fields, Contact, ContactDto};
use std::fmt::Write;

/// Render a view to a complete HTML document.
///
/// `feedback` is the flash message of the preceding redirect, if any.
pub fn render(view: &View, feedback: Option<&str>) -> String {
    let body = match (view.name, &view.model) {
        (HOME_VIEW, Model::ContactList { page_size, .. }) => {
            contact_list_page("All contacts", None, *page_size)
        }
        (ADD_CONTACT_VIEW, Model::ContactForm { form, errors }) => {
            contact_form_page("Add contact", "/contact/add", form, errors)
        }
        (UPDATE_CONTACT_VIEW, Model::ContactForm { form, errors }) => {
            contact_form_page("Update contact", "/contact/update", form, errors)
        }
        (CONTACT_VIEW, Model::Contact(contact)) => contact_page(contact),
        (SEARCH_RESULT_VIEW, Model::ContactList { search_term, page_size }) => contact_list_page(
            "Search results",
            Some(search_term.as_deref().unwrap_or_default()),
            *page_size,
        ),
        (name, _) => format!("<p>Unknown view {}</p>", escape_html(name)),
    };

    layout(&body, feedback)
}

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn layout(body: &str, feedback: Option<&str>) -> String {
    let feedback_html = feedback
        .filter(|message| !message.is_empty())
        .map(|message| format!("<div class=\"feedback\">{}</div>", escape_html(message)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Contact Manager</title>
</head>
<body>
<nav>
<a href="/">Contacts</a>
<a href="/contact/add">Add contact</a>
<form action="/contact/search" method="get">
<input type="text" name="searchTerm">
<button type="submit">Search</button>
</form>
</nav>
{feedback_html}
{body}
</body>
</html>
"#
    )
}

fn contact_list_page(title: &str, search_term: Option<&str>, page_size: u32) -> String {
    let (list_url, term_attr) = match search_term {
        Some(term) => ("/api/contact/search", escape_html(term)),
        None => ("/api/contact/list", String::new()),
    };

    format!(
        r#"<h1>{title}</h1>
<ul id="contact-list" data-url="{list_url}" data-search-term="{term_attr}" data-page-size="{page_size}"></ul>
<p id="contact-count"></p>
<div id="pager">
<button id="previous-page" type="button" disabled>Previous</button>
<span id="page-number"></span>
<button id="next-page" type="button" disabled>Next</button>
</div>
<script>
(function () {{
  var list = document.getElementById("contact-list");
  var previous = document.getElementById("previous-page");
  var next = document.getElementById("next-page");
  var pageSize = Number(list.dataset.pageSize);
  var pageIndex = 0;
  var total = 0;

  function updatePager() {{
    var pages = Math.max(1, Math.ceil(total / pageSize));
    document.getElementById("page-number").textContent = (pageIndex + 1) + " / " + pages;
    previous.disabled = pageIndex === 0;
    next.disabled = (pageIndex + 1) * pageSize >= total;
  }}

  function load() {{
    var params = new URLSearchParams({{
      searchTerm: list.dataset.searchTerm,
      pageIndex: pageIndex,
      pageSize: pageSize
    }});
    fetch(list.dataset.url + "?" + params)
      .then(function (response) {{ return response.json(); }})
      .then(function (contacts) {{
        list.innerHTML = "";
        contacts.forEach(function (contact) {{
          var item = document.createElement("li");
          var link = document.createElement("a");
          link.href = "/contact/" + contact.id;
          link.textContent = contact.lastName + ", " + contact.firstName;
          item.appendChild(link);
          list.appendChild(item);
        }});
        updatePager();
      }});
  }}

  previous.addEventListener("click", function () {{
    if (pageIndex > 0) {{
      pageIndex -= 1;
      load();
    }}
  }});
  next.addEventListener("click", function () {{
    if ((pageIndex + 1) * pageSize < total) {{
      pageIndex += 1;
      load();
    }}
  }});

  var countParams = new URLSearchParams({{ searchTerm: list.dataset.searchTerm }});
  fetch("/api/contact/count?" + countParams)
    .then(function (response) {{ return response.json(); }})
    .then(function (count) {{
      total = count;
      document.getElementById("contact-count").textContent = count + " contact(s)";
      updatePager();
    }});
  load();
}})();
</script>
"#
    )
}

fn contact_page(contact: &Contact) -> String {
    let id = contact
        .id()
        .map(|id| id.to_string())
        .unwrap_or_default();

    let mut rows = String::new();
    detail_row(&mut rows, "First name", Some(contact.first_name()));
    detail_row(&mut rows, "Last name", Some(contact.last_name()));
    detail_row(&mut rows, "Email address", contact.email_address());
    detail_row(&mut rows, "Phone number", contact.phone_number());
    if let Some(address) = contact.address() {
        detail_row(&mut rows, "Address", Some(&address.to_string()));
    }

    format!(
        r#"<h1>{name}</h1>
<dl>
{rows}</dl>
<a href="/contact/{id}/update">Update</a>
<button id="delete-contact" data-url="/contact/{id}/delete">Delete</button>
<p id="delete-error" class="field-error"></p>
<script>
document.getElementById("delete-contact").addEventListener("click", function (event) {{
  var error = document.getElementById("delete-error");
  error.textContent = "";
  fetch(event.target.dataset.url, {{ method: "POST" }})
    .then(function (response) {{
      return response.text().then(function (text) {{
        if (!response.ok) {{ throw new Error(text || response.status + " " + response.statusText); }}
        return text;
      }});
    }})
    .then(function (feedback) {{
      window.location = "/?feedback=" + encodeURIComponent(feedback);
    }})
    .catch(function (err) {{
      error.textContent = "Could not delete contact: " + err.message;
    }});
}});
</script>
"#,
        name = escape_html(&contact.full_name()),
    )
}

fn detail_row(rows: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(rows, "<dt>{}</dt><dd>{}</dd>", label, escape_html(value));
    }
}

fn contact_form_page(
    title: &str,
    action: &str,
    form: &ContactDto,
    errors: &ValidationErrors,
) -> String {
    let mut html = format!("<h1>{title}</h1>\n<form action=\"{action}\" method=\"post\">\n");

    if let Some(id) = form.id {
        let _ = writeln!(html, "<input type=\"hidden\" name=\"id\" value=\"{}\">", id);
    }
    if let Some(version) = form.version {
        let _ = writeln!(
            html,
            "<input type=\"hidden\" name=\"version\" value=\"{}\">",
            version
        );
    }

    let inputs: [(&str, &str, &Option<String>); 9] = [
        ("First name", fields::FIRST_NAME, &form.first_name),
        ("Last name", fields::LAST_NAME, &form.last_name),
        ("Email address", fields::EMAIL_ADDRESS, &form.email_address),
        ("Phone number", fields::PHONE_NUMBER, &form.phone_number),
        ("Street address", fields::STREET_ADDRESS, &form.street_address),
        ("Post code", fields::POST_CODE, &form.post_code),
        ("Post office", fields::POST_OFFICE, &form.post_office),
        ("State", fields::STATE, &form.state),
        ("Country", fields::COUNTRY, &form.country),
    ];

    for (label, field, value) in inputs {
        form_input(&mut html, label, field, value.as_deref(), errors);
    }

    html.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    html
}

fn form_input(
    html: &mut String,
    label: &str,
    field: &str,
    value: Option<&str>,
    errors: &ValidationErrors,
) {
    let _ = writeln!(
        html,
        "<label for=\"{field}\">{label}</label>\n<input type=\"text\" id=\"{field}\" name=\"{field}\" value=\"{}\">",
        escape_html(value.unwrap_or_default())
    );
    if let Some(error) = errors.field_error(field) {
        let _ = writeln!(
            html,
            "<span class=\"field-error\" id=\"error-{field}\">{}</span>",
            escape_html(&error.kind.message())
        );
    }
}
