mod mocks;

use contact_manager::domain::{ContactId, FieldErrorKind};
use contact_manager::error::ContactError;
use contact_manager::models::{fields, Contact, ContactDto, ContactListDto, SearchDto};
use contact_manager::server::controller::{
    ContactController, Model, Outcome, ADD_CONTACT_VIEW, CONTACT_VIEW,
    FEEDBACK_MESSAGE_KEY_CONTACT_ADDED, FEEDBACK_MESSAGE_KEY_CONTACT_DELETED,
    FEEDBACK_MESSAGE_KEY_CONTACT_UPDATED, HOME_VIEW, SEARCH_RESULT_VIEW, UPDATE_CONTACT_VIEW,
};
use mocks::{Answer, MockContactService, RecordingMessageSource};
use std::sync::Arc;

const ID: i64 = 1;
const FIRST_NAME: &str = "Foo";
const LAST_NAME: &str = "Bar";
const EMAIL_ADDRESS: &str = "foo.bar@bar.com";
const PHONE_NUMBER: &str = "00358-123456789";

fn controller() -> (ContactController, MockContactService, RecordingMessageSource) {
    let service = MockContactService::new();
    let messages = RecordingMessageSource::new();
    let controller = ContactController::new(Arc::new(service.clone()), Arc::new(messages.clone()));
    (controller, service, messages)
}

fn contact_id() -> ContactId {
    ContactId::new(ID).unwrap()
}

fn persisted_contact() -> Contact {
    Contact::builder(FIRST_NAME, LAST_NAME)
        .email_address(Some(EMAIL_ADDRESS.to_string()))
        .phone_number(Some(PHONE_NUMBER.to_string()))
        .build()
        .persisted(contact_id(), 0)
}

fn valid_form() -> ContactDto {
    ContactDto {
        first_name: Some(FIRST_NAME.to_string()),
        last_name: Some(LAST_NAME.to_string()),
        email_address: Some(EMAIL_ADDRESS.to_string()),
        phone_number: Some(PHONE_NUMBER.to_string()),
        ..ContactDto::default()
    }
}

fn form_errors(outcome: &Outcome, expected_view: &str) -> Vec<(&'static str, FieldErrorKind)> {
    match outcome {
        Outcome::View(view) => {
            assert_eq!(view.name, expected_view);
            match &view.model {
                Model::ContactForm { errors, .. } => {
                    errors.iter().map(|e| (e.field, e.kind)).collect()
                }
                other => panic!("Expected a contact form model, got: {:?}", other),
            }
        }
        other => panic!("Expected the form view, got: {:?}", other),
    }
}

fn string_of_length(length: usize) -> String {
    "a".repeat(length)
}

#[test]
fn test_show_home_page() {
    let (controller, service, _) = controller();

    let view = controller.with_page_sizes(5, 20).show_home_page();

    assert_eq!(view.name, HOME_VIEW);
    assert_eq!(
        view.model,
        Model::ContactList {
            search_term: None,
            page_size: 5
        }
    );
    assert_eq!(service.total_call_count(), 0);
}

#[test]
fn test_show_add_contact_page_has_empty_form() {
    let (controller, service, _) = controller();

    let view = controller.show_add_contact_page();

    assert_eq!(view.name, ADD_CONTACT_VIEW);
    match view.model {
        Model::ContactForm { form, errors } => {
            assert_eq!(form, ContactDto::default());
            assert!(errors.is_empty());
        }
        other => panic!("Expected a contact form model, got: {:?}", other),
    }
    assert_eq!(service.total_call_count(), 0);
}

#[tokio::test]
async fn test_add_contact_with_empty_form_reports_required_names() {
    let (controller, service, _) = controller();

    let outcome = controller.add_contact(ContactDto::default()).await.unwrap();

    let errors = form_errors(&outcome, ADD_CONTACT_VIEW);
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&(fields::FIRST_NAME, FieldErrorKind::Required)));
    assert!(errors.contains(&(fields::LAST_NAME, FieldErrorKind::Required)));
    assert_eq!(service.total_call_count(), 0);
}

#[tokio::test]
async fn test_add_contact_with_too_long_values_reports_each_field_once() {
    let (controller, service, _) = controller();
    let form = ContactDto {
        first_name: Some(string_of_length(51)),
        last_name: Some(string_of_length(101)),
        email_address: Some(format!("{}@bar.com", string_of_length(93))),
        phone_number: Some(string_of_length(31)),
        street_address: Some(string_of_length(101)),
        post_code: Some(string_of_length(11)),
        post_office: Some(string_of_length(41)),
        state: Some(string_of_length(21)),
        country: Some(string_of_length(21)),
        ..ContactDto::default()
    };

    let outcome = controller.add_contact(form).await.unwrap();

    let errors = form_errors(&outcome, ADD_CONTACT_VIEW);
    assert_eq!(errors.len(), 9);
    for (field, max) in [
        (fields::FIRST_NAME, 50),
        (fields::LAST_NAME, 100),
        (fields::EMAIL_ADDRESS, 100),
        (fields::PHONE_NUMBER, 30),
        (fields::STREET_ADDRESS, 100),
        (fields::POST_CODE, 10),
        (fields::POST_OFFICE, 40),
        (fields::STATE, 20),
        (fields::COUNTRY, 20),
    ] {
        assert!(
            errors.contains(&(field, FieldErrorKind::TooLong { max })),
            "missing length error for {}",
            field
        );
    }
    assert_eq!(service.total_call_count(), 0);
}

#[tokio::test]
async fn test_add_contact_with_malformed_email_reports_email_error() {
    let (controller, service, _) = controller();
    let form = ContactDto {
        email_address: Some("foo.bar".to_string()),
        ..valid_form()
    };

    let outcome = controller.add_contact(form.clone()).await.unwrap();

    assert_eq!(
        form_errors(&outcome, ADD_CONTACT_VIEW),
        vec![(fields::EMAIL_ADDRESS, FieldErrorKind::InvalidEmail)]
    );
    match outcome {
        Outcome::View(view) => match view.model {
            Model::ContactForm { form: shown, .. } => assert_eq!(shown, form),
            other => panic!("Expected a contact form model, got: {:?}", other),
        },
        other => panic!("Expected the form view, got: {:?}", other),
    }
    assert_eq!(service.total_call_count(), 0);
}

#[tokio::test]
async fn test_add_contact_redirects_to_contact_page_with_feedback() {
    let (controller, service, messages) = controller();
    service.answer_with(Answer::Contact(persisted_contact()));

    let outcome = controller.add_contact(valid_form()).await.unwrap();

    match outcome {
        Outcome::Redirect(redirect) => {
            assert_eq!(redirect.path, "/contact/1");
            assert_eq!(redirect.contact_id, contact_id());
            assert_eq!(
                redirect.feedback,
                format!("{}:Foo Bar", FEEDBACK_MESSAGE_KEY_CONTACT_ADDED)
            );
        }
        other => panic!("Expected a redirect, got: {:?}", other),
    }
    assert_eq!(service.get_call_count("add"), 1);
    assert_eq!(service.total_call_count(), 1);
    assert_eq!(service.received_dtos(), vec![valid_form()]);
    assert_eq!(
        messages.lookups(),
        vec![(
            FEEDBACK_MESSAGE_KEY_CONTACT_ADDED.to_string(),
            vec!["Foo Bar".to_string()]
        )]
    );
}

#[tokio::test]
async fn test_show_contact_page() {
    let (controller, service, _) = controller();
    service.answer_with(Answer::Contact(persisted_contact()));

    let view = controller.show_contact_page(contact_id()).await.unwrap();

    assert_eq!(view.name, CONTACT_VIEW);
    assert_eq!(view.model, Model::Contact(persisted_contact()));
    assert_eq!(service.get_call_count("find_by_id"), 1);
}

#[tokio::test]
async fn test_show_contact_page_when_contact_is_not_found() {
    let (controller, service, _) = controller();
    service.answer_with(Answer::NotFound);

    let result = controller.show_contact_page(contact_id()).await;

    assert!(matches!(result, Err(ContactError::NotFound(_))));
    assert_eq!(service.get_call_count("find_by_id"), 1);
}

#[tokio::test]
async fn test_show_update_contact_page_fills_form() {
    let (controller, service, _) = controller();
    service.answer_with(Answer::Contact(persisted_contact()));

    let view = controller.show_update_contact_page(contact_id()).await.unwrap();

    assert_eq!(view.name, UPDATE_CONTACT_VIEW);
    match view.model {
        Model::ContactForm { form, errors } => {
            assert_eq!(form.id, Some(contact_id()));
            assert_eq!(form.first_name.as_deref(), Some(FIRST_NAME));
            assert_eq!(form.email_address.as_deref(), Some(EMAIL_ADDRESS));
            assert_eq!(form.version, Some(0));
            assert!(errors.is_empty());
        }
        other => panic!("Expected a contact form model, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_show_update_contact_page_when_contact_is_not_found() {
    let (controller, service, _) = controller();

    let result = controller.show_update_contact_page(contact_id()).await;

    assert!(matches!(result, Err(ContactError::NotFound(_))));
    assert_eq!(service.get_call_count("find_by_id"), 1);
}

#[tokio::test]
async fn test_update_contact_with_empty_names_stays_on_form() {
    let (controller, service, _) = controller();
    let form = ContactDto {
        id: Some(contact_id()),
        version: Some(0),
        ..ContactDto::default()
    };

    let outcome = controller.update_contact(form).await.unwrap();

    let errors = form_errors(&outcome, UPDATE_CONTACT_VIEW);
    assert_eq!(errors.len(), 2);
    assert_eq!(service.total_call_count(), 0);
}

#[tokio::test]
async fn test_update_contact_with_malformed_email_stays_on_form() {
    let (controller, service, _) = controller();
    let form = ContactDto {
        id: Some(contact_id()),
        version: Some(0),
        email_address: Some("foo.bar".to_string()),
        ..valid_form()
    };

    let outcome = controller.update_contact(form.clone()).await.unwrap();

    assert_eq!(
        form_errors(&outcome, UPDATE_CONTACT_VIEW),
        vec![(fields::EMAIL_ADDRESS, FieldErrorKind::InvalidEmail)]
    );
    match outcome {
        Outcome::View(view) => match view.model {
            Model::ContactForm { form: shown, .. } => assert_eq!(shown, form),
            other => panic!("Expected a contact form model, got: {:?}", other),
        },
        other => panic!("Expected the form view, got: {:?}", other),
    }
    assert_eq!(service.total_call_count(), 0);
}

#[tokio::test]
async fn test_update_contact_with_too_long_values_reports_each_field_once() {
    let (controller, service, _) = controller();
    let form = ContactDto {
        id: Some(contact_id()),
        first_name: Some(string_of_length(51)),
        last_name: Some(string_of_length(101)),
        email_address: Some(format!("{}@bar.com", string_of_length(93))),
        phone_number: Some(string_of_length(31)),
        street_address: Some(string_of_length(101)),
        post_code: Some(string_of_length(11)),
        post_office: Some(string_of_length(41)),
        state: Some(string_of_length(21)),
        country: Some(string_of_length(21)),
        version: Some(0),
    };

    let outcome = controller.update_contact(form).await.unwrap();

    let errors = form_errors(&outcome, UPDATE_CONTACT_VIEW);
    assert_eq!(errors.len(), 9);
    for field in [
        fields::FIRST_NAME,
        fields::LAST_NAME,
        fields::EMAIL_ADDRESS,
        fields::PHONE_NUMBER,
        fields::STREET_ADDRESS,
        fields::POST_CODE,
        fields::POST_OFFICE,
        fields::STATE,
        fields::COUNTRY,
    ] {
        let kinds: Vec<_> = errors.iter().filter(|(f, _)| *f == field).collect();
        assert_eq!(kinds.len(), 1, "expected one error for {}", field);
        assert!(
            matches!(kinds[0].1, FieldErrorKind::TooLong { .. }),
            "expected a length error for {}",
            field
        );
    }
    assert_eq!(service.total_call_count(), 0);
}

#[tokio::test]
async fn test_update_contact_redirects_with_feedback() {
    let (controller, service, _) = controller();
    service.answer_with(Answer::Contact(persisted_contact()));
    let form = ContactDto {
        id: Some(contact_id()),
        version: Some(0),
        ..valid_form()
    };

    let outcome = controller.update_contact(form.clone()).await.unwrap();

    match outcome {
        Outcome::Redirect(redirect) => {
            assert_eq!(redirect.path, "/contact/1");
            assert_eq!(
                redirect.feedback,
                format!("{}:Foo Bar", FEEDBACK_MESSAGE_KEY_CONTACT_UPDATED)
            );
        }
        other => panic!("Expected a redirect, got: {:?}", other),
    }
    assert_eq!(service.get_call_count("update"), 1);
    assert_eq!(service.received_dtos(), vec![form]);
}

#[tokio::test]
async fn test_update_contact_when_contact_is_not_found() {
    let (controller, service, _) = controller();
    let form = ContactDto {
        id: Some(contact_id()),
        ..valid_form()
    };

    let result = controller.update_contact(form).await;

    assert!(matches!(result, Err(ContactError::NotFound(_))));
    assert_eq!(service.get_call_count("update"), 1);
}

#[tokio::test]
async fn test_update_contact_with_stale_version_is_conflict() {
    let (controller, service, messages) = controller();
    service.answer_with(Answer::Conflict);
    let form = ContactDto {
        id: Some(contact_id()),
        version: Some(0),
        ..valid_form()
    };

    let result = controller.update_contact(form).await;

    assert!(matches!(result, Err(ContactError::ConcurrencyConflict { .. })));
    assert!(messages.lookups().is_empty());
}

#[tokio::test]
async fn test_delete_contact_returns_feedback() {
    let (controller, service, messages) = controller();
    service.answer_with(Answer::Contact(persisted_contact()));

    let feedback = controller.delete_contact(contact_id()).await.unwrap();

    assert_eq!(
        feedback,
        format!("{}:Foo Bar", FEEDBACK_MESSAGE_KEY_CONTACT_DELETED)
    );
    assert_eq!(service.get_call_count("delete_by_id"), 1);
    assert_eq!(messages.lookups().len(), 1);
}

#[tokio::test]
async fn test_delete_contact_when_contact_is_not_found() {
    let (controller, service, messages) = controller();

    let result = controller.delete_contact(contact_id()).await;

    assert!(matches!(result, Err(ContactError::NotFound(_))));
    assert_eq!(service.get_call_count("delete_by_id"), 1);
    assert!(messages.lookups().is_empty());
}

#[test]
fn test_show_search_result_page() {
    let (controller, service, _) = controller();

    let view = controller.show_search_result_page("foo");
    assert_eq!(view.name, SEARCH_RESULT_VIEW);
    assert_eq!(
        view.model,
        Model::ContactList {
            search_term: Some("foo".to_string()),
            page_size: 10
        }
    );

    let view = controller.show_search_result_page_when_search_term_is_not_given();
    assert_eq!(view.name, SEARCH_RESULT_VIEW);
    assert_eq!(
        view.model,
        Model::ContactList {
            search_term: None,
            page_size: 10
        }
    );

    assert_eq!(service.total_call_count(), 0);
}

#[tokio::test]
async fn test_find_contacts_for_page_uses_defaults_and_bounds() {
    let (controller, service, _) = controller();
    let controller = controller.with_page_sizes(5, 20);
    service.return_contacts(vec![persisted_contact()]);

    let contacts = controller
        .find_contacts_for_page(&SearchDto::default())
        .await
        .unwrap();
    controller
        .find_contacts_for_page(&SearchDto::default().with_page(2, 500))
        .await
        .unwrap();

    assert_eq!(
        contacts,
        vec![ContactListDto {
            id: Some(contact_id()),
            first_name: FIRST_NAME.to_string(),
            last_name: LAST_NAME.to_string(),
        }]
    );
    assert_eq!(service.received_pages(), vec![(0, 5), (2, 20)]);
}

#[tokio::test]
async fn test_search_bounds_page_size_and_keeps_term() {
    let (controller, service, _) = controller();
    let controller = controller.with_page_sizes(10, 50);

    controller
        .search(&SearchDto::new("oo").with_page(1, 1000))
        .await
        .unwrap();
    controller.search(&SearchDto::new("oo")).await.unwrap();

    assert_eq!(
        service.received_searches(),
        vec![
            SearchDto::new("oo").with_page(1, 50),
            SearchDto::new("oo"),
        ]
    );
}

#[tokio::test]
async fn test_counts() {
    let (controller, service, _) = controller();
    service.return_count(7);

    assert_eq!(controller.count().await.unwrap(), 7);
    assert_eq!(
        controller
            .count_for_search(&SearchDto::new("foo"))
            .await
            .unwrap(),
        7
    );
    assert_eq!(service.get_call_count("count"), 1);
    assert_eq!(service.get_call_count("count_for_search"), 1);
}
