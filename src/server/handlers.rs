//! axum route handlers.
//!
//! Handlers extract request data, delegate to [`ContactController`], and turn
//! the outcome into HTML pages, redirects, or JSON.

use super::controller::{ContactController, Outcome, Redirect};
use super::views;
use crate::domain::ContactId;
use crate::error::ContactError;
use crate::models::{ContactDto, ContactListDto, SearchDto};
use axum::extract::{Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ContactController>,
}

impl AppState {
    pub fn new(controller: ContactController) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/contact/add", get(add_contact_page).post(add_contact))
        .route("/contact/update", post(update_contact))
        .route("/contact/search", get(search_result_page))
        .route("/contact/:id", get(contact_page))
        .route("/contact/:id/update", get(update_contact_page))
        .route("/contact/:id/delete", post(delete_contact))
        .route("/api/contact/list", get(list_contacts))
        .route("/api/contact/search", get(search_contacts))
        .route("/api/contact/count", get(count_contacts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = match &self {
            ContactError::NotFound(_) => StatusCode::NOT_FOUND,
            ContactError::ConcurrencyConflict { .. } => StatusCode::CONFLICT,
            ContactError::InvalidData(_) | ContactError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Request rejected");
        }

        (status, Html(views::escape_html(&self.to_string()))).into_response()
    }
}

/// Flash feedback carried over a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct Feedback {
    #[serde(default)]
    feedback: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTermParam {
    #[serde(default)]
    search_term: Option<String>,
}

fn see_other(location: &str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location.to_string())]).into_response()
}

fn redirect_with_feedback(path: &str, feedback: &str) -> Response {
    see_other(&format!("{}?feedback={}", path, urlencoding::encode(feedback)))
}

fn form_outcome(outcome: Outcome) -> Response {
    match outcome {
        Outcome::View(view) => Html(views::render(&view, None)).into_response(),
        Outcome::Redirect(Redirect { path, feedback, .. }) => {
            redirect_with_feedback(&path, &feedback)
        }
    }
}

async fn home_page(
    State(state): State<AppState>,
    Query(feedback): Query<Feedback>,
) -> Html<String> {
    let view = state.controller.show_home_page();
    Html(views::render(&view, feedback.feedback.as_deref()))
}

async fn add_contact_page(State(state): State<AppState>) -> Html<String> {
    Html(views::render(&state.controller.show_add_contact_page(), None))
}

async fn add_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactDto>,
) -> Result<Response, ContactError> {
    let outcome = state.controller.add_contact(form).await?;
    Ok(form_outcome(outcome))
}

async fn contact_page(
    State(state): State<AppState>,
    Path(id): Path<ContactId>,
    Query(feedback): Query<Feedback>,
) -> Result<Html<String>, ContactError> {
    let view = state.controller.show_contact_page(id).await?;
    Ok(Html(views::render(&view, feedback.feedback.as_deref())))
}

async fn update_contact_page(
    State(state): State<AppState>,
    Path(id): Path<ContactId>,
) -> Result<Html<String>, ContactError> {
    let view = state.controller.show_update_contact_page(id).await?;
    Ok(Html(views::render(&view, None)))
}

async fn update_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactDto>,
) -> Result<Response, ContactError> {
    let outcome = state.controller.update_contact(form).await?;
    Ok(form_outcome(outcome))
}

/// Answers with the feedback text; the contact page navigates home itself.
async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<ContactId>,
) -> Result<String, ContactError> {
    state.controller.delete_contact(id).await
}

async fn search_result_page(
    State(state): State<AppState>,
    Query(params): Query<SearchTermParam>,
) -> Html<String> {
    let view = match params.search_term {
        Some(term) => state.controller.show_search_result_page(term),
        None => state
            .controller
            .show_search_result_page_when_search_term_is_not_given(),
    };
    Html(views::render(&view, None))
}

async fn list_contacts(
    State(state): State<AppState>,
    Query(search): Query<SearchDto>,
) -> Result<Json<Vec<ContactListDto>>, ContactError> {
    let contacts = state.controller.find_contacts_for_page(&search).await?;
    Ok(Json(contacts))
}

async fn search_contacts(
    State(state): State<AppState>,
    Query(search): Query<SearchDto>,
) -> Result<Json<Vec<ContactListDto>>, ContactError> {
    let contacts = state.controller.search(&search).await?;
    Ok(Json(contacts))
}

async fn count_contacts(
    State(state): State<AppState>,
    Query(search): Query<SearchDto>,
) -> Result<Json<u64>, ContactError> {
    let count = match search.search_term {
        Some(_) => state.controller.count_for_search(&search).await?,
        None => state.controller.count().await?,
    };
    Ok(Json(count))
}
