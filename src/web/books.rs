//! Form-driven book pages

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::Value;

use super::{
    flash::{self, Flash},
    templates::{self, BookFormView},
};
use crate::{error::AppError, models::BookPayload, AppState};

/// Form fields posted by the add and edit pages
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub name: Option<String>,
    pub author: Option<String>,
    pub price: Option<String>,
    pub published_date: Option<String>,
}

impl From<BookForm> for BookPayload {
    fn from(form: BookForm) -> Self {
        Self {
            name: form.name.map(Value::String),
            author: form.author.map(Value::String),
            price: form.price.map(Value::String),
            published_date: form.published_date.map(Value::String),
        }
    }
}

/// Map a failed operation onto a page. Validation errors go back to `form_url` as flashes.
fn failure(jar: CookieJar, error: AppError, form_url: &str) -> Response {
    match error {
        AppError::Validation(details) => {
            let jar = flash::push(jar, details.into_iter().map(Flash::error).collect());
            (jar, Redirect::to(form_url)).into_response()
        }
        AppError::NotFound(message) => not_found(&message),
        other => {
            let status = other.status();
            tracing::error!(error = %other, "Web request failed");
            (
                status,
                templates::error_page("Something went wrong", "The request could not be completed."),
            )
                .into_response()
        }
    }
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, templates::error_page("Not found", message)).into_response()
}

fn parse_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, Response> {
    id.map(|Path(id)| id)
        .map_err(|_| not_found("Invalid book ID. Must be a number."))
}

fn read_form(form: Result<Form<BookForm>, FormRejection>) -> Result<BookForm, Response> {
    form.map(|Form(form)| form).map_err(|rejection| {
        tracing::warn!(error = %rejection, "Unreadable book form");
        (
            rejection.status(),
            templates::error_page("Bad request", "The submitted form could not be read."),
        )
            .into_response()
    })
}

/// Listing page
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Response {
    match state.services.catalog.list_books().await {
        Ok(books) => {
            let (jar, flashes) = flash::take(jar);
            (jar, templates::book_list(&books, &flashes)).into_response()
        }
        Err(e) => failure(jar, e, "/"),
    }
}

pub async fn add_form(jar: CookieJar) -> Response {
    let (jar, flashes) = flash::take(jar);
    let page = templates::book_form("Add book", "/books/add", &BookFormView::default(), &flashes);
    (jar, page).into_response()
}

pub async fn add(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<BookForm>, FormRejection>,
) -> Response {
    let form = match read_form(form) {
        Ok(form) => form,
        Err(response) => return response,
    };

    match state.services.catalog.create_book(form.into()).await {
        Ok(_) => {
            let jar = flash::push(jar, vec![Flash::success("Book added successfully")]);
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => failure(jar, e, "/books/add"),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    jar: CookieJar,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.services.catalog.get_book(id).await {
        Ok(book) => {
            let (jar, flashes) = flash::take(jar);
            let page = templates::book_form(
                "Edit book",
                &format!("/books/{}/edit", id),
                &BookFormView::from(&book),
                &flashes,
            );
            (jar, page).into_response()
        }
        Err(e) => failure(jar, e, "/"),
    }
}

pub async fn edit(
    State(state): State<AppState>,
    jar: CookieJar,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<BookForm>, FormRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let form = match read_form(form) {
        Ok(form) => form,
        Err(response) => return response,
    };

    match state.services.catalog.update_book(id, form.into()).await {
        Ok(_) => {
            let jar = flash::push(jar, vec![Flash::success("Book updated successfully")]);
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => failure(jar, e, &format!("/books/{}/edit", id)),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    jar: CookieJar,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.services.catalog.delete_book(id).await {
        Ok(()) => {
            let jar = flash::push(jar, vec![Flash::success("Book deleted successfully")]);
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => failure(jar, e, "/"),
    }
}
