//! Web interface integration tests

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use serde_json::Value;

use bookshelf_server::{
    config::{AppConfig, DatabaseConfig},
    create_router,
    repository::Repository,
    AppState,
};

fn test_config(seed: bool) -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            seed_demo_data: seed,
            ..DatabaseConfig::default()
        },
        ..AppConfig::default()
    }
}

async fn app(seed: bool) -> Router {
    create_router(AppState::build(test_config(seed)).await.expect("Failed to build state"))
}

/// Current value of an input in a rendered form
fn input_value<'a>(page: &'a str, name: &str) -> Option<&'a str> {
    let marker = format!(r#"name="{}" value=""#, name);
    let start = page.find(&marker)? + marker.len();
    page[start..].split('"').next()
}

struct Page {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Page {
    fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// `name=value` of the flash cookie being set, if any
    fn flash_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("flash="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    form: Option<&str>,
    cookie: Option<&str>,
) -> Page {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    Page {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

#[tokio::test]
async fn test_list_page_renders_books() {
    let app = app(true).await;
    let page = request(&app, Method::GET, "/", None, None).await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("JavaScript: The Good Parts"));
    assert!(page.body.contains("Robert C. Martin"));
    assert!(page.body.contains("2008-08-01"));
}

#[tokio::test]
async fn test_add_book_redirects_with_flash() {
    let app = app(false).await;

    let form = request(&app, Method::GET, "/books/add", None, None).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains(r#"action="/books/add""#));

    let posted = request(
        &app,
        Method::POST,
        "/books/add",
        Some("name=Dune&author=Frank+Herbert&price=12.5&publishedDate=1965-08-01T00%3A00"),
        None,
    )
    .await;
    assert_eq!(posted.status, StatusCode::SEE_OTHER);
    assert_eq!(posted.location(), Some("/"));
    let cookie = posted.flash_cookie().expect("flash cookie not set");

    let list = request(&app, Method::GET, "/", None, Some(&cookie)).await;
    assert!(list.body.contains("Book added successfully"));
    assert!(list.body.contains("Frank Herbert"));
    assert!(list.body.contains("1965-08-01"));

    // The flash is consumed by the page that showed it
    let removal = list
        .headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("flash=;") || v.starts_with("flash=\"\";") || v.contains("Max-Age=0"));
    assert!(removal);
}

#[tokio::test]
async fn test_add_book_validation_errors_return_to_form() {
    let app = app(false).await;

    let posted = request(
        &app,
        Method::POST,
        "/books/add",
        Some("name=&author=Someone&price=abc&publishedDate="),
        None,
    )
    .await;
    assert_eq!(posted.status, StatusCode::SEE_OTHER);
    assert_eq!(posted.location(), Some("/books/add"));
    let cookie = posted.flash_cookie().expect("flash cookie not set");

    let form = request(&app, Method::GET, "/books/add", None, Some(&cookie)).await;
    assert!(form.body.contains("Name is required and must be a non-empty string"));
    assert!(form.body.contains("Price must be a valid number"));
    assert!(!form.body.contains("Author is required"));

    let list = request(&app, Method::GET, "/", None, None).await;
    assert!(list.body.contains("No books in the catalog yet."));
}

#[tokio::test]
async fn test_edit_book() {
    let app = app(true).await;

    let form = request(&app, Method::GET, "/books/2/edit", None, None).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains(r#"value="Clean Code""#));
    assert!(form.body.contains(r#"value="2008-08-01T00:00:00.000""#));

    let posted = request(
        &app,
        Method::POST,
        "/books/2/edit",
        Some("name=Clean+Architecture&author=Robert+C.+Martin&price=35&publishedDate="),
        None,
    )
    .await;
    assert_eq!(posted.status, StatusCode::SEE_OTHER);
    assert_eq!(posted.location(), Some("/"));

    let list = request(&app, Method::GET, "/", None, posted.flash_cookie().as_deref()).await;
    assert!(list.body.contains("Book updated successfully"));
    assert!(list.body.contains("Clean Architecture"));
    assert!(list.body.contains("2008-08-01"));
}

#[tokio::test]
async fn test_edit_validation_errors_return_to_edit_form() {
    let app = app(true).await;
    let posted = request(
        &app,
        Method::POST,
        "/books/1/edit",
        Some("name=Still+Valid&author=&price=-2"),
        None,
    )
    .await;

    assert_eq!(posted.status, StatusCode::SEE_OTHER);
    assert_eq!(posted.location(), Some("/books/1/edit"));
    let cookie = posted.flash_cookie().expect("flash cookie not set");

    let form = request(&app, Method::GET, "/books/1/edit", None, Some(&cookie)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("Author is required and must be a non-empty string"));
    assert!(form.body.contains("Price is required and must be a non-negative number"));
    assert!(!form.body.contains("Name is required"));
    assert_eq!(input_value(&form.body, "name"), Some("JavaScript: The Good Parts"));
    assert_eq!(input_value(&form.body, "price"), Some("29.99"));
}

#[tokio::test]
async fn test_saving_untouched_date_keeps_it() {
    let app = app(false).await;
    let posted = request(
        &app,
        Method::POST,
        "/books/add",
        Some("name=Dune&author=Frank+Herbert&price=12.5&publishedDate=1965-08-01T10%3A30%3A45.678Z"),
        None,
    )
    .await;
    assert_eq!(posted.status, StatusCode::SEE_OTHER);

    let form = request(&app, Method::GET, "/books/1/edit", None, None).await;
    let date = input_value(&form.body, "publishedDate")
        .expect("date input missing")
        .to_string();
    assert_eq!(date, "1965-08-01T10:30:45.678");

    let body = format!(
        "name=Dune+Messiah&author=Frank+Herbert&price=12.5&publishedDate={}",
        date.replace(':', "%3A")
    );
    let saved = request(&app, Method::POST, "/books/1/edit", Some(&body), None).await;
    assert_eq!(saved.status, StatusCode::SEE_OTHER);

    let book = request(&app, Method::GET, "/api/books/1", None, None).await;
    let book: Value = serde_json::from_str(&book.body).expect("Invalid JSON");
    assert_eq!(book["data"]["name"], "Dune Messiah");
    assert_eq!(book["data"]["publishedDate"], "1965-08-01T10:30:45.678Z");
}

#[tokio::test]
async fn test_store_failure_renders_error_page() {
    let config = test_config(true);
    let repository = Repository::connect(&config.database)
        .await
        .expect("Failed to open store");
    let app = create_router(AppState::new(config, repository.clone()));
    repository.pool.close().await;

    let page = request(&app, Method::GET, "/", None, None).await;
    assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(page.body.contains("<!DOCTYPE html>"));
    assert!(page.body.contains("The request could not be completed."));
    assert!(!page.body.contains("pool"));

    let page = request(
        &app,
        Method::POST,
        "/books/add",
        Some("name=A&author=B&price=1"),
        None,
    )
    .await;
    assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(page.flash_cookie().is_none());
}

#[tokio::test]
async fn test_unreadable_form_renders_error_page() {
    let app = app(true).await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/books/1/edit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"X"}"#))
                .unwrap(),
        )
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8_lossy(&bytes);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("The submitted form could not be read."));

    let page = request(&app, Method::POST, "/books/add", None, None).await;
    assert_eq!(page.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(page.body.contains("The submitted form could not be read."));

    let list = request(&app, Method::GET, "/", None, None).await;
    assert!(list.body.contains("JavaScript: The Good Parts"));
}

#[tokio::test]
async fn test_edit_missing_book_renders_not_found() {
    let app = app(false).await;

    let page = request(&app, Method::GET, "/books/42/edit", None, None).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("Book with ID 42 not found"));

    let page = request(
        &app,
        Method::POST,
        "/books/42/edit",
        Some("name=A&author=B&price=1"),
        None,
    )
    .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = request(&app, Method::GET, "/books/nope/edit", None, None).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_book() {
    let app = app(true).await;

    let posted = request(&app, Method::POST, "/books/1/delete", None, None).await;
    assert_eq!(posted.status, StatusCode::SEE_OTHER);
    assert_eq!(posted.location(), Some("/"));

    let list = request(&app, Method::GET, "/", None, posted.flash_cookie().as_deref()).await;
    assert!(list.body.contains("Book deleted successfully"));
    assert!(!list.body.contains("JavaScript: The Good Parts"));

    let again = request(&app, Method::POST, "/books/1/delete", None, None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_page() {
    let app = app(false).await;
    let page = request(&app, Method::GET, "/nowhere", None, None).await;

    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("<!DOCTYPE html>"));
}
