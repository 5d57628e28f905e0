//! Bookshelf Book Catalog
//!
//! A small book catalog served two ways: a JSON API under `/api` and
//! server-rendered pages with form submission at the site root. Both sit on
//! the same services and an in-memory SQLite store.

use std::sync::Arc;

use axum::{
    http::Uri,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod web;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use services::Services;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: Repository) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(Services::new(repository)),
        }
    }

    /// Open the store described by `config`, seed it if asked, and wire the services
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        let repository = Repository::connect(&config.database).await?;
        if config.database.seed_demo_data {
            repository.seed_demo_books().await?;
        }
        Ok(Self::new(config, repository))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // JSON API
    let api_routes = Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .route(
            "/books",
            get(api::books::list_books).post(api::books::create_book),
        )
        .route(
            "/books/:id",
            get(api::books::get_book)
                .put(api::books::update_book)
                .delete(api::books::delete_book),
        );

    // Web pages
    let pages = Router::new()
        .route("/", get(web::books::index))
        .route(
            "/books/add",
            get(web::books::add_form).post(web::books::add),
        )
        .route(
            "/books/:id/edit",
            get(web::books::edit_form).post(web::books::edit),
        )
        .route("/books/:id/delete", post(web::books::delete));

    let routes = Router::new()
        .nest("/api", api_routes)
        .merge(pages)
        .fallback(fallback)
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    routes
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn fallback(uri: Uri) -> Response {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        api::route_not_found().await
    } else {
        web::page_not_found().await
    }
}
