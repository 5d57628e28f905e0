//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{self, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "1.0.0",
        description = "Book catalog REST API"
    ),
    servers(
        (url = "/api", description = "JSON API")
    ),
    paths(
        // Discovery
        api::index,
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            api::ApiIndex,
            api::ApiEndpoints,
            health::HealthResponse,
            crate::models::book::Book,
            crate::models::payload::BookPayload,
            books::BookListResponse,
            books::BookResponse,
            books::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "discovery", description = "API route listing"),
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
