//! HTTP handlers and routing for the catalog pages

pub mod authors;
pub mod books;
pub mod flash;
pub mod health;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        // Books
        .route("/", get(books::index))
        .route("/add_book", get(books::add_book_form).post(books::add_book))
        .route("/book/:id/delete", post(books::delete_book))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route("/add_author", get(authors::add_author_form).post(authors::add_author))
        .route("/author/:id/delete", post(authors::delete_author))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
        // One request at a time, across all routes
        .layer(GlobalConcurrencyLimitLayer::new(1))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
