//! Book pages and form handlers

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use super::{
    flash,
    views::{AddBookView, IndexView},
};
use crate::{
    error::AppResult,
    models::book::{BookForm, BookQuery, NewBook},
    AppState,
};

/// Home page: all books, sorted and filtered
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<BookQuery>,
) -> AppResult<(CookieJar, Html<String>)> {
    let books = state.services.catalog.list_books(&query).await?;
    let (jar, message) = flash::take(jar);
    let html = IndexView::new(books, &query, message).render()?;
    Ok((jar, Html(html)))
}

/// Add-book form listing all authors
pub async fn add_book_form(State(state): State<AppState>, jar: CookieJar) -> AppResult<(CookieJar, Html<String>)> {
    let authors = state.services.catalog.list_authors().await?;
    let (jar, message) = flash::take(jar);
    let html = AddBookView::new(authors, message).render()?;
    Ok((jar, Html(html)))
}

/// Create a book and return to the form
pub async fn add_book(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let data = NewBook::try_from(form)?;
    let book = state.services.catalog.create_book(data).await?;
    let jar = flash::set(jar, format!("Book '{}' added successfully.", book.title));
    Ok((jar, Redirect::to("/add_book")))
}

/// Delete a book, and its author when it was the last one
pub async fn delete_book(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> AppResult<(CookieJar, Redirect)> {
    let deletion = state.services.catalog.delete_book(id).await?;
    Ok((flash::set(jar, deletion.message()), Redirect::to("/")))
}
