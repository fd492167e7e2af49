//! Author pages and form handlers

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use super::{
    flash,
    views::{AddAuthorView, AuthorsView},
};
use crate::{
    error::AppResult,
    models::author::{AuthorForm, NewAuthor},
    AppState,
};

/// All authors with their book counts
pub async fn list_authors(State(state): State<AppState>, jar: CookieJar) -> AppResult<(CookieJar, Html<String>)> {
    let authors = state.services.catalog.list_author_summaries().await?;
    let (jar, message) = flash::take(jar);
    let html = AuthorsView::new(authors, message).render()?;
    Ok((jar, Html(html)))
}

pub async fn add_author_form(jar: CookieJar) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, message) = flash::take(jar);
    let html = AddAuthorView {
        flash: message.unwrap_or_default(),
    }
    .render()?;
    Ok((jar, Html(html)))
}

/// Create an author and go home
pub async fn add_author(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AuthorForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let data = NewAuthor::try_from(form)?;
    let author = state.services.catalog.create_author(data).await?;
    let jar = flash::set(jar, format!("Author '{}' added successfully.", author.name));
    Ok((jar, Redirect::to("/")))
}

/// Delete an author together with all of its books
pub async fn delete_author(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> AppResult<(CookieJar, Redirect)> {
    let deletion = state.services.catalog.delete_author(id).await?;
    Ok((flash::set(jar, deletion.message()), Redirect::to("/authors")))
}
