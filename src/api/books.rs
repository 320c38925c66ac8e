//! Book pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::BookForm,
    services::{DeleteOutcome, Submission},
    validation::parse_id,
    views::books as pages,
    AppState,
};

use super::{DocumentId, FormData};

const LIST_URL: &str = "/catalog/books";

#[derive(Debug, Deserialize)]
pub struct DeleteBook {
    #[serde(default)]
    pub bookid: String,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Markup> {
    let entries = state.services.books.list().await?;
    Ok(pages::book_list(&entries))
}

pub async fn detail(State(state): State<AppState>, DocumentId(id): DocumentId) -> AppResult<Markup> {
    let found = state.services.books.detail(id).await?;
    Ok(pages::book_detail(&found.book, &found.instances))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Markup> {
    let options = state.services.books.form_options().await?;
    Ok(pages::book_form(
        &BookForm::default(),
        &options.authors,
        &options.genres,
        &[],
    ))
}

/// `genre` may be sent zero, one or many times; the extractor always yields a list.
pub async fn create(
    State(state): State<AppState>,
    FormData(form): FormData<BookForm>,
) -> AppResult<Response> {
    let books = &state.services.books;
    Ok(match books.create(form).await? {
        Submission::Created(book) => {
            Redirect::to(&book.url()).into_response()
        }
        Submission::Rejected { form, errors } => {
            let options = books.form_options().await?;
            pages::book_form(&form, &options.authors, &options.genres, &errors).into_response()
        }
    })
}

pub async fn delete_form(State(state): State<AppState>, DocumentId(id): DocumentId) -> AppResult<Response> {
    Ok(match state.services.books.delete_confirmation(id).await? {
        Some(found) => pages::book_delete(&found.book, &found.instances).into_response(),
        None => Redirect::to(LIST_URL).into_response(),
    })
}

pub async fn delete(
    State(state): State<AppState>,
    FormData(body): FormData<DeleteBook>,
) -> AppResult<Response> {
    let id = parse_id(&body.bookid)?;
    Ok(match state.services.books.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Redirect::to(LIST_URL).into_response(),
        DeleteOutcome::Blocked(found) => pages::book_delete(&found.book, &found.instances).into_response(),
    })
}
