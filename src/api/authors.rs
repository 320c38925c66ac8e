//! Author pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::AuthorForm,
    services::{DeleteOutcome, Submission},
    validation::parse_id,
    views::authors as pages,
    AppState,
};

use super::{DocumentId, FormData};

const LIST_URL: &str = "/catalog/authors";

/// Body of the delete confirmation form
#[derive(Debug, Deserialize)]
pub struct DeleteAuthor {
    #[serde(default)]
    pub authorid: String,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Markup> {
    let authors = state.services.authors.list().await?;
    Ok(pages::author_list(&authors))
}

pub async fn detail(State(state): State<AppState>, DocumentId(id): DocumentId) -> AppResult<Markup> {
    let found = state.services.authors.detail(id).await?;
    Ok(pages::author_detail(&found.author, &found.books))
}

pub async fn create_form() -> Markup {
    pages::author_form(&AuthorForm::default(), &[])
}

pub async fn create(
    State(state): State<AppState>,
    FormData(form): FormData<AuthorForm>,
) -> AppResult<Response> {
    Ok(match state.services.authors.create(form).await? {
        Submission::Created(author) => {
            Redirect::to(&author.url()).into_response()
        }
        Submission::Rejected { form, errors } => pages::author_form(&form, &errors).into_response(),
    })
}

pub async fn delete_form(State(state): State<AppState>, DocumentId(id): DocumentId) -> AppResult<Response> {
    Ok(match state.services.authors.delete_confirmation(id).await? {
        Some(found) => pages::author_delete(&found.author, &found.books).into_response(),
        None => Redirect::to(LIST_URL).into_response(),
    })
}

/// The id to delete comes from the form body, not the path.
pub async fn delete(
    State(state): State<AppState>,
    FormData(body): FormData<DeleteAuthor>,
) -> AppResult<Response> {
    let id = parse_id(&body.authorid)?;
    Ok(match state.services.authors.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Redirect::to(LIST_URL).into_response(),
        DeleteOutcome::Blocked(found) => pages::author_delete(&found.author, &found.books).into_response(),
    })
}
