//! Genre pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::GenreForm,
    services::{genres::GenreSubmission, DeleteOutcome},
    validation::parse_id,
    views::genres as pages,
    AppState,
};

use super::{DocumentId, FormData};

const LIST_URL: &str = "/catalog/genres";

#[derive(Debug, Deserialize)]
pub struct DeleteGenre {
    #[serde(default)]
    pub genreid: String,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Markup> {
    let genres = state.services.genres.list().await?;
    Ok(pages::genre_list(&genres))
}

pub async fn detail(State(state): State<AppState>, DocumentId(id): DocumentId) -> AppResult<Markup> {
    let found = state.services.genres.detail(id).await?;
    Ok(pages::genre_detail(&found.genre, &found.books))
}

pub async fn create_form() -> Markup {
    pages::genre_form(&GenreForm::default(), &[])
}

/// An existing genre with the same name is redirected to instead of duplicated.
pub async fn create(
    State(state): State<AppState>,
    FormData(form): FormData<GenreForm>,
) -> AppResult<Response> {
    Ok(match state.services.genres.create(form).await? {
        GenreSubmission::Created(genre) | GenreSubmission::Existing(genre) => {
            Redirect::to(&genre.url()).into_response()
        }
        GenreSubmission::Rejected { form, errors } => pages::genre_form(&form, &errors).into_response(),
    })
}

pub async fn delete_form(State(state): State<AppState>, DocumentId(id): DocumentId) -> AppResult<Response> {
    Ok(match state.services.genres.delete_confirmation(id).await? {
        Some(found) => pages::genre_delete(&found.genre, &found.books).into_response(),
        None => Redirect::to(LIST_URL).into_response(),
    })
}

pub async fn delete(
    State(state): State<AppState>,
    FormData(body): FormData<DeleteGenre>,
) -> AppResult<Response> {
    let id = parse_id(&body.genreid)?;
    Ok(match state.services.genres.delete(id).await? {
        DeleteOutcome::Deleted | DeleteOutcome::Missing => Redirect::to(LIST_URL).into_response(),
        DeleteOutcome::Blocked(found) => pages::genre_delete(&found.genre, &found.books).into_response(),
    })
}
