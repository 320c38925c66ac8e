//! Book instance (copy) pages

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use maud::Markup;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::BookInstanceForm,
    services::{book_instances::InstanceDeletion, Submission},
    validation::parse_id,
    views::book_instances as pages,
    AppState,
};

use super::{DocumentId, FormData};

const LIST_URL: &str = "/catalog/bookinstances";

#[derive(Debug, Deserialize)]
pub struct DeleteBookInstance {
    #[serde(default)]
    pub bookinstanceid: String,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Markup> {
    let entries = state.services.book_instances.list().await?;
    Ok(pages::book_instance_list(&entries))
}

pub async fn detail(State(state): State<AppState>, DocumentId(id): DocumentId) -> AppResult<Markup> {
    let entry = state.services.book_instances.detail(id).await?;
    Ok(pages::book_instance_detail(&entry))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Markup> {
    let books = state.services.book_instances.form_options().await?;
    Ok(pages::book_instance_form(&BookInstanceForm::default(), &books, &[]))
}

pub async fn create(
    State(state): State<AppState>,
    FormData(form): FormData<BookInstanceForm>,
) -> AppResult<Response> {
    let service = &state.services.book_instances;
    Ok(match service.create(form).await? {
        Submission::Created(instance) => {
            Redirect::to(&instance.url()).into_response()
        }
        Submission::Rejected { form, errors } => {
            let books = service.form_options().await?;
            pages::book_instance_form(&form, &books, &errors).into_response()
        }
    })
}

pub async fn delete_form(State(state): State<AppState>, DocumentId(id): DocumentId) -> AppResult<Response> {
    Ok(match state.services.book_instances.delete_confirmation(id).await? {
        Some(entry) => pages::book_instance_delete(&entry).into_response(),
        None => Redirect::to(LIST_URL).into_response(),
    })
}

pub async fn delete(
    State(state): State<AppState>,
    FormData(body): FormData<DeleteBookInstance>,
) -> AppResult<Redirect> {
    let id = parse_id(&body.bookinstanceid)?;
    match state.services.book_instances.delete(id).await? {
        InstanceDeletion::Deleted | InstanceDeletion::Missing => Ok(Redirect::to(LIST_URL)),
    }
}
