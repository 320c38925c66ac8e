//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{header, request::Parts, HeaderValue},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    error::{AppError, ErrorReport},
    validation::parse_id,
    views, AppState,
};

/// Document id taken from the `:id` path segment
pub struct DocumentId(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for DocumentId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidId(e.to_string()))?;
        Ok(DocumentId(parse_id(&raw)?))
    }
}

/// URL-encoded form body. `genre=a&genre=b` style repeated keys collect into
/// a `Vec`; a body that cannot be read or decoded becomes an error page.
pub struct FormData<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for FormData<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(request, state).await?;
        Ok(FormData(value))
    }
}

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; base-uri 'self'; form-action 'self'; \
    frame-ancestors 'self'; img-src 'self' data:; object-src 'none'; script-src 'self'; \
    style-src 'self' https: 'unsafe-inline'";

/// Browser hardening headers, added unless a handler already set them.
fn with_security_headers(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
}

/// Re-render error pages with the failure detail when the environment
/// allows it.
async fn error_pages(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if !state.config.server.environment.exposes_error_details() {
        return response;
    }

    match response.extensions().get::<ErrorReport>().cloned() {
        Some(report) => (
            report.status,
            views::error_page(&report.message, Some(&report.detail)),
        )
            .into_response(),
        None => response,
    }
}

async fn not_found() -> AppError {
    AppError::NotFound("Page".to_string())
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::list))
        .route("/author/create", get(authors::create_form).post(authors::create))
        .route("/author/:id", get(authors::detail))
        .route("/author/:id/delete", get(authors::delete_form).post(authors::delete))
        .route(
            "/author/:id/update",
            get(|| async { "NOT IMPLEMENTED: Author update GET" })
                .post(|| async { "NOT IMPLEMENTED: Author update POST" }),
        )
        // Genres
        .route("/genres", get(genres::list))
        .route("/genre/create", get(genres::create_form).post(genres::create))
        .route("/genre/:id", get(genres::detail))
        .route("/genre/:id/delete", get(genres::delete_form).post(genres::delete))
        .route(
            "/genre/:id/update",
            get(|| async { "NOT IMPLEMENTED: Genre update GET" })
                .post(|| async { "NOT IMPLEMENTED: Genre update POST" }),
        )
        // Books
        .route("/books", get(books::list))
        .route("/book/create", get(books::create_form).post(books::create))
        .route("/book/:id", get(books::detail))
        .route("/book/:id/delete", get(books::delete_form).post(books::delete))
        .route(
            "/book/:id/update",
            get(|| async { "NOT IMPLEMENTED: Book update GET" })
                .post(|| async { "NOT IMPLEMENTED: Book update POST" }),
        )
        // Book instances
        .route("/bookinstances", get(book_instances::list))
        .route(
            "/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/bookinstance/:id", get(book_instances::detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        )
        .route(
            "/bookinstance/:id/update",
            get(|| async { "NOT IMPLEMENTED: BookInstance update GET" })
                .post(|| async { "NOT IMPLEMENTED: BookInstance update POST" }),
        );

    let app = Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .nest("/catalog", catalog)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), error_pages))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    with_security_headers(app)
}
