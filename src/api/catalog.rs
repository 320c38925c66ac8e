//! Catalog home page

use axum::extract::State;
use maud::Markup;

use crate::{views, AppState};

/// Home page with the collection counts. A failed count is reported on the
/// page itself rather than as an error response.
pub async fn index(State(state): State<AppState>) -> Markup {
    let counts = state.services.catalog.summary().await;
    if let Err(e) = &counts {
        tracing::error!("Failed to count catalog documents: {}", e);
    }
    views::index::index(&counts)
}
