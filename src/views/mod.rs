//! HTML pages rendered with maud.
//!
//! Text that came from a submitted form is escaped when it is stored, so
//! stored values are emitted with [`stored`] instead of being escaped a
//! second time. Everything else goes through maud's normal escaping.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod index;

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::validation::FieldError;

/// Emit a value that was escaped before it was stored.
pub fn stored(value: &str) -> PreEscaped<&str> {
    PreEscaped(value)
}

/// Page shell with the catalog navigation on the side.
///
/// `title` may embed stored values and is emitted as-is.
pub fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (stored(title)) }
            }
            body {
                div.container {
                    nav.sidebar {
                        ul {
                            li { a href="/catalog" { "Home" } }
                            li { a href="/catalog/books" { "All books" } }
                            li { a href="/catalog/authors" { "All authors" } }
                            li { a href="/catalog/genres" { "All genres" } }
                            li { a href="/catalog/bookinstances" { "All book-instances" } }
                        }
                        hr;
                        ul {
                            li { a href="/catalog/author/create" { "Create new author" } }
                            li { a href="/catalog/genre/create" { "Create new genre" } }
                            li { a href="/catalog/book/create" { "Create new book" } }
                            li { a href="/catalog/bookinstance/create" { "Create new book instance (copy)" } }
                        }
                    }
                    main.content {
                        h1 { (stored(title)) }
                        (content)
                    }
                }
            }
        }
    }
}

/// Error page; `detail` is only passed in development.
pub fn error_page(message: &str, detail: Option<&str>) -> Markup {
    layout(
        "Error",
        html! {
            h2.error { (message) }
            @if let Some(detail) = detail {
                pre.error-detail { (detail) }
            }
        },
    )
}

/// Violations listed under a form
pub fn field_errors(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errors {
                @for error in errors {
                    li data-field=(error.field) { (error.message) }
                }
            }
        }
    }
}

/// Hidden-field form posting a delete request back to the current page
pub(crate) fn delete_form(field: &str, id: &str) -> Markup {
    html! {
        form method="POST" action="" {
            input type="hidden" name=(field) value=(id);
            button type="submit" { "Delete" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_text_is_not_escaped_twice() {
        let page = html! { p { (stored("Tom &amp; Jerry")) } }.into_string();
        assert_eq!(page, "<p>Tom &amp; Jerry</p>");
    }

    #[test]
    fn error_detail_is_optional() {
        let bare = error_page("Author not found", None).into_string();
        assert!(bare.contains("Author not found"));
        assert!(!bare.contains("error-detail"));

        let detailed = error_page("Internal Server Error", Some("Database error: pool timed out"))
            .into_string();
        assert!(detailed.contains("pool timed out"));
    }

    #[test]
    fn violations_carry_their_field() {
        let markup = field_errors(&[FieldError {
            field: "title",
            message: "Title must not be empty.".into(),
        }])
        .into_string();
        assert!(markup.contains(r#"data-field="title""#));
        assert!(markup.contains("Title must not be empty."));
    }
}
