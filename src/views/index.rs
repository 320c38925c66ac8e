use maud::{html, Markup};

use crate::{error::AppError, services::aggregate::Bundle};

const COUNTS: [(&str, &str); 5] = [
    ("book_count", "Books"),
    ("book_instance_count", "Copies"),
    ("book_instance_available_count", "Copies available"),
    ("author_count", "Authors"),
    ("genre_count", "Genres"),
];

/// Catalog home. A failed count shows a notice in place of the numbers.
pub fn index(counts: &Result<Bundle<i64>, AppError>) -> Markup {
    super::layout(
        "Local Library Home",
        html! {
            p { "Welcome to the library catalog." }
            h2 { "Dynamic content" }
            @match counts {
                Ok(counts) => {
                    p { "The library has the following record counts:" }
                    ul.counts {
                        @for (key, label) in COUNTS {
                            li id=(key) {
                                strong { (label) ":" } " " (counts.get(key).copied().unwrap_or_default())
                            }
                        }
                    }
                }
                Err(_) => {
                    p.error { "Unable to load the catalog counts." }
                }
            }
        },
    )
}
