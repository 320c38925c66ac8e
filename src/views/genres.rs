use maud::{html, Markup};

use crate::{
    models::{Book, Genre, GenreForm},
    validation::FieldError,
};

use super::{delete_form, field_errors, layout, stored};

pub fn genre_list(genres: &[Genre]) -> Markup {
    layout(
        "Genre List",
        html! {
            ul {
                @for genre in genres {
                    li { a href=(genre.url()) { (stored(&genre.name)) } }
                }
                @if genres.is_empty() {
                    li { "There are no genres." }
                }
            }
        },
    )
}

fn books_in_genre(books: &[Book]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url()) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

pub fn genre_detail(genre: &Genre, books: &[Book]) -> Markup {
    layout(
        &format!("Genre: {}", genre.name),
        html! {
            h4 { "Books" }
            @if books.is_empty() {
                p { "This genre has no books." }
            } @else {
                (books_in_genre(books))
            }
            hr;
            p { a href=(format!("{}/delete", genre.url())) { "Delete genre" } }
            p { a href=(format!("{}/update", genre.url())) { "Update genre" } }
        },
    )
}

pub fn genre_form(form: &GenreForm, errors: &[FieldError]) -> Markup {
    layout(
        "Create Genre",
        html! {
            form method="POST" action="" {
                div.form-group {
                    label for="name" { "Genre:" }
                    input #name type="text" name="name" placeholder="Fantasy, Poetry etc."
                        value=(stored(&form.name));
                }
                button type="submit" { "Submit" }
            }
            (field_errors(errors))
        },
    )
}

pub fn genre_delete(genre: &Genre, books: &[Book]) -> Markup {
    layout(
        &format!("Delete Genre: {}", genre.name),
        html! {
            @if books.is_empty() {
                p { "Do you really want to delete this Genre?" }
                (delete_form("genreid", &genre.id.to_string()))
            } @else {
                p { strong { "Delete the following books before attempting to delete this genre." } }
                h4 { "Books" }
                (books_in_genre(books))
            }
        },
    )
}
