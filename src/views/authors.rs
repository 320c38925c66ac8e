use maud::{html, Markup};

use crate::{
    models::{Author, AuthorForm, Book},
    validation::FieldError,
};

use super::{delete_form, field_errors, layout, stored};

fn lifespan_line(author: &Author) -> Markup {
    html! {
        (author.date_of_birth_formatted()) " - " (author.date_of_death_formatted())
    }
}

fn book_summaries(books: &[Book]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url()) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

pub fn author_list(authors: &[Author]) -> Markup {
    layout(
        "Author List",
        html! {
            ul {
                @for author in authors {
                    li {
                        a href=(author.url()) { (stored(&author.name())) }
                        " (" (lifespan_line(author)) ")"
                    }
                }
                @if authors.is_empty() {
                    li { "There are no authors." }
                }
            }
        },
    )
}

pub fn author_detail(author: &Author, books: &[Book]) -> Markup {
    layout(
        &format!("Author: {}", author.name()),
        html! {
            p { (lifespan_line(author)) }
            @if let Some(years) = author.lifespan() {
                p { "Lifespan: " (years) " years" }
            }
            h4 { "Books" }
            @if books.is_empty() {
                p { "This author has no books." }
            } @else {
                (book_summaries(books))
            }
            hr;
            p { a href=(format!("{}/delete", author.url())) { "Delete author" } }
            p { a href=(format!("{}/update", author.url())) { "Update author" } }
        },
    )
}

pub fn author_form(form: &AuthorForm, errors: &[FieldError]) -> Markup {
    layout(
        "Create Author",
        html! {
            form method="POST" action="" {
                div.form-group {
                    label for="first_name" { "First Name:" }
                    input #first_name type="text" name="first_name" placeholder="First name"
                        value=(stored(&form.first_name));
                    label for="family_name" { "Family Name:" }
                    input #family_name type="text" name="family_name" placeholder="Family name"
                        value=(stored(&form.family_name));
                }
                div.form-group {
                    label for="date_of_birth" { "Date of birth:" }
                    input #date_of_birth type="date" name="date_of_birth" value=(form.date_of_birth);
                }
                div.form-group {
                    label for="date_of_death" { "Date of death:" }
                    input #date_of_death type="date" name="date_of_death" value=(form.date_of_death);
                }
                button type="submit" { "Submit" }
            }
            (field_errors(errors))
        },
    )
}

/// Confirmation page; also shown when a delete was refused because of `books`.
pub fn author_delete(author: &Author, books: &[Book]) -> Markup {
    layout(
        &format!("Delete Author: {}", author.name()),
        html! {
            p { (lifespan_line(author)) }
            @if books.is_empty() {
                p { "Do you really want to delete this Author?" }
                (delete_form("authorid", &author.id.to_string()))
            } @else {
                p { strong { "Delete the following books before attempting to delete this author." } }
                h4 { "Books" }
                (book_summaries(books))
            }
        },
    )
}
