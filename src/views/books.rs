use maud::{html, Markup};

use crate::{
    models::{Author, BookDetail, BookForm, BookInstance, BookListEntry, BookStatus, Genre},
    validation::FieldError,
};

use super::{delete_form, field_errors, layout, stored};

fn status_class(status: BookStatus) -> &'static str {
    match status {
        BookStatus::Available => "text-success",
        BookStatus::Maintenance => "text-danger",
        BookStatus::Loaned | BookStatus::Reserved => "text-warning",
    }
}

pub fn book_list(entries: &[BookListEntry]) -> Markup {
    layout(
        "Book List",
        html! {
            ul {
                @for entry in entries {
                    li {
                        a href=(entry.book.url()) { (stored(&entry.book.title)) }
                        @if let Some(author) = &entry.author {
                            " (" (stored(&author.name())) ")"
                        }
                    }
                }
                @if entries.is_empty() {
                    li { "There are no books." }
                }
            }
        },
    )
}

fn book_facts(detail: &BookDetail) -> Markup {
    html! {
        p {
            strong { "Author: " }
            @if let Some(author) = &detail.author {
                a href=(author.url()) { (stored(&author.name())) }
            }
        }
        p { strong { "Summary: " } (stored(&detail.book.summary)) }
        p { strong { "ISBN: " } (stored(&detail.book.isbn)) }
        p {
            strong { "Genre: " }
            @for (i, genre) in detail.genres.iter().enumerate() {
                @if i > 0 { ", " }
                a href=(genre.url()) { (stored(&genre.name)) }
            }
        }
    }
}

fn copies(instances: &[BookInstance]) -> Markup {
    html! {
        @for instance in instances {
            hr;
            p class=(status_class(instance.status)) { (instance.status) }
            p { strong { "Imprint: " } (stored(&instance.imprint)) }
            @if instance.status != BookStatus::Available {
                p { strong { "Due back: " } (instance.due_back_formatted()) }
            }
            p { strong { "Id: " } a href=(instance.url()) { (instance.id) } }
        }
    }
}

pub fn book_detail(detail: &BookDetail, instances: &[BookInstance]) -> Markup {
    layout(
        &format!("Title: {}", detail.book.title),
        html! {
            (book_facts(detail))
            div.copies {
                h4 { "Copies" }
                @if instances.is_empty() {
                    p { "There are no copies of this book in the library." }
                } @else {
                    (copies(instances))
                }
            }
            hr;
            p { a href=(format!("{}/delete", detail.book.url())) { "Delete book" } }
            p { a href=(format!("{}/update", detail.book.url())) { "Update book" } }
        },
    )
}

/// Creation form. The submitted author stays selected and the submitted
/// genres stay checked when the form is shown again.
pub fn book_form(
    form: &BookForm,
    authors: &[Author],
    genres: &[Genre],
    errors: &[FieldError],
) -> Markup {
    layout(
        "Create Book",
        html! {
            form method="POST" action="" {
                div.form-group {
                    label for="title" { "Title:" }
                    input #title type="text" name="title" placeholder="Name of book"
                        value=(stored(&form.title));
                }
                div.form-group {
                    label for="author" { "Author:" }
                    select #author name="author" {
                        option value="" { "--Please select an author--" }
                        @for author in authors {
                            option value=(author.id) selected[form.is_author_selected(author)] {
                                (stored(&author.name()))
                            }
                        }
                    }
                }
                div.form-group {
                    label for="summary" { "Summary:" }
                    textarea #summary name="summary" placeholder="Summary" { (stored(&form.summary)) }
                }
                div.form-group {
                    label for="isbn" { "ISBN:" }
                    input #isbn type="text" name="isbn" placeholder="ISBN13" value=(stored(&form.isbn));
                }
                div.form-group {
                    label { "Genre:" }
                    @for genre in genres {
                        div.checkbox {
                            input type="checkbox" name="genre" id=(genre.id) value=(genre.id)
                                checked[form.is_genre_checked(genre)];
                            label for=(genre.id) { (stored(&genre.name)) }
                        }
                    }
                }
                button type="submit" { "Submit" }
            }
            (field_errors(errors))
        },
    )
}

pub fn book_delete(detail: &BookDetail, instances: &[BookInstance]) -> Markup {
    layout(
        &format!("Delete Book: {}", detail.book.title),
        html! {
            (book_facts(detail))
            @if instances.is_empty() {
                p { "Do you really want to delete this Book?" }
                (delete_form("bookid", &detail.book.id.to_string()))
            } @else {
                p { strong { "Delete the following copies before attempting to delete this book." } }
                div.copies {
                    h4 { "Copies" }
                    (copies(instances))
                }
            }
        },
    )
}
