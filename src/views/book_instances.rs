use maud::{html, Markup};

use crate::{
    models::{Book, BookInstanceEntry, BookInstanceForm, BookStatus},
    validation::FieldError,
};

use super::{delete_form, field_errors, layout, stored};

fn book_link(entry: &BookInstanceEntry) -> Markup {
    html! {
        @match &entry.book {
            Some(book) => {
                a href=(book.url()) { (stored(&book.title)) }
            }
            None => { "(unknown book)" }
        }
    }
}

fn instance_facts(entry: &BookInstanceEntry) -> Markup {
    let instance = &entry.instance;
    html! {
        p { strong { "Title: " } (book_link(entry)) }
        p { strong { "Imprint: " } (stored(&instance.imprint)) }
        p { strong { "Status: " } (instance.status) }
        @if instance.status != BookStatus::Available {
            p { strong { "Due back: " } (instance.due_back_formatted()) }
        }
    }
}

pub fn book_instance_list(entries: &[BookInstanceEntry]) -> Markup {
    layout(
        "Book Instance List",
        html! {
            ul {
                @for entry in entries {
                    li {
                        a href=(entry.instance.url()) {
                            @match &entry.book {
                                Some(book) => { (stored(&book.title)) }
                                None => { "(unknown book)" }
                            }
                            " : " (stored(&entry.instance.imprint))
                        }
                        " - " (entry.instance.status)
                        @if entry.instance.status != BookStatus::Available {
                            " (Due: " (entry.instance.due_back_formatted()) ")"
                        }
                    }
                }
                @if entries.is_empty() {
                    li { "There are no book copies in this library." }
                }
            }
        },
    )
}

pub fn book_instance_detail(entry: &BookInstanceEntry) -> Markup {
    layout(
        &format!("ID: {}", entry.instance.id),
        html! {
            (instance_facts(entry))
            hr;
            p { a href=(format!("{}/delete", entry.instance.url())) { "Delete BookInstance" } }
            p { a href=(format!("{}/update", entry.instance.url())) { "Update BookInstance" } }
        },
    )
}

pub fn book_instance_form(
    form: &BookInstanceForm,
    books: &[Book],
    errors: &[FieldError],
) -> Markup {
    layout(
        "Create BookInstance",
        html! {
            form method="POST" action="" {
                div.form-group {
                    label for="book" { "Book:" }
                    select #book name="book" {
                        option value="" { "--Please select a book--" }
                        @for book in books {
                            option value=(book.id) selected[form.is_book_selected(book)] {
                                (stored(&book.title))
                            }
                        }
                    }
                }
                div.form-group {
                    label for="imprint" { "Imprint:" }
                    input #imprint type="text" name="imprint" placeholder="Publisher and date information"
                        value=(stored(&form.imprint));
                }
                div.form-group {
                    label for="due_back" { "Date when book available:" }
                    input #due_back type="date" name="due_back" value=(form.due_back);
                }
                div.form-group {
                    label for="status" { "Status:" }
                    select #status name="status" {
                        @for status in BookStatus::ALL {
                            option value=(status) selected[form.is_status_selected(status)] { (status) }
                        }
                    }
                }
                button type="submit" { "Submit" }
            }
            (field_errors(errors))
        },
    )
}

pub fn book_instance_delete(entry: &BookInstanceEntry) -> Markup {
    layout(
        "Delete BookInstance",
        html! {
            (instance_facts(entry))
            p { "Do you really want to delete this BookInstance?" }
            (delete_form("bookinstanceid", &entry.instance.id.to_string()))
        },
    )
}
