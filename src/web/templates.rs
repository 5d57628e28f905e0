//! Server-rendered pages

use std::fmt::Write as _;

use axum::response::Html;

use super::flash::{Flash, FlashLevel};
use crate::models::Book;

/// Values shown in the add/edit form
#[derive(Debug, Clone, Default)]
pub struct BookFormView {
    pub name: String,
    pub author: String,
    pub price: String,
    /// `datetime-local` input value, down to the millisecond so an untouched field saves unchanged
    pub published_date: String,
}

impl From<&Book> for BookFormView {
    fn from(book: &Book) -> Self {
        Self {
            name: book.name.clone(),
            author: book.author.clone(),
            price: book.price.to_string(),
            published_date: book.published_date.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
        }
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> Html<String> {
    let mut messages = String::new();
    for flash in flashes {
        let class = match flash.level {
            FlashLevel::Success => "flash flash-success",
            FlashLevel::Error => "flash flash-error",
        };
        let _ = writeln!(
            messages,
            r#"<div class="{}">{}</div>"#,
            class,
            escape(&flash.message)
        );
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Bookshelf</title>
</head>
<body>
<header><a href="/">Bookshelf</a> | <a href="/books/add">Add book</a></header>
<main>
<h1>{title}</h1>
{messages}{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        messages = messages,
        body = body,
    ))
}

/// Listing page with every book in the catalog
pub fn book_list(books: &[Book], flashes: &[Flash]) -> Html<String> {
    let mut body = String::new();

    if books.is_empty() {
        body.push_str("<p>No books in the catalog yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Author</th><th>Price</th><th>Published</th><th></th></tr></thead>\n<tbody>\n",
        );
        for book in books {
            let _ = writeln!(
                body,
                r#"<tr><td>{id}</td><td>{name}</td><td>{author}</td><td>{price:.2}</td><td>{published}</td><td><a href="/books/{id}/edit">Edit</a> <form method="post" action="/books/{id}/delete" style="display:inline"><button type="submit">Delete</button></form></td></tr>"#,
                id = book.book_id,
                name = escape(&book.name),
                author = escape(&book.author),
                price = book.price,
                published = book.published_date.format("%Y-%m-%d"),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    layout("Books", flashes, &body)
}

/// Add or edit form; `action` is the URL the form posts to
pub fn book_form(title: &str, action: &str, values: &BookFormView, flashes: &[Flash]) -> Html<String> {
    let body = format!(
        r#"<form method="post" action="{action}">
<label>Name <input type="text" name="name" value="{name}" required></label>
<label>Author <input type="text" name="author" value="{author}" required></label>
<label>Price <input type="number" name="price" value="{price}" min="0" step="0.01" required></label>
<label>Published <input type="datetime-local" name="publishedDate" value="{published}" step="0.001"></label>
<button type="submit">Save</button>
<a href="/">Cancel</a>
</form>
"#,
        action = escape(action),
        name = escape(&values.name),
        author = escape(&values.author),
        price = escape(&values.price),
        published = escape(&values.published_date),
    );

    layout(title, flashes, &body)
}

pub fn error_page(title: &str, message: &str) -> Html<String> {
    let body = format!(
        "<p>{}</p>\n<p><a href=\"/\">Back to the book list</a></p>\n",
        escape(message)
    );
    layout(title, &[], &body)
}
