//! `/books` routes.

use axum::http::StatusCode;
use onion_router::{Context, Route, RouteGroup};

pub fn routes() -> Vec<Route> {
    RouteGroup::new("books")
        .get("/", get_all_books)
        .get("/:bookId", get_book)
        .post("/", create_book)
        .put("/:bookId", update_book)
        .delete("/:bookId", delete_book)
        .routes()
}

fn book_id(c: &Context) -> String {
    c.param("bookId").unwrap_or_default().to_string()
}

fn get_all_books(c: &mut Context) {
    c.string(StatusCode::OK, "GET /books -> returning all books");
}

fn get_book(c: &mut Context) {
    let id = book_id(c);
    c.string(StatusCode::OK, format!("GET /books/{id} -> single book"));
}

fn create_book(c: &mut Context) {
    c.string(StatusCode::OK, "POST /books -> creating a book");
}

fn update_book(c: &mut Context) {
    let id = book_id(c);
    c.string(StatusCode::OK, format!("PUT /books/{id} -> updating a book"));
}

fn delete_book(c: &mut Context) {
    let id = book_id(c);
    c.string(StatusCode::OK, format!("DELETE /books/{id} -> deleting a book"));
}
