//! `/users` routes.

use axum::http::StatusCode;
use onion_router::{Context, Route, RouteGroup};
use serde::Serialize;

#[derive(Serialize)]
struct User<'a> {
    id: &'a str,
}

pub fn routes() -> Vec<Route> {
    RouteGroup::new("users")
        .get("/", get_all_users)
        .get("/:userId", get_user)
        .post("/", create_user)
        .put("/:userId", update_user)
        .delete("/:userId", delete_user)
        .routes()
}

fn get_all_users(c: &mut Context) {
    c.string(StatusCode::OK, "Returning all users");
}

fn get_user(c: &mut Context) {
    let id = c.param("userId").unwrap_or_default().to_string();
    c.json(StatusCode::OK, &User { id: &id });
}

fn create_user(c: &mut Context) {
    c.string(StatusCode::OK, "Creating a new user");
}

fn update_user(c: &mut Context) {
    let id = c.param("userId").unwrap_or_default().to_string();
    c.string(StatusCode::OK, format!("Updating user with ID: {id}"));
}

fn delete_user(c: &mut Context) {
    let id = c.param("userId").unwrap_or_default().to_string();
    c.string(StatusCode::OK, format!("Deleting user with ID: {id}"));
}
