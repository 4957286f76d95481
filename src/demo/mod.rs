//! Demo application: book and user routes behind auth and log middleware.

mod books;
mod middlewares;
mod users;

use axum::http::StatusCode;
use onion_router::{App, Context};

pub fn app() -> App {
    App::builder()
        .use_middleware(middlewares::auth)
        .use_middleware(middlewares::log)
        .use_routes([users::routes(), books::routes()])
        .not_found_handler(|c: &mut Context| c.string(StatusCode::NOT_FOUND, "Custom 404 message!"))
        .build()
}
