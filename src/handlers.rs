pub mod audit_handlers;
pub mod helpers;

use actix_web::{web, HttpResponse};

const NOT_FOUND_PAGE: &str = include_str!("../templates/errors/404.html");

/// Register the viewer's routes. Static files are mounted by the binary.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(audit_handlers::dashboard));
}

/// Fallback for unknown paths (must be registered last).
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(NOT_FOUND_PAGE)
}
