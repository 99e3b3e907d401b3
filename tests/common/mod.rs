//! Shared test infrastructure for the audit viewer.
//!
//! - `spawn_upstream()` - stub audit API on an ephemeral port
//! - `spawn_slow_upstream()` - stub that answers after a delay
//! - `viewer_app()` - the viewer's actix `App`, wired like `main.rs`
//! - fixtures for upstream response bodies

#![allow(dead_code)]

use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::{ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};

use caresync_audit::client::AuditClient;
use caresync_audit::config::AppConfig;
use caresync_audit::handlers;

// ============================================================================
// FIXTURES
// ============================================================================

pub const SINGLE_LOG: &str = r#"[{"time":"2024-01-01T00:00:00Z","userType":"doctor","userId":"u1","recordId":"r1","action":"VIEW"}]"#;

pub const MIXED_LOGS: &str = r#"[
    {"time":"2024-01-01T08:00:00Z","userType":"doctor","userId":"d1","recordId":"r1","action":"VIEW"},
    {"time":"2024-01-01T09:00:00Z","userType":"patient","userId":"p1","recordId":"r1","action":"CREATE"},
    {"time":"2024-01-01T10:00:00Z","userType":"admin","userId":"a1","recordId":"r2","action":"UPDATE"},
    {"time":"2024-01-01T11:00:00Z","userType":"doctor","userId":"d2","recordId":"r3","action":"UPDATE"},
    {"time":"2024-01-01T12:00:00Z","userType":"patient","userId":"p1","recordId":"r1","action":"VIEW"}
]"#;

/// An address nothing listens on.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1/api/audit/logs";

// ============================================================================
// STUB UPSTREAM
// ============================================================================

pub struct Upstream {
    pub url: String,
    handle: ServerHandle,
}

impl Upstream {
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Serve `body` with `status` at `/api/audit/logs` on 127.0.0.1:<ephemeral>.
/// Must be called from inside an actix runtime (`#[actix_rt::test]`).
pub fn spawn_upstream(status: u16, body: &str) -> Upstream {
    let body = body.to_string();
    let server = HttpServer::new(move || {
        let body = body.clone();
        App::new().route(
            "/api/audit/logs",
            web::get().to(move || {
                let body = body.clone();
                async move {
                    HttpResponse::build(StatusCode::from_u16(status).expect("valid status"))
                        .content_type("application/json")
                        .body(body)
                }
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind stub upstream");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    Upstream {
        url: format!("http://{addr}/api/audit/logs"),
        handle,
    }
}

/// Like `spawn_upstream`, but waits `delay` before answering with an empty array.
pub fn spawn_slow_upstream(delay: Duration) -> Upstream {
    let server = HttpServer::new(move || {
        App::new().route(
            "/api/audit/logs",
            web::get().to(move || async move {
                actix_rt::time::sleep(delay).await;
                HttpResponse::Ok().content_type("application/json").body("[]")
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind slow stub upstream");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    Upstream {
        url: format!("http://{addr}/api/audit/logs"),
        handle,
    }
}

// ============================================================================
// VIEWER APP
// ============================================================================

pub fn test_config(api_url: &str) -> AppConfig {
    AppConfig {
        api_url: api_url.to_string(),
        fetch_timeout: Duration::from_secs(2),
        ..AppConfig::default()
    }
}

pub fn viewer_app(
    api_url: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    viewer_app_with_config(test_config(api_url))
}

/// Same wiring as `main.rs`, with a caller-supplied config.
pub fn viewer_app_with_config(
    config: AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let client = AuditClient::new(&config).expect("Failed to build audit client");

    App::new()
        .wrap(
            SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                .cookie_secure(false)
                .build(),
        )
        .app_data(web::Data::new(config))
        .app_data(web::Data::new(client))
        .configure(handlers::configure)
        .default_service(web::to(handlers::not_found))
}

// ============================================================================
// HTML HELPERS
// ============================================================================

pub fn count(html: &str, pattern: &str) -> usize {
    regex::Regex::new(pattern)
        .expect("valid regex")
        .find_iter(html)
        .count()
}

pub fn table_rows(html: &str) -> usize {
    count(html, r#"<tr class="audit-row">"#)
}

pub fn detail_panels(html: &str) -> usize {
    count(html, r#"<details class="log-panel">"#)
}

pub fn error_banners(html: &str) -> usize {
    count(html, r#"class="banner banner-error""#)
}
