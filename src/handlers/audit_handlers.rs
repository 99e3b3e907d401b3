use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Local;

use crate::client::AuditClient;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::helpers::{has_key, parse_query};
use crate::models::audit::{FilterOptions, FilterSelection, build_view};
use crate::models::audit::filter::RESET_PARAM;
use crate::templates_structs::AuditDashboardTemplate;

/// Session key under which the filter selection is kept between page loads.
pub const SELECTION_KEY: &str = "audit_filter";

/// Upper bound on the serialized selection kept in the cookie session.
/// The cookie store rejects the whole response once the cookie passes 4 KiB.
const MAX_STORED_SELECTION_BYTES: usize = 2048;

fn stored_selection(session: &Session) -> FilterSelection {
    session
        .get::<FilterSelection>(SELECTION_KEY)
        .unwrap_or_else(|e| {
            log::warn!("Discarding unreadable audit filter selection: {e}");
            None
        })
        .unwrap_or_default()
}

/// Keep a submitted selection for later page loads, limited to values
/// present in the fetched data.
fn remember_selection(session: &Session, selection: &FilterSelection, options: &FilterOptions) {
    let kept = selection.restrict_to(options);
    match serde_json::to_string(&kept) {
        Ok(json) if json.len() > MAX_STORED_SELECTION_BYTES => {
            log::warn!(
                "Audit filter selection too large to keep ({} bytes), not stored",
                json.len()
            );
            session.remove(SELECTION_KEY);
        }
        Ok(_) => {
            if let Err(e) = session.insert(SELECTION_KEY, &kept) {
                log::warn!("Failed to store audit filter selection: {e}");
            }
        }
        Err(e) => log::warn!("Failed to serialize audit filter selection: {e}"),
    }
}

/// GET / — fetch once, filter, render.
/// Selection precedence: reset > submitted form > stored in session > default.
pub async fn dashboard(
    req: HttpRequest,
    session: Session,
    client: web::Data<AuditClient>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let params = parse_query(req.query_string());
    let reset = has_key(&params, RESET_PARAM);
    if reset {
        session.remove(SELECTION_KEY);
    }
    let submitted = if reset { None } else { FilterSelection::from_params(&params) };

    let outcome = client.fetch().await;
    match &outcome {
        Ok(batch) => log::info!(
            "Fetched {} audit logs ({} rejected) from {}",
            batch.records.len(),
            batch.rejected.len(),
            client.url()
        ),
        Err(e) => log::warn!("Audit log fetch from {} failed: {e}", client.url()),
    }

    let selection = match submitted {
        Some(selection) => {
            if let Ok(batch) = &outcome {
                remember_selection(&session, &selection, &FilterOptions::from_records(&batch.records));
            }
            selection
        }
        None if reset => FilterSelection::default(),
        None => stored_selection(&session),
    };

    let view = build_view(outcome, &selection);
    let tmpl = AuditDashboardTemplate {
        title: config.title.clone(),
        source_url: client.url().to_string(),
        fetched_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        filter_active: !selection.is_default(),
        view,
    };
    render(tmpl)
}
